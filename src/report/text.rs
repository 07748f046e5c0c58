use super::{CategoryTable, ExportError, TableRenderer, csv_export::HEADERS};
use crate::orders::Aggregate;

/// Plain-text pivot tables for the terminal.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer;

impl TableRenderer for TextRenderer {
    fn render(&self, tables: &[CategoryTable]) -> Result<Vec<u8>, ExportError> {
        let blocks: Vec<String> = tables
            .iter()
            .map(|t| format!("{}\n{}", t.banner(), format_grid(&t.headers, &t.rows, 1)))
            .collect();
        Ok(blocks.join("\n").into_bytes())
    }
}

pub const NO_ITEMS: &str = "No order items found.";

/// What `report` prints: the aggregate table, or [`NO_ITEMS`] when the
/// batch produced nothing.
pub fn aggregate_report(aggregate: &Aggregate) -> String {
    if aggregate.is_empty() {
        format!("{NO_ITEMS}\n")
    } else {
        aggregate_table(aggregate)
    }
}

/// The flat aggregate, one line per `(size, color)`.
pub fn aggregate_table(aggregate: &Aggregate) -> String {
    let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = aggregate
        .records()
        .map(|r| vec![r.size_label, r.color, r.quantity.to_string()])
        .collect();
    format_grid(&headers, &rows, 2)
}

/// Columns before `right_from` are left-aligned, the rest right-aligned.
fn format_grid(headers: &[String], rows: &[Vec<String>], right_from: usize) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                if i < right_from {
                    format!("{cell:<w$}")
                } else {
                    format!("{cell:>w$}")
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = line(headers);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::{AggregateRecord, aggregate};

    #[test]
    fn test_pivot_block() {
        let table = CategoryTable {
            category: "Youth".to_string(),
            headers: vec!["Color".into(), "S".into(), "M".into()],
            rows: vec![
                vec!["Navy".into(), "0".into(), "3".into()],
                vec!["Red".into(), "12".into(), "0".into()],
            ],
        };
        let out = String::from_utf8(TextRenderer.render(&[table]).unwrap()).unwrap();
        assert_eq!(
            out,
            "Category: Youth\n\
             Color |  S | M\n\
             ------+----+--\n\
             Navy  |  0 | 3\n\
             Red   | 12 | 0\n"
        );
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let t = |cat: &str| CategoryTable {
            category: cat.to_string(),
            headers: vec!["Color".into(), "L".into()],
            rows: vec![vec!["Red".into(), "1".into()]],
        };
        let out = String::from_utf8(TextRenderer.render(&[t("A"), t("B")]).unwrap()).unwrap();
        assert!(out.contains("Red   | 1\n\nCategory: B\n"), "{out}");
        assert!(out.starts_with("Category: A\n"));
    }

    #[test]
    fn test_aggregate_table() {
        let agg = aggregate(vec![AggregateRecord {
            size_label: "Hoodie - L".to_string(),
            color: "Pink".to_string(),
            quantity: 3,
        }]);
        assert_eq!(
            aggregate_table(&agg),
            "Normalized Size | Shirt Color | Quantity\n\
             ----------------+-------------+---------\n\
             Hoodie - L      | Pink        |        3\n"
        );
    }

    #[test]
    fn test_aggregate_report() {
        assert_eq!(aggregate_report(&Aggregate::new()), "No order items found.\n");

        let agg = aggregate(vec![AggregateRecord {
            size_label: "Youth - M".to_string(),
            color: "Navy".to_string(),
            quantity: 3,
        }]);
        assert_eq!(aggregate_report(&agg), aggregate_table(&agg));
    }
}
