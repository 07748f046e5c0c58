use super::CategoryTable;
use crate::orders::{Aggregate, Category, Taxonomy, has_vneck_keyword};
use std::collections::{BTreeMap, BTreeSet};

/// Split a canonical label into `(category, size)`.
///
/// `"Hoodie - L"` gives `("Hoodie", "L")`; a label without `" - "` is all
/// category. Only the first two segments are kept, so `"Tee - L - Tall"`
/// gives `("Tee", "L")`. Any v-neck spelling in the category maps to
/// `Short Sleeve V-Neck`.
pub fn split_category_and_size(label: &str) -> (String, String) {
    let mut parts = label.split(" - ");
    let (Some(cat), Some(size)) = (parts.next(), parts.next()) else {
        return (label.to_string(), String::new());
    };
    let mut cat = cat.trim().to_string();
    if has_vneck_keyword(&cat.to_lowercase()) {
        cat = Category::ShortSleeveVNeck.name().to_string();
    }
    (cat, size.trim().to_string())
}

/// Order size columns for `category`.
///
/// Known categories sort by their size-order rank, unknown sizes last in
/// the order given. Categories without a size order sort alphabetically.
pub fn order_sizes(category: &str, sizes: &mut [String], taxonomy: &Taxonomy) {
    if taxonomy.size_order(category).is_some() {
        // sort_by_key is stable
        sizes.sort_by_key(|s| taxonomy.size_rank(category, s));
    } else {
        sizes.sort();
    }
}

/// Color × size matrix of quantities for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotTable {
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    /// `cells[row][col]` pairs `colors[row]` with `sizes[col]`.
    pub cells: Vec<Vec<u64>>,
}

impl PivotTable {
    pub fn get(&self, color: &str, size: &str) -> Option<u64> {
        let row = self.colors.iter().position(|c| c == color)?;
        let col = self.sizes.iter().position(|s| s == size)?;
        Some(self.cells[row][col])
    }

    pub fn total(&self) -> u64 {
        self.cells
            .iter()
            .flatten()
            .fold(0u64, |acc, &q| acc.saturating_add(q))
    }

    /// Banner, header and text rows as handed to a [`super::TableRenderer`].
    pub fn to_category_table(&self) -> CategoryTable {
        let mut headers = Vec::with_capacity(self.sizes.len() + 1);
        headers.push("Color".to_string());
        headers.extend(self.sizes.iter().cloned());

        let rows = self
            .colors
            .iter()
            .zip(&self.cells)
            .map(|(color, cells)| {
                let mut row = Vec::with_capacity(cells.len() + 1);
                row.push(color.clone());
                row.extend(cells.iter().map(|q| q.to_string()));
                row
            })
            .collect();

        CategoryTable {
            category: self.category.clone(),
            headers,
            rows,
        }
    }
}

#[derive(Default)]
struct PivotBuilder {
    sizes: Vec<String>,
    colors: BTreeSet<String>,
    cells: BTreeMap<(String, String), u64>,
}

/// Build one pivot per category, keyed (and so iterated) by category name.
pub fn build_pivots(aggregate: &Aggregate, taxonomy: &Taxonomy) -> BTreeMap<String, PivotTable> {
    let mut builders: BTreeMap<String, PivotBuilder> = BTreeMap::new();

    for record in aggregate.records() {
        let (category, size) = split_category_and_size(&record.size_label);
        let b = builders.entry(category).or_default();
        if !b.sizes.contains(&size) {
            b.sizes.push(size.clone());
        }
        b.colors.insert(record.color.clone());
        let cell = b.cells.entry((record.color, size)).or_insert(0);
        *cell = cell.saturating_add(record.quantity);
    }

    builders
        .into_iter()
        .map(|(category, mut b)| {
            order_sizes(&category, &mut b.sizes, taxonomy);
            let colors: Vec<String> = b.colors.into_iter().collect();
            let cells = colors
                .iter()
                .map(|color| {
                    b.sizes
                        .iter()
                        .map(|size| {
                            b.cells
                                .get(&(color.clone(), size.clone()))
                                .copied()
                                .unwrap_or(0)
                        })
                        .collect()
                })
                .collect();
            let pivot = PivotTable {
                category: category.clone(),
                sizes: b.sizes,
                colors,
                cells,
            };
            (category, pivot)
        })
        .collect()
}
