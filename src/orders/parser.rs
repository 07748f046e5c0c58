use super::RawItem;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    /// `Quantity:` label, then the first size label, then the first color label.
    /// Size and color values run to the end of their line.
    static ref ITEM_RE: Regex = Regex::new(concat!(
        r"(?is)Quantity:\s*(\d+)",
        r".*?(?:Select Shirt Size:? |Shirt Size:? |Size:? )\s*([^\n]+)",
        r".*?(?:Select Shirt Color:? |Shirt Color:? |Color:? )\s*([^\n]+)",
    ))
    .unwrap();
}

/// Scan raw document text for `quantity / size / color` triples.
///
/// Matches never overlap and are taken left to right. A quantity that does
/// not fit a `u64` is recorded as 0.
pub fn parse_document(text: &str) -> Vec<RawItem> {
    let items: Vec<RawItem> = ITEM_RE
        .captures_iter(text)
        .map(|c| RawItem {
            quantity: c[1].trim().parse().unwrap_or(0),
            size_text: c[2].trim().to_string(),
            color_text: c[3].trim().to_string(),
        })
        .collect();

    debug!(items = items.len(), "Parsed order items from text");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ITEMS: &str = "Order #1001\n\
        Quantity: 2\n\
        Shirt Size: Hoodie - L\n\
        Shirt Color: Light Pink\n\
        \n\
        Quantity: 1\n\
        Select Shirt Size: Short Sleeve - XL\n\
        Select Shirt Color: Black\n";

    #[test]
    fn test_parses_each_triple() {
        let items = parse_document(TWO_ITEMS);
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            RawItem {
                quantity: 2,
                size_text: "Hoodie - L".to_string(),
                color_text: "Light Pink".to_string(),
            }
        );
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].size_text, "Short Sleeve - XL");
        assert_eq!(items[1].color_text, "Black");
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let text = "QUANTITY: 3\nsize: Youth - Small\ncolor: navy\n";
        let items = parse_document(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].size_text, "Youth - Small");
        assert_eq!(items[0].color_text, "navy");
    }

    #[test]
    fn test_value_on_following_line() {
        // PDF text layers keep the space after the label before the line break
        let text = "Quantity: 4\nSize: \nTank Top - M\nColor: \nWhite\n";
        let items = parse_document(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].size_text, "Tank Top - M");
        assert_eq!(items[0].color_text, "White");
    }

    #[test]
    fn test_fields_separated_by_other_text() {
        let text = "Quantity: 5 Price: $10\nNotes: rush\nShirt Size: Long Sleeve - S\n\
                    Gift wrap: no\nShirt Color: Sand / Natural\n";
        let items = parse_document(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
        assert_eq!(items[0].size_text, "Long Sleeve - S");
        assert_eq!(items[0].color_text, "Sand / Natural");
    }

    #[test]
    fn test_overflowing_quantity_is_zero() {
        let text = "Quantity: 99999999999999999999999\nSize: Hoodie - S\nColor: Red\n";
        let items = parse_document(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 0);
    }

    #[test]
    fn test_no_matches() {
        assert!(parse_document("").is_empty());
        assert!(parse_document("Invoice total: 12.00\nThank you!").is_empty());
        // Quantity without size/color labels afterwards
        assert!(parse_document("Quantity: 2\nHoodie\nPink").is_empty());
    }
}
