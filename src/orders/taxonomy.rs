use std::collections::BTreeMap;

/// Rank given to sizes missing from their category's order list.
pub const UNKNOWN_SIZE_RANK: usize = 100;

/// Canonical size orders and color synonyms.
///
/// Built once (from defaults or config) and shared read-only by the
/// pipeline and the report builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    size_orders: BTreeMap<String, Vec<String>>,
    color_synonyms: BTreeMap<String, String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(default_size_orders(), default_color_synonyms())
    }
}

impl Taxonomy {
    /// Synonym keys are matched case-insensitively; size tokens are
    /// compared upper-cased.
    pub fn new(
        size_orders: BTreeMap<String, Vec<String>>,
        color_synonyms: BTreeMap<String, String>,
    ) -> Self {
        let size_orders = size_orders
            .into_iter()
            .map(|(cat, sizes)| {
                let sizes = sizes.iter().map(|s| s.trim().to_uppercase()).collect();
                (cat, sizes)
            })
            .collect();
        let color_synonyms = color_synonyms
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v))
            .collect();
        Self {
            size_orders,
            color_synonyms,
        }
    }

    pub fn size_order(&self, category: &str) -> Option<&[String]> {
        self.size_orders.get(category).map(Vec::as_slice)
    }

    /// Position of `size` in the category's order list, or
    /// [`UNKNOWN_SIZE_RANK`] when either is unknown.
    pub fn size_rank(&self, category: &str, size: &str) -> usize {
        let size = size.to_uppercase();
        self.size_order(category)
            .and_then(|order| order.iter().position(|s| *s == size))
            .unwrap_or(UNKNOWN_SIZE_RANK)
    }

    pub fn color_synonym(&self, lowered: &str) -> Option<&str> {
        self.color_synonyms.get(lowered).map(String::as_str)
    }

    pub fn color_synonyms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.color_synonyms
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub fn default_size_orders() -> BTreeMap<String, Vec<String>> {
    const ADULT_TEE: &[&str] = &["XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL"];
    const ADULT_FLEECE: &[&str] = &["S", "M", "L", "XL", "2XL", "3XL"];

    let table: [(&str, &[&str]); 9] = [
        ("Short Sleeve", ADULT_TEE),
        ("Short Sleeve V-Neck", ADULT_TEE),
        ("Tank Top", &["S", "M", "L", "XL", "2XL"]),
        ("Sweatshirt", ADULT_FLEECE),
        ("Long Sleeve", ADULT_FLEECE),
        ("Hoodie", ADULT_FLEECE),
        ("Youth", &["S", "M", "L"]),
        ("Toddler", &["2T", "3T", "4T", "5T"]),
        ("Baby", &["NB", "0-6M", "6-12M", "12-18M", "18-24M"]),
    ];

    table
        .into_iter()
        .map(|(cat, sizes)| {
            let sizes = sizes.iter().map(|s| s.to_string()).collect();
            (cat.to_string(), sizes)
        })
        .collect()
}

pub fn default_color_synonyms() -> BTreeMap<String, String> {
    [
        ("heather dark gray", "Heather Dark Grey"),
        ("heather dark grey", "Heather Dark Grey"),
        ("light pink", "Pink"),
        ("pink", "Pink"),
        ("sand", "Sand"),
        ("sand/natural", "Sand"),
        ("sand / natural", "Sand"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rank_known_and_unknown() {
        let tax = Taxonomy::default();
        assert_eq!(tax.size_rank("Short Sleeve", "XS"), 0);
        assert_eq!(tax.size_rank("Short Sleeve", "xl"), 4);
        assert_eq!(tax.size_rank("Short Sleeve", "9XL"), UNKNOWN_SIZE_RANK);
        assert_eq!(tax.size_rank("Baby", "6-12m"), 2);
        assert_eq!(tax.size_rank("Adult Tee", "M"), UNKNOWN_SIZE_RANK);
    }

    #[test]
    fn test_new_normalizes_keys() {
        let mut orders = BTreeMap::new();
        orders.insert("Scrubs".to_string(), vec![" s".to_string(), "m ".to_string()]);
        let mut colors = BTreeMap::new();
        colors.insert("  Navy Blue ".to_string(), "Navy".to_string());

        let tax = Taxonomy::new(orders, colors);
        assert_eq!(tax.size_order("Scrubs"), Some(&["S".to_string(), "M".to_string()][..]));
        assert_eq!(tax.color_synonym("navy blue"), Some("Navy"));
        assert_eq!(tax.size_order("Hoodie"), None);
    }
}
