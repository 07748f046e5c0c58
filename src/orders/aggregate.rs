use super::AggregateRecord;
use std::collections::BTreeMap;

/// Quantities summed per `(size label, color)`.
///
/// Iteration is in ascending key order, so anything rendered from an
/// aggregate does not depend on document or item order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    totals: BTreeMap<(String, String), u64>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sums saturate at `u64::MAX`.
    pub fn add(&mut self, record: AggregateRecord) {
        let total = self
            .totals
            .entry((record.size_label, record.color))
            .or_insert(0);
        *total = total.saturating_add(record.quantity);
    }

    /// Fold another aggregate into this one. Order of merging never matters.
    pub fn merge(&mut self, other: Aggregate) {
        for ((size_label, color), quantity) in other.totals {
            let total = self.totals.entry((size_label, color)).or_insert(0);
            *total = total.saturating_add(quantity);
        }
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AggregateRecord>,
    {
        let mut agg = Self::new();
        for record in records {
            agg.add(record);
        }
        agg
    }

    pub fn quantity(&self, size_label: &str, color: &str) -> Option<u64> {
        self.totals
            .get(&(size_label.to_string(), color.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.totals
            .values()
            .fold(0u64, |acc, &q| acc.saturating_add(q))
    }

    /// One record per key, in key order.
    pub fn records(&self) -> impl Iterator<Item = AggregateRecord> + '_ {
        self.totals
            .iter()
            .map(|((size_label, color), &quantity)| AggregateRecord {
                size_label: size_label.clone(),
                color: color.clone(),
                quantity,
            })
    }
}

/// Group normalized records by `(size label, color)` and sum quantities.
pub fn aggregate<I>(records: I) -> Aggregate
where
    I: IntoIterator<Item = AggregateRecord>,
{
    Aggregate::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(size_label: &str, color: &str, quantity: u64) -> AggregateRecord {
        AggregateRecord {
            size_label: size_label.to_string(),
            color: color.to_string(),
            quantity,
        }
    }

    fn doc_a() -> Vec<AggregateRecord> {
        vec![rec("Hoodie - L", "Pink", 2), rec("Youth - M", "Navy", 1)]
    }

    fn doc_b() -> Vec<AggregateRecord> {
        vec![rec("Hoodie - L", "Pink", 1), rec("Baby - NB", "White", 0)]
    }

    fn doc_c() -> Vec<AggregateRecord> {
        vec![rec("Youth - M", "Navy", 4), rec("Adult Tee - L", "Red", 3)]
    }

    #[test]
    fn test_sums_duplicate_keys() {
        let agg = aggregate(doc_a().into_iter().chain(doc_b()));
        assert_eq!(agg.len(), 3);
        assert_eq!(agg.quantity("Hoodie - L", "Pink"), Some(3));
        assert_eq!(agg.quantity("Baby - NB", "White"), Some(0));
        assert_eq!(agg.quantity("Hoodie - L", "Navy"), None);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let all: Vec<_> = doc_a().into_iter().chain(doc_b()).chain(doc_c()).collect();
        let at_once = aggregate(all.clone());

        let mut staged = aggregate(doc_a().into_iter().chain(doc_b()));
        staged.merge(aggregate(doc_c()));
        assert_eq!(staged, at_once);

        let mut reversed = aggregate(doc_c());
        reversed.merge(aggregate(doc_b()));
        reversed.merge(aggregate(doc_a()));
        assert_eq!(reversed, at_once);

        let shuffled = aggregate(all.into_iter().rev());
        assert_eq!(shuffled, at_once);
    }

    #[test]
    fn test_total_is_conserved() {
        let all: Vec<_> = doc_a().into_iter().chain(doc_b()).chain(doc_c()).collect();
        let expected: u64 = all.iter().map(|r| r.quantity).sum();
        assert_eq!(aggregate(all).total_quantity(), expected);
    }

    #[test]
    fn test_records_in_key_order() {
        let agg = aggregate(doc_c().into_iter().chain(doc_a()));
        let keys: Vec<_> = agg
            .records()
            .map(|r| (r.size_label, r.color))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Adult Tee - L".to_string(), "Red".to_string()),
                ("Hoodie - L".to_string(), "Pink".to_string()),
                ("Youth - M".to_string(), "Navy".to_string()),
            ]
        );
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let agg = aggregate(vec![
            rec("Hoodie - L", "Red", u64::MAX),
            rec("Hoodie - L", "Red", 1),
            rec("Hoodie - S", "Red", 5),
        ]);
        assert_eq!(agg.quantity("Hoodie - L", "Red"), Some(u64::MAX));
        assert_eq!(agg.total_quantity(), u64::MAX);

        let mut merged = aggregate(vec![rec("Hoodie - L", "Red", u64::MAX)]);
        merged.merge(aggregate(vec![rec("Hoodie - L", "Red", 7)]));
        assert_eq!(merged.quantity("Hoodie - L", "Red"), Some(u64::MAX));
    }

    #[test]
    fn test_empty() {
        let agg = aggregate(Vec::new());
        assert!(agg.is_empty());
        assert_eq!(agg.total_quantity(), 0);
    }
}
