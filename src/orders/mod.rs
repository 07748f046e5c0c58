// src/orders/mod.rs

mod aggregate;
mod color;
mod parser;
mod size;
mod taxonomy;

pub use aggregate::{Aggregate, aggregate};
pub use color::normalize_color;
pub use parser::parse_document;
pub use size::{Category, detect_category, has_vneck_keyword, normalize_size};
pub use taxonomy::{Taxonomy, default_color_synonyms, default_size_orders};

use serde::Deserialize;
use serde::Serialize;

/// One order line as it appears in the document text, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub quantity: u64,
    pub size_text: String,
    pub color_text: String,
}

/// A normalized order line, keyed by canonical size label and color.
///
/// Once aggregated, there is exactly one record per `(size_label, color)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub size_label: String,
    pub color: String,
    pub quantity: u64,
}

/// Canonicalize both the size and the color of a raw item.
pub fn normalize(item: &RawItem, taxonomy: &Taxonomy) -> AggregateRecord {
    AggregateRecord {
        size_label: normalize_size(&item.size_text),
        color: normalize_color(&item.color_text, taxonomy),
        quantity: item.quantity,
    }
}
