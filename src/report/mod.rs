// src/report/mod.rs

pub mod csv_export;
pub mod docx;
mod pivot;
pub mod text;

pub use pivot::{PivotTable, build_pivots};

use std::collections::BTreeMap;

/// One category's table, already ordered and formatted as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    pub category: String,
    /// `"Color"` followed by the size columns.
    pub headers: Vec<String>,
    /// One row per color: the color name, then one quantity per size column.
    pub rows: Vec<Vec<String>>,
}

impl CategoryTable {
    pub fn banner(&self) -> String {
        format!("Category: {}", self.category)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSV row {row}: {reason}")]
    BadRow { row: usize, reason: String },
}

/// Renders an ordered list of category tables into a finished artifact.
pub trait TableRenderer {
    fn render(&self, tables: &[CategoryTable]) -> Result<Vec<u8>, ExportError>;
}

/// Category tables in presentation (alphabetical) order.
pub fn category_tables(pivots: &BTreeMap<String, PivotTable>) -> Vec<CategoryTable> {
    pivots.values().map(PivotTable::to_category_table).collect()
}
