//! The flat aggregate as CSV: `Normalized Size,Shirt Color,Quantity`.
//!
//! A written CSV can be read back into an [`Aggregate`] so reports can be
//! re-rendered later without the source documents.

use super::ExportError;
use crate::orders::{Aggregate, AggregateRecord};

pub const HEADERS: [&str; 3] = ["Normalized Size", "Shirt Color", "Quantity"];

pub fn write_csv(aggregate: &Aggregate) -> Result<Vec<u8>, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(HEADERS)?;
    for record in aggregate.records() {
        let quantity = record.quantity.to_string();
        wtr.write_record([
            record.size_label.as_str(),
            record.color.as_str(),
            quantity.as_str(),
        ])?;
    }

    wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// Parse a CSV produced by [`write_csv`]. Quantities that are not whole
/// numbers count as 0; rows for the same key are summed.
pub fn read_csv(data: &[u8]) -> Result<Aggregate, ExportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = rdr.headers()?.clone();
    if headers.iter().ne(HEADERS) {
        return Err(ExportError::BadRow {
            row: 1,
            reason: format!("expected header {:?}, found {:?}", HEADERS, headers),
        });
    }

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let line = i + 2;
        if row.len() < HEADERS.len() {
            return Err(ExportError::BadRow {
                row: line,
                reason: format!("expected {} fields, found {}", HEADERS.len(), row.len()),
            });
        }
        records.push(AggregateRecord {
            size_label: row[0].to_string(),
            color: row[1].to_string(),
            quantity: row[2].parse().unwrap_or(0),
        });
    }

    Ok(Aggregate::from_records(records))
}
