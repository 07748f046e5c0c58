// src/pipeline.rs

use crate::extract::{DocumentContent, SourceDocument, TextExtractor};
use crate::orders::{self, Aggregate, AggregateRecord, RawItem, Taxonomy};
use crate::report::{PivotTable, build_pivots};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// How text extraction went for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum Extraction {
    Text,
    Scanned,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub name: String,
    pub fingerprint: Option<String>,
    pub extraction: Extraction,
    pub items: usize,
    pub quantity: u64,
}

/// Everything produced from one batch of uploaded documents.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub aggregate: Aggregate,
    pub documents: Vec<DocumentSummary>,
}

impl BatchReport {
    /// True when no document in the batch produced a single order item.
    pub fn is_empty(&self) -> bool {
        self.aggregate.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.documents.iter().map(|d| d.items).sum()
    }
}

/// Text → items → aggregate, against a fixed taxonomy.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    taxonomy: Taxonomy,
}

impl Pipeline {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn parse_document(&self, text: &str) -> Vec<RawItem> {
        orders::parse_document(text)
    }

    pub fn normalize(&self, item: &RawItem) -> AggregateRecord {
        orders::normalize(item, &self.taxonomy)
    }

    /// Parse and normalize every item in `text`.
    pub fn process_text(&self, text: &str) -> Vec<AggregateRecord> {
        self.parse_document(text)
            .iter()
            .map(|item| self.normalize(item))
            .collect()
    }

    pub fn build_pivots(&self, aggregate: &Aggregate) -> BTreeMap<String, PivotTable> {
        build_pivots(aggregate, &self.taxonomy)
    }

    /// Extract, parse and aggregate one document. Extraction failures give
    /// an empty aggregate rather than an error.
    pub fn process_document(
        &self,
        doc: &SourceDocument,
        extractor: &dyn TextExtractor,
    ) -> (Aggregate, DocumentSummary) {
        let fingerprint = doc.fingerprint();
        let span = tracing::info_span!("document", name = %doc.name, fp = %fingerprint);
        let _guard = span.enter();

        let content = extractor.extract_text(&doc.bytes);
        let extraction = match &content {
            DocumentContent::Text(_) => Extraction::Text,
            DocumentContent::ScannedImage => {
                warn!("Document is scanned / image-only, no items extracted");
                Extraction::Scanned
            }
            DocumentContent::Error(e) => {
                tracing::error!(error = %e, "Failed to extract document text");
                Extraction::Failed(e.clone())
            }
        };

        let records = self.process_text(&content.into_text());
        for record in &records {
            debug!(
                size = %record.size_label,
                color = %record.color,
                qty = record.quantity,
                "Order item"
            );
        }

        let items = records.len();
        let aggregate = orders::aggregate(records);
        let quantity = aggregate.total_quantity();
        if items == 0 && extraction == Extraction::Text {
            info!("No order items matched in document text");
        } else {
            info!(items, quantity, keys = aggregate.len(), "Document processed");
        }

        let summary = DocumentSummary {
            name: doc.name.clone(),
            fingerprint: Some(fingerprint),
            extraction,
            items,
            quantity,
        };
        (aggregate, summary)
    }

    /// Process documents one after another and merge their aggregates.
    pub fn process_batch<I>(&self, docs: I, extractor: &dyn TextExtractor) -> BatchReport
    where
        I: IntoIterator<Item = SourceDocument>,
    {
        let mut report = BatchReport::default();
        for doc in docs {
            let (aggregate, summary) = self.process_document(&doc, extractor);
            report.aggregate.merge(aggregate);
            report.documents.push(summary);
        }
        log_batch(&report);
        report
    }

    /// Like [`Pipeline::process_batch`], reading each path from disk first.
    /// Unreadable files are recorded as failed documents.
    pub fn process_files<P>(&self, paths: &[P], extractor: &dyn TextExtractor) -> BatchReport
    where
        P: AsRef<Path>,
    {
        let mut report = BatchReport::default();
        for path in paths {
            let path = path.as_ref();
            match SourceDocument::read(path) {
                Ok(doc) => {
                    let (aggregate, summary) = self.process_document(&doc, extractor);
                    report.aggregate.merge(aggregate);
                    report.documents.push(summary);
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to read document");
                    report.documents.push(DocumentSummary {
                        name: path.display().to_string(),
                        fingerprint: None,
                        extraction: Extraction::Failed(e.to_string()),
                        items: 0,
                        quantity: 0,
                    });
                }
            }
        }
        log_batch(&report);
        report
    }
}

fn log_batch(report: &BatchReport) {
    info!(
        documents = report.documents.len(),
        items = report.item_count(),
        keys = report.aggregate.len(),
        quantity = report.aggregate.total_quantity(),
        "Batch complete"
    );
}
