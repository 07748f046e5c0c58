// src/extract.rs

use lopdf::Document as PdfDocument;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{info, warn};

/// Result of attempting to pull text out of a document.
#[derive(Debug)]
pub enum DocumentContent {
    /// The document contains extractable text.
    Text(String),
    /// The PDF appears to be scanned / image-only. No OCR is attempted.
    ScannedImage,
    /// The bytes could not be read as a document.
    Error(String),
}

impl DocumentContent {
    /// The extracted text, or an empty string for any failure.
    pub fn into_text(self) -> String {
        match self {
            DocumentContent::Text(text) => text,
            DocumentContent::ScannedImage | DocumentContent::Error(_) => String::new(),
        }
    }
}

/// Turns raw document bytes into text.
pub trait TextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> DocumentContent;
}

/// An uploaded order form.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self::new(path.display().to_string(), bytes))
    }

    /// Short content hash, stable across renames.
    pub fn fingerprint(&self) -> String {
        let digest = format!("{:x}", Sha256::digest(&self.bytes));
        digest[..12].to_string()
    }
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

/// Extracts the text layer of a PDF with `pdf-extract`, after a structural
/// check with `lopdf` for image-only pages. Any non-blank text layer is
/// returned as is, however short.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> DocumentContent {
        // image-only pages first, then the text layer
        let doc = match PdfDocument::load_mem(bytes) {
            Ok(d) => d,
            Err(e) => return DocumentContent::Error(format!("Failed to parse PDF: {e}")),
        };

        if looks_like_scanned(&doc) {
            info!("Order form has image-only pages, skipping text layer");
            return DocumentContent::ScannedImage;
        }

        // pdf-extract panics on some malformed font tables
        let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
        match extracted {
            Ok(Ok(text)) => {
                let meaningful = text.chars().filter(|c| !c.is_whitespace()).count();
                if meaningful == 0 {
                    info!("PDF has no text layer, treating as scanned");
                    DocumentContent::ScannedImage
                } else {
                    info!(chars = meaningful, "Text extracted successfully");
                    DocumentContent::Text(text)
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "pdf-extract failed, may be scanned or corrupted");
                DocumentContent::Error(format!("Text extraction failed: {e}"))
            }
            Err(_) => {
                warn!("pdf-extract panicked");
                DocumentContent::Error("Text extraction panicked".to_string())
            }
        }
    }
}

/// Heuristic: a page that has XObject images but **no** Font resources is
/// almost certainly a scan. If ≥80% of pages look like that, the whole
/// document is treated as scanned.
fn looks_like_scanned(doc: &PdfDocument) -> bool {
    let pages = doc.get_pages();
    if pages.is_empty() {
        return false; // Can't tell, let text extraction try
    }

    let image_only_pages = pages
        .values()
        .filter(|&&object_id| {
            let Some(page_dict) = doc
                .get_object(object_id)
                .ok()
                .and_then(|obj| obj.as_dict().ok())
            else {
                return false;
            };
            let has_fonts = has_resource(doc, page_dict, b"Font");
            let has_images = has_resource(doc, page_dict, b"XObject");
            has_images && !has_fonts
        })
        .count();

    let total = pages.len();
    let ratio = image_only_pages as f64 / total as f64;
    info!(
        total_pages = total,
        image_only = image_only_pages,
        ratio = format!("{ratio:.2}"),
        "Scanned-page analysis"
    );

    ratio >= 0.8
}

/// Whether the page's `Resources` dictionary has a non-empty `key` entry.
fn has_resource(doc: &PdfDocument, page_dict: &lopdf::Dictionary, key: &[u8]) -> bool {
    page_dict
        .get(b"Resources")
        .ok()
        .and_then(|r| doc.dereference(r).ok())
        .and_then(|(_, resolved)| resolved.as_dict().ok())
        .and_then(|res| res.get(key).ok())
        .and_then(|x| doc.dereference(x).ok())
        .and_then(|(_, resolved)| resolved.as_dict().ok())
        .is_some_and(|entries| !entries.is_empty())
}

// ---------------------------------------------------------------------------
// Plain text
// ---------------------------------------------------------------------------

/// Treats the document bytes as already-extracted UTF-8 text.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> DocumentContent {
        match std::str::from_utf8(bytes) {
            Ok(text) => DocumentContent::Text(text.to_string()),
            Err(e) => DocumentContent::Error(format!("Not valid UTF-8 text: {e}")),
        }
    }
}
