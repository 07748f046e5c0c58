mod cli;
mod config;
mod extract;
mod orders;
mod pipeline;
mod report;

use clap::Parser;
use cli::{Cli, Command, NormalizeField};
use extract::{DocumentContent, PdfTextExtractor, PlainTextExtractor, SourceDocument, TextExtractor};
use pipeline::Pipeline;
use report::{TableRenderer, category_tables, csv_export, docx::DocxRenderer, text};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const PREVIEW_CHARS: usize = 2000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // init tracing; stdout is reserved for the report itself
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cfg = config::Config::load_or_default(cli.config.as_deref())?;
    let pipeline = Pipeline::new(cfg.taxonomy());

    match cli.command {
        Command::Report {
            inputs,
            csv,
            docx,
            json,
            plain_text,
        } => {
            let extractor = extractor_for(plain_text);
            let report = pipeline.process_files(&inputs, extractor.as_ref());

            if json {
                let records: Vec<_> = report.aggregate.records().collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print!("{}", text::aggregate_report(&report.aggregate));
            }

            if report.is_empty() {
                if csv.is_some() || docx.is_some() {
                    warn!("Nothing to export, skipping output files");
                }
                return Ok(());
            }

            if let Some(path) = csv {
                write_output(&path, &csv_export::write_csv(&report.aggregate)?)?;
            }
            if let Some(path) = docx {
                let tables = category_tables(&pipeline.build_pivots(&report.aggregate));
                write_output(&path, &DocxRenderer::new(cfg.docx.clone()).render(&tables)?)?;
            }
        }

        Command::Render { csv, docx } => {
            let aggregate = csv_export::read_csv(&std::fs::read(&csv)?)?;
            info!(
                path = %csv.display(),
                keys = aggregate.len(),
                quantity = aggregate.total_quantity(),
                "Loaded aggregate"
            );
            if aggregate.is_empty() {
                print!("{}", text::aggregate_report(&aggregate));
                return Ok(());
            }

            let tables = category_tables(&pipeline.build_pivots(&aggregate));
            let rendered = text::TextRenderer.render(&tables)?;
            print!("{}", String::from_utf8_lossy(&rendered));

            if let Some(path) = docx {
                write_output(&path, &DocxRenderer::new(cfg.docx.clone()).render(&tables)?)?;
            }
        }

        Command::Inspect { input, plain_text } => {
            let doc = SourceDocument::read(&input)?;
            let extractor = extractor_for(plain_text);
            println!("Document:    {}", doc.name);
            println!("Fingerprint: {}", doc.fingerprint());
            println!("Bytes:       {}", doc.bytes.len());

            let text = match extractor.extract_text(&doc.bytes) {
                DocumentContent::Text(text) => text,
                DocumentContent::ScannedImage => {
                    println!("Extraction:  scanned / image-only, no text layer");
                    return Ok(());
                }
                DocumentContent::Error(e) => {
                    println!("Extraction:  failed ({e})");
                    return Ok(());
                }
            };
            println!("Extraction:  {} chars", text.chars().count());

            let preview: String = text.chars().take(PREVIEW_CHARS).collect();
            println!("\n--- text (first {PREVIEW_CHARS} chars) ---\n{preview}\n---");

            let items = pipeline.parse_document(&text);
            println!("\nRaw items ({}):", items.len());
            for item in &items {
                println!(
                    "  qty={} size={:?} color={:?}",
                    item.quantity, item.size_text, item.color_text
                );
            }

            println!("\nNormalized:");
            for item in &items {
                let record = pipeline.normalize(item);
                println!(
                    "  {} | {} | {}",
                    record.size_label, record.color, record.quantity
                );
            }
        }

        Command::Normalize { field } => match field {
            NormalizeField::Size { text } => {
                if let Some(category) = orders::detect_category(&text) {
                    info!(category = %category, "Matched size rule");
                }
                println!("{}", orders::normalize_size(&text));
            }
            NormalizeField::Color { text } => {
                println!("{}", orders::normalize_color(&text, pipeline.taxonomy()));
            }
        },
    }

    Ok(())
}

fn extractor_for(plain_text: bool) -> Box<dyn TextExtractor> {
    if plain_text {
        Box::new(PlainTextExtractor)
    } else {
        Box::new(PdfTextExtractor)
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "Wrote output");
    Ok(())
}
