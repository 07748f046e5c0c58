use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "order_report")]
#[command(about = "Aggregate shirt orders from PDF order forms into size/color reports", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// TOML configuration (taxonomy overrides, DOCX layout)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Process a batch of order documents and print the aggregate.
    Report {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Write the aggregate as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write per-category pivot tables as a Word document
        #[arg(long)]
        docx: Option<PathBuf>,
        /// Print the aggregate records as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Inputs are UTF-8 text rather than PDF
        #[arg(long)]
        plain_text: bool,
    },

    /// Rebuild the pivot tables from a CSV written by `report --csv`.
    Render {
        csv: PathBuf,
        /// Write the pivot tables as a Word document
        #[arg(long)]
        docx: Option<PathBuf>,
    },

    /// Show what one document yields at each stage.
    Inspect {
        input: PathBuf,
        /// Input is UTF-8 text rather than PDF
        #[arg(long)]
        plain_text: bool,
    },

    /// Print the canonical form of a size or color value.
    Normalize {
        #[command(subcommand)]
        field: NormalizeField,
    },
}

#[derive(Subcommand)]
pub(crate) enum NormalizeField {
    /// e.g. "Youth - Medium" -> "Youth - M"
    Size { text: String },
    /// e.g. "light pink" -> "Pink"
    Color { text: String },
}
