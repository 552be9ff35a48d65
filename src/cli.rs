//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cataloger_core::{DEFAULT_CONCURRENCY, DEFAULT_EXTENSION};

/// Extract structured catalog records from Project Gutenberg RDF/XML metadata.
///
/// Cataloger reads the per-book RDF documents of the bulk catalog feed and
/// emits one JSON record per book (id, title, authors, subjects, LCC code
/// and downloadable files).
#[derive(Parser, Debug)]
#[command(name = "cataloger")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Read defaults from this config file instead of the XDG location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract records from individual catalog documents (or stdin)
    Extract(ExtractArgs),
    /// Extract every catalog document under a directory as JSON Lines
    Scan(ScanArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// RDF/XML documents to extract; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Print one record per line instead of pretty JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Root of the extracted catalog tree (e.g. data/cache/epub)
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Maximum documents processed concurrently (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Write JSON Lines to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// File extension of catalog documents
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Stop at the first document that fails to extract
    #[arg(long)]
    pub fail_fast: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}
