use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dnshound",
    about = "Analyze a Zeek dns.log to surface high-entropy subdomains suggestive of DNS C2",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to the Zeek-format dns.log file to analyze
    pub log: Option<PathBuf>,

    /// Path to a custom safelist file (one domain or query per line)
    #[arg(short, long)]
    pub safelist: Option<PathBuf>,

    /// Disable safelist filtering entirely
    #[arg(long)]
    pub no_safelist: bool,

    /// Number of rows to display per table
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Only show subdomains with at least this entropy score (bits/char)
    #[arg(long)]
    pub min_entropy: Option<f64>,

    /// Emit results as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initialize safelist.txt with the embedded default safelist
    #[arg(long)]
    pub init: bool,
}
