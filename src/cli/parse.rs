//! CLI parse: clap types for skinrun. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Skinrun CLI - run every configured report against its skin
#[derive(Parser, Debug)]
#[command(name = "skinrun")]
#[command(about = "Generate reports from layered skin configuration")]
pub struct Cli {
    /// Global configuration file
    #[arg(required_unless_present = "list_generators")]
    pub config: Option<PathBuf>,

    /// Unix time the reports should be current for (default: most recent data)
    #[arg(allow_negative_numbers = true)]
    pub timestamp: Option<i64>,

    /// Not the first run of this process: skip every singleton_list
    #[arg(long)]
    pub skip_singletons: bool,

    /// Resolve every report and print what would run, without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the registered generator identifiers and exit
    #[arg(long)]
    pub list_generators: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
