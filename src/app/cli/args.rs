//! Command line arguments
//!
//! Global logging and configuration flags are accepted before or after the
//! subcommand. Values given here take precedence over the configuration file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "diskscan")]
#[command(about = "Vehicle license disk scanner")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", global = true, value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    /// Force colored output
    #[arg(long = "color", global = true, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Parse one raw payload and print the extracted record
    Parse {
        /// Raw barcode or OCR text; "\n" sequences are read as line breaks
        raw: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan payloads read from standard input, one per line
    Scan {
        /// Business the scans belong to
        #[arg(short = 'b', long = "business", value_name = "ID")]
        business: Option<String>,

        /// Operator recorded as the scanner of each disk
        #[arg(short = 'u', long = "user", value_name = "ID")]
        user: Option<String>,

        /// Operator email shown on duplicate prompts
        #[arg(short = 'e', long = "email", value_name = "EMAIL")]
        email: Option<String>,

        /// Save duplicates without asking
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

impl Args {
    /// Color choice from the flags; `None` when neither was given
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Turn literal `\n` (and `\r\n`) escape sequences into line breaks
pub fn unescape_payload(raw: &str) -> String {
    raw.replace("\\r\\n", "\n").replace("\\n", "\n")
}
