//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// uddgen - FSD to Unified Design Document generator
#[derive(Parser)]
#[command(
    name = "udd",
    about = "Drafts a Unified Design Document from a Functional Specification",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a UDD document from an FSD text file
    Generate {
        /// Path to the FSD plain text file
        #[arg(value_name = "FSD-FILE")]
        fsd: PathBuf,

        /// Section definition file (overrides config)
        #[arg(short, long)]
        sections: Option<PathBuf>,

        /// UDD-to-FSD mapping file (overrides config)
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Document title
        #[arg(short, long)]
        title: Option<String>,

        /// Output path for the .docx
        #[arg(short, long, default_value = "UDD.docx")]
        out: PathBuf,
    },

    /// List the configured UDD section definitions
    Sections {
        /// Section definition file (overrides config)
        #[arg(short, long)]
        sections: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show how an FSD file segments into numbered sections
    Segment {
        /// Path to the FSD plain text file
        #[arg(value_name = "FSD-FILE")]
        fsd: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for inspection commands
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
