//! uddgen CLI entry point
//!
//! Loads config, sets up logging and dispatches subcommands.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use uddgen::cli::{Cli, Command, OutputFormat};
use uddgen::config::Config;
use uddgen::fsd;
use uddgen::llm::create_client;
use uddgen::pipeline::{GenerateRequest, generate_document};
use uddgen::sections::load_section_definitions;

fn setup_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, model = %config.llm.model, "loaded config");

    match cli.command {
        Command::Generate {
            fsd,
            sections,
            mapping,
            title,
            out,
        } => cmd_generate(&config, &fsd, sections, mapping, title, &out).await,
        Command::Sections { sections, format } => cmd_sections(&config, sections, format),
        Command::Segment { fsd, format } => cmd_segment(&fsd, format),
    }
}

/// Draft every configured section and write the assembled .docx
async fn cmd_generate(
    config: &Config,
    fsd_path: &Path,
    sections: Option<PathBuf>,
    mapping: Option<PathBuf>,
    title: Option<String>,
    out: &Path,
) -> Result<()> {
    config.validate()?;

    let fsd_text = fs::read_to_string(fsd_path).context(format!("Failed to read FSD file {}", fsd_path.display()))?;

    let llm = create_client(&config.llm)?;

    let mut request = GenerateRequest::new(fsd_text);
    request.sections_path = sections;
    request.mapping_path = mapping;
    request.title = title;

    let bytes = generate_document(config, llm, &request).await?;

    fs::write(out, &bytes).context(format!("Failed to write output file {}", out.display()))?;
    println!("{} wrote {} ({} bytes)", "✓".green(), out.display(), bytes.len());
    Ok(())
}

/// List the configured section definitions
fn cmd_sections(config: &Config, sections_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let path = sections_path.unwrap_or_else(|| config.paths.sections_file.clone());
    let definitions = load_section_definitions(&path)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&definitions)?);
        }
        OutputFormat::Text => {
            for def in &definitions {
                let fields = def
                    .fields
                    .as_ref()
                    .map(|f| format!(" [{}]", f.join(", ")))
                    .unwrap_or_default();
                println!("{} ({}){}", def.name.bold(), def.render_type, fields);
                if !def.description.is_empty() {
                    println!("    {}", def.description);
                }
            }
            println!("{} section definitions", definitions.len());
        }
    }
    Ok(())
}

/// Show the parsed FSD index of a document
fn cmd_segment(fsd_path: &Path, format: OutputFormat) -> Result<()> {
    let fsd_text = fs::read_to_string(fsd_path).context(format!("Failed to read FSD file {}", fsd_path.display()))?;
    // sorted for stable display
    let index: BTreeMap<String, String> = fsd::segment(&fsd_text).into_iter().collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&index)?);
        }
        OutputFormat::Text => {
            if index.is_empty() {
                println!("no SECTION headers found; the whole document would be used as context");
                return Ok(());
            }
            for (number, body) in &index {
                let preview = body.lines().next().unwrap_or("");
                println!("SECTION {} ({} chars): {}", number.bold(), body.len(), preview);
            }
        }
    }
    Ok(())
}
