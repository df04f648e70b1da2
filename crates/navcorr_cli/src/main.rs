//! Command-line preview for paragraph documents.
//!
//! # Responsibility
//! - Load a JSON paragraph document and an optional TOML engine config.
//! - Print citations with indentation, or structure warnings.
//! - Exit non-zero when the block policy refuses the document.

use clap::{Parser, Subcommand};
use log::info;
use navcorr_core::{
    default_log_level, init_logging, EngineConfig, FontConvention, FormattingEngine,
    ParagraphDocument, ParagraphLayout,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "navcorr", version, about = "Naval correspondence paragraph formatter")]
struct Cli {
    /// Engine config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the numbered, indented body.
    Layout {
        document: PathBuf,
        /// Emit the primed layout as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Report sibling-pairing violations.
    Check { document: PathBuf },
    /// Print the engine version.
    Version,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("navcorr: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir)?;
    }
    let config = match cli.config.as_deref() {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let engine = FormattingEngine::new(config);

    match cli.command {
        Command::Layout { document, json } => {
            let document = load_document(&document)?;
            let layout = engine.layout(document.paragraphs());
            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                for entry in &layout {
                    println!("{}", render_line(entry, config.font));
                }
            }
            report(&engine, &document)
        }
        Command::Check { document } => {
            let document = load_document(&document)?;
            report(&engine, &document)
        }
        Command::Version => {
            println!("navcorr_core version={}", navcorr_core::engine_version());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_document(path: &Path) -> Result<ParagraphDocument, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read document `{}`: {err}", path.display()))?;
    let document: ParagraphDocument = serde_json::from_str(&text)?;
    info!(
        "event=document_load module=cli status=ok paragraphs={}",
        document.len()
    );
    Ok(document)
}

fn report(
    engine: &FormattingEngine,
    document: &ParagraphDocument,
) -> Result<ExitCode, Box<dyn Error>> {
    let report = engine.validate(document.paragraphs());
    for violation in &report.violations {
        eprintln!("warning: {violation}");
    }
    report.into_result()?;
    Ok(ExitCode::SUCCESS)
}

// Why: a terminal only has character cells. Fixed-width units already are
// cells; a proportional stop (4 units) is drawn as 2 cells so deep levels
// still fit an 80-column preview.
fn render_line(entry: &ParagraphLayout, font: FontConvention) -> String {
    let indent = match font {
        FontConvention::FixedWidth => entry.geometry.citation_offset,
        FontConvention::Proportional => entry.geometry.citation_offset / 2,
    } as usize;
    let core = if entry.citation.is_underlined() {
        format!("_{}_", entry.citation.core)
    } else {
        entry.citation.core.clone()
    };
    let mut line = format!(
        "{:indent$}{}{}{}  ",
        "",
        entry.citation.prefix,
        core,
        entry.citation.suffix
    );
    if let Some(title) = entry.title.as_deref() {
        line.push_str(title);
        line.push_str(".  ");
    }
    line.push_str(entry.content.trim());
    line.trim_end().to_string()
}
