use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod output;

use output::ColorMode;

/// Exit code when extraction succeeded but the transcript is too short
/// to be a real CV. Scripts can tell "bad document" from "crash".
const EXIT_UNUSABLE: u8 = 2;

/// CV text extractor - pull transcripts and structured fields from PDF/DOC/DOCX files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract text and parsed fields from a CV document
    Extract {
        /// Path to the PDF, DOC, or DOCX file
        file_path: PathBuf,

        /// Emit the full result as JSON instead of the human summary
        #[arg(long)]
        json: bool,

        /// Also print the full transcript (human output only)
        #[arg(long)]
        full_text: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Load tool configuration from this file instead of the default
        /// lookup (./.cvparse.toml, then the platform config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            file_path,
            json,
            full_text,
            no_color,
            config,
        } => extract(file_path, json, full_text, no_color, config),
    }
}

fn extract(
    file_path: PathBuf,
    json: bool,
    full_text: bool,
    no_color: bool,
    config: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let config_file = match config {
        Some(path) => cvparse_core::load_from_path(&path).ok_or_else(|| {
            anyhow::anyhow!("cannot read config file {}", path.display())
        })?,
        None => cvparse_core::load_config(),
    };
    let tools = cvparse_core::ToolConfig::from_config_file(&config_file);

    let result = cvparse_ingest::extract(&file_path, &tools)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    } else {
        let color = ColorMode(!no_color);
        output::print_result(&mut out, &file_path, &result, full_text, color)?;
    }

    if result.is_usable() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_UNUSABLE))
    }
}
