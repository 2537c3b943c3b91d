//! PowerDash Medical CLI entry point.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use powerdash_medical::adapters::ai::{OpenAIConfig, OpenAIProvider};
use powerdash_medical::adapters::document::paginated_export_service;
use powerdash_medical::application::{
    DraftDocumentCommand, DraftDocumentHandler, ExportDocumentHandler,
};
use powerdash_medical::config::{AppConfig, LogFormat, LoggingConfig};
use powerdash_medical::domain::tools::all_tools;

#[derive(Debug, Parser)]
#[command(name = "powerdash-medical", version, about = "Safety-gated drafting for Medical Affairs briefs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the drafting tools
    Tools,

    /// Run the content classifier over text without drafting
    Classify {
        /// Text to classify (reads stdin when neither this nor --file is given)
        text: Option<String>,

        /// Read the text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Draft a document with one tool
    Draft {
        /// Tool name or slug, e.g. scientific-narrative-generator
        #[arg(long)]
        tool: String,

        /// Form field value, repeatable, in form order
        #[arg(long = "field", required = true)]
        fields: Vec<String>,

        /// Model override
        #[arg(long)]
        model: Option<String>,

        /// Temperature override, clamped into [0, 1]
        #[arg(long)]
        temperature: Option<f32>,

        /// Directory for the exported files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Tools => list_tools(),
        Commands::Classify { text, file } => classify(&config, text, file),
        Commands::Draft {
            tool,
            fields,
            model,
            temperature,
            out_dir,
        } => {
            let mut cmd = DraftDocumentCommand::new(tool, fields);
            cmd.model = model;
            cmd.temperature = temperature;
            draft(&config, cmd, out_dir).await
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn list_tools() -> Result<()> {
    for tool in all_tools() {
        println!(
            "{:<34} {:<34} {}",
            tool.name(),
            tool.slug(),
            tool.group().unwrap_or("-")
        );
    }
    Ok(())
}

fn classify(config: &AppConfig, text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let classifier = config.safety.build_classifier()?;
    let verdict = classifier.classify(&text);
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}

async fn draft(config: &AppConfig, cmd: DraftDocumentCommand, out_dir: PathBuf) -> Result<()> {
    let provider = OpenAIProvider::new(OpenAIConfig::from(&config.ai))?;
    let handler = DraftDocumentHandler::from_config(config, Arc::new(provider))?;

    let outcome = handler.handle(cmd).await;
    println!("{}", serde_json::to_string_pretty(&outcome.result)?);

    let Some(tool) = outcome.tool.filter(|_| outcome.result.is_success()) else {
        return Ok(());
    };

    let exporter =
        ExportDocumentHandler::new(paginated_export_service(config.export.page_geometry()));
    let bundle = exporter.handle(&tool, &outcome.result)?;
    for path in bundle
        .write_to(&out_dir)
        .with_context(|| format!("failed to write exports to {}", out_dir.display()))?
    {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
