//! Mudscope CLI - well-log gas chromatography intelligence
//!
//! # Usage
//!
//! ```bash
//! # Ingest a LAS file
//! mudscope ingest path/to/well.las
//!
//! # List stored wells and their curves
//! mudscope wells
//! mudscope curves "DISCOVERY 12-3"
//!
//! # Statistics over a depth window
//! mudscope stats "DISCOVERY 12-3" --curves HC1,TOTAL_GAS --depth-min 8200 --depth-max 8600
//!
//! # Interpretation (generative backend when configured, deterministic otherwise)
//! mudscope interpret "DISCOVERY 12-3" --curves HC1,HC4 --depth-min 8200 --depth-max 8600
//!
//! # Ask a question about the data
//! mudscope ask "DISCOVERY 12-3" "where does total gas peak?" --detail-level 4
//! ```
//!
//! # Environment Variables
//!
//! - `MUDSCOPE_CONFIG`: Path to a TOML config file
//! - `GROQ_API_KEY` / `OPENAI_API_KEY`: Generative backend credentials
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mudscope::analytics::curve_statistics;
use mudscope::backend::{select_provider, GenerativeBackend, OpenAiCompatBackend};
use mudscope::config::AppConfig;
use mudscope::pipeline::{
    ingest_bytes, run_chat, run_interpretation, ChatRequest, InterpretationRequest,
};
use mudscope::storage::{SledWellStore, WellStore};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mudscope")]
#[command(about = "Well-log gas chromatography ingestion and interpretation")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest a LAS file, replacing any existing well of the same name
    Ingest {
        /// Path to the .las file
        file: PathBuf,
    },
    /// List stored wells
    Wells,
    /// List the curves of a stored well
    Curves {
        /// Well name as parsed from the LAS header
        well: String,
    },
    /// Per-curve statistics over a depth window
    Stats {
        well: String,
        /// Comma-separated curve mnemonics
        #[arg(long, value_delimiter = ',')]
        curves: Vec<String>,
        #[arg(long)]
        depth_min: Option<f64>,
        #[arg(long)]
        depth_max: Option<f64>,
    },
    /// Interpret selected curves over a depth interval
    Interpret {
        well: String,
        #[arg(long, value_delimiter = ',')]
        curves: Vec<String>,
        #[arg(long)]
        depth_min: f64,
        #[arg(long)]
        depth_max: f64,
    },
    /// Ask a question about a well's data
    Ask {
        well: String,
        message: String,
        /// Restrict the analysis scope to these curves
        #[arg(long, value_delimiter = ',')]
        curves: Vec<String>,
        #[arg(long)]
        depth_min: Option<f64>,
        #[arg(long)]
        depth_max: Option<f64>,
        /// Response detail, 1 (terse) to 5 (exhaustive)
        #[arg(long, default_value = "3")]
        detail_level: u8,
    },
    /// Delete a stored well
    Delete {
        well: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let config = AppConfig::load();

    let store = SledWellStore::open(&config.storage.data_dir)
        .with_context(|| format!("opening well store at {}", config.storage.data_dir.display()))?;

    let backend = match select_provider(
        config.backend.groq_api_key.as_deref(),
        config.backend.openai_api_key.as_deref(),
    ) {
        Some(profile) => {
            info!(provider = profile.name, model = profile.model, "generative backend online");
            Some(OpenAiCompatBackend::new(profile).context("building backend client")?)
        }
        None => {
            info!("no usable API key configured — interpretation falls back to deterministic mode");
            None
        }
    };
    let backend_ref: Option<&dyn GenerativeBackend> =
        backend.as_ref().map(|b| b as &dyn GenerativeBackend);

    match args.command {
        Command::Ingest { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.display().to_string());
            let report =
                ingest_bytes(&store, &file_name, &bytes, config.ingest.max_file_bytes)?;
            println!("{}", serde_json::to_string_pretty(&report.well)?);
            if report.replaced {
                println!("(replaced a previously stored well of the same name)");
            }
        }
        Command::Wells => {
            let wells = store.list_wells()?;
            println!("{}", serde_json::to_string_pretty(&wells)?);
        }
        Command::Curves { well } => {
            let record = store
                .find_by_name(&well)?
                .with_context(|| format!("well not found: {well}"))?;
            let curves = store.curves(record.id)?;
            println!("{}", serde_json::to_string_pretty(&curves)?);
        }
        Command::Stats {
            well,
            curves,
            depth_min,
            depth_max,
        } => {
            let record = store
                .find_by_name(&well)?
                .with_context(|| format!("well not found: {well}"))?;
            let curves = if curves.is_empty() {
                store
                    .curves(record.id)?
                    .into_iter()
                    .map(|c| c.mnemonic)
                    .collect()
            } else {
                curves
            };
            let rows = store.query_samples(record.id, &curves, depth_min, depth_max)?;
            let stats = curve_statistics(&rows, &curves);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Interpret {
            well,
            curves,
            depth_min,
            depth_max,
        } => {
            let outcome = run_interpretation(
                &store,
                backend_ref,
                InterpretationRequest {
                    well_name: &well,
                    curves: &curves,
                    depth_min,
                    depth_max,
                },
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Ask {
            well,
            message,
            curves,
            depth_min,
            depth_max,
            detail_level,
        } => {
            let outcome = run_chat(
                &store,
                backend_ref,
                ChatRequest {
                    well_name: &well,
                    message: &message,
                    history: &[],
                    requested_curves: &curves,
                    depth_min,
                    depth_max,
                    detail_level,
                },
            )
            .await?;
            println!("{}", outcome.reply);
        }
        Command::Delete { well } => {
            let record = store
                .find_by_name(&well)?
                .with_context(|| format!("well not found: {well}"))?;
            store.delete_well(record.id)?;
            println!("deleted well '{well}'");
        }
    }

    Ok(())
}
