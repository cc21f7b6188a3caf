//! Legacy configuration checker.
//!
//! # Architecture Overview
//!
//! ```text
//!   snapshot.toml ──▶ config::loader ──▶ SnapshotDocument
//!                                            │ resolve(SelectorRegistry)
//!                                            ▼
//!                                      LegacySnapshot ──▶ audit (skipped entries)
//!                                            │
//!                                            ▼ legacy::translate
//!                                   ClientContextBuilder ──▶ ClientContext summary (JSON)
//!
//!   keys ... ──▶ legacy::contains_legacy_markers ──▶ yes / no
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use legacy_client_config::client::{ClientContextBuilder, ContextSummary};
use legacy_client_config::config::{audit_connections, load_document, SkippedConnection};
use legacy_client_config::legacy::{contains_legacy_markers, translate, LegacyKeySet};
use legacy_client_config::observability::logging;
use legacy_client_config::selector::SelectorRegistry;

#[derive(Parser)]
#[command(name = "legacy-config")]
#[command(about = "Inspect legacy client configuration", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a snapshot document and print the resulting client configuration
    ///
    /// No selector implementations are linked into this tool: configured selector
    /// classes are listed under `unresolved_selectors` and left out of the summary.
    Check {
        /// Path to the snapshot document (TOML)
        file: PathBuf,
    },
    /// Report whether any of the given keys use legacy names
    ///
    /// Exits with status 1 when legacy keys are present and 0 otherwise, so scripts
    /// can branch on the result.
    Scan {
        /// Configuration keys to inspect
        keys: Vec<String>,
    },
}

#[derive(Serialize)]
struct CheckReport {
    unresolved_selectors: Vec<String>,
    skipped_connections: Vec<SkippedConnection>,
    client: ContextSummary,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "legacy-config failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Commands::Check { file } => {
            let mut doc = load_document(&file)?;
            // Selector implementations are provided by the embedding application.
            let registry = SelectorRegistry::new();
            let unresolved_selectors = doc.retain_known_selectors(&registry);
            for class_name in &unresolved_selectors {
                tracing::warn!(class_name = %class_name, "Selector class not registered, left out of the check");
            }
            let snapshot = doc.resolve(&registry);

            let skipped_connections = audit_connections(&snapshot);
            for skipped in &skipped_connections {
                tracing::warn!(index = skipped.index, reason = ?skipped.reason, "Connection entry will be ignored");
            }

            let mut builder = ClientContextBuilder::new();
            translate(&mut builder, Some(&snapshot))?;

            let report = CheckReport {
                unresolved_selectors,
                skipped_connections,
                client: builder.build().summary(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Scan { keys } => {
            let found = contains_legacy_markers(&keys, &LegacyKeySet::default());
            println!("{}", if found { "legacy keys present" } else { "no legacy keys" });
            Ok(if found { ExitCode::from(1) } else { ExitCode::SUCCESS })
        }
    }
}
