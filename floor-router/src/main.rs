//! Floor Router CLI
//!
//! # Usage
//!
//! ```bash
//! floor-router import floor.json
//! floor-router predict predictions.json
//! floor-router route party.json
//! floor-router commit party.json --table C2 --waiter WC2 --expected-version 7
//! floor-router seat party.json
//! floor-router show
//! ```
//!
//! Answers are JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use floor_router::{FloorManager, setup_environment};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{CommitResponse, FloorSnapshot, PartyRequest, PredictionPayload, RoutingOption};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Restaurant table / waiter routing
#[derive(Parser)]
#[command(name = "floor-router")]
#[command(about = "Route waiting parties to tables and waiters")]
#[command(version)]
struct Cli {
    /// redb database file (overrides FLOOR_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the floor document
    Import {
        /// Floor snapshot JSON (tables, waiters, cleaners, hosts)
        file: PathBuf,
    },

    /// Merge classifier predictions into the floor
    Predict {
        /// Prediction payload JSON
        file: PathBuf,
    },

    /// Rank options for a party without committing
    Route {
        /// Party request JSON
        file: PathBuf,
    },

    /// Commit a chosen table and waiter for a party
    Commit {
        /// Party request JSON
        file: PathBuf,

        #[arg(long)]
        table: String,

        #[arg(long)]
        waiter: String,

        /// Reject the commit if the floor changed since this version
        #[arg(long)]
        expected_version: Option<u64>,
    },

    /// Route and commit the best option that still applies
    Seat {
        /// Party request JSON
        file: PathBuf,
    },

    /// Print the floor document and assignment log
    Show,
}

#[derive(Serialize)]
struct ShowOutput {
    snapshot: FloorSnapshot,
    assignments: Vec<shared::AssignmentRecord>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = setup_environment()?;
    if let Some(db) = cli.db {
        if let Some(parent) = db.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        config.db_path = db;
    }

    tracing::debug!(db = %config.db_path.display(), "Opening floor database");
    let manager = FloorManager::new(&config.db_path, config.routing.clone())
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?;

    match cli.command {
        Commands::Import { file } => {
            let snapshot: FloorSnapshot = read_json(&file)?;
            let version = manager.replace_snapshot(snapshot)?;
            print_json(&serde_json::json!({ "version": version }))?;
        }
        Commands::Predict { file } => {
            let payload: PredictionPayload = read_json(&file)?;
            let report = manager.apply_predictions(&payload)?;
            print_json(&report)?;
        }
        Commands::Route { file } => {
            let request: PartyRequest = read_json(&file)?;
            print_json(&manager.route(&request)?)?;
        }
        Commands::Commit {
            file,
            table,
            waiter,
            expected_version,
        } => {
            let request: PartyRequest = read_json(&file)?;
            let option = pick_option(&manager, &request, &table, &waiter)?;
            let response = manager.execute_commit(&request, &option, expected_version);
            return finish(response);
        }
        Commands::Seat { file } => {
            let request: PartyRequest = read_json(&file)?;
            let response = match manager.seat(&request) {
                Ok(record) => CommitResponse::success(record),
                Err(e) => CommitResponse::error(request.group_id.clone(), e.into()),
            };
            return finish(response);
        }
        Commands::Show => {
            print_json(&ShowOutput {
                snapshot: manager.snapshot()?,
                assignments: manager.assignments()?,
            })?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// The routed option for this pair, or a host override scored 0 when the
/// pair is not among the routed options
fn pick_option(
    manager: &FloorManager,
    request: &PartyRequest,
    table_id: &str,
    waiter_id: &str,
) -> Result<RoutingOption> {
    let response = manager.route(request)?;
    if let Some(option) = response
        .options
        .into_iter()
        .find(|o| o.table_id == table_id && o.waiter_id == waiter_id)
    {
        return Ok(option);
    }

    tracing::info!(table_id, waiter_id, "Pair not among routed options, committing as override");
    let snapshot = manager.snapshot()?;
    let table = snapshot.table(table_id);
    Ok(RoutingOption {
        rank: 0,
        table_id: table_id.to_string(),
        waiter_id: waiter_id.to_string(),
        score: 0.0,
        section: table.map(|t| t.section.clone()).unwrap_or_default(),
        capacity: table.map(|t| t.capacity).unwrap_or_default(),
        table_fit: 0.0,
        waiter_priority: 0.0,
        bracket: None,
    })
}

fn finish(response: CommitResponse) -> Result<ExitCode> {
    print_json(&response)?;
    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
