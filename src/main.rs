mod config;
mod matcher;
mod record;
mod vector_ops;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;

use crate::config::{Number, State};
use crate::record::load_snapshot;

#[derive(Parser)]
#[command(name = "linkmatch")]
#[command(version = "0.1")]
#[command(about = "Nearest-neighbor matcher for link summary embeddings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a query embedding from stdin and print the nearest record ids
    Search,
    /// List the records in the snapshot and whether their vectors parse
    List,
    /// Print the resolved configuration
    Config,
}

/// The matcher's contract assumes a well-formed query; enforce that here,
/// at the boundary, so a bad query is an error rather than a silent empty
/// result.
fn read_query_vector(state: &State) -> Result<Vec<Number>> {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read query vector from stdin")?;

    let query: Vec<Number> = serde_json::from_str(input.trim())
        .context("Query must be a JSON array of numbers")?;

    if query.is_empty() {
        anyhow::bail!("Query vector must not be empty.");
    }
    if let Some(index) = query.iter().position(|x| !x.is_finite()) {
        anyhow::bail!("Query vector has a non-finite element at index {}.", index);
    }
    if let Some(dimensions) = state.dimensions {
        if query.len() != dimensions {
            anyhow::bail!(
                "Query dimension mismatch: expected {}, got {}",
                dimensions,
                query.len()
            );
        }
    }

    Ok(query)
}

fn snapshot_path(state: &State) -> Result<&str> {
    state
        .path
        .as_deref()
        .context("LINKMATCH_PATH not set in config or environment")
}

fn search_command(state: &State) -> Result<()> {
    config::verbose_print("Starting search");
    let query = read_query_vector(state)?;
    let records = load_snapshot(snapshot_path(state)?)?;

    let ids = matcher::top_k_ids(&query, &records, state.top_k);
    config::verbose_print(&format!(
        "Search completed. Found {} matches across {} records",
        ids.len(),
        records.len()
    ));

    // Join the ids back to their records for display; the matcher itself
    // never reads the display fields.
    let matches: Vec<_> = ids
        .iter()
        .map(|id| {
            let url = records
                .iter()
                .find(|r| &r.id == id)
                .and_then(|r| r.url.as_deref());
            serde_json::json!({ "id": id, "url": url })
        })
        .collect();

    let output = serde_json::json!({
        "matches": matches,
        "snapshot_record_count": records.len(),
        "actual_results_count": matches.len(),
        "requested_results_count": state.top_k,
    });

    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}

fn list_command(state: &State) -> Result<()> {
    let records = load_snapshot(snapshot_path(state)?)?;
    for record in &records {
        let status = match record.parse_vector() {
            Some(vector) => format!("vector[{}]", vector.len()),
            None => "no-vector".to_string(),
        };
        println!("{}\t{}", record.id, status);
    }
    Ok(())
}

fn config_command(state: &State) -> Result<()> {
    state.print_config();
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let state = State::new()?;

    match args.command {
        Commands::Search => search_command(&state)?,
        Commands::List => list_command(&state)?,
        Commands::Config => config_command(&state)?,
    }
    Ok(())
}
