#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive session for the rental map dashboards.
//!
//! Runs the full recomputation pass (load, clean, aggregate, join,
//! centroids, summary metrics) for a selected city and prints the
//! results. Expensive loads are memoized for the lifetime of the
//! session, so switching cities only recomputes the cheap aggregation
//! steps.

mod session;

use std::path::PathBuf;

use clap::Parser;
use dialoguer::{Confirm, Select};
use rental_map_source_models::CitySource;

/// Command-line options for the interactive session.
#[derive(Parser)]
#[command(name = "rental-map", about = "Short-term rental saturation dashboards")]
struct Args {
    /// Directory holding the processed data files. Defaults to the
    /// workspace's `data/processed/`.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Lowercase city key to analyse (e.g. "madrid"). Prompts when
    /// omitted.
    #[arg(long)]
    city: Option<String>,

    /// Write the selected city's neighbourhood table to this CSV file.
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let args = Args::parse();
    let data_dir = args
        .data_dir
        .unwrap_or_else(rental_map_source::paths::processed_dir);

    let sources = rental_map_source::registry::all_sources();
    let mut session = session::Session::new(data_dir);

    // Non-interactive: one pass for the requested city, then exit.
    if let Some(city) = args.city {
        let source = find_city(&sources, &city)?;
        session.run_pass(source, args.export.as_deref());
        return Ok(());
    }

    println!("Rental Map");
    println!();

    loop {
        let labels: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        let idx = Select::new()
            .with_prompt("Which city would you like to analyse?")
            .items(&labels)
            .default(0)
            .interact()?;

        session.run_pass(&sources[idx], args.export.as_deref());

        if !Confirm::new()
            .with_prompt("Analyse another city?")
            .default(false)
            .interact()
            .unwrap_or(false)
        {
            break;
        }
    }

    Ok(())
}

/// Looks up a registered source by city key.
fn find_city<'a>(
    sources: &'a [CitySource],
    city: &str,
) -> Result<&'a CitySource, Box<dyn std::error::Error>> {
    sources.iter().find(|s| s.city == city).ok_or_else(|| {
        let known: Vec<&str> = sources.iter().map(CitySource::city).collect();
        format!("Unknown city '{city}'. Known cities: {}", known.join(", ")).into()
    })
}
