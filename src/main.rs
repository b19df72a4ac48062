mod backend;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod export;
mod geo;
mod logging;
mod models;
mod pretty;
mod runtime;
mod session;
mod stats;
mod ui;
mod workers;

use crate::backend::{BackendApi, BackendClient};
use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::export::ExportFormat;
use crate::models::{Branch, Poi, SearchRequest};
use crate::pretty::{print_cmd_error, print_cmd_info};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::stats::{BranchMetrics, PoiMetrics};
use crate::ui::UIConfig;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the interactive dashboard
    Start {
        /// Backend environment (local, staging, production)
        #[arg(long, value_name = "ENV")]
        env: Option<String>,

        /// Stream events to the console instead of drawing the TUI
        #[arg(long)]
        headless: bool,

        /// Default number of POI results per search
        #[arg(long)]
        max_results: Option<u32>,

        /// Directory export files are written to
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,

        /// Disable the dashboard background color
        #[arg(long)]
        no_background_color: bool,
    },
    /// Fetch the branch list and print it with its metrics
    Branches {
        /// Backend environment (local, staging, production)
        #[arg(long, value_name = "ENV")]
        env: Option<String>,
    },
    /// Run a one-shot POI search and print the results
    Search {
        /// Search query, e.g. "pharmacy"
        #[arg(long)]
        query: String,

        /// Restrict the search to a branch (repeatable; empty = all)
        #[arg(long = "branch", value_name = "NAME")]
        branches: Vec<String>,

        /// Number of POI results to request
        #[arg(long)]
        max_results: Option<u32>,

        /// Manual latitude (requires --lng)
        #[arg(long)]
        lat: Option<f64>,

        /// Manual longitude (requires --lat)
        #[arg(long)]
        lng: Option<f64>,

        /// Export the results after printing them
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,

        /// Directory export files are written to
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,

        /// Backend environment (local, staging, production)
        #[arg(long, value_name = "ENV")]
        env: Option<String>,
    },
}

/// CLI flag beats the `BRANCHSCOPE_ENVIRONMENT` variable beats the config
/// file; anything unparseable falls back to the default environment.
fn resolve_environment(flag: Option<String>, config: &Config) -> Environment {
    flag.or_else(|| std::env::var("BRANCHSCOPE_ENVIRONMENT").ok())
        .or_else(|| config.environment.clone())
        .unwrap_or_default()
        .parse::<Environment>()
        .unwrap_or_default()
}

fn resolve_export_dir(
    flag: Option<PathBuf>,
    config: &Config,
) -> Result<PathBuf, Box<dyn Error>> {
    match flag.or_else(|| config.export_dir.clone()) {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let config = Config::load_or_default(&config_path)?;
    let args = Args::parse();

    match args.command {
        Command::Start {
            env,
            headless,
            max_results,
            export_dir,
            no_background_color,
        } => {
            let environment = resolve_environment(env, &config);
            let ui_config = UIConfig {
                with_background_color: !no_background_color,
                environment,
                max_results: max_results.unwrap_or(config.max_results),
                export_dir: resolve_export_dir(export_dir, &config)?,
            };

            let session = setup_session(environment);
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, ui_config).await
            }
        }
        Command::Branches { env } => {
            let environment = resolve_environment(env, &config);
            let client = BackendClient::new(environment);
            let branches = client.get_branches().await.map_err(|e| {
                print_cmd_error!("Failed to load branches", "{}", e);
                Box::<dyn Error>::from(e.to_string())
            })?;
            print_branch_table(&branches);
            Ok(())
        }
        Command::Search {
            query,
            branches,
            max_results,
            lat,
            lng,
            export,
            export_dir,
            env,
        } => {
            // Validate locally; an invalid search never reaches the network.
            let query = query.trim().to_string();
            if query.is_empty() {
                return Err(Box::from("Search query cannot be empty"));
            }
            if lat.is_some() != lng.is_some() {
                return Err(Box::from(
                    "Latitude and longitude must be provided together",
                ));
            }

            let environment = resolve_environment(env, &config);
            let client = BackendClient::new(environment);
            let request = SearchRequest {
                query,
                branches,
                max_results: max_results.unwrap_or(config.max_results),
                lat,
                lng,
            };

            let response = client.search_poi(&request).await.map_err(|e| {
                print_cmd_error!("Search failed", "{}", e);
                Box::<dyn Error>::from(e.to_string())
            })?;
            print_poi_table(&response.data, response.count);

            if let Some(format) = export {
                if response.data.is_empty() {
                    return Err(Box::from("No results to export"));
                }
                let dir = resolve_export_dir(export_dir, &config)?;
                let path = export::run_export(&client, format, &response.data, &dir)
                    .await
                    .map_err(|e| {
                        print_cmd_error!("Export failed", "{}", e);
                        Box::<dyn Error>::from(e.to_string())
                    })?;
                print_cmd_info!("Export", "Results written to {}", path.display());
            }
            Ok(())
        }
    }
}

fn print_branch_table(branches: &[Branch]) {
    let metrics = BranchMetrics::compute(branches);
    print_cmd_info!(
        "Branch network",
        "{} branches across {} cities, latitude span {}",
        metrics.total,
        metrics.distinct_cities,
        metrics.format_latitude_span()
    );

    println!(
        "{:<30} {:<14} {:<18} {:>10} {:>10}",
        "Branch", "IFSC", "City", "Lat", "Lng"
    );
    for branch in branches {
        println!(
            "{:<30} {:<14} {:<18} {:>10.4} {:>10.4}",
            branch.name, branch.ifsc_code, branch.city, branch.latitude, branch.longitude
        );
    }
}

fn print_poi_table(pois: &[Poi], count: usize) {
    let metrics = PoiMetrics::compute(pois);
    let rating = metrics
        .average_rating
        .map(|average| format!("{:.1}/5", average))
        .unwrap_or_else(|| "N/A".to_string());
    print_cmd_info!(
        "Results",
        "{} POIs, average rating {}, {} unique types",
        count,
        rating,
        metrics.unique_types
    );

    println!(
        "{:<34} {:<16} {:>6} {:>8} {:>10}",
        "Name", "Type", "Rating", "Reviews", "Distance"
    );
    for poi in pois {
        println!(
            "{:<34} {:<16} {:>6} {:>8} {:>10}",
            poi.name,
            poi.primary_type(),
            poi.rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string()),
            poi.review_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            poi.distance_km
                .map(|km| format!("{:.2} km", km))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
}
