//! Route picker CLI
//!
//! Lists the route network and builds multi-leg trips, either in one shot
//! or interactively.

mod queries;
mod render;
mod session_shell;

use std::io::{self, Write};
use std::path::PathBuf;

use application::{SessionRegistry, TripPlanner};
use clap::{Parser, Subcommand};
use domain::NodeKey;
use infrastructure::{AppConfig, CsvEdgeSource, ExportFormat, create_sink, init_logging};
use tracing::info;

use crate::session_shell::SessionShell;

/// Route picker CLI
#[derive(Parser)]
#[command(name = "routepicker")]
#[command(author, version, about = "Build multi-leg trips over a city route table", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./routepicker.toml if present)
    #[arg(short, long, global = true, env = "ROUTEPICKER_CONFIG")]
    config: Option<PathBuf>,

    /// Edge table to load instead of the configured one
    #[arg(short, long, global = true)]
    edges: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List countries with at least one departure
    Countries,

    /// List the departure cities of a country
    Cities {
        /// Country name as it appears in the edge table
        country: String,
    },

    /// Show where a city leads
    ///
    /// Without --country this lists destination countries; with it, the
    /// individual routes into that country.
    Destinations {
        /// Departure country
        country: String,

        /// Departure city
        city: String,

        /// Only routes into this country
        #[arg(long = "country")]
        to_country: Option<String>,
    },

    /// Build a whole trip in one go
    ///
    /// Example: routepicker plan --origin France/Paris --stop Netherlands/Amsterdam --stop Germany/Berlin
    Plan {
        /// Starting city as Country/City
        #[arg(short, long)]
        origin: NodeKey,

        /// Next stop as Country/City, in travel order
        #[arg(short, long = "stop", required = true)]
        stops: Vec<NodeKey>,

        /// Write the finished trip to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format (default from configuration)
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },

    /// Build a trip interactively
    Session {
        /// File that 'export' writes to by default
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format (default from configuration)
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.verbose > 0 {
        config.logging.filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_logging(&config.logging)?;

    if let Some(edges) = cli.edges {
        config.data.edges_path = edges;
    }
    let delimiter = config
        .data
        .delimiter_byte()
        .ok_or_else(|| anyhow::anyhow!("delimiter must be a single ASCII character"))?;
    let source = CsvEdgeSource::new(&config.data.edges_path).with_delimiter(delimiter);
    let planner = TripPlanner::from_source(&source)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Countries => queries::countries(&planner, &mut out)?,

        Commands::Cities { country } => queries::cities(&planner, &country, &mut out)?,

        Commands::Destinations {
            country,
            city,
            to_country,
        } => {
            let from = NodeKey::new(country, city);
            queries::destinations(&planner, &from, to_country.as_deref(), &mut out)?;
        },

        Commands::Plan {
            origin,
            stops,
            output,
            format,
        } => {
            let format = format.unwrap_or(config.export.format);
            let sink = output.map(|path| create_sink(format, &path));
            queries::plan(&planner, origin, stops, sink.as_deref(), &mut out)?;
        },

        Commands::Session { output, format } => {
            let registry = SessionRegistry::new();
            let mut shell = SessionShell::new(
                &planner,
                &registry,
                output.unwrap_or(config.export.output_path),
                format.unwrap_or(config.export.format),
            );
            info!(traveler = %shell.traveler(), "Session started");
            shell.run(io::stdin().lock(), &mut out)?;
        },
    }

    out.flush()?;
    Ok(())
}
