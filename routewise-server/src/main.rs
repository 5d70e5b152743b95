use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use routewise_server::cache::CacheConfig;
use routewise_server::domain::AirportId;
use routewise_server::fares::{FareClass, LoaderConfig, load_graph};
use routewise_server::graph::FareGraph;
use routewise_server::planner::{
    MeetingConfig, MeetingStrategy, meeting_plan, optimal_meeting_point, shortest_path,
};
use routewise_server::web::{AppState, ServerConfig, create_router};

const ORIGINS_HINT: &str = "Provide comma-separated airports, e.g. 'MSP,DCA,MIA'";

/// Find the cheapest airport for a group of travelers to meet at.
#[derive(Parser, Debug)]
#[command(name = "routewise", version, about)]
struct Cli {
    /// Fare dataset (CSV)
    #[arg(long, global = true, env = "ROUTEWISE_FARES", default_value = "static/awards_us_2026.csv")]
    fares: PathBuf,

    /// Fare column used as the edge weight
    #[arg(long, global = true, value_enum, default_value_t = FareClass::default())]
    fare_class: FareClass,

    /// Keep only fares in effect on this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cheapest meeting point for the given origins.
    Meet {
        /// Comma-separated origin airports, e.g. MSP,DCA,MIA
        origins: Option<String>,

        /// Print each traveler's route before the meeting point
        #[arg(long)]
        itinerary: bool,

        #[arg(long, value_enum, default_value_t = MeetingStrategy::default())]
        strategy: MeetingStrategy,

        /// Evaluate candidates on a single thread
        #[arg(long)]
        sequential: bool,
    },
    /// Print the cheapest route between two airports.
    Path { from: String, to: String },
    /// Serve the HTTP API.
    Serve {
        #[arg(long, env = "ROUTEWISE_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Maximum number of origins per meeting request
        #[arg(long, default_value_t = ServerConfig::default().max_origins)]
        max_origins: usize,

        /// Per-request search deadline in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let loader = LoaderConfig::new(cli.fare_class, cli.as_of);

    match cli.command {
        Command::Meet {
            origins,
            itinerary,
            strategy,
            sequential,
        } => {
            // Reject bad input before paying for the fare file
            let origins = parse_origins(origins.as_deref())?;
            let graph = open_graph(&cli.fares, &loader)?;

            let config = MeetingConfig::new(strategy, !sequential);
            meet(&graph, &origins, &config, itinerary)
        }
        Command::Path { from, to } => {
            let from = AirportId::parse_normalized(&from).context("invalid origin airport")?;
            let to = AirportId::parse_normalized(&to).context("invalid destination airport")?;
            let graph = open_graph(&cli.fares, &loader)?;

            let route = shortest_path(&graph, &from, &to)?;
            if route.is_reachable() {
                println!("{}", join_path(&route.path));
                println!("{:.2}", route.cost);
            } else {
                bail!("{to} is not reachable from {from}");
            }
            Ok(())
        }
        Command::Serve {
            addr,
            max_origins,
            timeout_secs,
        } => {
            let graph = open_graph(&cli.fares, &loader)?;
            let server = ServerConfig::new(max_origins, Duration::from_secs(timeout_secs));
            serve(graph, server, addr).await
        }
    }
}

fn parse_origins(arg: Option<&str>) -> anyhow::Result<Vec<AirportId>> {
    let Some(arg) = arg else {
        bail!(ORIGINS_HINT);
    };
    AirportId::parse_list(arg).context(ORIGINS_HINT)
}

fn open_graph(path: &Path, config: &LoaderConfig) -> anyhow::Result<FareGraph> {
    load_graph(path, config).with_context(|| format!("failed to load fares from {}", path.display()))
}

fn meet(
    graph: &FareGraph,
    origins: &[AirportId],
    config: &MeetingConfig,
    itinerary: bool,
) -> anyhow::Result<()> {
    let meeting = optimal_meeting_point(graph, origins, config)?;

    if itinerary {
        for leg in meeting_plan(graph, origins, &meeting.airport)? {
            println!(
                "{}: {} ({:.2})",
                leg.origin,
                join_path(&leg.route.path),
                leg.route.cost
            );
        }
        println!("total: {:.2}", meeting.total_cost);
    }

    println!("{}", meeting.airport);
    Ok(())
}

fn join_path(path: &[AirportId]) -> String {
    path.iter()
        .map(AirportId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

async fn serve(graph: FareGraph, server: ServerConfig, addr: SocketAddr) -> anyhow::Result<()> {
    let airports = graph.node_count();
    let state = AppState::new(graph, MeetingConfig::default(), server, &CacheConfig::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!(%addr, airports, "Routewise listening");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/airports  - Airports in the fare graph");
    info!("  POST /api/meeting   - Cheapest meeting point");
    info!("  GET  /api/path      - Cheapest route between two airports");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
