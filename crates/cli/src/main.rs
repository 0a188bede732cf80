//! U-LoadPlan CLI

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use u_loadplan::core::{
    currency_symbol, AllocationResult, CatalogCache, Config, Planner, SharedCatalogCache,
    TruckType,
};
use u_loadplan::Allocator;
use u_loadplan_cli::{AllocationRequest, FileCatalog, RequestParser, ValidationReport};

#[derive(Parser)]
#[command(name = "loadplan")]
#[command(about = "Truck allocation for package loads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate packages to trucks
    Allocate(RunArgs),

    /// Allocate and list ranked loading options
    Options(RunArgs),

    /// Check a request without packing
    Validate(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Path to the JSON request file
    file: PathBuf,

    /// Engine configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Truck catalog (JSON array of rows), used instead of the request's trucks
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Evaluate strategies on a single thread
    #[arg(long)]
    serial: bool,

    /// Output file for results (JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

struct Loaded {
    request: AllocationRequest,
    trucks: Vec<TruckType>,
    config: Config,
}

fn load(args: &RunArgs) -> anyhow::Result<Loaded> {
    let parser = RequestParser::new();
    let request = parser
        .parse_file(&args.file)
        .with_context(|| format!("reading request {}", args.file.display()))?;

    let mut config = match &args.config {
        Some(path) => parser
            .parse_config(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Config::default(),
    };
    if args.serial {
        config = config.with_parallel_strategies(false);
    }

    let trucks = match &args.catalog {
        Some(path) => {
            let cache = SharedCatalogCache::new(CatalogCache::new().with_clearance(config.clearance));
            cache.trucks(&FileCatalog::new(path), Instant::now())?
        }
        None => request.truck_types(config.clearance),
    };

    Ok(Loaded {
        request,
        trucks,
        config,
    })
}

fn emit<T: Serialize>(value: &T, output: Option<&PathBuf>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("Results saved to: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn summarize(result: &AllocationResult) {
    match result {
        AllocationResult::Success {
            total_cost,
            currency,
            strategy,
            ..
        } => log::info!(
            "{} trucks, {}{:.2} ({})",
            result.truck_count(),
            currency_symbol(currency),
            total_cost,
            strategy
        ),
        AllocationResult::Partial { message, .. } => log::warn!("{message}"),
        AllocationResult::ValidationFailed { reason, .. } => log::warn!("Rejected: {reason}"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Allocate(args) => {
            let Loaded {
                request,
                trucks,
                config,
            } = load(&args)?;
            let allocator = Allocator::new(config);
            let result = allocator.allocate(&request.package_units(), &trucks, &request.cost_map());
            summarize(&result);
            emit(&result, args.output.as_ref())?;
        }

        Commands::Options(args) => {
            let Loaded {
                request,
                trucks,
                config,
            } = load(&args)?;
            let packages = request.package_units();
            let costs = request.cost_map();
            let allocator = Allocator::new(config);

            let result = allocator.allocate(&packages, &trucks, &costs);
            summarize(&result);
            let options = allocator.generate_options(&packages, &trucks, &costs, &result);
            for option in &options {
                log::info!(
                    "Option {}: {} - {}{:.2} ({} trucks)",
                    option.id,
                    option.name,
                    currency_symbol(&option.currency),
                    option.total_cost,
                    option.truck_count
                );
            }
            emit(&options, args.output.as_ref())?;
        }

        Commands::Validate(args) => {
            let Loaded {
                request, trucks, ..
            } = load(&args)?;
            let report = ValidationReport::check(&request, &trucks);
            match &report.failure {
                None => log::info!(
                    "{} package lines and {} trucks are valid",
                    request.packages.len(),
                    trucks.len()
                ),
                Some(failure) => log::warn!(
                    "Rejected: {} ({:?})",
                    failure.reason,
                    failure.offending_package_ids
                ),
            }
            emit(&report, args.output.as_ref())?;
        }
    }

    Ok(())
}
