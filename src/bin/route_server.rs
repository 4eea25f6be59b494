//! route-server: HTTP front end with the straight-line reference engine.
//!
//! Usage:
//!   route-server [--config <path>] [--log <directive>]
//!
//! Environment:
//!   ROUTE_HOST, ROUTE_PORT, ROUTE_SNAP_PREVENTIONS_DEFAULT,
//!   ROUTE_ELEVATION, ROUTE_BULK_CONCURRENCY, RUST_LOG

use anyhow::{bail, Context};
use route_orchestrator::config::ServerConfig;
use route_orchestrator::engine::BeelineEngine;
use route_orchestrator::profile::ConfiguredProfileResolver;
use route_orchestrator::{server, telemetry, RouteOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;

struct Args {
    config: Option<PathBuf>,
    log: String,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut args = Args {
        config: None,
        log: "info".to_string(),
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--log" => {
                args.log = iter.next().context("--log needs a directive")?;
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("route-server {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(Some(args))
}

fn print_usage() {
    println!(
        r#"route-server: routing request orchestrator

USAGE:
    route-server [OPTIONS]

OPTIONS:
    -c, --config <path>     YAML configuration file
        --log <directive>   Default log filter when RUST_LOG is unset (default: info)
    -V, --version           Show version information
    -h, --help              Show this help message"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };
    telemetry::init_tracing(&args.log)?;

    let config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    }
    .with_env_overrides()?;

    let mut engine = BeelineEngine::new();
    for profile in &config.profiles {
        if let Some(kmh) = default_speed(&profile.vehicle) {
            engine = engine.with_profile_speed(profile.name.clone(), kmh);
        }
    }

    let orchestrator = RouteOrchestrator::builder()
        .with_server_config(&config)
        .with_engine(Arc::new(engine))
        .with_profile_resolver(Arc::new(ConfiguredProfileResolver::new(config.profiles.clone())))
        .build()?;

    server::run(&config, orchestrator).await?;
    Ok(())
}

/// km/h for the vehicles the straight-line engine knows.
fn default_speed(vehicle: &str) -> Option<f64> {
    match vehicle {
        "car" => Some(50.0),
        "bike" => Some(15.0),
        "foot" => Some(5.0),
        _ => None,
    }
}
