// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! osseries - Main Application
//!
//! Command-line front end over the series registry. Supports:
//! - Classifying a series into its OS family
//! - Mapping series to versions and back
//! - Listing supported series per family or deployment role
//! - Showing LTS information

use std::error::Error;
use std::process::exit;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use osseries::{OsType, SeriesRegistry};

mod cli;

use cli::{Cli, Command, Role};

/// Main application entry point
///
/// Parses command line arguments and dispatches to the matching command.
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = match &cli.distro_info {
        Some(path) => SeriesRegistry::with_distro_info_path(path),
        None => SeriesRegistry::new(),
    };

    let result = match cli.command {
        Command::Os { series } => cmd_os(&registry, &series, cli.json),
        Command::Version { series } => cmd_version(&registry, &series, cli.json),
        Command::Series { version } => cmd_series(&registry, &version, cli.json),
        Command::Supported { os, role } => cmd_supported(&registry, os.as_deref(), role, cli.json),
        Command::Lts => cmd_lts(&registry, cli.json),
    };

    // Handle errors by printing to stderr and exiting with non-zero status
    if let Err(e) = result {
        eprintln!("osseries: {e}");
        exit(1);
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise warnings only, or debug with `-v`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Command Implementation Functions
// =============================================================================

fn cmd_os(registry: &SeriesRegistry, series: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let os = registry.get_os_from_series(series)?;
    if json {
        println!("{}", json!({ "series": series, "os": os }));
    } else {
        println!("{os}");
    }
    Ok(())
}

fn cmd_version(registry: &SeriesRegistry, series: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let version = registry.series_version(series)?;
    if json {
        println!("{}", json!({ "series": series, "version": version }));
    } else {
        println!("{version}");
    }
    Ok(())
}

fn cmd_series(registry: &SeriesRegistry, version: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let series = registry.version_series(version)?;
    if json {
        println!("{}", json!({ "version": version, "series": series }));
    } else {
        println!("{series}");
    }
    Ok(())
}

/// List supported series
///
/// With `--os` the version table is filtered by family. Otherwise the role
/// decides: controller, workload, or all (the default).
fn cmd_supported(
    registry: &SeriesRegistry,
    os: Option<&str>,
    role: Option<Role>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let series = match (os, role.unwrap_or(Role::All)) {
        (Some(family), _) => registry.os_supported_series(family.parse::<OsType>()?),
        (None, Role::Controller) => registry.supported_juju_controller_series(),
        (None, Role::Workload) => registry.supported_juju_workload_series(),
        (None, Role::All) => registry.supported_juju_series(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        for name in series {
            println!("{name}");
        }
    }
    Ok(())
}

fn cmd_lts(registry: &SeriesRegistry, json: bool) -> Result<(), Box<dyn Error>> {
    let latest = registry.latest_lts();
    let supported = registry.supported_lts();
    let released = registry.latest_released_lts();

    if json {
        let report = json!({
            "latest": latest,
            "default": registry.default_supported_lts(),
            "supported": supported,
            "latest_released": released,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("latest: {latest}");
        println!("supported: {}", supported.join(", "));
        if let Some(released) = released {
            println!("latest released (distro-info): {released}");
        }
    }
    Ok(())
}
