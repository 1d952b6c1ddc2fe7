// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for osseries

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI argument parser
#[derive(Parser)]
#[command(name = "osseries", version, about = "Operating System Series Lookups")]
pub struct Cli {
    /// Read distro info from this CSV file instead of the system one
    #[arg(long = "distro-info", value_name = "PATH", global = true)]
    pub distro_info: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Make the operation more talkative
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the OS family of a series
    Os {
        #[arg(value_name = "SERIES")]
        series: String,
    },
    /// Print the version of a series
    Version {
        #[arg(value_name = "SERIES")]
        series: String,
    },
    /// Print the series for a version
    Series {
        #[arg(value_name = "VERSION")]
        version: String,
    },
    /// List supported series
    Supported {
        /// Only series of this OS family (e.g. ubuntu, windows)
        #[arg(long = "os", value_name = "FAMILY", conflicts_with = "role")]
        os: Option<String>,

        /// Deployment role to list series for
        #[arg(long, value_enum)]
        role: Option<Role>,
    },
    /// Show LTS information
    Lts,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Controller,
    Workload,
    All,
}
