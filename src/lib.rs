// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Operating System Series Library
//!
//! This library maps OS series names (Ubuntu codenames, Windows release tags
//! and a few others) to their OS family and version, and derives the series
//! supported per family and per deployment role. Data comes from compiled-in
//! tables enriched by the Ubuntu distro-info feed.
//!
//! Code that can should hold a [`SeriesRegistry`] and pass it around. The
//! free functions below operate on the process-wide registry.

pub mod classify;
pub mod distro_info;
pub mod error;
pub mod os;
pub mod registry;
pub mod tables;
pub mod version;

use std::collections::HashMap;

// Re-export commonly used items at the crate root for convenience
pub use classify::{is_windows_nano, windows_series_from_product_name};
pub use distro_info::{DistroInfo, DistroInfoRecord};
pub use error::{Result, SeriesError};
pub use os::OsType;
pub use registry::{RegistryState, RestoreSeriesVersions, SeriesRegistry, default_distro_info_path};
pub use tables::{DEFAULT_SUPPORTED_LTS, DISTRO_INFO_ENV, DISTRO_INFO_PATH};
pub use version::compare_versions;

/// Classify a series into its OS family
///
/// # Errors
/// See [`SeriesRegistry::get_os_from_series`]
pub fn get_os_from_series(series: &str) -> Result<OsType> {
    SeriesRegistry::global().get_os_from_series(series)
}

/// # Errors
/// See [`SeriesRegistry::series_version`]
pub fn series_version(series: &str) -> Result<String> {
    SeriesRegistry::global().series_version(series)
}

/// # Errors
/// See [`SeriesRegistry::version_series`]
pub fn version_series(version: &str) -> Result<String> {
    SeriesRegistry::global().version_series(version)
}

/// # Errors
/// See [`SeriesRegistry::ubuntu_series_version`]
pub fn ubuntu_series_version(series: &str) -> Result<String> {
    SeriesRegistry::global().ubuntu_series_version(series)
}

#[must_use]
pub fn supported_series() -> Vec<String> {
    SeriesRegistry::global().supported_series()
}

#[must_use]
pub fn os_supported_series(os: OsType) -> Vec<String> {
    SeriesRegistry::global().os_supported_series(os)
}

#[must_use]
pub fn default_supported_lts() -> &'static str {
    DEFAULT_SUPPORTED_LTS
}

#[must_use]
pub fn latest_lts() -> String {
    SeriesRegistry::global().latest_lts()
}

pub fn set_latest_lts_for_testing(value: &str) -> String {
    SeriesRegistry::global().set_latest_lts_for_testing(value)
}

#[must_use]
pub fn supported_lts() -> Vec<String> {
    SeriesRegistry::global().supported_lts()
}

#[must_use]
pub fn supported_juju_controller_series() -> Vec<String> {
    SeriesRegistry::global().supported_juju_controller_series()
}

#[must_use]
pub fn supported_juju_workload_series() -> Vec<String> {
    SeriesRegistry::global().supported_juju_workload_series()
}

#[must_use]
pub fn supported_juju_series() -> Vec<String> {
    SeriesRegistry::global().supported_juju_series()
}

/// Replace the process-wide version table until the guard is dropped
pub fn set_series_versions(versions: HashMap<String, String>) -> RestoreSeriesVersions<'static> {
    SeriesRegistry::global().set_series_versions(versions)
}
