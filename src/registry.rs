// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! The series registry
//!
//! A [`SeriesRegistry`] owns the series/version tables as one immutable
//! snapshot. Readers take a clone of the current `Arc`; every update builds a
//! complete new snapshot and swaps it in, so a reader never observes a
//! half-updated table. Callers needing consistency across several calls must
//! hold their own lock.
//!
//! The registry starts from the compiled-in tables (Uninitialized) and merges
//! the distro-info feed on first use (Enriched). A failed lazy load is logged
//! and not retried until the path changes or the registry is reset.

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::classify::{classify, static_classifier};
use crate::distro_info::DistroInfo;
use crate::error::{Result, SeriesError};
use crate::tables::{
    DEFAULT_SUPPORTED_LTS, DISTRO_INFO_ENV, DISTRO_INFO_PATH, SUPPORTED_LTS, UBUNTU_SERIES,
    static_series_versions,
};
use crate::OsType;

/// Families whose static series are always workload candidates
const WORKLOAD_FAMILIES: [OsType; 5] = [
    OsType::Windows,
    OsType::CentOs,
    OsType::OpenSuse,
    OsType::Kubernetes,
    OsType::GenericLinux,
];

static GLOBAL: LazyLock<SeriesRegistry> = LazyLock::new(SeriesRegistry::new);

/// Whether distro-info data is reflected in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// Only the compiled-in tables are loaded
    Uninitialized,
    /// A distro-info feed was merged, or the tables were replaced wholesale
    Enriched,
}

/// One consistent view of every table the registry serves
#[derive(Debug, Clone)]
struct SeriesTables {
    versions: HashMap<String, String>,
    /// Inverse of `versions`
    version_series: HashMap<String, String>,
    ubuntu: HashMap<String, String>,
    classifier: HashMap<String, OsType>,
    distro_info: Option<Arc<DistroInfo>>,
    state: RegistryState,
    load_attempted: bool,
}

impl SeriesTables {
    fn from_static() -> Self {
        let versions: HashMap<String, String> = static_series_versions()
            .into_iter()
            .map(|(series, version)| (series.to_string(), version.to_string()))
            .collect();
        Self {
            version_series: invert(&versions),
            versions,
            ubuntu: UBUNTU_SERIES
                .iter()
                .map(|&(series, version)| (series.to_string(), version.to_string()))
                .collect(),
            classifier: static_classifier(),
            distro_info: None,
            state: RegistryState::Uninitialized,
            load_attempted: false,
        }
    }

    /// Copy of these tables with a distro-info feed layered on top
    ///
    /// Feed entries override existing entries for the same series.
    fn merged_with(&self, info: DistroInfo) -> Self {
        let mut versions = self.versions.clone();
        let mut ubuntu = self.ubuntu.clone();
        let mut classifier = self.classifier.clone();
        for record in info.records() {
            versions.insert(record.series.clone(), record.version.clone());
            ubuntu.insert(record.series.clone(), record.version.clone());
            classifier.insert(record.series.clone(), OsType::Ubuntu);
        }
        Self {
            version_series: invert(&versions),
            versions,
            ubuntu,
            classifier,
            distro_info: Some(Arc::new(info)),
            state: RegistryState::Enriched,
            load_attempted: true,
        }
    }

    fn needs_distro_info(&self) -> bool {
        self.state == RegistryState::Uninitialized && !self.load_attempted
    }
}

/// Build the version to series map
///
/// Series are visited in sorted order, so when two series share a version the
/// alphabetically last one wins.
fn invert(versions: &HashMap<String, String>) -> HashMap<String, String> {
    let mut sorted: Vec<(&String, &String)> = versions.iter().collect();
    sorted.sort();
    sorted
        .into_iter()
        .map(|(series, version)| (version.clone(), series.clone()))
        .collect()
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Default distro-info location
///
/// Uses `$OSSERIES_DISTRO_INFO` if set, otherwise the system path.
#[must_use]
pub fn default_distro_info_path() -> PathBuf {
    std::env::var_os(DISTRO_INFO_ENV)
        .filter(|value| !value.is_empty())
        .map_or_else(|| PathBuf::from(DISTRO_INFO_PATH), PathBuf::from)
}

/// Series lookups over the static tables and the distro-info feed
#[derive(Debug)]
pub struct SeriesRegistry {
    tables: RwLock<Arc<SeriesTables>>,
    latest_lts: RwLock<Option<String>>,
    distro_info_path: RwLock<PathBuf>,
}

impl Default for SeriesRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesRegistry {
    /// Create a registry reading distro-info from [`default_distro_info_path`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_distro_info_path(default_distro_info_path())
    }

    /// Create a registry reading distro-info from `path`
    #[must_use]
    pub fn with_distro_info_path(path: impl Into<PathBuf>) -> Self {
        Self {
            tables: RwLock::new(Arc::new(SeriesTables::from_static())),
            latest_lts: RwLock::new(None),
            distro_info_path: RwLock::new(path.into()),
        }
    }

    /// The process-wide registry used by the crate-level functions
    pub fn global() -> &'static SeriesRegistry {
        &GLOBAL
    }

    fn snapshot(&self) -> Arc<SeriesTables> {
        Arc::clone(&read(&self.tables))
    }

    fn swap(&self, tables: SeriesTables) -> Arc<SeriesTables> {
        std::mem::replace(&mut *write(&self.tables), Arc::new(tables))
    }

    #[must_use]
    pub fn state(&self) -> RegistryState {
        self.snapshot().state
    }

    #[must_use]
    pub fn distro_info_path(&self) -> PathBuf {
        read(&self.distro_info_path).clone()
    }

    /// Point the registry at another distro-info file, returning the old path
    ///
    /// While the registry is still Uninitialized the next query tries the new
    /// file, even if loading the old one failed.
    pub fn set_distro_info_path(&self, path: impl Into<PathBuf>) -> PathBuf {
        let previous = std::mem::replace(&mut *write(&self.distro_info_path), path.into());
        let mut tables = write(&self.tables);
        if tables.state == RegistryState::Uninitialized && tables.load_attempted {
            let mut retry = (**tables).clone();
            retry.load_attempted = false;
            *tables = Arc::new(retry);
        }
        previous
    }

    /// Load the configured distro-info file and merge it into the tables
    ///
    /// Returns the number of records merged.
    ///
    /// # Errors
    /// Returns [`SeriesError::FileAccess`] if the file cannot be read and
    /// [`SeriesError::MalformedDistroInfo`] if it has no usable header
    pub fn load_distro_info(&self) -> Result<usize> {
        let path = self.distro_info_path();
        self.load_distro_info_from(&path)
    }

    /// Load a specific distro-info file and merge it into the tables
    ///
    /// # Errors
    /// Same as [`SeriesRegistry::load_distro_info`]
    pub fn load_distro_info_from(&self, path: &Path) -> Result<usize> {
        let info = DistroInfo::load(path)?;
        let count = info.records().len();
        let mut tables = write(&self.tables);
        *tables = Arc::new(tables.merged_with(info));
        Ok(count)
    }

    /// Merge distro-info once if the registry is still Uninitialized
    ///
    /// Returns `true` if new data was merged. Failures degrade to the static
    /// tables.
    fn ensure_distro_info(&self) -> bool {
        if !self.snapshot().needs_distro_info() {
            return false;
        }

        let path = self.distro_info_path();
        let loaded = DistroInfo::load(&path);

        let mut tables = write(&self.tables);
        // Another caller may have replaced the tables while the file was read.
        if !tables.needs_distro_info() {
            return false;
        }
        match loaded {
            Ok(info) => {
                debug!(path = %path.display(), records = info.records().len(), "merged distro info");
                *tables = Arc::new(tables.merged_with(info));
                true
            }
            Err(e) => {
                // No feed at all is the normal case off Ubuntu hosts.
                match &e {
                    SeriesError::FileAccess { source, .. }
                        if source.kind() == io::ErrorKind::NotFound =>
                    {
                        debug!("no distro info, using static series data: {e}");
                    }
                    _ => warn!("failed to update distro info: {e}"),
                }
                let mut degraded = (**tables).clone();
                degraded.load_attempted = true;
                *tables = Arc::new(degraded);
                false
            }
        }
    }

    /// Run `lookup` against the tables, retrying once after a lazy load
    fn lookup<T>(&self, lookup: impl Fn(&SeriesTables) -> Option<T>) -> Option<T> {
        if let Some(found) = lookup(&self.snapshot()) {
            return Some(found);
        }
        if self.ensure_distro_info() {
            lookup(&self.snapshot())
        } else {
            None
        }
    }

    /// Classify a series into its OS family
    ///
    /// # Errors
    /// [`SeriesError::InvalidSeries`] for an empty series,
    /// [`SeriesError::UnknownOsForSeries`] if no rule matches
    pub fn get_os_from_series(&self, series: &str) -> Result<OsType> {
        if series.is_empty() {
            return Err(SeriesError::InvalidSeries(series.to_string()));
        }
        self.lookup(|tables| classify(&tables.classifier, series))
            .ok_or_else(|| SeriesError::UnknownOsForSeries(series.to_string()))
    }

    /// Look up the version of a series
    ///
    /// # Errors
    /// [`SeriesError::UnknownVersionForSeries`] if the series is not in the
    /// version table
    pub fn series_version(&self, series: &str) -> Result<String> {
        self.lookup(|tables| tables.versions.get(series).cloned())
            .ok_or_else(|| SeriesError::UnknownVersionForSeries(series.to_string()))
    }

    /// Look up the series for a version
    ///
    /// # Errors
    /// [`SeriesError::UnknownSeriesForVersion`] if no series has that version
    pub fn version_series(&self, version: &str) -> Result<String> {
        self.lookup(|tables| tables.version_series.get(version).cloned())
            .ok_or_else(|| SeriesError::UnknownSeriesForVersion(version.to_string()))
    }

    /// Look up the version of an Ubuntu series
    ///
    /// Consults only the Ubuntu table, which replacing the version table does
    /// not affect.
    ///
    /// # Errors
    /// [`SeriesError::UnknownVersionForSeries`] for empty or unknown series
    pub fn ubuntu_series_version(&self, series: &str) -> Result<String> {
        if series.is_empty() {
            return Err(SeriesError::UnknownVersionForSeries(String::new()));
        }
        self.lookup(|tables| tables.ubuntu.get(series).cloned())
            .ok_or_else(|| SeriesError::UnknownVersionForSeries(series.to_string()))
    }

    /// Every series in the version table, sorted
    #[must_use]
    pub fn supported_series(&self) -> Vec<String> {
        self.ensure_distro_info();
        let tables = self.snapshot();
        let mut series: Vec<String> = tables.versions.keys().cloned().collect();
        series.sort();
        series
    }

    /// Series in the version table that classify as `os`, sorted
    #[must_use]
    pub fn os_supported_series(&self, os: OsType) -> Vec<String> {
        self.ensure_distro_info();
        let tables = self.snapshot();
        let mut series: Vec<String> = tables
            .versions
            .keys()
            .filter(|s| classify(&tables.classifier, s) == Some(os))
            .cloned()
            .collect();
        series.sort();
        series
    }

    /// The compiled-in latest LTS, ignoring any override
    #[must_use]
    pub fn default_supported_lts(&self) -> &'static str {
        DEFAULT_SUPPORTED_LTS
    }

    #[must_use]
    pub fn latest_lts(&self) -> String {
        read(&self.latest_lts)
            .clone()
            .unwrap_or_else(|| DEFAULT_SUPPORTED_LTS.to_string())
    }

    /// Override the latest LTS and return the value that was in effect
    ///
    /// An empty `value` restores the compiled-in default.
    pub fn set_latest_lts_for_testing(&self, value: &str) -> String {
        let mut latest = write(&self.latest_lts);
        let previous = latest
            .take()
            .unwrap_or_else(|| DEFAULT_SUPPORTED_LTS.to_string());
        if !value.is_empty() {
            *latest = Some(value.to_string());
        }
        previous
    }

    /// LTS releases in the supported window, oldest first
    #[must_use]
    pub fn supported_lts(&self) -> Vec<String> {
        SUPPORTED_LTS.iter().map(ToString::to_string).collect()
    }

    /// The newest LTS release already out according to distro-info
    ///
    /// `None` when no feed is loaded or it lists no released LTS.
    #[must_use]
    pub fn latest_released_lts(&self) -> Option<String> {
        self.latest_released_lts_on(today())
    }

    #[must_use]
    pub fn latest_released_lts_on(&self, date: NaiveDate) -> Option<String> {
        self.ensure_distro_info();
        let tables = self.snapshot();
        let info = tables.distro_info.as_ref()?;
        info.latest_released_lts(date).map(|r| r.series.clone())
    }

    /// Ubuntu series a controller may run, as of today
    #[must_use]
    pub fn supported_juju_controller_series(&self) -> Vec<String> {
        self.supported_juju_controller_series_on(today())
    }

    /// Ubuntu series from distro-info still supported on `date`, sorted
    #[must_use]
    pub fn supported_juju_controller_series_on(&self, date: NaiveDate) -> Vec<String> {
        self.ensure_distro_info();
        let tables = self.snapshot();
        let Some(info) = tables.distro_info.as_ref() else {
            return Vec::new();
        };
        info.supported_on(date)
            .map(|record| record.series.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Series a workload may run, as of today
    #[must_use]
    pub fn supported_juju_workload_series(&self) -> Vec<String> {
        self.supported_juju_workload_series_on(today())
    }

    /// Controller series plus every static non-Ubuntu workload series, sorted
    ///
    /// macOS series are never workload candidates.
    #[must_use]
    pub fn supported_juju_workload_series_on(&self, date: NaiveDate) -> Vec<String> {
        let mut series: BTreeSet<String> = self
            .supported_juju_controller_series_on(date)
            .into_iter()
            .collect();
        series.extend(
            static_classifier()
                .into_iter()
                .filter(|(_, os)| WORKLOAD_FAMILIES.contains(os))
                .map(|(name, _)| name),
        );
        series.into_iter().collect()
    }

    /// All series supported in any role; same content as the workload set
    #[must_use]
    pub fn supported_juju_series(&self) -> Vec<String> {
        self.supported_juju_workload_series()
    }

    /// Replace the whole version table
    ///
    /// A non-empty table is authoritative: the registry becomes Enriched and
    /// no lazy distro-info load will touch it. An empty table drops any merged
    /// feed so the next query reads distro-info again. The previous tables
    /// come back when the returned guard is restored or dropped.
    pub fn set_series_versions(&self, versions: HashMap<String, String>) -> RestoreSeriesVersions<'_> {
        let current = self.snapshot();
        let replacement = if versions.is_empty() {
            SeriesTables {
                versions,
                version_series: HashMap::new(),
                ..SeriesTables::from_static()
            }
        } else {
            SeriesTables {
                version_series: invert(&versions),
                versions,
                state: RegistryState::Enriched,
                ..(*current).clone()
            }
        };
        let previous = self.swap(replacement);
        RestoreSeriesVersions {
            registry: self,
            previous: Some(previous),
        }
    }

    /// Return to the compiled-in tables and clear the LTS override
    pub fn reset(&self) {
        self.swap(SeriesTables::from_static());
        *write(&self.latest_lts) = None;
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Puts back the tables replaced by [`SeriesRegistry::set_series_versions`]
#[must_use = "dropping the guard restores the previous series versions immediately"]
pub struct RestoreSeriesVersions<'a> {
    registry: &'a SeriesRegistry,
    previous: Option<Arc<SeriesTables>>,
}

impl RestoreSeriesVersions<'_> {
    /// Restore the previous tables now
    pub fn restore(mut self) {
        self.put_back();
    }

    fn put_back(&mut self) {
        if let Some(previous) = self.previous.take() {
            *write(&self.registry.tables) = previous;
        }
    }
}

impl Drop for RestoreSeriesVersions<'_> {
    fn drop(&mut self) {
        self.put_back();
    }
}
