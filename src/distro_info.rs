// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Parsing of the Ubuntu distro-info feed
//!
//! The feed is a CSV file with one row per release. Columns are located by
//! header name so reordered or extended files still parse. Rows that do not
//! fit the header are skipped rather than failing the whole load.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SeriesError};
use crate::version::{compare_versions, release_version, split_lts_suffix};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One release row from the distro-info feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistroInfoRecord {
    /// Series key used for lookups (e.g. "bionic")
    pub series: String,
    /// Codename as written in the feed (e.g. "Bionic Beaver" or "bionic")
    pub codename: String,
    /// Release version without the LTS marker (e.g. "18.04")
    pub version: String,
    pub lts: bool,
    pub created: Option<NaiveDate>,
    pub release: Option<NaiveDate>,
    pub eol: Option<NaiveDate>,
    pub eol_server: Option<NaiveDate>,
}

impl DistroInfoRecord {
    /// End of support, preferring the server date when it parses
    ///
    /// `None` means no usable end-of-life date, which counts as "not yet
    /// end-of-life".
    #[must_use]
    pub fn effective_eol(&self) -> Option<NaiveDate> {
        self.eol_server.or(self.eol)
    }

    /// Whether the release is still supported on `date`
    #[must_use]
    pub fn is_supported_on(&self, date: NaiveDate) -> bool {
        self.effective_eol().is_none_or(|eol| eol >= date)
    }

    /// Whether the release date has been reached on `date`
    ///
    /// A missing release date counts as released.
    #[must_use]
    pub fn is_released_on(&self, date: NaiveDate) -> bool {
        self.release.is_none_or(|release| release <= date)
    }
}

/// The parsed contents of one distro-info file
#[derive(Debug, Clone)]
pub struct DistroInfo {
    path: PathBuf,
    records: Vec<DistroInfoRecord>,
}

impl DistroInfo {
    /// Read and parse the feed at `path`
    ///
    /// # Errors
    /// [`SeriesError::FileAccess`] if the file cannot be read,
    /// [`SeriesError::MalformedDistroInfo`] if the header lacks the
    /// `version` or `codename` column
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SeriesError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let records = parse_records(&content, path)?;
        debug!(path = %path.display(), records = records.len(), "loaded distro info");
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Parse feed contents that were obtained elsewhere
    ///
    /// `origin` is only used in error messages.
    ///
    /// # Errors
    /// [`SeriesError::MalformedDistroInfo`] if the header is unusable
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        Ok(Self {
            path: origin.to_path_buf(),
            records: parse_records(content, origin)?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn records(&self) -> &[DistroInfoRecord] {
        &self.records
    }

    /// Records still supported on `date`
    pub fn supported_on(&self, date: NaiveDate) -> impl Iterator<Item = &DistroInfoRecord> {
        self.records.iter().filter(move |r| r.is_supported_on(date))
    }

    /// The highest-versioned LTS release out by `date`
    #[must_use]
    pub fn latest_released_lts(&self, date: NaiveDate) -> Option<&DistroInfoRecord> {
        self.records
            .iter()
            .filter(|r| r.lts && r.is_released_on(date))
            .max_by(|a, b| match compare_versions(&a.version, &b.version) {
                Ordering::Equal => a.release.cmp(&b.release),
                other => other,
            })
    }
}

/// Column positions resolved from the header row
struct Columns {
    version: usize,
    codename: usize,
    series: Option<usize>,
    created: Option<usize>,
    release: Option<usize>,
    eol: Option<usize>,
    eol_server: Option<usize>,
    /// Fields a row needs to reach every required column
    required_width: usize,
    width: usize,
}

impl Columns {
    fn from_header(header: &str, origin: &Path) -> Result<Self> {
        let names: Vec<String> = split_row(header).map(str::to_lowercase).collect();
        let find = |name: &str| names.iter().position(|n| n == name);
        let required = |name: &str| {
            find(name).ok_or_else(|| SeriesError::MalformedDistroInfo {
                path: origin.to_path_buf(),
                reason: format!("missing {name:?} column"),
            })
        };

        let version = required("version")?;
        let codename = required("codename")?;
        let series = find("series");
        let required_width = version.max(codename).max(series.unwrap_or(0)) + 1;

        Ok(Self {
            version,
            codename,
            series,
            created: find("created"),
            release: find("release"),
            eol: find("eol"),
            eol_server: find("eol-server"),
            required_width,
            width: names.len(),
        })
    }

    /// Build a record from one row
    ///
    /// The feed leaves trailing optional columns off (non-LTS releases have
    /// no `eol-server`), so rows may be shorter than the header as long as
    /// they reach every required column.
    fn record(&self, fields: &[&str]) -> Option<DistroInfoRecord> {
        if fields.len() < self.required_width || fields.len() > self.width {
            return None;
        }
        let field = |column: usize| fields.get(column).copied();
        let date = |column: Option<usize>| {
            column
                .and_then(field)
                .and_then(|value| NaiveDate::parse_from_str(value, DATE_FORMAT).ok())
        };

        let codename = field(self.codename)?;
        // The full feed has a separate lowercase "series" column; the short
        // form keys releases by codename.
        let series = match self.series {
            Some(column) => field(column)?,
            None => codename,
        };
        let (bare_version, lts) = split_lts_suffix(field(self.version)?);
        if series.is_empty() || bare_version.is_empty() {
            return None;
        }
        let version = release_version(bare_version).unwrap_or_else(|| bare_version.to_string());

        Some(DistroInfoRecord {
            series: series.to_string(),
            codename: codename.to_string(),
            version,
            lts,
            created: date(self.created),
            release: date(self.release),
            eol: date(self.eol),
            eol_server: date(self.eol_server),
        })
    }
}

fn split_row(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|field| field.trim().trim_matches('"'))
}

fn parse_records(content: &str, origin: &Path) -> Result<Vec<DistroInfoRecord>> {
    let mut lines = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let Some(header) = lines.next() else {
        return Err(SeriesError::MalformedDistroInfo {
            path: origin.to_path_buf(),
            reason: "empty file".to_string(),
        });
    };
    let columns = Columns::from_header(header, origin)?;

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        let fields: Vec<&str> = split_row(line).collect();
        match columns.record(&fields) {
            Some(record) => records.push(record),
            None => debug!(row = index + 1, line, "skipping malformed distro info row"),
        }
    }
    Ok(records)
}
