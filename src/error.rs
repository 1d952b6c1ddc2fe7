// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Error types for series lookups and distro-info loading
//!
//! Every lookup miss carries the queried value verbatim so the failing input
//! shows up in the message, including the empty string.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, SeriesError>;

#[derive(Debug, Error)]
pub enum SeriesError {
    /// The series identifier is empty or otherwise unusable
    #[error("series {0:?} not valid")]
    InvalidSeries(String),

    #[error("unknown OS for series: {0:?}")]
    UnknownOsForSeries(String),

    #[error("unknown version for series: {0:?}")]
    UnknownVersionForSeries(String),

    #[error("unknown series for version: {0:?}")]
    UnknownSeriesForVersion(String),

    /// The distro-info file could not be read
    #[error("cannot read distro info file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The distro-info file was readable but lacks the required columns
    #[error("malformed distro info file {}: {reason}", .path.display())]
    MalformedDistroInfo { path: PathBuf, reason: String },

    /// An OS family name that does not parse into an [`crate::OsType`]
    #[error("unknown OS type: {0:?}")]
    UnknownOsType(String),
}

impl SeriesError {
    #[must_use]
    pub fn is_unknown_os_for_series(&self) -> bool {
        matches!(self, Self::UnknownOsForSeries(_))
    }

    #[must_use]
    pub fn is_unknown_version_for_series(&self) -> bool {
        matches!(self, Self::UnknownVersionForSeries(_))
    }

    #[must_use]
    pub fn is_unknown_series_for_version(&self) -> bool {
        matches!(self, Self::UnknownSeriesForVersion(_))
    }

    /// True for failures reading or parsing the distro-info source, as
    /// opposed to lookup misses
    #[must_use]
    pub fn is_distro_info_error(&self) -> bool {
        matches!(self, Self::FileAccess { .. } | Self::MalformedDistroInfo { .. })
    }
}
