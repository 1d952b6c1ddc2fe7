// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Operating system families a series can belong to

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SeriesError;

/// Coarse platform classification of a series
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize)]
pub enum OsType {
    Unknown,
    Ubuntu,
    Windows,
    #[serde(rename = "OSX")]
    Osx,
    #[serde(rename = "CentOS")]
    CentOs,
    #[serde(rename = "OpenSUSE")]
    OpenSuse,
    Kubernetes,
    GenericLinux,
}

impl OsType {
    /// All families, in declaration order
    pub const ALL: [OsType; 8] = [
        OsType::Unknown,
        OsType::Ubuntu,
        OsType::Windows,
        OsType::Osx,
        OsType::CentOs,
        OsType::OpenSuse,
        OsType::Kubernetes,
        OsType::GenericLinux,
    ];

    /// Canonical display name (e.g. "OpenSUSE")
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OsType::Unknown => "Unknown",
            OsType::Ubuntu => "Ubuntu",
            OsType::Windows => "Windows",
            OsType::Osx => "OSX",
            OsType::CentOs => "CentOS",
            OsType::OpenSuse => "OpenSUSE",
            OsType::Kubernetes => "Kubernetes",
            OsType::GenericLinux => "GenericLinux",
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsType {
    type Err = SeriesError;

    /// Parse a family name case-insensitively, accepting a few common aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" => Ok(OsType::Unknown),
            "ubuntu" => Ok(OsType::Ubuntu),
            "windows" => Ok(OsType::Windows),
            "osx" | "macos" => Ok(OsType::Osx),
            "centos" => Ok(OsType::CentOs),
            "opensuse" => Ok(OsType::OpenSuse),
            "kubernetes" => Ok(OsType::Kubernetes),
            "genericlinux" => Ok(OsType::GenericLinux),
            _ => Err(SeriesError::UnknownOsType(s.to_string())),
        }
    }
}
