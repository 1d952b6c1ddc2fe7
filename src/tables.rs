// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Static compiled-in series data
//!
//! These values are current as of the last update of this file. On Ubuntu
//! hosts the distro-info feed extends them with newer releases; elsewhere
//! they are the whole picture.

/// Default location of the Ubuntu distro-info feed
pub const DISTRO_INFO_PATH: &str = "/usr/share/distro-info/ubuntu.csv";

/// Environment variable overriding [`DISTRO_INFO_PATH`]
pub const DISTRO_INFO_ENV: &str = "OSSERIES_DISTRO_INFO";

/// Baseline latest LTS used when nothing overrides it
pub const DEFAULT_SUPPORTED_LTS: &str = "bionic";

/// LTS releases inside the supported window, oldest first
pub const SUPPORTED_LTS: [&str; 3] = ["trusty", "xenial", "bionic"];

pub const GENERIC_LINUX_SERIES: &str = "genericlinux";
pub const GENERIC_LINUX_VERSION: &str = "genericlinux";

/// Ubuntu codename to release version
pub const UBUNTU_SERIES: &[(&str, &str)] = &[
    ("precise", "12.04"),
    ("quantal", "12.10"),
    ("raring", "13.04"),
    ("saucy", "13.10"),
    ("trusty", "14.04"),
    ("utopic", "14.10"),
    ("vivid", "15.04"),
    ("wily", "15.10"),
    ("xenial", "16.04"),
    ("yakkety", "16.10"),
    ("zesty", "17.04"),
    ("artful", "17.10"),
    ("bionic", "18.04"),
    ("cosmic", "18.10"),
    ("disco", "19.04"),
    ("eoan", "19.10"),
];

/// Windows product names as reported by `(gwmi Win32_OperatingSystem).Name`,
/// mapped to their series tag
///
/// Matching is by prefix, so longer names must come before any name that is
/// a prefix of them ("Windows Server 2012 R2" before "Windows Server 2012").
pub const WINDOWS_VERSIONS: &[(&str, &str)] = &[
    ("Hyper-V Server 2012 R2", "win2012hvr2"),
    ("Hyper-V Server 2012", "win2012hv"),
    ("Windows Server 2008 R2", "win2008r2"),
    ("Windows Server 2012 R2", "win2012r2"),
    ("Windows Server 2012", "win2012"),
    ("Hyper-V Server 2016", "win2016hv"),
    ("Windows Server 2016", "win2016"),
    ("Windows Server 2019", "win2019"),
    ("Windows Storage Server 2012 R2", "win2012r2"),
    ("Windows Storage Server 2012", "win2012"),
    ("Windows Storage Server 2016", "win2016"),
    ("Windows 7", "win7"),
    ("Windows 8.1", "win81"),
    ("Windows 8", "win8"),
    ("Windows 10", "win10"),
];

/// Nano installs report the same product name as the full edition
pub const WINDOWS_NANO_VERSIONS: &[(&str, &str)] = &[("Windows Server 2016", "win2016nano")];

/// macOS codenames, classification only
pub const MACOS_SERIES: &[&str] = &[
    "gorilla",
    "snowleopard",
    "lion",
    "mountainlion",
    "mavericks",
    "yosemite",
    "elcapitan",
    "sierra",
    "highsierra",
    "mojave",
];

pub const CENTOS_SERIES: &[(&str, &str)] = &[("centos7", "centos7")];

pub const OPENSUSE_SERIES: &[(&str, &str)] = &[("opensuseleap", "opensuse42")];

pub const KUBERNETES_SERIES: &[(&str, &str)] = &[("kubernetes", "kubernetes")];

/// Every distinct Windows series tag, Nano included, in table order
///
/// Several product names share a tag, and not always on adjacent rows.
#[must_use]
pub fn windows_series() -> Vec<&'static str> {
    let mut series: Vec<&'static str> = Vec::new();
    for &(_, tag) in WINDOWS_VERSIONS.iter().chain(WINDOWS_NANO_VERSIONS) {
        if !series.contains(&tag) {
            series.push(tag);
        }
    }
    series
}

/// The compiled-in series to version table
///
/// Windows tags use the tag itself as the version.
#[must_use]
pub fn static_series_versions() -> Vec<(&'static str, &'static str)> {
    let mut table: Vec<(&'static str, &'static str)> = UBUNTU_SERIES.to_vec();
    table.extend(windows_series().into_iter().map(|series| (series, series)));
    table.extend_from_slice(CENTOS_SERIES);
    table.extend_from_slice(OPENSUSE_SERIES);
    table.extend_from_slice(KUBERNETES_SERIES);
    table.push((GENERIC_LINUX_SERIES, GENERIC_LINUX_VERSION));
    table
}
