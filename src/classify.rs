// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Series to OS family classification
//!
//! Classification runs an exact-match table first and falls back to an
//! ordered list of pattern rules. Each series resolves to exactly one family.

use std::collections::HashMap;

use tracing::debug;

use crate::OsType;
use crate::tables::{
    CENTOS_SERIES, GENERIC_LINUX_SERIES, KUBERNETES_SERIES, MACOS_SERIES, OPENSUSE_SERIES,
    UBUNTU_SERIES, WINDOWS_NANO_VERSIONS, WINDOWS_VERSIONS, windows_series,
};

/// A pattern rule consulted after the exact-match table
pub struct PatternRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub os: OsType,
}

/// Pattern rules in evaluation order
pub const PATTERN_RULES: &[PatternRule] = &[PatternRule {
    name: "windows-prefix",
    matches: is_windows_style,
    os: OsType::Windows,
}];

fn is_windows_style(series: &str) -> bool {
    series.len() > "win".len() && series.starts_with("win")
}

/// Build the exact-match table from the static data
///
/// Ubuntu codenames learned from distro-info are added on top of this by the
/// registry.
#[must_use]
pub fn static_classifier() -> HashMap<String, OsType> {
    let mut table = HashMap::new();
    for &(series, _) in UBUNTU_SERIES {
        table.insert(series.to_string(), OsType::Ubuntu);
    }
    for series in windows_series() {
        table.insert(series.to_string(), OsType::Windows);
    }
    for &series in MACOS_SERIES {
        table.insert(series.to_string(), OsType::Osx);
    }
    for &(series, _) in CENTOS_SERIES {
        table.insert(series.to_string(), OsType::CentOs);
    }
    for &(series, _) in OPENSUSE_SERIES {
        table.insert(series.to_string(), OsType::OpenSuse);
    }
    for &(series, _) in KUBERNETES_SERIES {
        table.insert(series.to_string(), OsType::Kubernetes);
    }
    table.insert(GENERIC_LINUX_SERIES.to_string(), OsType::GenericLinux);
    table
}

/// Classify a series against an exact-match table, then the pattern rules
///
/// Returns `None` when nothing matches. Empty input never matches.
#[must_use]
pub fn classify(exact: &HashMap<String, OsType>, series: &str) -> Option<OsType> {
    if series.is_empty() {
        return None;
    }
    if let Some(os) = exact.get(series) {
        return Some(*os);
    }
    let rule = PATTERN_RULES.iter().find(|rule| (rule.matches)(series))?;
    debug!(rule = rule.name, series, os = %rule.os, "classified by pattern rule");
    Some(rule.os)
}

/// Check whether a series follows the Windows Nano naming convention
///
/// True for `win<release>nano` tags such as "win2016nano". Never fails:
/// empty, unknown and non-Nano Windows series are all `false`.
///
/// # Examples
/// ```
/// use osseries::classify::is_windows_nano;
/// assert!(is_windows_nano("win2016nano"));
/// assert!(!is_windows_nano("win2016"));
/// assert!(!is_windows_nano(""));
/// ```
#[must_use]
pub fn is_windows_nano(series: &str) -> bool {
    series
        .strip_prefix("win")
        .and_then(|rest| rest.strip_suffix("nano"))
        .is_some_and(|release| !release.is_empty())
}

/// Find the series tag for a Windows product name
///
/// Product names carry an edition suffix ("Windows Server 2012 R2
/// Datacenter"), so the first table entry that is a prefix of `name` wins.
///
/// # Examples
/// ```
/// use osseries::classify::windows_series_from_product_name;
/// assert_eq!(
///     windows_series_from_product_name("Windows Server 2012 R2 Datacenter"),
///     Some("win2012r2")
/// );
/// assert_eq!(windows_series_from_product_name("Windows 8.1 Pro"), Some("win81"));
/// assert_eq!(windows_series_from_product_name("ReactOS"), None);
/// ```
#[must_use]
pub fn windows_series_from_product_name(name: &str) -> Option<&'static str> {
    match_product_name(WINDOWS_VERSIONS, name)
}

/// Same as [`windows_series_from_product_name`] for Nano installs
#[must_use]
pub fn windows_nano_series_from_product_name(name: &str) -> Option<&'static str> {
    match_product_name(WINDOWS_NANO_VERSIONS, name)
}

fn match_product_name(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    let name = name.trim();
    table
        .iter()
        .find(|(product, _)| name.starts_with(product))
        .map(|&(_, series)| series)
}
