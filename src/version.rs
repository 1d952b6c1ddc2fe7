// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Ubuntu release version strings
//!
//! distro-info writes LTS releases as "18.04 LTS" and point releases as
//! "18.04.5 LTS". These helpers normalise and order such strings.

use std::cmp::Ordering;

/// Suffix distro-info appends to long-term-support versions
pub const LTS_SUFFIX: &str = " LTS";

/// Split a raw distro-info version into the bare version and its LTS flag
///
/// # Examples
/// ```
/// use osseries::version::split_lts_suffix;
/// assert_eq!(split_lts_suffix("18.04 LTS"), ("18.04", true));
/// assert_eq!(split_lts_suffix("19.10"), ("19.10", false));
/// ```
#[must_use]
pub fn split_lts_suffix(raw: &str) -> (&str, bool) {
    let raw = raw.trim();
    match raw.strip_suffix(LTS_SUFFIX) {
        Some(version) => (version.trim_end(), true),
        None => (raw, false),
    }
}

/// Compare two Ubuntu version strings numerically
///
/// Components are compared as numbers so "12.04" < "12.10" < "18.04".
/// Missing components count as zero ("18.04" == "18.04.0"). Strings that do
/// not parse as numbers (Windows tags, "opensuse42") sort after numeric ones
/// and among themselves lexicographically.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use osseries::version::compare_versions;
/// assert_eq!(compare_versions("12.04", "12.10"), Ordering::Less);
/// assert_eq!(compare_versions("18.04 LTS", "18.04"), Ordering::Equal);
/// ```
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse_version = |v: &str| -> Option<Vec<u32>> {
        let (base, _) = split_lts_suffix(v);
        base.split('.').map(|part| part.parse::<u32>().ok()).collect()
    };

    match (parse_version(a), parse_version(b)) {
        (Some(a_parts), Some(b_parts)) => {
            let max_len = a_parts.len().max(b_parts.len());
            for i in 0..max_len {
                let a_part = a_parts.get(i).unwrap_or(&0);
                let b_part = b_parts.get(i).unwrap_or(&0);
                match a_part.cmp(b_part) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            Ordering::Equal
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Extract the "YY.MM" release from a version, dropping any point release
///
/// # Examples
/// ```
/// use osseries::version::release_version;
/// assert_eq!(release_version("18.04.5 LTS"), Some("18.04".to_string()));
/// assert_eq!(release_version("19.10"), Some("19.10".to_string()));
/// assert_eq!(release_version("win2016"), None);
/// ```
#[must_use]
pub fn release_version(version: &str) -> Option<String> {
    let (base, _) = split_lts_suffix(version);
    let mut parts = base.split('.');
    let year = parts.next()?;
    let month = parts.next()?;
    if year.parse::<u32>().is_ok() && month.parse::<u32>().is_ok() {
        Some(format!("{year}.{month}"))
    } else {
        None
    }
}
