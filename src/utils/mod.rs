//! Small formatting and lookup helpers shared by the CLI commands.

use strsim::levenshtein;

/// Maximum edit distance, as a percentage of the target length, for a name to
/// count as similar.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Human-readable byte count.
///
/// Below 1 KiB the exact count is shown; above that one decimal of KB or MB,
/// with a trailing `.0` dropped.
///
/// ```
/// use asset_report::utils::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(2 * 1024 * 1024), "2 MB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;

    if bytes < KIB {
        return format!("{bytes} B");
    }
    let (value, unit) = if bytes < MIB {
        (bytes as f64 / KIB as f64, "KB")
    } else {
        (bytes as f64 / MIB as f64, "MB")
    };
    let rounded = format!("{value:.1}");
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{trimmed} {unit}")
}

/// Up to three names close to `target`, closest first.
pub fn find_similar<'a, I>(target: &str, available: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(&str, usize)> =
        available.into_iter().map(|name| (name, levenshtein(target, name))).collect();

    scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(name, _)| name.to_string())
        .collect()
}
