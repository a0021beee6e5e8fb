//! Timestamp normalization for provenance stamping.
//!
//! Input timestamps arrive as `YYYY-M-D HH:MM:SS` with optional zero padding
//! on month and day. The canonical form is ISO-ish `YYYY-MM-DDTHH:MM:SS`,
//! suitable for an `xsd:dateTime` literal.

use std::sync::LazyLock;

use regex::Regex;

static RE_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2}) (\d{2}:\d{2}:\d{2})$").unwrap());

/// Normalize a raw timestamp token into canonical `YYYY-MM-DDTHH:MM:SS` form.
///
/// Returns `None` for anything that does not match the expected pattern,
/// including empty input. Ingestion paths that require a timestamp skip the
/// whole record on `None`.
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    let caps = RE_TIMESTAMP.captures(raw.trim())?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    Some(format!("{}-{month:02}-{day:02}T{}", &caps[1], &caps[4]))
}
