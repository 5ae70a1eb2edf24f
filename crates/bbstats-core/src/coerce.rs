// Lenient numeric coercion for counting fields on stored records.
//
// Records arrive from storage or request bodies with counting fields that may
// be missing, null, numeric strings, or garbage. Every such field is read
// through `parse_count` at deserialization time and through `or_zero` at the
// point of use, so a bad leaf value never fails a whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a raw JSON leaf into a non-negative count.
///
/// Accepts finite non-negative numbers (fractional parts are truncated) and
/// strings holding such a number. Returns `None` for null, negative or
/// non-finite numbers, booleans, unparsable strings, arrays, and objects.
pub fn parse_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return u32::try_from(u).ok();
            }
            n.as_f64().and_then(count_from_f64)
        }
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(count_from_f64),
        _ => None,
    }
}

fn count_from_f64(v: f64) -> Option<u32> {
    if !v.is_finite() || v < 0.0 || v > u32::MAX as f64 {
        return None;
    }
    Some(v.trunc() as u32)
}

/// Read a coerced count, treating anything missing as zero.
#[inline]
pub fn or_zero(count: Option<u32>) -> u32 {
    count.unwrap_or(0)
}

/// Sum counts, pinning at `u32::MAX` instead of overflowing.
pub fn saturating_total<I>(counts: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    counts.into_iter().fold(0, u32::saturating_add)
}

/// Serde adapter for `Option<u32>` count fields. Use together with
/// `#[serde(default)]` so absent keys also land as `None`.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_count))
}

/// Serde adapter for identifier-like fields (`playerId`, `order`) that must
/// always hold a value. Anything unreadable lands as `0`.
pub fn lenient_count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_count(deserializer).map(or_zero)
}
