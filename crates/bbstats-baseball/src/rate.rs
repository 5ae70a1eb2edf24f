// Rate-stat helpers.
//
// Rates are plain `f64` quotients. A zero denominator yields NaN or
// Infinity and that value is kept as-is in memory; only at serialization
// time is a non-finite rate written as JSON `null`.

use serde::Serializer;

/// `num / den` with no zero guard.
#[inline]
pub fn ratio(num: impl Into<f64>, den: impl Into<f64>) -> f64 {
    num.into() / den.into()
}

/// Serde `serialize_with` adapter: finite rates as numbers, anything else as
/// `null`.
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Line {
        #[serde(serialize_with = "serialize")]
        avg: f64,
    }

    #[test]
    fn zero_denominators_are_not_guarded() {
        assert!(ratio(0u32, 0u32).is_nan());
        assert_eq!(ratio(1u32, 0u32), f64::INFINITY);
        assert_eq!(ratio(1u32, 4u32), 0.25);
    }

    #[test]
    fn non_finite_serializes_as_null() {
        let json = serde_json::to_string(&Line { avg: f64::NAN }).unwrap();
        assert_eq!(json, r#"{"avg":null}"#);
        let json = serde_json::to_string(&Line { avg: f64::INFINITY }).unwrap();
        assert_eq!(json, r#"{"avg":null}"#);
        let json = serde_json::to_string(&Line { avg: 0.5 }).unwrap();
        assert_eq!(json, r#"{"avg":0.5}"#);
    }
}
