//! Scalar leaf kinds and their populate-time conversions.
//!
//! Every leaf in the document tree carries one of these kinds. A leaf is
//! populated exactly once, when the build driver hands it the element's raw
//! text; conversion failures abort the build of that subtree. Reference
//! resolution (alias, interface, port) happens later, at read time, and is
//! handled in [`crate::resolve`].

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Conversion failure raised while populating a scalar leaf.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid integer value: {0:?}")]
    InvalidInteger(String),
    #[error("invalid timestamp value: {0:?}")]
    InvalidTimestamp(String),
    #[error("invalid port string: {0:?}")]
    InvalidPort(String),
}

/// The closed set of scalar leaf kinds.
///
/// `Text`, `Integer`, `Timestamp`, and `Flag` are plain values. The remaining
/// kinds store text but resolve it against the rest of the document when
/// read: `AliasRef` substitutes a matching alias definition, `RuleTarget`
/// tries interfaces first and aliases second, `InterfaceList` resolves a
/// comma-separated interface list, and `Port` validates its shape eagerly
/// before behaving like `AliasRef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Integer,
    Timestamp,
    Flag,
    AliasRef,
    RuleTarget,
    InterfaceList,
    Port,
}

/// A converted scalar payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

/// Convert one raw textual payload according to the leaf kind.
///
/// Returns `None` for [`ScalarKind::Flag`]: flags ignore their payload, the
/// element's presence alone means true.
pub fn convert(kind: ScalarKind, raw: &str) -> Result<Option<ScalarValue>, FormatError> {
    match kind {
        ScalarKind::Flag => Ok(None),
        ScalarKind::Text | ScalarKind::AliasRef | ScalarKind::RuleTarget | ScalarKind::InterfaceList => {
            Ok(Some(ScalarValue::Text(raw.to_string())))
        }
        ScalarKind::Port => {
            if !is_valid_port_string(raw) {
                return Err(FormatError::InvalidPort(raw.to_string()));
            }
            Ok(Some(ScalarValue::Text(raw.to_string())))
        }
        ScalarKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(|n| Some(ScalarValue::Integer(n)))
            .map_err(|_| FormatError::InvalidInteger(raw.to_string())),
        ScalarKind::Timestamp => parse_epoch(raw)
            .map(|ts| Some(ScalarValue::Timestamp(ts)))
            .ok_or_else(|| FormatError::InvalidTimestamp(raw.to_string())),
    }
}

/// Parse a Unix epoch, fractional seconds allowed, into a UTC instant.
fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    let epoch = raw.trim().parse::<f64>().ok()?;
    if !epoch.is_finite() {
        return None;
    }
    let secs = epoch.floor();
    let nanos = ((epoch - secs) * 1_000_000_000.0).round() as u32;
    DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
}

/// Check a port field against the accepted shapes: a bare decimal port, a
/// decimal range joined by `:` or `-`, or an alphanumeric/underscore token
/// (a possible alias name).
pub fn is_valid_port_string(s: &str) -> bool {
    if let Some((lo, hi)) = s.split_once([':', '-']) {
        return is_decimal(lo) && is_decimal(hi);
    }
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{convert, FormatError, ScalarKind, ScalarValue};

    #[test]
    fn text_is_identity() {
        assert_eq!(
            convert(ScalarKind::Text, "em0").expect("convert"),
            Some(ScalarValue::Text("em0".to_string()))
        );
    }

    #[test]
    fn integer_parses_decimal_text() {
        assert_eq!(
            convert(ScalarKind::Integer, "1500").expect("convert"),
            Some(ScalarValue::Integer(1500))
        );
    }

    #[test]
    fn integer_rejects_non_numeric_text() {
        assert_eq!(
            convert(ScalarKind::Integer, "fast"),
            Err(FormatError::InvalidInteger("fast".to_string()))
        );
    }

    #[test]
    fn timestamp_parses_whole_epoch_seconds() {
        let expected = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            convert(ScalarKind::Timestamp, "1609459200").expect("convert"),
            Some(ScalarValue::Timestamp(expected))
        );
    }

    #[test]
    fn timestamp_accepts_fractional_seconds() {
        let Some(ScalarValue::Timestamp(ts)) =
            convert(ScalarKind::Timestamp, "1609459200.5").expect("convert")
        else {
            panic!("expected timestamp value");
        };
        assert_eq!(ts.timestamp(), 1609459200);
        assert_eq!(ts.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn timestamp_rejects_non_numeric_text() {
        assert_eq!(
            convert(ScalarKind::Timestamp, "yesterday"),
            Err(FormatError::InvalidTimestamp("yesterday".to_string()))
        );
    }

    #[test]
    fn flag_discards_payload() {
        assert_eq!(convert(ScalarKind::Flag, "anything").expect("convert"), None);
        assert_eq!(convert(ScalarKind::Flag, "").expect("convert"), None);
    }

    #[test]
    fn port_accepts_valid_shapes() {
        for raw in ["80", "80:443", "80-443", "HTTP", "ssh_alt", "0"] {
            assert!(
                convert(ScalarKind::Port, raw).is_ok(),
                "expected {raw:?} to be accepted"
            );
        }
    }

    #[test]
    fn port_rejects_invalid_shapes() {
        for raw in ["80,443", "abc def", "", "80:", ":443", "80:443-500", "my-alias"] {
            assert_eq!(
                convert(ScalarKind::Port, raw),
                Err(FormatError::InvalidPort(raw.to_string())),
                "expected {raw:?} to be rejected"
            );
        }
    }
}
