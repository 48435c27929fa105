//! Attribute encoding and the lenient decoding policy.
//!
//! Optional attributes never fail a load: booleans, integers and floats that
//! are absent or unparsable fall back to `false`, `0` and `0.0`. Required
//! attributes (ids and type discriminators) are checked by the deserializer
//! and fail loudly instead.

/// Run of four backslashes that stands for a newline in note names.
pub const NOTE_NEWLINE: &str = r"\\\\";

/// Parses a boolean-like attribute.
///
/// `True`, `true` and `1` are true. Everything else, including absence, is
/// false.
///
/// # Examples
///
/// ```
/// # use pyut_xml::attr::secure_bool;
/// assert!(secure_bool(Some("True")));
/// assert!(!secure_bool(Some("yes")));
/// assert!(!secure_bool(None));
/// ```
pub fn secure_bool(value: Option<&str>) -> bool {
    matches!(value, Some("True" | "true" | "1"))
}

/// Parses an integer-like attribute, defaulting to 0.
///
/// Decimal strings such as `"12.0"` are truncated toward zero; some files
/// store message times that way.
pub fn secure_int(value: Option<&str>) -> i64 {
    let Some(value) = value.map(str::trim) else {
        return 0;
    };
    value
        .parse::<i64>()
        .ok()
        .or_else(|| {
            value
                .parse::<f64>()
                .ok()
                .filter(|float| float.is_finite())
                .map(|float| float.trunc() as i64)
        })
        .unwrap_or(0)
}

/// Parses a float attribute, defaulting to 0.0 for absent, unparsable or
/// non-finite values.
pub fn secure_float(value: Option<&str>) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|float| float.is_finite())
        .unwrap_or(0.0)
}

/// Formats a float so that whole numbers keep a fractional part (`10.0`).
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Formats a boolean as `True` or `False`.
pub fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Replaces each newline with [`NOTE_NEWLINE`].
pub fn escape_note(name: &str) -> String {
    name.replace('\n', NOTE_NEWLINE)
}

/// Replaces each [`NOTE_NEWLINE`] with a newline.
pub fn unescape_note(name: &str) -> String {
    name.replace(NOTE_NEWLINE, "\n")
}
