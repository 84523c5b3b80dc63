//! Default identifier and literal renderings.
//!
//! These are the vendor-agnostic renderings the [`DatabaseDialect`] hooks
//! fall back to. A vendor override that only decorates the default output
//! calls the matching function here and adds its own text.
//!
//! [`DatabaseDialect`]: crate::dialect::DatabaseDialect

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// How the target engine treats identifiers that are not quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierCasing {
    /// Unquoted identifiers keep their case.
    #[default]
    AsIs,
    /// Unquoted identifiers are folded to upper case.
    UppercaseWhenUnquoted,
}

/// Renders an identifier.
///
/// A quoted identifier is emitted verbatim between `quote` characters. The
/// casing policy only affects the unquoted path.
#[must_use]
pub fn identifier(name: &str, quote: char, casing: IdentifierCasing, quoted: bool) -> String {
    if quoted {
        return quote_identifier(name, quote);
    }
    match casing {
        IdentifierCasing::AsIs => name.to_string(),
        IdentifierCasing::UppercaseWhenUnquoted => name.to_uppercase(),
    }
}

/// Wraps `name` in `quote`, doubling any embedded quote character.
#[must_use]
pub fn quote_identifier(name: &str, quote: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push(quote);
    for c in name.chars() {
        if c == quote {
            out.push(quote);
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// Renders a single-quoted string literal.
#[must_use]
pub fn string(value: &str) -> String {
    // Escape single quotes by doubling them
    format!("'{}'", value.replace('\'', "''"))
}

/// Renders a single-quoted string literal for engines that also treat
/// backslash as an escape character.
#[must_use]
pub fn backslash_escaped_string(value: &str) -> String {
    string(&value.replace('\\', "\\\\"))
}

/// Renders a floating point literal.
///
/// Non-finite values become the quoted `'NaN'`, `'Infinity'` and
/// `'-Infinity'` spellings, which the target engines cast from text.
#[must_use]
pub fn float(value: f64) -> String {
    if value.is_nan() {
        String::from("'NaN'")
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            String::from("'Infinity'")
        } else {
            String::from("'-Infinity'")
        }
    } else {
        value.to_string()
    }
}

/// Renders a boolean literal.
#[must_use]
pub const fn boolean(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Renders a hex binary literal.
#[must_use]
pub fn binary(value: &[u8]) -> String {
    format!("X'{}'", hex(value))
}

/// Upper-case hex digits for `value`.
#[must_use]
pub fn hex(value: &[u8]) -> String {
    value.iter().fold(String::with_capacity(value.len() * 2), |mut out, byte| {
        let _ = write!(out, "{byte:02X}");
        out
    })
}

/// Renders `'YYYY-MM-DD'`.
#[must_use]
pub fn date(value: NaiveDate) -> String {
    format!("'{}'", value.format("%Y-%m-%d"))
}

/// Renders `'HH:MM:SS[.fraction]'`.
#[must_use]
pub fn time(value: NaiveTime) -> String {
    let mut out = format!("'{}", value.format("%H:%M:%S"));
    push_fraction(&mut out, value.nanosecond());
    out.push('\'');
    out
}

/// Renders a zoned time of day as produced upstream.
#[must_use]
pub fn time_with_time_zone(value: &str) -> String {
    string(value)
}

/// Renders `'YYYY-MM-DDTHH:MM:SS[.fraction]'`.
#[must_use]
pub fn date_time(value: NaiveDateTime) -> String {
    let mut out = format!("'{}", value.format("%Y-%m-%dT%H:%M:%S"));
    push_fraction(&mut out, value.nanosecond());
    out.push('\'');
    out
}

/// Renders `'YYYY-MM-DDTHH:MM:SS[.fraction]+HH:MM'`.
#[must_use]
pub fn timestamp(value: &DateTime<FixedOffset>) -> String {
    let mut out = format!("'{}", value.format("%Y-%m-%dT%H:%M:%S"));
    push_fraction(&mut out, value.nanosecond());
    let _ = write!(out, "{}'", value.format("%:z"));
    out
}

/// Renders a zoned timestamp as produced upstream.
#[must_use]
pub fn timestamp_with_time_zone(value: &str) -> String {
    string(value)
}

/// Appends `.fraction` with trailing zeros trimmed; nothing when zero.
fn push_fraction(out: &mut String, nanos: u32) {
    // leap seconds carry nanos >= 1e9
    let nanos = nanos % 1_000_000_000;
    if nanos == 0 {
        return;
    }
    let digits = format!("{nanos:09}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}
