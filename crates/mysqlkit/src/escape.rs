//! Literal escaping for generated SQL.
//!
//! This is the only injection defense the query builder has: every value embedded in a
//! statement goes through [`write_literal`]. The output follows the MySQL client
//! convention: strings are single-quoted with backslash escapes, numbers are unquoted.
//!
//! Identifiers are never escaped here.

use crate::error::{DbError, DbResult};
use crate::value::Scalar;

/// Escape a scalar as a SQL literal.
///
/// ```
/// use mysqlkit::escape::escape_literal;
///
/// assert_eq!(escape_literal(&"it's".into()).unwrap(), r"'it\'s'");
/// assert_eq!(escape_literal(&42.into()).unwrap(), "42");
/// ```
pub fn escape_literal(value: &Scalar) -> DbResult<String> {
    let mut out = String::new();
    write_literal(&mut out, value)?;
    Ok(out)
}

/// Escape a string as a quoted SQL string literal.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    write_string(&mut out, s);
    out
}

/// Build the literal used on the right-hand side of `LIKE` for a substring match.
///
/// Backslashes in `needle` are doubled before wrapping it in `%...%`, then the whole
/// pattern is escaped as a string literal.
pub fn escape_like_contains(needle: &str) -> String {
    let pattern = format!("%{}%", needle.replace('\\', "\\\\"));
    escape_string(&pattern)
}

pub(crate) fn write_literal(out: &mut String, value: &Scalar) -> DbResult<()> {
    match value {
        Scalar::Int(i) => out.push_str(&i.to_string()),
        Scalar::UInt(u) => out.push_str(&u.to_string()),
        Scalar::Float(f) => {
            if !f.is_finite() {
                return Err(DbError::condition_type(format!(
                    "non-finite float {f} cannot be rendered as a SQL literal"
                )));
            }
            out.push_str(&f.to_string());
        }
        Scalar::Text(s) => write_string(out, s),
    }
    Ok(())
}

fn write_string(out: &mut String, s: &str) {
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\0' => out.push_str("\\0"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{1a}' => out.push_str("\\Z"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('\'');
}
