//! SQL literal escaping.
//!
//! Values are inlined into the rendered statement, so every [`Value`] goes
//! through [`escape`] before it reaches the SQL string. Identifiers and
//! operators are never escaped: they are trusted, caller-supplied text.
//!
//! Text follows PostgreSQL's literal rules (the same ones `PQescapeLiteral`
//! applies): single quotes are doubled, and when the input contains a
//! backslash the literal switches to the `E'...'` form with backslashes
//! doubled, so the result is safe whatever `standard_conforming_strings` is
//! set to.

use crate::value::Value;
use std::fmt::Write;

/// Render a value as an injection-safe SQL literal.
pub fn escape(value: &Value) -> String {
    let mut out = String::new();
    write_escaped(&mut out, value);
    out
}

/// Render a string as a quoted SQL text literal.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    write_text(&mut out, s);
    out
}

/// Append the escaped form of `value` to `out`.
pub(crate) fn write_escaped(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Numeric(digits) => write_numeric(out, digits),
        Value::Float(f) => write_float(out, *f),
        Value::Text(s) => write_text(out, s),
        Value::Timestamp(ts) => {
            let _ = write!(out, "'{}'", ts.format("%Y-%m-%d %H:%M:%S%.f"));
        }
        Value::TimestampTz(ts) => {
            let _ = write!(out, "'{}+00:00'", ts.format("%Y-%m-%d %H:%M:%S%.f"));
        }
        Value::Uuid(id) => {
            let _ = write!(out, "'{}'", id.hyphenated());
        }
        Value::Json(doc) => write_text(out, &doc.to_string()),
        Value::List(items) => write_list(out, items),
    }
}

/// Bare decimal integer, or a quoted text literal when `digits` is not one.
fn write_numeric(out: &mut String, digits: &str) {
    let unsigned = digits.strip_prefix('-').unwrap_or(digits);
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        out.push_str(digits);
    } else {
        write_text(out, digits);
    }
}

fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("'NaN'");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "'Infinity'" } else { "'-Infinity'" });
    } else {
        let _ = write!(out, "{f}");
    }
}

fn write_text(out: &mut String, s: &str) {
    let has_backslash = s.contains('\\');
    if has_backslash {
        out.push('E');
    }
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            // PostgreSQL text cannot carry NUL
            '\0' => {}
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn write_list(out: &mut String, items: &[Value]) {
    out.push('(');
    if items.is_empty() {
        out.push_str("NULL");
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_escaped(out, item);
    }
    out.push(')');
}
