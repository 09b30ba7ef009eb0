//! Encodes constant values as wire literals.

use chrono::Timelike;
use itertools::Itertools;
use querywire_types::{DateTimeKind, DateTimeValue, Decimal, TypeRef, Value};
use std::fmt::Write;

/// Renders a constant value. Every `Value` has a wire form, so this cannot fail.
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Double(d) => format_double(*d),
        Value::Decimal(d) => format_decimal(d),
        Value::String(s) => quote(s),
        Value::Char(c) => quote(c.encode_utf8(&mut [0; 4])),
        Value::DateTime(dt) => format_date_time(dt),
        Value::Guid(g) => format!("guid'{}'", g.hyphenated()),
        Value::Enum { def, raw } => quote(&def.format(*raw)),
        Value::Type(ty) => type_literal(ty),
        Value::Sequence(items) => format!("[{}]", items.iter().map(encode_value).join(",")),
    }
}

/// Single-quotes `s`, doubling embedded quotes.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// `5.0` -> `5.0`, `5.5` -> `5.5`, `1e21` -> `1000000000000000000000.0`.
pub fn format_double(d: f64) -> String {
    if d.is_nan() {
        return "NaN".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let mut text = d.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

pub fn format_float(f: f32) -> String {
    if f.is_nan() {
        return "NaNf".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INFf" } else { "-INFf" }.to_string();
    }
    format!("{}f", f)
}

pub fn format_decimal(d: &Decimal) -> String {
    format!("{}m", d)
}

pub fn format_date_time(dt: &DateTimeValue) -> String {
    let mut text = format!("datetime'{}", dt.value.format("%Y-%m-%dT%H:%M:%S"));
    // 100ns ticks
    let ticks = (dt.value.nanosecond() % 1_000_000_000) / 100;
    if ticks > 0 {
        let _ = write!(text, ".{:07}", ticks);
    }
    match dt.kind {
        DateTimeKind::Unspecified => {}
        DateTimeKind::Utc => text.push('Z'),
        DateTimeKind::Offset(seconds) => {
            let sign = if seconds < 0 { '-' } else { '+' };
            let minutes = seconds.unsigned_abs() / 60;
            let _ = write!(text, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60);
        }
    }
    text.push('\'');
    text
}

/// `t'Name'` using the externalized type name.
pub fn type_literal(ty: &TypeRef) -> String {
    format!("t{}", quote(&ty.wire_name()))
}
