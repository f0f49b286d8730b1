//! Number formatting for result views
//!
//! Figures render the way a browser would print them: integral values
//! without a trailing `.0`, revenue with thousands separators.

use serde_json::Value;

/// Shortest form of a number, integral values without a fraction
#[must_use]
pub fn plain_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// En-US grouping with at most three fraction digits (`1250340` -> `1,250,340`)
#[must_use]
pub fn grouped_number(value: f64) -> String {
    if !value.is_finite() {
        return plain_number(value);
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Fixed fraction digits (`24.99` with 2 -> `24.99`, `21.2` -> `21.20`)
#[must_use]
pub fn fixed(value: f64, digits: usize) -> String {
    format!("{value:.digits$}")
}

/// Render one JSON value as a flat text cell
///
/// Null is empty, arrays are comma-joined, objects fall back to JSON.
#[must_use]
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_u64() || n.is_i64() {
                n.to_string()
            } else {
                n.as_f64().map_or_else(|| n.to_string(), plain_number)
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
