//! Value formatting for interpolation.
//!
//! Formatting is keyed on the name of the final path segment and the runtime
//! shape of the value:
//!
//! | Final segment contains | Value | Output |
//! |------------------------|-------|--------|
//! | `date` | RFC 3339 timestamp or `YYYY-MM-DD` string | `1/15/2024` |
//! | `price` or `amount` | number or numeric string | `$1,234.50` |
//! | anything | string / number / bool | literal text |
//! | anything | array / object | compact JSON |
//! | anything | null or missing | empty string |
//!
//! Name matching is ASCII case-insensitive, so `createdDate` and `unitPrice`
//! qualify. When a special case cannot handle the value, formatting falls
//! back to the generic rules instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Number, Value};
use thiserror::Error;
use tracing::trace;

/// Why a special-case formatter declined a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The value is not a date string in a recognized form.
    #[error("not a date: {0}")]
    NotADate(String),

    /// The value is neither a finite number nor a numeric string.
    #[error("not numeric: {0}")]
    NotNumeric(String),
}

/// Formats a resolved value for output. `path` is the path the value was
/// resolved from; only its final segment is consulted.
///
/// ```rust
/// use serde_json::json;
/// use stencil::format;
///
/// assert_eq!(format("order.price", Some(&json!(1234.5))), "$1,234.50");
/// assert_eq!(format("shipDate", Some(&json!("2024-01-15"))), "1/15/2024");
/// assert_eq!(format("count", Some(&json!(3))), "3");
/// assert_eq!(format("missing", None), "");
/// ```
pub fn format(path: &str, value: Option<&Value>) -> String {
    let value = match value {
        None | Some(Value::Null) => return String::new(),
        Some(value) => value,
    };

    let field = path.rsplit('.').next().unwrap_or(path).to_ascii_lowercase();

    if field.contains("date") {
        match format_date(value) {
            Ok(date) => return date,
            Err(err) => trace!(path, %err, "date formatting skipped"),
        }
    }

    if field.contains("price") || field.contains("amount") {
        match format_currency(value) {
            Ok(currency) => return currency,
            Err(err) => trace!(path, %err, "currency formatting skipped"),
        }
    }

    coerce(value)
}

/// Generic string coercion used when no special case applies.
pub fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Integers print as-is; floats use the shortest round-trip form without a
/// trailing `.0`.
fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Formats a date-like string as an en-US calendar date (`M/D/YYYY`).
///
/// Timestamps keep the calendar date of their own UTC offset.
pub fn format_date(value: &Value) -> Result<String, FormatError> {
    let Value::String(text) = value else {
        return Err(FormatError::NotADate(coerce(value)));
    };
    let date = parse_date(text.trim()).ok_or_else(|| FormatError::NotADate(text.clone()))?;
    Ok(date.format("%-m/%-d/%Y").to_string())
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    if let Ok(datetime) = text.parse::<NaiveDateTime>() {
        return Some(datetime.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Formats a numeric value as US dollars with two fraction digits,
/// rounding half away from zero.
pub fn format_currency(value: &Value) -> Result<String, FormatError> {
    let amount = coerce_number(value)?;
    let (whole, cents) = round_to_cents(amount.abs());
    let sign = if amount < 0.0 { "-" } else { "" };
    Ok(format!("{sign}${}.{cents}", group_thousands(&whole)))
}

fn coerce_number(value: &Value) -> Result<f64, FormatError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| FormatError::NotNumeric(coerce(value)))
}

/// Rounds a non-negative amount to cents using its shortest decimal
/// representation, returning the whole and two-digit fractional parts.
fn round_to_cents(amount: f64) -> (String, String) {
    let repr = amount.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(2).is_some_and(|&d| d >= b'5') {
        increment(&mut digits);
    }

    let split = digits.len() - 2;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    (render(&digits[..split]), render(&digits[split..]))
}

fn increment(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null() {
        assert_eq!(format("a", None), "");
        assert_eq!(format("a", Some(&Value::Null)), "");
        assert_eq!(format("price", Some(&Value::Null)), "");
    }

    #[test]
    fn test_generic_scalars() {
        assert_eq!(format("name", Some(&json!("Ada"))), "Ada");
        assert_eq!(format("ok", Some(&json!(true))), "true");
        assert_eq!(format("ok", Some(&json!(false))), "false");
        assert_eq!(format("n", Some(&json!(42))), "42");
        assert_eq!(format("n", Some(&json!(-7))), "-7");
        assert_eq!(format("n", Some(&json!(2.5))), "2.5");
        assert_eq!(format("n", Some(&json!(3.0))), "3");
    }

    #[test]
    fn test_containers_render_as_json() {
        assert_eq!(format("tags", Some(&json!(["a", "b"]))), r#"["a","b"]"#);
        assert_eq!(format("obj", Some(&json!({"k": 1}))), r#"{"k":1}"#);
    }

    #[test]
    fn test_currency() {
        assert_eq!(format("price", Some(&json!(9.5))), "$9.50");
        assert_eq!(format("price", Some(&json!(0))), "$0.00");
        assert_eq!(format("totalAmount", Some(&json!(1234567.891))), "$1,234,567.89");
        assert_eq!(format("item.unitPrice", Some(&json!(1000))), "$1,000.00");
        assert_eq!(format("refund_amount", Some(&json!(-12.3))), "-$12.30");
    }

    #[test]
    fn test_currency_rounds_half_away_from_zero() {
        assert_eq!(format("price", Some(&json!(1.005))), "$1.01");
        assert_eq!(format("price", Some(&json!(2.675))), "$2.68");
        assert_eq!(format("price", Some(&json!(9.994))), "$9.99");
        assert_eq!(format("price", Some(&json!(9.995))), "$10.00");
        assert_eq!(format("price", Some(&json!(999.999))), "$1,000.00");
        assert_eq!(format("price", Some(&json!(-0.125))), "-$0.13");
    }

    #[test]
    fn test_currency_from_numeric_string() {
        assert_eq!(format("price", Some(&json!("19.9"))), "$19.90");
        assert_eq!(format("price", Some(&json!(" 5 "))), "$5.00");
    }

    #[test]
    fn test_currency_falls_back_when_not_numeric() {
        assert_eq!(format("price", Some(&json!("call us"))), "call us");
        assert_eq!(format("price", Some(&json!("inf"))), "inf");
        assert_eq!(format("amount", Some(&json!(true))), "true");
        assert_eq!(format("amount", Some(&json!([1]))), "[1]");
    }

    #[test]
    fn test_dates() {
        assert_eq!(format("date", Some(&json!("2024-01-15"))), "1/15/2024");
        assert_eq!(
            format("createdDate", Some(&json!("2023-11-05T22:10:00Z"))),
            "11/5/2023"
        );
        assert_eq!(
            format("meta.update_date", Some(&json!("2023-11-05T23:30:00-05:00"))),
            "11/5/2023"
        );
        assert_eq!(
            format("dueDate", Some(&json!("2025-03-09T08:00:00"))),
            "3/9/2025"
        );
    }

    #[test]
    fn test_date_falls_back_when_not_date_like() {
        assert_eq!(format("date", Some(&json!("tomorrow"))), "tomorrow");
        assert_eq!(format("date", Some(&json!(1700000000))), "1700000000");
    }

    #[test]
    fn test_date_like_value_on_other_field_is_untouched() {
        assert_eq!(format("created", Some(&json!("2024-01-15"))), "2024-01-15");
    }

    #[test]
    fn test_price_date_prefers_date_then_currency() {
        assert_eq!(format("priceDate", Some(&json!("2024-02-01"))), "2/1/2024");
        assert_eq!(format("priceDate", Some(&json!(4))), "$4.00");
    }

    #[test]
    fn test_format_errors() {
        assert_eq!(
            format_date(&json!("soon")),
            Err(FormatError::NotADate("soon".to_string()))
        );
        assert_eq!(
            format_currency(&json!("n/a")),
            Err(FormatError::NotNumeric("n/a".to_string()))
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("12345678"), "12,345,678");
    }
}
