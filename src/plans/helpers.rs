//! Meal Plan Business Logic Helpers

use super::models::MealType;
use crate::error::{AppError, Result};
use serde_json::Value;

/// Prefix of every generated plan identifier
pub const PLAN_ID_PREFIX: &str = "plan-";

/// Formats the identifier for the `seq`-th plan, e.g. `plan-3`.
pub fn plan_id(seq: u64) -> String {
    format!("{PLAN_ID_PREFIX}{seq}")
}

/// Returns the provided name, or a placeholder derived from the plan id
/// when it is missing or empty.
pub fn plan_name_or_default(name: Option<String>, id: &str) -> String {
    name.filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("Meal Plan {id}"))
}

/// Parses the meal type of a request; absent values are invalid.
pub fn parse_meal_type(raw: Option<&str>) -> Result<MealType> {
    raw.ok_or(AppError::InvalidMealType)?.parse()
}

/// Resolves the serving multiplier of a request.
///
/// Falsy values (absent, `null`, `false`, `0`, `""`) mean "one serving".
/// Numbers and numeric strings are accepted when positive; anything else is
/// rejected.
pub fn serving_multiplier(raw: Option<&Value>) -> Result<f64> {
    let m = match raw {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(1.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.is_empty() => return Ok(1.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    }
    .ok_or_else(|| AppError::InvalidArgument("Serving multiplier must be a number".to_string()))?;

    match m {
        m if m == 0.0 || m.is_nan() => Ok(1.0),
        m if m < 0.0 || m.is_infinite() => Err(AppError::InvalidArgument(
            "Serving multiplier must be positive".to_string(),
        )),
        m => Ok(m),
    }
}

/// Interprets an entry index from a request body.
///
/// Integers are used as-is, fractional numbers truncate toward zero and
/// strings are read up to the first non-digit. Returns `None` for anything
/// that cannot address an entry (negative, non-numeric, missing).
pub fn parse_index(raw: Option<&Value>) -> Option<usize> {
    let n = match raw? {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => {
                let f = n.as_f64()?.trunc();
                if !f.is_finite() || f.abs() >= i64::MAX as f64 {
                    return None;
                }
                f as i64
            }
        },
        Value::String(s) => leading_integer(s)?,
        _ => return None,
    };
    usize::try_from(n).ok()
}

/// Parses an optional sign followed by at least one digit, ignoring any
/// leading whitespace and trailing characters.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}
