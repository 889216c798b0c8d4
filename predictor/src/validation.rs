use machine_learning::CustomerRecord;
use serde_json::{Map, Value};

use crate::error::{FieldError, Loc};

const MISSING: (&str, &str) = ("Field required", "missing");
const INT_TYPE: (&str, &str) = ("Input should be a valid integer", "int_type");
const INT_PARSING: (&str, &str) = (
    "Input should be a valid integer, unable to parse string as an integer",
    "int_parsing",
);
const INT_FROM_FLOAT: (&str, &str) = (
    "Input should be a valid integer, got a number with a fractional part",
    "int_from_float",
);
const FLOAT_TYPE: (&str, &str) = ("Input should be a valid number", "float_type");
const FLOAT_PARSING: (&str, &str) = (
    "Input should be a valid number, unable to parse string as a number",
    "float_parsing",
);
const STRING_TYPE: (&str, &str) = ("Input should be a valid string", "string_type");

type Check<T> = std::result::Result<T, (&'static str, &'static str)>;

/// Parses a prediction request body into a customer record.
///
/// Every field is checked, so all of the problems in a body are reported at once.
/// Integers accept whole numbers and numeric strings, reals accept any number and numeric
/// strings, `region` accepts any string.
///
/// # Returns
/// The record, or the diagnostics of every invalid part of the body.
pub fn parse_customer(body: &[u8]) -> Result<CustomerRecord, Vec<FieldError>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        let (msg, kind) = MISSING;
        return Err(vec![FieldError::body(msg, kind)]);
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        vec![FieldError {
            loc: vec![Loc::Key("body"), Loc::Offset(byte_offset(body, e.line(), e.column()))],
            msg: "JSON decode error",
            kind: "json_invalid",
        }]
    })?;

    let Value::Object(fields) = value else {
        return Err(vec![FieldError::body(
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )]);
    };

    let mut errors = Vec::new();
    let age = field(&fields, "age", integer, &mut errors);
    let income = field(&fields, "income", real, &mut errors);
    let loyalty_score = field(&fields, "loyalty_score", real, &mut errors);
    let region = field(&fields, "region", string, &mut errors);
    let visits_per_month = field(&fields, "visits_per_month", integer, &mut errors);

    match (age, income, loyalty_score, region, visits_per_month) {
        (Some(age), Some(income), Some(loyalty_score), Some(region), Some(visits_per_month)) => {
            Ok(CustomerRecord {
                age,
                income,
                loyalty_score,
                region,
                visits_per_month,
            })
        }
        _ => Err(errors),
    }
}

fn field<T>(
    fields: &Map<String, Value>,
    name: &'static str,
    check: fn(&Value) -> Check<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let result = match fields.get(name) {
        Some(value) => check(value),
        None => Err(MISSING),
    };

    result
        .map_err(|(msg, kind)| errors.push(FieldError::field(name, msg, kind)))
        .ok()
}

fn integer(value: &Value) -> Check<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }

            match n.as_f64() {
                Some(f) if f.fract() != 0.0 => Err(INT_FROM_FLOAT),
                Some(f) if f.abs() < i64::MAX as f64 => Ok(f as i64),
                _ => Err(INT_TYPE),
            }
        }
        Value::String(s) => s.trim().parse().map_err(|_| INT_PARSING),
        _ => Err(INT_TYPE),
    }
}

fn real(value: &Value) -> Check<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(FLOAT_TYPE),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(FLOAT_PARSING),
        },
        _ => Err(FLOAT_TYPE),
    }
}

fn string(value: &Value) -> Check<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(STRING_TYPE),
    }
}

fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = body
        .split_inclusive(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(<[u8]>::len)
        .sum();

    (line_start + column.saturating_sub(1)).min(body.len())
}
