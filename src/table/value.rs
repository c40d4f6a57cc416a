use regex::Regex;
use serde::Serialize;
use std::fmt;

/// A typed table cell. The loader classifies each cell as integer, float or
/// string; downstream consumers narrow further as their schema requires.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Classify a raw cell using the loader's pre-compiled shape regexes.
    pub fn classify(cell: &str, int_re: &Regex, float_re: &Regex) -> Value {
        if int_re.is_match(cell) {
            if let Ok(n) = cell.parse::<i64>() {
                return Value::Int(n);
            }
        }
        if float_re.is_match(cell) {
            if let Ok(x) = cell.parse::<f64>() {
                return Value::Float(x);
            }
        }
        Value::Str(cell.to_string())
    }

    /// Narrow to a non-negative integer, as required for counters.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(n) => u64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Narrow to a float; integers widen losslessly enough for chart axes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            Value::Str(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}
