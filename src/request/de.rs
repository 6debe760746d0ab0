//! Lenient field deserializers.
//!
//! Tabular UIs send their state as form fields, so the same field may
//! arrive as a string, a number, a boolean or `null` depending on how the
//! client serialized it.

use serde::{Deserialize, Deserializer, Serialize};

/// A scalar request parameter: `"10"` and `10` are the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Param {
    /// The value as a finite whole number, if it is one.
    fn whole(&self) -> Option<f64> {
        let n = match self {
            Param::Int(n) => return Some(*n as f64),
            Param::Float(f) => *f,
            Param::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (n.is_finite() && n.fract() == 0.0).then_some(n)
    }

    /// Signed integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Param::Int(n) => Some(*n),
            _ => self
                .whole()
                .filter(|n| *n >= i64::MIN as f64 && *n <= i64::MAX as f64)
                .map(|n| n as i64),
        }
    }

    /// Non-negative integer value.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i64().and_then(|n| u64::try_from(n).ok())
    }

    pub fn as_index(&self) -> Option<usize> {
        self.as_u64().and_then(|n| usize::try_from(n).ok())
    }
}

impl From<i64> for Param {
    fn from(n: i64) -> Self {
        Param::Int(n)
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Text(s.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// `true` only for the literal string `"true"` or boolean `true`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(matches!(raw, Some(Scalar::Bool(true))) || matches!(raw, Some(Scalar::Text(ref s)) if s == "true"))
}

/// String, number or `null` → string (`null` becomes empty).
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Int(n)) => n.to_string(),
        Some(Scalar::Float(f)) => f.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
    })
}
