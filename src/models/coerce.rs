//! Field readers for hand-maintained feed files.
//!
//! Each reader consumes whatever value sits in the field, nested objects
//! included, and turns anything it cannot use into `None`. The caller decides
//! what `None` means (zero, false, absent).

use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn whole_number(value: f64) -> Option<u32> {
    if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

/// Non-negative count. Accepts `4`, `4.0` and `"4"`.
pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Int(n) => u32::try_from(n).ok(),
        Loose::Float(f) => whole_number(f),
        Loose::Text(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
        Loose::Bool(_) | Loose::Other(_) => None,
    })
}

/// Boolean flag. Text is matched case-insensitively, numbers are true when non-zero.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Bool(b) => Some(b),
        Loose::Int(n) => Some(n != 0),
        Loose::Float(f) => Some(f != 0.0),
        Loose::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        Loose::Other(_) => None,
    })
}

/// Name or label. Blank text reads as missing.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Loose::Int(n) => Some(n.to_string()),
        Loose::Bool(_) | Loose::Float(_) | Loose::Other(_) => None,
    })
}
