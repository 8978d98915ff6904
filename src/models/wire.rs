//! Tolerant (de)serialization helpers for the backend's JSON
//!
//! The backend is loose about types: codes come as strings or numbers, and
//! fields may be missing or `null`. None of that is an error here.

use serde::{Deserialize, Deserializer};

/// Enum with a fixed label on the wire and a lenient parser
pub trait WireLabel: Sized {
    /// Parse a wire label. Never fails; unknown labels map to a fallback.
    fn from_wire(raw: &str) -> Self;

    /// Canonical label written back to the wire
    fn wire(&self) -> &'static str;
}

/// Implement `Serialize`/`Deserialize` through `WireLabel`
macro_rules! wire_label_serde {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str($crate::models::wire::WireLabel::wire(self))
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let raw = $crate::models::wire::lenient_string(deserializer)?;
                    Ok(<$ty as $crate::models::wire::WireLabel>::from_wire(&raw))
                }
            }
        )+
    };
}

pub(crate) use wire_label_serde;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// String, number or `null` as a `String` (`null` becomes "")
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(raw.map(Scalar::into_string).unwrap_or_default())
}

/// Like `lenient_string` but blank values become `None`
pub(crate) fn optional_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(Scalar::into_string)
        .filter(|s| !s.trim().is_empty()))
}

/// Optional label; blank or `null` becomes `None`
pub(crate) fn optional_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: WireLabel,
{
    Ok(optional_lenient_string(deserializer)?.map(|raw| T::from_wire(&raw)))
}

/// Money amount sent as a number or a numeric string ("25000.00")
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Scalar> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(0),
        Some(Scalar::Integer(n)) => Ok(n),
        Some(Scalar::Float(f)) => Ok(f.round() as i64),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(0),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(|f| f.round() as i64)
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: '{}'", s))),
        Some(Scalar::Bool(_)) => Err(serde::de::Error::custom("invalid amount: boolean")),
    }
}
