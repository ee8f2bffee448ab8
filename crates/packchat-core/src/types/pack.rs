use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque pack identifier.
///
/// The listing service is free to use numbers or strings; the id is sent
/// back to the query service in exactly the JSON shape it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackId {
    Int(i64),
    /// Any other JSON number: above `i64::MAX`, or fractional.
    Number(serde_json::Number),
    Str(String),
}

impl PackId {
    /// Parses user input into an identifier.
    ///
    /// Blank input means "no pack". Input that reads as an `i64` becomes
    /// [`PackId::Int`], any other JSON number [`PackId::Number`], everything
    /// else [`PackId::Str`].
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(id) = trimmed.parse::<i64>() {
            return Some(Self::Int(id));
        }

        Some(match trimmed.parse::<serde_json::Number>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Str(trimmed.to_owned()),
        })
    }
}

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Number(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for PackId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for PackId {
    fn from(id: i32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<&str> for PackId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_owned())
    }
}

impl From<String> for PackId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

/// A named, server-owned data collection a query can be scoped to.
///
/// Deserialized from the listing entries `{"id": .., "pack_name": .., ...}`;
/// any other field the service sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    pub id: PackId,
    #[serde(rename = "pack_name")]
    pub name: String,
}

impl Pack {
    pub fn new(id: impl Into<PackId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
