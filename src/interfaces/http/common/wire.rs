//! Serde helpers for the admin UI's wire conventions
//!
//! The UI sends feature flags as `0`/`1` (sometimes as booleans) and
//! coordinates either as a `"lat,lng"` string or a `[lat, lng]` array.
//! Responses always carry flags as `0`/`1`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

use crate::domain::{Coordinate, DomainError, DomainResult, SpacePosition};

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Text(String),
}

fn flag_from_repr<E: de::Error>(repr: FlagRepr) -> Result<bool, E> {
    match repr {
        FlagRepr::Bool(b) => Ok(b),
        FlagRepr::Int(0) => Ok(false),
        FlagRepr::Int(1) => Ok(true),
        FlagRepr::Int(n) => Err(E::custom(format!("expected 0 or 1, got {}", n))),
        FlagRepr::Text(s) => match s.trim() {
            "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(E::custom(format!("expected 0 or 1, got '{}'", other))),
        },
    }
}

pub fn deserialize_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    flag_from_repr(FlagRepr::deserialize(d)?)
}

/// Use together with `#[serde(default)]`.
pub fn deserialize_opt_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Option::<FlagRepr>::deserialize(d)?
        .map(flag_from_repr)
        .transpose()
}

pub fn serialize_flag<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u8(u8::from(*value))
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use together with `#[serde(default)]`.
pub fn deserialize_nullable<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

/// A coordinate as sent by the UI
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Pair([f64; 2]),
    Text(String),
}

impl CoordinateInput {
    pub fn to_coordinate(&self) -> DomainResult<Coordinate> {
        let c = match self {
            Self::Pair(pair) => Coordinate::from(*pair),
            Self::Text(s) => s.parse()?,
        };
        if !c.is_valid() {
            return Err(DomainError::InvalidGeometry(format!(
                "coordinates {} are outside the valid range",
                c
            )));
        }
        Ok(c)
    }

    /// Spaces also accept a free-form floor/level label.
    pub fn to_position(&self) -> DomainResult<SpacePosition> {
        match self {
            Self::Pair(_) => self.to_coordinate().map(SpacePosition::Point),
            Self::Text(s) => s.parse(),
        }
    }
}
