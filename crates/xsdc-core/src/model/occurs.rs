use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The `maxOccurs` bound of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxOccurs {
    Bounded(u32),
    Unbounded,
}

impl Default for MaxOccurs {
    fn default() -> Self {
        MaxOccurs::Bounded(1)
    }
}

impl MaxOccurs {
    /// The finite bound, or `None` when unbounded.
    pub fn bound(self) -> Option<u32> {
        match self {
            MaxOccurs::Bounded(n) => Some(n),
            MaxOccurs::Unbounded => None,
        }
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound() {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "unbounded"),
        }
    }
}

impl Serialize for MaxOccurs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.bound() {
            Some(n) => serializer.serialize_u32(n),
            None => serializer.serialize_str("unbounded"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMaxOccurs {
    Count(u32),
    Word(String),
}

impl<'de> Deserialize<'de> for MaxOccurs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawMaxOccurs::deserialize(deserializer)? {
            RawMaxOccurs::Count(n) => Ok(MaxOccurs::Bounded(n)),
            RawMaxOccurs::Word(word) if word == "unbounded" => Ok(MaxOccurs::Unbounded),
            RawMaxOccurs::Word(word) => word
                .parse::<u32>()
                .map(MaxOccurs::Bounded)
                .map_err(|_| D::Error::custom(format!("invalid maxOccurs value: {word}"))),
        }
    }
}

/// Occurrence bounds of a particle (`minOccurs`, `maxOccurs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    pub min: u32,
    pub max: MaxOccurs,
}

impl Occurs {
    pub fn new(min: u32, max: MaxOccurs) -> Self {
        Self { min, max }
    }

    /// More than one occurrence is allowed.
    pub fn is_repeatable(&self) -> bool {
        match self.max.bound() {
            Some(n) => n > 1,
            None => true,
        }
    }

    /// At least one occurrence is mandatory.
    pub fn is_required(&self) -> bool {
        self.min >= 1
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::new(1, MaxOccurs::Bounded(1))
    }
}

pub(crate) fn default_min_occurs() -> u32 {
    1
}
