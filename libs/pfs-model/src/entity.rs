use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Entity kinds the mapper and record factory understand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Sample,
    SampleLot,
    Strain,
}

impl EntityKind {
    /// Canonical token, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Sample => "SAMPLE",
            EntityKind::SampleLot => "SAMPLE LOT",
            EntityKind::Strain => "STRAIN",
        }
    }

    /// Value of the `EntityTypeName` discriminator carried by records of this kind.
    pub fn discriminator(&self) -> &'static str {
        match self {
            EntityKind::Sample => "MOUSE_SAMPLE",
            EntityKind::SampleLot => "MOUSE_SAMPLE_LOT",
            EntityKind::Strain => "MOUSE_STRAIN",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    /// Case-insensitive; spaces and underscores are interchangeable.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_uppercase().replace(' ', "_").as_str() {
            "SAMPLE" => Ok(EntityKind::Sample),
            "SAMPLE_LOT" => Ok(EntityKind::SampleLot),
            "STRAIN" => Ok(EntityKind::Strain),
            _ => Err(ModelError::unknown_entity_kind(token)),
        }
    }
}
