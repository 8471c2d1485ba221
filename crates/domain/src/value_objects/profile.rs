//! Transit provider profile value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A HAFAS provider profile
///
/// Identifies which transit authority an integration instance talks to.
/// Serialized with the upper-case provider code (e.g. `"KVB"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Profile {
    /// Deutsche Bahn
    #[serde(rename = "DB")]
    Db,
    /// Kölner Verkehrs-Betriebe
    #[serde(rename = "KVB")]
    Kvb,
    /// Nahverkehr Sachsen-Anhalt
    #[serde(rename = "NASA")]
    Nasa,
    /// Rejseplanen (Denmark)
    #[serde(rename = "RKRP")]
    Rkrp,
    /// Verkehrsverbund Süd-Niedersachsen
    #[serde(rename = "VSN")]
    Vsn,
}

impl Profile {
    /// Provider code as stored in configuration
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Db => "DB",
            Self::Kvb => "KVB",
            Self::Nasa => "NASA",
            Self::Rkrp => "RKRP",
            Self::Vsn => "VSN",
        }
    }

    /// Human-readable provider name
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Db => "Deutsche Bahn",
            Self::Kvb => "Kölner Verkehrs-Betriebe",
            Self::Nasa => "Nahverkehr Sachsen-Anhalt",
            Self::Rkrp => "Rejseplanen",
            Self::Vsn => "Verkehrsverbund Süd-Niedersachsen",
        }
    }

    /// All known profiles in display order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [Self::Db, Self::Kvb, Self::Nasa, Self::Rkrp, Self::Vsn]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Profile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownProfile(s.to_string()))
    }
}
