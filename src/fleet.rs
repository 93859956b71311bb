//! Bus types and their seat capacities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bus categories known to the `routes` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusType {
    #[default]
    Convencional,
    Executivo,
    Leito,
}

impl BusType {
    /// Map free-form input onto a stored bus type.
    ///
    /// The table has no semi-leito category, so its spellings fold into `Leito`.
    /// Unknown input falls back to `Convencional`.
    pub fn normalize(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "executivo" => Self::Executivo,
            "leito" | "semi-leito" | "semileito" | "semi leito" => Self::Leito,
            _ => Self::Convencional,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            Self::Convencional => "convencional",
            Self::Executivo => "executivo",
            Self::Leito => "leito",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Convencional => "Convencional",
            Self::Executivo => "Executivo",
            Self::Leito => "Leito",
        }
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
