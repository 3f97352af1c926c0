// src/code.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Y-site compatibility classification for one (row drug, column drug) cell.
///
/// Source data carries a single letter per cell: `V`, `R`, `A` or `G`.
/// Anything else, including an empty cell, is read as `MissingData`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compatibility {
    #[serde(rename = "V")]
    Compatible,
    #[serde(rename = "R")]
    Incompatible,
    #[serde(rename = "A")]
    Contradictory,
    #[default]
    #[serde(rename = "G")]
    MissingData,
}

impl Compatibility {
    /// Single-letter code as it appears in the CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            Compatibility::Compatible => "V",
            Compatibility::Incompatible => "R",
            Compatibility::Contradictory => "A",
            Compatibility::MissingData => "G",
        }
    }

    /// Strict parse of a trimmed cell. `None` for anything outside `V R A G`.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "V" => Some(Compatibility::Compatible),
            "R" => Some(Compatibility::Incompatible),
            "A" => Some(Compatibility::Contradictory),
            "G" => Some(Compatibility::MissingData),
            _ => None,
        }
    }

    /// Lenient parse used by the table parser: trims, and falls back to `MissingData`.
    pub fn from_cell(raw: &str) -> Self {
        Self::from_code(raw.trim()).unwrap_or(Compatibility::MissingData)
    }

    /// Only confirmed-compatible pairs may be picked for combination.
    pub fn is_selectable(&self) -> bool {
        matches!(self, Compatibility::Compatible)
    }

    /// Text appended to a drug name in the second selector.
    pub fn suffix_label(&self) -> &'static str {
        match self {
            Compatibility::Compatible => "",
            Compatibility::Incompatible => " 🔴 (Incompatible)",
            Compatibility::Contradictory => " 🟠 (Contradictorio)",
            Compatibility::MissingData => " ⚪ (Falta Datos)",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Compatibility::Compatible => "COMPATIBLE: Se pueden administrar juntos en Y.",
            Compatibility::Incompatible => {
                "INCOMPATIBLE: Riesgo de precipitado o reacción química."
            }
            Compatibility::Contradictory => {
                "CONTRADICTORIO: La literatura presenta datos opuestos."
            }
            Compatibility::MissingData => "FALTA DE DATOS: No hay información suficiente.",
        }
    }

    /// Visual category of the result box, one per variant.
    pub fn style_class(&self) -> &'static str {
        match self {
            Compatibility::Compatible => "bg-v",
            Compatibility::Incompatible => "bg-r",
            Compatibility::Contradictory => "bg-a",
            Compatibility::MissingData => "bg-g",
        }
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
