//! The fixed set of equipment an attendee can commit to bringing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "equipment_type", rename_all = "lowercase")
)]
pub enum EquipmentType {
    Ball,
    Pump,
    Overboots,
}

impl EquipmentType {
    /// Every equipment type, in checklist order.
    pub const ALL: [EquipmentType; 3] = [Self::Ball, Self::Pump, Self::Overboots];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ball => "ball",
            Self::Pump => "pump",
            Self::Overboots => "overboots",
        }
    }

    /// Human-readable label used by the client views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ball => "Ball",
            Self::Pump => "Pump",
            Self::Overboots => "Overboots",
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ball" => Ok(Self::Ball),
            "pump" => Ok(Self::Pump),
            "overboots" => Ok(Self::Overboots),
            other => Err(CoreError::Validation(format!(
                "Unknown equipment type '{other}'"
            ))),
        }
    }
}

/// Drop repeated entries while keeping the first-seen order.
pub fn dedup_equipment(items: &[EquipmentType]) -> Vec<EquipmentType> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(*item);
        }
    }
    out
}
