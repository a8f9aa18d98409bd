//! Support conditions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BeamError, BeamResult};

/// Support condition at a beam node
///
/// Each node has two DOFs: vertical displacement and rotation. A support
/// either restrains a DOF (displacement known to be zero, reaction unknown)
/// or leaves it free (displacement unknown, reaction known).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportType {
    /// Vertical displacement and rotation restrained
    Fixed,
    /// Slides vertically without rotating
    RollerVertical,
    /// Vertical displacement restrained, rotation free
    Pin,
    /// No restraint (cantilever tip or unsupported interior node)
    Free,
}

impl SupportType {
    /// All support types in code order
    pub const ALL: [SupportType; 4] = [
        SupportType::Fixed,
        SupportType::RollerVertical,
        SupportType::Pin,
        SupportType::Free,
    ];

    /// Look up a support type by its numeric code
    /// (0 = fixed, 1 = vertical roller, 2 = pin, 3 = free)
    pub fn from_code(code: u8) -> BeamResult<Self> {
        Self::ALL.get(code as usize).copied().ok_or_else(|| {
            BeamError::InvalidSupportConfiguration(format!(
                "unrecognized support code {} (expected 0-3)",
                code
            ))
        })
    }

    /// Numeric code of this support type
    pub fn code(&self) -> u8 {
        match self {
            SupportType::Fixed => 0,
            SupportType::RollerVertical => 1,
            SupportType::Pin => 2,
            SupportType::Free => 3,
        }
    }

    /// Returns true if this support restrains vertical displacement
    pub fn restrains_vertical(&self) -> bool {
        matches!(self, SupportType::Fixed | SupportType::Pin)
    }

    /// Returns true if this support restrains rotation
    pub fn restrains_rotation(&self) -> bool {
        matches!(self, SupportType::Fixed | SupportType::RollerVertical)
    }

    /// Restraint flags for the node's DOFs [vertical, rotation]
    pub fn restraints(&self) -> [bool; 2] {
        [self.restrains_vertical(), self.restrains_rotation()]
    }

    /// Number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.restraints().iter().filter(|&&r| r).count()
    }
}

impl fmt::Display for SupportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupportType::Fixed => "fixed",
            SupportType::RollerVertical => "vertical roller",
            SupportType::Pin => "pin",
            SupportType::Free => "free",
        };
        f.write_str(name)
    }
}

impl FromStr for SupportType {
    type Err = BeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(SupportType::Fixed),
            "roller" | "roller_vertical" | "vertical roller" => Ok(SupportType::RollerVertical),
            "pin" | "pinned" => Ok(SupportType::Pin),
            "free" => Ok(SupportType::Free),
            other => match other.parse::<u8>() {
                Ok(code) => Self::from_code(code),
                Err(_) => Err(BeamError::InvalidSupportConfiguration(format!(
                    "unrecognized support type '{}'",
                    s
                ))),
            },
        }
    }
}
