//! Node loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

use super::{check_magnitude, DEFAULT_CASE};
use crate::error::BeamResult;

/// A load applied directly to a node
///
/// Uses the same sign convention as span loads: downward force positive,
/// counterclockwise moment positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodalLoad {
    /// Vertical force (N), downward positive
    pub force: f64,
    /// Moment (N·m), counterclockwise positive
    pub moment: f64,
    /// Load case this load belongs to
    pub case: String,
}

impl NodalLoad {
    /// Create a new node load with both components
    pub fn new(force: f64, moment: f64) -> Self {
        Self {
            force,
            moment,
            case: DEFAULT_CASE.to_string(),
        }
    }

    /// Create a force-only node load
    pub fn force(force: f64) -> Self {
        Self::new(force, 0.0)
    }

    /// Create a moment-only node load
    pub fn moment(moment: f64) -> Self {
        Self::new(0.0, moment)
    }

    /// Assign the load to a load case
    pub fn with_case(mut self, case: &str) -> Self {
        self.case = case.to_string();
        self
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            force: self.force * factor,
            moment: self.moment * factor,
            case: self.case.clone(),
        }
    }

    /// The load as a nodal force pair [F, M] in the reaction convention
    /// (upward force positive), ready to place in R0
    pub fn as_reaction_pair(&self) -> [f64; 2] {
        [-self.force, self.moment]
    }

    pub(crate) fn validate(&self) -> BeamResult<()> {
        check_magnitude("nodal force", self.force)?;
        check_magnitude("nodal moment", self.moment)
    }
}

impl Default for NodalLoad {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
