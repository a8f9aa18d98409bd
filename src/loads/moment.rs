//! Concentrated moments on spans

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_magnitude, check_position, DEFAULT_CASE};
use crate::error::BeamResult;
use crate::math::{self, Vec4};

/// A concentrated couple applied at a point on a span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentratedMoment {
    /// Moment magnitude (counterclockwise positive)
    pub magnitude: f64,
    /// Distance from the left end of the span
    pub position: f64,
    /// Load case
    pub case: String,
}

impl ConcentratedMoment {
    /// Create a new concentrated moment in the default load case
    pub fn new(magnitude: f64, position: f64) -> Self {
        Self {
            magnitude,
            position,
            case: DEFAULT_CASE.to_string(),
        }
    }

    /// Assign the moment to a load case
    pub fn with_case(mut self, case: &str) -> Self {
        self.case = case.to_string();
        self
    }

    /// Scale the moment by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            magnitude: self.magnitude * factor,
            position: self.position,
            case: self.case.clone(),
        }
    }

    /// Check that the moment lies on a span of the given length
    pub fn validate(&self, length: f64) -> BeamResult<()> {
        check_magnitude("concentrated moment", self.magnitude)?;
        check_position("concentrated moment position", self.position, length)
    }

    /// Fixed end reactions [V_i, M_i, V_j, M_j] with both span ends clamped
    pub fn equivalent_nodal_reactions(&self, length: f64) -> Vec4 {
        math::fer_concentrated_moment(self.magnitude, self.position, length)
    }

    /// A couple adds no shear on the clamped span; the end shear carries it
    pub fn shear(&self, _x: f64, _length: f64) -> f64 {
        0.0
    }

    /// Simply supported bending moment at `x` measured from the left end
    ///
    /// `x == position` takes the value just after the jump, so a couple at the
    /// right end reads zero there.
    pub fn moment(&self, x: f64, length: f64) -> f64 {
        let (m, a) = (self.magnitude, self.position);
        if (0.0..a).contains(&x) {
            m / length * x
        } else if a <= x && x <= length {
            m * (x / length - 1.0)
        } else {
            0.0
        }
    }
}

impl fmt::Display for ConcentratedMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "concentrated moment {} N·m at {} m ({})",
            self.magnitude, self.position, self.case
        )
    }
}
