//! Point loads on spans

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_magnitude, check_position, DEFAULT_CASE};
use crate::error::BeamResult;
use crate::math::{self, Vec4};

/// A concentrated transverse force on a span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Load magnitude (downward positive)
    pub magnitude: f64,
    /// Distance from the left end of the span
    pub position: f64,
    /// Load case
    pub case: String,
}

impl PointLoad {
    /// Create a new point load in the default load case
    pub fn new(magnitude: f64, position: f64) -> Self {
        Self {
            magnitude,
            position,
            case: DEFAULT_CASE.to_string(),
        }
    }

    /// Assign the load to a load case
    pub fn with_case(mut self, case: &str) -> Self {
        self.case = case.to_string();
        self
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            magnitude: self.magnitude * factor,
            position: self.position,
            case: self.case.clone(),
        }
    }

    /// Check that the load lies on a span of the given length
    pub fn validate(&self, length: f64) -> BeamResult<()> {
        check_magnitude("point load", self.magnitude)?;
        check_position("point load position", self.position, length)
    }

    /// Fixed end reactions [V_i, M_i, V_j, M_j] with both span ends clamped
    pub fn equivalent_nodal_reactions(&self, length: f64) -> Vec4 {
        math::fer_point_load(self.magnitude, self.position, length)
    }

    /// Shear contribution at `x` measured from the left end
    pub fn shear(&self, x: f64, length: f64) -> f64 {
        if self.position < x && x <= length {
            -self.magnitude
        } else {
            0.0
        }
    }

    /// Simply supported bending moment at `x` measured from the left end
    pub fn moment(&self, x: f64, length: f64) -> f64 {
        let (p, a) = (self.magnitude, self.position);
        if (0.0..a).contains(&x) {
            (1.0 - a / length) * p * x
        } else if a <= x && x <= length {
            a * p * (1.0 - x / length)
        } else {
            0.0
        }
    }
}

impl fmt::Display for PointLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "point load {} N at {} m ({})",
            self.magnitude, self.position, self.case
        )
    }
}
