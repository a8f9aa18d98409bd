//! Distributed loads on spans

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_magnitude, check_position, DEFAULT_CASE};
use crate::error::{BeamError, BeamResult};
use crate::math::{self, Vec4};

/// A uniform line load over part (or all) of a span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Load intensity per unit length (downward positive)
    pub intensity: f64,
    /// Distance from the left end of the span to the start of the load
    pub start: f64,
    /// Loaded length
    pub length: f64,
    /// Load case
    pub case: String,
}

impl DistributedLoad {
    /// Create a new distributed load in the default load case
    pub fn new(intensity: f64, start: f64, length: f64) -> Self {
        Self {
            intensity,
            start,
            length,
            case: DEFAULT_CASE.to_string(),
        }
    }

    /// Create a uniform load over a full span of the given length
    pub fn full_span(intensity: f64, span_length: f64) -> Self {
        Self::new(intensity, 0.0, span_length)
    }

    /// Assign the load to a load case
    pub fn with_case(mut self, case: &str) -> Self {
        self.case = case.to_string();
        self
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            intensity: self.intensity * factor,
            start: self.start,
            length: self.length,
            case: self.case.clone(),
        }
    }

    /// End of the loaded region
    pub fn end(&self) -> f64 {
        self.start + self.length
    }

    /// Get the total force from this load
    pub fn total_force(&self) -> f64 {
        self.intensity * self.length
    }

    /// Check that the loaded region lies on a span of the given length
    pub fn validate(&self, span_length: f64) -> BeamResult<()> {
        check_magnitude("distributed load", self.intensity)?;
        if !(self.length.is_finite() && self.length >= 0.0) {
            return Err(BeamError::InvalidGeometry(format!(
                "distributed load length must be non-negative, got {}",
                self.length
            )));
        }
        check_position("distributed load start", self.start, span_length)?;
        check_position("distributed load end", self.end(), span_length)
    }

    /// Fixed end reactions [V_i, M_i, V_j, M_j] with both span ends clamped
    pub fn equivalent_nodal_reactions(&self, span_length: f64) -> Vec4 {
        math::fer_distributed_load(self.intensity, self.start, self.length, span_length)
    }

    /// Shear contribution at `x` measured from the left end
    pub fn shear(&self, x: f64, _span_length: f64) -> f64 {
        if x < self.start {
            0.0
        } else if x <= self.end() {
            -self.intensity * (x - self.start)
        } else {
            -self.total_force()
        }
    }

    /// Simply supported bending moment at `x` measured from the left end
    pub fn moment(&self, x: f64, span_length: f64) -> f64 {
        let (q, a, l) = (self.intensity, self.start, span_length);
        let v_left = self.total_force() / l * (l - a - self.length / 2.0);
        let v_right = self.total_force() - v_left;

        if (0.0..a).contains(&x) {
            v_left * x
        } else if a <= x && x <= self.end() {
            v_left * x - 0.5 * q * (x - a).powi(2)
        } else if x <= l {
            v_right * (l - x)
        } else {
            0.0
        }
    }
}

impl fmt::Display for DistributedLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "distributed load {} N/m from {} m to {} m ({})",
            self.intensity,
            self.start,
            self.end(),
            self.case
        )
    }
}
