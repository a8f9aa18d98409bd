//! Beam element - a single span of the continuous beam

use serde::{Deserialize, Serialize};

use crate::error::{BeamError, BeamResult};
use crate::math::{self, Mat4};

/// An Euler-Bernoulli beam element spanning two adjacent nodes
///
/// Local DOF order is [d_i, θ_i, d_j, θ_j] (vertical displacement up,
/// rotation counterclockwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamElement {
    /// Modulus of elasticity
    e: f64,
    /// Moment of inertia
    i: f64,
    /// Span length
    length: f64,
    /// Local stiffness matrix
    k: Mat4,
}

impl BeamElement {
    /// Create a new element, rejecting non-positive or non-finite properties
    pub fn new(e: f64, i: f64, length: f64) -> BeamResult<Self> {
        for (name, value) in [("E", e), ("I", i), ("L", length)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(BeamError::InvalidGeometry(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            e,
            i,
            length,
            k: math::beam_local_stiffness(e, i, length),
        })
    }

    /// Modulus of elasticity
    pub fn e(&self) -> f64 {
        self.e
    }

    /// Moment of inertia
    pub fn i(&self) -> f64 {
        self.i
    }

    /// Span length
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Flexural rigidity EI
    pub fn flexural_rigidity(&self) -> f64 {
        self.e * self.i
    }

    /// Local 4x4 stiffness matrix
    pub fn stiffness(&self) -> &Mat4 {
        &self.k
    }
}
