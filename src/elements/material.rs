//! Material properties

use serde::{Deserialize, Serialize};

use crate::error::{BeamError, BeamResult};

/// Material properties for beam analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
}

impl Material {
    /// Create a new material with the given modulus of elasticity
    pub fn new(e: f64) -> Self {
        Self { e }
    }

    /// Structural steel, E = 200 GPa
    pub fn steel() -> Self {
        Self::new(200e9)
    }

    /// Normal weight concrete from its compressive strength in Pa
    pub fn concrete(fc: f64) -> Self {
        // ACI: E = 4700 * sqrt(f'c in MPa) MPa
        let fc_mpa = fc / 1e6;
        Self::new(4700.0 * fc_mpa.sqrt() * 1e6)
    }

    /// Aluminum 6061-T6, E = 68.9 GPa
    pub fn aluminum() -> Self {
        Self::new(68.9e9)
    }

    pub(crate) fn validate(&self) -> BeamResult<()> {
        if !(self.e.is_finite() && self.e > 0.0) {
            return Err(BeamError::InvalidGeometry(format!(
                "modulus of elasticity must be positive, got {}",
                self.e
            )));
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
