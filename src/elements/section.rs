//! Section properties for beam elements

use serde::{Deserialize, Serialize};

use crate::error::{BeamError, BeamResult};

/// Cross-section properties for bending about the strong axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Moment of inertia in m⁴
    pub i: f64,
    /// Depth of section (optional) in m
    pub depth: Option<f64>,
}

impl Section {
    /// Create a section from its moment of inertia
    pub fn new(i: f64) -> Self {
        Self { i, depth: None }
    }

    /// Create a rectangular section
    pub fn rectangular(width: f64, depth: f64) -> Self {
        Self {
            i: width * depth.powi(3) / 12.0,
            depth: Some(depth),
        }
    }

    /// Create a wide flange (I-beam) section
    ///
    /// # Arguments
    /// * `depth` - Total depth of section
    /// * `flange_width` - Width of flange
    /// * `flange_thickness` - Thickness of flange
    /// * `web_thickness` - Thickness of web
    pub fn wide_flange(
        depth: f64,
        flange_width: f64,
        flange_thickness: f64,
        web_thickness: f64,
    ) -> Self {
        let hw = depth - 2.0 * flange_thickness;
        let i = (flange_width * depth.powi(3) - (flange_width - web_thickness) * hw.powi(3)) / 12.0;

        Self {
            i,
            depth: Some(depth),
        }
    }

    /// Elastic section modulus I / (d / 2), when the depth is known
    pub fn elastic_modulus(&self) -> Option<f64> {
        self.depth.map(|d| self.i / (d / 2.0))
    }

    pub(crate) fn validate(&self) -> BeamResult<()> {
        if !(self.i.is_finite() && self.i > 0.0) {
            return Err(BeamError::InvalidGeometry(format!(
                "moment of inertia must be positive, got {}",
                self.i
            )));
        }
        Ok(())
    }
}

impl Default for Section {
    fn default() -> Self {
        // 200mm x 200mm rectangular section
        Self::rectangular(0.2, 0.2)
    }
}
