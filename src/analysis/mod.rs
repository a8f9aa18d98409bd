//! Analysis stages and options
//!
//! A run goes through four stages, each a free function over plain values:
//! assembly of the global stiffness matrix and fixed-end forces, the
//! boundary-condition solve, end-force recovery, and diagram sampling.

pub mod assembly;
pub mod boundary;
pub mod diagrams;
pub mod forces;

use serde::{Deserialize, Serialize};

pub use assembly::{global_fixed_end_forces, global_stiffness_matrix, local_fixed_end_forces};
pub use boundary::{assemble_displacements, assemble_reactions, displacement, reaction, Dof};
pub use diagrams::{moments, shears, Extremum, SpanDiagram};
pub use forces::internal_forces;

/// Sign convention for reported bending moments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentConvention {
    /// Positive moment compresses the top fibre (midspan of a loaded simple span is positive)
    SaggingPositive,
    /// Positive moment compresses the bottom fibre (moments over interior supports are positive)
    HoggingPositive,
}

impl MomentConvention {
    /// Express a sagging-positive moment in this convention
    pub fn apply(self, moment: f64) -> f64 {
        match self {
            Self::SaggingPositive => moment,
            Self::HoggingPositive => -moment,
        }
    }
}

impl Default for MomentConvention {
    fn default() -> Self {
        Self::SaggingPositive
    }
}

/// Options for beam analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Number of diagram samples per span (at least 2)
    pub resolution: usize,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Relative tolerance for the statics and reaction consistency checks
    pub tolerance: f64,
    /// Sign convention for moment diagrams
    pub moment_convention: MomentConvention,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            resolution: 1000,
            check_statics: true,
            tolerance: 1e-6,
            moment_convention: MomentConvention::SaggingPositive,
        }
    }
}

impl AnalysisOptions {
    /// Set the number of diagram samples per span
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the relative tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Set the moment sign convention
    pub fn with_moment_convention(mut self, convention: MomentConvention) -> Self {
        self.moment_convention = convention;
        self
    }

    /// Skip the equilibrium check
    pub fn without_statics_check(mut self) -> Self {
        self.check_statics = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = AnalysisOptions::default();
        assert_eq!(options.resolution, 1000);
        assert!(options.check_statics);
        assert_eq!(options.moment_convention, MomentConvention::SaggingPositive);
    }

    #[test]
    fn test_builder() {
        let options = AnalysisOptions::default()
            .with_resolution(11)
            .with_tolerance(1e-3)
            .with_moment_convention(MomentConvention::HoggingPositive)
            .without_statics_check();

        assert_eq!(options.resolution, 11);
        assert_eq!(options.tolerance, 1e-3);
        assert!(!options.check_statics);
        assert_eq!(options.moment_convention.apply(2.0), -2.0);
    }
}
