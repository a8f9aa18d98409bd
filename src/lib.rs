//! Beam Solver - continuous beam analysis by the direct stiffness method
//!
//! This library analyzes straight, multi-span Euler-Bernoulli beams:
//! - Fixed, pinned, vertical roller and free supports at every node
//! - Point loads, partial uniform loads and concentrated moments on spans
//! - Nodal forces and moments
//! - Load cases and factored load combinations
//! - Shear and bending moment diagrams with their extrema
//!
//! ## Example
//! ```rust
//! use beam_solver::prelude::*;
//!
//! // Two 4 m spans: fixed, pinned, and a vertical roller at the right end
//! let mut model = BeamModel::new(
//!     &[4.0, 4.0],
//!     &[SupportType::Fixed, SupportType::Pin, SupportType::RollerVertical],
//!     Material::steel(),
//!     Section::new(1e-4),
//! )
//! .unwrap();
//!
//! // 10 kN downward at the middle of the first span
//! model.add_span_load(0, PointLoad::new(10_000.0, 2.0)).unwrap();
//!
//! let results = model.analyze_combo("Combo 1", &AnalysisOptions::default()).unwrap();
//! let reaction = results.node_reactions(0).unwrap();
//! assert!((reaction.fy - 6_500.0).abs() < 1e-6);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, Dof, Extremum, MomentConvention, SpanDiagram};
    pub use crate::elements::{BeamElement, Material, Section, SupportType};
    pub use crate::error::{BeamError, BeamResult};
    pub use crate::loads::{
        ConcentratedMoment, DistributedLoad, Load, LoadCombination, NodalLoad,
        PointLoad, DEFAULT_CASE, DEFAULT_COMBO,
    };
    pub use crate::model::{BeamModel, Span};
    pub use crate::results::{
        AnalysisResults, AnalysisSummary, MemberForces, NodeDisplacement, Reactions, StaticsCheck,
    };
}
