//! Result types for beam analysis

use serde::{Deserialize, Serialize};

use crate::analysis::SpanDiagram;
use crate::error::{BeamError, BeamResult};
use crate::math::{Mat, Vec as DVec, Vec4};

/// Displacement results at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Vertical displacement (up positive)
    pub dy: f64,
    /// Rotation (counterclockwise positive)
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DY, RZ]
    pub fn from_array(arr: [f64; 2]) -> Self {
        Self {
            dy: arr[0],
            rz: arr[1],
        }
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Vertical reaction (up positive)
    pub fy: f64,
    /// Reaction moment (counterclockwise positive)
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FY, MZ]
    pub fn from_array(arr: [f64; 2]) -> Self {
        Self {
            fy: arr[0],
            mz: arr[1],
        }
    }
}

/// End forces of a span, acting on the span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberForces {
    pub shear_left: f64,
    pub moment_left: f64,
    pub shear_right: f64,
    pub moment_right: f64,
}

impl MemberForces {
    /// Create from the local end force vector [V_i, M_i, V_j, M_j]
    pub fn from_end_forces(forces: &Vec4) -> Self {
        Self {
            shear_left: forces[0],
            moment_left: forces[1],
            shear_right: forces[2],
            moment_right: forces[3],
        }
    }
}

/// Vertical equilibrium of the solved beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticsCheck {
    /// Total applied vertical load (down positive)
    pub applied: f64,
    /// Total vertical support reaction (up positive)
    pub reacted: f64,
    /// Whether the two agree within the relative tolerance
    pub balanced: bool,
}

impl StaticsCheck {
    pub fn new(applied: f64, reacted: f64, tolerance: f64) -> Self {
        let scale = applied.abs().max(reacted.abs());
        Self {
            applied,
            reacted,
            balanced: (applied - reacted).abs() <= tolerance * scale,
        }
    }
}

/// Everything computed for one load combination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Load combination name
    pub combo: String,
    /// Global stiffness matrix
    pub k: Mat,
    /// Global fixed end forces
    pub qf: DVec,
    /// Global displacements [dy_0, rz_0, dy_1, rz_1, ...]
    pub d: DVec,
    /// Global nodal forces K·d + Qf
    pub r: DVec,
    /// Support reactions at restrained DOFs, zero elsewhere
    pub support_reactions: DVec,
    /// Fixed end forces per span
    pub fixed_end_forces: Vec<Vec4>,
    /// Recovered end forces per span
    pub end_forces: Vec<Vec4>,
    /// Shear force diagram per span
    pub shear: Vec<SpanDiagram>,
    /// Bending moment diagram per span
    pub moment: Vec<SpanDiagram>,
    /// Equilibrium check, when requested
    pub statics: Option<StaticsCheck>,
    /// Largest mismatch between recomputed and applied nodal loads at free DOFs
    pub max_residual: f64,
    /// Number of unrestrained DOFs
    pub free_dofs: usize,
}

impl AnalysisResults {
    pub fn num_nodes(&self) -> usize {
        self.d.len() / 2
    }

    pub fn num_spans(&self) -> usize {
        self.end_forces.len()
    }

    /// Get node displacement
    pub fn node_displacement(&self, node: usize) -> BeamResult<NodeDisplacement> {
        self.check_node(node)?;
        Ok(NodeDisplacement::from_array([self.d[2 * node], self.d[2 * node + 1]]))
    }

    /// Get node reactions
    pub fn node_reactions(&self, node: usize) -> BeamResult<Reactions> {
        self.check_node(node)?;
        Ok(Reactions::from_array([
            self.support_reactions[2 * node],
            self.support_reactions[2 * node + 1],
        ]))
    }

    /// Get end forces of a span
    pub fn member_forces(&self, span: usize) -> BeamResult<MemberForces> {
        let forces = self.end_forces.get(span).ok_or_else(|| {
            BeamError::DimensionMismatch(format!(
                "span {} out of range for {} spans",
                span,
                self.num_spans()
            ))
        })?;
        Ok(MemberForces::from_end_forces(forces))
    }

    /// Get analysis summary
    pub fn summary(&self) -> AnalysisSummary {
        let mut summary = AnalysisSummary {
            num_nodes: self.num_nodes(),
            num_spans: self.num_spans(),
            total_dofs: self.d.len(),
            free_dofs: self.free_dofs,
            ..Default::default()
        };

        for node in 0..self.num_nodes() {
            let disp = self.d[2 * node].abs();
            if disp > summary.max_displacement {
                summary.max_displacement = disp;
                summary.max_disp_node = node;
            }

            let rxn = self.support_reactions[2 * node].abs();
            if rxn > summary.max_reaction {
                summary.max_reaction = rxn;
                summary.max_reaction_node = node;
            }
        }

        for diagram in &self.shear {
            let peak = diagram.abs_max();
            if peak.value.abs() > summary.max_shear.abs() {
                summary.max_shear = peak.value;
                summary.max_shear_span = diagram.span;
                summary.max_shear_x = diagram.offset + peak.x;
            }
        }

        for diagram in &self.moment {
            let peak = diagram.abs_max();
            if peak.value.abs() > summary.max_moment.abs() {
                summary.max_moment = peak.value;
                summary.max_moment_span = diagram.span;
                summary.max_moment_x = diagram.offset + peak.x;
            }
        }

        summary
    }

    fn check_node(&self, node: usize) -> BeamResult<()> {
        if node >= self.num_nodes() {
            return Err(BeamError::DimensionMismatch(format!(
                "node {} out of range for {} nodes",
                node,
                self.num_nodes()
            )));
        }
        Ok(())
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Maximum absolute vertical displacement
    pub max_displacement: f64,
    /// Node with maximum displacement
    pub max_disp_node: usize,
    /// Maximum absolute vertical reaction
    pub max_reaction: f64,
    /// Node with maximum reaction
    pub max_reaction_node: usize,
    /// Shear of largest magnitude (signed)
    pub max_shear: f64,
    pub max_shear_span: usize,
    /// Location of the peak shear from the left end of the beam
    pub max_shear_x: f64,
    /// Moment of largest magnitude (signed)
    pub max_moment: f64,
    pub max_moment_span: usize,
    /// Location of the peak moment from the left end of the beam
    pub max_moment_x: f64,
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of spans
    pub num_spans: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statics_check_is_relative() {
        assert!(StaticsCheck::new(10_000.0, 10_000.005, 1e-6).balanced);
        assert!(!StaticsCheck::new(10_000.0, 10_001.0, 1e-6).balanced);
        assert!(StaticsCheck::new(0.0, 0.0, 1e-6).balanced);
    }

    #[test]
    fn test_member_forces_from_vector() {
        let forces = MemberForces::from_end_forces(&Vec4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(forces.shear_left, 1.0);
        assert_eq!(forces.moment_right, 4.0);
    }
}
