//! Support conditions and the reduced solve
//!
//! Every global DOF is either known or unknown in displacement, and the
//! opposite in reaction. Unknown slots carry their index into the vector of
//! unknowns so the reduced system can be scattered back.

use serde::{Deserialize, Serialize};

use crate::elements::SupportType;
use crate::error::{BeamError, BeamResult};
use crate::math::{self, Mat, Vec as DVec};

/// One DOF slot of a displacement or reaction vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Dof {
    /// Prescribed value
    Known(f64),
    /// To be solved for; holds the position among the unknowns in DOF order
    Unknown(usize),
}

impl Dof {
    pub fn is_known(&self) -> bool {
        matches!(self, Dof::Known(_))
    }

    pub fn known_value(&self) -> Option<f64> {
        match self {
            Dof::Known(value) => Some(*value),
            Dof::Unknown(_) => None,
        }
    }
}

/// Displacement slots for the nodes of a beam: restrained DOFs are known zero
pub fn assemble_displacements(supports: &[SupportType]) -> Vec<Dof> {
    let mut next = 0;
    let mut d0 = Vec::with_capacity(2 * supports.len());

    for support in supports {
        for restrained in support.restraints() {
            if restrained {
                d0.push(Dof::Known(0.0));
            } else {
                d0.push(Dof::Unknown(next));
                next += 1;
            }
        }
    }

    d0
}

/// Reaction slots for the nodes of a beam
///
/// Restrained DOFs carry an unknown reaction. Free DOFs carry a known value:
/// the applied nodal load from `r0` if given, otherwise zero.
pub fn assemble_reactions(supports: &[SupportType], r0: Option<&[f64]>) -> BeamResult<Vec<Dof>> {
    let n = 2 * supports.len();
    if let Some(r0) = r0 {
        if r0.len() != n {
            return Err(BeamError::DimensionMismatch(format!(
                "nodal load vector has {} entries, expected {} for {} nodes",
                r0.len(),
                n,
                supports.len()
            )));
        }
    }

    let mut next = 0;
    let mut reactions = Vec::with_capacity(n);

    for (node, support) in supports.iter().enumerate() {
        for (k, restrained) in support.restraints().into_iter().enumerate() {
            if restrained {
                reactions.push(Dof::Unknown(next));
                next += 1;
            } else {
                let applied = r0.map_or(0.0, |r0| r0[2 * node + k]);
                reactions.push(Dof::Known(applied));
            }
        }
    }

    Ok(reactions)
}

/// Solve for the unknown displacements
///
/// Forms `K[J,J] · d_J = R0[J] - Qf[J] - K[J,C] · d_C` where `J` are the
/// unknown DOFs and `C` the prescribed ones. Returns the unknowns in DOF
/// order, or an empty vector when every DOF is restrained.
pub fn displacement(d0: &[Dof], k: &Mat, qf: &DVec, r0: &[Dof]) -> BeamResult<DVec> {
    let n = d0.len();
    check_len("stiffness matrix rows", k.nrows(), n)?;
    check_len("stiffness matrix columns", k.ncols(), n)?;
    check_len("fixed end force vector", qf.len(), n)?;
    check_len("reaction vector", r0.len(), n)?;
    check_unknown_order(d0)?;

    let free: Vec<usize> = (0..n).filter(|&i| !d0[i].is_known()).collect();
    if free.is_empty() {
        log::debug!("all {} DOFs restrained, displacements are zero", n);
        return Ok(DVec::zeros(0));
    }

    let mut rhs = DVec::zeros(free.len());
    for (row, &i) in free.iter().enumerate() {
        let applied = r0[i].known_value().ok_or_else(|| {
            BeamError::DimensionMismatch(format!(
                "DOF {} has both displacement and reaction unknown",
                i
            ))
        })?;
        rhs[row] = applied - qf[i];

        for (j, dof) in d0.iter().enumerate() {
            if let Dof::Known(value) = dof {
                rhs[row] -= k[(i, j)] * value;
            }
        }
    }

    let k_free = math::submatrix(k, &free);
    log::trace!("reduced stiffness matrix: {}", k_free);

    let d_free = math::solve_cholesky(&k_free, &rhs).ok_or_else(|| {
        BeamError::StructurallyUnstable(format!(
            "reduced stiffness matrix over {} free DOFs {:?} is singular, the beam needs more restraint",
            free.len(),
            free
        ))
    })?;

    log::debug!("unknown displacements: {}", d_free.transpose());
    Ok(d_free)
}

/// Scatter the solved unknowns back and compute the global reactions
///
/// Returns the full displacement vector `d` and `R = K · d + Qf`.
pub fn reaction(d0: &[Dof], d_unknown: &DVec, k: &Mat, qf: &DVec) -> BeamResult<(DVec, DVec)> {
    let n = d0.len();
    check_len("stiffness matrix rows", k.nrows(), n)?;
    check_len("stiffness matrix columns", k.ncols(), n)?;
    check_len("fixed end force vector", qf.len(), n)?;

    let unknowns = check_unknown_order(d0)?;
    check_len("unknown displacement vector", d_unknown.len(), unknowns)?;

    let d = DVec::from_iterator(
        n,
        d0.iter().map(|dof| match *dof {
            Dof::Known(value) => value,
            Dof::Unknown(idx) => d_unknown[idx],
        }),
    );

    let r = k * &d + qf;
    log::debug!("global displacements: {}", d.transpose());
    log::debug!("global reactions: {}", r.transpose());

    Ok((d, r))
}

/// Largest difference between recomputed and prescribed reactions
pub fn reaction_residual(r: &DVec, r0: &[Dof]) -> f64 {
    r0.iter()
        .enumerate()
        .filter_map(|(i, dof)| dof.known_value().map(|value| (r[i] - value).abs()))
        .fold(0.0, f64::max)
}

/// Unknown slots must be numbered 0, 1, 2, ... in DOF order; returns the count
fn check_unknown_order(d0: &[Dof]) -> BeamResult<usize> {
    let mut next = 0;
    for (i, dof) in d0.iter().enumerate() {
        if let Dof::Unknown(idx) = *dof {
            if idx != next {
                return Err(BeamError::DimensionMismatch(format!(
                    "DOF {} is unknown number {}, expected {}",
                    i, idx, next
                )));
            }
            next += 1;
        }
    }
    Ok(next)
}

fn check_len(what: &str, actual: usize, expected: usize) -> BeamResult<()> {
    if actual != expected {
        return Err(BeamError::DimensionMismatch(format!(
            "{} has size {}, expected {}",
            what, actual, expected
        )));
    }
    Ok(())
}
