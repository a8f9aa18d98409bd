//! Element end-force recovery

use crate::elements::BeamElement;
use crate::error::{BeamError, BeamResult};
use crate::math::{Vec as DVec, Vec4};

/// End forces `[V_left, M_left, V_right, M_right]` of every element
///
/// Each element takes its slice of the global displacements `d` and adds
/// its fixed end forces: `F_i = k_i · u_i + Qf_i`.
pub fn internal_forces(
    elements: &[BeamElement],
    d: &DVec,
    local_qf: &[Vec4],
) -> BeamResult<Vec<Vec4>> {
    let expected = 2 * (elements.len() + 1);
    if d.len() != expected {
        return Err(BeamError::DimensionMismatch(format!(
            "displacement vector has {} entries, expected {}",
            d.len(),
            expected
        )));
    }
    if local_qf.len() != elements.len() {
        return Err(BeamError::DimensionMismatch(format!(
            "{} fixed end force vectors for {} elements",
            local_qf.len(),
            elements.len()
        )));
    }

    let forces: Vec<Vec4> = elements
        .iter()
        .zip(local_qf)
        .enumerate()
        .map(|(i, (element, qf))| {
            let u = Vec4::from_iterator(d.rows(2 * i, 4).iter().copied());
            let f = element.stiffness() * u + qf;
            log::trace!("element {} end forces: {}", i, f.transpose());
            f
        })
        .collect();

    Ok(forces)
}
