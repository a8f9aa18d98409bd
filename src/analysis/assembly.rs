//! Direct stiffness assembly of the global system

use crate::elements::BeamElement;
use crate::error::{BeamError, BeamResult};
use crate::loads::Load;
use crate::math::{Mat, Vec as DVec, Vec4};

/// Number of global DOFs for a beam with `n_elements` spans
pub fn num_dofs(n_elements: usize) -> usize {
    2 * (n_elements + 1)
}

/// Assemble the global stiffness matrix
///
/// Element `i` occupies rows and columns `[2i, 2i + 4)`. Neighbouring
/// elements overlap on the two DOFs of their shared node, where their
/// contributions add.
pub fn global_stiffness_matrix(elements: &[BeamElement]) -> Mat {
    let n = num_dofs(elements.len());
    let mut k = Mat::zeros(n, n);

    for (idx, element) in elements.iter().enumerate() {
        let base = 2 * idx;
        let ke = element.stiffness();
        log::trace!("element {} stiffness: {}", idx, ke);

        for r in 0..4 {
            for c in 0..4 {
                k[(base + r, base + c)] += ke[(r, c)];
            }
        }
    }

    log::debug!("global stiffness matrix ({}x{}): {}", n, n, k);
    k
}

/// Sum the fixed end reactions of every load on each span
///
/// `loads[i]` holds the loads on span `i`.
pub fn local_fixed_end_forces(
    elements: &[BeamElement],
    loads: &[Vec<Load>],
) -> BeamResult<Vec<Vec4>> {
    if loads.len() != elements.len() {
        return Err(BeamError::DimensionMismatch(format!(
            "{} load lists supplied for {} spans",
            loads.len(),
            elements.len()
        )));
    }

    let mut forces = Vec::with_capacity(elements.len());
    for (i, (element, span_loads)) in elements.iter().zip(loads).enumerate() {
        let length = element.length();
        let mut qf = Vec4::zeros();

        for (j, load) in span_loads.iter().enumerate() {
            load.validate(length)
                .map_err(|e| e.context(&format!("load {} on span {}", j, i)))?;
            qf += load.equivalent_nodal_reactions(length);
        }

        log::trace!("span {} fixed end forces: {}", i, qf.transpose());
        forces.push(qf);
    }

    Ok(forces)
}

/// Place the per-span fixed end forces into the global vector
pub fn global_fixed_end_forces(local_forces: &[Vec4]) -> DVec {
    let mut qf = DVec::zeros(num_dofs(local_forces.len()));

    for (idx, f) in local_forces.iter().enumerate() {
        let base = 2 * idx;
        for r in 0..4 {
            qf[base + r] += f[r];
        }
    }

    log::debug!("global fixed end forces: {}", qf.transpose());
    qf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{ConcentratedMoment, DistributedLoad, PointLoad};
    use approx::assert_relative_eq;

    fn two_spans() -> Vec<BeamElement> {
        vec![
            BeamElement::new(200e9, 1e-4, 4.0).unwrap(),
            BeamElement::new(200e9, 2e-4, 3.0).unwrap(),
        ]
    }

    #[test]
    fn test_shared_node_accumulates() {
        let elements = two_spans();
        let k = global_stiffness_matrix(&elements);
        let (k0, k1) = (elements[0].stiffness(), elements[1].stiffness());

        assert_eq!(k.shape(), (6, 6));
        assert_relative_eq!(k[(0, 0)], k0[(0, 0)]);
        assert_relative_eq!(k[(2, 2)], k0[(2, 2)] + k1[(0, 0)], max_relative = 1e-12);
        assert_relative_eq!(k[(3, 3)], k0[(3, 3)] + k1[(1, 1)], max_relative = 1e-12);
        assert_relative_eq!(k[(2, 3)], k0[(2, 3)] + k1[(0, 1)], max_relative = 1e-12);
        assert_relative_eq!(k[(5, 5)], k1[(3, 3)]);
        // Nodes 0 and 2 are not connected
        assert_eq!(k[(0, 4)], 0.0);
        assert_eq!(k[(1, 5)], 0.0);
    }

    #[test]
    fn test_global_stiffness_is_symmetric() {
        let k = global_stiffness_matrix(&two_spans());
        assert_eq!(k, k.transpose());
    }

    #[test]
    fn test_fixed_end_forces_sum_per_span() {
        let elements = two_spans();
        let loads = vec![
            vec![
                Load::from(PointLoad::new(1_000.0, 2.0)),
                Load::from(DistributedLoad::full_span(500.0, 4.0)),
            ],
            vec![Load::from(ConcentratedMoment::new(300.0, 1.0))],
        ];

        let local = local_fixed_end_forces(&elements, &loads).unwrap();
        let expected = loads[0][0].equivalent_nodal_reactions(4.0)
            + loads[0][1].equivalent_nodal_reactions(4.0);
        assert_relative_eq!(local[0], expected, max_relative = 1e-12);

        let qf = global_fixed_end_forces(&local);
        assert_eq!(qf.len(), 6);
        assert_relative_eq!(qf[0], local[0][0]);
        assert_relative_eq!(qf[2], local[0][2] + local[1][0], max_relative = 1e-12);
        assert_relative_eq!(qf[3], local[0][3] + local[1][1], max_relative = 1e-12);
        assert_relative_eq!(qf[5], local[1][3]);
    }

    #[test]
    fn test_load_count_mismatch() {
        let err = local_fixed_end_forces(&two_spans(), &[vec![]]).unwrap_err();
        assert!(matches!(err, BeamError::DimensionMismatch(_)));
    }

    #[test]
    fn test_load_off_span_names_location() {
        let loads = vec![vec![], vec![Load::from(PointLoad::new(10.0, 3.5))]];
        let err = local_fixed_end_forces(&two_spans(), &loads).unwrap_err();

        match err {
            BeamError::InvalidGeometry(msg) => assert!(msg.starts_with("load 0 on span 1")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
