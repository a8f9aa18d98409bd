//! Mathematical utilities for beam stiffness calculations

use nalgebra::{DMatrix, DVector, Matrix4, Vector4};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 4x4 matrix for element stiffness [d_i, θ_i, d_j, θ_j]
pub type Mat4 = Matrix4<f64>;
/// 4-element vector for element forces/displacements
pub type Vec4 = Vector4<f64>;

/// Smallest accepted Cholesky pivot relative to the matching diagonal entry.
/// Anything below this is treated as a rigid-body mode.
pub const SINGULAR_PIVOT_RATIO: f64 = 1e-12;

/// Compute the local stiffness matrix for a 2D Euler-Bernoulli beam element
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `i` - Moment of inertia
/// * `length` - Element length
///
/// # Returns
/// 4x4 local stiffness matrix in DOF order [d_i, θ_i, d_j, θ_j]
pub fn beam_local_stiffness(e: f64, i: f64, length: f64) -> Mat4 {
    let l = length;
    let l2 = l * l;
    let ei_l3 = e * i / (l2 * l);

    #[rustfmt::skip]
    let data = [
        12.0,     6.0 * l,   -12.0,    6.0 * l,
        6.0 * l,  4.0 * l2,  -6.0 * l, 2.0 * l2,
        -12.0,    -6.0 * l,  12.0,     -6.0 * l,
        6.0 * l,  2.0 * l2,  -6.0 * l, 4.0 * l2,
    ];

    Mat4::from_row_slice(&data) * ei_l3
}

/// Fixed end reactions for a point load
///
/// # Arguments
/// * `p` - Load magnitude (downward positive)
/// * `a` - Distance from the left end to the load
/// * `length` - Span length
pub fn fer_point_load(p: f64, a: f64, length: f64) -> Vec4 {
    let l = length;
    let b = l - a;
    let l2 = l * l;

    Vec4::new(
        b * b * (3.0 * a + b) / l,
        a * b * b,
        a * a * (a + 3.0 * b) / l,
        -a * a * b,
    ) * (p / l2)
}

/// Fixed end reactions for a uniform load over part of a span
///
/// # Arguments
/// * `q` - Load intensity (downward positive)
/// * `a` - Distance from the left end to the start of the load
/// * `loaded` - Loaded length
/// * `length` - Span length
pub fn fer_distributed_load(q: f64, a: f64, loaded: f64, length: f64) -> Vec4 {
    let l = length;
    let b = l - a - loaded;
    let l2 = l * l;
    let l3 = l2 * l;
    let l4 = l2 * l2;

    let v_i = 1.0 - a / l4 * (2.0 * l3 - 2.0 * a * a * l + a.powi(3))
        - b.powi(3) / l4 * (2.0 * l - b);
    let m_i = l / 6.0
        * (1.0
            - a * a / l4 * (6.0 * l2 - 8.0 * a * l + 3.0 * a * a)
            - b.powi(3) / l4 * (4.0 * l - 3.0 * b));
    // Mirror image of v_i with a and b swapped
    let v_j = 1.0 - a.powi(3) / l4 * (2.0 * l - a)
        - b / l4 * (2.0 * l3 - 2.0 * b * b * l + b.powi(3));
    let m_j = -l / 6.0
        * (1.0
            - a.powi(3) / l4 * (4.0 * l - 3.0 * a)
            - b * b / l4 * (6.0 * l2 - 8.0 * b * l + 3.0 * b * b));

    Vec4::new(v_i, m_i, v_j, m_j) * (q * l / 2.0)
}

/// Fixed end reactions for a concentrated moment
///
/// # Arguments
/// * `m` - Moment magnitude (counterclockwise positive)
/// * `a` - Distance from the left end to the moment
/// * `length` - Span length
pub fn fer_concentrated_moment(m: f64, a: f64, length: f64) -> Vec4 {
    let l = length;
    let b = l - a;
    let l2 = l * l;

    // Negated work-equivalent nodal load (M/L²)·[-6ab/L, b(b-2a), 6ab/L, a(a-2b)]
    Vec4::new(
        6.0 * a * b / l,
        -b * (b - 2.0 * a),
        -6.0 * a * b / l,
        -a * (a - 2.0 * b),
    ) * (m / l2)
}

/// Extract the square submatrix at the given row/column indices
pub fn submatrix(k: &Mat, indices: &[usize]) -> Mat {
    Mat::from_fn(indices.len(), indices.len(), |r, c| k[(indices[r], indices[c])])
}

/// Solve a symmetric positive definite system using Cholesky decomposition
///
/// Returns `None` when the matrix is not positive definite, including the
/// positive semi-definite case where roundoff leaves a near-zero pivot.
pub fn solve_cholesky(a: &Mat, b: &Vec) -> Option<Vec> {
    let chol = a.clone().cholesky()?;

    let l = chol.l_dirty();
    for j in 0..a.nrows() {
        let pivot = l[(j, j)] * l[(j, j)];
        // Written so that NaN pivots are rejected too
        if !(pivot > 0.0 && pivot >= SINGULAR_PIVOT_RATIO * a[(j, j)]) {
            return None;
        }
    }

    Some(chol.solve(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_local_stiffness_symmetry() {
        let k = beam_local_stiffness(200e9, 1e-4, 4.0);

        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_local_stiffness_entries() {
        let (e, i, l) = (200e9, 1e-4, 4.0);
        let k = beam_local_stiffness(e, i, l);
        let ei = e * i;

        assert_relative_eq!(k[(0, 0)], 12.0 * ei / l.powi(3), max_relative = 1e-12);
        assert_relative_eq!(k[(1, 1)], 4.0 * ei / l, max_relative = 1e-12);
        assert_relative_eq!(k[(1, 3)], 2.0 * ei / l, max_relative = 1e-12);
        assert_relative_eq!(k[(2, 3)], -6.0 * ei / (l * l), max_relative = 1e-12);
    }

    #[test]
    fn test_local_stiffness_rigid_body_modes() {
        let l = 3.0;
        let k = beam_local_stiffness(200e9, 1e-4, l);

        // Rigid translation and rigid rotation produce no end forces
        let translation = Vec4::new(1.0, 0.0, 1.0, 0.0);
        let rotation = Vec4::new(0.0, 1.0, l, 1.0);
        assert!((k * translation).amax() < 1e-3);
        assert!((k * rotation).amax() < 1e-3);
    }

    #[test]
    fn test_fer_point_load_midspan() {
        let (p, l) = (10_000.0, 4.0);
        let fer = fer_point_load(p, l / 2.0, l);

        assert_relative_eq!(fer[0], p / 2.0, max_relative = 1e-12);
        assert_relative_eq!(fer[1], p * l / 8.0, max_relative = 1e-12);
        assert_relative_eq!(fer[2], p / 2.0, max_relative = 1e-12);
        assert_relative_eq!(fer[3], -p * l / 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_fer_uniform_full_span() {
        let (q, l) = (5_000.0, 6.0);
        let fer = fer_distributed_load(q, 0.0, l, l);

        assert_relative_eq!(fer[0], q * l / 2.0, max_relative = 1e-12);
        assert_relative_eq!(fer[1], q * l * l / 12.0, max_relative = 1e-12);
        assert_relative_eq!(fer[2], q * l / 2.0, max_relative = 1e-12);
        assert_relative_eq!(fer[3], -q * l * l / 12.0, max_relative = 1e-12);
    }

    #[test]
    fn test_fer_uniform_half_span() {
        let (q, l) = (1_000.0, 8.0);

        // Load on the left half: 13qL/32 and 3qL/32, 11qL²/192 and 5qL²/192
        let left = fer_distributed_load(q, 0.0, l / 2.0, l);
        assert_relative_eq!(left[0], 13.0 * q * l / 32.0, max_relative = 1e-12);
        assert_relative_eq!(left[1], 11.0 * q * l * l / 192.0, max_relative = 1e-12);
        assert_relative_eq!(left[2], 3.0 * q * l / 32.0, max_relative = 1e-12);
        assert_relative_eq!(left[3], -5.0 * q * l * l / 192.0, max_relative = 1e-12);

        // Load on the right half mirrors it
        let right = fer_distributed_load(q, l / 2.0, l / 2.0, l);
        assert_relative_eq!(right[0], left[2], max_relative = 1e-12);
        assert_relative_eq!(right[1], -left[3], max_relative = 1e-12);
        assert_relative_eq!(right[2], left[0], max_relative = 1e-12);
        assert_relative_eq!(right[3], -left[1], max_relative = 1e-12);
    }

    #[test]
    fn test_fer_interior_patch_balances_load() {
        let (q, a, loaded, l) = (2_000.0, 1.0, 2.5, 6.0);
        let fer = fer_distributed_load(q, a, loaded, l);

        assert_relative_eq!(fer[0] + fer[2], q * loaded, max_relative = 1e-12);

        // Reactions balance the load's moment about the left end
        let centroid = a + loaded / 2.0;
        assert_relative_eq!(
            fer[1] + fer[3] + fer[2] * l,
            q * loaded * centroid,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_fer_concentrated_moment_balances_applied_moment() {
        let (m, a, l) = (3_000.0, 1.5, 5.0);
        let fer = fer_concentrated_moment(m, a, l);

        assert_relative_eq!(fer[0] + fer[2], 0.0, epsilon = 1e-9);
        // Reaction couple about the left end cancels the counterclockwise moment
        assert_relative_eq!(fer[1] + fer[3] + fer[2] * l, -m, max_relative = 1e-12);
    }

    #[test]
    fn test_solve_cholesky() {
        let a = Mat::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = Vec::from_vec(vec![1.0, 2.0]);
        let x = solve_cholesky(&a, &b).unwrap();

        assert_relative_eq!(x[0], 1.0 / 11.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 7.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_cholesky_rejects_singular() {
        let k = beam_local_stiffness(200e9, 1e-4, 4.0);
        let k = Mat::from_fn(4, 4, |r, c| k[(r, c)]);
        let b = Vec::from_element(4, 1.0);

        assert!(solve_cholesky(&k, &b).is_none());
    }

    #[test]
    fn test_submatrix() {
        let k = Mat::from_fn(4, 4, |r, c| (r * 4 + c) as f64);
        let sub = submatrix(&k, &[1, 3]);

        assert_eq!(sub, Mat::from_row_slice(2, 2, &[5.0, 7.0, 13.0, 15.0]));
    }
}
