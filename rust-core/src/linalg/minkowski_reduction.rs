use nalgebra::{Matrix3, Vector3};

use crate::interfaces::Dimension;
use crate::linalg::linalg_utils::round_half_up;

/// Shortest lattice vector length reachable from the first `dimension` rows of
/// `super_vectors` by pairwise Minkowski-style reduction.
///
/// Every ordered pair `(v_i, v_j)` is visited cyclically; `v_j` is replaced by
/// `v_j - round(v_i.v_j / |v_i|^2) v_i` whenever that is strictly shorter,
/// until a full pass changes nothing. In 3D one more combination
/// `v_0 - s01 v_1 - s02 v_2` is checked when the three dot-product signs
/// multiply to -1. The running minimum over every vector seen is returned, so
/// a short intermediate vector is never lost.
///
/// The rows are reduced on a local copy; the caller's matrix is untouched.
pub fn minimum_periodic_distance(super_vectors: &Matrix3<f64>, dimension: Dimension) -> f64 {
    let n = dimension.rank();
    let mut vectors: Vec<Vector3<f64>> = (0..n).map(|i| super_vectors.row(i).transpose()).collect();

    let mut min_mag_sq = vectors
        .iter()
        .map(|v| v.norm_squared())
        .fold(f64::INFINITY, f64::min);

    let mut minimizing = true;
    while minimizing {
        minimizing = false;
        for i in 0..n {
            let mag_sq = vectors[i].norm_squared();
            if mag_sq == 0.0 {
                continue;
            }
            for increment in 1..n {
                let j = (i + increment) % n;
                let shift = round_half_up(vectors[i].dot(&vectors[j]) / mag_sq);
                let old_mag_sq = vectors[j].norm_squared();
                min_mag_sq = min_mag_sq.min(old_mag_sq);
                if shift == 0.0 {
                    continue;
                }
                let candidate = vectors[j] - vectors[i] * shift;
                let new_mag_sq = candidate.norm_squared();
                if new_mag_sq < old_mag_sq {
                    minimizing = true;
                    vectors[j] = candidate;
                    min_mag_sq = min_mag_sq.min(new_mag_sq);
                }
            }
        }
    }

    if n == 3 {
        let s01 = sign(vectors[0].dot(&vectors[1]));
        let s02 = sign(vectors[0].dot(&vectors[2]));
        let s12 = sign(vectors[1].dot(&vectors[2]));
        if s01 * s02 * s12 == -1.0 {
            let combined = vectors[0] - vectors[1] * s01 - vectors[2] * s02;
            min_mag_sq = min_mag_sq.min(combined.norm_squared());
        }
    }

    min_mag_sq.sqrt()
}

/// Minimum periodic distance of a 2D basis given as two vectors.
pub fn minimum_periodic_distance_2d(a: Vector3<f64>, b: Vector3<f64>) -> f64 {
    let stacked = Matrix3::from_rows(&[a.transpose(), b.transpose(), Vector3::zeros().transpose()]);
    minimum_periodic_distance(&stacked, Dimension::_2D)
}

// Sign as -1, 0 or +1 (0 for an exact zero, unlike f64::signum)
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
