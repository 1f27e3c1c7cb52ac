// Shared fixtures for the unit tests: lattices, point groups and a brute-force
// orbit count that does not go through the Hermite-form index folding.

use std::collections::HashMap;

use nalgebra::{Matrix3, Vector3};

use crate::symmetries::point_operators::{close_group, operators_from_cartesian, PointOperator};

/// All 48 signed permutation matrices: the full cubic group m-3m.
pub fn cubic_operators() -> Vec<PointOperator> {
    let permutations = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let mut ops = Vec::with_capacity(48);
    for perm in permutations {
        for signs in 0..8 {
            let mut op = PointOperator::zeros();
            for (row, &col) in perm.iter().enumerate() {
                op[(row, col)] = if signs & (1 << row) == 0 { 1 } else { -1 };
            }
            ops.push(op);
        }
    }
    ops
}

pub fn simple_cubic(a: f64) -> Matrix3<f64> {
    Matrix3::identity() * a
}

pub fn fcc_primitive(a: f64) -> Matrix3<f64> {
    Matrix3::new(0.0, 0.5, 0.5, 0.5, 0.0, 0.5, 0.5, 0.5, 0.0) * a
}

pub fn fcc_operators() -> Vec<PointOperator> {
    let cartesian: Vec<Matrix3<f64>> = cubic_operators().iter().map(|op| op.cast::<f64>()).collect();
    operators_from_cartesian(&fcc_primitive(1.0), &cartesian).expect("cubic group is integral on fcc")
}

pub fn hexagonal_primitive(a: f64, c: f64) -> Matrix3<f64> {
    Matrix3::new(
        a,
        0.0,
        0.0,
        -0.5 * a,
        0.5 * 3.0_f64.sqrt() * a,
        0.0,
        0.0,
        0.0,
        c,
    )
}

/// 6/mmm in the basis of [`hexagonal_primitive`], 24 operators.
pub fn hexagonal_operators() -> Vec<PointOperator> {
    let six_fold = Matrix3::new(1, 1, 0, -1, 0, 0, 0, 0, 1);
    let mirror = Matrix3::new(1, 0, 0, -1, -1, 0, 0, 0, 1);
    close_group(&[six_fold, mirror, -Matrix3::identity()]).expect("6/mmm is finite")
}

pub fn identity_only() -> Vec<PointOperator> {
    vec![Matrix3::identity()]
}

pub fn identity_and_inversion() -> Vec<PointOperator> {
    vec![Matrix3::identity(), -Matrix3::identity()]
}

/// Distinct k-points counted directly on fractional coordinates modulo 1.
///
/// Grid points are enumerated in the box spanned by the diagonal of the
/// lower-triangular `super_to_direct`, a different fundamental domain from
/// the one the orbit counter uses. Every coordinate is a multiple of
/// `1 / (2 det S)`, so points are keyed by their numerators modulo that.
pub fn brute_force_distinct(
    super_to_direct: &Matrix3<i64>,
    shift: &Vector3<f64>,
    ops: &[PointOperator],
) -> usize {
    let inverse = super_to_direct
        .cast::<f64>()
        .try_inverse()
        .expect("superlattice must be non-singular");
    let modulus = 2 * super_to_direct.cast::<f64>().determinant().round().abs() as i64;

    let mut points = Vec::new();
    for i in 0..super_to_direct[(0, 0)] {
        for j in 0..super_to_direct[(1, 1)] {
            for k in 0..super_to_direct[(2, 2)] {
                let n = Vector3::new(i as f64, j as f64, k as f64);
                points.push(inverse * (n + shift));
            }
        }
    }

    let index: HashMap<[i64; 3], usize> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (key_modulo_one(p, modulus), i))
        .collect();
    assert_eq!(index.len(), points.len(), "grid points must be distinct modulo 1");

    let mut visited = vec![false; points.len()];
    let mut distinct = 0;
    for i in 0..points.len() {
        if visited[i] {
            continue;
        }
        distinct += 1;
        for op in ops {
            let image = op.cast::<f64>() * points[i];
            let j = index
                .get(&key_modulo_one(&image, modulus))
                .expect("grid must be closed under the point group");
            visited[*j] = true;
        }
    }
    distinct
}

fn key_modulo_one(p: &Vector3<f64>, modulus: i64) -> [i64; 3] {
    let m = modulus as f64;
    [0, 1, 2].map(|c| ((p[c] * m).round() as i64).rem_euclid(modulus))
}
