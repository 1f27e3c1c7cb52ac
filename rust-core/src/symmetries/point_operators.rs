use nalgebra::{Matrix2, Matrix3};

use crate::error::KPointError;
use crate::linalg::{integral_matrix, inverse, round_half_up};

/// Crystallographic point operation on fractional coordinates, `x' = x * R`.
pub type PointOperator = Matrix3<i64>;

/// Point operation restricted to the plane of the first two conventional vectors.
pub type PlaneOperator = Matrix2<i64>;

/// Largest crystallographic point group in three dimensions.
const MAX_POINT_GROUP_ORDER: usize = 48;

/// Identity, recognised by its trace.
pub fn is_identity(op: &PointOperator) -> bool {
    op.trace() == 3
}

/// Pure inversion, recognised by its trace.
pub fn is_inversion(op: &PointOperator) -> bool {
    op.trace() == -3
}

/// A group with at most two operators, each the identity or the inversion.
pub fn is_triclinic(ops: &[PointOperator]) -> bool {
    ops.len() <= 2 && ops.iter().all(|op| is_identity(op) || is_inversion(op))
}

/// Complete the group to its Laue class by adding `-R` for every `R` when the
/// inversion is missing. Reciprocal space always carries time-reversal
/// symmetry, so this is the group k-point grids should be reduced with.
pub fn laue_completion(ops: &[PointOperator]) -> Vec<PointOperator> {
    let mut completed = ops.to_vec();
    if !ops.iter().any(is_inversion) {
        completed.extend(ops.iter().map(|op| -op));
    }
    completed
}

/// Close a set of generators into a finite group, identity first.
///
/// # Errors
/// [`KPointError::InvalidLattice`] when the products exceed the order of any
/// crystallographic point group, i.e. the generators are not crystallographic.
pub fn close_group(generators: &[PointOperator]) -> Result<Vec<PointOperator>, KPointError> {
    let mut group = vec![PointOperator::identity()];
    for generator in generators {
        if !group.contains(generator) {
            group.push(*generator);
        }
    }

    let mut grown = true;
    while grown {
        grown = false;
        let snapshot = group.clone();
        for a in &snapshot {
            for b in &snapshot {
                let product = a * b;
                if !group.contains(&product) {
                    group.push(product);
                    grown = true;
                }
            }
        }
        if group.len() > MAX_POINT_GROUP_ORDER {
            return Err(KPointError::InvalidLattice(format!(
                "operators generate more than {} elements",
                MAX_POINT_GROUP_ORDER
            )));
        }
    }
    Ok(group)
}

/// Express Cartesian operators `Q` (acting as `r' = r * Q`) in the fractional
/// basis whose rows are `prim_vectors`: `R = A Q A^-1`.
pub fn operators_from_cartesian(
    prim_vectors: &Matrix3<f64>,
    cartesian_ops: &[Matrix3<f64>],
) -> Result<Vec<PointOperator>, KPointError> {
    let cartesian_to_prim = inverse(prim_vectors)?;
    cartesian_ops
        .iter()
        .map(|q| {
            integral_matrix(&(prim_vectors * q * cartesian_to_prim))
                .ok_or(KPointError::NonIntegralOperator)
        })
        .collect()
}

/// Operators that leave the stacking axis alone, written in the conventional
/// basis and cut down to their in-plane 2x2 block. Duplicates are dropped,
/// keeping the first occurrence.
pub fn in_plane_operators(
    ops: &[PointOperator],
    conventional_to_prim: &Matrix3<f64>,
    prim_to_conventional: &Matrix3<f64>,
) -> Vec<PlaneOperator> {
    let mut plane_ops: Vec<PlaneOperator> = Vec::new();
    for op in ops {
        let conventional_op = conventional_to_prim * op.cast::<f64>() * prim_to_conventional;
        let couples_axis = [(0, 2), (1, 2), (2, 0), (2, 1)]
            .iter()
            .any(|&(r, c)| round_half_up(conventional_op[(r, c)]) != 0.0);
        if couples_axis {
            continue;
        }

        let op_2d = Matrix2::new(
            round_half_up(conventional_op[(0, 0)]) as i64,
            round_half_up(conventional_op[(0, 1)]) as i64,
            round_half_up(conventional_op[(1, 0)]) as i64,
            round_half_up(conventional_op[(1, 1)]) as i64,
        );
        if !plane_ops.contains(&op_2d) {
            plane_ops.push(op_2d);
        }
    }
    plane_ops
}
