use nalgebra::{Matrix3, Vector3};

use crate::config::{COORDINATE_TOLERANCE, INTEGRALITY_TOLERANCE};
use crate::error::KPointError;
use crate::linalg::{div_floor, hermite_normal_form, integral_matrix, lower_triangular_inverse, round_half_up};
use crate::symmetries::point_operators::PointOperator;

/// Point operators expressed on the k-point grid of one superlattice and shift.
///
/// Grid points are integer triples `n` in the fundamental domain of the
/// Hermite form of `S^T`; the k-point itself sits at `S^-1 (n + shift)` in
/// primitive reciprocal coordinates. Every operator `R` becomes the integer
/// matrix `K = S R S^-1` plus the integer offset `K shift - shift`, so an image
/// is `K n + offset` folded back into the domain.
///
/// Building this value validates the superlattice/shift pair once; counting
/// and mapping afterwards cannot fail.
#[derive(Debug, Clone)]
pub struct KPointOrbits {
    /// Hermite form of `S^T`; its rows generate the equivalences of `n`.
    canonical: Matrix3<i64>,
    operators: Vec<Matrix3<i64>>,
    offsets: Vec<Vector3<i64>>,
    super_to_direct_inverse: Matrix3<f64>,
    shift: Vector3<f64>,
}

impl KPointOrbits {
    /// Express `point_operators` on the grid of `super_to_direct` (Hermite
    /// normal form) shifted by `shift`.
    ///
    /// Returns `Ok(None)` when some operator does not map the shifted grid onto
    /// itself, i.e. this transform/shift pair is unusable for the group.
    pub fn new(
        super_to_direct: &Matrix3<i64>,
        shift: &Vector3<f64>,
        point_operators: &[PointOperator],
    ) -> Result<Option<Self>, KPointError> {
        let super_to_direct_inverse = lower_triangular_inverse(super_to_direct)?;
        let super_real = super_to_direct.cast::<f64>();

        let mut operators = Vec::with_capacity(point_operators.len());
        let mut offsets = Vec::with_capacity(point_operators.len());
        for op in point_operators {
            let conjugated = super_real * op.cast::<f64>() * super_to_direct_inverse;
            let Some(kpoint_op) = integral_matrix(&conjugated) else {
                return Ok(None);
            };

            let offset = kpoint_op.cast::<f64>() * shift - shift;
            let rounded = offset.map(round_half_up);
            if (offset - rounded).amax() > INTEGRALITY_TOLERANCE {
                return Ok(None);
            }

            operators.push(kpoint_op);
            offsets.push(rounded.map(|x| x as i64));
        }

        let canonical = hermite_normal_form(&super_to_direct.transpose())?;

        Ok(Some(KPointOrbits {
            canonical,
            operators,
            offsets,
            super_to_direct_inverse,
            shift: *shift,
        }))
    }

    /// Extent of the fundamental domain along each axis (x fastest).
    pub fn grid_extents(&self) -> [usize; 3] {
        [
            self.canonical[(0, 0)] as usize,
            self.canonical[(1, 1)] as usize,
            self.canonical[(2, 2)] as usize,
        ]
    }

    pub fn num_total_kpoints(&self) -> usize {
        self.grid_extents().iter().product()
    }

    pub fn shift(&self) -> &Vector3<f64> {
        &self.shift
    }

    /// Number of orbit representatives: points no operator maps onto a
    /// smaller index.
    pub fn count_distinct(&self) -> usize {
        let mut distinct = 0;
        for (index, point) in self.grid_points().enumerate() {
            let has_smaller_image = self
                .operators
                .iter()
                .zip(&self.offsets)
                .any(|(op, offset)| self.image_index(op, offset, &point) < index);
            if !has_smaller_image {
                distinct += 1;
            }
        }
        distinct
    }

    /// For every grid point, the smallest index in its orbit.
    pub fn representatives(&self) -> Vec<usize> {
        self.grid_points()
            .enumerate()
            .map(|(index, point)| {
                self.operators
                    .iter()
                    .zip(&self.offsets)
                    .map(|(op, offset)| self.image_index(op, offset, &point))
                    .fold(index, usize::min)
            })
            .collect()
    }

    /// Fractional coordinates of every grid point in the primitive reciprocal
    /// basis, reduced into `[0, 1)`.
    pub fn coordinates(&self) -> Vec<Vector3<f64>> {
        self.grid_points()
            .map(|point| {
                let kpoint = self.super_to_direct_inverse * (point.cast::<f64>() + self.shift);
                kpoint.map(reduce_unit_interval)
            })
            .collect()
    }

    /// Grid points in index order: nested loops with x varying fastest.
    fn grid_points(&self) -> impl Iterator<Item = Vector3<i64>> {
        let [nx, ny, nz] = self.grid_extents();
        let (nx, ny, nz) = (nx as i64, ny as i64, nz as i64);
        (0..nz).flat_map(move |k| {
            (0..ny).flat_map(move |j| (0..nx).map(move |i| Vector3::new(i, j, k)))
        })
    }

    fn image_index(&self, op: &Matrix3<i64>, offset: &Vector3<i64>, point: &Vector3<i64>) -> usize {
        let mut mapped = op * point + offset;
        self.fold_into_cell(&mut mapped);
        self.index_of(&mapped)
    }

    /// Subtract rows of the canonical matrix, last axis first, until the point
    /// lies in the fundamental domain.
    fn fold_into_cell(&self, point: &mut Vector3<i64>) {
        for i in (0..3).rev() {
            let quotient = div_floor(point[i], self.canonical[(i, i)]);
            if quotient == 0 {
                continue;
            }
            for j in 0..3 {
                point[j] -= quotient * self.canonical[(i, j)];
            }
        }
    }

    fn index_of(&self, point: &Vector3<i64>) -> usize {
        let nx = self.canonical[(0, 0)];
        let ny = self.canonical[(1, 1)];
        (point[0] + point[1] * nx + point[2] * nx * ny) as usize
    }
}

// Map into [0, 1), snapping values within tolerance of 1 onto 0
fn reduce_unit_interval(value: f64) -> f64 {
    let reduced = value - value.floor();
    if reduced > 1.0 - COORDINATE_TOLERANCE {
        0.0
    } else {
        reduced
    }
}
