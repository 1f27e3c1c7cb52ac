use nalgebra::{Matrix2, Matrix3, SMatrix, Vector3};

use crate::config::INTEGRALITY_TOLERANCE;
use crate::error::KPointError;

/// Round half toward +infinity, i.e. `floor(x + 0.5)`.
///
/// Ties resolve upwards (`-0.5 -> 0`, `2.5 -> 3`); this is what the integer
/// canonicalisation downstream relies on, so do not swap it for `f64::round`.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Floor division for signed operands.
///
/// Truncating division corrected by one when the remainder is nonzero and the
/// operand signs disagree. Panics on `b == 0` like the built-in division.
#[inline]
pub fn div_floor(a: i64, b: i64) -> i64 {
    let quotient = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

/// Exact determinant of a small integer matrix.
pub trait IntDeterminant {
    fn int_determinant(&self) -> i64;
}

impl IntDeterminant for Matrix2<i64> {
    fn int_determinant(&self) -> i64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

impl IntDeterminant for Matrix3<i64> {
    fn int_determinant(&self) -> i64 {
        let m = self;
        m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
            - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
            + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
    }
}

/// Inverse of a real 3x3 matrix; singular input is an error rather than NaNs.
pub fn inverse(matrix: &Matrix3<f64>) -> Result<Matrix3<f64>, KPointError> {
    matrix.try_inverse().ok_or(KPointError::SingularMatrix)
}

/// Closed-form inverse of a lower-triangular integer matrix.
///
/// Falls back to the general inverse when the upper triangle is not zero.
pub fn lower_triangular_inverse(matrix: &Matrix3<i64>) -> Result<Matrix3<f64>, KPointError> {
    if matrix[(0, 1)] != 0 || matrix[(0, 2)] != 0 || matrix[(1, 2)] != 0 {
        return inverse(&matrix.cast::<f64>());
    }
    if matrix[(0, 0)] == 0 || matrix[(1, 1)] == 0 || matrix[(2, 2)] == 0 {
        return Err(KPointError::SingularMatrix);
    }

    let m = matrix.cast::<f64>();
    let (a, b, c) = (m[(0, 0)], m[(1, 0)], m[(1, 1)]);
    let (d, e, f) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);

    Ok(Matrix3::new(
        1.0 / a,
        0.0,
        0.0,
        -b / (a * c),
        1.0 / c,
        0.0,
        (b * e - c * d) / (a * c * f),
        -e / (c * f),
        1.0 / f,
    ))
}

/// Round every element with [`round_half_up`], or `None` if any element sits
/// further than [`INTEGRALITY_TOLERANCE`] from its rounded value.
pub fn integral_matrix<const R: usize, const C: usize>(
    matrix: &SMatrix<f64, R, C>,
) -> Option<SMatrix<i64, R, C>> {
    let rounded = matrix.map(round_half_up);
    let integral = matrix
        .iter()
        .zip(rounded.iter())
        .all(|(value, whole)| (value - whole).abs() < INTEGRALITY_TOLERANCE);
    integral.then(|| rounded.map(|x| x as i64))
}

/// Row vector times matrix, `v * M`, for the row-vector lattice convention.
#[inline]
pub fn row_times_matrix(v: &Vector3<f64>, matrix: &Matrix3<f64>) -> Vector3<f64> {
    matrix.tr_mul(v)
}

/// Rows of a 3x3 matrix as vectors.
pub fn rows(matrix: &Matrix3<f64>) -> [Vector3<f64>; 3] {
    [
        matrix.row(0).transpose(),
        matrix.row(1).transpose(),
        matrix.row(2).transpose(),
    ]
}

/// Build a matrix whose rows are the given vectors.
pub fn from_rows(vectors: &[Vector3<f64>; 3]) -> Matrix3<f64> {
    Matrix3::from_rows(&[
        vectors[0].transpose(),
        vectors[1].transpose(),
        vectors[2].transpose(),
    ])
}
