use nalgebra::SMatrix;

use crate::error::KPointError;
use crate::linalg::linalg_utils::div_floor;

/// Reduce an integer matrix to lower-triangular Hermite normal form.
///
/// The rows of the result span the same lattice as the rows of `matrix`. The
/// diagonal is strictly positive and every entry below the diagonal satisfies
/// `0 <= h[(r, c)] < h[(c, c)]`, which makes the form a canonical key for the
/// sublattice.
///
/// Columns are processed from last to first: the row with the smallest
/// nonzero magnitude in the column becomes the pivot, the other rows are
/// reduced against it Euclid-style until they vanish in that column. A final
/// sweep from the right takes the sub-diagonal entries modulo the diagonal.
///
/// # Errors
/// [`KPointError::SingularMatrix`] when a pivot column is all zeros.
pub fn hermite_normal_form<const D: usize>(
    matrix: &SMatrix<i64, D, D>,
) -> Result<SMatrix<i64, D, D>, KPointError> {
    let mut h = *matrix;
    if D == 0 {
        return Ok(h);
    }

    for col in (1..D).rev() {
        let pivot_row = (0..=col)
            .filter(|&row| h[(row, col)] != 0)
            .min_by_key(|&row| h[(row, col)].abs())
            .ok_or(KPointError::SingularMatrix)?;
        h.swap_rows(pivot_row, col);

        if h[(col, col)] < 0 {
            for c in 0..=col {
                h[(col, c)] = -h[(col, c)];
            }
        }

        // Euclid on rows: keep swapping the remainder in as the new pivot
        loop {
            let pivot = h[(col, col)];
            let remainder_row = (0..col).find(|&row| {
                let quotient = div_floor(h[(row, col)], pivot);
                h[(row, col)] - pivot * quotient != 0
            });
            let Some(row) = remainder_row else {
                break;
            };
            let quotient = div_floor(h[(row, col)], pivot);
            for c in 0..=col {
                h[(row, c)] -= h[(col, c)] * quotient;
            }
            h.swap_rows(row, col);
        }

        let pivot = h[(col, col)];
        for row in 0..col {
            let quotient = div_floor(h[(row, col)], pivot);
            for c in 0..=col {
                h[(row, c)] -= h[(col, c)] * quotient;
            }
        }
    }

    if h[(0, 0)] < 0 {
        h[(0, 0)] = -h[(0, 0)];
    }
    if (0..D).any(|i| h[(i, i)] == 0) {
        return Err(KPointError::SingularMatrix);
    }

    for diag in (0..D - 1).rev() {
        let diagonal = h[(diag, diag)];
        for row in diag + 1..D {
            let quotient = div_floor(h[(row, diag)], diagonal);
            for c in 0..=diag {
                h[(row, c)] -= h[(diag, c)] * quotient;
            }
        }
    }

    Ok(h)
}

/// True when `matrix` already is in lower-triangular Hermite normal form.
pub fn is_hermite_normal_form<const D: usize>(matrix: &SMatrix<i64, D, D>) -> bool {
    for row in 0..D {
        if matrix[(row, row)] <= 0 {
            return false;
        }
        for col in 0..D {
            let value = matrix[(row, col)];
            if col > row && value != 0 {
                return false;
            }
            if col < row && (value < 0 || value >= matrix[(col, col)]) {
                return false;
            }
        }
    }
    true
}
