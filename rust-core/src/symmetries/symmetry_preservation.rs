use nalgebra::SMatrix;

use crate::error::KPointError;
use crate::linalg::hermite_normal_form;

/// Whether every operator maps the superlattice onto itself.
///
/// `canonical` must already be in Hermite normal form; the check compares it
/// with the Hermite form of `canonical * op` for each operator. Works for the
/// 3D search and for the in-plane 2D sub-search alike.
pub fn is_symmetry_preserving<const D: usize>(
    canonical: &SMatrix<i64, D, D>,
    ops: &[SMatrix<i64, D, D>],
) -> Result<bool, KPointError> {
    for op in ops {
        let operated = hermite_normal_form(&(canonical * op))?;
        if operated != *canonical {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix2, Matrix3};

    #[test]
    fn test_square_operators_on_2d_lattices() {
        let four_fold = Matrix2::new(0, -1, 1, 0);
        let mirror = Matrix2::new(1, 0, 0, -1);
        let ops = [four_fold, mirror];

        // Checkerboard sublattice and 2x2 supercell keep the square symmetry
        assert!(is_symmetry_preserving(&Matrix2::new(2, 0, 1, 1), &ops).unwrap());
        assert!(is_symmetry_preserving(&Matrix2::new(2, 0, 0, 2), &ops).unwrap());
        // 2x1 supercell does not survive the four-fold rotation
        assert!(!is_symmetry_preserving(&Matrix2::new(2, 0, 0, 1), &ops).unwrap());
    }

    #[test]
    fn test_identity_always_preserves() {
        let s = Matrix3::new(3, 0, 0, 1, 2, 0, 2, 1, 5);
        assert!(is_symmetry_preserving(&s, &[Matrix3::identity()]).unwrap());
        assert!(is_symmetry_preserving(&s, &[-Matrix3::identity()]).unwrap());
    }
}
