#[cfg(test)]
mod _tests_minkowski_reduction {
    use super::super::minkowski_reduction::{
        minimum_periodic_distance, minimum_periodic_distance_2d,
    };
    use crate::interfaces::Dimension;
    use nalgebra::{Matrix3, Vector3};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_orthonormal_basis_is_already_reduced() {
        let d = minimum_periodic_distance(&Matrix3::identity(), Dimension::_3D);
        assert!((d - 1.0).abs() < TOL, "got {}", d);
    }

    #[test]
    fn test_2d_basis_reduces_to_sqrt2() {
        let d = minimum_periodic_distance_2d(Vector3::new(2.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0));
        assert!((d - 2.0_f64.sqrt()).abs() < TOL, "got {}", d);
    }

    #[test]
    fn test_skewed_basis_finds_short_vector() {
        // (1, 0) and (10, 1) span Z^2; the shortest vector has length 1
        let d = minimum_periodic_distance_2d(Vector3::new(10.0, 1.0, 0.0), Vector3::new(11.0, 1.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "got {}", d);
    }

    #[test]
    fn test_only_leading_rows_are_used() {
        let m = Matrix3::new(3.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.5);
        let d2 = minimum_periodic_distance(&m, Dimension::_2D);
        let d3 = minimum_periodic_distance(&m, Dimension::_3D);
        assert!((d2 - 3.0).abs() < TOL);
        assert!((d3 - 0.5).abs() < TOL);
    }

    #[test]
    fn test_fcc_superlattice_distance() {
        // Rows of a skewed fcc basis with nearest-neighbour distance sqrt(2)/2
        let m = Matrix3::new(0.0, 0.5, 0.5, 0.5, 0.0, 0.5, 2.0, 2.5, 3.5);
        let d = minimum_periodic_distance(&m, Dimension::_3D);
        assert!((d - 0.5_f64.sqrt()).abs() < 1e-10, "got {}", d);
    }

    #[test]
    fn test_input_is_not_modified() {
        let m = Matrix3::new(10.0, 1.0, 0.0, 11.0, 1.0, 0.0, 0.0, 0.0, 7.0);
        let copy = m;
        let _ = minimum_periodic_distance(&m, Dimension::_3D);
        assert_eq!(m, copy);
    }
}
