#[cfg(test)]
mod _tests_kpoint_lattice {
    use super::super::kpoint_lattice::KPointLattice;
    use super::super::kpoints_output::{KPointGridReport, WeightedKPoint};
    use crate::_test_fixtures::{cubic_operators, hexagonal_operators};
    use crate::symmetries::orbit_counter::KPointOrbits;
    use crate::symmetries::PointOperator;
    use nalgebra::{Matrix3, Vector3};

    fn lattice(s: Matrix3<i64>, shift: Vector3<f64>, ops: &[PointOperator], distance: f64) -> KPointLattice {
        let orbits = KPointOrbits::new(&s, &shift, ops).unwrap().unwrap();
        let num_distinct = orbits.count_distinct();
        KPointLattice::new(s, orbits, num_distinct, distance)
    }

    fn cubic_2x2x2() -> KPointLattice {
        lattice(Matrix3::from_diagonal_element(2), Vector3::zeros(), &cubic_operators(), 2.0)
    }

    #[test]
    fn test_weights_of_cubic_grid() {
        let grid = cubic_2x2x2();
        assert_eq!(grid.num_total_kpoints(), 8);
        assert_eq!(grid.num_distinct_kpoints(), 4);
        assert_eq!(grid.weights(), &[1, 3, 0, 3, 0, 0, 0, 1]);
        assert_eq!(grid.representatives(), &[0, 1, 1, 3, 1, 3, 3, 7]);
    }

    #[test]
    fn test_coordinates_follow_grid_order() {
        let grid = cubic_2x2x2();
        let coordinates = grid.coordinates();
        assert_eq!(coordinates.len(), 8);
        assert_eq!(coordinates[1], Vector3::new(0.5, 0.0, 0.0));
        assert_eq!(coordinates[2], Vector3::new(0.0, 0.5, 0.0));
        assert_eq!(coordinates[7], Vector3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_cached_queries_are_stable() {
        let grid = cubic_2x2x2();
        let first = grid.weights().as_ptr();
        let again = grid.weights().as_ptr();
        assert_eq!(first, again);
        assert_eq!(grid.coordinates(), grid.coordinates());
    }

    #[test]
    fn test_hexagonal_weights() {
        let s = Matrix3::new(3, 0, 0, 0, 3, 0, 0, 0, 2);
        let grid = lattice(s, Vector3::zeros(), &hexagonal_operators(), 3.0);

        let weights = grid.weights();
        assert_eq!(weights.iter().sum::<usize>(), 18);
        assert_eq!(weights.iter().filter(|&&w| w > 0).count(), grid.num_distinct_kpoints());
        for k in grid.coordinates() {
            assert!(k.iter().all(|&x| (0.0..1.0).contains(&x)));
        }
    }

    #[test]
    fn test_kpoints_output() {
        let text = cubic_2x2x2().to_kpoints_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "K-point grid has 8 total points. Actual minimum periodic distance is 2.000000000000000 Angstroms."
        );
        assert_eq!(lines[1], "4");
        assert_eq!(lines[2], "Fractional");
        assert_eq!(lines[3], "0.00000000000000 0.00000000000000 0.00000000000000 1.0 ! 1");
        assert_eq!(lines[4], "0.50000000000000 0.00000000000000 0.00000000000000 3.0 ! 2");
        assert_eq!(lines[5], "0.50000000000000 0.50000000000000 0.00000000000000 3.0 ! 3");
        assert_eq!(lines[6], "0.50000000000000 0.50000000000000 0.50000000000000 1.0 ! 4");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_grid_report() {
        let report = KPointGridReport::from(&cubic_2x2x2());
        assert_eq!(report.num_total_kpoints, 8);
        assert_eq!(report.num_distinct_kpoints, 4);
        assert_eq!(report.super_to_direct, [[2, 0, 0], [0, 2, 0], [0, 0, 2]]);
        assert_eq!(report.shift, [0.0, 0.0, 0.0]);
        assert_eq!(
            report.kpoints[1],
            WeightedKPoint {
                coordinates: [0.5, 0.0, 0.0],
                weight: 3
            }
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["num_distinct_kpoints"], 4);
        assert_eq!(json["kpoints"].as_array().unwrap().len(), 4);
        // Plain row arrays, no nalgebra storage layout in the output
        assert_eq!(json["super_to_direct"], serde_json::json!([[2, 0, 0], [0, 2, 0], [0, 0, 2]]));
        assert_eq!(json["kpoints"][1]["coordinates"], serde_json::json!([0.5, 0.0, 0.0]));
    }
}
