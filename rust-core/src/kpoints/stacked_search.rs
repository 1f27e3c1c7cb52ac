use log::debug;
use nalgebra::{Matrix3, Vector3};

use crate::error::KPointError;
use crate::interfaces::Dimension;
use crate::kpoints::generator::KPointLatticeGenerator;
use crate::kpoints::kpoint_lattice::KPointLattice;
use crate::kpoints::lattice_comparison::CandidateScore;
use crate::linalg::{
    factor, from_rows, hermite_normal_form, integral_matrix, minimum_periodic_distance,
    minimum_periodic_distance_2d, rows, IntDeterminant,
};
use crate::symmetries::is_symmetry_preserving;
use crate::symmetries::orbit_counter::KPointOrbits;

/// Orbits and distinct count for one k-point shift, `None` if the shift does
/// not fit the superlattice.
type ShiftScore = Option<(KPointOrbits, usize)>;

impl KPointLatticeGenerator {
    /// Superlattices built as symmetric 2D lattices in the conventional plane,
    /// stacked along the third conventional vector with a relative layer
    /// offset. The number of layers runs over the divisors of `size`, largest
    /// first.
    pub(super) fn search_stacked(
        &self,
        size: usize,
        min_distance: f64,
        scale_factor: usize,
        best: &mut Option<KPointLattice>,
    ) -> Result<(), KPointError> {
        let [c0, c1, c2] = rows(&self.conventional_vectors);
        let scale = scale_factor as i64;
        let mut best_score = best.as_ref().map(CandidateScore::of);

        for layers in factor(size).into_iter().rev() {
            if layers as f64 * self.max_z_distance < min_distance {
                continue;
            }
            let stacking = c2 * (layers as f64 / self.num_conventional_prim_cells);

            for lattice_2d in self.sym_preserving_lattices_2d(size / layers)? {
                let s0 = c0 * lattice_2d[(0, 0)] as f64 + c1 * lattice_2d[(0, 1)] as f64;
                let s1 = c0 * lattice_2d[(1, 0)] as f64 + c1 * lattice_2d[(1, 1)] as f64;
                if minimum_periodic_distance_2d(s0, s1) < min_distance {
                    continue;
                }

                for layer_shift in self.layer_shifts {
                    let s2 = s0 * layer_shift[0] + s1 * layer_shift[1] + stacking;
                    let super_vectors = from_rows(&[s0, s1, s2]);

                    // Offsets that land between lattice planes give no superlattice
                    let Some(super_to_direct) = integral_matrix(&(super_vectors * self.cartesian_to_prim))
                    else {
                        continue;
                    };
                    let distance = minimum_periodic_distance(&super_vectors, Dimension::_3D);
                    if distance < min_distance {
                        continue;
                    }

                    let canonical = hermite_normal_form(&(super_to_direct * scale))?;
                    let distance = distance * scale_factor as f64;
                    if !is_symmetry_preserving(&canonical, &self.point_operators)? {
                        continue;
                    }

                    let num_total = canonical.int_determinant() as usize;
                    for (orbits, num_distinct) in self.score_kpoint_shifts(&canonical)?.into_iter().flatten() {
                        let score = CandidateScore {
                            num_distinct,
                            min_distance: distance,
                            num_total,
                        };
                        if !score.beats_banded(best_score.as_ref()) {
                            continue;
                        }
                        debug!(
                            "stacked: new best {} of {} k-points, {} layers, shift ({}, {}, {}), distance {:.6}",
                            num_distinct,
                            num_total,
                            layers,
                            orbits.shift()[0],
                            orbits.shift()[1],
                            orbits.shift()[2],
                            distance
                        );
                        *best = Some(KPointLattice::new(canonical, orbits, num_distinct, distance));
                        best_score = Some(score);
                    }
                }
            }
        }
        Ok(())
    }

    /// Every k-point shift of the current policy, scored in table order.
    #[cfg(not(feature = "parallel"))]
    fn score_kpoint_shifts(&self, canonical: &Matrix3<i64>) -> Result<Vec<ShiftScore>, KPointError> {
        self.kpoint_shifts
            .iter()
            .map(|shift| self.score_kpoint_shift(canonical, shift))
            .collect()
    }

    /// Every k-point shift of the current policy, scored in parallel and
    /// returned in table order.
    #[cfg(feature = "parallel")]
    fn score_kpoint_shifts(&self, canonical: &Matrix3<i64>) -> Result<Vec<ShiftScore>, KPointError> {
        use rayon::prelude::*;

        self.kpoint_shifts
            .par_iter()
            .map(|shift| self.score_kpoint_shift(canonical, shift))
            .collect()
    }

    fn score_kpoint_shift(&self, canonical: &Matrix3<i64>, shift: &Vector3<f64>) -> Result<ShiftScore, KPointError> {
        let orbits = KPointOrbits::new(canonical, shift, &self.point_operators)?;
        Ok(orbits.map(|orbits| {
            let num_distinct = orbits.count_distinct();
            (orbits, num_distinct)
        }))
    }
}
