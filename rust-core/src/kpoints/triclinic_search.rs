use log::debug;
use nalgebra::Matrix3;

use crate::error::KPointError;
use crate::interfaces::{Dimension, GammaPolicy};
use crate::kpoints::generator::KPointLatticeGenerator;
use crate::kpoints::kpoint_lattice::KPointLattice;
use crate::kpoints::lattice_comparison::CandidateScore;
use crate::linalg::{factor_sets, from_rows, minimum_periodic_distance, minimum_periodic_distance_2d, IntDeterminant};
use crate::symmetries::orbit_counter::KPointOrbits;

impl KPointLatticeGenerator {
    /// Triclinic groups preserve every superlattice, so candidates are built
    /// directly in Hermite normal form: diagonal from the factor sets of
    /// `size`, every sub-diagonal entry below its column's diagonal.
    ///
    /// `min_scaled_distance` and `size` are already divided by the scale
    /// factor (and its cube); the candidate itself is multiplied back.
    pub(super) fn search_triclinic(
        &self,
        size: usize,
        min_scaled_distance: f64,
        scale_factor: usize,
        best: &mut Option<KPointLattice>,
    ) -> Result<(), KPointError> {
        let num_ops = self.point_operators.len();
        let total_size = size * scale_factor.pow(3);
        if !self.gamma_policy.includes_gamma() && total_size % num_ops != 0 {
            return Ok(());
        }
        let min_distance = min_scaled_distance * scale_factor as f64;

        // Gamma maps onto itself, everything else pairs up at best
        let gamma_factor = usize::from(self.gamma_policy == GammaPolicy::Always);
        let min_possible =
            ((total_size - gamma_factor) as f64 / (1 + num_ops) as f64).ceil() as usize + gamma_factor;

        let mut best_score = best.as_ref().map(CandidateScore::of);
        if best_score.is_some_and(|known| min_possible > known.num_distinct) {
            return Ok(());
        }

        let scale = scale_factor as i64;
        for factors in factor_sets(size, 3) {
            let mut super_to_direct = Matrix3::<i64>::zeros();
            for (i, &f) in factors.iter().enumerate() {
                super_to_direct[(i, i)] = f as i64 * scale;
            }

            let a = self.lattice_row(&super_to_direct, 0);
            if a.norm() < min_distance {
                continue;
            }

            for ba in 0..factors[0] {
                super_to_direct[(1, 0)] = ba as i64 * scale;
                let b = self.lattice_row(&super_to_direct, 1);
                if minimum_periodic_distance_2d(a, b) < min_distance {
                    continue;
                }

                for ca in 0..factors[0] {
                    super_to_direct[(2, 0)] = ca as i64 * scale;
                    for cb in 0..factors[1] {
                        super_to_direct[(2, 1)] = cb as i64 * scale;
                        let c = self.lattice_row(&super_to_direct, 2);
                        if c.norm() < min_distance {
                            continue;
                        }
                        let distance = minimum_periodic_distance(&from_rows(&[a, b, c]), Dimension::_3D);
                        if distance < min_distance {
                            continue;
                        }
                        if best_score.is_some_and(|known| known.num_distinct == min_possible && distance < known.min_distance) {
                            continue;
                        }

                        let num_total = super_to_direct.int_determinant() as usize;
                        for shift in &self.kpoint_shifts {
                            let Some(orbits) = KPointOrbits::new(&super_to_direct, shift, &self.point_operators)?
                            else {
                                continue;
                            };
                            let num_distinct = if num_ops == 1 {
                                num_total
                            } else {
                                orbits.count_distinct()
                            };

                            let score = CandidateScore {
                                num_distinct,
                                min_distance: distance,
                                num_total,
                            };
                            if score.beats_exact(best_score.as_ref()) {
                                debug!(
                                    "triclinic: new best {} of {} k-points, shift ({}, {}, {}), distance {:.6}",
                                    num_distinct,
                                    num_total,
                                    shift[0],
                                    shift[1],
                                    shift[2],
                                    distance
                                );
                                *best = Some(KPointLattice::new(super_to_direct, orbits, num_distinct, distance));
                                best_score = Some(score);
                            }
                            if num_distinct == min_possible {
                                break;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
