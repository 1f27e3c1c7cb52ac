use std::f64::consts::SQRT_2;

use log::{debug, info, trace, warn};
use nalgebra::{Matrix2, Matrix3, Vector3};

use crate::config::{BASE_VECTOR_TOLERANCE, GENERIC_LAYER_SHIFTS, HEXAGONAL_LAYER_SHIFTS, MAX_SCALE_FACTOR};
use crate::error::KPointError;
use crate::interfaces::GammaPolicy;
use crate::kpoints::kpoint_lattice::KPointLattice;
use crate::linalg::{factor, from_rows, inverse, round_half_up, row_times_matrix, rows};
use crate::symmetries::{
    in_plane_operators, is_symmetry_preserving, is_triclinic, CrystalSystem, PlaneOperator, PointOperator,
};

/// Searches integer superlattices of a crystal for the k-point grid with the
/// fewest symmetry-distinct points that still meets a minimum periodic
/// distance and a minimum total point count.
///
/// All per-search state is local to [`get_kpoint_lattice`](Self::get_kpoint_lattice),
/// so one generator can serve concurrent searches through `&self`.
#[derive(Debug, Clone)]
pub struct KPointLatticeGenerator {
    /// Primitive lattice vectors as rows.
    pub(super) prim_vectors: Matrix3<f64>,
    pub(super) cartesian_to_prim: Matrix3<f64>,
    pub(super) prim_cell_volume: f64,
    /// Conventional vectors as rows, after the face-centring correction.
    pub(super) conventional_vectors: Matrix3<f64>,
    pub(super) num_conventional_prim_cells: f64,
    /// Upper bound on the interlayer spacing of one stacked layer.
    pub(super) max_z_distance: f64,
    pub(super) point_operators: Vec<PointOperator>,
    /// Operators fixing the stacking axis, as 2x2 blocks in the conventional basis.
    pub(super) plane_operators: Vec<PlaneOperator>,
    pub(super) layer_shifts: &'static [[f64; 2]],
    pub(super) triclinic: bool,
    pub(super) gamma_policy: GammaPolicy,
    pub(super) kpoint_shifts: Vec<Vector3<f64>>,
    max_scale_factor: usize,
    max_allowed_kpoints: Option<usize>,
}

impl KPointLatticeGenerator {
    /// Set up a generator from row-vector bases and point operators acting on
    /// primitive fractional coordinates (`x' = x * R`).
    ///
    /// The third conventional vector is the stacking axis and should be
    /// orthogonal to the first two. `is_hexagonal` selects the hexagonal layer
    /// offsets (use it for trigonal structures as well).
    ///
    /// # Errors
    /// [`KPointError::InvalidLattice`] for an empty operator list or a
    /// degenerate basis, [`KPointError::SingularMatrix`] if a basis change
    /// cannot be inverted.
    pub fn new(
        prim_vectors: Matrix3<f64>,
        conventional_vectors: Matrix3<f64>,
        point_operators: Vec<PointOperator>,
        is_hexagonal: bool,
    ) -> Result<Self, KPointError> {
        if point_operators.is_empty() {
            return Err(KPointError::InvalidLattice(
                "at least one point operator is required".to_string(),
            ));
        }
        let prim_cell_volume = prim_vectors.determinant().abs();
        if prim_cell_volume < BASE_VECTOR_TOLERANCE {
            return Err(KPointError::InvalidLattice(
                "primitive vectors are linearly dependent".to_string(),
            ));
        }
        if conventional_vectors.determinant().abs() < BASE_VECTOR_TOLERANCE {
            return Err(KPointError::InvalidLattice(
                "conventional vectors are linearly dependent".to_string(),
            ));
        }

        let cartesian_to_prim = inverse(&prim_vectors)?;
        let conventional_vectors = primitive_face_cell(&conventional_vectors, &cartesian_to_prim);

        let conventional_to_prim = conventional_vectors * cartesian_to_prim;
        let prim_to_conventional = inverse(&conventional_to_prim)?;
        let plane_operators = in_plane_operators(&point_operators, &conventional_to_prim, &prim_to_conventional);

        let num_conventional_prim_cells = conventional_to_prim.determinant().abs();
        // Rhombohedral cells in a hexagonal setting repeat after three layers
        let layers_per_period = if is_hexagonal { 3.0 } else { 2.0 };
        let max_z_distance =
            conventional_vectors.row(2).norm() / num_conventional_prim_cells * layers_per_period;

        let layer_shifts: &'static [[f64; 2]] = if is_hexagonal {
            &HEXAGONAL_LAYER_SHIFTS
        } else {
            &GENERIC_LAYER_SHIFTS
        };

        let triclinic = is_triclinic(&point_operators);
        let gamma_policy = GammaPolicy::default();

        debug!(
            "k-point generator: {} operators ({} in-plane), {} primitive cells per conventional cell, {} search",
            point_operators.len(),
            plane_operators.len(),
            num_conventional_prim_cells,
            if triclinic { "triclinic" } else { "stacked" }
        );

        Ok(KPointLatticeGenerator {
            prim_vectors,
            cartesian_to_prim,
            prim_cell_volume,
            conventional_vectors,
            num_conventional_prim_cells,
            max_z_distance,
            point_operators,
            plane_operators,
            layer_shifts,
            triclinic,
            gamma_policy,
            kpoint_shifts: gamma_policy.kpoint_shifts(),
            max_scale_factor: 1,
            max_allowed_kpoints: None,
        })
    }

    /// Select which grid offsets compete in the search.
    pub fn include_gamma(&mut self, policy: GammaPolicy) {
        self.gamma_policy = policy;
        self.kpoint_shifts = policy.kpoint_shifts();
    }

    /// Enable the scale-factor escalation: searches are capped at the
    /// crystal system's k-point limit, and retried with scale factors up to
    /// [`MAX_SCALE_FACTOR`] when nothing is found below it.
    pub fn use_scale_factor(&mut self, space_group: u32) -> Result<(), KPointError> {
        let crystal_system = CrystalSystem::from_space_group(space_group)?;
        self.max_scale_factor = MAX_SCALE_FACTOR;
        self.max_allowed_kpoints = Some(crystal_system.max_kpoints());
        Ok(())
    }

    pub fn gamma_policy(&self) -> GammaPolicy {
        self.gamma_policy
    }

    pub fn point_operators(&self) -> &[PointOperator] {
        &self.point_operators
    }

    pub fn plane_operators(&self) -> &[PlaneOperator] {
        &self.plane_operators
    }

    pub fn conventional_vectors(&self) -> &Matrix3<f64> {
        &self.conventional_vectors
    }

    pub fn is_triclinic(&self) -> bool {
        self.triclinic
    }

    pub fn max_scale_factor(&self) -> usize {
        self.max_scale_factor
    }

    /// `None` when the size search is unbounded.
    pub fn max_allowed_kpoints(&self) -> Option<usize> {
        self.max_allowed_kpoints
    }

    /// Best grid whose superlattice has no lattice vector shorter than
    /// `min_distance` and at least `min_size` k-points.
    ///
    /// # Errors
    /// [`KPointError::SearchExhausted`] when no grid exists below the k-point
    /// cap for any scale factor. Without [`use_scale_factor`](Self::use_scale_factor)
    /// the search is unbounded.
    pub fn get_kpoint_lattice(&self, min_distance: f64, min_size: usize) -> Result<KPointLattice, KPointError> {
        for scale_factor in 1..=self.max_scale_factor {
            let scaled_distance = min_distance / scale_factor as f64;
            let scaled_size = (min_size as f64 / scale_factor.pow(3) as f64).ceil() as usize;

            let found = self.search_scaled(scaled_distance, scaled_size, scale_factor)?;
            if let Some(lattice) = found {
                if scale_factor > 1 {
                    info!("Scale factor is used: {}", scale_factor);
                }
                debug!(
                    "selected grid: {} distinct of {} total k-points, periodic distance {:.6}",
                    lattice.num_distinct_kpoints(),
                    lattice.num_total_kpoints(),
                    lattice.min_periodic_distance()
                );
                return Ok(lattice);
            }
        }

        warn!(
            "no k-point grid with min distance {} and min size {} below {:?} k-points",
            min_distance, min_size, self.max_allowed_kpoints
        );
        Err(KPointError::SearchExhausted {
            max_scale_factor: self.max_scale_factor,
        })
    }

    /// One pass of the size loop at a fixed scale factor.
    fn search_scaled(
        &self,
        min_distance: f64,
        min_size: usize,
        scale_factor: usize,
    ) -> Result<Option<KPointLattice>, KPointError> {
        // Nothing packs denser than fcc
        let min_size_by_distance = (min_distance.powi(3) / (self.prim_cell_volume * SQRT_2)).floor();
        let mut size = min_size.max(1).max(min_size_by_distance as usize);
        let mut max_size = self.max_allowed_kpoints;
        let cube = scale_factor.pow(3);

        let mut best: Option<KPointLattice> = None;
        while max_size.map_or(true, |max| size <= max) {
            trace!("grid size {} at scale factor {}", size, scale_factor);
            if self.triclinic {
                self.search_triclinic(size, min_distance, scale_factor, &mut best)?;
            } else {
                self.search_stacked(size, min_distance, scale_factor, &mut best)?;
            }
            if let Some(lattice) = &best {
                max_size = Some(lattice.num_distinct_kpoints() * self.point_operators.len() / cube);
            }
            size += 1;
        }
        Ok(best)
    }

    /// Every 2D Hermite-form lattice of `size` cells that the in-plane
    /// operators map onto itself.
    pub fn sym_preserving_lattices_2d(&self, size: usize) -> Result<Vec<Matrix2<i64>>, KPointError> {
        let mut lattices = Vec::new();
        for diagonal in factor(size) {
            for off_diagonal in 0..diagonal {
                let lattice = Matrix2::new(diagonal as i64, 0, off_diagonal as i64, (size / diagonal) as i64);
                if is_symmetry_preserving(&lattice, &self.plane_operators)? {
                    lattices.push(lattice);
                }
            }
        }
        Ok(lattices)
    }

    /// Cartesian superlattice vector for one row of `super_to_direct`.
    pub(super) fn lattice_row(&self, super_to_direct: &Matrix3<i64>, row: usize) -> Vector3<f64> {
        let coefficients = Vector3::new(
            super_to_direct[(row, 0)] as f64,
            super_to_direct[(row, 1)] as f64,
            super_to_direct[(row, 2)] as f64,
        );
        row_times_matrix(&coefficients, &self.prim_vectors)
    }
}

// Face-centred conventional cells are replaced by the primitive 2D cell
fn primitive_face_cell(conventional_vectors: &Matrix3<f64>, cartesian_to_prim: &Matrix3<f64>) -> Matrix3<f64> {
    let [c0, c1, c2] = rows(conventional_vectors);
    let face_center = c0 + c1;
    let direct_face_center = row_times_matrix(&face_center, cartesian_to_prim);
    let is_lattice_point = direct_face_center
        .iter()
        .all(|&x| (round_half_up(x) as i64) % 2 == 0);

    if !is_lattice_point {
        return *conventional_vectors;
    }
    let half = face_center / 2.0;
    from_rows(&[half, half - c1, c2])
}
