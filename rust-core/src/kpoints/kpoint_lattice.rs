use std::cell::OnceCell;

use nalgebra::{Matrix3, Vector3};

use crate::symmetries::orbit_counter::KPointOrbits;

/// The winning k-point grid of a search.
///
/// Owns its own copy of the operators (inside [`KPointOrbits`]), so it stays
/// valid independently of the generator that produced it. Coordinates and
/// weights are computed on first access and cached.
#[derive(Debug, Clone)]
pub struct KPointLattice {
    /// Superlattice in Hermite normal form, primitive to superlattice coordinates.
    super_to_direct: Matrix3<i64>,
    num_distinct_kpoints: usize,
    /// Shortest lattice vector of the superlattice, in Cartesian units.
    min_periodic_distance: f64,
    orbits: KPointOrbits,
    representatives: OnceCell<Vec<usize>>,
    coordinates: OnceCell<Vec<Vector3<f64>>>,
    weights: OnceCell<Vec<usize>>,
}

impl KPointLattice {
    pub(crate) fn new(
        super_to_direct: Matrix3<i64>,
        orbits: KPointOrbits,
        num_distinct_kpoints: usize,
        min_periodic_distance: f64,
    ) -> Self {
        KPointLattice {
            super_to_direct,
            num_distinct_kpoints,
            min_periodic_distance,
            orbits,
            representatives: OnceCell::new(),
            coordinates: OnceCell::new(),
            weights: OnceCell::new(),
        }
    }

    pub fn super_to_direct(&self) -> &Matrix3<i64> {
        &self.super_to_direct
    }

    /// Grid offset from Gamma, in reciprocal superlattice coordinates.
    pub fn shift(&self) -> &Vector3<f64> {
        self.orbits.shift()
    }

    /// `|det(super_to_direct)|`.
    pub fn num_total_kpoints(&self) -> usize {
        self.orbits.num_total_kpoints()
    }

    pub fn num_distinct_kpoints(&self) -> usize {
        self.num_distinct_kpoints
    }

    pub fn min_periodic_distance(&self) -> f64 {
        self.min_periodic_distance
    }

    /// Smallest grid index in the orbit of every point.
    pub fn representatives(&self) -> &[usize] {
        self.representatives.get_or_init(|| self.orbits.representatives())
    }

    /// Fractional coordinates of all grid points in the primitive reciprocal
    /// basis, each component in `[0, 1)`, ordered with x varying fastest.
    pub fn coordinates(&self) -> &[Vector3<f64>] {
        self.coordinates.get_or_init(|| self.orbits.coordinates())
    }

    /// Orbit size for representatives, 0 for every other point. Indexed like
    /// [`coordinates`](Self::coordinates).
    pub fn weights(&self) -> &[usize] {
        self.weights.get_or_init(|| {
            let representatives = self.representatives();
            let mut weights = vec![0; representatives.len()];
            for &representative in representatives {
                weights[representative] += 1;
            }
            weights
        })
    }

    /// Representatives only: `(coordinates, weight)` in grid order.
    pub fn irreducible_kpoints(&self) -> impl Iterator<Item = (Vector3<f64>, usize)> + '_ {
        self.coordinates()
            .iter()
            .zip(self.weights())
            .filter(|&(_, &weight)| weight > 0)
            .map(|(coordinates, &weight)| (*coordinates, weight))
    }
}
