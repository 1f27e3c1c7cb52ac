// K-points module: the superlattice search and the grid it selects
// Two search strategies share one driver; see generator.rs

// ======================== MODULE DECLARATIONS ========================
pub mod generator;
pub mod kpoint_lattice;
pub mod kpoints_output;
pub mod lattice_comparison;
mod stacked_search;
mod triclinic_search;

mod _tests_kpoint_lattice;

// ======================== SEARCH DRIVER ========================
pub use generator::KPointLatticeGenerator; // struct - searches superlattices for the best k-point grid
// KPointLatticeGenerator impl methods:
//   new(prim_vectors, conventional_vectors, point_operators, is_hexagonal) -> Result<Self, KPointError>
//   include_gamma(&mut self, policy: GammaPolicy)                     - select the competing grid offsets
//   use_scale_factor(&mut self, space_group: u32) -> Result<(), KPointError> - cap sizes, escalate to scale 3
//   get_kpoint_lattice(&self, min_distance: f64, min_size: usize) -> Result<KPointLattice, KPointError>
//   sym_preserving_lattices_2d(&self, size: usize) -> Result<Vec<Matrix2<i64>>, KPointError>
//   point_operators / plane_operators / conventional_vectors / is_triclinic - accessors

pub use lattice_comparison::CandidateScore; // struct - (distinct, distance, total) ranking of a candidate grid
// CandidateScore impl methods:
//   beats_exact(&self, best: Option<&CandidateScore>) -> bool  - triclinic rule, exact distances
//   beats_banded(&self, best: Option<&CandidateScore>) -> bool - stacked rule, distances banded by PRECISION

// ======================== RESULT ========================
pub use kpoint_lattice::KPointLattice; // struct - selected grid with lazily computed coordinates and weights
// KPointLattice impl methods:
//   num_total_kpoints / num_distinct_kpoints / min_periodic_distance / super_to_direct / shift
//   coordinates(&self) -> &[Vector3<f64>]   - every grid point, x fastest, components in [0, 1)
//   weights(&self) -> &[usize]              - orbit size for representatives, 0 elsewhere
//   irreducible_kpoints(&self) -> impl Iterator<Item = (Vector3<f64>, usize)>
//   to_kpoints_string(&self) -> String      - VASP KPOINTS explicit list

pub use kpoints_output::{
    KPointGridReport, // struct - serde summary of a grid for JSON output
    WeightedKPoint,   // struct - coordinates and weight of one irreducible k-point
};
