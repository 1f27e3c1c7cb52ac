// Symmetries module: point-group operators and their action on k-point grids
// Operators are consumed as input; nothing here detects symmetry from a structure

// ======================== MODULE DECLARATIONS ========================
pub mod crystal_systems;
pub mod orbit_counter;
pub mod point_operators;
pub mod symmetry_preservation;


// ======================== POINT OPERATORS ========================
pub use point_operators::{
    PlaneOperator,            // type - Matrix2<i64>, in-plane block of an operator in the conventional basis
    PointOperator,            // type - Matrix3<i64>, operator on primitive fractional coordinates
    close_group,              // fn(generators: &[PointOperator]) -> Result<Vec<PointOperator>, KPointError>
    in_plane_operators,       // fn(ops, conventional_to_prim, prim_to_conventional) -> Vec<PlaneOperator>
    is_identity,              // fn(op: &PointOperator) -> bool
    is_inversion,             // fn(op: &PointOperator) -> bool
    is_triclinic,             // fn(ops: &[PointOperator]) -> bool - only identity and inversion
    laue_completion,          // fn(ops: &[PointOperator]) -> Vec<PointOperator> - add -R when inversion is missing
    operators_from_cartesian, // fn(prim_vectors, cartesian_ops) -> Result<Vec<PointOperator>, KPointError>
};

// ======================== CRYSTAL SYSTEMS ========================
pub use crystal_systems::CrystalSystem; // enum - seven crystal systems, classified from space group numbers
// CrystalSystem impl methods:
//   from_space_group(space_group: u32) -> Result<Self, KPointError> - 1..=230 only
//   max_kpoints(&self) -> usize                                     - search cap for scale-factor escalation
//   has_hexagonal_cell(&self) -> bool                               - trigonal and hexagonal

// ======================== GRID SYMMETRY ========================
pub use symmetry_preservation::is_symmetry_preserving; // fn(canonical: &SMatrix<i64, D, D>, ops) -> Result<bool, KPointError>

pub use orbit_counter::KPointOrbits; // struct - operators on the k-point grid of one superlattice and shift
// KPointOrbits impl methods:
//   new(super_to_direct, shift, point_operators) -> Result<Option<Self>, KPointError> - None if incompatible
//   grid_extents(&self) -> [usize; 3]                   - fundamental-domain extents, x fastest
//   num_total_kpoints(&self) -> usize                   - product of the extents
//   count_distinct(&self) -> usize                      - number of orbit representatives
//   representatives(&self) -> Vec<usize>                - smallest index in each point's orbit
//   coordinates(&self) -> Vec<Vector3<f64>>             - fractional coordinates reduced into [0, 1)
