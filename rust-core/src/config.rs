// Constants

// Tolerances
pub const BASE_VECTOR_TOLERANCE: f64 = 1e-10; // For construction of the generator's bases
pub const PRECISION: f64 = 3e-6; // Distance band used when ranking stacked candidates
pub const INTEGRALITY_TOLERANCE: f64 = 1e-2; // Max residual for a real matrix to count as integral
pub const COORDINATE_TOLERANCE: f64 = 1e-10; // Snapping of reduced coordinates onto 0

// Search depth
pub const MAX_SCALE_FACTOR: usize = 3;

// K-point caps used by the scale-factor escalation, per crystal system
pub const TRICLINIC_MAX_KPOINTS: usize = 729;
pub const MONOCLINIC_MAX_KPOINTS: usize = 1728;
pub const INTERMEDIATE_MAX_KPOINTS: usize = 5832; // orthorhombic, tetragonal, trigonal, hexagonal
pub const CUBIC_MAX_KPOINTS: usize = 46656;

const THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Relative layer offsets tried when stacking 2D lattices of a hexagonal cell.
pub const HEXAGONAL_LAYER_SHIFTS: [[f64; 2]; 9] = [
    [0.0, 0.0],
    [THIRD, THIRD],
    [TWO_THIRDS, TWO_THIRDS],
    [THIRD, TWO_THIRDS],
    [TWO_THIRDS, THIRD],
    [0.0, THIRD],
    [THIRD, 0.0],
    [0.0, TWO_THIRDS],
    [TWO_THIRDS, 0.0],
];

/// Relative layer offsets tried for every other conventional cell.
pub const GENERIC_LAYER_SHIFTS: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 0.5], [0.5, 0.0], [0.5, 0.5]];

/// Gamma-centred grids only.
pub const GAMMA_KPOINT_SHIFTS: [[f64; 3]; 1] = [[0.0, 0.0, 0.0]];

/// Gamma-centred plus every half-integer offset.
pub const AUTO_KPOINT_SHIFTS: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 0.5],
    [0.0, 0.5, 0.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
    [0.5, 0.5, 0.5],
];

/// Half-integer offsets that never contain Gamma.
pub const SHIFTED_KPOINT_SHIFTS: [[f64; 3]; 7] = [
    [0.0, 0.0, 0.5],
    [0.0, 0.5, 0.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
    [0.5, 0.5, 0.5],
];
