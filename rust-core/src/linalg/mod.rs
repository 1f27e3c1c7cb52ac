// Linear algebra module: the small fixed-size integer and real helpers the k-point search needs
// Only 2x2 and 3x3 matrices appear here; anything larger is out of scope

// ======================== MODULE DECLARATIONS ========================
pub mod factorization;
pub mod hermite_normal_form;
pub mod linalg_utils;
pub mod minkowski_reduction;

mod _tests_minkowski_reduction;

// ======================== SCALAR & MATRIX HELPERS ========================
pub use linalg_utils::{
    IntDeterminant,           // trait - exact determinant of Matrix2<i64> / Matrix3<i64>
    div_floor,                // fn(a: i64, b: i64) -> i64 - floor division for signed operands
    from_rows,                // fn(vectors: &[Vector3<f64>; 3]) -> Matrix3<f64> - stack row vectors
    integral_matrix,          // fn(m: &SMatrix<f64, R, C>) -> Option<SMatrix<i64, R, C>> - round within tolerance
    inverse,                  // fn(m: &Matrix3<f64>) -> Result<Matrix3<f64>, KPointError> - checked inverse
    lower_triangular_inverse, // fn(m: &Matrix3<i64>) -> Result<Matrix3<f64>, KPointError> - closed-form inverse
    round_half_up,            // fn(x: f64) -> f64 - floor(x + 0.5)
    row_times_matrix,         // fn(v: &Vector3<f64>, m: &Matrix3<f64>) -> Vector3<f64> - v * M
    rows,                     // fn(m: &Matrix3<f64>) -> [Vector3<f64>; 3] - split into row vectors
};

// ======================== INTEGER FACTORIZATION ========================
pub use factorization::{
    factor,      // fn(n: usize) -> Vec<usize> - ascending divisors
    factor_sets, // fn(n: usize, k: usize) -> Vec<Vec<usize>> - ordered k-tuples with product n
};

// ======================== LATTICE REDUCTION ========================
pub use hermite_normal_form::{
    hermite_normal_form,    // fn(m: &SMatrix<i64, D, D>) -> Result<SMatrix<i64, D, D>, KPointError>
    is_hermite_normal_form, // fn(m: &SMatrix<i64, D, D>) -> bool
};

pub use minkowski_reduction::{
    minimum_periodic_distance,    // fn(super_vectors: &Matrix3<f64>, dimension: Dimension) -> f64
    minimum_periodic_distance_2d, // fn(a: Vector3<f64>, b: Vector3<f64>) -> f64
};
