//! Generalized Monkhorst-Pack k-point grids
//!
//! Searches integer superlattices of a crystal for the reciprocal-space grid
//! with the fewest symmetry-distinct k-points that still reaches a requested
//! real-space periodic distance and total point count.

pub mod config;
pub mod error;
pub mod input;
pub mod interfaces;
pub mod kpoints;
pub mod linalg;
pub mod symmetries;

#[cfg(test)]
mod _test_fixtures;

pub use error::KPointError;
pub use interfaces::GammaPolicy;
pub use kpoints::{KPointLattice, KPointLatticeGenerator};

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, KPointError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
