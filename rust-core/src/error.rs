use thiserror::Error;

/// Errors raised by the k-point lattice machinery.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KPointError {
    /// A closed-form inverse or a Hermite reduction hit a zero pivot.
    #[error("matrix is singular")]
    SingularMatrix,

    #[error("invalid lattice: {0}")]
    InvalidLattice(String),

    #[error("space group number {0} is outside 1..=230")]
    InvalidSpaceGroup(u32),

    #[error("operator is not integral in the primitive basis")]
    NonIntegralOperator,

    /// No grid satisfies the requested bounds, even after scale-factor escalation.
    #[error("no valid k-point grid found up to scale factor {max_scale_factor}")]
    SearchExhausted { max_scale_factor: usize },
}
