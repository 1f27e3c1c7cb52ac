// Definitions that are used throughout all modules

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::{AUTO_KPOINT_SHIFTS, GAMMA_KPOINT_SHIFTS, SHIFTED_KPOINT_SHIFTS};

// Enumeration for dimensionality of a superlattice sub-search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    _2D,
    _3D,
}

impl Dimension {
    pub fn rank(&self) -> usize {
        match self {
            Dimension::_2D => 2,
            Dimension::_3D => 3,
        }
    }
}

/// Whether the generated grid has to contain the Gamma point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GammaPolicy {
    /// Gamma-centred grids only.
    Always,
    /// Only grids offset by half a reciprocal superlattice vector.
    Never,
    /// Gamma-centred and all half-integer offsets compete.
    #[default]
    Auto,
}

impl GammaPolicy {
    /// Candidate offsets of the grid origin, in reciprocal superlattice coordinates.
    pub fn kpoint_shifts(&self) -> Vec<Vector3<f64>> {
        let table: &[[f64; 3]] = match self {
            GammaPolicy::Always => &GAMMA_KPOINT_SHIFTS,
            GammaPolicy::Never => &SHIFTED_KPOINT_SHIFTS,
            GammaPolicy::Auto => &AUTO_KPOINT_SHIFTS,
        };
        table.iter().map(|s| Vector3::new(s[0], s[1], s[2])).collect()
    }

    pub fn includes_gamma(&self) -> bool {
        !matches!(self, GammaPolicy::Never)
    }
}

impl std::fmt::Display for GammaPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GammaPolicy::Always => write!(f, "always"),
            GammaPolicy::Never => write!(f, "never"),
            GammaPolicy::Auto => write!(f, "auto"),
        }
    }
}
