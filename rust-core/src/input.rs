//! TOML input for the command-line driver: a crystal (bases and point
//! operators, normally produced by a symmetry finder) plus search settings.

use std::path::Path;

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::KPointError;
use crate::interfaces::GammaPolicy;
use crate::kpoints::KPointLatticeGenerator;
use crate::symmetries::{close_group, laue_completion, CrystalSystem, PointOperator};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error(transparent)]
    KPoint(#[from] KPointError),
}

/// Crystal description and search settings.
///
/// Lattice vectors are rows; operators act on primitive fractional
/// coordinates as `x' = x * R`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorInput {
    pub primitive: [[f64; 3]; 3],
    /// Defaults to the primitive vectors.
    #[serde(default)]
    pub conventional: Option<[[f64; 3]; 3]>,
    pub operators: Vec<[[i64; 3]; 3]>,
    /// Derived from the space group when absent.
    #[serde(default)]
    pub hexagonal: Option<bool>,
    #[serde(default)]
    pub space_group: Option<u32>,
    /// `operators` only lists generators; close them into the full group.
    #[serde(default)]
    pub generators_only: bool,
    /// Add the inversion when missing (time-reversal symmetry of k-space).
    #[serde(default = "default_add_inversion")]
    pub add_inversion: bool,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub min_distance: f64,
    #[serde(default = "default_min_total_kpoints")]
    pub min_total_kpoints: usize,
    #[serde(default)]
    pub include_gamma: GammaPolicy,
    #[serde(default)]
    pub use_scale_factor: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_distance: 0.0,
            min_total_kpoints: default_min_total_kpoints(),
            include_gamma: GammaPolicy::default(),
            use_scale_factor: false,
        }
    }
}

fn default_add_inversion() -> bool {
    true
}

fn default_min_total_kpoints() -> usize {
    1
}

impl GeneratorInput {
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InputError> {
        let input: GeneratorInput = toml::from_str(s)?;
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.operators.is_empty() {
            return Err(InputError::Invalid("at least one operator is required".to_string()));
        }
        if let Some(space_group) = self.space_group {
            CrystalSystem::from_space_group(space_group)?;
        }
        if self.search.use_scale_factor && self.space_group.is_none() {
            return Err(InputError::Invalid(
                "use_scale_factor needs a space_group".to_string(),
            ));
        }
        if !self.search.min_distance.is_finite() || self.search.min_distance < 0.0 {
            return Err(InputError::Invalid(format!(
                "min_distance must be a non-negative number, got {}",
                self.search.min_distance
            )));
        }
        Ok(())
    }

    /// The operator set handed to the generator, after group closure and
    /// Laue completion as requested.
    pub fn point_operators(&self) -> Result<Vec<PointOperator>, InputError> {
        let mut ops: Vec<PointOperator> = self
            .operators
            .iter()
            .map(|op| Matrix3::from_fn(|r, c| op[r][c]))
            .collect();
        if self.generators_only {
            ops = close_group(&ops)?;
        }
        if self.add_inversion {
            ops = laue_completion(&ops);
        }
        Ok(ops)
    }

    pub fn is_hexagonal(&self) -> bool {
        self.hexagonal.unwrap_or_else(|| {
            self.space_group
                .and_then(|sg| CrystalSystem::from_space_group(sg).ok())
                .is_some_and(|system| system.has_hexagonal_cell())
        })
    }

    /// A generator configured with the gamma policy and, if requested, the
    /// scale-factor escalation of the `[search]` table.
    pub fn build_generator(&self) -> Result<KPointLatticeGenerator, InputError> {
        let primitive = rows_to_matrix(&self.primitive);
        let conventional = self.conventional.as_ref().map_or(primitive, rows_to_matrix);

        let mut generator =
            KPointLatticeGenerator::new(primitive, conventional, self.point_operators()?, self.is_hexagonal())?;
        generator.include_gamma(self.search.include_gamma);
        if self.search.use_scale_factor {
            if let Some(space_group) = self.space_group {
                generator.use_scale_factor(space_group)?;
            }
        }
        Ok(generator)
    }
}

fn rows_to_matrix(rows: &[[f64; 3]; 3]) -> Matrix3<f64> {
    Matrix3::from_fn(|r, c| rows[r][c])
}

#[cfg(test)]
mod tests {
    use super::*;

    const FCC_INPUT: &str = r#"
primitive = [[0.0, 2.0, 2.0], [2.0, 0.0, 2.0], [2.0, 2.0, 0.0]]
conventional = [[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]]
space_group = 225
generators_only = true
operators = [
    [[1, 0, -1], [1, 0, 0], [1, -1, 0]],
    [[0, 0, 1], [1, 0, 0], [0, 1, 0]],
]

[search]
min_distance = 8.0
include_gamma = "always"
use_scale_factor = true
"#;

    #[test]
    fn test_parse_fcc_input() {
        let input = GeneratorInput::from_str(FCC_INPUT).unwrap();
        assert_eq!(input.space_group, Some(225));
        assert!(!input.is_hexagonal());
        assert_eq!(input.search.include_gamma, GammaPolicy::Always);
        assert_eq!(input.search.min_total_kpoints, 1);

        // 4-fold and 3-fold generate 432; Laue completion doubles it
        let ops = input.point_operators().unwrap();
        assert_eq!(ops.len(), 48);

        let generator = input.build_generator().unwrap();
        assert_eq!(generator.max_scale_factor(), 3);
        assert_eq!(generator.gamma_policy(), GammaPolicy::Always);
    }

    #[test]
    fn test_defaults() {
        let input = GeneratorInput::from_str(
            "primitive = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]\noperators = [[[1, 0, 0], [0, 1, 0], [0, 0, 1]]]\n",
        )
        .unwrap();
        assert_eq!(input.search, SearchConfig::default());
        assert!(input.add_inversion);
        assert_eq!(input.point_operators().unwrap().len(), 2);
        assert!(input.build_generator().unwrap().is_triclinic());
    }

    #[test]
    fn test_hexagonal_from_space_group() {
        let mut input = GeneratorInput::from_str(FCC_INPUT).unwrap();
        input.space_group = Some(166);
        assert!(input.is_hexagonal());
        input.hexagonal = Some(false);
        assert!(!input.is_hexagonal());
    }

    #[test]
    fn test_invalid_inputs() {
        let no_ops = "primitive = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]\noperators = []\n";
        assert!(matches!(GeneratorInput::from_str(no_ops), Err(InputError::Invalid(_))));

        let bad_group = FCC_INPUT.replace("space_group = 225", "space_group = 300");
        assert!(matches!(
            GeneratorInput::from_str(&bad_group),
            Err(InputError::KPoint(KPointError::InvalidSpaceGroup(300)))
        ));

        let no_group = FCC_INPUT.replace("space_group = 225", "");
        assert!(matches!(GeneratorInput::from_str(&no_group), Err(InputError::Invalid(_))));

        assert!(matches!(GeneratorInput::from_str("primitive = 3"), Err(InputError::Toml(_))));
    }
}
