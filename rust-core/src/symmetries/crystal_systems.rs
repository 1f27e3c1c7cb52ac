use serde::{Deserialize, Serialize};

use crate::config::{
    CUBIC_MAX_KPOINTS, INTERMEDIATE_MAX_KPOINTS, MONOCLINIC_MAX_KPOINTS, TRICLINIC_MAX_KPOINTS,
};
use crate::error::KPointError;

/// The seven crystal systems, as far as the k-point search cares about them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CrystalSystem {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Trigonal,
    Hexagonal,
    Cubic,
}

impl CrystalSystem {
    /// Classify an international space group number.
    pub fn from_space_group(space_group: u32) -> Result<Self, KPointError> {
        match space_group {
            1..=2 => Ok(CrystalSystem::Triclinic),
            3..=15 => Ok(CrystalSystem::Monoclinic),
            16..=74 => Ok(CrystalSystem::Orthorhombic),
            75..=142 => Ok(CrystalSystem::Tetragonal),
            143..=167 => Ok(CrystalSystem::Trigonal),
            168..=194 => Ok(CrystalSystem::Hexagonal),
            195..=230 => Ok(CrystalSystem::Cubic),
            _ => Err(KPointError::InvalidSpaceGroup(space_group)),
        }
    }

    /// Search-depth cap per scale factor when the escalation is enabled.
    pub fn max_kpoints(&self) -> usize {
        match self {
            CrystalSystem::Triclinic => TRICLINIC_MAX_KPOINTS,
            CrystalSystem::Monoclinic => MONOCLINIC_MAX_KPOINTS,
            CrystalSystem::Orthorhombic
            | CrystalSystem::Tetragonal
            | CrystalSystem::Trigonal
            | CrystalSystem::Hexagonal => INTERMEDIATE_MAX_KPOINTS,
            CrystalSystem::Cubic => CUBIC_MAX_KPOINTS,
        }
    }

    /// Trigonal structures are always searched in the hexagonal setting.
    pub fn has_hexagonal_cell(&self) -> bool {
        matches!(self, CrystalSystem::Trigonal | CrystalSystem::Hexagonal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_group_boundaries() {
        assert_eq!(CrystalSystem::from_space_group(1), Ok(CrystalSystem::Triclinic));
        assert_eq!(CrystalSystem::from_space_group(15), Ok(CrystalSystem::Monoclinic));
        assert_eq!(CrystalSystem::from_space_group(16), Ok(CrystalSystem::Orthorhombic));
        assert_eq!(CrystalSystem::from_space_group(143), Ok(CrystalSystem::Trigonal));
        assert_eq!(CrystalSystem::from_space_group(194), Ok(CrystalSystem::Hexagonal));
        assert_eq!(CrystalSystem::from_space_group(230), Ok(CrystalSystem::Cubic));
        assert_eq!(
            CrystalSystem::from_space_group(0),
            Err(KPointError::InvalidSpaceGroup(0))
        );
        assert_eq!(
            CrystalSystem::from_space_group(231),
            Err(KPointError::InvalidSpaceGroup(231))
        );
    }

    #[test]
    fn test_kpoint_caps() {
        assert_eq!(CrystalSystem::Triclinic.max_kpoints(), 729);
        assert_eq!(CrystalSystem::Monoclinic.max_kpoints(), 1728);
        assert_eq!(CrystalSystem::Trigonal.max_kpoints(), 5832);
        assert_eq!(CrystalSystem::Cubic.max_kpoints(), 46656);
        assert!(CrystalSystem::Trigonal.has_hexagonal_cell());
        assert!(!CrystalSystem::Tetragonal.has_hexagonal_cell());
    }
}
