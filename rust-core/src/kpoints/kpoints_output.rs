use serde::{Deserialize, Serialize};

use crate::kpoints::kpoint_lattice::KPointLattice;

impl KPointLattice {
    /// Irreducible k-points in the VASP `KPOINTS` explicit-list format, with
    /// fractional coordinates in the primitive reciprocal basis.
    pub fn to_kpoints_string(&self) -> String {
        let mut out = format!(
            "K-point grid has {} total points. Actual minimum periodic distance is {:.15} Angstroms.\n{}\nFractional\n",
            self.num_total_kpoints(),
            self.min_periodic_distance(),
            self.num_distinct_kpoints()
        );
        for (index, (k, weight)) in self.irreducible_kpoints().enumerate() {
            out.push_str(&format!(
                "{:.14} {:.14} {:.14} {:.1} ! {}\n",
                k[0],
                k[1],
                k[2],
                weight as f64,
                index + 1
            ));
        }
        out
    }
}

/// One irreducible k-point and the number of grid points it stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedKPoint {
    pub coordinates: [f64; 3],
    pub weight: usize,
}

/// Serializable summary of a k-point grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KPointGridReport {
    pub num_total_kpoints: usize,
    pub num_distinct_kpoints: usize,
    pub min_periodic_distance: f64,
    /// Rows of the superlattice transform.
    pub super_to_direct: [[i64; 3]; 3],
    pub shift: [f64; 3],
    pub kpoints: Vec<WeightedKPoint>,
}

impl From<&KPointLattice> for KPointGridReport {
    fn from(lattice: &KPointLattice) -> Self {
        let s = lattice.super_to_direct();
        let shift = lattice.shift();
        KPointGridReport {
            num_total_kpoints: lattice.num_total_kpoints(),
            num_distinct_kpoints: lattice.num_distinct_kpoints(),
            min_periodic_distance: lattice.min_periodic_distance(),
            super_to_direct: [
                [s[(0, 0)], s[(0, 1)], s[(0, 2)]],
                [s[(1, 0)], s[(1, 1)], s[(1, 2)]],
                [s[(2, 0)], s[(2, 1)], s[(2, 2)]],
            ],
            shift: [shift[0], shift[1], shift[2]],
            kpoints: lattice
                .irreducible_kpoints()
                .map(|(k, weight)| WeightedKPoint {
                    coordinates: [k[0], k[1], k[2]],
                    weight,
                })
                .collect(),
        }
    }
}
