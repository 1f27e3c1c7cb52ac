use crate::config::PRECISION;
use crate::kpoints::kpoint_lattice::KPointLattice;

/// What a candidate grid is ranked by: fewer distinct k-points first, then a
/// longer periodic distance, then more total k-points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub num_distinct: usize,
    pub min_distance: f64,
    pub num_total: usize,
}

impl CandidateScore {
    pub fn of(lattice: &KPointLattice) -> Self {
        CandidateScore {
            num_distinct: lattice.num_distinct_kpoints(),
            min_distance: lattice.min_periodic_distance(),
            num_total: lattice.num_total_kpoints(),
        }
    }

    /// Strict lexicographic ranking with exact distance comparisons. Full
    /// ties keep the incumbent.
    pub fn beats_exact(&self, best: Option<&CandidateScore>) -> bool {
        let Some(best) = best else {
            return true;
        };
        if self.num_distinct != best.num_distinct {
            return self.num_distinct < best.num_distinct;
        }
        if self.min_distance != best.min_distance {
            return self.min_distance > best.min_distance;
        }
        self.num_total > best.num_total
    }

    /// Same ranking, but distances within [`PRECISION`] of each other count as
    /// equal and fall through to the total-count tiebreak.
    pub fn beats_banded(&self, best: Option<&CandidateScore>) -> bool {
        let Some(best) = best else {
            return true;
        };
        if self.num_distinct != best.num_distinct {
            return self.num_distinct < best.num_distinct;
        }
        if self.min_distance + PRECISION < best.min_distance {
            return false;
        }
        if (self.min_distance - best.min_distance).abs() < PRECISION {
            return self.num_total > best.num_total;
        }
        true
    }
}
