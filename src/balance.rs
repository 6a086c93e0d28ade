//! Foreign / non-foreign mixing inside a single group on a single round.

/// Members of one group-round, split by class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCount {
    pub native: usize,
    pub foreign: usize,
}

impl ClassCount {
    pub fn record(&mut self, foreign: bool) {
        if foreign {
            self.foreign += 1;
        } else {
            self.native += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.native + self.foreign
    }

    pub fn is_homogeneous(&self) -> bool {
        self.native == 0 || self.foreign == 0
    }

    /// `1 - H(p)` of the class split; groups holding a single class (or
    /// nobody) count as fully imbalanced.
    pub fn imbalance(&self) -> f64 {
        if self.is_homogeneous() {
            return 1.0;
        }
        let total = self.total() as f64;
        1.0 - binary_entropy(self.native as f64 / total, self.foreign as f64 / total)
    }
}

/// Shannon entropy in bits of a two-outcome distribution `p0 + p1 = 1`.
///
/// Both probabilities must be positive.
pub fn binary_entropy(p0: f64, p1: f64) -> f64 {
    -p0 * p0.log2() - p1 * p1.log2()
}

/// Imbalance of a group-round with the given class counts.
pub fn cell_imbalance(native: usize, foreign: usize) -> f64 {
    ClassCount { native, foreign }.imbalance()
}
