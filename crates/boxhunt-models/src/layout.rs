use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{BoxContent, BOX_MAX, BOX_MIN};

/// Bounds for sampling a round's layout. Totals count surprise boxes
/// overall; golden boxes are drawn from within the surprise set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AssignmentConfig {
    pub min_total: u8,
    pub max_total: u8,
    pub min_golden: u8,
    pub max_golden: u8,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            min_total: 1,
            max_total: 4,
            min_golden: 0,
            max_golden: 3,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidBounds {
    #[error("surprise count range {0}..={1} is outside 1..={BOX_MAX}")]
    TotalRange(u8, u8),
    #[error("min_total {0} exceeds max_total {1}")]
    TotalOrder(u8, u8),
    #[error("min_golden {0} exceeds max_golden {1}")]
    GoldenOrder(u8, u8),
}

impl AssignmentConfig {
    pub fn validate(&self) -> Result<(), InvalidBounds> {
        if self.min_total < 1 || self.max_total > BOX_MAX {
            return Err(InvalidBounds::TotalRange(self.min_total, self.max_total));
        }
        if self.min_total > self.max_total {
            return Err(InvalidBounds::TotalOrder(self.min_total, self.max_total));
        }
        if self.min_golden > self.max_golden {
            return Err(InvalidBounds::GoldenOrder(self.min_golden, self.max_golden));
        }
        Ok(())
    }
}

/// A sampled round layout: which boxes hold a surprise, and which of
/// those hold the golden one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxLayout {
    pub surprise: BTreeSet<u8>,
    pub golden: BTreeSet<u8>,
}

impl BoxLayout {
    /// Sample a layout within `cfg`'s bounds. Golden boxes are taken
    /// from the shuffled surprise prefix, so `golden ⊆ surprise` holds
    /// by construction. The golden bound is clamped to the drawn total.
    pub fn assign(cfg: &AssignmentConfig, rng: &mut impl Rng) -> Self {
        let total = rng.gen_range(cfg.min_total..=cfg.max_total) as usize;

        let mut boxes: Vec<u8> = (BOX_MIN..=BOX_MAX).collect();
        boxes.shuffle(rng);
        boxes.truncate(total);

        let golden_max = cfg.max_golden.min(total as u8);
        let golden_min = cfg.min_golden.min(golden_max);
        let golden = rng.gen_range(golden_min..=golden_max) as usize;

        Self {
            surprise: boxes.iter().copied().collect(),
            golden: boxes[..golden].iter().copied().collect(),
        }
    }

    pub fn classify(&self, box_id: u8) -> BoxContent {
        if self.golden.contains(&box_id) {
            BoxContent::Golden
        } else if self.surprise.contains(&box_id) {
            BoxContent::Surprise
        } else {
            BoxContent::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_bounds_are_valid() {
        AssignmentConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_inverted_total_range() {
        let cfg = AssignmentConfig {
            min_total: 5,
            max_total: 2,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(InvalidBounds::TotalOrder(5, 2)));
    }

    #[test]
    fn rejects_zero_min_total() {
        let cfg = AssignmentConfig {
            min_total: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(InvalidBounds::TotalRange(0, 4))));
    }

    #[test]
    fn assign_respects_invariants() {
        let cfg = AssignmentConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let layout = BoxLayout::assign(&cfg, &mut rng);
            assert!(!layout.surprise.is_empty());
            assert!(layout.surprise.len() <= cfg.max_total as usize);
            assert!(layout.golden.is_subset(&layout.surprise));
            assert!(layout.golden.len() <= cfg.max_golden as usize);
            assert!(layout.surprise.iter().all(|b| (BOX_MIN..=BOX_MAX).contains(b)));
        }
    }

    #[test]
    fn assign_is_deterministic_for_a_seed() {
        let cfg = AssignmentConfig::default();
        let a = BoxLayout::assign(&cfg, &mut StdRng::seed_from_u64(42));
        let b = BoxLayout::assign(&cfg, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn golden_bound_clamps_to_drawn_total() {
        // Force a single surprise box; golden must then be 0 or 1 even
        // though max_golden allows 3.
        let cfg = AssignmentConfig {
            min_total: 1,
            max_total: 1,
            min_golden: 0,
            max_golden: 3,
        };
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let layout = BoxLayout::assign(&cfg, &mut rng);
            assert_eq!(layout.surprise.len(), 1);
            assert!(layout.golden.len() <= 1);
        }
    }

    #[test]
    fn classify_distinguishes_contents() {
        let layout = BoxLayout {
            surprise: [2, 5, 7].into_iter().collect(),
            golden: [5].into_iter().collect(),
        };
        assert_eq!(layout.classify(5), BoxContent::Golden);
        assert_eq!(layout.classify(2), BoxContent::Surprise);
        assert_eq!(layout.classify(3), BoxContent::Empty);
    }
}
