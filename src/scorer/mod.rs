pub mod engine;

use crate::consts::PARALLEL_SCORE_THRESHOLD;
use crate::core_types::{IdeoIdx, Link, Score};
use tracing::debug;

/// Counts crossing link pairs for an ordering.
///
/// Holds only the links whose ends both belong to the shuffled set; every
/// call recomputes the count from scratch and has no side effects.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub links: Vec<Link>,
    pub ideogram_count: usize,
    pub parallel_threshold: usize,
}

impl Scorer {
    /// `order` is any ordering of the shuffled set; it only decides which links are kept.
    pub fn new(links: &[Link], order: &[IdeoIdx], ideogram_count: usize) -> Self {
        let mut member = vec![false; ideogram_count];
        for &idx in order {
            member[idx] = true;
        }

        let kept: Vec<Link> = links
            .iter()
            .filter(|l| member[l.ideo1] && member[l.ideo2])
            .copied()
            .collect();

        if kept.len() < links.len() {
            debug!(
                "   Scoring {} of {} links (others touch unselected ideograms)",
                kept.len(),
                links.len()
            );
        }

        Self {
            links: kept,
            ideogram_count,
            parallel_threshold: PARALLEL_SCORE_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn score(&self, order: &[IdeoIdx]) -> Score {
        let segments = engine::layout_segments(order, &self.links, self.ideogram_count);
        if segments.len() >= self.parallel_threshold {
            engine::count_crossings_par(&segments)
        } else {
            engine::count_crossings(&segments)
        }
    }
}
