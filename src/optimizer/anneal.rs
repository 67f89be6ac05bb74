use super::mutation;
use super::runner::{ProgressCallback, RoundParameters};
use crate::core_types::{IdeoIdx, Order, Score};
use crate::error::{OrderError, OrderResult};
use crate::scorer::Scorer;
use fastrand::Rng;

/// Scores at the start and end of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStats {
    pub init: Score,
    pub final_score: Score,
    pub accepted: usize,
}

/// Runs annealing rounds over a fixed movable set.
pub struct Annealer<'a> {
    pub scorer: &'a Scorer,
    pub movable: Vec<usize>,
    pub rng: Rng,
}

/// Relative change from `current` to `candidate`; a zero current score
/// counts as a full-scale change.
#[inline]
pub fn relative_change(current: Score, candidate: Score) -> f64 {
    if current == 0 {
        return 1.0;
    }
    (candidate as f64 - current as f64) / current as f64
}

impl<'a> Annealer<'a> {
    pub fn new(scorer: &'a Scorer, order: &[IdeoIdx], static_mask: &[bool], rng: Rng) -> Self {
        Self {
            scorer,
            movable: mutation::movable_positions(order, static_mask),
            rng,
        }
    }

    /// One round of `params.iterations` steps. Rejected candidates are
    /// discarded; the round always runs to completion.
    pub fn anneal<CB: ProgressCallback + ?Sized>(
        &mut self,
        round: usize,
        order: &[IdeoIdx],
        params: &RoundParameters,
        callback: &CB,
    ) -> OrderResult<(Order, RoundStats)> {
        let flip_range = params
            .max_flips
            .checked_sub(params.min_flips)
            .ok_or_else(|| {
                OrderError::Config(format!(
                    "Round {}: max_flips ({}) is smaller than min_flips ({})",
                    round, params.max_flips, params.min_flips
                ))
            })? as f64;

        let init = self.scorer.score(order);
        let mut current = order.to_vec();
        let mut current_score = init;
        let mut best = current.clone();
        let mut best_score = init;
        let mut accepted = 0;

        if params.iterations > 0 && params.max_flips > 0 && self.movable.len() < 2 {
            return Err(OrderError::InsufficientMovable {
                movable: self.movable.len(),
            });
        }

        let iterations = params.iterations;

        for step in 0..iterations {
            let progress = (iterations - step) as f64 / iterations as f64;
            let flips = params.min_flips + (progress * flip_range).round() as usize;

            let candidate =
                mutation::flip_chromosomes(&current, flips, &self.movable, &mut self.rng)?;
            let candidate_score = self.scorer.score(&candidate);

            let delta = relative_change(current_score, candidate_score);
            let temp = params.temp0 * progress;

            let accept = params.optimize.is_improvement(delta)
                || self.rng.f64() < (-delta.abs() / temp).exp();

            if accept {
                current = candidate;
                current_score = candidate_score;
                accepted += 1;
                if params.optimize.is_better(current_score, best_score) {
                    best.clone_from(&current);
                    best_score = current_score;
                }
            }

            callback.on_progress(round, step, current_score, best_score);
        }

        Ok((
            best,
            RoundStats {
                init,
                final_score: best_score,
                accepted,
            },
        ))
    }
}
