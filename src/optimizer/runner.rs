use super::anneal::{Annealer, RoundStats};
use super::warmup;
use crate::config::{OrderConfig, ParamValue, RoundSpec};
use crate::consts::{DEFAULT_ITERATIONS, DEFAULT_MAX_FLIPS, DEFAULT_MIN_FLIPS, DEFAULT_TEMP0};
use crate::core_types::{Optimize, Order, Score};
use crate::error::{OrderError, OrderResult};
use crate::scorer::Scorer;
use crate::selection::Selection;
use strum_macros::Display;
use tracing::info;

/// A round with every parameter resolved to a concrete value.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundParameters {
    pub iterations: usize,
    pub min_flips: usize,
    pub max_flips: usize,
    pub temp0: f64,
    pub warmup: bool,
    pub presort: bool,
    pub skip: bool,
    pub optimize: Optimize,
}

impl Default for RoundParameters {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            min_flips: DEFAULT_MIN_FLIPS,
            max_flips: DEFAULT_MAX_FLIPS,
            temp0: DEFAULT_TEMP0,
            warmup: false,
            presort: false,
            skip: false,
            optimize: Optimize::Minimize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RoundKind {
    Warmup,
    Anneal,
    Skipped,
}

impl RoundParameters {
    pub fn kind(&self) -> RoundKind {
        if self.skip {
            RoundKind::Skipped
        } else if self.warmup {
            RoundKind::Warmup
        } else {
            RoundKind::Anneal
        }
    }
}

fn resolve_param(
    name: &str,
    value: Option<ParamValue>,
    previous: Option<f64>,
    default: f64,
) -> OrderResult<f64> {
    match value {
        Some(v) => v.resolve(name, previous),
        None => Ok(previous.unwrap_or(default)),
    }
}

fn to_count(round: usize, name: &str, value: f64) -> OrderResult<usize> {
    if !value.is_finite() || value < 0.0 {
        return Err(OrderError::Config(format!(
            "Round {}: {} must be a non-negative number, got {}",
            round, name, value
        )));
    }
    Ok(value.round() as usize)
}

/// Resolves relative (`r<factor>`) and omitted parameters round by round.
///
/// Each parameter chains independently: a relative value multiplies the
/// previous round's resolved value of the same name, an omitted one
/// inherits it. Skipped rounds still take part in the chain. An empty
/// schedule yields one default annealing round.
pub fn resolve_rounds(specs: &[RoundSpec], optimize: Optimize) -> OrderResult<Vec<RoundParameters>> {
    if specs.is_empty() {
        return Ok(vec![RoundParameters {
            optimize,
            ..Default::default()
        }]);
    }

    let mut resolved: Vec<RoundParameters> = Vec::with_capacity(specs.len());

    for (i, spec) in specs.iter().enumerate() {
        let round = i + 1;
        let prev = resolved.last();

        let iterations = to_count(
            round,
            "iterations",
            resolve_param(
                "iterations",
                spec.iterations,
                prev.map(|p| p.iterations as f64),
                DEFAULT_ITERATIONS as f64,
            )?,
        )?;
        let min_flips = to_count(
            round,
            "min_flips",
            resolve_param(
                "min_flips",
                spec.min_flips,
                prev.map(|p| p.min_flips as f64),
                DEFAULT_MIN_FLIPS as f64,
            )?,
        )?;
        let max_flips = to_count(
            round,
            "max_flips",
            resolve_param(
                "max_flips",
                spec.max_flips,
                prev.map(|p| p.max_flips as f64),
                DEFAULT_MAX_FLIPS as f64,
            )?,
        )?;
        let temp0 = resolve_param("temp0", spec.temp0, prev.map(|p| p.temp0), DEFAULT_TEMP0)?;

        if max_flips < min_flips {
            return Err(OrderError::Config(format!(
                "Round {}: max_flips ({}) is smaller than min_flips ({})",
                round, max_flips, min_flips
            )));
        }
        if !temp0.is_finite() || temp0 < 0.0 {
            return Err(OrderError::Config(format!(
                "Round {}: temp0 must be a non-negative number, got {}",
                round, temp0
            )));
        }

        resolved.push(RoundParameters {
            iterations,
            min_flips,
            max_flips,
            temp0,
            warmup: spec.warmup,
            presort: spec.presort,
            skip: spec.skip,
            optimize: spec.optimize.unwrap_or(optimize),
        });
    }

    Ok(resolved)
}

/// Receives per-step updates during annealing. Purely observational.
pub trait ProgressCallback {
    fn on_progress(&self, round: usize, step: usize, current: Score, best: Score);
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _round: usize, _step: usize, _current: Score, _best: Score) {}
}

#[derive(Debug, Clone)]
pub struct RoundReport {
    pub round: usize,
    pub params: RoundParameters,
    /// `None` for skipped rounds.
    pub stats: Option<RoundStats>,
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub order: Order,
    pub init: Score,
    pub final_score: Score,
    pub rounds: Vec<RoundReport>,
}

/// Change from `init` to `final_score` in percent. `None` when a zero
/// starting score moved, since no percentage describes that.
pub fn percent_change(init: Score, final_score: Score) -> Option<f64> {
    match (init, final_score) {
        (0, 0) => Some(0.0),
        (0, _) => None,
        _ => Some((final_score as f64 - init as f64) / init as f64 * 100.0),
    }
}

pub fn format_change(init: Score, final_score: Score) -> String {
    match percent_change(init, final_score) {
        Some(pct) => format!("{:+.1}%", pct),
        None => "n/a".to_string(),
    }
}

pub struct OptimizationOptions {
    pub rounds: Vec<RoundParameters>,
    pub seed: Option<u64>,
}

impl TryFrom<&OrderConfig> for OptimizationOptions {
    type Error = OrderError;

    fn try_from(cfg: &OrderConfig) -> OrderResult<Self> {
        Ok(Self {
            rounds: resolve_rounds(&cfg.simulation.rounds, cfg.search.optimize)?,
            seed: cfg.search.seed,
        })
    }
}

pub struct Optimizer<'a> {
    scorer: &'a Scorer,
    selection: &'a Selection,
    options: OptimizationOptions,
}

impl<'a> Optimizer<'a> {
    pub fn new(scorer: &'a Scorer, selection: &'a Selection, options: OptimizationOptions) -> Self {
        Self {
            scorer,
            selection,
            options,
        }
    }

    /// Runs every configured round in sequence, each seeded with the
    /// previous round's best order.
    pub fn run<CB: ProgressCallback + ?Sized>(&self, callback: &CB) -> OrderResult<OptimizationResult> {
        let rng = match self.options.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        let mut annealer = Annealer::new(
            self.scorer,
            &self.selection.order,
            &self.selection.static_mask,
            rng,
        );

        let mut order = self.selection.order.clone();
        let init = self.scorer.score(&order);
        let mut reports = Vec::with_capacity(self.options.rounds.len());

        for (i, params) in self.options.rounds.iter().enumerate() {
            let round = i + 1;

            let stats = match params.kind() {
                RoundKind::Skipped => {
                    info!("⏭️  Round {} skipped", round);
                    None
                }
                RoundKind::Warmup => {
                    let before = self.scorer.score(&order);
                    order = warmup::warmup_order(
                        &order,
                        &self.selection.preorder,
                        &self.scorer.links,
                        self.scorer.ideogram_count,
                        params.presort,
                    );
                    // Warmup may move static ideograms; later rounds keep them where it put them.
                    annealer.movable = super::mutation::movable_positions(
                        &order,
                        &self.selection.static_mask,
                    );
                    Some(RoundStats {
                        init: before,
                        final_score: self.scorer.score(&order),
                        accepted: 0,
                    })
                }
                RoundKind::Anneal => {
                    info!(
                        "🔥 Round {}: {} iterations, flips {}..{}, temp0 {}, {}",
                        round,
                        params.iterations,
                        params.min_flips,
                        params.max_flips,
                        params.temp0,
                        params.optimize
                    );
                    let (best, stats) = annealer.anneal(round, &order, params, callback)?;
                    order = best;
                    Some(stats)
                }
            };

            if let Some(s) = &stats {
                info!(
                    "   Round {} ({}): {} -> {} ({})",
                    round,
                    params.kind(),
                    s.init,
                    s.final_score,
                    format_change(s.init, s.final_score)
                );
            }

            reports.push(RoundReport {
                round,
                params: params.clone(),
                stats,
            });
        }

        let final_score = self.scorer.score(&order);
        info!(
            "🏁 Crossings: {} -> {} ({})",
            init,
            final_score,
            format_change(init, final_score)
        );

        Ok(OptimizationResult {
            order,
            init,
            final_score,
            rounds: reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> RoundSpec {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_schedule_has_default_round() {
        let rounds = resolve_rounds(&[], Optimize::Maximize).unwrap();
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].iterations, DEFAULT_ITERATIONS);
        assert_eq!(rounds[0].optimize, Optimize::Maximize);
    }

    #[test]
    fn test_relative_chain() {
        let rounds = resolve_rounds(
            &[
                spec("iterations=1000,min_flips=2,max_flips=10,temp0=0.5"),
                spec("iterations=r2,max_flips=r0.5,temp0=r0.1"),
                spec("skip,iterations=r2"),
                spec("iterations=r0.25"),
            ],
            Optimize::Minimize,
        )
        .unwrap();

        assert_eq!(rounds[1].iterations, 2000);
        assert_eq!(rounds[1].min_flips, 2);
        assert_eq!(rounds[1].max_flips, 5);
        assert!((rounds[1].temp0 - 0.05).abs() < 1e-12);
        assert_eq!(rounds[2].iterations, 4000);
        assert_eq!(rounds[2].kind(), RoundKind::Skipped);
        assert_eq!(rounds[3].iterations, 1000);
    }

    #[test]
    fn test_relative_first_round_is_fatal() {
        let res = resolve_rounds(&[spec("iterations=r2")], Optimize::Minimize);
        assert!(matches!(res, Err(OrderError::Config(_))));
    }

    #[test]
    fn test_flip_bounds_validated() {
        let inverted = resolve_rounds(&[spec("min_flips=5,max_flips=2")], Optimize::Minimize);
        assert!(matches!(inverted, Err(OrderError::Config(_))));

        let negative = resolve_rounds(&[spec("min_flips=-1")], Optimize::Minimize);
        assert!(matches!(negative, Err(OrderError::Config(_))));
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(0, 10), None);
        assert_eq!(percent_change(0, 0), Some(0.0));
        assert_eq!(percent_change(10, 5), Some(-50.0));
        assert_eq!(format_change(0, 10), "n/a");
        assert_eq!(format_change(10, 15), "+50.0%");
    }
}
