pub mod anneal;
pub mod mutation;
pub mod runner;
pub mod warmup;

pub use self::anneal::{Annealer, RoundStats};
pub use self::runner::{
    NoProgress, OptimizationOptions, OptimizationResult, Optimizer, ProgressCallback,
    RoundKind, RoundParameters, RoundReport,
};
