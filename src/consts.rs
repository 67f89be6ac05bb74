/// Iterations used when the first round does not name any.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Lower bound on flips per candidate when the first round does not name one.
pub const DEFAULT_MIN_FLIPS: usize = 1;

/// Upper bound on flips per candidate when the first round does not name one.
pub const DEFAULT_MAX_FLIPS: usize = 5;

/// Starting temperature when the first round does not name one.
pub const DEFAULT_TEMP0: f64 = 0.01;

/// Below this many links the pairwise crossing count stays on one thread.
pub const PARALLEL_SCORE_THRESHOLD: usize = 2048;

/// Prefix marking a round parameter as relative to the previous round.
pub const RELATIVE_PREFIX: char = 'r';

/// Token that opens an ideogram definition in a karyotype file.
pub const KARYOTYPE_CHR_TOKEN: &str = "chr";
