use crate::reports;
use clap::{Args, ValueEnum};
use ideorder::config::OrderConfig;
use ideorder::core_types::{Karyotype, Link, Score};
use ideorder::error::{OrderError, OrderResult};
use ideorder::optimizer::{OptimizationOptions, Optimizer, ProgressCallback};
use ideorder::scorer::Scorer;
use ideorder::selection;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-joined ideogram names
    Plain,
    /// `chromosomes_order = ...` line for a circos image block
    Circos,
}

#[derive(Args, Debug, Clone)]
pub struct OrderArgs {
    #[command(flatten)]
    pub config: OrderConfig,

    /// Write the order here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Steps between debug progress lines
    #[arg(long, default_value_t = 1000)]
    pub report_every: usize,
}

struct LogProgress {
    every: usize,
}

impl ProgressCallback for LogProgress {
    fn on_progress(&self, round: usize, step: usize, current: Score, best: Score) {
        if self.every > 0 && step % self.every == 0 {
            debug!(
                "   R{} step {:6} | current {:6} | best {:6}",
                round, step, current, best
            );
        }
    }
}

pub fn format_order(names: &[&str], format: OutputFormat) -> String {
    let joined = names.join(",");
    match format {
        OutputFormat::Plain => joined,
        OutputFormat::Circos => format!("chromosomes_order = {}", joined),
    }
}

pub fn run(
    args: &OrderArgs,
    config: &OrderConfig,
    karyotype: &Karyotype,
    links: &[Link],
) -> OrderResult<()> {
    let selection = selection::resolve(karyotype, links, &config.selection)?;
    let scorer = Scorer::new(links, &selection.order, karyotype.len());
    let options = OptimizationOptions::try_from(config)?;

    info!(
        "🔍 Scoring {} links across {} rounds",
        scorer.link_count(),
        options.rounds.len()
    );

    let optimizer = Optimizer::new(&scorer, &selection, options);
    let result = optimizer.run(&LogProgress {
        every: args.report_every,
    })?;

    reports::print_round_report(&result);

    let line = format_order(&karyotype.names(&result.order), args.format);
    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", line)).map_err(|e| OrderError::write(path, e))?;
            info!("💾 Order written to {}", path.display());
        }
        None => println!("{}", line),
    }
    Ok(())
}
