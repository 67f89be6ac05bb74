use crate::reports;
use clap::Args;
use ideorder::config::OrderConfig;
use ideorder::core_types::{Karyotype, Link};
use ideorder::error::OrderResult;
use ideorder::scorer::Scorer;
use ideorder::selection;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: OrderConfig,

    /// Order to score; may be partial, unnamed ideograms follow in their initial order
    #[arg(long, value_delimiter = ',')]
    pub order: Vec<String>,
}

pub fn run(
    args: &ScoreArgs,
    config: &OrderConfig,
    karyotype: &Karyotype,
    links: &[Link],
) -> OrderResult<()> {
    let selection = selection::resolve(karyotype, links, &config.selection)?;
    let scorer = Scorer::new(links, &selection.order, karyotype.len());

    let leaders = args
        .order
        .iter()
        .filter_map(|name| karyotype.index_of(name.trim()));
    let order = selection::lead_with(&selection.order, leaders);

    let score = scorer.score(&order);
    reports::print_score_summary(karyotype, &order, &selection, scorer.link_count(), score);
    println!("{}", score);
    Ok(())
}
