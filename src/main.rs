use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use ideorder::config::OrderConfig;
use ideorder::error::OrderResult;
use ideorder::loader;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short = 'k', long, default_value = "data/karyotype.txt")]
    karyotype: String,

    #[arg(global = true, short = 'l', long, default_value = "data/links.txt")]
    links: String,

    /// JSON file with base settings; flags given on the command line win
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for an ideogram order with fewer (or more) crossing links
    Order(cmd::order::OrderArgs),
    /// Report the crossing score of an order without optimizing
    Score(cmd::score::ScoreArgs),
}

fn resolve_config(
    cli: &Cli,
    cli_config: &OrderConfig,
    sub_matches: &clap::ArgMatches,
) -> OrderResult<OrderConfig> {
    match &cli.config {
        Some(path) => {
            info!("⚙️  Loading settings from: {}", path);
            let mut config = OrderConfig::load_from_file(path)?;
            config.merge_from_cli(cli_config, sub_matches);
            Ok(config)
        }
        None => Ok(cli_config.clone()),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let cli_config = match &cli.command {
        Commands::Order(args) => &args.config,
        Commands::Score(args) => &args.config,
    };
    // Flattened settings live on the subcommand's matches.
    let sub_matches = matches.subcommand().map_or(&matches, |(_, m)| m);

    if let Err(e) = run(&cli, cli_config, sub_matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, cli_config: &OrderConfig, sub_matches: &clap::ArgMatches) -> OrderResult<()> {
    let config = resolve_config(cli, cli_config, sub_matches)?;

    if let Some(n) = config.search.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
        {
            warn!("⚠️  Could not size thread pool to {}: {}", n, e);
        }
    }

    let karyotype = loader::load_karyotype(&cli.karyotype)?;
    let links = loader::load_links(&cli.links, &karyotype)?;

    match &cli.command {
        Commands::Order(args) => cmd::order::run(args, &config, &karyotype, &links),
        Commands::Score(args) => cmd::score::run(args, &config, &karyotype, &links),
    }
}
