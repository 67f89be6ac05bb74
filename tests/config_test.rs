use clap::{CommandFactory, FromArgMatches, Parser};
use ideorder::config::{OrderConfig, ParamValue};
use ideorder::core_types::Optimize;
use ideorder::error::OrderError;
use ideorder::optimizer::OptimizationOptions;
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: OrderConfig,
}

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const SCHEDULE: &str = r#"{
    "selection": { "static_list": ["hs1"] },
    "search": { "optimize": "minimize", "seed": 7 },
    "simulation": {
        "rounds": [
            { "warmup": true },
            { "iterations": 1000, "min_flips": 1, "max_flips": 10, "temp0": 0.01 },
            { "iterations": "r2", "max_flips": "r0.5" }
        ]
    }
}"#;

#[test]
fn test_load_and_resolve_schedule() {
    let file = config_file(SCHEDULE);
    let cfg = OrderConfig::load_from_file(file.path()).unwrap();

    assert_eq!(cfg.selection.static_list, vec!["hs1".to_string()]);
    assert_eq!(cfg.search.seed, Some(7));
    assert_eq!(cfg.simulation.rounds.len(), 3);
    assert_eq!(
        cfg.simulation.rounds[2].iterations,
        Some(ParamValue::Relative(2.0))
    );

    let options = OptimizationOptions::try_from(&cfg).unwrap();
    let last = &options.rounds[2];
    assert_eq!(last.iterations, 2000);
    assert_eq!(last.max_flips, 5);
    assert_eq!(last.min_flips, 1);
    assert!((last.temp0 - 0.01).abs() < 1e-12);
    assert!(options.rounds[0].warmup);
}

#[test]
fn test_unknown_round_key_is_rejected() {
    let file = config_file(r#"{ "simulation": { "rounds": [ { "iteratons": 5 } ] } }"#);
    assert!(matches!(
        OrderConfig::load_from_file(file.path()),
        Err(OrderError::Json(_))
    ));
}

#[test]
fn test_relative_first_round_is_fatal() {
    let file = config_file(r#"{ "simulation": { "rounds": [ { "temp0": "r2" } ] } }"#);
    let cfg = OrderConfig::load_from_file(file.path()).unwrap();
    assert!(matches!(
        OptimizationOptions::try_from(&cfg),
        Err(OrderError::Config(_))
    ));
}

#[test]
fn test_command_line_overrides_file() {
    let file = config_file(SCHEDULE);
    let mut cfg = OrderConfig::load_from_file(file.path()).unwrap();

    let matches = TestCli::command()
        .try_get_matches_from([
            "test",
            "--seed",
            "99",
            "--round",
            "iterations=50,max_flips=3",
        ])
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    cfg.merge_from_cli(&cli.config, &matches);

    assert_eq!(cfg.search.seed, Some(99));
    assert_eq!(cfg.simulation.rounds.len(), 1);
    // Not typed on the command line, so the file's values survive.
    assert_eq!(cfg.selection.static_list, vec!["hs1".to_string()]);
    assert_eq!(cfg.search.optimize, Optimize::Minimize);
}

#[test]
fn test_default_optimize_does_not_clobber_file() {
    let file = config_file(r#"{ "search": { "optimize": "maximize" } }"#);
    let mut cfg = OrderConfig::load_from_file(file.path()).unwrap();

    let matches = TestCli::command().try_get_matches_from(["test"]).unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    cfg.merge_from_cli(&cli.config, &matches);

    assert_eq!(cfg.search.optimize, Optimize::Maximize);
}

#[test]
fn test_missing_config_file_is_named() {
    let err = OrderConfig::load_from_file("/nonexistent/settings.json").unwrap_err();
    assert!(matches!(err, OrderError::Read { .. }));
    assert!(err.to_string().contains("settings.json"));
}
