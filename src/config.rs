use crate::consts::RELATIVE_PREFIX;
use crate::core_types::Optimize;
use crate::error::{OrderError, OrderResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderConfig {
    #[command(flatten)]
    pub selection: SelectionArgs,
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub simulation: Simulation,
}

/// Which ideograms take part, where they start, and which of them stay put.
/// List-valued flags take comma-separated values.
#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectionArgs {
    /// File of ideogram names to shuffle
    #[arg(long)]
    pub shuffle_file: Option<PathBuf>,
    /// Case-insensitive regexes selecting ideograms to shuffle
    #[arg(long, value_delimiter = ',')]
    pub shuffle_regex: Vec<String>,
    /// Explicit ideogram names to shuffle
    #[arg(long, value_delimiter = ',')]
    pub shuffle_list: Vec<String>,

    /// Regexes whose matches lead the initial order, in regex order
    #[arg(long, value_delimiter = ',')]
    pub init_order_regex: Vec<String>,
    /// Names that lead the initial order, applied after --init-order-regex
    #[arg(long, value_delimiter = ',')]
    pub init_order: Vec<String>,

    /// Regexes naming ideograms that never move during annealing
    #[arg(long, value_delimiter = ',')]
    pub static_regex: Vec<String>,
    /// Names of ideograms that never move during annealing
    #[arg(long, value_delimiter = ',')]
    pub static_list: Vec<String>,
}

impl SelectionArgs {
    pub fn has_shuffle_directive(&self) -> bool {
        self.shuffle_file.is_some() || !self.shuffle_regex.is_empty() || !self.shuffle_list.is_empty()
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, value_enum, default_value_t = Optimize::Minimize)]
    pub optimize: Optimize,
    /// Seed for a reproducible run
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    /// Threads used for crossing counts (defaults to rayon's choice)
    #[arg(long)]
    pub threads: Option<usize>,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Simulation {
    /// Round descriptor, e.g. "iterations=1000,min_flips=1,max_flips=r2,temp0=0.01" (repeatable)
    #[arg(long = "round", value_name = "SPEC")]
    pub rounds: Vec<RoundSpec>,
}

impl OrderConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> OrderResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| OrderError::read(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites fields with values the user typed on the command line.
    /// Defaults filled in by clap never replace values from the file.
    pub fn merge_from_cli(&mut self, cli: &OrderConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(selection.shuffle_file);
        update_if_present!(selection.shuffle_regex);
        update_if_present!(selection.shuffle_list);
        update_if_present!(selection.init_order_regex);
        update_if_present!(selection.init_order);
        update_if_present!(selection.static_regex);
        update_if_present!(selection.static_list);

        update_if_present!(search.optimize);
        update_if_present!(search.seed);
        update_if_present!(search.threads);

        update_if_present!(simulation.rounds);
    }
}

/// A round parameter: either a literal value or a factor applied to
/// the previous round's resolved value (`"r<factor>"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParam", into = "RawParam")]
pub enum ParamValue {
    Absolute(f64),
    Relative(f64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawParam {
    Number(f64),
    Text(String),
}

impl TryFrom<RawParam> for ParamValue {
    type Error = String;

    fn try_from(raw: RawParam) -> Result<Self, Self::Error> {
        match raw {
            RawParam::Number(v) => Ok(Self::Absolute(v)),
            RawParam::Text(s) => s.parse(),
        }
    }
}

impl From<ParamValue> for RawParam {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Absolute(v) => RawParam::Number(v),
            ParamValue::Relative(_) => RawParam::Text(value.to_string()),
        }
    }
}

impl FromStr for ParamValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (relative, body) = match s.strip_prefix(RELATIVE_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let value: f64 = body
            .parse()
            .map_err(|_| format!("'{}' is neither a number nor r<factor>", s))?;
        if !value.is_finite() {
            return Err(format!("'{}' is not finite", s));
        }
        Ok(if relative {
            Self::Relative(value)
        } else {
            Self::Absolute(value)
        })
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(v) => write!(f, "{}", v),
            Self::Relative(v) => write!(f, "{}{}", RELATIVE_PREFIX, v),
        }
    }
}

impl ParamValue {
    /// Resolves against the previous round's value for the same parameter.
    pub fn resolve(self, name: &str, previous: Option<f64>) -> OrderResult<f64> {
        match self {
            Self::Absolute(v) => Ok(v),
            Self::Relative(factor) => previous.map(|p| p * factor).ok_or_else(|| {
                OrderError::Config(format!(
                    "Parameter '{}' = {} is relative but no previous round defines it",
                    name, self
                ))
            }),
        }
    }
}

/// One entry of the simulation schedule, as written by the user.
/// Omitted parameters inherit the previous round's resolved value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoundSpec {
    pub iterations: Option<ParamValue>,
    pub min_flips: Option<ParamValue>,
    pub max_flips: Option<ParamValue>,
    pub temp0: Option<ParamValue>,
    pub warmup: bool,
    pub skip: bool,
    /// Sort the warmup pre-order by ascending link degree.
    pub presort: bool,
    pub optimize: Option<Optimize>,
}

impl FromStr for RoundSpec {
    type Err = String;

    /// Parses `key=value` pairs separated by commas. Boolean keys may appear bare.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut spec = RoundSpec::default();

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = match part.split_once('=') {
                Some((k, v)) => (k.trim(), Some(v.trim())),
                None => (part, None),
            };

            let number = |v: Option<&str>| -> Result<ParamValue, String> {
                v.ok_or_else(|| format!("'{}' needs a value", key))?.parse()
            };
            let flag = |v: Option<&str>| -> Result<bool, String> {
                match v {
                    None => Ok(true),
                    Some(v) => v
                        .parse()
                        .map_err(|_| format!("'{}' expects true or false, got '{}'", key, v)),
                }
            };

            match key {
                "iterations" => spec.iterations = Some(number(value)?),
                "min_flips" => spec.min_flips = Some(number(value)?),
                "max_flips" => spec.max_flips = Some(number(value)?),
                "temp0" => spec.temp0 = Some(number(value)?),
                "warmup" => spec.warmup = flag(value)?,
                "skip" => spec.skip = flag(value)?,
                "presort" => spec.presort = flag(value)?,
                "optimize" => {
                    let v = value.ok_or_else(|| "'optimize' needs a value".to_string())?;
                    spec.optimize = Some(
                        v.parse()
                            .map_err(|_| {
                                let known: Vec<String> =
                                    Optimize::iter().map(|o| o.to_string()).collect();
                                format!(
                                    "unknown optimize direction '{}' (expected one of: {})",
                                    v,
                                    known.join(", ")
                                )
                            })?,
                    );
                }
                other => return Err(format!("unknown round parameter '{}'", other)),
            }
        }

        Ok(spec)
    }
}
