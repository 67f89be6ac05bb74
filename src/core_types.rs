use crate::error::{OrderError, OrderResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter, EnumString};

/// Position of an ideogram in the karyotype table.
pub type IdeoIdx = usize;

/// An ordering of ideograms, left to right on the concatenated axis.
pub type Order = Vec<IdeoIdx>;

/// Crossing count for one ordering.
pub type Score = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ideogram {
    pub name: String,
    pub label: String,
    /// Line order among `chr` lines of the karyotype file.
    pub index: usize,
    pub start: i64,
    pub end: i64,
}

impl Ideogram {
    #[inline]
    pub fn span(&self) -> i64 {
        self.end - self.start
    }

    /// Normalizes the midpoint of `[start, end]` into `[0, 1]` within this ideogram.
    pub fn fraction(&self, start: i64, end: i64) -> f64 {
        let span = self.span();
        if span <= 0 {
            return 0.0;
        }
        let mid = (start + end) as f64 / 2.0;
        ((mid - self.start as f64) / span as f64).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub ideo1: IdeoIdx,
    pub frac1: f64,
    pub ideo2: IdeoIdx,
    pub frac2: f64,
}

impl Link {
    #[inline]
    pub fn is_self_link(&self) -> bool {
        self.ideo1 == self.ideo2
    }
}

#[derive(Debug, Clone, Default)]
pub struct Karyotype {
    ideograms: Vec<Ideogram>,
    by_name: HashMap<String, IdeoIdx>,
}

impl Karyotype {
    pub fn new(ideograms: Vec<Ideogram>) -> OrderResult<Self> {
        let mut by_name = HashMap::with_capacity(ideograms.len());
        for (i, ideo) in ideograms.iter().enumerate() {
            if by_name.insert(ideo.name.clone(), i).is_some() {
                return Err(OrderError::Config(format!(
                    "Ideogram '{}' is defined more than once in the karyotype",
                    ideo.name
                )));
            }
        }
        Ok(Self { ideograms, by_name })
    }

    pub fn len(&self) -> usize {
        self.ideograms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideograms.is_empty()
    }

    pub fn get(&self, idx: IdeoIdx) -> &Ideogram {
        &self.ideograms[idx]
    }

    pub fn index_of(&self, name: &str) -> Option<IdeoIdx> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ideogram> {
        self.ideograms.iter()
    }

    pub fn name(&self, idx: IdeoIdx) -> &str {
        &self.ideograms[idx].name
    }

    pub fn names(&self, order: &[IdeoIdx]) -> Vec<&str> {
        order.iter().map(|&i| self.name(i)).collect()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Optimize {
    #[default]
    Minimize,
    Maximize,
}

impl Optimize {
    /// Whether `candidate` beats `incumbent` in this direction.
    #[inline]
    pub fn is_better(self, candidate: Score, incumbent: Score) -> bool {
        match self {
            Self::Minimize => candidate < incumbent,
            Self::Maximize => candidate > incumbent,
        }
    }

    /// Whether a relative score change counts as an improving move.
    #[inline]
    pub fn is_improvement(self, delta: f64) -> bool {
        match self {
            Self::Minimize => delta < 0.0,
            Self::Maximize => delta > 0.0,
        }
    }
}
