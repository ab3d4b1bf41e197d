use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{clamp_score, round_score};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Lower bound of each grade, highest first. Anything below the last
    /// entry is an F.
    pub const BANDS: [(u8, Grade); 4] = [(80, Grade::A), (60, Grade::B), (40, Grade::C), (20, Grade::D)];

    pub fn from_score(score: u8) -> Self {
        Self::BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// A bounded score with the weighted contributions that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub grade: Grade,
    pub factors: BTreeMap<String, f64>,
}

impl ScoreResult {
    /// Sums the contributions, then rounds and clamps to `[0, 100]`.
    pub fn from_factors<'a>(factors: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let factors: BTreeMap<String, f64> = factors
            .into_iter()
            .map(|(name, value)| (name.to_string(), if value.is_nan() { 0.0 } else { value }))
            .collect();
        let total: f64 = factors.values().sum();
        let score = round_score(total);
        Self {
            score,
            grade: Grade::from_score(score),
            factors,
        }
    }

    pub fn raw_total(&self) -> f64 {
        self.factors.values().sum()
    }

    pub fn factor(&self, name: &str) -> f64 {
        self.factors.get(name).copied().unwrap_or(0.0)
    }
}

pub(crate) fn weighted(weight: f64, sub_score: f64) -> f64 {
    weight.max(0.0) * clamp_score(sub_score)
}
