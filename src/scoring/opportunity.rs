use serde::{Deserialize, Serialize};

use crate::clamp_score;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpportunityWeights {
    pub trend: f64,
    pub potential: f64,
}

impl Default for OpportunityWeights {
    fn default() -> Self {
        Self {
            trend: 0.5,
            potential: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpportunityBand {
    MuyBaja,
    Baja,
    Media,
    Alta,
    MuyAlta,
}

impl OpportunityBand {
    /// Lower bound of each band on the combined score, highest first.
    pub const FLOORS: [(f64, OpportunityBand); 4] = [
        (80.0, OpportunityBand::MuyAlta),
        (60.0, OpportunityBand::Alta),
        (40.0, OpportunityBand::Media),
        (20.0, OpportunityBand::Baja),
    ];

    pub fn from_score(combined_score: f64) -> Self {
        let score = clamp_score(combined_score);
        Self::FLOORS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, band)| *band)
            .unwrap_or(OpportunityBand::MuyBaja)
    }

    pub fn label(self) -> &'static str {
        match self {
            OpportunityBand::MuyBaja => "MUY BAJA",
            OpportunityBand::Baja => "BAJA",
            OpportunityBand::Media => "MEDIA",
            OpportunityBand::Alta => "ALTA",
            OpportunityBand::MuyAlta => "MUY ALTA",
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            OpportunityBand::MuyBaja => "Not a priority",
            OpportunityBand::Baja => "Monitor and revisit next quarter",
            OpportunityBand::Media => "Evaluate demand with suppliers",
            OpportunityBand::Alta => "Prioritize catalogue and content",
            OpportunityBand::MuyAlta => "Act now before competitors",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            OpportunityBand::MuyBaja => "#EF4444",
            OpportunityBand::Baja => "#F97316",
            OpportunityBand::Media => "#F59E0B",
            OpportunityBand::Alta => "#10B981",
            OpportunityBand::MuyAlta => "#7C3AED",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            OpportunityBand::MuyBaja => "❄️",
            OpportunityBand::Baja => "🌥️",
            OpportunityBand::Media => "⚖️",
            OpportunityBand::Alta => "📈",
            OpportunityBand::MuyAlta => "🔥",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityLevel {
    pub level: OpportunityBand,
    pub combined_score: f64,
    pub action: String,
    pub color: String,
    pub icon: String,
}

/// Weighted average of the two headline scores mapped onto five bands.
/// Out-of-range inputs are clamped; there is no failure path.
pub fn calculate_opportunity_level(
    trend_score: f64,
    potential_score: f64,
    weights: &OpportunityWeights,
) -> OpportunityLevel {
    let trend = clamp_score(trend_score);
    let potential = clamp_score(potential_score);

    let trend_weight = weights.trend.max(0.0);
    let potential_weight = weights.potential.max(0.0);
    let total_weight = trend_weight + potential_weight;
    let combined = if total_weight > 0.0 {
        (trend * trend_weight + potential * potential_weight) / total_weight
    } else {
        (trend + potential) / 2.0
    };
    let combined_score = (clamp_score(combined) * 10.0).round() / 10.0;

    let level = OpportunityBand::from_score(combined_score);
    OpportunityLevel {
        level,
        combined_score,
        action: level.action().to_string(),
        color: level.color().to_string(),
        icon: level.icon().to_string(),
    }
}
