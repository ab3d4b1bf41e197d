pub mod grade;
pub mod opportunity;
pub mod potential;
pub mod trend;

pub use grade::{Grade, ScoreResult};
pub use opportunity::{calculate_opportunity_level, OpportunityBand, OpportunityLevel, OpportunityWeights};
pub use potential::{calculate_potential_score, PotentialConfig};
pub use trend::{calculate_trend_score, TrendConfig};
