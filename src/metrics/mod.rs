pub mod growth;
pub mod seasonality;

pub use growth::{calculate_growth_rate, GrowthConfig, GrowthMetrics, TrendDirection};
pub use seasonality::{calculate_seasonality, MonthlyAverage, SeasonalityConfig, SeasonalityMetrics};
