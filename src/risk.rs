mod bands;
mod hourly;
mod score;
mod weights;

#[cfg(test)]
mod tests;

pub use bands::{humidity_band, progress_band, temperature_band, worker_band};
pub use hourly::{
    hourly_profile, recommend_work_window, HourlyRisk, HourlyRiskLevel, TaskProfile, WorkWindow,
};
pub use score::{
    calculate_risk_index, weighted_sum, RiskBreakdown, RiskBucket, RiskRow, RiskScore,
};
pub use weights::{
    construction_category, Weather, WeightTables, DEFAULT_WEIGHTS, WEIGHTS_OVERRIDE_ENV,
};
