use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;

use super::bands::{humidity_band, progress_band, temperature_band, worker_band};
use super::weights::WeightTables;

const SAFE_CUTOFF: f64 = 0.70;
const MODERATE_CUTOFF: f64 = 0.90;

/// Fields of one dataset record that feed the risk computation.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRow {
    pub weather: String,
    pub temperature: f64,
    pub humidity: f64,
    pub construction_type: String,
    pub process: String,
    pub progress_rate: f64,
    pub worker_count: i64,
}

/// Per-factor weights of the weighted risk sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskBreakdown {
    pub base: i32,
    pub weather: i32,
    pub temperature: i32,
    pub humidity: i32,
    pub construction: i32,
    pub process: i32,
    pub progress: i32,
    pub workers: i32,
}

impl RiskBreakdown {
    pub fn total(&self) -> i32 {
        self.base
            + self.weather
            + self.temperature
            + self.humidity
            + self.construction
            + self.process
            + self.progress
            + self.workers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskBucket {
    Safe,
    Moderate,
    High,
}

impl RiskBucket {
    pub const ALL: [RiskBucket; 3] = [RiskBucket::Safe, RiskBucket::Moderate, RiskBucket::High];

    /// Classifies any index, including values outside 1..=30 found in old data.
    pub fn for_index(index: i64) -> Self {
        if index <= 10 {
            RiskBucket::Safe
        } else if index <= 20 {
            RiskBucket::Moderate
        } else {
            RiskBucket::High
        }
    }

    pub fn range(self) -> RangeInclusive<i64> {
        match self {
            RiskBucket::Safe => 1..=10,
            RiskBucket::Moderate => 11..=20,
            RiskBucket::High => 21..=30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBucket::Safe => "safe",
            RiskBucket::Moderate => "moderate",
            RiskBucket::High => "high",
        }
    }

    /// 70% safe, 20% moderate, 10% high.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let roll: f64 = rng.gen();
        if roll <= SAFE_CUTOFF {
            RiskBucket::Safe
        } else if roll <= MODERATE_CUTOFF {
            RiskBucket::Moderate
        } else {
            RiskBucket::High
        }
    }

    pub fn draw_index<R: Rng + ?Sized>(self, rng: &mut R) -> i64 {
        rng.gen_range(self.range())
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.range();
        write!(f, "{} ({}-{})", self.label(), range.start(), range.end())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskScore {
    pub breakdown: RiskBreakdown,
    /// Drawn from -3..=3 and never applied to `index`.
    pub perturbation: i32,
    pub bucket: RiskBucket,
    pub index: i64,
}

pub fn weighted_sum(row: &RiskRow, weights: &WeightTables) -> RiskBreakdown {
    RiskBreakdown {
        base: weights.base,
        weather: weights.weather_weight(&row.weather),
        temperature: temperature_band(row.temperature),
        humidity: humidity_band(row.humidity),
        construction: weights.construction_weight(&row.construction_type),
        process: weights.process_weight(&row.process),
        progress: progress_band(row.progress_rate),
        workers: worker_band(row.worker_count),
    }
}

/// Computes the weighted sum, then returns an index drawn from a randomly
/// chosen bucket. The weighted sum does not influence the returned index.
pub fn calculate_risk_index<R: Rng + ?Sized>(
    row: &RiskRow,
    weights: &WeightTables,
    rng: &mut R,
) -> RiskScore {
    let breakdown = weighted_sum(row, weights);
    let perturbation = rng.gen_range(-3..=3);
    let bucket = RiskBucket::draw(rng);
    let index = bucket.draw_index(rng);

    log::trace!(
        "weighted sum {} (perturbation {}) discarded for {} draw {}",
        breakdown.total(),
        perturbation,
        bucket.label(),
        index
    );

    RiskScore {
        breakdown,
        perturbation,
        bucket,
        index,
    }
}
