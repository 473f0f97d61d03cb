use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::risk::RiskBucket;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub safe: usize,
    pub moderate: usize,
    pub high: usize,
}

impl BucketCounts {
    pub fn add(&mut self, bucket: RiskBucket) {
        match bucket {
            RiskBucket::Safe => self.safe += 1,
            RiskBucket::Moderate => self.moderate += 1,
            RiskBucket::High => self.high += 1,
        }
    }

    pub fn get(&self, bucket: RiskBucket) -> usize {
        match bucket {
            RiskBucket::Safe => self.safe,
            RiskBucket::Moderate => self.moderate,
            RiskBucket::High => self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.safe + self.moderate + self.high
    }
}

/// Value counts of a `risk_index` column plus its bucket split.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskDistribution {
    pub rows: usize,
    pub counts: BTreeMap<i64, usize>,
    /// Blank or non-integer cells; these land in no bucket.
    pub unparsed: usize,
    pub buckets: BucketCounts,
}

impl RiskDistribution {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<i64>>,
    {
        let mut distribution = RiskDistribution::default();
        for value in values {
            distribution.rows += 1;
            match value {
                Some(index) => {
                    *distribution.counts.entry(index).or_insert(0) += 1;
                    distribution.buckets.add(RiskBucket::for_index(index));
                }
                None => distribution.unparsed += 1,
            }
        }
        distribution
    }

    /// Share of all rows in `bucket`, as a percentage.
    pub fn percent(&self, bucket: RiskBucket) -> f64 {
        if self.rows == 0 {
            return 0.0;
        }
        self.buckets.get(bucket) as f64 / self.rows as f64 * 100.0
    }

    /// Histogram lines for the lowest `limit` distinct values.
    pub fn render_counts(&self, limit: usize) -> String {
        let mut out = String::new();
        if self.counts.is_empty() {
            let _ = writeln!(out, "  (no numeric values)");
        }
        for (index, count) in self.counts.iter().take(limit) {
            let _ = writeln!(out, "  {:>4}  {}", index, count);
        }
        if self.counts.len() > limit {
            let _ = writeln!(out, "  ... {} more values", self.counts.len() - limit);
        }
        if self.unparsed > 0 {
            let _ = writeln!(out, "  blank/non-numeric: {}", self.unparsed);
        }
        out
    }

    pub fn render_buckets(&self) -> String {
        let mut out = String::new();
        for bucket in RiskBucket::ALL {
            let _ = writeln!(
                out,
                "  - {:<18} {:>6} rows ({:.1}%)",
                bucket.to_string(),
                self.buckets.get(bucket),
                self.percent(bucket)
            );
        }
        out
    }
}
