use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use bytesize::ByteSize;
use chrono::{DateTime, Local};
use rand::Rng;
use serde::Serialize;

use super::persist::{replace_file, write_backup, BackupRecord};
use super::summary::RiskDistribution;
use super::table::{RiskTable, SampleRow};
use crate::config::{OperationMetrics, OperationReport, RunConfig};
use crate::error::{Result, RiskError};
use crate::risk::WeightTables;

/// Rewrites the `risk_index` column of a dataset file in place.
pub struct DatasetRewriter<'a> {
    config: &'a RunConfig,
    weights: &'a WeightTables,
}

#[derive(Debug, Clone, Serialize)]
pub struct RewriteReport {
    pub dataset_path: PathBuf,
    pub started_at: DateTime<Local>,
    pub rows: usize,
    pub source_bytes: u64,
    pub before: RiskDistribution,
    pub after: RiskDistribution,
    /// Mean of the discarded weighted sums, for comparison with `after`.
    pub mean_weighted_sum: f64,
    pub backup: BackupRecord,
    pub sample: Vec<SampleRow>,
    pub timings: OperationReport,
}

impl<'a> DatasetRewriter<'a> {
    pub fn new(config: &'a RunConfig, weights: &'a WeightTables) -> Self {
        DatasetRewriter { config, weights }
    }

    /// Load, recalculate, back up the untouched bytes, then replace the source.
    ///
    /// Nothing is written unless every row parses. The source is replaced
    /// only after the backup has been written and verified.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RewriteReport> {
        let started_at = Local::now();
        let mut metrics = OperationMetrics::new("risk_index rewrite");
        let path = &self.config.dataset_path;

        log::info!("Reading {}", path.display());
        let original = fs::read(path).map_err(|e| RiskError::io(path, e))?;
        let mut table = RiskTable::from_bytes(&original)?;
        log::info!(
            "Loaded {} rows ({})",
            table.len(),
            ByteSize::b(original.len() as u64)
        );
        metrics.checkpoint("load");

        let before = RiskDistribution::from_values(table.risk_indices());

        log::info!("Recalculating risk_index");
        let scores = table.recalculate(self.weights, rng);
        let after = RiskDistribution::from_values(table.risk_indices());
        let mean_weighted_sum = if scores.is_empty() {
            0.0
        } else {
            scores
                .iter()
                .map(|score| f64::from(score.breakdown.total()))
                .sum::<f64>()
                / scores.len() as f64
        };
        log::debug!(
            "Mean weighted sum {:.2} across {} rows (not applied)",
            mean_weighted_sum,
            scores.len()
        );
        let updated = table.to_csv_bytes()?;
        metrics.checkpoint("recalculate");

        let backup = write_backup(&original, &self.config.backup_path)?;
        log::info!(
            "Backup written to {} (sha256 {})",
            backup.path.display(),
            backup.sha256
        );
        metrics.checkpoint("backup");

        replace_file(path, &updated)?;
        log::info!("Updated {}", path.display());
        metrics.checkpoint("save");

        Ok(RewriteReport {
            dataset_path: path.clone(),
            started_at,
            rows: table.len(),
            source_bytes: original.len() as u64,
            before,
            after,
            mean_weighted_sum,
            backup,
            sample: table.sample(self.config.sample_rows),
            timings: metrics.complete(),
        })
    }
}

impl RewriteReport {
    pub fn render(&self, histogram_rows: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Dataset: {} ({} rows, {})",
            self.dataset_path.display(),
            self.rows,
            ByteSize::b(self.source_bytes)
        );
        let _ = writeln!(out, "Run started: {}", self.started_at.format("%Y-%m-%d %H:%M:%S"));

        let _ = writeln!(out, "\nrisk_index distribution before update:");
        out.push_str(&self.before.render_counts(histogram_rows));
        let _ = writeln!(out, "\nrisk_index distribution after update:");
        out.push_str(&self.after.render_counts(histogram_rows));

        let _ = writeln!(out, "\nRisk buckets:");
        out.push_str(&self.after.render_buckets());
        let _ = writeln!(
            out,
            "  (mean weighted sum {:.2}, not applied to risk_index)",
            self.mean_weighted_sum
        );

        let _ = writeln!(
            out,
            "\nBackup: {} ({}, sha256 {})",
            self.backup.path.display(),
            self.backup.size(),
            self.backup.sha256
        );

        if !self.sample.is_empty() {
            let _ = writeln!(out, "\nSample rows:");
            for row in &self.sample {
                let _ = writeln!(
                    out,
                    "  {} | {} | {} | {}",
                    row.weather, row.construction_type, row.process, row.risk_index
                );
            }
        }
        out
    }
}
