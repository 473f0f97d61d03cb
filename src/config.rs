// src/config.rs

use lazy_static::lazy_static;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RunConfig {
    // Files
    pub dataset_path: PathBuf,     // Default: risk_.csv
    pub backup_path: PathBuf,      // Default: risk_backup_before_update.csv
    pub model_path: PathBuf,       // Default: Anon/MLModel/ANON.mlmodel

    // Reporting
    pub histogram_rows: usize,     // Default: 20
    pub sample_rows: usize,        // Default: 5

    // Randomness
    pub seed: Option<u64>,         // Default: entropy
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            dataset_path: PathBuf::from("risk_.csv"),
            backup_path: PathBuf::from("risk_backup_before_update.csv"),
            model_path: PathBuf::from("Anon/MLModel/ANON.mlmodel"),
            histogram_rows: 20,
            sample_rows: 5,
            seed: None,
        }
    }
}

lazy_static! {
    pub static ref DEFAULT_CONFIG: RunConfig = RunConfig::default();
}

/// Wall time spent in each named stage of one run.
#[derive(Debug, Clone)]
pub struct OperationMetrics {
    operation: String,
    started: Instant,
    last_mark: Instant,
    stages: Vec<StageTiming>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTiming {
    pub stage: String,
    pub duration: Duration,
}

impl OperationMetrics {
    pub fn new(operation: impl Into<String>) -> Self {
        let now = Instant::now();
        OperationMetrics {
            operation: operation.into(),
            started: now,
            last_mark: now,
            stages: Vec::new(),
        }
    }

    /// Closes the stage that began at the previous checkpoint.
    pub fn checkpoint(&mut self, stage: &str) {
        let now = Instant::now();
        let duration = now.duration_since(self.last_mark);
        self.last_mark = now;
        log::debug!("{}: {} took {:?}", self.operation, stage, duration);
        self.stages.push(StageTiming {
            stage: stage.to_string(),
            duration,
        });
    }

    pub fn complete(self) -> OperationReport {
        let total_duration = self.started.elapsed();
        if let Some(slowest) = self.stages.iter().max_by_key(|timing| timing.duration) {
            log::debug!(
                "{} finished in {:?}, slowest stage {}",
                self.operation,
                total_duration,
                slowest.stage
            );
        }
        OperationReport {
            operation: self.operation,
            total_duration,
            stages: self.stages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: String,
    pub total_duration: Duration,
    pub stages: Vec<StageTiming>,
}

impl OperationReport {
    pub fn stage(&self, name: &str) -> Option<Duration> {
        self.stages
            .iter()
            .find(|timing| timing.stage == name)
            .map(|timing| timing.duration)
    }
}
