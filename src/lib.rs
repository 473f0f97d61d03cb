pub mod config;
pub mod dataset;
pub mod error;
pub mod model_inspector;
pub mod risk;

pub use config::{OperationMetrics, OperationReport, RunConfig, StageTiming};
pub use dataset::{DatasetRewriter, RewriteReport, RiskDistribution, RiskTable};
pub use error::{Result, RiskError};
pub use model_inspector::{inspect as inspect_model, ModelSummary};
pub use risk::{calculate_risk_index, RiskBucket, RiskRow, RiskScore, WeightTables};
