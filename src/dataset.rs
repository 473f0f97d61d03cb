mod persist;
mod rewriter;
mod summary;
mod table;


pub use persist::{replace_file, sha256_hex, write_backup, BackupRecord};
pub use rewriter::{DatasetRewriter, RewriteReport};
pub use summary::{BucketCounts, RiskDistribution};
pub use table::{RiskTable, SampleRow, RISK_INDEX_COLUMN};
