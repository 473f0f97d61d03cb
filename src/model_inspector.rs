pub mod proto;
mod summary;


use std::fs;
use std::path::{Path, PathBuf};

use prost::Message;

use crate::error::{Result, RiskError};

pub use summary::{FeatureSummary, ModelMetadata, ModelSummary};

/// Spec file inside an `.mlpackage` bundle.
const PACKAGE_SPEC_PATH: &str = "Data/com.apple.CoreML/model.mlmodel";

/// Resolves a `.mlmodel` file or an `.mlpackage` directory to the spec file.
pub fn resolve_spec_path(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        let spec = path.join(PACKAGE_SPEC_PATH);
        if spec.is_file() {
            return Ok(spec);
        }
        return Err(RiskError::ModelNotFound { path: spec });
    }
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    Err(RiskError::ModelNotFound {
        path: path.to_path_buf(),
    })
}

pub fn decode_model(bytes: &[u8]) -> Result<proto::Model> {
    Ok(proto::Model::decode(bytes)?)
}

pub fn inspect(path: &Path) -> Result<ModelSummary> {
    let spec_path = resolve_spec_path(path)?;
    log::debug!("Decoding model spec {}", spec_path.display());
    let bytes = fs::read(&spec_path).map_err(|e| RiskError::io(&spec_path, e))?;
    let model = decode_model(&bytes)?;
    ModelSummary::from_model(&model)
}
