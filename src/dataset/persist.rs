use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{Result, RiskError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupRecord {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

impl BackupRecord {
    pub fn size(&self) -> ByteSize {
        ByteSize::b(self.bytes)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Writes `original` to `path` and reads it back; the digests must agree
/// before the caller is allowed to touch the source file.
pub fn write_backup(original: &[u8], path: &Path) -> Result<BackupRecord> {
    fs::write(path, original).map_err(|e| RiskError::io(path, e))?;

    let written = fs::read(path).map_err(|e| RiskError::io(path, e))?;
    let expected = sha256_hex(original);
    if sha256_hex(&written) != expected {
        return Err(RiskError::BackupMismatch {
            path: path.to_path_buf(),
        });
    }

    Ok(BackupRecord {
        path: path.to_path_buf(),
        bytes: original.len() as u64,
        sha256: expected,
    })
}

/// Replaces `path` through a temp file in the same directory, so readers
/// never observe a half-written dataset.
pub fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| RiskError::io(dir, e))?;
    staged
        .write_all(contents)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| RiskError::io(staged.path(), e))?;
    staged
        .persist(path)
        .map_err(|e| RiskError::io(path, e.error))?;
    Ok(())
}
