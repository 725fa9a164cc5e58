// SPDX-License-Identifier: Apache-2.0

use crate::{sha256_hex, ArtifactError, ModelArtifact};
use mindscan_model::ExpectedColumns;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const EXPECTED_COLUMNS_FILE: &str = "expected_columns.json";

/// Provenance of one loaded artifact file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactDigest {
    pub file: String,
    pub sha256: String,
    pub bytes: u64,
}

fn read_artifact(path: &Path) -> Result<(Vec<u8>, ArtifactDigest), ArtifactError> {
    let bytes = fs::read(path).map_err(|e| ArtifactError::new(path, format!("read failed: {e}")))?;
    let digest = ArtifactDigest {
        file: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        sha256: sha256_hex(&bytes),
        bytes: bytes.len() as u64,
    };
    Ok((bytes, digest))
}

pub fn load_model_artifact(path: &Path) -> Result<(ModelArtifact, ArtifactDigest), ArtifactError> {
    let (bytes, digest) = read_artifact(path)?;
    let artifact: ModelArtifact = serde_json::from_slice(&bytes)
        .map_err(|e| ArtifactError::new(path, format!("invalid model artifact: {e}")))?;
    artifact
        .validate()
        .map_err(|e| ArtifactError::new(path, format!("invalid model artifact: {e}")))?;
    info!(file = %digest.file, sha256 = %digest.sha256, "model artifact loaded");
    Ok((artifact, digest))
}

pub fn load_expected_columns(path: &Path) -> Result<(ExpectedColumns, ArtifactDigest), ArtifactError> {
    let (bytes, digest) = read_artifact(path)?;
    let names: Vec<String> = serde_json::from_slice(&bytes)
        .map_err(|e| ArtifactError::new(path, format!("invalid column list: {e}")))?;
    let columns = ExpectedColumns::parse(names).map_err(|e| ArtifactError::new(path, e.0))?;
    info!(file = %digest.file, columns = columns.len(), "expected columns loaded");
    Ok((columns, digest))
}

pub(crate) fn artifact_path(dir: &Path, file: &str) -> PathBuf {
    dir.join(file)
}
