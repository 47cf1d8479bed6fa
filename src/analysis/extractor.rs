//! Extraction seam
//!
//! Reading problem text off a photo is delegated to an external multimodal
//! model. Implementations of [`ProblemExtractor`] make that call and hand
//! back the model's raw reply; reshaping happens in this crate.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::AnalysisError;

/// A photographed worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Result<Self, AnalysisError> {
        if bytes.is_empty() {
            return Err(AnalysisError::MissingImage);
        }
        Ok(Self { bytes, mime_type: mime_type.into() })
    }

    /// Read an image from disk, guessing the MIME type from its extension.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let mime_type = mime_for_path(path);
        Ok(Self::new(bytes, mime_type)?)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Inline image part of a multimodal request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 (standard alphabet, padded)
    pub data: String,
}

/// Everything an extractor needs to ask the model for problems
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub model: String,
    pub prompt: String,
    pub image: ImageUpload,
    /// JSON schema the reply is expected to follow
    pub response_schema: Value,
}

impl ExtractionRequest {
    pub fn inline_data(&self) -> InlineData {
        InlineData {
            mime_type: self.image.mime_type().to_string(),
            data: STANDARD.encode(self.image.bytes()),
        }
    }
}

/// The image-understanding collaborator.
///
/// Returns the model's reply text verbatim. Called once per analysis; errors
/// are surfaced to the user without retrying.
#[async_trait]
pub trait ProblemExtractor: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String>;
}

/// Replays a previously recorded model reply from disk
pub struct ReplayExtractor {
    path: PathBuf,
}

impl ReplayExtractor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProblemExtractor for ReplayExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String> {
        debug!(
            model = %request.model,
            image_bytes = request.image.bytes().len(),
            reply = %self.path.display(),
            "replaying recorded reply"
        );
        fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read recorded reply {}", self.path.display()))
    }
}
