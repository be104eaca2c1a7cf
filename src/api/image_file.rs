//! Local image files picked for upload or inline preview.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

use super::ApiError;

/// Size limit applied to composer portraits before upload.
pub const MAX_PORTRAIT_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read image {:?}", path))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self { file_name, bytes })
    }

    /// MIME type sniffed from the content, falling back to the extension.
    pub fn mime_type(&self) -> String {
        if let Some(kind) = infer::get(&self.bytes) {
            return kind.mime_type().to_string();
        }
        let extension = Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        }
        .to_string()
    }

    pub fn is_image(&self) -> bool {
        self.mime_type().starts_with("image/")
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Inline `data:` URL used for local previews and create-mode albums.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }

    pub fn validate_for_upload(&self, max_bytes: usize) -> Result<(), ApiError> {
        if self.size() > max_bytes {
            return Err(ApiError::InvalidFile(format!(
                "Image must be {}MB or smaller",
                max_bytes / (1024 * 1024)
            )));
        }
        if !self.is_image() {
            return Err(ApiError::InvalidFile(
                "Only image files can be uploaded".to_string(),
            ));
        }
        Ok(())
    }
}
