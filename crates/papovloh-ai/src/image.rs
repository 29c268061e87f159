//! Generated images travel as data URIs. This module builds them, takes
//! them apart again, and writes the decoded bytes to disk for downloads.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("not a base64 data URI")]
    NotDataUri,
    #[error("invalid image payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("failed to write image to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Base64-encoded image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub base64: String,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, base64: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64: base64.into(),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    /// Parse `data:<mime>;base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self, ImageError> {
        let rest = uri.strip_prefix("data:").ok_or(ImageError::NotDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageError::NotDataUri)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(ImageError::NotDataUri)?;
        if mime_type.is_empty() {
            return Err(ImageError::NotDataUri);
        }
        Ok(Self::new(mime_type, payload))
    }

    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        Ok(STANDARD.decode(self.base64.as_bytes())?)
    }

    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "jpg",
        }
    }

    /// `papovloh-art-<unix millis>.<ext>`
    pub fn default_file_name(&self) -> String {
        format!(
            "papovloh-art-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            self.file_extension()
        )
    }

    /// Decode and write the image. A directory target gets the default
    /// file name appended. Returns the path written.
    pub fn save(&self, target: &Path) -> Result<PathBuf, ImageError> {
        let path = if target.is_dir() {
            target.join(self.default_file_name())
        } else {
            target.to_path_buf()
        };
        let bytes = self.decode()?;
        std::fs::write(&path, &bytes).map_err(|source| ImageError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "saved image");
        Ok(path)
    }
}
