//! Common types used across the client

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// An image picked on the device that has not been uploaded yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalImage {
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: String,
}

impl LocalImage {
    /// Build a local image reference, guessing the content type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let content_type = match extension.as_str() {
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "heic" => "image/heic",
            _ => "image/jpeg",
        };

        Self {
            path: path.to_path_buf(),
            file_name,
            content_type: content_type.to_string(),
        }
    }
}

/// Where a displayed image currently comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    /// Persisted on the backend
    Remote(String),
    /// Selected locally, waiting for the profile to exist
    Pending(LocalImage),
}

impl MediaRef {
    pub fn remote_url(&self) -> Option<&str> {
        match self {
            MediaRef::Remote(url) => Some(url),
            MediaRef::Pending(_) => None,
        }
    }

    pub fn pending(&self) -> Option<&LocalImage> {
        match self {
            MediaRef::Pending(image) => Some(image),
            MediaRef::Remote(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MediaRef::Pending(_))
    }
}

/// The two image slots of a business profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSlot {
    Logo,
    Cover,
}

impl MediaSlot {
    /// Path segment of the upload endpoint
    pub fn path(&self) -> &'static str {
        match self {
            MediaSlot::Logo => "logo",
            MediaSlot::Cover => "cover",
        }
    }

    /// Key of the returned URL in the upload response
    pub fn url_field(&self) -> &'static str {
        match self {
            MediaSlot::Logo => "logo_url",
            MediaSlot::Cover => "cover_url",
        }
    }
}

impl std::fmt::Display for MediaSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// List response; the backend returns either a bare array or an envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped {
        items: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Bare(items) => items,
            ListResponse::Wrapped { items, .. } => items,
        }
    }
}
