//! Wire types exchanged with the resume service

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Multipart field the service reads the uploaded resume from
pub const UPLOAD_FIELD: &str = "resume";

/// A PDF picked for upload. Only the path and display name are held; the
/// bytes are read when the upload is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
}

/// Body of `/submit` responses, success or failure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Status plus parsed body of an upload; interpretation is left to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReply {
    pub status: u16,
    pub accepted: bool,
    pub body: UploadResponse,
}

impl UploadReply {
    /// Server message, treating an empty string as absent
    pub fn message(&self) -> Option<&str> {
        self.body
            .message
            .as_deref()
            .filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub name: String,
    pub final_score: f64,
    #[serde(default)]
    pub common_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub pdf_file_id: Option<String>,
}

impl SearchResult {
    pub fn keywords(&self) -> &[String] {
        self.common_keywords.as_deref().unwrap_or(&[])
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords().is_empty()
    }
}
