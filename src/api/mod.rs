//! Remote resume service
//! Request/response types and the HTTP client behind the `ResumeService` seam

pub mod client;
pub mod types;

pub use client::{HttpResumeService, ResumeService};
pub use types::{SearchQuery, SearchResult, SelectedFile, UploadReply, UploadResponse, UPLOAD_FIELD};
