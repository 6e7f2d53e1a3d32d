//! HTTP client for the resume service

use crate::api::types::{SearchQuery, SearchResult, SelectedFile, UploadReply, UploadResponse, UPLOAD_FIELD};
use crate::error::{PortalError, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};

/// Operations the screens need from the remote service.
///
/// Screens only hold an `Arc<dyn ResumeService>`, so tests swap in fakes and
/// the endpoint layout lives in exactly one place.
#[async_trait]
pub trait ResumeService: Send + Sync {
    /// POST the file as multipart form data under the `resume` field.
    ///
    /// Any HTTP status is returned as an [`UploadReply`]; only transport,
    /// file-read and body-parse failures are errors.
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReply>;

    /// POST `{ query }` and parse the JSON array of results in server order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>>;

    /// Download link for a stored resume. Never fetched by the client.
    fn resume_url(&self, pdf_file_id: &str) -> String;
}

pub struct HttpResumeService {
    base_url: String,
    http: Client,
}

impl HttpResumeService {
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| PortalError::Configuration(format!("Invalid base URL '{}': {}", base_url, e)))?;

        let mut base_url = base_url.to_string();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            base_url,
            http: Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ResumeService for HttpResumeService {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReply> {
        let bytes = tokio::fs::read(&file.path).await?;
        info!("Uploading {} ({} bytes)", file.name, bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.endpoint("/submit"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        debug!("Upload answered with HTTP {}", status);

        let bytes = response.bytes().await?;
        let body: UploadResponse = serde_json::from_slice(&bytes)?;

        Ok(UploadReply {
            status: status.as_u16(),
            accepted: status.is_success(),
            body,
        })
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        info!("Searching resumes for {:?}", query.query);

        let response = self
            .http
            .post(self.endpoint("/search"))
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Search answered with HTTP {}", status);
            return Err(PortalError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let results: Vec<SearchResult> = serde_json::from_slice(&bytes)?;
        debug!("Search returned {} results", results.len());
        Ok(results)
    }

    fn resume_url(&self, pdf_file_id: &str) -> String {
        format!(
            "{}/resume/{}",
            self.base_url,
            urlencoding::encode(pdf_file_id)
        )
    }
}
