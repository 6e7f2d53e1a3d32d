//! Submit screen: pick one PDF and upload it

use crate::api::{ResumeService, SelectedFile};
use crate::error::{PortalError, Result};
use crate::notify::Notifier;
use crate::screens::LoadingFlag;
use log::warn;
use std::path::Path;
use std::sync::Arc;

pub const NO_FILE_MESSAGE: &str = "Please select a file before uploading";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Resume submitted successfully!";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to submit resume";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "An error occurred while submitting the resume";

/// Extensions the file picker accepts; content is never inspected.
const ACCEPTED_EXTENSIONS: &[&str] = &["pdf"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx from the service, with the message that was shown
    Succeeded(String),
    /// Non-2xx from the service, with the message that was shown
    Rejected(String),
    /// Transport, file-read or parse failure
    Failed,
    /// Nothing selected; no request was made
    NoFile,
    /// Submit control disabled by an upload in flight
    Busy,
}

/// What the submit screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitView {
    pub file_name: Option<String>,
    pub uploading: bool,
    pub last_outcome: Option<SubmitOutcome>,
}

impl SubmitView {
    pub fn file_label(&self) -> &str {
        self.file_name.as_deref().unwrap_or("No file chosen")
    }

    pub fn control_enabled(&self) -> bool {
        !self.uploading
    }
}

pub struct SubmitScreen {
    service: Arc<dyn ResumeService>,
    notifier: Notifier,
    file: Option<SelectedFile>,
    loading: LoadingFlag,
    last_outcome: Option<SubmitOutcome>,
}

impl SubmitScreen {
    pub fn new(service: Arc<dyn ResumeService>, notifier: Notifier) -> Self {
        Self {
            service,
            notifier,
            file: None,
            loading: LoadingFlag::default(),
            last_outcome: None,
        }
    }

    /// Select the file to upload. A rejected pick keeps the previous selection.
    pub fn select_file(&mut self, path: &Path) -> Result<()> {
        if let Err(e) = check_extension(path) {
            self.notifier.error(e.to_string());
            return Err(e);
        }
        if !path.is_file() {
            let e = PortalError::InvalidInput(format!("File does not exist: {}", path.display()));
            self.notifier.error(e.to_string());
            return Err(e);
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        self.file = Some(SelectedFile {
            path: path.to_path_buf(),
            name,
        });
        Ok(())
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.upload_selected().await;
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    async fn upload_selected(&self) -> SubmitOutcome {
        let Some(file) = self.file.as_ref() else {
            self.notifier.error(NO_FILE_MESSAGE);
            return SubmitOutcome::NoFile;
        };

        let Some(_loading) = self.loading.try_begin() else {
            return SubmitOutcome::Busy;
        };

        match self.service.upload(file).await {
            Ok(reply) if reply.accepted => {
                let message = reply.message().unwrap_or(DEFAULT_SUCCESS_MESSAGE).to_string();
                self.notifier.success(message.clone());
                SubmitOutcome::Succeeded(message)
            }
            Ok(reply) => {
                warn!("Upload of {} rejected with HTTP {}", file.name, reply.status);
                let message = reply.message().unwrap_or(DEFAULT_FAILURE_MESSAGE).to_string();
                self.notifier.error(message.clone());
                SubmitOutcome::Rejected(message)
            }
            Err(e) => {
                warn!("Upload of {} failed: {}", file.name, e);
                self.notifier.error(TRANSPORT_FAILURE_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn view(&self) -> SubmitView {
        SubmitView {
            file_name: self.file.as_ref().map(|file| file.name.clone()),
            uploading: self.is_loading(),
            last_outcome: self.last_outcome.clone(),
        }
    }
}

fn check_extension(path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(PortalError::UnsupportedFormat(format!(
            "Unsupported file extension: .{}. Allowed: {}",
            ext,
            ACCEPTED_EXTENSIONS.join(", ")
        ))),
        None => Err(PortalError::UnsupportedFormat("File has no extension".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationCenter, NotificationLevel};
    use crate::screens::testing::FakeService;
    use std::io::Write;

    fn pdf_fixture(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.4\n%%EOF\n").unwrap();
        path
    }

    #[tokio::test]
    async fn test_submit_without_file_makes_no_request() {
        let service = Arc::new(FakeService::replying(200, Some("ok")));
        let (notifier, mut center) = NotificationCenter::channel();
        let mut screen = SubmitScreen::new(service.clone(), notifier);

        assert_eq!(screen.submit().await, SubmitOutcome::NoFile);
        assert_eq!(service.upload_count(), 0);

        let notices = center.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NotificationLevel::Error);
        assert_eq!(notices[0].message, NO_FILE_MESSAGE);
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_success_shows_server_message() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(FakeService::replying(201, Some("ok")));
        let (notifier, mut center) = NotificationCenter::channel();
        let mut screen = SubmitScreen::new(service.clone(), notifier);
        service.watch(screen.loading_flag());

        screen.select_file(&pdf_fixture(&dir, "alice.pdf")).unwrap();
        assert_eq!(screen.submit().await, SubmitOutcome::Succeeded("ok".to_string()));

        assert!(service.loading_during_call.load(std::sync::atomic::Ordering::SeqCst));
        assert!(!screen.is_loading());
        let notices = center.drain();
        assert_eq!(notices[0].level, NotificationLevel::Success);
        assert!(notices[0].message.contains("ok"));
    }

    #[tokio::test]
    async fn test_rejection_shows_server_message_or_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = pdf_fixture(&dir, "resume.PDF");

        let service = Arc::new(FakeService::replying(400, Some("bad file")));
        let (notifier, mut center) = NotificationCenter::channel();
        let mut screen = SubmitScreen::new(service, notifier);
        screen.select_file(&path).unwrap();
        assert_eq!(screen.submit().await, SubmitOutcome::Rejected("bad file".to_string()));
        assert_eq!(center.drain()[0].level, NotificationLevel::Error);
        assert!(!screen.is_loading());

        let service = Arc::new(FakeService::replying(500, None));
        let (notifier, _center) = NotificationCenter::channel();
        let mut screen = SubmitScreen::new(service, notifier);
        screen.select_file(&path).unwrap();
        assert_eq!(
            screen.submit().await,
            SubmitOutcome::Rejected(DEFAULT_FAILURE_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_success_without_message_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(FakeService::replying(200, Some("")));
        let (notifier, _center) = NotificationCenter::channel();
        let mut screen = SubmitScreen::new(service, notifier);
        screen.select_file(&pdf_fixture(&dir, "a.pdf")).unwrap();

        assert_eq!(
            screen.submit().await,
            SubmitOutcome::Succeeded(DEFAULT_SUCCESS_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic_and_resets_loading() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(
            FakeService::new().with_upload(|| Err(PortalError::Network("connection refused".to_string()))),
        );
        let (notifier, mut center) = NotificationCenter::channel();
        let mut screen = SubmitScreen::new(service, notifier);
        screen.select_file(&pdf_fixture(&dir, "a.pdf")).unwrap();

        assert_eq!(screen.submit().await, SubmitOutcome::Failed);
        assert!(!screen.is_loading());
        assert_eq!(screen.view().last_outcome, Some(SubmitOutcome::Failed));

        let notices = center.drain();
        assert_eq!(notices[0].message, TRANSPORT_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_submit_refused_while_loading() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(FakeService::replying(200, Some("ok")));
        let (notifier, _center) = NotificationCenter::channel();
        let mut screen = SubmitScreen::new(service.clone(), notifier);
        screen.select_file(&pdf_fixture(&dir, "a.pdf")).unwrap();

        let flag = screen.loading_flag();
        let _held = flag.try_begin().unwrap();
        assert!(!screen.view().control_enabled());
        assert_eq!(screen.submit().await, SubmitOutcome::Busy);
        assert_eq!(service.upload_count(), 0);
    }

    #[test]
    fn test_select_file_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(FakeService::new());
        let (notifier, mut center) = NotificationCenter::channel();
        let mut screen = SubmitScreen::new(service, notifier);

        let pdf = pdf_fixture(&dir, "keep.pdf");
        screen.select_file(&pdf).unwrap();

        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "hello").unwrap();
        assert!(matches!(screen.select_file(&txt), Err(PortalError::UnsupportedFormat(_))));
        assert!(screen.select_file(&dir.path().join("missing.pdf")).is_err());

        assert_eq!(screen.view().file_label(), "keep.pdf");
        assert_eq!(center.drain().len(), 2);
    }

    #[test]
    fn test_view_before_selection() {
        let (notifier, _center) = NotificationCenter::channel();
        let screen = SubmitScreen::new(Arc::new(FakeService::new()), notifier);
        let view = screen.view();
        assert_eq!(view.file_label(), "No file chosen");
        assert!(view.control_enabled());
        assert_eq!(view.last_outcome, None);
    }
}
