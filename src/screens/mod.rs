//! Routed screens and the state they share in shape but never in value

pub mod search;
pub mod submit;

use crate::api::ResumeService;
use crate::notify::Notifier;
use crate::router::Route;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use search::{ResultCard, SearchLayout, SearchOutcome, SearchScreen, SearchView};
pub use submit::{SubmitOutcome, SubmitScreen, SubmitView};

/// Loading flag of one screen. Clones observe the same flag while the
/// screen itself is suspended on a request.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag unless it is already raised.
    pub fn try_begin(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| LoadingGuard(self.clone()))
    }

    /// Raise the flag unconditionally.
    pub fn begin(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(self.clone())
    }
}

/// Lowers its flag when dropped, on every exit path.
#[must_use]
pub struct LoadingGuard(LoadingFlag);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::SeqCst);
    }
}

/// One-way boolean: false until set, then true forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch(bool);

impl Latch {
    /// Returns true only on the call that flipped it.
    pub fn set(&mut self) -> bool {
        let flipped = !self.0;
        self.0 = true;
        flipped
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

/// The single mounted screen. Replacing it discards all of its state.
pub enum Screen {
    Submit(SubmitScreen),
    Search(SearchScreen),
}

impl Screen {
    pub fn mount(route: Route, service: Arc<dyn ResumeService>, notifier: Notifier) -> Self {
        match route {
            Route::Submit => Screen::Submit(SubmitScreen::new(service, notifier)),
            Route::Search => Screen::Search(SearchScreen::new(service, notifier)),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Screen::Submit(_) => Route::Submit,
            Screen::Search(_) => Route::Search,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted `ResumeService` for screen tests

    use super::LoadingFlag;
    use crate::api::{ResumeService, SearchQuery, SearchResult, SelectedFile, UploadReply, UploadResponse};
    use crate::error::{PortalError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    type UploadScript = Box<dyn Fn() -> Result<UploadReply> + Send + Sync>;
    type SearchScript = Box<dyn Fn(&SearchQuery) -> Result<Vec<SearchResult>> + Send + Sync>;

    pub struct FakeService {
        upload: UploadScript,
        search: SearchScript,
        pub uploads: AtomicUsize,
        pub searches: AtomicUsize,
        pub queries: Mutex<Vec<String>>,
        watched: Mutex<Option<LoadingFlag>>,
        pub loading_during_call: AtomicBool,
    }

    impl FakeService {
        pub fn new() -> Self {
            Self {
                upload: Box::new(|| Err(PortalError::Network("upload not scripted".to_string()))),
                search: Box::new(|_| Err(PortalError::Network("search not scripted".to_string()))),
                uploads: AtomicUsize::new(0),
                searches: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
                watched: Mutex::new(None),
                loading_during_call: AtomicBool::new(false),
            }
        }

        pub fn replying(status: u16, message: Option<&str>) -> Self {
            let message = message.map(str::to_string);
            Self::new().with_upload(move || {
                Ok(UploadReply {
                    status,
                    accepted: (200..300).contains(&status),
                    body: UploadResponse {
                        message: message.clone(),
                    },
                })
            })
        }

        pub fn with_upload(mut self, script: impl Fn() -> Result<UploadReply> + Send + Sync + 'static) -> Self {
            self.upload = Box::new(script);
            self
        }

        pub fn with_search(
            mut self,
            script: impl Fn(&SearchQuery) -> Result<Vec<SearchResult>> + Send + Sync + 'static,
        ) -> Self {
            self.search = Box::new(script);
            self
        }

        /// Record whether `flag` is raised at the moment a call arrives.
        pub fn watch(&self, flag: LoadingFlag) {
            *self.watched.lock().unwrap() = Some(flag);
        }

        fn observe(&self) {
            if let Some(flag) = self.watched.lock().unwrap().as_ref() {
                self.loading_during_call.store(flag.is_set(), Ordering::SeqCst);
            }
        }

        pub fn upload_count(&self) -> usize {
            self.uploads.load(Ordering::SeqCst)
        }

        pub fn search_count(&self) -> usize {
            self.searches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResumeService for FakeService {
        async fn upload(&self, _file: &SelectedFile) -> Result<UploadReply> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            self.observe();
            (self.upload)()
        }

        async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.query.clone());
            self.observe();
            (self.search)(query)
        }

        fn resume_url(&self, pdf_file_id: &str) -> String {
            format!("http://resumes.test/resume/{}", pdf_file_id)
        }
    }

    pub fn result(name: &str, score: f64, keywords: Option<Vec<&str>>, id: Option<&str>) -> SearchResult {
        SearchResult {
            name: name.to_string(),
            final_score: score,
            common_keywords: keywords.map(|kws| kws.into_iter().map(str::to_string).collect()),
            pdf_file_id: id.map(str::to_string),
        }
    }
}
