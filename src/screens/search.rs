//! Search screen: free-text query against submitted resumes

use crate::api::{ResumeService, SearchQuery, SearchResult};
use crate::error::{PortalError, Result};
use crate::notify::Notifier;
use crate::screens::{Latch, LoadingFlag};
use log::{info, warn};
use std::sync::Arc;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";
pub const SEARCH_FAILURE_MESSAGE: &str = "An error occurred while searching resumes";
pub const NO_KEYWORDS_LABEL: &str = "No matching keywords";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLayout {
    /// Search box alone, before any search has completed
    Centered,
    /// Results render below the search box
    Docked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced with this many entries
    Rendered(usize),
    /// Blank query; no request was made
    EmptyQuery,
    /// Transport or parse failure; previous results kept
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    /// Stable identity across searches: the resume id, else name + score
    pub key: String,
    pub name: String,
    pub score: String,
    pub keywords: Vec<String>,
    pub download_url: Option<String>,
    /// HSL lightness of the card background, darker further down the list
    pub lightness: u8,
}

impl ResultCard {
    fn from_result(index: usize, result: &SearchResult, service: &dyn ResumeService) -> Self {
        let key = match &result.pdf_file_id {
            Some(id) => id.clone(),
            None => format!("{}{}", result.name, result.final_score),
        };

        Self {
            key,
            name: result.name.clone(),
            score: format_score(result.final_score),
            keywords: result.keywords().to_vec(),
            download_url: result.pdf_file_id.as_deref().map(|id| service.resume_url(id)),
            lightness: 27usize.saturating_sub(index.saturating_mul(3)) as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub layout: SearchLayout,
    pub query: String,
    pub searching: bool,
    /// Present once docked
    pub banner: Option<String>,
    pub cards: Vec<ResultCard>,
}

pub struct SearchScreen {
    service: Arc<dyn ResumeService>,
    notifier: Notifier,
    query: String,
    results: Vec<SearchResult>,
    loading: LoadingFlag,
    first_search_done: Latch,
}

impl SearchScreen {
    pub fn new(service: Arc<dyn ResumeService>, notifier: Notifier) -> Self {
        Self {
            service,
            notifier,
            query: String::new(),
            results: Vec::new(),
            loading: LoadingFlag::default(),
            first_search_done: Latch::default(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Run the current query. The query is sent as typed; trimming is only
    /// used to reject blank input.
    pub async fn search(&mut self) -> SearchOutcome {
        if self.query.trim().is_empty() {
            self.notifier.alert(EMPTY_QUERY_MESSAGE);
            return SearchOutcome::EmptyQuery;
        }

        let request = SearchQuery {
            query: self.query.clone(),
        };

        let response = {
            let _loading = self.loading.begin();
            self.service.search(&request).await
        };

        match response {
            Ok(results) => {
                let count = results.len();
                self.results = results;
                if self.first_search_done.set() {
                    info!("First search completed");
                }
                SearchOutcome::Rendered(count)
            }
            Err(e) => {
                warn!("Search for {:?} failed: {}", request.query, e);
                self.notifier.error(SEARCH_FAILURE_MESSAGE);
                SearchOutcome::Failed
            }
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn has_searched(&self) -> bool {
        self.first_search_done.is_set()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn cards(&self) -> Vec<ResultCard> {
        self.results
            .iter()
            .enumerate()
            .map(|(index, result)| ResultCard::from_result(index, result, self.service.as_ref()))
            .collect()
    }

    /// Download link of the n-th card, counting from 1
    pub fn download_url(&self, position: usize) -> Result<String> {
        let result = position
            .checked_sub(1)
            .and_then(|index| self.results.get(index))
            .ok_or_else(|| PortalError::InvalidInput(format!("No result number {}", position)))?;

        result
            .pdf_file_id
            .as_deref()
            .map(|id| self.service.resume_url(id))
            .ok_or_else(|| PortalError::InvalidInput(format!("{} has no downloadable resume", result.name)))
    }

    pub fn view(&self) -> SearchView {
        let layout = if self.has_searched() {
            SearchLayout::Docked
        } else {
            SearchLayout::Centered
        };

        let cards = self.cards();
        let banner = match layout {
            SearchLayout::Docked => Some(banner_label(&self.results, cards.len())),
            SearchLayout::Centered => None,
        };

        SearchView {
            layout,
            query: self.query.clone(),
            searching: self.is_loading(),
            banner,
            cards,
        }
    }
}

/// Banner above the result cards
pub fn banner_label(results: &[SearchResult], rendered: usize) -> String {
    if results.iter().all(|result| !result.has_keywords()) {
        NO_KEYWORDS_LABEL.to_string()
    } else {
        format!("First {} results", rendered)
    }
}

/// Two decimals, with exact ties rounded away from zero.
pub fn format_score(score: f64) -> String {
    // A double sits exactly halfway between two hundredths only when it is an
    // odd multiple of 1/8; `{:.2}` would round those to even.
    let eighths = score * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return format!("{:.2}", (score * 100.0).round() / 100.0);
    }
    format!("{:.2}", score)
}
