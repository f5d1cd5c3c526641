//! Catalog browse/search controller
//!
//! Mediates between the remote catalog and the catalog view. Owns the raw result
//! list, the loading/error state and the active filter criteria, and keeps the
//! derived (filtered) view equal to `filter(raw list, criteria)` after every change
//! to either input.
//!
//! State machine: `Idle → Loading → {Ready, Failed}`. Only one request may be in
//! flight; calls made while `Loading` are ignored rather than queued. In-flight
//! requests cannot be cancelled: each runs on its own task and commits its result
//! even if the caller stops waiting for it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    models::{FilterCriteria, Movie},
    services::{catalog::CatalogClient, filter::filter},
};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load movies...";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search movies...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Why a request was rejected without touching state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoredReason {
    /// Query was empty after trimming
    EmptyQuery,
    /// Another request is still in flight
    InFlight,
}

/// Result of asking the controller to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Transition {
    /// The request ran to completion (success or failure)
    Applied,
    Ignored(IgnoredReason),
}

/// Read-only view of the controller handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct SearchSnapshot {
    pub phase: Phase,
    pub loading: bool,
    pub error: Option<String>,
    /// Current contents of the search input
    pub query: String,
    pub criteria: FilterCriteria,
    /// Derived view
    pub movies: Vec<Movie>,
    /// Size of the raw result list
    pub total: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
enum Fetch {
    Popular,
    Search(String),
}

impl Fetch {
    fn failure_message(&self) -> &'static str {
        match self {
            Fetch::Popular => LOAD_FAILED_MESSAGE,
            Fetch::Search(_) => SEARCH_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug)]
struct ControllerState {
    phase: Phase,
    movies: Vec<Movie>,
    view: Vec<Movie>,
    criteria: FilterCriteria,
    error: Option<String>,
    query: String,
    updated_at: Option<DateTime<Utc>>,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            movies: Vec::new(),
            view: Vec::new(),
            criteria: FilterCriteria::default(),
            error: None,
            query: String::new(),
            updated_at: None,
        }
    }

    fn rederive(&mut self) {
        self.view = filter(&self.movies, &self.criteria);
    }

    fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            phase: self.phase,
            loading: self.phase == Phase::Loading,
            error: self.error.clone(),
            query: self.query.clone(),
            criteria: self.criteria.clone(),
            movies: self.view.clone(),
            total: self.movies.len(),
            updated_at: self.updated_at,
        }
    }
}

pub struct SearchController {
    client: Arc<dyn CatalogClient>,
    state: Arc<RwLock<ControllerState>>,
}

impl SearchController {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(ControllerState::new())),
        }
    }

    /// Replaces the raw list with the catalog's popular titles
    pub async fn load_popular(&self) -> Transition {
        self.fetch(Fetch::Popular).await
    }

    /// Replaces the raw list with the results for `query`
    ///
    /// A blank query, or one made while another request is in flight, is ignored and
    /// leaves every field untouched, including the search input. Once the search
    /// succeeds the search input is cleared, unless it was edited to something else
    /// in the meantime.
    pub async fn search(&self, query: &str) -> Transition {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("Ignoring empty search query");
            return Transition::Ignored(IgnoredReason::EmptyQuery);
        }

        self.fetch(Fetch::Search(query.to_string())).await
    }

    /// Searches for whatever is currently in the search input
    pub async fn submit(&self) -> Transition {
        let query = self.state.read().await.query.clone();
        self.search(&query).await
    }

    async fn fetch(&self, fetch: Fetch) -> Transition {
        // The guard is released before awaiting the catalog so a concurrent caller
        // can observe `Loading` and back off.
        {
            let mut state = self.state.write().await;
            if state.phase == Phase::Loading {
                tracing::debug!(request = ?fetch, "Request already in flight, ignoring");
                return Transition::Ignored(IgnoredReason::InFlight);
            }
            state.phase = Phase::Loading;
            state.error = None;
        }

        let task = tokio::spawn(run_fetch(
            self.client.clone(),
            self.state.clone(),
            fetch.clone(),
        ));

        if let Err(e) = task.await {
            tracing::error!(request = ?fetch, error = %e, "Catalog request task aborted");
            let mut state = self.state.write().await;
            state.error = Some(fetch.failure_message().to_string());
            state.phase = Phase::Failed;
        }

        Transition::Applied
    }

    /// Replaces the active filter criteria and re-derives the view
    pub async fn set_criteria(&self, criteria: FilterCriteria) {
        let mut state = self.state.write().await;
        state.criteria = criteria.normalized();
        state.rederive();
    }

    pub async fn criteria(&self) -> FilterCriteria {
        self.state.read().await.criteria.clone()
    }

    /// Updates the search input without searching
    pub async fn set_query(&self, query: &str) {
        self.state.write().await.query = query.to_string();
    }

    pub async fn phase(&self) -> Phase {
        self.state.read().await.phase
    }

    /// The unfiltered result list
    pub async fn movies(&self) -> Vec<Movie> {
        self.state.read().await.movies.clone()
    }

    /// The filtered result list
    pub async fn view(&self) -> Vec<Movie> {
        self.state.read().await.view.clone()
    }

    pub async fn snapshot(&self) -> SearchSnapshot {
        self.state.read().await.snapshot()
    }
}

/// Performs one catalog request and commits its outcome
async fn run_fetch(
    client: Arc<dyn CatalogClient>,
    state: Arc<RwLock<ControllerState>>,
    fetch: Fetch,
) {
    let result = match &fetch {
        Fetch::Popular => client.get_popular().await,
        Fetch::Search(query) => client.search(query).await,
    };

    let mut state = state.write().await;
    match result {
        Ok(movies) => {
            tracing::info!(
                request = ?fetch,
                results = movies.len(),
                client = client.name(),
                "Result list replaced"
            );
            state.movies = movies;
            state.rederive();
            state.phase = Phase::Ready;
            state.updated_at = Some(Utc::now());
            if let Fetch::Search(query) = &fetch {
                if state.query.trim() == query.as_str() {
                    state.query.clear();
                }
            }
        }
        Err(e) => {
            tracing::warn!(request = ?fetch, error = %e, "Catalog request failed");
            state.error = Some(fetch.failure_message().to_string());
            state.phase = Phase::Failed;
        }
    }
}
