use std::sync::Arc;

use async_trait::async_trait;
use catalog_client::{CatalogApi, CatalogError};
use serde::Serialize;
use shared::domain::{MovieId, MovieSummary};
use tracing::debug;

use crate::{
    screen_error, select_movie, ErrorContext, Fetch, Loadable, Navigation, PendingFetch,
    RequestTicket, ScreenDriver, ScreenMachine, ViewState,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    text: String,
    is_active: bool,
}

impl Query {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    fn set(&mut self, text: String) {
        self.is_active = !text.trim().is_empty();
        self.text = text;
    }

    fn clear(&mut self) {
        self.set(String::new());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreFetch {
    Popular,
    Search(String),
}

impl ExploreFetch {
    fn context(&self) -> ErrorContext {
        match self {
            Self::Popular => ErrorContext::PopularList,
            Self::Search(_) => ErrorContext::Search,
        }
    }
}

#[async_trait]
impl Fetch<dyn CatalogApi> for ExploreFetch {
    type Output = Vec<MovieSummary>;

    async fn fetch(&self, api: &dyn CatalogApi) -> Result<Self::Output, CatalogError> {
        match self {
            Self::Popular => api.fetch_popular().await,
            Self::Search(query) => api.search_movies(query).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExploreSnapshot {
    pub query: Query,
    pub refreshing: bool,
    pub results: ViewState<Vec<MovieSummary>>,
}

/// Explore screen: popular movies until the user types, search results after.
#[derive(Debug, Default)]
pub struct ExploreController {
    query: Query,
    refreshing: bool,
    results: Loadable<Vec<MovieSummary>>,
    last_request: Option<ExploreFetch>,
}

impl ExploreController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn state(&self) -> &ViewState<Vec<MovieSummary>> {
        self.results.state()
    }

    pub fn mount(&mut self) -> Option<PendingFetch<ExploreFetch>> {
        if self.results.has_started() {
            return None;
        }
        Some(self.issue(ExploreFetch::Popular))
    }

    /// The query text always reflects the latest keystroke. A blank query
    /// falls back to the popular list and never reaches the search endpoint.
    pub fn query_changed(&mut self, text: impl Into<String>) -> PendingFetch<ExploreFetch> {
        self.query.set(text.into());
        self.refreshing = false;
        let request = self.current_request();
        self.issue(request)
    }

    pub fn refresh(&mut self) -> PendingFetch<ExploreFetch> {
        self.query.clear();
        self.refreshing = true;
        self.issue(ExploreFetch::Popular)
    }

    pub fn retry(&mut self) -> Option<PendingFetch<ExploreFetch>> {
        self.results.retryable_error()?;
        let request = self.current_request();
        Some(self.issue(request))
    }

    pub fn select(&self, movie_id: MovieId) -> Option<Navigation> {
        select_movie(self.results.state(), movie_id)
    }

    fn current_request(&self) -> ExploreFetch {
        if self.query.is_active() {
            ExploreFetch::Search(self.query.text().to_string())
        } else {
            ExploreFetch::Popular
        }
    }

    fn issue(&mut self, request: ExploreFetch) -> PendingFetch<ExploreFetch> {
        let ticket = self.results.begin();
        debug!(seq = ticket.seq(), request = ?request, "screen: explore fetch issued");
        self.last_request = Some(request.clone());
        PendingFetch { ticket, request }
    }
}

impl ScreenMachine for ExploreController {
    type Request = ExploreFetch;
    type Output = Vec<MovieSummary>;
    type Snapshot = ExploreSnapshot;

    fn snapshot(&self) -> ExploreSnapshot {
        ExploreSnapshot {
            query: self.query.clone(),
            refreshing: self.refreshing,
            results: self.results.state().clone(),
        }
    }

    fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<MovieSummary>, CatalogError>,
    ) -> bool {
        let context = self
            .last_request
            .as_ref()
            .map_or(ErrorContext::PopularList, ExploreFetch::context);
        let result = result.map_err(|err| screen_error(context, &err));
        let applied = self.results.resolve(ticket, result);
        if applied {
            self.refreshing = false;
        }
        applied
    }
}

pub type ExploreScreen = ScreenDriver<ExploreController, dyn CatalogApi>;

impl ScreenDriver<ExploreController, dyn CatalogApi> {
    pub fn explore(api: Arc<dyn CatalogApi>) -> Self {
        Self::new(api, ExploreController::new())
    }

    pub async fn mount(&self) -> bool {
        self.dispatch(ExploreController::mount).await
    }

    pub async fn query_changed(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.dispatch(move |controller| Some(controller.query_changed(text)))
            .await
    }

    pub async fn refresh(&self) -> bool {
        self.dispatch(|controller| Some(controller.refresh())).await
    }

    pub async fn retry(&self) -> bool {
        self.dispatch(ExploreController::retry).await
    }

    pub async fn select(&self, movie_id: MovieId) -> Option<Navigation> {
        self.inspect(|controller| controller.select(movie_id)).await
    }
}

#[cfg(test)]
#[path = "tests/explore_tests.rs"]
mod tests;
