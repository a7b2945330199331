use std::sync::Arc;

use async_trait::async_trait;
use catalog_client::{CatalogApi, CatalogError};
use shared::domain::{MovieId, MovieSummary};

use crate::{
    screen_error, select_movie, ErrorContext, Fetch, Loadable, Navigation, PendingFetch,
    RequestTicket, ScreenDriver, ScreenMachine, ViewState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularFetch;

#[async_trait]
impl Fetch<dyn CatalogApi> for PopularFetch {
    type Output = Vec<MovieSummary>;

    async fn fetch(&self, api: &dyn CatalogApi) -> Result<Self::Output, CatalogError> {
        api.fetch_popular().await
    }
}

/// Home screen: the popular-movies carousel.
#[derive(Debug, Default)]
pub struct PopularController {
    movies: Loadable<Vec<MovieSummary>>,
}

impl PopularController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState<Vec<MovieSummary>> {
        self.movies.state()
    }

    pub fn mount(&mut self) -> Option<PendingFetch<PopularFetch>> {
        if self.movies.has_started() {
            return None;
        }
        Some(self.issue())
    }

    pub fn retry(&mut self) -> Option<PendingFetch<PopularFetch>> {
        self.movies.retryable_error()?;
        Some(self.issue())
    }

    pub fn select(&self, movie_id: MovieId) -> Option<Navigation> {
        select_movie(self.movies.state(), movie_id)
    }

    fn issue(&mut self) -> PendingFetch<PopularFetch> {
        PendingFetch {
            ticket: self.movies.begin(),
            request: PopularFetch,
        }
    }
}

impl ScreenMachine for PopularController {
    type Request = PopularFetch;
    type Output = Vec<MovieSummary>;
    type Snapshot = ViewState<Vec<MovieSummary>>;

    fn snapshot(&self) -> Self::Snapshot {
        self.movies.state().clone()
    }

    fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<MovieSummary>, CatalogError>,
    ) -> bool {
        let result = result.map_err(|err| screen_error(ErrorContext::PopularList, &err));
        self.movies.resolve(ticket, result)
    }
}

pub type PopularScreen = ScreenDriver<PopularController, dyn CatalogApi>;

impl ScreenDriver<PopularController, dyn CatalogApi> {
    pub fn popular(api: Arc<dyn CatalogApi>) -> Self {
        Self::new(api, PopularController::new())
    }

    pub async fn mount(&self) -> bool {
        self.dispatch(PopularController::mount).await
    }

    pub async fn retry(&self) -> bool {
        self.dispatch(PopularController::retry).await
    }

    pub async fn select(&self, movie_id: MovieId) -> Option<Navigation> {
        self.inspect(|controller| controller.select(movie_id)).await
    }
}
