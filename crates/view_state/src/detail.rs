use std::sync::Arc;

use async_trait::async_trait;
use catalog_client::{CatalogApi, CatalogError};
use serde::Serialize;
use shared::domain::{MovieDetail, MovieId};
use tracing::warn;

use crate::{
    screen_error, ErrorContext, Fetch, Loadable, PendingFetch, RequestTicket, ScreenDriver,
    ScreenMachine, ViewState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailFetch(pub MovieId);

#[async_trait]
impl Fetch<dyn CatalogApi> for DetailFetch {
    type Output = MovieDetail;

    async fn fetch(&self, api: &dyn CatalogApi) -> Result<Self::Output, CatalogError> {
        api.get_movie_details(self.0).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailSnapshot {
    pub movie_id: MovieId,
    pub detail: ViewState<MovieDetail>,
}

/// Detail screen for a single movie, created when the screen is navigated to.
#[derive(Debug)]
pub struct DetailController {
    movie_id: MovieId,
    detail: Loadable<MovieDetail>,
}

impl DetailController {
    pub fn new(movie_id: MovieId) -> Self {
        Self {
            movie_id,
            detail: Loadable::default(),
        }
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn state(&self) -> &ViewState<MovieDetail> {
        self.detail.state()
    }

    pub fn is_not_found(&self) -> bool {
        self.detail
            .state()
            .error()
            .is_some_and(|err| err.is_not_found())
    }

    pub fn mount(&mut self) -> Option<PendingFetch<DetailFetch>> {
        if self.detail.has_started() {
            return None;
        }
        Some(self.issue())
    }

    /// Not-found and configuration errors are final; retry ignores them.
    pub fn retry(&mut self) -> Option<PendingFetch<DetailFetch>> {
        self.detail.retryable_error()?;
        Some(self.issue())
    }

    fn issue(&mut self) -> PendingFetch<DetailFetch> {
        PendingFetch {
            ticket: self.detail.begin(),
            request: DetailFetch(self.movie_id),
        }
    }
}

impl ScreenMachine for DetailController {
    type Request = DetailFetch;
    type Output = MovieDetail;
    type Snapshot = DetailSnapshot;

    fn snapshot(&self) -> DetailSnapshot {
        DetailSnapshot {
            movie_id: self.movie_id,
            detail: self.detail.state().clone(),
        }
    }

    fn resolve(&mut self, ticket: RequestTicket, result: Result<MovieDetail, CatalogError>) -> bool {
        if let Ok(detail) = &result {
            if detail.id != self.movie_id {
                warn!(
                    requested = self.movie_id.0,
                    received = detail.id.0,
                    "screen: detail response for a different movie"
                );
            }
        }
        let result = result.map_err(|err| screen_error(ErrorContext::MovieDetail, &err));
        self.detail.resolve(ticket, result)
    }
}

pub type DetailScreen = ScreenDriver<DetailController, dyn CatalogApi>;

impl ScreenDriver<DetailController, dyn CatalogApi> {
    pub fn detail(api: Arc<dyn CatalogApi>, movie_id: MovieId) -> Self {
        Self::new(api, DetailController::new(movie_id))
    }

    pub async fn mount(&self) -> bool {
        self.dispatch(DetailController::mount).await
    }

    pub async fn retry(&self) -> bool {
        self.dispatch(DetailController::retry).await
    }
}
