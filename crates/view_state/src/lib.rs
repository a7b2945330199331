//! Per-screen view state for the movie catalog.
//!
//! Every screen owns one controller. A controller turns user and lifecycle
//! triggers into [`PendingFetch`] tickets and folds the results back into a
//! [`ViewState`]. Tickets come from a per-screen [`RequestSequencer`]; a result
//! is applied only when its ticket is the latest one issued, so overlapping
//! requests resolve in issue order no matter when the network answers.
//!
//! [`ScreenDriver`] runs a controller against a backend: it takes the
//! controller lock only to issue and to resolve, never across the fetch
//! itself, and publishes snapshots over a `watch` channel.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_client::CatalogError;
use serde::Serialize;
use shared::domain::{MovieId, MovieSummary};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

pub mod detail;
pub mod events;
pub mod explore;
pub mod lists;
pub mod popular;
pub mod view;

pub use detail::{DetailController, DetailFetch, DetailScreen, DetailSnapshot};
pub use events::{ErrorCategory, ErrorContext, ScreenError};
pub use explore::{ExploreController, ExploreFetch, ExploreScreen, ExploreSnapshot, Query};
pub use lists::{BuiltinLists, ListSource, ListsController, ListsFetch, ListsScreen};
pub use popular::{PopularController, PopularFetch, PopularScreen};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState<T> {
    Idle,
    Loading,
    Success(T),
    Error(ScreenError),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ScreenError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket { seq: self.latest }
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// A [`ViewState`] paired with the sequencer that guards it.
#[derive(Debug)]
pub struct Loadable<T> {
    state: ViewState<T>,
    sequencer: RequestSequencer,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            state: ViewState::Idle,
            sequencer: RequestSequencer::default(),
        }
    }
}

impl<T> Loadable<T> {
    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn has_started(&self) -> bool {
        !matches!(self.state, ViewState::Idle)
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.state = ViewState::Loading;
        self.sequencer.issue()
    }

    /// Applies `result` if `ticket` is still the latest request. Returns
    /// whether the state changed.
    pub fn resolve(&mut self, ticket: RequestTicket, result: Result<T, ScreenError>) -> bool {
        if !self.sequencer.is_latest(ticket) {
            debug!(
                seq = ticket.seq,
                latest = self.sequencer.latest(),
                "screen: discarding stale response"
            );
            return false;
        }
        self.state = match result {
            Ok(data) => ViewState::Success(data),
            Err(err) => ViewState::Error(err),
        };
        true
    }

    /// The error currently shown, if the user may retry it.
    pub fn retryable_error(&self) -> Option<&ScreenError> {
        self.state.error().filter(|err| err.is_retryable())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch<R> {
    pub ticket: RequestTicket,
    pub request: R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "to", content = "movie_id", rename_all = "snake_case")]
pub enum Navigation {
    MovieDetail(MovieId),
}

impl Navigation {
    pub fn route(&self) -> String {
        match self {
            Self::MovieDetail(id) => format!("movies/{id}"),
        }
    }
}

pub(crate) fn select_movie(
    state: &ViewState<Vec<MovieSummary>>,
    movie_id: MovieId,
) -> Option<Navigation> {
    let movies = state.data()?;
    if !movies.iter().any(|movie| movie.id == movie_id) {
        return None;
    }
    info!(movie_id = movie_id.0, "screen: navigate to movie detail");
    Some(Navigation::MovieDetail(movie_id))
}

pub(crate) fn screen_error(context: ErrorContext, err: &CatalogError) -> ScreenError {
    warn!(context = ?context, kind = ?err.kind(), "screen: fetch failed: {err}");
    ScreenError::from_catalog(context, err)
}

/// A request a screen can run against its backend.
#[async_trait]
pub trait Fetch<B: ?Sized + Sync>: Send + Sync {
    type Output: Send;

    async fn fetch(&self, backend: &B) -> Result<Self::Output, CatalogError>;
}

pub trait ScreenMachine: Send {
    type Request: Send + Sync;
    type Output: Send;
    type Snapshot: Clone + Send + Sync;

    fn snapshot(&self) -> Self::Snapshot;

    fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<Self::Output, CatalogError>,
    ) -> bool;
}

pub struct ScreenDriver<M: ScreenMachine, B: ?Sized> {
    backend: Arc<B>,
    machine: Mutex<M>,
    snapshots: watch::Sender<M::Snapshot>,
}

impl<M, B> ScreenDriver<M, B>
where
    M: ScreenMachine,
    M::Request: Fetch<B, Output = M::Output>,
    B: ?Sized + Send + Sync,
{
    pub fn new(backend: Arc<B>, machine: M) -> Self {
        let (snapshots, _) = watch::channel(machine.snapshot());
        Self {
            backend,
            machine: Mutex::new(machine),
            snapshots,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<M::Snapshot> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> M::Snapshot {
        self.snapshots.borrow().clone()
    }

    pub async fn inspect<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        let machine = self.machine.lock().await;
        f(&machine)
    }

    /// Runs `trigger` on the controller and, if it issued a fetch, performs it
    /// and resolves the result. Returns whether a result was applied.
    pub async fn dispatch<F>(&self, trigger: F) -> bool
    where
        F: FnOnce(&mut M) -> Option<PendingFetch<M::Request>> + Send,
    {
        let pending = {
            let mut machine = self.machine.lock().await;
            let pending = trigger(&mut machine);
            self.snapshots.send_replace(machine.snapshot());
            pending
        };
        let Some(PendingFetch { ticket, request }) = pending else {
            return false;
        };

        let result = request.fetch(self.backend.as_ref()).await;

        let mut machine = self.machine.lock().await;
        let applied = machine.resolve(ticket, result);
        if applied {
            self.snapshots.send_replace(machine.snapshot());
        }
        applied
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
