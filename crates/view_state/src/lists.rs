use std::sync::Arc;

use async_trait::async_trait;
use catalog_client::CatalogError;
use shared::domain::{ListEntry, MovieId, MovieList};
use tracing::info;

use crate::{
    screen_error, ErrorContext, Fetch, Loadable, Navigation, PendingFetch, RequestTicket,
    ScreenDriver, ScreenMachine, ViewState,
};

/// Where the "My Lists" screen gets its lists from.
#[async_trait]
pub trait ListSource: Send + Sync {
    async fn user_lists(&self) -> Result<Vec<MovieList>, CatalogError>;
}

/// Curated lists bundled with the app.
pub struct BuiltinLists;

fn entry(id: i64, title: &str, poster_path: &str) -> ListEntry {
    ListEntry {
        id: MovieId(id),
        title: title.to_string(),
        poster_path: Some(poster_path.to_string()),
    }
}

impl BuiltinLists {
    pub fn lists() -> Vec<MovieList> {
        vec![
            MovieList {
                id: "1".into(),
                name: "My Top 10 Sci-Fi Picks".into(),
                description: "My favorite science fiction films of all time.".into(),
                movies: vec![
                    entry(27205, "Inception", "/oYuisf5TqS4hR3t5WJK0P1C5fN.jpg"),
                    entry(157336, "Interstellar", "/gEU2QniE6E77NI6Szz4pIWcpmRw.jpg"),
                    entry(624860, "The Matrix", "/f89U3ADr1rbDPmWyssExT429WE5.jpg"),
                    entry(82064, "Blade Runner 2049", "/gajva2L0rPYkEWjEScFXcCAQj5L.jpg"),
                ],
            },
            MovieList {
                id: "2".into(),
                name: "Action Packed Adventures".into(),
                description: "Explosions, car chases, and non-stop thrills.".into(),
                movies: vec![
                    entry(19995, "Avatar", "/kyeqWdyUXW608qlYkPMhymWtdDs.jpg"),
                    entry(284053, "Thor: Ragnarok", "/rzRwTcFdUSyRwAigwzG35rnAUMj.jpg"),
                    entry(385128, "Furious 7", "/d9Tqf18kQ1cQ9P1Q4lP6p0W5f2G.jpg"),
                ],
            },
            MovieList {
                id: "3".into(),
                name: "Classic Horror".into(),
                description: "Spooky films that defined the genre.".into(),
                movies: vec![
                    entry(185, "Alien", "/vYfUCgB3e5cQOq029E6M1VpQ7eW.jpg"),
                    entry(601, "The Shining", "/xD9UrK6mY718qC1od9s5fLwI4wB.jpg"),
                ],
            },
        ]
    }
}

#[async_trait]
impl ListSource for BuiltinLists {
    async fn user_lists(&self) -> Result<Vec<MovieList>, CatalogError> {
        Ok(Self::lists())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListsFetch;

#[async_trait]
impl Fetch<dyn ListSource> for ListsFetch {
    type Output = Vec<MovieList>;

    async fn fetch(&self, source: &dyn ListSource) -> Result<Self::Output, CatalogError> {
        source.user_lists().await
    }
}

#[derive(Debug, Default)]
pub struct ListsController {
    lists: Loadable<Vec<MovieList>>,
}

impl ListsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState<Vec<MovieList>> {
        self.lists.state()
    }

    pub fn mount(&mut self) -> Option<PendingFetch<ListsFetch>> {
        if self.lists.has_started() {
            return None;
        }
        Some(self.issue())
    }

    pub fn retry(&mut self) -> Option<PendingFetch<ListsFetch>> {
        self.lists.retryable_error()?;
        Some(self.issue())
    }

    pub fn select(&self, movie_id: MovieId) -> Option<Navigation> {
        let lists = self.lists.state().data()?;
        if !lists.iter().any(|list| list.contains(movie_id)) {
            return None;
        }
        info!(movie_id = movie_id.0, "screen: navigate to movie detail");
        Some(Navigation::MovieDetail(movie_id))
    }

    fn issue(&mut self) -> PendingFetch<ListsFetch> {
        PendingFetch {
            ticket: self.lists.begin(),
            request: ListsFetch,
        }
    }
}

impl ScreenMachine for ListsController {
    type Request = ListsFetch;
    type Output = Vec<MovieList>;
    type Snapshot = ViewState<Vec<MovieList>>;

    fn snapshot(&self) -> Self::Snapshot {
        self.lists.state().clone()
    }

    fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<MovieList>, CatalogError>,
    ) -> bool {
        let result = result.map_err(|err| screen_error(ErrorContext::Lists, &err));
        self.lists.resolve(ticket, result)
    }
}

pub type ListsScreen = ScreenDriver<ListsController, dyn ListSource>;

impl ScreenDriver<ListsController, dyn ListSource> {
    pub fn lists(source: Arc<dyn ListSource>) -> Self {
        Self::new(source, ListsController::new())
    }

    pub async fn mount(&self) -> bool {
        self.dispatch(ListsController::mount).await
    }

    pub async fn retry(&self) -> bool {
        self.dispatch(ListsController::retry).await
    }

    pub async fn select(&self, movie_id: MovieId) -> Option<Navigation> {
        self.inspect(|controller| controller.select(movie_id)).await
    }
}
