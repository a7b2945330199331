use super::*;
use crate::ErrorCategory;

fn movie(id: i64, title: &str) -> MovieSummary {
    MovieSummary {
        id: MovieId(id),
        title: title.to_string(),
        poster_path: None,
        release_date: None,
        vote_average: 7.0,
    }
}

fn server_error() -> CatalogError {
    CatalogError::Remote {
        status: 500,
        message: "Internal Server Error".into(),
    }
}

#[test]
fn mount_fires_once() {
    let mut controller = ExploreController::new();
    assert_eq!(controller.state(), &ViewState::Idle);

    let pending = controller.mount().expect("first mount issues a fetch");
    assert_eq!(pending.request, ExploreFetch::Popular);
    assert!(controller.state().is_loading());
    assert!(controller.mount().is_none(), "mount while loading must not refire");

    controller.resolve(pending.ticket, Ok(vec![movie(1, "Inception")]));
    assert!(controller.mount().is_none(), "mount after load must not refire");
}

#[test]
fn query_text_tracks_every_keystroke() {
    let mut controller = ExploreController::new();

    let pending = controller.query_changed("ma");
    assert_eq!(controller.query().text(), "ma");
    assert!(controller.query().is_active());
    assert_eq!(pending.request, ExploreFetch::Search("ma".into()));

    let pending = controller.query_changed(" mat ");
    assert_eq!(controller.query().text(), " mat ");
    assert_eq!(pending.request, ExploreFetch::Search(" mat ".into()));
}

#[test]
fn blank_query_falls_back_to_popular() {
    let mut controller = ExploreController::new();
    controller.query_changed("matrix");

    for blank in ["", "   ", "\t"] {
        let pending = controller.query_changed(blank);
        assert!(!controller.query().is_active());
        assert_eq!(pending.request, ExploreFetch::Popular);
    }
}

#[test]
fn stale_search_response_is_discarded() {
    let mut controller = ExploreController::new();
    let mat = controller.query_changed("mat");
    let matrix = controller.query_changed("matrix");

    assert!(controller.resolve(matrix.ticket, Ok(vec![movie(603, "The Matrix")])));
    assert!(!controller.resolve(mat.ticket, Ok(vec![movie(9, "Matilda")])));

    let movies = controller.state().data().expect("success");
    assert_eq!(movies, &vec![movie(603, "The Matrix")]);
}

#[test]
fn stale_failure_does_not_clobber_newer_success() {
    let mut controller = ExploreController::new();
    let first = controller.query_changed("a");
    let second = controller.query_changed("ab");

    assert!(controller.resolve(second.ticket, Ok(vec![movie(2, "Abyss")])));
    assert!(!controller.resolve(first.ticket, Err(server_error())));
    assert!(controller.state().data().is_some());
}

#[test]
fn refresh_clears_query_and_refreshing_flag() {
    let mut controller = ExploreController::new();
    controller.query_changed("alien");

    let pending = controller.refresh();
    assert_eq!(pending.request, ExploreFetch::Popular);
    assert_eq!(controller.query().text(), "");
    assert!(!controller.query().is_active());
    assert!(controller.is_refreshing());

    controller.resolve(pending.ticket, Err(server_error()));
    assert!(!controller.is_refreshing(), "failure must clear refreshing");

    let pending = controller.refresh();
    controller.resolve(pending.ticket, Ok(vec![movie(1, "Inception")]));
    assert!(!controller.is_refreshing(), "success must clear refreshing");
}

#[test]
fn typing_during_refresh_abandons_it() {
    let mut controller = ExploreController::new();
    let refresh = controller.refresh();
    let search = controller.query_changed("her");
    assert!(!controller.is_refreshing());

    assert!(!controller.resolve(refresh.ticket, Ok(vec![movie(1, "Inception")])));
    assert!(controller.resolve(search.ticket, Ok(vec![movie(152601, "Her")])));
}

#[test]
fn retry_reissues_the_failed_search() {
    let mut controller = ExploreController::new();
    let pending = controller.query_changed("dune");
    controller.resolve(pending.ticket, Err(server_error()));

    let error = controller.state().error().expect("error state");
    assert_eq!(error.category(), ErrorCategory::Remote);
    assert_eq!(error.message(), "Failed to search movies. Please try again.");

    let retry = controller.retry().expect("retry from error");
    assert_eq!(retry.request, ExploreFetch::Search("dune".into()));
    assert!(controller.state().is_loading());
}

#[test]
fn retry_reissues_popular_without_query() {
    let mut controller = ExploreController::new();
    let pending = controller.mount().expect("mount");
    controller.resolve(pending.ticket, Err(CatalogError::Network("connection reset".into())));
    assert_eq!(
        controller.state().error().map(|e| e.message()),
        Some("Failed to load popular movies. Please try again.")
    );

    let retry = controller.retry().expect("retry from error");
    assert_eq!(retry.request, ExploreFetch::Popular);
}

#[test]
fn retry_only_from_retryable_error() {
    let mut controller = ExploreController::new();
    assert!(controller.retry().is_none(), "idle");

    let pending = controller.mount().expect("mount");
    assert!(controller.retry().is_none(), "loading");

    controller.resolve(pending.ticket, Err(CatalogError::Config("missing API key".into())));
    assert!(controller.state().error().is_some_and(|e| e.is_blocking()));
    assert!(controller.retry().is_none(), "config errors are final");
}

#[test]
fn selection_requires_success_and_known_id() {
    let mut controller = ExploreController::new();
    let pending = controller.mount().expect("mount");
    assert_eq!(controller.select(MovieId(1)), None, "loading");

    controller.resolve(pending.ticket, Ok(vec![movie(1, "Inception")]));
    assert_eq!(
        controller.select(MovieId(1)),
        Some(Navigation::MovieDetail(MovieId(1)))
    );
    assert_eq!(controller.select(MovieId(2)), None, "not displayed");

    let pending = controller.query_changed("x");
    controller.resolve(pending.ticket, Err(server_error()));
    assert_eq!(controller.select(MovieId(1)), None, "error");
}

#[test]
fn snapshot_reflects_query_and_state() {
    let mut controller = ExploreController::new();
    controller.query_changed("up");
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.query.text(), "up");
    assert!(snapshot.results.is_loading());
    assert!(!snapshot.refreshing);
}

#[test]
fn error_message_follows_the_last_issued_request() {
    let mut controller = ExploreController::new();
    let search = controller.query_changed("dune");
    controller.resolve(search.ticket, Ok(vec![movie(438631, "Dune")]));

    let popular = controller.query_changed("");
    assert!(!controller.resolve(search.ticket, Err(server_error())));
    controller.resolve(popular.ticket, Err(server_error()));
    assert_eq!(
        controller.state().error().map(|e| e.message()),
        Some("Failed to load popular movies. Please try again.")
    );

    let search = controller.query_changed("dune");
    controller.resolve(search.ticket, Err(server_error()));
    assert_eq!(
        controller.state().error().map(|e| e.message()),
        Some("Failed to search movies. Please try again.")
    );
}
