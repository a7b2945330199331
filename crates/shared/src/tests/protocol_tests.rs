use super::*;
use crate::domain::RelatedKind;

#[test]
fn movie_list_decodes_results_and_degrades_missing_fields() {
    let body = br#"{
        "page": 1,
        "results": [
            {"id": 27205, "title": "Inception", "poster_path": "/inception.jpg",
             "release_date": "2010-07-16", "vote_average": 8.4},
            {"id": 603, "title": null, "poster_path": "", "release_date": ""}
        ]
    }"#;

    let movies = decode_movie_list(body).expect("decode");
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id, MovieId(27205));
    assert_eq!(movies[0].release_date.as_deref(), Some("2010-07-16"));
    assert_eq!(movies[1].title, "");
    assert_eq!(movies[1].poster_path, None);
    assert_eq!(movies[1].release_date, None);
    assert_eq!(movies[1].vote_average, 0.0);
}

#[test]
fn movie_list_without_results_is_empty() {
    let movies = decode_movie_list(br#"{"page": 1}"#).expect("decode");
    assert!(movies.is_empty());
}

#[test]
fn movie_list_entry_without_id_is_rejected() {
    let err = decode_movie_list(br#"{"results": [{"title": "Nameless"}]}"#)
        .expect_err("missing id must fail");
    assert_eq!(err.payload, PayloadKind::MovieList);
    assert!(err.message.contains("id"), "unexpected message: {}", err.message);
}

#[test]
fn malformed_json_is_a_decode_error() {
    let err = decode_movie_list(b"<html>bad gateway</html>").expect_err("must fail");
    assert_eq!(err.payload, PayloadKind::MovieList);

    let err = decode_movie_list(br#"{"results": "nope"}"#).expect_err("must fail");
    assert_eq!(err.payload, PayloadKind::MovieList);
}

#[test]
fn movie_detail_decodes_nested_collections() {
    let body = br#"{
        "id": 27205,
        "title": "Inception",
        "tagline": "Your mind is the scene of the crime.",
        "overview": "A thief who steals corporate secrets...",
        "runtime": 148,
        "budget": 160000000,
        "vote_average": 8.369,
        "release_date": "2010-07-15",
        "homepage": "",
        "backdrop_path": "/backdrop.jpg",
        "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
        "production_companies": [
            {"id": 923, "name": "Legendary Pictures", "logo_path": "/legendary.png"},
            {"id": 9996, "name": "Syncopy", "logo_path": null}
        ],
        "spoken_languages": [{"english_name": "English"}, {"english_name": ""}]
    }"#;

    let detail = decode_movie_detail(body).expect("decode");
    assert_eq!(detail.id, MovieId(27205));
    assert_eq!(detail.runtime_minutes, Some(148));
    assert_eq!(detail.budget, Some(160_000_000));
    assert_eq!(detail.homepage, None);
    assert_eq!(
        detail.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
        vec!["Action", "Science Fiction"]
    );
    assert_eq!(detail.production_companies[1].logo_path, None);
    assert_eq!(detail.spoken_languages.len(), 1);
    assert_eq!(detail.summary().id, detail.id);
}

#[test]
fn movie_detail_requires_id() {
    let err = decode_movie_detail(br#"{"title": "Ghost"}"#).expect_err("must fail");
    assert_eq!(err.payload, PayloadKind::MovieDetail);
}

#[test]
fn credits_videos_and_reviews_decode() {
    let credits = decode_credits(
        br#"{"id": 550, "cast": [{"id": 819, "name": "Edward Norton", "character": "Narrator", "order": 0}],
             "crew": [{"id": 7467, "name": "David Fincher", "job": "Director", "department": "Directing"}]}"#,
    )
    .expect("credits");
    assert_eq!(credits.cast[0].character, "Narrator");
    assert_eq!(credits.crew[0].job, "Director");

    let videos = decode_videos(
        br#"{"id": 550, "results": [{"id": "5c9294240e0a267cd516835f", "key": "BdJKm16Co6M",
             "name": "Trailer", "site": "YouTube", "type": "Trailer"}]}"#,
    )
    .expect("videos");
    assert_eq!(videos[0].kind, "Trailer");

    let reviews = decode_reviews(
        br#"{"id": 550, "page": 2, "total_pages": 3, "total_results": 41,
             "results": [{"id": "abc", "author": "Goddard", "content": "Pretty awesome movie."}]}"#,
    )
    .expect("reviews");
    assert_eq!(reviews.page, 2);
    assert_eq!(reviews.total_pages, 3);
    assert_eq!(reviews.results[0].url, None);
}

#[test]
fn video_without_key_is_rejected() {
    let err = decode_videos(br#"{"results": [{"id": "x", "name": "Teaser"}]}"#)
        .expect_err("must fail");
    assert_eq!(err.payload, PayloadKind::Videos);
}

#[test]
fn related_kind_parses_and_knows_pagination() {
    assert_eq!("Reviews".parse::<RelatedKind>(), Ok(RelatedKind::Reviews));
    assert!("trailers".parse::<RelatedKind>().is_err());
    assert!(RelatedKind::Similar.accepts_page());
    assert!(!RelatedKind::Credits.accepts_page());
}
