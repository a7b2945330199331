//! Wire shapes of the remote catalog API and their validation into domain types.
//!
//! The remote payloads are loosely typed: almost every field may be missing,
//! `null`, or an empty string. Everything is read into `Wire*` structs with
//! optional fields first and then validated, so a missing identifier is a
//! [`DecodeError`] while a missing poster or date is simply absent.

use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    domain::{
        CastMember, CompanyId, Credits, CrewMember, Genre, GenreId, MovieDetail, MovieId,
        MovieSummary, Page, PersonId, ProductionCompany, Review, SpokenLanguage, Video,
    },
    error::{DecodeError, PayloadKind},
};

#[derive(Debug, Deserialize)]
struct WireResults<T> {
    page: Option<u32>,
    total_pages: Option<u32>,
    total_results: Option<u32>,
    results: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct WireMovieSummary {
    id: Option<i64>,
    title: Option<String>,
    poster_path: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireGenre {
    id: Option<i64>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireCompany {
    id: Option<i64>,
    name: Option<String>,
    logo_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireLanguage {
    english_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMovieDetail {
    id: Option<i64>,
    title: Option<String>,
    poster_path: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
    overview: Option<String>,
    tagline: Option<String>,
    runtime: Option<u32>,
    budget: Option<u64>,
    genres: Option<Vec<WireGenre>>,
    production_companies: Option<Vec<WireCompany>>,
    spoken_languages: Option<Vec<WireLanguage>>,
    homepage: Option<String>,
    backdrop_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireCastMember {
    id: Option<i64>,
    name: Option<String>,
    character: Option<String>,
    profile_path: Option<String>,
    order: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireCrewMember {
    id: Option<i64>,
    name: Option<String>,
    job: Option<String>,
    department: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireCredits {
    id: Option<i64>,
    cast: Option<Vec<WireCastMember>>,
    crew: Option<Vec<WireCrewMember>>,
}

#[derive(Debug, Deserialize)]
struct WireVideo {
    id: Option<String>,
    key: Option<String>,
    name: Option<String>,
    site: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireReview {
    id: Option<String>,
    author: Option<String>,
    content: Option<String>,
    url: Option<String>,
    created_at: Option<String>,
}

fn parse<T: DeserializeOwned>(payload: PayloadKind, body: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice(body).map_err(|e| DecodeError::new(payload, e.to_string()))
}

/// Empty strings are how the remote API spells "unknown" for dates and paths.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require<T>(payload: PayloadKind, field: &str, value: Option<T>) -> Result<T, DecodeError> {
    value.ok_or_else(|| DecodeError::new(payload, format!("missing required field `{field}`")))
}

fn summary_from_wire(
    payload: PayloadKind,
    wire: WireMovieSummary,
) -> Result<MovieSummary, DecodeError> {
    Ok(MovieSummary {
        id: MovieId(require(payload, "id", wire.id)?),
        title: wire.title.unwrap_or_default(),
        poster_path: non_empty(wire.poster_path),
        release_date: non_empty(wire.release_date),
        vote_average: wire.vote_average.unwrap_or_default(),
    })
}

fn page_from_wire<W, T>(
    wire: WireResults<W>,
    convert: impl FnMut(W) -> Result<T, DecodeError>,
) -> Result<Page<T>, DecodeError> {
    let results = wire
        .results
        .unwrap_or_default()
        .into_iter()
        .map(convert)
        .collect::<Result<Vec<_>, _>>()?;
    let page = wire.page.unwrap_or(1);
    Ok(Page {
        page,
        total_pages: wire.total_pages.unwrap_or(page),
        total_results: wire
            .total_results
            .unwrap_or(u32::try_from(results.len()).unwrap_or(u32::MAX)),
        results,
    })
}

/// Decodes a `{ "results": [...] }` movie list. An absent `results` field
/// yields an empty list.
pub fn decode_movie_list(body: &[u8]) -> Result<Vec<MovieSummary>, DecodeError> {
    Ok(decode_movie_page(body)?.results)
}

pub fn decode_movie_page(body: &[u8]) -> Result<Page<MovieSummary>, DecodeError> {
    let payload = PayloadKind::MovieList;
    let wire: WireResults<WireMovieSummary> = parse(payload, body)?;
    page_from_wire(wire, |item| summary_from_wire(payload, item))
}

pub fn decode_movie_detail(body: &[u8]) -> Result<MovieDetail, DecodeError> {
    let payload = PayloadKind::MovieDetail;
    let wire: WireMovieDetail = parse(payload, body)?;

    let genres = wire
        .genres
        .unwrap_or_default()
        .into_iter()
        .map(|genre| {
            Ok(Genre {
                id: GenreId(require(payload, "genres[].id", genre.id)?),
                name: genre.name.unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    let production_companies = wire
        .production_companies
        .unwrap_or_default()
        .into_iter()
        .map(|company| {
            Ok(ProductionCompany {
                id: CompanyId(require(payload, "production_companies[].id", company.id)?),
                name: company.name.unwrap_or_default(),
                logo_path: non_empty(company.logo_path),
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    let spoken_languages = wire
        .spoken_languages
        .unwrap_or_default()
        .into_iter()
        .filter_map(|language| non_empty(language.english_name))
        .map(|english_name| SpokenLanguage { english_name })
        .collect();

    Ok(MovieDetail {
        id: MovieId(require(payload, "id", wire.id)?),
        title: wire.title.unwrap_or_default(),
        poster_path: non_empty(wire.poster_path),
        release_date: non_empty(wire.release_date),
        vote_average: wire.vote_average.unwrap_or_default(),
        overview: non_empty(wire.overview),
        tagline: non_empty(wire.tagline),
        runtime_minutes: wire.runtime,
        budget: wire.budget,
        genres,
        production_companies,
        spoken_languages,
        homepage: non_empty(wire.homepage),
        backdrop_path: non_empty(wire.backdrop_path),
    })
}

pub fn decode_credits(body: &[u8]) -> Result<Credits, DecodeError> {
    let payload = PayloadKind::Credits;
    let wire: WireCredits = parse(payload, body)?;

    let cast = wire
        .cast
        .unwrap_or_default()
        .into_iter()
        .map(|member| {
            Ok(CastMember {
                id: PersonId(require(payload, "cast[].id", member.id)?),
                name: member.name.unwrap_or_default(),
                character: member.character.unwrap_or_default(),
                profile_path: non_empty(member.profile_path),
                order: member.order.unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    let crew = wire
        .crew
        .unwrap_or_default()
        .into_iter()
        .map(|member| {
            Ok(CrewMember {
                id: PersonId(require(payload, "crew[].id", member.id)?),
                name: member.name.unwrap_or_default(),
                job: member.job.unwrap_or_default(),
                department: member.department.unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    Ok(Credits {
        id: MovieId(require(payload, "id", wire.id)?),
        cast,
        crew,
    })
}

pub fn decode_videos(body: &[u8]) -> Result<Vec<Video>, DecodeError> {
    let payload = PayloadKind::Videos;
    let wire: WireResults<WireVideo> = parse(payload, body)?;
    wire.results
        .unwrap_or_default()
        .into_iter()
        .map(|video| {
            Ok(Video {
                id: require(payload, "results[].id", video.id)?,
                key: require(payload, "results[].key", video.key)?,
                name: video.name.unwrap_or_default(),
                site: video.site.unwrap_or_default(),
                kind: video.kind.unwrap_or_default(),
            })
        })
        .collect()
}

pub fn decode_reviews(body: &[u8]) -> Result<Page<Review>, DecodeError> {
    let payload = PayloadKind::Reviews;
    let wire: WireResults<WireReview> = parse(payload, body)?;
    page_from_wire(wire, |review| {
        Ok(Review {
            id: require(payload, "results[].id", review.id)?,
            author: review.author.unwrap_or_default(),
            content: review.content.unwrap_or_default(),
            url: non_empty(review.url),
            created_at: non_empty(review.created_at),
        })
    })
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
