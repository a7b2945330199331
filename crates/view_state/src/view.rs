//! Display-ready projections of catalog entities for the presentation layer.

use serde::Serialize;
use shared::{
    domain::{MovieDetail, MovieId, MovieSummary},
    format::{
        format_budget, format_long_date, format_rating, format_release_label,
        format_release_year, format_runtime,
    },
    images::{image_url, ImageSize},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRow {
    pub id: MovieId,
    pub title: String,
    pub rating: String,
    pub release: String,
    pub poster_url: String,
}

impl MovieRow {
    pub fn from_summary(movie: &MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            rating: format_rating(Some(movie.vote_average)),
            release: format_release_label(movie.release_date.as_deref()),
            poster_url: image_url(movie.poster_path.as_deref(), ImageSize::W500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyBadge {
    pub name: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub id: MovieId,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub rating: String,
    pub year: String,
    pub release_date: String,
    pub runtime: String,
    pub budget: String,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub companies: Vec<CompanyBadge>,
    pub homepage: Option<String>,
    pub poster_url: String,
    pub backdrop_url: String,
}

impl DetailView {
    pub fn from_detail(detail: &MovieDetail) -> Self {
        Self {
            id: detail.id,
            title: detail.title.clone(),
            tagline: detail.tagline.clone(),
            overview: detail.overview.clone(),
            rating: format_rating(Some(detail.vote_average)),
            year: format_release_year(detail.release_date.as_deref()),
            release_date: format_long_date(detail.release_date.as_deref()),
            runtime: format_runtime(detail.runtime_minutes),
            budget: format_budget(detail.budget),
            genres: detail.genres.iter().map(|g| g.name.clone()).collect(),
            languages: detail
                .spoken_languages
                .iter()
                .map(|l| l.english_name.clone())
                .collect(),
            companies: detail
                .production_companies
                .iter()
                .map(|company| CompanyBadge {
                    name: company.name.clone(),
                    // Companies without a logo are shown by name only.
                    logo_url: company
                        .logo_path
                        .as_deref()
                        .map(|path| image_url(Some(path), ImageSize::W92)),
                })
                .collect(),
            homepage: detail.homepage.clone(),
            poster_url: image_url(detail.poster_path.as_deref(), ImageSize::W500),
            backdrop_url: image_url(detail.backdrop_path.as_deref(), ImageSize::W780),
        }
    }
}
