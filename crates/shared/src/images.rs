use std::fmt;

use serde::{Deserialize, Serialize};

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    W92,
    W185,
    W342,
    #[default]
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub fn token(self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Absolute URL for a poster, backdrop or logo path. Missing paths resolve to
/// a placeholder so the presentation layer always has something to load.
pub fn image_url(path: Option<&str>, size: ImageSize) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) if path.starts_with('/') => format!("{IMAGE_BASE_URL}{size}{path}"),
        Some(path) => format!("{IMAGE_BASE_URL}{size}/{path}"),
        None => PLACEHOLDER_IMAGE_URL.to_string(),
    }
}
