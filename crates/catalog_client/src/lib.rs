use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{MovieDetail, MovieId, MovieSummary, RelatedKind, RelatedOptions, RelatedPayload},
    error::{ApiStatus, DecodeError},
    protocol::{
        decode_credits, decode_movie_detail, decode_movie_list, decode_movie_page,
        decode_reviews, decode_videos,
    },
};
use tracing::{debug, error, info, warn};
use url::Url;

pub mod config;
pub mod error;

pub use config::{load_config, load_config_from, CatalogConfig};
pub use error::{CatalogError, CatalogErrorKind};

/// The four read operations the screens need from the remote catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_popular(&self) -> Result<Vec<MovieSummary>, CatalogError>;
    async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError>;
    async fn get_movie_details(&self, id: MovieId) -> Result<MovieDetail, CatalogError>;
    async fn get_related(
        &self,
        id: MovieId,
        kind: RelatedKind,
        options: &RelatedOptions,
    ) -> Result<RelatedPayload, CatalogError>;
}

pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(load_config())
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str, CatalogError> {
        self.config.api_key().ok_or_else(|| {
            CatalogError::Config(
                "missing API key (set MOVIE_API_KEY or CATALOG__API_KEY)".to_string(),
            )
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        let base = self.config.base_url.trim().trim_end_matches('/');
        let url = Url::parse(&format!("{base}{path}")).map_err(|e| {
            CatalogError::Config(format!(
                "invalid catalog base url '{}': {e}",
                self.config.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CatalogError::Config(format!(
                "catalog base url must be http or https, got '{}'",
                self.config.base_url
            )));
        }
        Ok(url)
    }

    /// Issues a GET and returns the raw body of a 2xx response. `not_found`
    /// names the resource when a 404 should surface as [`CatalogError::NotFound`].
    async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
        not_found: Option<String>,
    ) -> Result<Vec<u8>, CatalogError> {
        let api_key = self.api_key()?;
        let url = self.endpoint(path)?;

        let mut query: Vec<(&str, &str)> = vec![("api_key", api_key)];
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        debug!(path, "catalog: request");
        let response = self
            .http
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                warn!(path, "catalog: transport failure: {e}");
                CatalogError::Network(e.without_url().to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.without_url().to_string()))?;

        if status == StatusCode::NOT_FOUND {
            if let Some(resource) = not_found {
                info!(path, "catalog: {resource} not found");
                return Err(CatalogError::NotFound { resource });
            }
        }

        if !status.is_success() {
            let message = ApiStatus::parse(&body)
                .map(|api_status| api_status.message().to_string())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            warn!(path, status = status.as_u16(), "catalog: remote error: {message}");
            return Err(CatalogError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body.to_vec())
    }
}

fn decoded<T>(path: &str, result: Result<T, DecodeError>) -> Result<T, CatalogError> {
    result.map_err(|err| {
        error!(path, payload = ?err.payload, "catalog: decode failed: {}", err.message);
        CatalogError::Decode(err)
    })
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_popular(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        let path = "/movie/popular";
        let body = self
            .get(path, &[("language", self.config.language.clone())], None)
            .await?;
        decoded(path, decode_movie_list(&body))
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        let path = "/search/movie";
        let body = self
            .get(
                path,
                &[
                    ("query", query.to_string()),
                    ("language", self.config.language.clone()),
                ],
                None,
            )
            .await?;
        decoded(path, decode_movie_list(&body))
    }

    async fn get_movie_details(&self, id: MovieId) -> Result<MovieDetail, CatalogError> {
        let path = format!("/movie/{id}");
        let body = self
            .get(
                &path,
                &[("language", self.config.language.clone())],
                Some(format!("movie {id}")),
            )
            .await?;
        decoded(&path, decode_movie_detail(&body))
    }

    async fn get_related(
        &self,
        id: MovieId,
        kind: RelatedKind,
        options: &RelatedOptions,
    ) -> Result<RelatedPayload, CatalogError> {
        let path = format!("/movie/{id}/{}", kind.path_segment());
        let mut params = vec![("language", options.language.clone())];
        if kind.accepts_page() {
            params.push(("page", options.page.max(1).to_string()));
        }

        let body = self
            .get(&path, &params, Some(format!("{kind} for movie {id}")))
            .await?;

        match kind {
            RelatedKind::Credits => decoded(&path, decode_credits(&body)).map(RelatedPayload::Credits),
            RelatedKind::Videos => decoded(&path, decode_videos(&body)).map(RelatedPayload::Videos),
            RelatedKind::Reviews => decoded(&path, decode_reviews(&body)).map(RelatedPayload::Reviews),
            RelatedKind::Similar => {
                decoded(&path, decode_movie_page(&body)).map(RelatedPayload::Similar)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
