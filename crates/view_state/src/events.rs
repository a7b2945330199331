//! Error modeling for screens: what failed, where, and what to tell the user.

use catalog_client::{CatalogError, CatalogErrorKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Config,
    Network,
    Remote,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorContext {
    PopularList,
    Search,
    MovieDetail,
    Lists,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenError {
    category: ErrorCategory,
    context: ErrorContext,
    message: String,
    retryable: bool,
}

impl ScreenError {
    pub fn from_catalog(context: ErrorContext, err: &CatalogError) -> Self {
        // Malformed payloads are the server's fault as far as the user is concerned.
        let category = match err.kind() {
            CatalogErrorKind::Config => ErrorCategory::Config,
            CatalogErrorKind::Network => ErrorCategory::Network,
            CatalogErrorKind::Remote | CatalogErrorKind::Decode => ErrorCategory::Remote,
            CatalogErrorKind::NotFound => ErrorCategory::NotFound,
        };

        let message = match (category, context) {
            (ErrorCategory::Config, _) => {
                "Movie catalog is not configured: missing API key.".to_string()
            }
            (ErrorCategory::NotFound, ErrorContext::MovieDetail) => "Movie not found.".to_string(),
            (_, ErrorContext::PopularList) => {
                "Failed to load popular movies. Please try again.".to_string()
            }
            (_, ErrorContext::Search) => "Failed to search movies. Please try again.".to_string(),
            (_, ErrorContext::MovieDetail) => {
                "Failed to load movie details. Please try again.".to_string()
            }
            (_, ErrorContext::Lists) => "Failed to load your lists.".to_string(),
        };

        Self {
            category,
            context,
            message,
            retryable: err.is_retryable(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn context(&self) -> ErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    pub fn is_not_found(&self) -> bool {
        self.category == ErrorCategory::NotFound
    }

    pub fn is_blocking(&self) -> bool {
        self.category == ErrorCategory::Config
    }
}
