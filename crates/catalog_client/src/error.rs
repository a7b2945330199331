use shared::error::DecodeError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    Config,
    Network,
    Remote,
    NotFound,
    Decode,
}

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("catalog is not configured: {0}")]
    Config(String),
    #[error("network failure talking to the catalog: {0}")]
    Network(String),
    #[error("catalog returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl CatalogError {
    pub fn kind(&self) -> CatalogErrorKind {
        match self {
            Self::Config(_) => CatalogErrorKind::Config,
            Self::Network(_) => CatalogErrorKind::Network,
            Self::Remote { .. } => CatalogErrorKind::Remote,
            Self::NotFound { .. } => CatalogErrorKind::NotFound,
            Self::Decode(_) => CatalogErrorKind::Decode,
        }
    }

    /// Whether asking again can plausibly succeed. A missing key or a missing
    /// movie will not fix itself.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            CatalogErrorKind::Network | CatalogErrorKind::Remote | CatalogErrorKind::Decode
        )
    }
}
