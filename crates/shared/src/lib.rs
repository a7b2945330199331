pub mod domain;
pub mod error;
pub mod format;
pub mod images;
pub mod protocol;
