// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid destination card: {0}")]
    InvalidDestination(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("URL already exists in this card: {0}")]
    DuplicateUrl(String),
    #[error("Title is required")]
    EmptyTitle,
    #[error("Invalid backup format: {0}")]
    FormatError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}
