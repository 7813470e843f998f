use std::path::PathBuf;

use thiserror::Error;

use crate::chunker::ChunkError;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to index page {url}: {source}")]
    Page {
        url: String,
        #[source]
        source: ChunkError,
    },

    #[error("Expected exactly one parent chunk in {url}, found {count}")]
    ParentCount { url: String, count: usize },

    #[error("Parent chunk in {url} must be the first chunk, found at position {position}")]
    ParentNotFirst { url: String, position: usize },

    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid feed {}: {reason}", path.display())]
    Feed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub mod chunker;
pub mod commands;
pub mod config;
pub mod html;
pub mod indexer;
pub mod model;
pub mod sanitize;
