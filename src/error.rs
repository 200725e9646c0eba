// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types shared across the crate.
//!
//! Most of the suggestion pipeline is deliberately infallible: an empty
//! query, an unknown item id, or a query with no matches are ordinary
//! outcomes, not errors. `Error` covers the places where something can
//! actually go wrong: loading catalogs and configs from disk, persisting
//! query history, and suggestion backends that run outside this process.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fallible omnibar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading data or serving suggestions.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog file could not be read.
    #[error("failed to read catalog {}", path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON or has the wrong shape.
    #[error("failed to parse catalog {}", path.display())]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Config file could not be read.
    #[error("failed to read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON.
    #[error("failed to parse config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Config parsed but fails a sanity check.
    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    /// Query history file could not be read or written.
    #[error("query store {}: {}", path.display(), source)]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Query history file exists but does not decode.
    #[error("query store {} is corrupt: {}", path.display(), reason)]
    StoreCorrupt { path: PathBuf, reason: String },

    /// A suggestion backend failed to produce results.
    #[error("suggestion source failed: {0}")]
    Source(String),
}

impl Error {
    /// Build a [`Error::Source`] from any displayable backend failure.
    pub fn source_failure(message: impl Into<String>) -> Self {
        Error::Source(message.into())
    }
}
