// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while resolving course data or rendering the page.
//!
//! Every error is fatal: nothing here is retried or downgraded.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Cannot have more than two documents in {}", .path.display())]
    TooManyDocuments { path: PathBuf },

    #[error("Missing {expected} document in {}", .path.display())]
    MissingDocument {
        path: PathBuf,
        expected: &'static str,
    },

    #[error(
        "Could not find entry in {lectures} with Title \"{title}\" specified by \"{field}\" in {referrer}"
    )]
    UnresolvedLecture {
        title: String,
        field: &'static str,
        lectures: String,
        referrer: String,
    },

    #[error(
        "Could not find entry in {assignments} with Label \"{label}\" specified by \"{field}\" in {referrer}"
    )]
    UnresolvedAssignment {
        label: String,
        field: &'static str,
        assignments: String,
        referrer: String,
    },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Context serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach a path to I/O and YAML failures, in the spirit of
/// `.with_context(|| ...)` but keeping the typed source.
pub(crate) trait PathContext<T> {
    fn at(self, path: &std::path::Path) -> Result<T>;
}

impl<T> PathContext<T> for std::result::Result<T, std::io::Error> {
    fn at(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<T> PathContext<T> for std::result::Result<T, serde_yaml_ng::Error> {
    fn at(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
