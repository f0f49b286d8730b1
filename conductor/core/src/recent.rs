//! Recent Queries
//!
//! A bounded, most-recent-first list of submitted queries with no exact
//! duplicates, persisted as a JSON array of strings.
//!
//! [`RecentQueries`] is the pure list; [`RecentQueryStore`] owns one plus the
//! file it lives in, with an explicit `open` / `entries` / `record` lifecycle.
//! A store opened without a path keeps everything in memory.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Maximum entries kept
pub const MAX_RECENT_QUERIES: usize = 5;

/// File name used under the data directory
pub const RECENT_QUERIES_FILE: &str = "recent_queries.json";

/// Errors reading or writing the recent-query file
#[derive(Debug, Error)]
pub enum RecentStoreError {
    /// File exists but could not be read
    #[error("Failed to read recent queries at {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// File or its directory could not be written
    #[error("Failed to write recent queries at {path}: {source}")]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// File is not a JSON array of strings
    #[error("Recent queries at {path} are not a JSON string array: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// List could not be encoded
    #[error("Failed to encode recent queries: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Most-recent-first list of past queries
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecentQueries {
    entries: Vec<String>,
}

impl RecentQueries {
    /// Empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, keeping the first occurrence of each and
    /// at most [`MAX_RECENT_QUERIES`]
    #[must_use]
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(MAX_RECENT_QUERIES);
        for entry in entries {
            if deduped.len() == MAX_RECENT_QUERIES {
                break;
            }
            if !deduped.contains(&entry) {
                deduped.push(entry);
            }
        }
        Self { entries: deduped }
    }

    /// Move or insert `query` at the front, dropping the oldest overflow
    pub fn push(&mut self, query: &str) {
        self.entries.retain(|q| q != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_RECENT_QUERIES);
    }

    /// Entries, most recent first
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A [`RecentQueries`] list bound to its backing file
#[derive(Debug)]
pub struct RecentQueryStore {
    path: Option<PathBuf>,
    queries: RecentQueries,
}

impl RecentQueryStore {
    /// `$XDG_DATA_HOME/galaxrx/recent_queries.json`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("galaxrx").join(RECENT_QUERIES_FILE))
    }

    /// Store that never touches disk
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            queries: RecentQueries::new(),
        }
    }

    /// Open the store at `path`; a missing file is an empty list
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RecentStoreError> {
        let path = path.into();
        let queries = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let entries: Vec<String> =
                    serde_json::from_str(&content).map_err(|source| RecentStoreError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                RecentQueries::from_entries(entries)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => RecentQueries::new(),
            Err(source) => return Err(RecentStoreError::Read { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = queries.len(), "Opened recent queries");
        Ok(Self {
            path: Some(path),
            queries,
        })
    }

    /// Open the store at `path`, starting empty if the file is unusable
    pub async fn open_or_empty(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::in_memory();
        };
        match Self::open(&path).await {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(error = %e, "Starting with an empty recent-query list");
                Self {
                    path: Some(path),
                    queries: RecentQueries::new(),
                }
            }
        }
    }

    /// Backing file, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Entries, most recent first
    #[must_use]
    pub fn entries(&self) -> &[String] {
        self.queries.entries()
    }

    /// Push `query` to the front and persist
    ///
    /// The in-memory list is updated even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns the persist failure.
    pub async fn record(&mut self, query: &str) -> Result<(), RecentStoreError> {
        self.queries.push(query);
        self.persist().await
    }

    /// Write the list to the backing file, creating its directory
    ///
    /// # Errors
    ///
    /// Fails if the directory or file cannot be written.
    pub async fn persist(&self) -> Result<(), RecentStoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| RecentStoreError::Write {
                    path: path.clone(),
                    source,
                })?;
        }

        let json = serde_json::to_string(self.queries.entries())?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| RecentStoreError::Write {
                path: path.clone(),
                source,
            })
    }
}
