//! Allow-list of owners of interest.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum KnownOwnersError {
    #[error("Failed to read known owners file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Set of owner identifiers loaded once before collection starts.
///
/// Read-only for the rest of the run; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownOwners {
    owners: HashSet<String>,
}

impl KnownOwners {
    /// Build the set from newline-delimited text. Blank lines are ignored.
    pub fn from_text(text: &str) -> Self {
        text.lines().collect()
    }

    /// Load the set from a file with one identifier per line.
    pub async fn load(path: &Path) -> Result<Self, KnownOwnersError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| KnownOwnersError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let known = Self::from_text(&text);
        if known.is_empty() {
            warn!(path = %path.display(), "Known owners file lists no owners");
        } else {
            debug!(path = %path.display(), count = known.len(), "Loaded known owners");
        }
        Ok(known)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.owners.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KnownOwners {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            owners: iter
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}
