//! Mock repository host for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::host::{HostError, Repository, RepositoryHost};

/// A recorded file fetch: (repo, path).
pub type RecordedFetch = (String, String);

/// Produces a fresh error per call, since `HostError` is not `Clone`.
type ErrorFactory = Arc<dyn Fn() -> HostError + Send + Sync>;

/// Mock implementation of the RepositoryHost trait.
///
/// Provides controllable behavior for testing:
/// - Configurable repository list and file contents
/// - Injected per-path and listing failures
/// - Injected panics inside a fetch
/// - Artificial per-call delay
/// - Tracking of fetches and of concurrent in-flight fetches
///
/// # Example
///
/// ```rust,ignore
/// let host = MockRepositoryHost::new();
/// host.add_repository("widgets").await;
/// host.set_file("widgets", "CODEOWNERS", "* alice").await;
/// host.set_delay(Duration::from_millis(5)).await;
///
/// // ... run the collector ...
///
/// assert!(host.peak_in_flight() <= 20);
/// ```
pub struct MockRepositoryHost {
    repos: RwLock<Vec<Repository>>,
    files: RwLock<HashMap<(String, String), Vec<u8>>>,
    errors: RwLock<HashMap<(String, String), ErrorFactory>>,
    list_error: RwLock<Option<ErrorFactory>>,
    panics: RwLock<HashSet<(String, String)>>,
    delay: RwLock<Duration>,
    fetches: RwLock<Vec<RecordedFetch>>,
    list_calls: AtomicUsize,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: AtomicUsize,
}

impl std::fmt::Debug for MockRepositoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRepositoryHost")
            .field("repos", &"<repos>")
            .field("files", &"<files>")
            .field("errors", &"<errors>")
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .field("peak_in_flight", &self.peak_in_flight.load(Ordering::SeqCst))
            .finish()
    }
}

impl Default for MockRepositoryHost {
    fn default() -> Self {
        Self::new()
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockRepositoryHost {
    /// Create a new mock host with no repositories.
    pub fn new() -> Self {
        Self {
            repos: RwLock::new(Vec::new()),
            files: RwLock::new(HashMap::new()),
            errors: RwLock::new(HashMap::new()),
            list_error: RwLock::new(None),
            panics: RwLock::new(HashSet::new()),
            delay: RwLock::new(Duration::ZERO),
            fetches: RwLock::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    // =========================================================================
    // Repositories
    // =========================================================================

    /// Add a repository to the organization listing.
    pub async fn add_repository(&self, name: &str) {
        self.repos.write().await.push(Repository::new(name));
    }

    /// Replace the repository listing.
    pub async fn set_repositories(&self, repos: Vec<Repository>) {
        *self.repos.write().await = repos;
    }

    /// Current repository listing.
    pub async fn repositories(&self) -> Vec<Repository> {
        self.repos.read().await.clone()
    }

    // =========================================================================
    // Files
    // =========================================================================

    /// Set the content of `path` in `repo`.
    pub async fn set_file(&self, repo: &str, path: &str, content: impl Into<Vec<u8>>) {
        self.files
            .write()
            .await
            .insert((repo.to_string(), path.to_string()), content.into());
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Make every fetch of `path` in `repo` fail with the produced error.
    pub async fn set_error<F>(&self, repo: &str, path: &str, error: F)
    where
        F: Fn() -> HostError + Send + Sync + 'static,
    {
        self.errors
            .write()
            .await
            .insert((repo.to_string(), path.to_string()), Arc::new(error));
    }

    /// Make repository listing fail with the produced error.
    pub async fn set_list_error<F>(&self, error: F)
    where
        F: Fn() -> HostError + Send + Sync + 'static,
    {
        *self.list_error.write().await = Some(Arc::new(error));
    }

    /// Make every fetch of `path` in `repo` panic.
    pub async fn set_panic(&self, repo: &str, path: &str) {
        self.panics
            .write()
            .await
            .insert((repo.to_string(), path.to_string()));
    }

    /// Clear all injected errors and panics.
    pub async fn clear_errors(&self) {
        self.errors.write().await.clear();
        self.panics.write().await.clear();
        *self.list_error.write().await = None;
    }

    // =========================================================================
    // Timing
    // =========================================================================

    /// Delay every fetch by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    // =========================================================================
    // Recording
    // =========================================================================

    /// All fetches in the order they started.
    pub async fn recorded_fetches(&self) -> Vec<RecordedFetch> {
        self.fetches.read().await.clone()
    }

    /// Number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }

    /// Number of repository listings performed.
    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Fetches currently in progress.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of fetches observed in progress at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositoryHost for MockRepositoryHost {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_repositories(&self, _org: &str) -> Result<Vec<Repository>, HostError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.list_error.read().await.as_ref() {
            return Err(error());
        }

        Ok(self.repos.read().await.clone())
    }

    async fn fetch_file(&self, _org: &str, repo: &str, path: &str) -> Result<Vec<u8>, HostError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlightGuard(Arc::clone(&self.in_flight));
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        let key = (repo.to_string(), path.to_string());
        self.fetches.write().await.push(key.clone());

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let injected_panic = self.panics.read().await.contains(&key);
        if injected_panic {
            panic!("injected panic fetching {}: {}", repo, path);
        }

        if let Some(error) = self.errors.read().await.get(&key) {
            return Err(error());
        }

        self.files
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| HostError::NotFound(format!("{}: {}", repo, path)))
    }
}
