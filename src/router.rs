//! Ordered route table with lazily loaded views.
//!
//! The navigation component builds its dispatch table from [`RouteTable`] at
//! startup. Paths match in registration order and the first match wins; a
//! view is produced only when its loader future is driven, never at match
//! time.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

/// Future produced by a view loader.
///
/// No `Send` bound: loads run on the client's single-threaded cooperative
/// event loop.
pub type ViewFuture<V> = Pin<Box<dyn Future<Output = Result<V, ViewLoadError>>>>;

/// Deferred view loader attached to a route entry.
type ViewLoader<V> = Arc<dyn Fn() -> ViewFuture<V>>;

/// Failure produced by a view loader when the underlying resource cannot be
/// fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("view failed to load: {reason}")]
pub struct ViewLoadError {
    /// Loader-supplied description of the failure.
    pub reason: String,
}

impl ViewLoadError {
    /// Wraps a failure description.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Routing failures.
///
/// All recoverable; the recommended handling is a visible not-found view, not
/// termination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// No registered entry matches the requested path.
    #[error("no matching route for '{0}'")]
    NoMatchingRoute(String),
    /// The path pattern is already registered.
    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),
    /// The matched entry's deferred view failed to load.
    #[error("view for '{path}' failed to load: {reason}")]
    ViewLoadFailure {
        /// Path whose view was being loaded.
        path: String,
        /// Loader-supplied description of the failure.
        reason: String,
    },
}

/// One path-to-view binding.
pub struct RouteEntry<V> {
    /// Normalised path pattern.
    path: String,
    /// Loader invoked on demand to produce the view.
    loader: ViewLoader<V>,
}

impl<V> RouteEntry<V> {
    /// Path pattern this entry matches.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Starts loading the view. Each call invokes the loader again.
    #[must_use]
    pub fn load(&self) -> ViewFuture<V> {
        (self.loader)()
    }
}

impl<V> fmt::Debug for RouteEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Ordered path-to-view table.
///
/// Path patterns are unique within the table and entries match in
/// registration order; the ordering is part of the contract even while
/// patterns are literal paths.
///
/// # Example
///
/// ```
/// use shortlink_ui::RouteTable;
///
/// let mut routes: RouteTable<&'static str> = RouteTable::new();
/// routes.register("/", || async { Ok("shorten page") })?;
/// assert_eq!(routes.resolve("/")?.path(), "/");
/// # Ok::<(), shortlink_ui::RouterError>(())
/// ```
pub struct RouteTable<V> {
    /// Entries in registration order.
    entries: Vec<RouteEntry<V>>,
    /// Loader used by [`RouteTable::load`] when no entry matches.
    not_found: Option<ViewLoader<V>>,
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RouteTable<V> {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            not_found: None,
        }
    }

    /// Registers a path with its deferred view loader.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::DuplicatePath`] when the normalised path is
    /// already registered.
    pub fn register<F, Fut>(&mut self, path: &str, loader: F) -> Result<(), RouterError>
    where
        V: 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, ViewLoadError>> + 'static,
    {
        let normalized = normalize_path(path);
        if self.entries.iter().any(|entry| entry.path == normalized) {
            return Err(RouterError::DuplicatePath(normalized));
        }
        self.entries.push(RouteEntry {
            path: normalized,
            loader: box_loader(loader),
        });
        Ok(())
    }

    /// Sets the loader [`RouteTable::load`] falls back to for unmatched
    /// paths, so the application shows a not-found view instead of failing.
    #[must_use]
    pub fn with_not_found<F, Fut>(mut self, loader: F) -> Self
    where
        V: 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, ViewLoadError>> + 'static,
    {
        self.not_found = Some(box_loader(loader));
        self
    }

    /// First entry matching the path, without invoking its loader.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoMatchingRoute`] when nothing matches.
    pub fn resolve(&self, path: &str) -> Result<&RouteEntry<V>, RouterError> {
        let normalized = normalize_path(path);
        self.entries
            .iter()
            .find(|entry| entry.path == normalized)
            .ok_or(RouterError::NoMatchingRoute(normalized))
    }

    /// Resolves the path and drives its loader to completion.
    ///
    /// Unmatched paths use the not-found loader when one is registered.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoMatchingRoute`] for an unmatched path without
    /// a not-found loader, or [`RouterError::ViewLoadFailure`] when the
    /// loader fails.
    pub async fn load(&self, path: &str) -> Result<V, RouterError> {
        let normalized = normalize_path(path);
        let future = match self.entries.iter().find(|entry| entry.path == normalized) {
            Some(entry) => entry.load(),
            None => match &self.not_found {
                Some(loader) => loader(),
                None => return Err(RouterError::NoMatchingRoute(normalized)),
            },
        };
        future.await.map_err(|err| RouterError::ViewLoadFailure {
            path: normalized,
            reason: err.reason,
        })
    }

    /// Entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry<V>] {
        &self.entries
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Boxes a loader closure and its futures behind the table's loader type.
fn box_loader<V, F, Fut>(loader: F) -> ViewLoader<V>
where
    V: 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<V, ViewLoadError>> + 'static,
{
    Arc::new(move || -> ViewFuture<V> { Box::pin(loader()) })
}

/// Normalises a request path for matching: query and fragment stripped,
/// trailing slash collapsed, leading slash enforced.
fn normalize_path(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or(raw);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
