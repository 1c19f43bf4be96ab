//! Navigation
//!
//! Drives the route table from navigation events. Each navigation resolves
//! its path, records the result in a [`History`], and hands back a
//! [`PendingRender`] ticket. Only the most recent ticket may commit: when a
//! second navigation starts before the first render completes, the first
//! render is discarded (last navigation wins).

use std::sync::Arc;
use thiserror::Error;

use crate::routes::{Resolution, RouteError, RouteTable};

/// Navigation history owned by the hosting environment
pub trait History {
    /// Add a new entry
    fn push(&mut self, path: &str);

    /// Replace the current entry
    fn replace(&mut self, path: &str);

    /// Path of the current entry, if any
    fn current(&self) -> Option<&str>;
}

/// In-memory history, used outside the browser
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<String>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl History for MemoryHistory {
    fn push(&mut self, path: &str) {
        self.entries.push(path.to_string());
    }

    fn replace(&mut self, path: &str) {
        match self.entries.last_mut() {
            Some(last) => *last = path.to_string(),
            None => self.entries.push(path.to_string()),
        }
    }

    fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

/// Errors from navigation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error(transparent)]
    Route(#[from] RouteError),

    /// A later navigation started before this render committed
    #[error("Render for {path} superseded by a later navigation")]
    Superseded { path: String },
}

/// Ticket for a render that has been resolved but not yet committed
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending render does nothing until completed"]
pub struct PendingRender {
    generation: u64,
    resolution: Resolution,
}

impl PendingRender {
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }
}

/// Serializes resolution and rendering for one mounted application
pub struct Navigator<H: History> {
    table: Arc<RouteTable>,
    history: H,
    generation: u64,
    rendered: Option<Resolution>,
}

impl<H: History> Navigator<H> {
    pub fn new(table: Arc<RouteTable>, history: H) -> Self {
        Self {
            table,
            history,
            generation: 0,
            rendered: None,
        }
    }

    /// Navigate to `path`, adding a history entry
    pub fn navigate(&mut self, path: &str) -> Result<PendingRender, NavigationError> {
        self.begin(path, false)
    }

    /// Navigate to `path`, replacing the current history entry
    pub fn replace(&mut self, path: &str) -> Result<PendingRender, NavigationError> {
        self.begin(path, true)
    }

    /// Commit a render if no later navigation has started
    pub fn complete(&mut self, pending: PendingRender) -> Result<&Resolution, NavigationError> {
        if pending.generation != self.generation {
            tracing::debug!(
                path = %pending.resolution.path,
                stale = pending.generation,
                latest = self.generation,
                "Discarding superseded render"
            );
            return Err(NavigationError::Superseded {
                path: pending.resolution.path,
            });
        }

        Ok(self.rendered.insert(pending.resolution))
    }

    /// The last committed resolution
    pub fn rendered(&self) -> Option<&Resolution> {
        self.rendered.as_ref()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    fn begin(&mut self, path: &str, replace: bool) -> Result<PendingRender, NavigationError> {
        // Every navigation, successful or not, invalidates older tickets.
        self.generation += 1;

        let path = strip_query_and_fragment(path);
        let resolution = self.table.resolve(path)?;

        if replace {
            self.history.replace(&resolution.path);
        } else {
            self.history.push(&resolution.path);
        }

        tracing::debug!(
            requested = %path,
            resolved = %resolution.path,
            page = %resolution.page,
            generation = self.generation,
            "Navigation resolved"
        );

        Ok(PendingRender {
            generation: self.generation,
            resolution,
        })
    }
}

/// Drop `?query` and `#fragment` from a location path
pub fn strip_query_and_fragment(path: &str) -> &str {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    &path[..end]
}
