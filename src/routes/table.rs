//! Route table
//!
//! An ordered, immutable list of path bindings. Lookups go through a
//! path → index map built once at construction, so navigation never scans
//! the binding list.

use serde::Serialize;
use std::collections::HashMap;

use super::error::{RouteError, RouteTableError};
use super::page::Page;

/// Path the dashboard lands on when `/` is requested
pub const DEFAULT_LANDING: &str = "/synergy";

/// What a route path leads to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    /// Render a page
    Page(Page),
    /// Continue resolution at another path
    Redirect(String),
}

/// A single path → target association
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteBinding {
    pub path: String,
    pub target: RouteTarget,
}

impl RouteBinding {
    /// Bind a path to a page
    pub fn page(path: impl Into<String>, page: Page) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Page(page),
        }
    }

    /// Bind a path to a redirect
    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Redirect(to.into()),
        }
    }

    /// Whether this binding is a redirect
    pub fn is_redirect(&self) -> bool {
        matches!(self.target, RouteTarget::Redirect(_))
    }
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Path of the binding that produced the page
    pub path: String,
    /// Page to render
    pub page: Page,
    /// Paths passed through via redirects, in order (empty for a direct hit)
    pub redirects: Vec<String>,
}

impl Resolution {
    /// Whether at least one redirect was followed
    pub fn is_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Immutable route table
#[derive(Debug, Clone)]
pub struct RouteTable {
    bindings: Vec<RouteBinding>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    /// Build a table, validating path shape, uniqueness and redirect targets
    pub fn new(bindings: Vec<RouteBinding>) -> Result<Self, RouteTableError> {
        let mut index = HashMap::with_capacity(bindings.len());

        for (i, binding) in bindings.iter().enumerate() {
            if !binding.path.starts_with('/') {
                return Err(RouteTableError::InvalidPath(binding.path.clone()));
            }
            if index.insert(binding.path.clone(), i).is_some() {
                return Err(RouteTableError::DuplicatePath(binding.path.clone()));
            }
        }

        for binding in &bindings {
            if let RouteTarget::Redirect(to) = &binding.target {
                if !index.contains_key(to) {
                    return Err(RouteTableError::DanglingRedirect {
                        from: binding.path.clone(),
                        to: to.clone(),
                    });
                }
            }
        }

        Ok(Self { bindings, index })
    }

    /// The dashboard's route table
    ///
    /// ```text
    /// /          → redirect /synergy
    /// /resource  → Resource
    /// /service   → Service
    /// /synergy   → Synergy
    /// /manage    → ArchiveManage
    /// /login     → Login
    /// ```
    pub fn standard() -> Self {
        let bindings = standard_bindings();
        let index = bindings
            .iter()
            .enumerate()
            .map(|(i, b)| (b.path.clone(), i))
            .collect();
        Self { bindings, index }
    }

    /// Resolve a path to a page, following redirects
    ///
    /// Matching is exact and literal: callers strip query strings and
    /// fragments before resolving.
    pub fn resolve(&self, path: &str) -> Result<Resolution, RouteError> {
        let mut chain: Vec<String> = Vec::new();
        let mut current = path;

        loop {
            if chain.iter().any(|seen| seen == current) {
                chain.push(current.to_string());
                return Err(RouteError::RedirectLoop { chain });
            }

            let binding = self
                .lookup(current)
                .ok_or_else(|| RouteError::NotFound(current.to_string()))?;

            match &binding.target {
                RouteTarget::Page(page) => {
                    return Ok(Resolution {
                        path: binding.path.clone(),
                        page: *page,
                        redirects: chain,
                    });
                }
                RouteTarget::Redirect(to) => {
                    tracing::trace!(from = %current, to = %to, "Following redirect");
                    chain.push(current.to_string());
                    current = to;
                }
            }
        }
    }

    /// Exact lookup without following redirects
    pub fn lookup(&self, path: &str) -> Option<&RouteBinding> {
        self.index.get(path).map(|&i| &self.bindings[i])
    }

    /// Bindings in declaration order
    pub fn bindings(&self) -> &[RouteBinding] {
        &self.bindings
    }

    /// First path bound directly to `page`
    pub fn path_of(&self, page: Page) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.target == RouteTarget::Page(page))
            .map(|b| b.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_bindings() -> Vec<RouteBinding> {
    vec![
        RouteBinding::redirect("/", DEFAULT_LANDING),
        RouteBinding::page("/resource", Page::Resource),
        RouteBinding::page("/service", Page::Service),
        RouteBinding::page("/synergy", Page::Synergy),
        RouteBinding::page("/manage", Page::ArchiveManage),
        RouteBinding::page("/login", Page::Login),
    ]
}
