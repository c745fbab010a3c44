//! Request routing: redirects first, then pages.

use crate::content::CompiledPage;
use archdocs_core::{RedirectOutcome, RedirectStatus, RedirectTable};
use std::collections::HashMap;

/// Outcome of routing one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// Redirect before any page lookup.
    Redirect {
        /// Target location.
        location: String,
        /// 308 or 307.
        status: RedirectStatus,
    },
    /// A compiled page.
    Page(&'a CompiledPage),
    /// Nothing serves this path.
    NotFound,
}

/// Redirect table plus the compiled pages it falls through to.
#[derive(Debug, Clone)]
pub struct Router {
    redirects: RedirectTable,
    pages: Vec<CompiledPage>,
    by_url: HashMap<String, usize>,
}

impl Router {
    /// Indexes `pages` by URL.
    pub fn new(redirects: RedirectTable, pages: Vec<CompiledPage>) -> Self {
        let by_url = pages
            .iter()
            .enumerate()
            .map(|(i, page)| (page.url.clone(), i))
            .collect();
        Self {
            redirects,
            pages,
            by_url,
        }
    }

    /// The redirect table.
    pub fn redirects(&self) -> &RedirectTable {
        &self.redirects
    }

    /// Pages in path order.
    pub fn pages(&self) -> &[CompiledPage] {
        &self.pages
    }

    /// Routes `request` (path plus optional query string).
    pub fn resolve(&self, request: &str) -> Route<'_> {
        if let RedirectOutcome::Redirect { location, status } = self.redirects.resolve(request) {
            return Route::Redirect { location, status };
        }

        let path = request.split_once('?').map_or(request, |(path, _)| path);
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        match self.by_url.get(path) {
            Some(&index) => Route::Page(&self.pages[index]),
            None => Route::NotFound,
        }
    }
}
