//! Rules for leaving routes out of the document.

use regex::Regex;
use scribe_core::{Method, Route};

use crate::error::{DocsError, DocsResult};

/// Which routes to leave out of the document.
///
/// A route is excluded when any rule matches. Static-file routes (a path
/// containing a literal `.`) are excluded by default.
///
/// ```rust
/// use scribe_core::{Method, Route};
/// use scribe_docs::ExcludeRules;
///
/// let rules = ExcludeRules::new()
///     .method(Method::Options)
///     .path("/health")
///     .pattern("^/internal/")
///     .unwrap();
///
/// assert!(rules.matches(&Route::new(Method::Get, "/internal/metrics")));
/// assert!(rules.matches(&Route::new(Method::Get, "/favicon.ico")));
/// assert!(!rules.matches(&Route::new(Method::Get, "/users")));
/// ```
#[derive(Debug, Clone)]
pub struct ExcludeRules {
    methods: Vec<Method>,
    paths: Vec<String>,
    patterns: Vec<Regex>,
    static_files: bool,
    tags: Vec<String>,
}

impl Default for ExcludeRules {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcludeRules {
    /// Rules that only exclude static files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            methods: Vec::new(),
            paths: Vec::new(),
            patterns: Vec::new(),
            static_files: true,
            tags: Vec::new(),
        }
    }

    /// Exclude every route with this method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Exclude an exact path pattern.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Exclude paths matching a regular expression.
    pub fn pattern(mut self, pattern: &str) -> DocsResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| DocsError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.patterns.push(regex);
        Ok(self)
    }

    /// Toggle the static-file heuristic.
    #[must_use]
    pub fn static_files(mut self, exclude: bool) -> Self {
        self.static_files = exclude;
        self
    }

    /// Exclude routes carrying this tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether the route should be left out.
    pub fn matches(&self, route: &Route) -> bool {
        let path = route.path.as_str();

        self.methods.contains(&route.method)
            || self.paths.iter().any(|excluded| excluded == path)
            || self.patterns.iter().any(|pattern| pattern.is_match(path))
            || (self.static_files && path.contains('.'))
            || route.detail.tags.iter().any(|tag| self.tags.contains(tag))
    }
}
