use pattern_core::config::RouterConfig;

/// Per-call overrides for a routed read. Unset fields use the router config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteOptions {
    pub max_results: Option<usize>,
    pub prefer_private: Option<bool>,
    pub include_public: Option<bool>,
    pub deduplicate: Option<bool>,
    pub use_cache: Option<bool>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_results(mut self, n: usize) -> Self {
        self.max_results = Some(n);
        self
    }

    pub fn prefer_private(mut self, on: bool) -> Self {
        self.prefer_private = Some(on);
        self
    }

    pub fn include_public(mut self, on: bool) -> Self {
        self.include_public = Some(on);
        self
    }

    pub fn deduplicate(mut self, on: bool) -> Self {
        self.deduplicate = Some(on);
        self
    }

    pub fn use_cache(mut self, on: bool) -> Self {
        self.use_cache = Some(on);
        self
    }

    pub(crate) fn resolve(&self, config: &RouterConfig) -> Resolved {
        Resolved {
            max_results: self.max_results.unwrap_or(config.max_results),
            prefer_private: self.prefer_private.unwrap_or(config.prefer_private),
            include_public: self.include_public.unwrap_or(config.include_public),
            deduplicate: self.deduplicate.unwrap_or(config.deduplicate),
            use_cache: self.use_cache.unwrap_or(config.use_cache),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub max_results: usize,
    pub prefer_private: bool,
    pub include_public: bool,
    pub deduplicate: bool,
    pub use_cache: bool,
}

impl Resolved {
    /// Suffix distinguishing cached reads made with non-default merge options.
    pub fn fingerprint(&self) -> String {
        format!(
            "max={};private={};public={};dedup={}",
            self.max_results, self.prefer_private, self.include_public, self.deduplicate
        )
    }

    /// Whether these options produce the same merge as `config`'s defaults.
    pub fn matches_config(&self, config: &RouterConfig) -> bool {
        self.max_results == config.max_results
            && self.prefer_private == config.prefer_private
            && self.include_public == config.include_public
            && self.deduplicate == config.deduplicate
    }
}
