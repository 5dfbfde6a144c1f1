//! Builder methods for container configuration

use super::types::{AccessPolicy, ContainerConfig};

impl ContainerConfig {
    /// Replace the delimiter set
    ///
    /// # Examples
    /// ```
    /// use datapath_engine::config::ContainerConfig;
    ///
    /// let config = ContainerConfig::default().with_delimiters([".", "/"]);
    /// assert_eq!(config.main_delimiter(), ".");
    /// ```
    #[must_use]
    pub fn with_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    /// Use a single delimiter
    #[must_use]
    pub fn with_delimiter(self, delimiter: impl Into<String>) -> Self {
        self.with_delimiters([delimiter.into()])
    }

    /// Append delimiters after the existing ones
    #[must_use]
    pub fn add_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters
            .extend(delimiters.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_force_create(mut self, force_create: bool) -> Self {
        self.force_create = force_create;
        self
    }

    #[must_use]
    pub fn with_access_policy(mut self, policy: AccessPolicy) -> Self {
        self.access_policy = policy;
        self
    }

    /// Shorthand for `with_access_policy(AccessPolicy::Silent)`
    #[must_use]
    pub fn silent(self) -> Self {
        self.with_access_policy(AccessPolicy::Silent)
    }

    /// Shorthand for `with_access_policy(AccessPolicy::Strict)`
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_access_policy(AccessPolicy::Strict)
    }
}
