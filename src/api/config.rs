//! Client configuration.

use crate::user_agent;

/// Default URL scheme.
pub const DEFAULT_SCHEME: &str = "http";

/// Application path segment every endpoint lives under.
pub const DEFAULT_APP_NAME: &str = "downloadstation";

/// API version path segment.
pub const DEFAULT_API_VERSION: &str = "V4";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes; torrent uploads and large queries).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Configuration for [`DownloadStation`](super::DownloadStation).
///
/// # Example
///
/// ```
/// use downloadstation_core::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_scheme("https")
///     .with_read_timeout_secs(60);
/// assert_eq!(config.scheme(), "https");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    scheme: String,
    app_name: String,
    api_version: String,
    connect_timeout_secs: u64,
    read_timeout_secs: u64,
    user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
            user_agent: user_agent::default_api_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL scheme (`http` or `https`).
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Sets the application path segment.
    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Sets the API version path segment.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Sets the connect timeout in seconds.
    #[must_use]
    pub const fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Sets the read timeout in seconds.
    #[must_use]
    pub const fn with_read_timeout_secs(mut self, secs: u64) -> Self {
        self.read_timeout_secs = secs;
        self
    }

    /// Sets the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    #[must_use]
    pub const fn connect_timeout_secs(&self) -> u64 {
        self.connect_timeout_secs
    }

    #[must_use]
    pub const fn read_timeout_secs(&self) -> u64 {
        self.read_timeout_secs
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
