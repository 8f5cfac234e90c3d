//! The Download Station client: session handling and request dispatch.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, info, instrument, warn};

use super::config::ClientConfig;
use super::error::ApiError;
use super::params::Params;
use super::response::{ApiResponse, parse_envelope};
use super::transport::{FileUpload, HttpTransport};
use super::uri::endpoint_uri;

/// Form field carrying the session token.
pub const SESSION_FIELD: &str = "sid";

/// Client for one Download Station host and account.
///
/// The session token is obtained lazily on the first authenticated call and
/// cached for the life of the client. Methods that may log in take `&mut self`.
///
/// # Example
///
/// ```no_run
/// use downloadstation_core::{DownloadStation, Params};
///
/// # async fn example() -> Result<(), downloadstation_core::ApiError> {
/// let mut station = DownloadStation::new("nas.local:8080", "admin", "secret")?;
/// let tasks = station.call_endpoint("task", "query", Params::new()).await?;
/// println!("total: {:?}", tasks.get_i64("total"));
/// # Ok(())
/// # }
/// ```
pub struct DownloadStation {
    host: String,
    username: String,
    password: String,
    sid: Option<String>,
    config: ClientConfig,
    transport: HttpTransport,
}

impl std::fmt::Debug for DownloadStation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadStation")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("authenticated", &self.sid.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DownloadStation {
    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Self::with_config(host, username, password, ClientConfig::default())
    }

    /// Creates a client with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] when the HTTP client cannot be built.
    pub fn with_config(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            sid: None,
            config,
            transport,
        })
    }

    /// Seeds the client with a known session token, skipping the first login.
    #[must_use]
    pub fn with_session_id(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The cached session token, if logged in.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// Forgets the cached session token; the next call logs in again.
    pub fn invalidate_session(&mut self) {
        self.sid = None;
    }

    /// Returns the session token, logging in first if none (or an empty one)
    /// is cached.
    ///
    /// Posts `user` and the base64-encoded `pass` to `misc/login`. A cached
    /// token is returned without any request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Authentication`] when the server rejects the login,
    /// [`ApiError::InvalidResponse`] when it answers without a `sid`, and
    /// transport errors as-is.
    pub async fn authenticate(&mut self) -> Result<&str, ApiError> {
        if self.sid.as_deref().is_none_or(str::is_empty) {
            let credentials = Params::new()
                .with("user", &self.username)
                .with("pass", BASE64.encode(self.password.as_bytes()));
            let response = self.misc_login(credentials).await.map_err(|error| match error {
                ApiError::Request { code, reason, .. } => ApiError::authentication(code, reason),
                other => other,
            })?;
            let Some(sid) = response
                .get_str(SESSION_FIELD)
                .filter(|sid| !sid.is_empty())
            else {
                return Err(ApiError::invalid_response(
                    self.uri("misc", "login")?,
                    "login response has no `sid`",
                ));
            };
            info!(host = %self.host, user = %self.username, "logged in");
            self.sid = Some(sid.to_string());
        }
        Ok(self.sid.as_deref().unwrap_or_default())
    }

    /// Raw `misc/login` call; no session token is attached.
    ///
    /// [`authenticate`](Self::authenticate) builds the credentials and caches
    /// the resulting token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] for a non-zero envelope code and transport
    /// errors as-is.
    pub async fn misc_login(&self, params: Params) -> Result<ApiResponse, ApiError> {
        let uri = self.uri("misc", "login")?;
        let body = self.transport.post_form(&uri, &params).await?;
        parse_envelope(&uri, body).inspect_err(|error| log_api_error(&uri, error))
    }

    /// Calls `group/action` with `params` plus the session token.
    ///
    /// Logs in first if needed. A caller-supplied `sid` is replaced by the
    /// client's token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] for non-200 statuses,
    /// [`ApiError::Request`] for non-zero envelope codes, and any
    /// authentication failure.
    #[instrument(skip(self, params))]
    pub async fn call_endpoint(
        &mut self,
        group: &str,
        action: &str,
        params: Params,
    ) -> Result<ApiResponse, ApiError> {
        let uri = self.uri(group, action)?;
        let params = self.with_session(params).await?;
        let body = self.transport.post_form(&uri, &params).await?;
        parse_envelope(&uri, body).inspect_err(|error| log_api_error(&uri, error))
    }

    /// Like [`call_endpoint`](Self::call_endpoint), as a multipart upload with
    /// `file` under the `file[]` field.
    ///
    /// # Errors
    ///
    /// Same as [`call_endpoint`](Self::call_endpoint).
    #[instrument(skip(self, params, file), fields(file_name = %file.file_name))]
    pub async fn call_endpoint_with_file(
        &mut self,
        group: &str,
        action: &str,
        params: Params,
        file: FileUpload,
    ) -> Result<ApiResponse, ApiError> {
        let uri = self.uri(group, action)?;
        let params = self.with_session(params).await?;
        let body = self.transport.post_multipart(&uri, &params, file).await?;
        parse_envelope(&uri, body).inspect_err(|error| log_api_error(&uri, error))
    }

    async fn with_session(&mut self, params: Params) -> Result<Params, ApiError> {
        let sid = self.authenticate().await?.to_string();
        debug!(fields = params.len(), "attaching session token");
        Ok(params.with(SESSION_FIELD, sid))
    }

    fn uri(&self, group: &str, action: &str) -> Result<String, ApiError> {
        endpoint_uri(
            self.config.scheme(),
            &self.host,
            self.config.app_name(),
            self.config.api_version(),
            group,
            action,
        )
    }
}

fn log_api_error(uri: &str, error: &ApiError) {
    if let Some(code) = error.api_code() {
        warn!(uri, code, error = %error, "API returned an error envelope");
    }
}
