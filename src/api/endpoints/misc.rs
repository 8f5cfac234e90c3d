//! `Misc/*` endpoints. `misc/login` lives on the client itself.

use tracing::debug;

use crate::api::{ApiError, ApiResponse, DownloadStation, Params};

impl DownloadStation {
    /// Lists directories on the NAS.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn misc_dir(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("misc", "dir", extra).await
    }

    /// Reads environment information (firmware, paths).
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn misc_env(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("misc", "env", extra).await
    }

    /// Ends the session.
    ///
    /// On success the cached token is dropped, so a later call logs in again.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn misc_logout(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        let response = self.call_endpoint("misc", "logout", extra).await?;
        debug!("session closed; clearing cached token");
        self.invalidate_session();
        Ok(response)
    }

    /// `misc/socks_5` (sent as `Misc/Socks5`).
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn misc_socks_5(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("misc", "socks_5", extra).await
    }
}
