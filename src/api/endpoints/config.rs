//! `Config/*` endpoints.

use crate::api::{ApiError, ApiResponse, DownloadStation, Params};

impl DownloadStation {
    /// Reads the Download Station settings.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn config_get(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("config", "get", extra).await
    }

    /// Writes the settings given in `extra`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn config_set(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("config", "set", extra).await
    }
}
