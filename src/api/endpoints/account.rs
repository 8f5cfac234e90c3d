//! `Account/*` endpoints (remote site credentials).

use crate::api::{ApiError, ApiResponse, DownloadStation, Params};

impl DownloadStation {
    /// `account/add`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn account_add(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("account", "add", extra).await
    }

    /// `account/query`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn account_query(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("account", "query", extra).await
    }

    /// `account/update`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn account_update(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("account", "update", extra).await
    }

    /// `account/remove`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn account_remove(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("account", "remove", extra).await
    }
}
