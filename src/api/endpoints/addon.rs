//! `Addon/*` endpoints (search and hosting plug-ins).

use crate::api::{ApiError, ApiResponse, DownloadStation, Params};

impl DownloadStation {
    /// `addon/query`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn addon_query(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("addon", "query", extra).await
    }

    /// `addon/enable`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn addon_enable(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("addon", "enable", extra).await
    }

    /// `addon/verify`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn addon_verify(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("addon", "verify", extra).await
    }

    /// `addon/install`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn addon_install(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("addon", "install", extra).await
    }

    /// `addon/uninstall`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn addon_uninstall(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("addon", "uninstall", extra).await
    }

    /// Runs a search through the installed search addons.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn addon_search(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("addon", "search", extra).await
    }
}
