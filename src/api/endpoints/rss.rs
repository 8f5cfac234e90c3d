//! `Rss/*` endpoints: feeds and their download jobs.

use crate::api::{ApiError, ApiResponse, DownloadStation, Params};

impl DownloadStation {
    /// `rss/add`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn rss_add(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("rss", "add", extra).await
    }

    /// `rss/query`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn rss_query(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("rss", "query", extra).await
    }

    /// `rss/update`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn rss_update(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("rss", "update", extra).await
    }

    /// `rss/remove`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn rss_remove(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("rss", "remove", extra).await
    }

    /// Lists the items of one feed.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn rss_query_feed(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("rss", "query_feed", extra).await
    }

    /// Refreshes a feed from its source.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn rss_update_feed(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("rss", "update_feed", extra).await
    }

    /// `rss/add_job`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn rss_add_job(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("rss", "add_job", extra).await
    }

    /// `rss/update_job`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn rss_update_job(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("rss", "update_job", extra).await
    }

    /// `rss/remove_job`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn rss_remove_job(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("rss", "remove_job", extra).await
    }
}
