//! `Task/*` endpoints: adding, listing and controlling downloads.

use crate::api::{ApiError, ApiResponse, DownloadStation, Params, TorrentSource};

/// Default page size for `task/query`.
pub const DEFAULT_TASK_QUERY_LIMIT: u64 = 65536;

/// Form key for the `task/query` offset.
const OFFSET_FIELD: &str = "form";

/// `direction` value sent when sorting with `reverse = true`.
pub const SORT_ASCENDING: &str = "AES";

/// `direction` value sent when sorting with `reverse = false`.
pub const SORT_DESCENDING: &str = "DESC";

/// Paging and ordering options for `task/query`.
///
/// The offset is sent under the `form` key.
///
/// Without a sort `field`, neither `field` nor `direction` is sent, whatever
/// `reverse` says; the server then applies its own order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Offset of the first task returned.
    pub from: Option<u64>,
    /// Maximum number of tasks returned.
    pub limit: u64,
    /// Field to sort by.
    pub field: Option<String>,
    /// Sort direction flag: `true` sends `AES`, `false` sends `DESC`.
    pub reverse: bool,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            from: None,
            limit: DEFAULT_TASK_QUERY_LIMIT,
            field: None,
            reverse: true,
        }
    }
}

impl TaskQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Sorts by `field`; see [`direction`](Self::direction) for `reverse`.
    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, reverse: bool) -> Self {
        self.field = Some(field.into());
        self.reverse = reverse;
        self
    }

    /// The `direction` value to send, or `None` when no sort field is set.
    #[must_use]
    pub fn direction(&self) -> Option<&'static str> {
        self.field.as_ref()?;
        Some(if self.reverse {
            SORT_ASCENDING
        } else {
            SORT_DESCENDING
        })
    }

    /// Form fields for this query.
    #[must_use]
    pub fn to_params(&self) -> Params {
        Params::new()
            .with_opt(OFFSET_FIELD, self.from)
            .with("limit", self.limit)
            .with_opt("field", self.field.as_deref())
            .with_opt("direction", self.direction())
    }
}

fn hash_params(hash: &str, extra: Params) -> Params {
    Params::new().with("hash", hash).merged(extra)
}

fn destination_params(move_path: &str, temp_path: Option<&str>) -> Params {
    Params::new()
        .with("temp", temp_path.unwrap_or(move_path))
        .with("move", move_path)
}

impl DownloadStation {
    /// `task/status`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_status(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "status", extra).await
    }

    /// Lists tasks.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_query(
        &mut self,
        query: &TaskQuery,
        extra: Params,
    ) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "query", query.to_params().merged(extra))
            .await
    }

    /// `task/detail`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_detail(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "detail", extra).await
    }

    /// Adds a download by URL (http, ftp or magnet).
    ///
    /// `temp_path` defaults to `move_path`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_add_url(
        &mut self,
        url: &str,
        move_path: &str,
        temp_path: Option<&str>,
        extra: Params,
    ) -> Result<ApiResponse, ApiError> {
        let params = Params::new()
            .with("url", url)
            .merged(destination_params(move_path, temp_path))
            .merged(extra);
        self.call_endpoint("task", "add_url", params).await
    }

    /// Uploads a torrent and adds it as a task.
    ///
    /// A path source is opened here and closed before the upload is sent; the
    /// source is released on every exit path. `temp_path` defaults to
    /// `move_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] when a path source cannot be read; otherwise
    /// see [`DownloadStation::call_endpoint`].
    pub async fn task_add_torrent(
        &mut self,
        source: TorrentSource,
        move_path: &str,
        temp_path: Option<&str>,
        extra: Params,
    ) -> Result<ApiResponse, ApiError> {
        let upload = source.into_upload().await?;
        let params = destination_params(move_path, temp_path).merged(extra);
        self.call_endpoint_with_file("task", "add_torrent", params, upload)
            .await
    }

    /// `task/start`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_start(&mut self, hash: &str, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "start", hash_params(hash, extra))
            .await
    }

    /// `task/stop`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_stop(&mut self, hash: &str, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "stop", hash_params(hash, extra))
            .await
    }

    /// `task/pause`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_pause(&mut self, hash: &str, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "pause", hash_params(hash, extra))
            .await
    }

    /// `task/remove`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_remove(
        &mut self,
        hash: &str,
        extra: Params,
    ) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "remove", hash_params(hash, extra))
            .await
    }

    /// `task/priority`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_priority(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "priority", extra).await
    }

    /// Lists the files inside a task.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_get_file(
        &mut self,
        hash: &str,
        extra: Params,
    ) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "get_file", hash_params(hash, extra))
            .await
    }

    /// `task/set_file`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_set_file(&mut self, extra: Params) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "set_file", extra).await
    }

    /// `task/get_torrent_file`.
    ///
    /// # Errors
    ///
    /// See [`DownloadStation::call_endpoint`].
    pub async fn task_get_torrent_file(
        &mut self,
        extra: Params,
    ) -> Result<ApiResponse, ApiError> {
        self.call_endpoint("task", "get_torrent_file", extra).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_query_defaults() {
        let params = TaskQuery::new().to_params();
        assert_eq!(params.get("limit"), Some("65536"));
        assert!(!params.contains("form"));
        assert!(!params.contains("from"));
        assert!(!params.contains("field"));
        assert!(!params.contains("direction"));
    }

    #[test]
    fn test_task_query_without_field_omits_direction_for_both_flags() {
        for reverse in [true, false] {
            let query = TaskQuery {
                reverse,
                ..TaskQuery::default()
            };
            assert_eq!(query.direction(), None);
            assert!(!query.to_params().contains("direction"));
        }
    }

    #[test]
    fn test_task_query_reverse_true_is_ascending() {
        let params = TaskQuery::new().sorted_by("name", true).to_params();
        assert_eq!(params.get("field"), Some("name"));
        assert_eq!(params.get("direction"), Some("AES"));
    }

    #[test]
    fn test_task_query_reverse_false_is_descending() {
        let params = TaskQuery::new().sorted_by("size", false).to_params();
        assert_eq!(params.get("direction"), Some("DESC"));
    }

    #[test]
    fn test_task_query_paging() {
        let params = TaskQuery::new().with_from(20).with_limit(10).to_params();
        assert_eq!(params.get("form"), Some("20"));
        assert!(!params.contains("from"));
        assert_eq!(params.get("limit"), Some("10"));
    }

    #[test]
    fn test_destination_params_temp_defaults_to_move() {
        let params = destination_params("/share/Download", None);
        assert_eq!(params.get("temp"), Some("/share/Download"));
        assert_eq!(params.get("move"), Some("/share/Download"));

        let params = destination_params("/share/Download", Some("/share/tmp"));
        assert_eq!(params.get("temp"), Some("/share/tmp"));
    }

    #[test]
    fn test_hash_params_extra_overrides() {
        let params = hash_params("abc", Params::new().with("hash", "def").with("x", 1));
        assert_eq!(params.get("hash"), Some("def"));
        assert_eq!(params.get("x"), Some("1"));
    }
}
