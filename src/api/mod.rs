//! Download Station HTTP API client.
//!
//! Every endpoint is a POST to
//! `{scheme}://{host}/downloadstation/V4/{Group}/{Action}` carrying form
//! fields (multipart when a torrent is uploaded) plus the session token `sid`.
//! Every response is a JSON envelope `{"error": 0, "reason": "", ...}`;
//! a non-zero `error` becomes [`ApiError::Request`].
//!
//! # Example
//!
//! ```no_run
//! use downloadstation_core::{DownloadStation, Params, TaskQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut station = DownloadStation::new("nas.local:8080", "admin", "secret")?;
//! station
//!     .task_add_url("magnet:?xt=urn:btih:abc", "/share/Download", None, Params::new())
//!     .await?;
//! let tasks = station
//!     .task_query(&TaskQuery::new().sorted_by("name", true), Params::new())
//!     .await?;
//! println!("{} tasks", tasks.get_i64("total").unwrap_or_default());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod endpoints;
mod error;
mod params;
mod response;
mod torrent;
mod transport;
mod uri;

pub use client::{DownloadStation, SESSION_FIELD};
pub use config::{
    CONNECT_TIMEOUT_SECS, ClientConfig, DEFAULT_API_VERSION, DEFAULT_APP_NAME, DEFAULT_SCHEME,
    READ_TIMEOUT_SECS,
};
pub use endpoints::{DEFAULT_TASK_QUERY_LIMIT, SORT_ASCENDING, SORT_DESCENDING, TaskQuery};
pub use error::{ApiError, known_error_label};
pub use params::Params;
pub use response::ApiResponse;
pub use torrent::TorrentSource;
pub use transport::{FILE_FIELD_NAME, FileUpload, HttpTransport};
pub use uri::{capitalize_segment, endpoint_uri};

