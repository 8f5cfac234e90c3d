//! Torrent payloads for `task/add_torrent`.

use std::fmt;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::ApiError;
use super::transport::FileUpload;

const DEFAULT_TORRENT_FILE_NAME: &str = "upload.torrent";

/// Where the torrent bytes come from.
///
/// A [`Path`](TorrentSource::Path) is opened by the client and closed before
/// the upload is sent; a [`Stream`](TorrentSource::Stream) is owned by the
/// client and dropped on every exit path, success or failure.
pub enum TorrentSource {
    /// A torrent file on disk.
    Path(PathBuf),
    /// An already-open byte stream.
    Stream {
        /// File name reported to the server.
        file_name: String,
        /// The stream; read to the end, then dropped.
        reader: Box<dyn AsyncRead + Send + Unpin>,
    },
    /// Torrent contents already in memory.
    Bytes {
        /// File name reported to the server.
        file_name: String,
        /// The torrent contents.
        data: Vec<u8>,
    },
}

impl TorrentSource {
    /// A torrent file on disk.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// An already-open byte stream.
    pub fn stream(
        file_name: impl Into<String>,
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self::Stream {
            file_name: file_name.into(),
            reader: Box::new(reader),
        }
    }

    /// In-memory torrent contents.
    pub fn bytes(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Reads the whole payload into an upload part.
    ///
    /// The file handle or stream is scoped to this call and released before it
    /// returns, whether reading succeeds or not.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] when the file cannot be opened or read.
    pub(crate) async fn into_upload(self) -> Result<FileUpload, ApiError> {
        match self {
            Self::Path(path) => {
                let data = read_file(&path).await?;
                Ok(FileUpload {
                    file_name: file_name_of(&path),
                    data,
                })
            }
            Self::Stream {
                file_name,
                mut reader,
            } => {
                let mut data = Vec::new();
                let read = reader.read_to_end(&mut data).await;
                drop(reader);
                read.map_err(|e| ApiError::io(PathBuf::from(&file_name), e))?;
                Ok(FileUpload { file_name, data })
            }
            Self::Bytes { file_name, data } => Ok(FileUpload { file_name, data }),
        }
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, ApiError> {
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| ApiError::io(path, e))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .await
        .map_err(|e| ApiError::io(path, e))?;
    Ok(data)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_TORRENT_FILE_NAME)
        .to_string()
}

impl fmt::Debug for TorrentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Stream { file_name, .. } => f
                .debug_struct("Stream")
                .field("file_name", file_name)
                .finish_non_exhaustive(),
            Self::Bytes { file_name, data } => f
                .debug_struct("Bytes")
                .field("file_name", file_name)
                .field("len", &data.len())
                .finish(),
        }
    }
}

impl From<PathBuf> for TorrentSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for TorrentSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}
