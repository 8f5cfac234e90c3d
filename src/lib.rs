//! Download Station Core Library
//!
//! Client for the QNAP Download Station HTTP API: session login plus task,
//! account, addon, RSS and configuration management.
//!
//! # Architecture
//!
//! - [`api`] - the [`DownloadStation`] client, request parameters, the response
//!   envelope view and the error type
//!
//! The client dispatches every call through one path: compose the endpoint
//! URI, attach the session token, POST, and interpret the JSON envelope.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
mod user_agent;

// Re-export commonly used types
pub use api::{
    ApiError, ApiResponse, ClientConfig, DownloadStation, FileUpload, Params, TaskQuery,
    TorrentSource, known_error_label,
};
