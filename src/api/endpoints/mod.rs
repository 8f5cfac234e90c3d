//! One thin wrapper per vendor endpoint.
//!
//! Each wrapper names the endpoint's well-known arguments and forwards an
//! `extra` [`Params`](crate::api::Params) verbatim; extra fields override the
//! named ones when keys collide.

mod account;
mod addon;
mod config;
mod misc;
mod rss;
mod task;

pub use task::{DEFAULT_TASK_QUERY_LIMIT, SORT_ASCENDING, SORT_DESCENDING, TaskQuery};
