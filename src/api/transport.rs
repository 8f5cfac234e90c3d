//! HTTP transport for API calls.
//!
//! Owns the reqwest client (with its persistent cookie jar) and turns a POST
//! into a decoded JSON body, mapping transport-level failures onto
//! [`ApiError`]. Envelope interpretation happens one layer up.

use std::panic::{AssertUnwindSafe, catch_unwind, set_hook, take_hook};
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Proxy, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::config::ClientConfig;
use super::error::ApiError;
use super::params::Params;

/// Multipart field name the API expects uploaded files under.
pub const FILE_FIELD_NAME: &str = "file[]";

/// A file payload for multipart uploads.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// File name reported in the multipart part.
    pub file_name: String,
    /// File contents.
    pub data: Vec<u8>,
}

/// Reusable HTTP session: one reqwest client plus its cookie jar.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    cookie_jar: Arc<Jar>,
}

impl HttpTransport {
    /// Builds a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] when reqwest cannot build a client.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let cookie_jar = Arc::new(Jar::default());
        let client = build_client(config, Arc::clone(&cookie_jar))?;
        Ok(Self { client, cookie_jar })
    }

    /// The cookie jar shared by every request on this transport.
    #[must_use]
    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.cookie_jar
    }

    /// POSTs `params` form-encoded and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] for any status other than 200, and
    /// network/timeout/decode errors otherwise.
    pub async fn post_form(&self, url: &str, params: &Params) -> Result<Value, ApiError> {
        debug!(url, fields = ?params.keys().collect::<Vec<_>>(), "POST form");
        let request = self.client.post(url).form(params.as_slice());
        self.dispatch(url, request).await
    }

    /// POSTs `params` as multipart text parts plus `file` under `file[]`.
    ///
    /// # Errors
    ///
    /// Same as [`post_form`](Self::post_form).
    pub async fn post_multipart(
        &self,
        url: &str,
        params: &Params,
        file: FileUpload,
    ) -> Result<Value, ApiError> {
        debug!(
            url,
            fields = ?params.keys().collect::<Vec<_>>(),
            file_name = %file.file_name,
            bytes = file.data.len(),
            "POST multipart"
        );
        let mut form = Form::new();
        for (key, value) in params.iter() {
            form = form.text(key.to_string(), value.to_string());
        }
        let part = Part::bytes(file.data).file_name(file.file_name);
        form = form.part(FILE_FIELD_NAME, part);

        let request = self.client.post(url).multipart(form);
        self.dispatch(url, request).await
    }

    async fn dispatch(&self, url: &str, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::timeout(url)
            } else {
                ApiError::network(url, e)
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::transport(url, status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                ApiError::invalid_response(url, format!("body is not JSON: {e}"))
            } else if e.is_timeout() {
                ApiError::timeout(url)
            } else {
                ApiError::network(url, e)
            }
        })
    }
}

fn build_client(config: &ClientConfig, cookie_jar: Arc<Jar>) -> Result<Client, ApiError> {
    match try_build_client(config, Arc::clone(&cookie_jar), false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; retry with env-proxy lookup only.
            warn!(
                "HTTP client builder panicked while loading system proxy settings; retrying with env-proxy fallback"
            );
            match try_build_client(config, cookie_jar, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Build(error)) => Err(ApiError::ClientBuild {
                    message: error.to_string(),
                }),
                Err(BuildClientFailure::Panic) => Err(ApiError::ClientBuild {
                    message: "client builder panicked while applying env-proxy fallback"
                        .to_string(),
                }),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(ApiError::ClientBuild {
            message: error.to_string(),
        }),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

// `catch_unwind` does not suppress panic-hook output; silence it while the
// guarded build runs.
static CLIENT_BUILD_PANIC_HOOK_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn try_build_client(
    config: &ClientConfig,
    cookie_jar: Arc<Jar>,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind_silent(AssertUnwindSafe(move || {
        #[cfg(test)]
        maybe_inject_client_build_panic();

        let mut builder = base_client_builder(config, cookie_jar);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn catch_unwind_silent<F, T>(operation: F) -> Result<T, Box<dyn std::any::Any + Send + 'static>>
where
    F: FnOnce() -> T + std::panic::UnwindSafe,
{
    let _panic_hook_guard = CLIENT_BUILD_PANIC_HOOK_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let previous_hook = take_hook();
    set_hook(Box::new(|_| {}));
    let outcome = catch_unwind(operation);
    set_hook(previous_hook);
    outcome
}

fn base_client_builder(config: &ClientConfig, cookie_jar: Arc<Jar>) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs()))
        .timeout(Duration::from_secs(config.read_timeout_secs()))
        .gzip(true)
        .user_agent(config.user_agent())
        .cookie_provider(cookie_jar)
}

const HTTPS_PROXY_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"];
const HTTP_PROXY_VARS: [&str; 4] = ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"];

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    let lookup = |name: &str| std::env::var(name).ok();
    if let Some(proxy) = find_first_proxy_var(&HTTPS_PROXY_VARS, lookup)
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = find_first_proxy_var(&HTTP_PROXY_VARS, lookup)
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

/// First non-blank value among `names`, in order.
fn find_first_proxy_var(
    names: &[&str],
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    names.iter().find_map(|name| {
        lookup(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

#[cfg(test)]
thread_local! {
    static CLIENT_BUILD_PANIC_INJECTION_COUNT: std::cell::Cell<usize> =
        const { std::cell::Cell::new(0) };
}

#[cfg(test)]
fn inject_client_build_panics(count: usize) {
    CLIENT_BUILD_PANIC_INJECTION_COUNT.with(|remaining| remaining.set(count));
}

#[cfg(test)]
fn maybe_inject_client_build_panic() {
    let remaining = CLIENT_BUILD_PANIC_INJECTION_COUNT.with(std::cell::Cell::get);
    if remaining > 0 {
        CLIENT_BUILD_PANIC_INJECTION_COUNT.with(|count| count.set(remaining - 1));
        panic!("injected HTTP client builder panic");
    }
}
