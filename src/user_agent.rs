//! Default User-Agent string for API requests.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/downloadstation";

/// Default User-Agent for Download Station API requests.
#[must_use]
pub(crate) fn default_api_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("downloadstation/{version} (api-client; +{PROJECT_UA_URL})")
}
