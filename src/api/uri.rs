//! Endpoint URI composition.

use url::Url;

use super::error::ApiError;

/// Converts an underscore-separated name into the API's path segment form.
///
/// Each part gets its first character upper-cased and the rest lower-cased,
/// then the parts are concatenated: `add_torrent` becomes `AddTorrent`.
#[must_use]
pub fn capitalize_segment(name: &str) -> String {
    name.split('_').map(capitalize_part).collect()
}

fn capitalize_part(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Builds `{scheme}://{host}/{app_name}/{api_version}/{Group}/{Action}`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidUrl`] when the composed string is not a valid URL
/// (for example an empty host).
pub fn endpoint_uri(
    scheme: &str,
    host: &str,
    app_name: &str,
    api_version: &str,
    group: &str,
    action: &str,
) -> Result<String, ApiError> {
    let uri = format!(
        "{scheme}://{host}/{app_name}/{api_version}/{}/{}",
        capitalize_segment(group),
        capitalize_segment(action)
    );
    match Url::parse(&uri) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(uri),
        _ => Err(ApiError::invalid_url(uri)),
    }
}
