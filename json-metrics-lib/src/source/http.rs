use crate::Result;
use ohno::IntoAppError;

const LOG_TARGET: &str = "      http";

/// Issue a single GET and buffer the whole response body.
///
/// The status code is not interpreted beyond a warning; the body is handed back
/// for parsing either way.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the request fails, or the body cannot be read
pub async fn get(url: &str, insecure: bool) -> Result<Vec<u8>> {
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(insecure)
        .build()
        .into_app_err("unable to create HTTP client")?;

    log::debug!(target: LOG_TARGET, "GET {url}");

    let response = client.get(url).send().await.into_app_err_with(|| format!("unable to fetch '{url}'"))?;

    let status = response.status();
    if !status.is_success() {
        log::warn!(target: LOG_TARGET, "GET {url} returned HTTP {status}");
    }

    let body = response.bytes().await.into_app_err_with(|| format!("unable to read response body from '{url}'"))?;
    Ok(body.to_vec())
}
