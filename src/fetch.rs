//! Page fetch over libcurl.

use crate::error::PipelineError;
use std::time::Duration;

/// Fetches a page body as text.
///
/// Follows redirects and sends `user_agent` (a conventional browser string by
/// default, see the config). Non-2xx responses are failures. Body bytes are
/// decoded lossily as UTF-8; the HTML parser downstream is tolerant of that.
///
/// Runs synchronously in the current thread.
pub fn fetch_page(url: &str, user_agent: &str) -> Result<String, PipelineError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.useragent(user_agent)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(30))?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(PipelineError::Http {
            url: url.to_string(),
            status,
        });
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}
