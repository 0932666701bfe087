mod session;

#[cfg(test)]
pub mod fake_portal;

use std::time::Duration;

use reqwest::{Client, Error as RequestError};
use tracing::{instrument, Level};
use url::Url;

pub use session::Session;

/// The portal gives no liveness guarantee, so every request is bounded.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A fresh client with its own cookie jar. Cookies never outlive the client.
pub fn make_client() -> Result<Client, RequestError> {
    Client::builder()
        .cookie_store(true)
        .gzip(true)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

#[instrument(skip(client, url), fields(url = %url), level = Level::TRACE)]
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, RequestError> {
    let start = std::time::Instant::now();
    let response = client.get(url.clone()).send().await?;
    let text = response.text().await?;
    log::trace!("Got text of {url} in \t {:?}", start.elapsed());
    Ok(text)
}
