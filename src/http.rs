use std::time::Duration;

use anyhow::anyhow;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// Fixed HTTP Basic username; the caller only supplies the secret.
const BASIC_AUTH_USER: &str = "LIVEROOMAPP";

/// Overall per-request timeout enforced by the transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Thin transport adapter over reqwest: base URL joining, Basic auth default
/// headers and JSON body handling. No status is interpreted here; each
/// operation decides which codes are success.
#[derive(Clone)]
pub struct Http {
    base: String,
    client: reqwest::Client,
}

impl Http {
    pub fn new(url: &str, secret: &str) -> Result<Self> {
        let mut base = url.to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        url::Url::parse(&base).map_err(|e| Error::Client(e.into()))?;

        let encoded = STANDARD.encode(format!("{}:{}", BASIC_AUTH_USER, secret));
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", encoded))
                .map_err(|e| Error::Client(e.into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Http { base, client })
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Empty-body POST, used by the recording stop endpoint.
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).body("").send().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Decodes a 2xx body. A body that does not match the expected shape is a
/// local fault, not a server rejection.
pub async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| Error::Client(anyhow!("malformed response body: {} ({})", e, body)))
}

/// Maps a non-success status to `Error::Http`.
pub fn ensure_success(response: &Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::Http(status))
    }
}

/// Success for DELETE/evict style endpoints is exactly 204.
pub fn ensure_no_content(response: &Response) -> Result<()> {
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        Ok(())
    } else {
        Err(Error::Http(status))
    }
}
