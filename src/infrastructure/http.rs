//! Blocking reqwest transport

use std::error::Error as StdError;
use std::time::Duration;

use tracing::debug;

use crate::infrastructure::traits::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::infrastructure::{InfraError, InfraResult};

/// `HttpClient` backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests fail after `timeout`.
    pub fn new(timeout: Duration) -> InfraResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InfraError::HttpClient {
                message: error_chain(&e),
            })?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, String> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
        };
        debug!("{} {}", request.method.as_str(), request.url);

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(|e| error_chain(&e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| error_chain(&e))?;
        debug!("status={} body_len={}", status, body.len());

        Ok(HttpResponse { status, body })
    }
}

/// Join an error with its sources so the root cause is visible.
///
/// reqwest's top-level message ("error sending request for url ...") hides
/// the actual reason ("Connection refused") in the source chain.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
