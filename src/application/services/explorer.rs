//! Blockchain explorer API client
//!
//! Every public operation binds its parameters into one GET request through
//! [`ExplorerClient::request`], which also normalizes failures into
//! [`ApplicationError::Api`] or [`ApplicationError::Request`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Page, QueryParams, DEFAULT_POOLS_TIMESPAN};
use crate::infrastructure::traits::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// Client for the blockchain data REST API.
pub struct ExplorerClient {
    base_url: Url,
    http: Arc<dyn HttpClient>,
}

impl ExplorerClient {
    /// Bind a client to `base_url`.
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> ApplicationResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            ApplicationError::config(format!("invalid base URL '{}': {}", base_url, e))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApplicationError::config(format!(
                "invalid base URL '{}': not a hierarchical URL",
                base_url
            )));
        }
        Ok(Self {
            base_url: parsed,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve path segments and query onto the base URL.
    ///
    /// Segments are percent-encoded; a path prefix on the base URL is kept.
    pub fn endpoint_url(&self, segments: &[&str], query: &QueryParams) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        url
    }

    /// Issue one request and return the parsed JSON body unchanged.
    pub fn request(
        &self,
        method: HttpMethod,
        segments: &[&str],
        query: &QueryParams,
    ) -> ApplicationResult<Value> {
        let request = HttpRequest {
            method,
            url: self.endpoint_url(segments, query),
            headers: vec![("Content-Type".into(), "application/json".into())],
        };
        debug!("request: {} {}", method.as_str(), request.url);

        let response = self
            .http
            .send(&request)
            .map_err(ApplicationError::request)?;

        if !response.is_success() {
            return Err(failure_from_response(&response));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| ApplicationError::request(format!("invalid JSON response: {}", e)))
    }

    fn get(&self, segments: &[&str], query: QueryParams) -> ApplicationResult<Value> {
        self.request(HttpMethod::Get, segments, &query)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_balance(&self, address: &str) -> ApplicationResult<Value> {
        self.get(&["balance"], QueryParams::new().with("active", address))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_address_info(&self, address: &str, page: Page) -> ApplicationResult<Value> {
        self.get(&["rawaddr", address], page.to_query())
    }

    /// Same endpoint as [`Self::get_address_info`]; the CLI renders the `txs` list.
    #[instrument(level = "debug", skip(self))]
    pub fn list_transactions(&self, address: &str, page: Page) -> ApplicationResult<Value> {
        self.get(&["rawaddr", address], page.to_query())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_block(&self, block_hash: &str) -> ApplicationResult<Value> {
        self.get(&["rawblock", block_hash], QueryParams::new())
    }

    /// All blocks at `height` (more than one during a fork).
    #[instrument(level = "debug", skip(self))]
    pub fn get_block_by_height(&self, height: u64) -> ApplicationResult<Value> {
        let height = height.to_string();
        self.get(
            &["block-height", &height],
            QueryParams::new().with("format", "json"),
        )
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_latest_block(&self) -> ApplicationResult<Value> {
        self.get(&["latestblock"], QueryParams::new())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_unconfirmed_transactions(&self) -> ApplicationResult<Value> {
        self.get(
            &["unconfirmed-transactions"],
            QueryParams::new().with("format", "json"),
        )
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_transaction(&self, tx_hash: &str) -> ApplicationResult<Value> {
        self.get(&["rawtx", tx_hash], QueryParams::new())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_exchange_rates(&self) -> ApplicationResult<Value> {
        self.get(&["ticker"], QueryParams::new())
    }

    /// Convert `value` units of `currency` to BTC.
    #[instrument(level = "debug", skip(self))]
    pub fn convert_to_btc(&self, currency: &str, value: &str) -> ApplicationResult<Value> {
        self.get(
            &["tobtc"],
            QueryParams::new()
                .with("currency", currency)
                .with("value", value),
        )
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get_stats(&self) -> ApplicationResult<Value> {
        self.get(&["stats"], QueryParams::new().with("format", "json"))
    }

    /// Blocks mined per pool over `timespan` (default `5days`).
    #[instrument(level = "debug", skip(self))]
    pub fn get_pools(&self, timespan: Option<&str>) -> ApplicationResult<Value> {
        let timespan = timespan.unwrap_or(DEFAULT_POOLS_TIMESPAN);
        self.get(
            &["pools"],
            QueryParams::new()
                .with("timespan", timespan)
                .with("format", "json"),
        )
    }
}

/// Map a non-2xx response to an error, preferring the service's own message.
fn failure_from_response(response: &HttpResponse) -> ApplicationError {
    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        });

    match message {
        Some(message) => ApplicationError::Api { message },
        None => ApplicationError::request(format!("status code {}", response.status)),
    }
}
