//! One-call JSON requests: build, execute, parse.

use serde::Serialize;
use serde_json::Value;

use crate::client::JsonClient;
use crate::config::FetcherConfig;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::{Transport, UreqTransport};

/// Pairs a `JsonClient` with a `Transport`.
///
/// Every call is independent: no retries, no caching, no timeout beyond
/// whatever the transport enforces.
#[derive(Debug, Clone)]
pub struct Fetcher<T = UreqTransport> {
    client: JsonClient,
    transport: T,
}

impl Fetcher<UreqTransport> {
    pub fn new(client: JsonClient) -> Self {
        Self::with_transport(client, UreqTransport::new())
    }

    pub fn from_config(config: &FetcherConfig) -> Result<Self, FetchError> {
        Ok(Self::new(JsonClient::from_config(config)?))
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn with_transport(client: JsonClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &JsonClient {
        &self.client
    }

    pub fn get<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Value, FetchError> {
        self.request(HttpMethod::Get, url, headers, body)
    }

    pub fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Value, FetchError> {
        self.request(HttpMethod::Post, url, headers, body)
    }

    pub fn put<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Value, FetchError> {
        self.request(HttpMethod::Put, url, headers, body)
    }

    pub fn delete<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Value, FetchError> {
        self.request(HttpMethod::Delete, url, headers, body)
    }

    pub fn request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Value, FetchError> {
        let request = self.client.build_request(method, url, headers, body)?;
        self.send(request)
    }

    /// Execute an already-built request and parse its response.
    pub fn send(&self, request: HttpRequest) -> Result<Value, FetchError> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, has_body = request.body.is_some(), "sending request");

        let response = self.transport.execute(request).map_err(|err| {
            tracing::warn!(%method, %url, error = %err, "transport failed");
            FetchError::Transport(err)
        })?;
        tracing::debug!(%method, %url, status = response.status, "received response");

        self.client.parse_response(response)
    }
}
