//! Stateless HTTP request builder and response parser for JSON APIs.
//!
//! # Design
//! `JsonClient` holds only an optional base URL and a list of default
//! headers; it carries no mutable state between calls. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a single
//! `parse_response` that consumes an `HttpResponse`. A `Transport` executes
//! the round-trip in between, keeping this type deterministic and free of
//! I/O.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::FetcherConfig;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::ErrorEntry;

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";

/// Synchronous, stateless request builder and response parser.
#[derive(Debug, Clone, Default)]
pub struct JsonClient {
    base_url: Option<Url>,
    default_headers: Vec<(String, String)>,
}

impl JsonClient {
    /// A client without a base URL; every request URL must be absolute.
    pub fn new() -> Self {
        Self::default()
    }

    /// A client that resolves relative request URLs against `base_url`.
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|source| FetchError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            base_url: Some(base_url),
            default_headers: Vec::new(),
        })
    }

    pub fn from_config(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = match &config.base_url {
            Some(base_url) => Self::with_base_url(base_url)?,
            None => Self::new(),
        };
        Ok(config
            .default_headers
            .iter()
            .fold(client, |client, (name, value)| client.default_header(name, value)))
    }

    /// Add a header sent with every request. A per-call header with the
    /// same name replaces it.
    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        set_header(&mut self.default_headers, name, value);
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_ref().map(Url::as_str)
    }

    pub fn build_get<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&T>,
    ) -> Result<HttpRequest, FetchError> {
        self.build_request(HttpMethod::Get, url, headers, body)
    }

    pub fn build_post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&T>,
    ) -> Result<HttpRequest, FetchError> {
        self.build_request(HttpMethod::Post, url, headers, body)
    }

    pub fn build_put<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&T>,
    ) -> Result<HttpRequest, FetchError> {
        self.build_request(HttpMethod::Put, url, headers, body)
    }

    pub fn build_delete<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&T>,
    ) -> Result<HttpRequest, FetchError> {
        self.build_request(HttpMethod::Delete, url, headers, body)
    }

    /// Build a request for any method. `None` produces a request with no
    /// body; `Some` is serialized to JSON and tagged `application/json`
    /// unless the caller already set a content type.
    pub fn build_request<T: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&T>,
    ) -> Result<HttpRequest, FetchError> {
        let url = self.resolve_url(url)?;

        let mut all_headers = self.default_headers.clone();
        for (name, value) in headers {
            set_header(&mut all_headers, name, value);
        }

        let body = body
            .map(|value| {
                serde_json::to_string(value).map_err(|e| FetchError::Serialization(e.to_string()))
            })
            .transpose()?;
        if body.is_some() && !has_header(&all_headers, CONTENT_TYPE) {
            all_headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        }

        Ok(HttpRequest {
            method,
            url,
            headers: all_headers,
            body,
        })
    }

    /// Turn `url` into an absolute URL, joining relative paths onto the
    /// base URL the way a browser resolves them against the page origin.
    pub fn resolve_url(&self, url: &str) -> Result<String, FetchError> {
        let invalid = |source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        };
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute.into()),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base.join(url).map(Into::into).map_err(invalid),
                None => Err(invalid(url::ParseError::RelativeUrlWithoutBase)),
            },
            Err(e) => Err(invalid(e)),
        }
    }

    /// Interpret a response.
    ///
    /// 2xx: the body parsed as JSON, or `Value::Null` when empty.
    /// Anything else: `Rejected` with the extracted messages when the body is
    /// an error list, `MalformedErrorBody` otherwise.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, FetchError> {
        if !response.is_success() {
            return Err(classify_failure(response));
        }
        if response.body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}

/// Map a non-success response to `Rejected` or `MalformedErrorBody`.
fn classify_failure(response: HttpResponse) -> FetchError {
    let HttpResponse { status, body, .. } = response;
    if body.is_empty() {
        tracing::warn!(status, "error response has an empty body");
        return FetchError::MalformedErrorBody {
            status,
            body,
            reason: "empty body".to_string(),
        };
    }
    match serde_json::from_str::<Vec<ErrorEntry>>(&body) {
        Ok(entries) => {
            let messages: Vec<String> = entries.into_iter().map(|e| e.default_message).collect();
            tracing::warn!(status, count = messages.len(), "request rejected");
            FetchError::Rejected { status, messages }
        }
        Err(e) => {
            tracing::warn!(status, error = %e, "error response is not an error list");
            FetchError::MalformedErrorBody {
                status,
                body,
                reason: e.to_string(),
            }
        }
    }
}

fn has_header(headers: &[(String, String)], name: &str) -> bool {
    headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}
