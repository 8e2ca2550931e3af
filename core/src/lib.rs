//! Synchronous JSON fetch helper.
//!
//! # Overview
//! Issues GET/POST/PUT/DELETE requests with an optional JSON body and
//! returns the response body parsed as JSON (`null` when empty). Failed
//! requests are normalized from a JSON error-list body into a single
//! `FetchError::Rejected` whose message is the newline-joined list.
//!
//! # Design
//! - `JsonClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_response` consumes an `HttpResponse`. No I/O happens there.
//! - `Transport` is the only I/O seam; `UreqTransport` is the default.
//! - `Fetcher` wires the two together for one-call use.
//! - Every method takes `Option<&T>` as its body. `None` sends no body.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod transport;
pub mod types;

pub use client::JsonClient;
pub use config::FetcherConfig;
pub use error::{FetchError, TransportError};
pub use fetcher::Fetcher;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{ErrorEntry, NO_BODY};
