//! Wire DTOs consumed by the fetch helper.
//!
//! # Design
//! Only the failure path has a fixed schema. Servers built on Spring's
//! validation layer answer a rejected request with a list of `ObjectError`
//! objects; the helper reads `defaultMessage` and ignores every other field
//! (`codes`, `arguments`, `objectName`, `code`).

use serde::{Deserialize, Serialize};

/// One entry of an error-list response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEntry {
    #[serde(rename = "defaultMessage")]
    pub default_message: String,
}

/// Body type to pass as `None` when a request carries no body.
///
/// ```
/// use fetcher_core::{JsonClient, NO_BODY};
///
/// let client = JsonClient::new();
/// let req = client.build_get("http://localhost:3000/api/books", &[], NO_BODY).unwrap();
/// assert!(req.body.is_none());
/// ```
pub const NO_BODY: Option<&'static serde_json::Value> = None;
