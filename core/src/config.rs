use std::env;

// Environment-driven settings for building a `JsonClient`.

pub const BASE_URL_VAR: &str = "FETCHER_BASE_URL";
pub const DEFAULT_HEADERS_VAR: &str = "FETCHER_DEFAULT_HEADERS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Origin that relative request URLs are resolved against.
    pub base_url: Option<String>,
    /// Headers sent with every request unless overridden per call.
    pub default_headers: Vec<(String, String)>,
}

impl FetcherConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            env::var(BASE_URL_VAR).ok().as_deref(),
            env::var(DEFAULT_HEADERS_VAR).ok().as_deref(),
        )
    }

    /// Build from the raw variable values; a blank base URL counts as unset.
    pub fn from_values(base_url: Option<&str>, default_headers: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let default_headers = default_headers.map(parse_headers).unwrap_or_default();
        Self {
            base_url,
            default_headers,
        }
    }
}

/// Parse `name:value` pairs separated by `;`. Entries without a colon or
/// with an empty name are skipped.
pub fn parse_headers(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let Some((name, value)) = entry.split_once(':') else {
                tracing::warn!(entry, "ignoring default header without a colon");
                return None;
            };
            let name = name.trim();
            if name.is_empty() {
                tracing::warn!(entry, "ignoring default header with an empty name");
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_trims_base_url_and_parses_headers() {
        let config = FetcherConfig::from_values(
            Some("  http://localhost:8080  "),
            Some("accept:application/json"),
        );
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(
            config.default_headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn blank_or_missing_values_leave_config_empty() {
        assert_eq!(FetcherConfig::from_values(Some("   "), Some("")), FetcherConfig::default());
        assert_eq!(FetcherConfig::from_values(None, None), FetcherConfig::default());
    }

    #[test]
    fn parses_semicolon_separated_pairs() {
        let headers = parse_headers("accept: application/json; x-csrf-token:abc123");
        assert_eq!(
            headers,
            vec![
                ("accept".to_string(), "application/json".to_string()),
                ("x-csrf-token".to_string(), "abc123".to_string()),
            ]
        );
    }

    #[test]
    fn skips_malformed_entries() {
        let headers = parse_headers("broken;;:novalue; ok:1;");
        assert_eq!(headers, vec![("ok".to_string(), "1".to_string())]);
    }

    #[test]
    fn value_may_contain_colons() {
        let headers = parse_headers("referer:http://localhost:8080/books");
        assert_eq!(headers[0].1, "http://localhost:8080/books");
    }
}
