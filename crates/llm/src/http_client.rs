//! HTTP Client Factory
//!
//! Builds the reqwest clients shared by hosted providers and remote scorers.

use std::time::Duration;

use super::types::{LlmError, LlmResult};

/// Connect timeout applied to every client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a `reqwest::Client` with an optional proxy and request timeout.
///
/// - `Some(proxy_url)` -> route all traffic through the proxy
/// - `None` -> explicitly disable proxy (`no_proxy`), ignoring env vars
pub fn build_http_client(
    proxy_url: Option<&str>,
    timeout: Option<Duration>,
) -> LlmResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().connect_timeout(CONNECT_TIMEOUT);

    match proxy_url {
        Some(url) => {
            let proxy = reqwest::Proxy::all(url).map_err(|e| LlmError::InvalidRequest {
                message: format!("Invalid proxy URL {}: {}", url, e),
            })?;
            builder = builder.proxy(proxy);
        }
        None => {
            builder = builder.no_proxy();
        }
    }

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| LlmError::Other {
        message: format!("Failed to build HTTP client: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client_no_proxy() {
        assert!(build_http_client(None, None).is_ok());
    }

    #[test]
    fn test_build_http_client_with_proxy_and_timeout() {
        let client = build_http_client(
            Some("socks5://127.0.0.1:1080"),
            Some(Duration::from_secs(10)),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_proxy_url_is_rejected() {
        let err = build_http_client(Some("not a url"), None).unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest { .. }));
    }
}
