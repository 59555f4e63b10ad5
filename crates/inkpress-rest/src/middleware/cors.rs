//! CORS policy built from `server.cors_origins`.

use axum::http::{HeaderValue, Method};
use inkpress_config::ServerConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// One entry of the allowed-origin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    /// `localhost` on any port, over http or https.
    Localhost,
    /// `*.example.com`: any subdomain of the suffix, over http or https.
    Wildcard(String),
    /// A full origin including its scheme, such as `chrome-extension://id`.
    Exact(String),
    /// A bare host, accepted over http or https.
    Host(String),
}

impl OriginPattern {
    /// Parses a configured origin pattern.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "localhost" {
            Self::Localhost
        } else if let Some(suffix) = raw.strip_prefix('*') {
            Self::Wildcard(suffix.to_string())
        } else if raw.contains("://") {
            Self::Exact(raw.trim_end_matches('/').to_string())
        } else {
            Self::Host(raw.to_string())
        }
    }

    fn matches(&self, origin: &str) -> bool {
        if let Self::Exact(expected) = self {
            return origin == expected;
        }

        let Some(host) = origin
            .strip_prefix("https://")
            .or_else(|| origin.strip_prefix("http://"))
        else {
            return false;
        };

        match self {
            Self::Localhost => host
                .strip_prefix("localhost")
                .is_some_and(|rest| rest.is_empty() || is_port(rest)),
            Self::Wildcard(suffix) => host.len() > suffix.len() && host.ends_with(suffix.as_str()),
            Self::Host(expected) => host == expected,
            Self::Exact(_) => false,
        }
    }
}

fn is_port(rest: &str) -> bool {
    rest.strip_prefix(':')
        .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

/// Returns true if `origin` matches any of the patterns.
pub fn origin_allowed(origin: &str, patterns: &[OriginPattern]) -> bool {
    patterns.iter().any(|pattern| pattern.matches(origin))
}

/// Creates a CORS layer based on server configuration.
///
/// Disallowed origins get no CORS headers, so browsers block the response.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if !config.cors_enabled {
        return CorsLayer::new();
    }
    if config.cors_origins.iter().any(|o| o.trim() == "*") {
        return CorsLayer::permissive();
    }

    let patterns: Vec<OriginPattern> = config.cors_origins.iter().map(|o| OriginPattern::parse(o)).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin.to_str().is_ok_and(|origin| origin_allowed(origin, &patterns))
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
