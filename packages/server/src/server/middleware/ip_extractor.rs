use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, SocketAddr};

/// Extension key for storing extracted IP address
#[derive(Clone, Debug)]
pub struct ClientIp(pub IpAddr);

/// Middleware to extract client IP address from request
///
/// Priority:
/// 1. X-Forwarded-For header (for requests through proxies; first entry of
///    the comma-separated list)
/// 2. X-Real-IP header (for Nginx)
/// 3. ConnectInfo socket address (direct connection)
///
/// A header whose value is empty or the literal "unknown" (any case) is
/// treated as absent and the next source is consulted.
pub async fn extract_client_ip(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    mut request: Request,
    next: Next,
) -> Response {
    let ip = resolve_client_ip(request.headers()).unwrap_or_else(|| addr.ip());

    request.extensions_mut().insert(ClientIp(ip));

    next.run(request).await
}

/// Resolve the client IP from proxy headers, if any usable one is present.
pub fn resolve_client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    forwarded_for_ip(headers).or_else(|| real_ip(headers))
}

fn forwarded_for_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| is_usable(s))
        .and_then(|s| s.parse().ok())
}

fn real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| is_usable(s))
        .and_then(|s| s.parse().ok())
}

fn is_usable(value: &str) -> bool {
    !value.is_empty() && !value.eq_ignore_ascii_case("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let map = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1, 10.0.0.2")]);
        assert_eq!(
            resolve_client_ip(&map),
            Some("203.0.113.7".parse().unwrap())
        );
    }

    #[test]
    fn test_unknown_forwarded_for_falls_through_to_real_ip() {
        let map = headers(&[("x-forwarded-for", "Unknown"), ("x-real-ip", "198.51.100.4")]);
        assert_eq!(
            resolve_client_ip(&map),
            Some("198.51.100.4".parse().unwrap())
        );
    }

    #[test]
    fn test_empty_headers_resolve_to_none() {
        let map = headers(&[("x-forwarded-for", ""), ("x-real-ip", "unknown")]);
        assert_eq!(resolve_client_ip(&map), None);
    }

    #[test]
    fn test_real_ip_used_without_forwarded_for() {
        let map = headers(&[("x-real-ip", "192.0.2.33")]);
        assert_eq!(resolve_client_ip(&map), Some("192.0.2.33".parse().unwrap()));
    }

    #[test]
    fn test_no_headers_resolve_to_none() {
        assert_eq!(resolve_client_ip(&HeaderMap::new()), None);
    }
}
