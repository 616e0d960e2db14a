//! Request accounting shared by the router layers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::http::constants::HEADER_REQUEST_ID;
use crate::state::ApiState;

/// Count every routed request by matched route and response status.
pub(crate) async fn count_requests(
    State(state): State<Arc<ApiState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let route = route_label(&req);
    let response = next.run(req).await;
    state
        .telemetry
        .inc_http_request(&route, response.status().as_u16());
    response
}

/// Matched route template, falling back to the raw path.
pub(crate) fn route_label<B>(req: &Request<B>) -> String {
    req.extensions().get::<MatchedPath>().map_or_else(
        || req.uri().path().to_string(),
        |matched| matched.as_str().to_string(),
    )
}

/// Request identifier stamped by the request-id layer, or empty when absent.
pub(crate) fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(HEADER_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn route_label_falls_back_to_path() {
        let req = Request::builder()
            .uri("/unrouted?x=1")
            .body(())
            .expect("request");
        assert_eq!(route_label(&req), "/unrouted");
    }

    #[test]
    fn request_id_reads_header_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "");
        headers.insert(HEADER_REQUEST_ID, HeaderValue::from_static("req-7"));
        assert_eq!(request_id(&headers), "req-7");
    }
}
