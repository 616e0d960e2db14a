//! Middleware applying the configured redirect rules to every request.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use taskboard_config::{
    Cookies, RedirectDecision, RedirectRequest, RedirectStatus, evaluate_redirect,
    parse_cookie_header,
};
use tracing::debug;

use crate::http::telemetry::request_id;
use crate::state::ApiState;

pub(crate) async fn apply_redirects(
    State(state): State<Arc<ApiState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let cookies = cookies_from_headers(req.headers());
    let decision = evaluate_redirect(
        &RedirectRequest {
            path: req.uri().path(),
            cookies: &cookies,
        },
        &state.config,
    );

    match decision {
        RedirectDecision::Redirect {
            destination,
            status,
        } => {
            debug!(
                path = %req.uri().path(),
                request_id = request_id(req.headers()),
                destination,
                status = status.as_str(),
                "redirect rule matched"
            );
            state.telemetry.inc_redirect(status.as_str());
            redirect_response(destination, status)
        }
        RedirectDecision::NoRedirect => next.run(req).await,
    }
}

/// Merge every `Cookie` header; the first occurrence of a name wins.
pub(crate) fn cookies_from_headers(headers: &HeaderMap) -> Cookies {
    let mut cookies = Cookies::new();
    for value in headers.get_all(COOKIE) {
        let raw = String::from_utf8_lossy(value.as_bytes());
        for (name, value) in parse_cookie_header(&raw) {
            cookies.entry(name).or_insert(value);
        }
    }
    cookies
}

fn redirect_response(destination: &str, status: RedirectStatus) -> Response {
    let redirect = match status {
        RedirectStatus::Temporary => Redirect::temporary(destination),
        RedirectStatus::Permanent => Redirect::permanent(destination),
    };
    redirect.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode, header::LOCATION};

    #[test]
    fn cookies_merge_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; token=first"));
        headers.append(COOKIE, HeaderValue::from_static("token=second; lang=en"));
        let cookies = cookies_from_headers(&headers);
        assert_eq!(cookies.get("token").map(String::as_str), Some("first"));
        assert_eq!(cookies.get("lang").map(String::as_str), Some("en"));
        assert_eq!(cookies.len(), 3);
    }

    #[test]
    fn non_ascii_cookie_values_keep_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(
            COOKIE,
            HeaderValue::from_bytes(b"token=abc; name=Jos\xc3\xa9").expect("header bytes"),
        );
        let cookies = cookies_from_headers(&headers);
        assert_eq!(cookies.get("token").map(String::as_str), Some("abc"));
        assert_eq!(cookies.get("name").map(String::as_str), Some("Jos\u{e9}"));
    }

    #[test]
    fn redirect_status_maps_to_http_codes() {
        let temporary = redirect_response("/dashboard", RedirectStatus::Temporary);
        assert_eq!(temporary.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            temporary.headers().get(LOCATION),
            Some(&HeaderValue::from_static("/dashboard"))
        );

        let permanent = redirect_response("/dashboard", RedirectStatus::Permanent);
        assert_eq!(permanent.status(), StatusCode::PERMANENT_REDIRECT);
    }
}
