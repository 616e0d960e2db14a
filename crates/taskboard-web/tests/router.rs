use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{
    HeaderValue, Request, StatusCode,
    header::{COOKIE, LOCATION},
};
use axum::response::Response;
use serde_json::Value;
use taskboard_config::{Environment, resolve};
use taskboard_telemetry::Metrics;
use taskboard_web::ApiServer;
use tower::ServiceExt;

fn server(env: &Environment) -> anyhow::Result<ApiServer> {
    Ok(ApiServer::new(Arc::new(resolve(env)), Metrics::new()?))
}

async fn send(server: &ApiServer, path: &str, cookie: Option<&str>) -> anyhow::Result<Response> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = builder.body(Body::empty())?;
    Ok(server.router().oneshot(request).await?)
}

async fn body_text(response: Response) -> anyhow::Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[tokio::test]
async fn root_with_token_cookie_redirects_to_dashboard() -> anyhow::Result<()> {
    let server = server(&Environment::new())?;
    let response = send(&server, "/", Some("token=abc")).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/dashboard")
    );
    Ok(())
}

#[tokio::test]
async fn token_beside_non_ascii_cookie_still_redirects() -> anyhow::Result<()> {
    let server = server(&Environment::new())?;
    let request = Request::builder()
        .uri("/")
        .header(COOKIE, HeaderValue::from_bytes(b"token=abc; name=Jos\xc3\xa9")?)
        .body(Body::empty())?;
    let response = server.router().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/dashboard")
    );
    Ok(())
}

#[tokio::test]
async fn root_without_token_is_served() -> anyhow::Result<()> {
    let server = server(&Environment::new())?;
    let response = send(&server, "/", Some("theme=dark")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "Taskboard");

    let response = send(&server, "/", None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn other_paths_ignore_token_cookie() -> anyhow::Result<()> {
    let server = server(&Environment::new())?;

    let response = send(&server, "/other", Some("token=abc")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let problem: Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(problem["status"], 404);

    let response = send(&server, "/dashboard", Some("token=abc")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "Taskboard dashboard");
    Ok(())
}

#[tokio::test]
async fn public_config_reflects_environment() -> anyhow::Result<()> {
    let env = Environment::new().with("API_URL", "https://x.test");
    let server = server(&env)?;
    let response = send(&server, "/config/public", None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(
        body,
        serde_json::json!({
            "NEXT_PUBLIC_API_URL": "https://x.test",
            "NEXT_PUBLIC_WS_URL": "ws://localhost:8000/ws",
        })
    );
    Ok(())
}

#[tokio::test]
async fn health_and_metrics_count_redirects() -> anyhow::Result<()> {
    let server = server(&Environment::new())?;
    send(&server, "/", Some("token=abc")).await?;
    send(&server, "/", Some("token=def")).await?;

    let response = send(&server, "/health", None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let health: Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["output"], "standalone");
    assert_eq!(health["metrics"]["redirects_temporary_total"], 2);
    assert_eq!(health["metrics"]["redirects_permanent_total"], 0);

    let response = send(&server, "/metrics", None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let rendered = body_text(response).await?;
    assert!(rendered.contains("redirects_total"));
    assert!(rendered.contains("http_requests_total"));
    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id() -> anyhow::Result<()> {
    let server = server(&Environment::new())?;
    let response = send(&server, "/health", None).await?;
    assert!(response.headers().contains_key("x-request-id"));

    let redirect = send(&server, "/", Some("token=abc")).await?;
    assert!(redirect.headers().contains_key("x-request-id"));
    Ok(())
}
