//! Literal defaults and environment keys for the host configuration.
//!
//! # Design
//! - Centralize literals so the resolver, manifest, and tests agree.
//! - Keys are the exact names read from the process environment.

/// Environment key overriding the public API base URL.
pub const ENV_API_URL: &str = "API_URL";
/// Environment key overriding the public websocket URL.
pub const ENV_WS_URL: &str = "WS_URL";
/// Environment key carrying the runtime mode.
pub const ENV_MODE: &str = "MODE";
/// Keys captured when snapshotting the process environment.
pub const ENV_KEYS: [&str; 3] = [ENV_API_URL, ENV_WS_URL, ENV_MODE];

/// Fallback public API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Fallback public websocket URL.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws";
/// Mode value that disables image optimisation.
pub const DEVELOPMENT_MODE: &str = "development";
/// Sole domain images may be served from.
pub const IMAGE_DOMAIN: &str = "localhost";

/// Name under which the API URL is exposed to client code.
pub const PUBLIC_API_URL_KEY: &str = "NEXT_PUBLIC_API_URL";
/// Name under which the websocket URL is exposed to client code.
pub const PUBLIC_WS_URL_KEY: &str = "NEXT_PUBLIC_WS_URL";

/// Path that triggers the signed-in redirect.
pub(crate) const REDIRECT_SOURCE: &str = "/";
/// Destination for signed-in visitors.
pub(crate) const REDIRECT_DESTINATION: &str = "/dashboard";
/// Cookie whose presence marks a signed-in visitor.
pub(crate) const SESSION_COOKIE: &str = "token";
