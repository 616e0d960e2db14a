#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! HTTP host for the Taskboard front end.
//!
//! Layout: `http/router.rs` (router and server), `http/redirect.rs` (redirect
//! middleware), `http/handlers.rs` (diagnostic endpoints), `state.rs` (shared
//! request state).

pub mod error;
pub(crate) mod http;
pub(crate) mod state;

pub use error::{ApiServerError, ApiServerResult};
pub use http::router::ApiServer;
