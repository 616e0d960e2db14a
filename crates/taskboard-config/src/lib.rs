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

//! Front-end host configuration for Taskboard.
//!
//! Layout: `env.rs` (typed environment snapshot), `model.rs` (configuration
//! record and redirect rules), `resolve.rs` (environment -> record),
//! `redirect.rs` (per-request redirect decisions), `manifest.rs` (framework
//! manifest rendering).

pub mod defaults;
pub mod env;
pub mod error;
pub mod manifest;
pub mod model;
pub mod redirect;
pub mod resolve;

pub use env::Environment;
pub use error::{ConfigError, ConfigResult};
pub use model::{Condition, ConfigurationRecord, OutputMode, RedirectRule};
pub use redirect::{
    Cookies, RedirectDecision, RedirectRequest, RedirectStatus, evaluate_redirect,
    evaluate_rules, parse_cookie_header,
};
pub use resolve::resolve;
