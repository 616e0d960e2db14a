//! Process-wide span context.
//!
//! # Design
//! - One `app` span carries the runtime mode and build SHA for every event
//!   emitted while the host runs.

use tracing::span::EnteredSpan;

use crate::init::build_sha;

/// Keeps the application span entered until dropped.
pub struct GlobalContextGuard {
    _span: EnteredSpan,
}

impl GlobalContextGuard {
    /// Enter the `app` span tagged with `mode` and the build SHA.
    #[must_use]
    pub fn new(mode: &str) -> Self {
        let span = tracing::info_span!("app", mode = %mode, build_sha = %build_sha()).entered();
        Self { _span: span }
    }
}
