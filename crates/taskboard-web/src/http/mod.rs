//! HTTP surface: router, middleware, and handlers.

pub(crate) mod constants;
pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod redirect;
pub(crate) mod router;
pub(crate) mod telemetry;
