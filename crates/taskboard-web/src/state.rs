//! Shared state handed to every request handler.

use std::sync::Arc;

use taskboard_config::ConfigurationRecord;
use taskboard_telemetry::Metrics;

pub(crate) struct ApiState {
    pub(crate) config: Arc<ConfigurationRecord>,
    pub(crate) telemetry: Metrics,
}

impl ApiState {
    pub(crate) const fn new(config: Arc<ConfigurationRecord>, telemetry: Metrics) -> Self {
        Self { config, telemetry }
    }
}
