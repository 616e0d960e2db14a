//! Rendering of the configuration record into the framework manifest.
//!
//! # Design
//! - Field names follow the hosting framework's configuration object.
//! - Borrowed views keep rendering allocation-light and side-effect free.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{ConfigurationRecord, OutputMode, RedirectRule};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    output: OutputMode,
    env: BTreeMap<&'static str, &'a str>,
    react_strict_mode: bool,
    images: ImagesManifest<'a>,
    redirects: &'a [RedirectRule],
}

#[derive(Serialize)]
struct ImagesManifest<'a> {
    domains: &'a BTreeSet<String>,
    unoptimized: bool,
}

impl ConfigurationRecord {
    /// Render the record as the framework-level configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ManifestSerialize`] if serialisation fails.
    pub fn to_manifest(&self) -> ConfigResult<Value> {
        let manifest = Manifest {
            output: self.output_mode(),
            env: self.public_env(),
            react_strict_mode: self.strict_mode_enabled(),
            images: ImagesManifest {
                domains: self.image_allowed_domains(),
                unoptimized: self.images_unoptimized(),
            },
            redirects: self.redirect_rules(),
        };
        serde_json::to_value(&manifest).map_err(|source| ConfigError::ManifestSerialize { source })
    }
}
