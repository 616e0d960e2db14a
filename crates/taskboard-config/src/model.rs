//! Typed configuration record and redirect rule models.
//!
//! # Design
//! - Pure data carriers; construction lives in `resolve.rs`.
//! - The record exposes read-only accessors so it cannot change once shared.
//! - Rule and condition serde shapes match the framework redirect contract.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults::{PUBLIC_API_URL_KEY, PUBLIC_WS_URL_KEY};
use crate::redirect::{Cookies, RedirectRequest, RedirectStatus};

/// Build output mode handed to the hosting framework.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Self-contained server bundle suitable for container images.
    Standalone,
}

impl OutputMode {
    #[must_use]
    /// Render the mode as its lowercase string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standalone => "standalone",
        }
    }
}

/// Predicate that must hold for a redirect rule to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Condition {
    /// Satisfied when the request carries a cookie named `key`.
    Cookie {
        /// Cookie name that must be present.
        key: String,
    },
}

impl Condition {
    /// Cookie presence condition for `key`.
    #[must_use]
    pub fn cookie(key: impl Into<String>) -> Self {
        Self::Cookie { key: key.into() }
    }

    /// Whether the condition holds for the supplied cookies.
    ///
    /// Cookie conditions only check presence; the value is ignored.
    #[must_use]
    pub fn is_satisfied(&self, cookies: &Cookies) -> bool {
        match self {
            Self::Cookie { key } => cookies.contains_key(key),
        }
    }
}

/// Declarative rule mapping a source path plus conditions to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    /// Exact request path the rule applies to.
    pub source: String,
    /// Path the client is sent to on a match.
    pub destination: String,
    /// Whether clients may cache the redirect.
    pub permanent: bool,
    /// Conditions that must all hold; serialised as `has`.
    #[serde(rename = "has", default)]
    pub conditions: Vec<Condition>,
}

impl RedirectRule {
    /// Unconditional rule from `source` to `destination`.
    #[must_use]
    pub fn new(source: impl Into<String>, destination: impl Into<String>, permanent: bool) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            permanent,
            conditions: Vec::new(),
        }
    }

    /// Append a condition to the rule.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Whether the request path equals `source` and every condition holds.
    #[must_use]
    pub fn matches(&self, request: &RedirectRequest<'_>) -> bool {
        request.path == self.source
            && self
                .conditions
                .iter()
                .all(|condition| condition.is_satisfied(request.cookies))
    }

    /// Status semantics a match carries.
    #[must_use]
    pub const fn status(&self) -> RedirectStatus {
        if self.permanent {
            RedirectStatus::Permanent
        } else {
            RedirectStatus::Temporary
        }
    }
}

/// Immutable settings bundle resolved once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    pub(crate) output_mode: OutputMode,
    pub(crate) public_api_url: String,
    pub(crate) public_ws_url: String,
    pub(crate) strict_mode_enabled: bool,
    pub(crate) image_allowed_domains: BTreeSet<String>,
    pub(crate) images_unoptimized: bool,
    pub(crate) redirect_rules: Vec<RedirectRule>,
}

impl ConfigurationRecord {
    /// Build output mode.
    #[must_use]
    pub const fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Public API base URL injected into client code; never empty.
    #[must_use]
    pub const fn public_api_url(&self) -> &str {
        self.public_api_url.as_str()
    }

    /// Public websocket URL injected into client code; never empty.
    #[must_use]
    pub const fn public_ws_url(&self) -> &str {
        self.public_ws_url.as_str()
    }

    /// Whether the UI runs with strict mode checks.
    #[must_use]
    pub const fn strict_mode_enabled(&self) -> bool {
        self.strict_mode_enabled
    }

    /// Domains images may be loaded from.
    #[must_use]
    pub const fn image_allowed_domains(&self) -> &BTreeSet<String> {
        &self.image_allowed_domains
    }

    /// Whether image optimisation is skipped.
    #[must_use]
    pub const fn images_unoptimized(&self) -> bool {
        self.images_unoptimized
    }

    /// Redirect rules in evaluation order.
    #[must_use]
    pub const fn redirect_rules(&self) -> &[RedirectRule] {
        self.redirect_rules.as_slice()
    }

    /// Constants exposed to client-visible code, keyed by their public names.
    #[must_use]
    pub fn public_env(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([
            (PUBLIC_API_URL_KEY, self.public_api_url()),
            (PUBLIC_WS_URL_KEY, self.public_ws_url()),
        ])
    }

    /// Whether an image URL points at an allowed host.
    ///
    /// URLs that fail to parse or carry no host are rejected.
    #[must_use]
    pub fn is_image_allowed(&self, candidate: &str) -> bool {
        let Ok(url) = Url::parse(candidate) else {
            return false;
        };
        url.host_str()
            .is_some_and(|host| self.image_allowed_domains.contains(host))
    }
}
