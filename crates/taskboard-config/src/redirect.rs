//! Per-request redirect decisions.
//!
//! # Design
//! - Stateless: decisions read only the immutable record and the request.
//! - Rules are scanned in order and the first match wins.
//! - An unmatched request is a normal outcome, not an error.

use std::collections::BTreeMap;

use crate::model::{ConfigurationRecord, RedirectRule};

/// Cookie names mapped to their values for a single request.
pub type Cookies = BTreeMap<String, String>;

/// Request attributes a redirect rule can inspect.
#[derive(Debug, Clone, Copy)]
pub struct RedirectRequest<'a> {
    /// Request path without the query string.
    pub path: &'a str,
    /// Cookies sent with the request.
    pub cookies: &'a Cookies,
}

/// Caching semantics of an issued redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectStatus {
    /// Clients must not cache the redirect.
    Temporary,
    /// Clients may cache the redirect.
    Permanent,
}

impl RedirectStatus {
    #[must_use]
    /// Render the status as its lowercase string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temporary => "temporary",
            Self::Permanent => "permanent",
        }
    }
}

/// Outcome of evaluating the redirect rules for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectDecision<'a> {
    /// Send the client to `destination`.
    Redirect {
        /// Target path from the matching rule.
        destination: &'a str,
        /// Caching semantics from the matching rule.
        status: RedirectStatus,
    },
    /// No rule matched; serve the request as-is.
    NoRedirect,
}

impl<'a> RedirectDecision<'a> {
    /// Whether the decision redirects the client.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// Destination path when redirecting.
    #[must_use]
    pub const fn destination(&self) -> Option<&'a str> {
        match self {
            Self::Redirect { destination, .. } => Some(*destination),
            Self::NoRedirect => None,
        }
    }
}

/// Evaluate the configured redirect rules against a request.
#[must_use]
pub fn evaluate_redirect<'c>(
    request: &RedirectRequest<'_>,
    config: &'c ConfigurationRecord,
) -> RedirectDecision<'c> {
    evaluate_rules(config.redirect_rules(), request)
}

/// Evaluate an ordered rule list; the first matching rule decides.
#[must_use]
pub fn evaluate_rules<'r>(
    rules: &'r [RedirectRule],
    request: &RedirectRequest<'_>,
) -> RedirectDecision<'r> {
    rules
        .iter()
        .find(|rule| rule.matches(request))
        .map_or(RedirectDecision::NoRedirect, |rule| {
            RedirectDecision::Redirect {
                destination: rule.destination.as_str(),
                status: rule.status(),
            }
        })
}

/// Parse a `Cookie` header value into name/value pairs.
///
/// Pairs are separated by `;` and split on the first `=`. Entries without
/// `=` or with an empty name are skipped; the first occurrence of a name wins.
#[must_use]
pub fn parse_cookie_header(header: &str) -> Cookies {
    let mut cookies = Cookies::new();
    for pair in header.split(';') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        cookies
            .entry(name.to_string())
            .or_insert_with(|| value.trim().to_string());
    }
    cookies
}
