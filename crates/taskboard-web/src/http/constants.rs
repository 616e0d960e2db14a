//! Shared HTTP constants (headers, problem URIs).

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

pub(crate) const PROBLEM_INTERNAL: &str = "https://taskboard.dev/problems/internal";
pub(crate) const PROBLEM_NOT_FOUND: &str = "https://taskboard.dev/problems/not-found";
