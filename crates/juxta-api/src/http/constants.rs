//! Shared HTTP constants (headers, cookies, problem URIs).

pub(crate) const HEADER_REQUEST_ID: &str = juxta_telemetry::REQUEST_ID_HEADER;
pub(crate) const SESSION_COOKIE: &str = "juxta_session";
pub(crate) const DEFAULT_REDIRECT: &str = "/";

pub(crate) const PROBLEM_INTERNAL: &str = "https://juxta.dev/problems/internal";
pub(crate) const PROBLEM_BAD_REQUEST: &str = "https://juxta.dev/problems/bad-request";
pub(crate) const PROBLEM_NOT_FOUND: &str = "https://juxta.dev/problems/not-found";
