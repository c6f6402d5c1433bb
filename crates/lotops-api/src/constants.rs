//! API constants
//!
//! Route builders and the OpenAPI paths both use [`API_PREFIX`], so bumping
//! [`API_VERSION`] moves every versioned endpoint at once.

/// API base path prefix (version-independent)
pub const API_BASE: &str = "/api";

/// Current API version segment
pub const API_VERSION: &str = "v0";

/// Versioned API prefix, e.g. `/api/v0`
pub const API_PREFIX: &str = "/api/v0";
