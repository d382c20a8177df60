/// Content type for DAV XML request bodies.
pub const CONTENT_TYPE_XML: &str = "application/xml; charset=utf-8";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("kunai/", env!("CARGO_PKG_VERSION"));

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
