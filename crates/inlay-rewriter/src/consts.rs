//! Internal constants for id lookups.

use std::time::Duration;

/// Default HTTP timeout for embed id lookups (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `User-Agent` header sent with embed id lookups.
pub const DEFAULT_USER_AGENT: &str = concat!("inlay/", env!("CARGO_PKG_VERSION"));
