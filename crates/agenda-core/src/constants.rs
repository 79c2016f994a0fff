/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const SESSIONS_ROUTE_COMPONENT: &str = "sessions";
pub const SESSIONS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SESSIONS_ROUTE_COMPONENT);

/// Occurrence cap applied when a recurrence rule carries no explicit maximum.
pub const DEFAULT_MAX_OCCURRENCES: u32 = 50;

/// Largest series a single request may generate.
pub const MAX_OCCURRENCES_LIMIT: u32 = 500;

/// Header read by the proxy authentication method when none is configured.
pub const DEFAULT_PROXY_USER_HEADER: &str = "X-Remote-User";
