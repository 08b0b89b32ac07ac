//! Registry defaults and configuration keys.

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default number of subscriber slots preallocated by a new registry.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLES
// ═══════════════════════════════════════════════════════════════════════════════

/// Overrides [`RegistryConfig::initial_capacity`](crate::RegistryConfig::initial_capacity).
pub const ENV_INITIAL_CAPACITY: &str = "HERALD_INITIAL_CAPACITY";

/// Overrides [`RegistryConfig::max_subscribers`](crate::RegistryConfig::max_subscribers).
/// Empty or `0` means unbounded.
pub const ENV_MAX_SUBSCRIBERS: &str = "HERALD_MAX_SUBSCRIBERS";

/// Overrides [`RegistryConfig::failure_policy`](crate::RegistryConfig::failure_policy).
/// Accepts `continue` or `abort` (case-insensitive).
pub const ENV_FAILURE_POLICY: &str = "HERALD_FAILURE_POLICY";
