//! Store constants.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// EXPIRY
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live applied to every entry, in milliseconds.
pub const DEFAULT_TTL_MS: u64 = 60_000;

/// Default time-to-live as a `Duration`.
pub const DEFAULT_TTL: Duration = Duration::from_millis(DEFAULT_TTL_MS);

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Environment variable holding the TTL in milliseconds.
pub const ENV_TTL_MS: &str = "MEMO_CACHE_TTL_MS";
