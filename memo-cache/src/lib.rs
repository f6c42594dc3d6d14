//! TTL cache for the memo store.
//!
//! String-keyed, in-process store with one TTL for every entry and lazy,
//! on-access expiry. Values are opaque to the cache and handed out by clone.

mod cache;
mod cleanup;

pub use cache::{CacheStats, TtlCache};
pub use memo_core::{CacheConfig, Clock, CreateError, ManualClock, MemoError, Result, SystemClock};
