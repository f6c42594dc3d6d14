//! # Memo Core
//!
//! Shared building blocks for the memo TTL store:
//!
//! - **Errors**: `MemoError` and the `CreateError` conflict wrapper
//! - **Config**: `CacheConfig`, loadable from JSON or the environment
//! - **Constants**: default TTL and environment variable names
//! - **Traits**: the `Clock` time source
//!
//! ## Example
//!
//! ```rust
//! use memo_core::{CacheConfig, MemoError};
//!
//! let config = CacheConfig::from_json(r#"{"ttl_ms": 1000}"#).unwrap();
//! assert_eq!(config.ttl_ms, 1000);
//!
//! let err = MemoError::KeyNotFound("a".into());
//! assert!(err.is_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;

// Re-export commonly used items at crate root
pub use config::CacheConfig;
pub use constants::*;
pub use error::{CreateError, MemoError, Result};
pub use traits::*;
