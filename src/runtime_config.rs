//! # Runtime Configuration Module
//!
//! Environment variable-based tuning for the [`crate::router::Router`].
//!
//! ## Environment Variables
//!
//! ### `ROUTE_INDEX_SLOW_MATCH_US`
//!
//! Resolution time, in microseconds, above which a match is logged at `warn`
//! instead of `info`. Default: `1000` (1 ms).
//!
//! ### `ROUTE_INDEX_MAX_DEPTH`
//!
//! Maximum number of path components a request may have. Deeper paths are
//! rejected before filtering. Accepts decimal (`128`) or hexadecimal
//! (`0x80`). Default: `128`.
//!
//! Invalid values fall back to the defaults.
//!
//! ## Usage
//!
//! ```rust
//! use route_index::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("Max depth: {}", config.max_path_depth);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1000;
const DEFAULT_MAX_PATH_DEPTH: usize = 128;

/// Router configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Matches slower than this are logged at `warn`
    pub slow_match_threshold: Duration,
    /// Requests with more path components than this never match
    pub max_path_depth: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
            max_path_depth: DEFAULT_MAX_PATH_DEPTH,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let slow_match_us = lookup("ROUTE_INDEX_SLOW_MATCH_US")
            .and_then(|v| parse_number(&v))
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        let max_path_depth = lookup("ROUTE_INDEX_MAX_DEPTH")
            .and_then(|v| parse_number(&v))
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(DEFAULT_MAX_PATH_DEPTH);

        RouterConfig {
            slow_match_threshold: Duration::from_micros(slow_match_us),
            max_path_depth,
        }
    }
}

fn parse_number(val: &str) -> Option<u64> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}
