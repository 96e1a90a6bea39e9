//! Condition tree serialization.
//!
//! This module provides:
//! - The tree walker converting trees to plain values and back
//! - The range normalizer restoring date-times on decode
//! - Pluggable text formats with a JSON default
//! - `QuerySerializer` with the `dumps` / `loads` entry points

pub mod codec;
pub mod config;
pub mod format;
pub mod normalize;
pub mod timestamp;
pub mod walker;

pub use codec::{dumps, loads, QuerySerializer};
pub use config::{SerializerConfig, DEFAULT_MAX_DEPTH, MAX_JSON_DEPTH};
pub use format::{Format, JsonFormat, JSON_NESTING_LIMIT};
pub use normalize::{normalize_leaf, RANGE_SUFFIX};
pub use timestamp::TimeZonePolicy;
pub use walker::{deserialize, serialize};
