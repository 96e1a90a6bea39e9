//! Serializer configuration.

use crate::serializer::format::JSON_NESTING_LIMIT;
use crate::serializer::TimeZonePolicy;
use serde::{Deserialize, Serialize};

/// Default maximum node nesting accepted in either direction
pub const DEFAULT_MAX_DEPTH: usize = 48;

/// Largest `max_depth` the JSON format can decode: each node takes two
/// levels (object and children list) and the deepest leaf two more (the
/// leaf pair and a range value).
pub const MAX_JSON_DEPTH: usize = (JSON_NESTING_LIMIT - 2) / 2;

/// Format nesting needed to hold a tree of `max_depth` nodes
pub fn nesting_for_depth(max_depth: usize) -> usize {
    max_depth.saturating_mul(2).saturating_add(2)
}

/// Options shared by `dumps` and `loads`.
///
/// Both sides of an exchange must use the same `base64` and `time_zone`
/// settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Wrap the encoded text in standard base64
    pub base64: bool,
    pub time_zone: TimeZonePolicy,
    pub max_depth: usize,
    /// Pretty-print the encoded text
    pub pretty: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            base64: false,
            time_zone: TimeZonePolicy::Local,
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
        }
    }
}

impl SerializerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base64(mut self, base64: bool) -> Self {
        self.base64 = base64;
        self
    }

    pub fn with_time_zone(mut self, time_zone: TimeZonePolicy) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
