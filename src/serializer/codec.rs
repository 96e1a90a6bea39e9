//! `dumps` / `loads` entry points.

use crate::condition::ConditionNode;
use crate::error::{QueryError, QueryResult};
use crate::serializer::config::nesting_for_depth;
use crate::serializer::format::{Format, JsonFormat};
use crate::serializer::{walker, SerializerConfig};
use crate::value::Value;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use std::any::Any;

/// Encodes condition trees to text and decodes them back.
#[derive(Debug)]
pub struct QuerySerializer {
    config: SerializerConfig,
    format: Box<dyn Format>,
}

impl Default for QuerySerializer {
    fn default() -> Self {
        Self::new(SerializerConfig::default())
    }
}

impl QuerySerializer {
    /// Create a JSON serializer with the given options
    pub fn new(config: SerializerConfig) -> Self {
        Self {
            config,
            format: Box::new(JsonFormat),
        }
    }

    /// Replace the text format
    pub fn with_format(mut self, format: impl Format + 'static) -> Self {
        self.format = Box::new(format);
        self
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Convert a tree into its plain form
    pub fn serialize(&self, node: &ConditionNode) -> QueryResult<Value> {
        walker::serialize(node, self.config.max_depth)
    }

    /// Rebuild a tree from its plain form
    pub fn deserialize(&self, plain: &Value) -> QueryResult<ConditionNode> {
        walker::deserialize(plain, self.config.time_zone, self.config.max_depth)
    }

    /// Fail unless the format can decode every tree `max_depth` admits
    fn check_max_depth(&self) -> QueryResult<()> {
        match self.format.nesting_limit() {
            Some(limit) if nesting_for_depth(self.config.max_depth) > limit => {
                Err(QueryError::InvalidConfig {
                    reason: format!(
                        "max_depth {} needs {} nesting levels but the format decodes at most {}",
                        self.config.max_depth,
                        nesting_for_depth(self.config.max_depth),
                        limit
                    ),
                })
            }
            _ => Ok(()),
        }
    }

    /// Encode a tree as text
    pub fn dumps(&self, node: &ConditionNode) -> QueryResult<String> {
        self.check_max_depth()?;
        let plain = self.serialize(node)?;
        if let Some(limit) = self.format.nesting_limit() {
            let depth = plain.nesting_depth();
            if depth > limit {
                return Err(QueryError::NestingExceeded { depth, limit });
            }
        }
        let text = self
            .format
            .encode(&plain, self.config.time_zone, self.config.pretty)?;
        debug!(
            "Encoded condition tree with {} top-level children ({} bytes)",
            node.len(),
            text.len()
        );

        if self.config.base64 {
            Ok(STANDARD.encode(text))
        } else {
            Ok(text)
        }
    }

    /// Encode any value, failing unless it is a [`ConditionNode`]
    pub fn dumps_any<T: Any>(&self, obj: &T) -> QueryResult<String> {
        match (obj as &dyn Any).downcast_ref::<ConditionNode>() {
            Some(node) => self.dumps(node),
            None => Err(QueryError::InputType {
                type_name: std::any::type_name::<T>(),
            }),
        }
    }

    /// Decode text into a tree. A JSON `null` decodes to `None`.
    pub fn loads(&self, text: &str) -> QueryResult<Option<ConditionNode>> {
        self.check_max_depth()?;
        let plain = if self.config.base64 {
            let bytes = STANDARD.decode(text.trim())?;
            self.format.decode(&String::from_utf8(bytes)?)?
        } else {
            self.format.decode(text)?
        };

        if plain.is_null() {
            debug!("Decoded null condition tree");
            return Ok(None);
        }

        let node = self.deserialize(&plain)?;
        debug!(
            "Decoded condition tree with {} top-level children",
            node.len()
        );
        Ok(Some(node))
    }
}

/// Encode a tree with the default options
pub fn dumps(node: &ConditionNode) -> QueryResult<String> {
    QuerySerializer::default().dumps(node)
}

/// Decode a tree with the default options
pub fn loads(text: &str) -> QueryResult<Option<ConditionNode>> {
    QuerySerializer::default().loads(text)
}
