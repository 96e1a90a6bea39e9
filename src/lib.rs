//! Serialization of boolean condition trees to and from JSON text.
//!
//! A [`ConditionNode`] combines field lookups such as `("age__gte", 5)` under
//! an AND/OR connector. [`dumps`] turns a tree into text that [`loads`] turns
//! back into an equivalent tree, restoring the date-time bounds of range
//! lookups along the way.

pub mod condition;
pub mod error;
pub mod serializer;
pub mod value;

pub use condition::{Child, ConditionNode, Connector, Leaf};
pub use error::{ErrorKind, QueryError, QueryResult};
pub use serializer::{dumps, loads, QuerySerializer, SerializerConfig, TimeZonePolicy};
pub use value::Value;
