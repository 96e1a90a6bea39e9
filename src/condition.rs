//! Boolean condition trees.
//!
//! This module provides:
//! - `ConditionNode`, an AND/OR node over ordered children
//! - `Leaf`, an immutable `(lookup_key, value)` pair
//! - `Connector`, the boolean combinator of a node
//! - `&`, `|` and `!` operators for composing trees

pub mod combine;
pub mod connector;
pub mod node;

pub use connector::Connector;
pub use node::{Child, ConditionNode, Leaf};
