//! Condition tree node definitions.

use crate::condition::Connector;
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A single field comparison, e.g. `("created__range", (start, end))`.
///
/// Leaves are immutable; rewriting one produces a new leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    key: String,
    value: Value,
}

impl Leaf {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Lookup key naming the field and the comparison operator
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.key, self.value)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', {})", self.key, self.value)
    }
}

/// Element of a node's children
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Leaf(Leaf),
    Node(ConditionNode),
}

impl Child {
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Child::Leaf(leaf) => Some(leaf),
            Child::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&ConditionNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Leaf(_) => None,
        }
    }
}

impl From<Leaf> for Child {
    fn from(leaf: Leaf) -> Self {
        Child::Leaf(leaf)
    }
}

impl From<ConditionNode> for Child {
    fn from(node: ConditionNode) -> Self {
        Child::Node(node)
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Leaf(leaf) => write!(f, "{}", leaf),
            Child::Node(node) => write!(f, "{}", node),
        }
    }
}

/// Node of a boolean condition tree.
///
/// `extra` holds any additional attributes a producer attaches to a node.
/// They are serialized next to `connector`, `negated` and `children` without
/// being interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionNode {
    pub connector: Connector,
    pub negated: bool,
    pub children: Vec<Child>,
    pub extra: BTreeMap<String, Value>,
}

impl ConditionNode {
    /// Create an empty AND node
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty node with the given connector
    pub fn with_connector(connector: Connector) -> Self {
        Self {
            connector,
            ..Self::default()
        }
    }

    /// Create an AND node holding a single lookup
    pub fn leaf(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().with_child(Leaf::new(key, value))
    }

    /// Append a child, returning the node
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Attach an opaque extension attribute
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn push(&mut self, child: impl Into<Child>) {
        self.children.push(child.into());
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Number of node levels, counting this node as one
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .filter_map(Child::as_node)
            .map(ConditionNode::depth)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "(NOT ")?;
        }
        write!(f, "({}: ", self.connector)?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, ")")?;
        if self.negated {
            write!(f, ")")?;
        }
        Ok(())
    }
}
