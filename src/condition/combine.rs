//! Composition of condition trees with `&`, `|` and `!`.

use crate::condition::{Child, ConditionNode, Connector};
use std::ops::{BitAnd, BitOr, Not};

impl ConditionNode {
    /// Join two trees under `connector`.
    ///
    /// An empty operand yields the other one unchanged. A plain operand (not
    /// negated, no extension attributes) that uses the same connector or holds
    /// a single child has its children spliced into the result instead of
    /// being nested.
    pub fn combine(self, other: ConditionNode, connector: Connector) -> ConditionNode {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }

        let mut combined = ConditionNode::with_connector(connector);
        combined.add_squashed(self);
        combined.add_squashed(other);
        combined
    }

    /// Return the tree with its `negated` flag flipped
    pub fn negate(mut self) -> ConditionNode {
        self.negated = !self.negated;
        self
    }

    fn add_squashed(&mut self, node: ConditionNode) {
        let plain = !node.negated && node.extra.is_empty();
        if plain && (node.connector == self.connector || node.len() == 1) {
            self.children.extend(node.children);
        } else {
            self.children.push(Child::Node(node));
        }
    }
}

impl BitAnd for ConditionNode {
    type Output = ConditionNode;

    fn bitand(self, rhs: ConditionNode) -> ConditionNode {
        self.combine(rhs, Connector::And)
    }
}

impl BitOr for ConditionNode {
    type Output = ConditionNode;

    fn bitor(self, rhs: ConditionNode) -> ConditionNode {
        self.combine(rhs, Connector::Or)
    }
}

impl Not for ConditionNode {
    type Output = ConditionNode;

    fn not(self) -> ConditionNode {
        self.negate()
    }
}
