//! Recursive conversion between condition trees and plain values.

use crate::condition::{Child, ConditionNode, Connector, Leaf};
use crate::error::{QueryError, QueryResult};
use crate::serializer::normalize::normalize_leaf;
use crate::serializer::TimeZonePolicy;
use crate::value::Value;
use std::collections::BTreeMap;

pub const CHILDREN_KEY: &str = "children";
pub const CONNECTOR_KEY: &str = "connector";
pub const NEGATED_KEY: &str = "negated";

fn is_governed_key(key: &str) -> bool {
    matches!(key, CHILDREN_KEY | CONNECTOR_KEY | NEGATED_KEY)
}

/// Convert a tree into a plain map.
///
/// The map holds `connector`, `negated` and `children` plus every extension
/// attribute of the node. Leaves become `[lookup_key, value]` lists; date
/// values are left for the text format to encode.
pub fn serialize(node: &ConditionNode, max_depth: usize) -> QueryResult<Value> {
    serialize_node(node, 1, max_depth)
}

fn serialize_node(node: &ConditionNode, depth: usize, max_depth: usize) -> QueryResult<Value> {
    if depth > max_depth {
        return Err(QueryError::DepthExceeded { max: max_depth });
    }

    let children = node
        .children
        .iter()
        .map(|child| match child {
            Child::Node(nested) => serialize_node(nested, depth + 1, max_depth),
            Child::Leaf(leaf) => Ok(Value::List(vec![
                Value::String(leaf.key().to_string()),
                leaf.value().clone(),
            ])),
        })
        .collect::<QueryResult<Vec<_>>>()?;

    let mut map = node.extra.clone();
    map.insert(
        CONNECTOR_KEY.to_string(),
        Value::String(node.connector.as_str().to_string()),
    );
    map.insert(NEGATED_KEY.to_string(), Value::Boolean(node.negated));
    map.insert(CHILDREN_KEY.to_string(), Value::List(children));
    Ok(Value::Map(map))
}

/// Rebuild a tree from a plain map produced by [`serialize`].
///
/// Every node is built fresh. Leaves pass through the range normalizer, and
/// keys other than the three governed ones are kept as extension attributes.
pub fn deserialize(
    plain: &Value,
    zone: TimeZonePolicy,
    max_depth: usize,
) -> QueryResult<ConditionNode> {
    deserialize_node(plain, zone, 1, max_depth)
}

fn deserialize_node(
    plain: &Value,
    zone: TimeZonePolicy,
    depth: usize,
    max_depth: usize,
) -> QueryResult<ConditionNode> {
    if depth > max_depth {
        return Err(QueryError::DepthExceeded { max: max_depth });
    }

    let map = plain.as_map().ok_or(QueryError::NotAnObject {
        found: plain.kind_name(),
    })?;

    let raw_children = required(map, CHILDREN_KEY)?;
    let raw_connector = required(map, CONNECTOR_KEY)?;
    let raw_negated = required(map, NEGATED_KEY)?;

    let connector = raw_connector
        .as_str()
        .ok_or_else(|| wrong_type(CONNECTOR_KEY, "a string", raw_connector))?
        .parse::<Connector>()
        .map_err(|e| QueryError::invalid_field(CONNECTOR_KEY, e.to_string()))?;
    let negated = raw_negated
        .as_bool()
        .ok_or_else(|| wrong_type(NEGATED_KEY, "a boolean", raw_negated))?;

    let children = raw_children
        .as_list()
        .ok_or_else(|| wrong_type(CHILDREN_KEY, "a list", raw_children))?
        .iter()
        .map(|child| match child {
            Value::Map(_) => deserialize_node(child, zone, depth + 1, max_depth).map(Child::Node),
            other => parse_leaf(other).map(|leaf| Child::Leaf(normalize_leaf(leaf, zone))),
        })
        .collect::<QueryResult<Vec<_>>>()?;

    let extra: BTreeMap<String, Value> = map
        .iter()
        .filter(|(key, _)| !is_governed_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(ConditionNode {
        connector,
        negated,
        children,
        extra,
    })
}

fn required<'a>(map: &'a BTreeMap<String, Value>, key: &'static str) -> QueryResult<&'a Value> {
    map.get(key).ok_or(QueryError::MissingKey { key })
}

fn wrong_type(key: &'static str, expected: &str, found: &Value) -> QueryError {
    QueryError::invalid_field(
        key,
        format!("must be {}, got {}", expected, found.kind_name()),
    )
}

fn parse_leaf(value: &Value) -> QueryResult<Leaf> {
    match value.as_list() {
        Some([Value::String(key), value]) => Ok(Leaf::new(key.clone(), value.clone())),
        _ => Err(QueryError::invalid_field(
            CHILDREN_KEY,
            format!(
                "entry must be an object or a [lookup_key, value] pair, got {}",
                value.kind_name()
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn example_tree() -> ConditionNode {
        let mut inner = ConditionNode::leaf("name", "x");
        inner.negated = true;
        ConditionNode::with_connector(Connector::Or)
            .with_child(Leaf::new("age__gte", 5))
            .with_child(inner)
    }

    fn plain_leaf(key: &str, value: impl Into<Value>) -> Value {
        Value::List(vec![Value::from(key), value.into()])
    }

    fn plain_node(connector: &str, negated: bool, children: Vec<Value>) -> Value {
        let mut map = BTreeMap::new();
        map.insert(CONNECTOR_KEY.to_string(), Value::from(connector));
        map.insert(NEGATED_KEY.to_string(), Value::Boolean(negated));
        map.insert(CHILDREN_KEY.to_string(), Value::List(children));
        Value::Map(map)
    }

    #[test]
    fn test_serialize_shape() {
        let plain = serialize(&example_tree(), 64).unwrap();
        let expected = plain_node(
            "OR",
            false,
            vec![
                plain_leaf("age__gte", 5),
                plain_node("AND", true, vec![plain_leaf("name", "x")]),
            ],
        );
        assert_eq!(plain, expected);
    }

    #[test]
    fn test_round_trip() {
        let tree = example_tree();
        let plain = serialize(&tree, 64).unwrap();
        let restored = deserialize(&plain, TimeZonePolicy::Utc, 64).unwrap();
        assert_eq!(restored, tree);
    }

    #[test]
    fn test_extra_attributes_pass_through() {
        let tree = ConditionNode::leaf("a", 1).with_extra("label", "owner filter");
        let plain = serialize(&tree, 64).unwrap();
        assert_eq!(
            plain.as_map().unwrap()["label"],
            Value::from("owner filter")
        );

        let restored = deserialize(&plain, TimeZonePolicy::Utc, 64).unwrap();
        assert_eq!(restored.extra.get("label"), Some(&Value::from("owner filter")));
    }

    #[test]
    fn test_governed_keys_win_over_extras() {
        let tree = ConditionNode::leaf("a", 1).with_extra(NEGATED_KEY, "yes");
        let plain = serialize(&tree, 64).unwrap();
        assert_eq!(plain.as_map().unwrap()[NEGATED_KEY], Value::Boolean(false));
    }

    #[test]
    fn test_missing_keys() {
        let mut plain = plain_node("AND", false, vec![]);
        if let Value::Map(map) = &mut plain {
            map.remove(CONNECTOR_KEY);
        }
        let err = deserialize(&plain, TimeZonePolicy::Utc, 64).unwrap_err();
        assert!(matches!(err, QueryError::MissingKey { key: "connector" }));
        assert_eq!(err.kind(), ErrorKind::MalformedTree);

        let err = deserialize(&Value::Map(BTreeMap::new()), TimeZonePolicy::Utc, 64)
            .unwrap_err();
        assert!(matches!(err, QueryError::MissingKey { key: "children" }));
    }

    #[test]
    fn test_invalid_fields() {
        let plain = plain_node("XOR", false, vec![]);
        let err = deserialize(&plain, TimeZonePolicy::Utc, 64).unwrap_err();
        assert!(matches!(err, QueryError::InvalidField { key: "connector", .. }));

        let plain = plain_node("AND", false, vec![Value::from("loose")]);
        let err = deserialize(&plain, TimeZonePolicy::Utc, 64).unwrap_err();
        assert!(matches!(err, QueryError::InvalidField { key: "children", .. }));

        let plain = plain_node("AND", false, vec![plain_leaf("a", 1), Value::from(vec![1, 2])]);
        let err = deserialize(&plain, TimeZonePolicy::Utc, 64).unwrap_err();
        assert!(matches!(err, QueryError::InvalidField { key: "children", .. }));

        let err = deserialize(&Value::from(vec![1]), TimeZonePolicy::Utc, 64).unwrap_err();
        assert!(matches!(err, QueryError::NotAnObject { found: "list" }));
    }

    #[test]
    fn test_depth_limit() {
        let tree = ConditionNode::new().with_child(
            ConditionNode::new().with_child(ConditionNode::leaf("a", 1)),
        );
        assert_eq!(tree.depth(), 3);

        assert!(serialize(&tree, 3).is_ok());
        let err = serialize(&tree, 2).unwrap_err();
        assert!(matches!(err, QueryError::DepthExceeded { max: 2 }));

        let plain = serialize(&tree, 3).unwrap();
        assert!(deserialize(&plain, TimeZonePolicy::Utc, 3).is_ok());
        let err = deserialize(&plain, TimeZonePolicy::Utc, 2).unwrap_err();
        assert!(matches!(err, QueryError::DepthExceeded { max: 2 }));
    }

    #[test]
    fn test_range_leaf_normalized_on_deserialize() {
        let plain = plain_node("AND", false, vec![plain_leaf("created__range", (0, 60))]);
        let tree = deserialize(&plain, TimeZonePolicy::Utc, 64).unwrap();
        let leaf = tree.children[0].as_leaf().unwrap();
        assert!(matches!(
            leaf.value().as_list(),
            Some([Value::DateTime(_), Value::DateTime(_)])
        ));
    }
}
