//! Text formats for plain trees.

use crate::error::{QueryError, QueryResult};
use crate::serializer::TimeZonePolicy;
use crate::value::Value;
use std::fmt;

/// A textual encoding of plain values.
///
/// `encode` receives the time zone so it can turn `Date` and `DateTime`
/// scalars into epoch seconds; `decode` never produces those variants.
pub trait Format: fmt::Debug + Send + Sync {
    fn encode(&self, plain: &Value, zone: TimeZonePolicy, pretty: bool) -> QueryResult<String>;

    fn decode(&self, text: &str) -> QueryResult<Value>;

    /// Deepest list/map nesting `decode` accepts, if bounded
    fn nesting_limit(&self) -> Option<usize> {
        None
    }
}

/// Deepest array/object nesting serde_json decodes under its default
/// recursion limit of 128
pub const JSON_NESTING_LIMIT: usize = 127;

/// JSON text via serde_json
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn nesting_limit(&self) -> Option<usize> {
        Some(JSON_NESTING_LIMIT)
    }

    fn encode(&self, plain: &Value, zone: TimeZonePolicy, pretty: bool) -> QueryResult<String> {
        let json = to_json(plain, zone)?;
        let text = if pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        Ok(text)
    }

    fn decode(&self, text: &str) -> QueryResult<Value> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Value::from(json))
    }
}

/// Convert a plain value to JSON, encoding dates as epoch seconds
pub fn to_json(value: &Value, zone: TimeZonePolicy) -> QueryResult<serde_json::Value> {
    let json = match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or(QueryError::NonFiniteFloat(*f))?,
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Date(date) => zone
            .date_to_epoch_seconds(date)
            .map(serde_json::Value::from)
            .ok_or_else(|| QueryError::Timestamp {
                value: date.to_string(),
            })?,
        Value::DateTime(dt) => zone
            .to_epoch_seconds(dt)
            .map(serde_json::Value::from)
            .ok_or_else(|| QueryError::Timestamp {
                value: dt.to_string(),
            })?,
        Value::List(items) => serde_json::Value::Array(
            items
                .iter()
                .map(|item| to_json(item, zone))
                .collect::<QueryResult<_>>()?,
        ),
        Value::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(key, item)| to_json(item, zone).map(|json| (key.clone(), json)))
                .collect::<QueryResult<_>>()?,
        ),
    };
    Ok(json)
}
