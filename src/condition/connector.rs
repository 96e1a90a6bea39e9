//! Connector definitions for condition nodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boolean combinator joining a node's children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connector {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl Connector {
    /// Textual form used in serialized trees
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names neither connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConnector(pub String);

impl fmt::Display for UnknownConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown connector {:?}", self.0)
    }
}

impl std::error::Error for UnknownConnector {}

impl FromStr for Connector {
    type Err = UnknownConnector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Connector::And),
            "OR" => Ok(Connector::Or),
            other => Err(UnknownConnector(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connector() {
        assert_eq!("AND".parse::<Connector>(), Ok(Connector::And));
        assert_eq!("OR".parse::<Connector>(), Ok(Connector::Or));
        assert_eq!(
            "and".parse::<Connector>(),
            Err(UnknownConnector("and".to_string()))
        );
        assert_eq!(
            "XOR".parse::<Connector>().unwrap_err().to_string(),
            "unknown connector \"XOR\""
        );
    }

    #[test]
    fn test_connector_serde_form() {
        assert_eq!(serde_json::to_string(&Connector::Or).unwrap(), "\"OR\"");
        assert_eq!(
            serde_json::from_str::<Connector>("\"AND\"").unwrap(),
            Connector::And
        );
        assert_eq!(Connector::default(), Connector::And);
    }
}
