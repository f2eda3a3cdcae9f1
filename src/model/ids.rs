// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A stable identifier that survives reordering of a node list.
///
/// Keys are free-form but must be a single non-empty token: no whitespace, and no characters
/// that would need quoting when a key is echoed into diagnostics (`"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_key(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("key must not be empty")]
    Empty,
    #[error("key must not contain whitespace")]
    ContainsWhitespace,
    #[error("key must not contain '\"'")]
    ContainsQuote,
}

fn validate_key(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsWhitespace);
    }
    if value.contains('"') {
        return Err(IdError::ContainsQuote);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKeyTag {}
pub type NodeKey = Id<NodeKeyTag>;

impl JsonSchema for NodeKey {
    fn schema_name() -> Cow<'static, str> {
        "NodeKey".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "minLength": 1,
            "pattern": "^[^\\s\"]+$"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{IdError, NodeKey};

    #[test]
    fn key_rejects_empty() {
        assert_eq!(NodeKey::new(""), Err(IdError::Empty));
    }

    #[test]
    fn key_rejects_whitespace_and_quotes() {
        assert_eq!(NodeKey::new("icu bed"), Err(IdError::ContainsWhitespace));
        assert_eq!(NodeKey::new("a\"b"), Err(IdError::ContainsQuote));
    }

    #[test]
    fn key_serializes_as_plain_string() {
        let key = NodeKey::new("triage").expect("key");
        assert_eq!(serde_json::to_string(&key).expect("serialize"), "\"triage\"");

        let back: NodeKey = serde_json::from_str("\"triage\"").expect("deserialize");
        assert_eq!(back, key);

        serde_json::from_str::<NodeKey>("\"\"").unwrap_err();
    }
}
