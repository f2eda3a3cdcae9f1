// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Field deserializers for hand-authored and generated JSON.
//!
//! Optional fields of the wrong JSON type deserialize as absent instead of failing the whole
//! document; list entries that do not parse are skipped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::ids::NodeKey;
use super::node::{Branch, NodeKind, NodeRef};

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn key<'de, D>(deserializer: D) -> Result<Option<NodeKey>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => NodeKey::new(value).ok(),
        _ => None,
    })
}

pub(crate) fn kind<'de, D>(deserializer: D) -> Result<NodeKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => NodeKind::from_name(&value).unwrap_or_default(),
        _ => NodeKind::default(),
    })
}

pub(crate) fn node_ref<'de, D>(deserializer: D) -> Result<Option<NodeRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(NodeRef::from_json(&Value::deserialize(deserializer)?))
}

pub(crate) fn branches<'de, D>(deserializer: D) -> Result<Vec<Branch>, D::Error>
where
    D: Deserializer<'de>,
{
    entries(deserializer)
}

pub(crate) fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_items(Value::deserialize(deserializer)?))
}

pub(crate) fn opt_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Array(_) => Some(string_items(value)),
        _ => None,
    })
}

/// Parses every array element as `T`, skipping elements that do not fit.
pub(crate) fn entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(entry) => out.push(entry),
            Err(err) => {
                tracing::warn!(position, error = %err, "skipping list entry that does not parse");
            }
        }
    }
    Ok(out)
}

fn string_items(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(value) => Some(value),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
