// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Deref;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::ids::NodeKey;
use super::lenient;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, JsonSchema,
)]
pub enum NodeKind {
    Start,
    Decision,
    #[default]
    Process,
    End,
    Reevaluation,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Decision => "Decision",
            Self::Process => "Process",
            Self::End => "End",
            Self::Reevaluation => "Reevaluation",
        }
    }

    /// Case-insensitive lookup; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        [Self::Start, Self::Decision, Self::Process, Self::End, Self::Reevaluation]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to another node: either its list position or its stable key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum NodeRef {
    Index(i64),
    Key(NodeKey),
}

impl NodeRef {
    pub fn index(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }

    pub fn key(key: NodeKey) -> Self {
        Self::Key(key)
    }

    /// Integers and floats (truncated) are positions, strings are keys; anything else is absent.
    pub(crate) fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => {
                if let Some(index) = number.as_i64() {
                    Some(Self::Index(index))
                } else if let Some(index) = number.as_u64() {
                    Some(Self::Index(i64::try_from(index).unwrap_or(i64::MAX)))
                } else {
                    number.as_f64().filter(|f| f.is_finite()).map(|f| Self::Index(f.trunc() as i64))
                }
            }
            Value::String(key) => NodeKey::new(key.as_str()).ok().map(Self::Key),
            _ => None,
        }
    }
}

impl From<usize> for NodeRef {
    fn from(index: usize) -> Self {
        Self::index(index)
    }
}

impl From<NodeKey> for NodeRef {
    fn from(key: NodeKey) -> Self {
        Self::Key(key)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::Key(key) => write!(f, "'{key}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Branch {
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::node_ref")]
    #[schemars(with = "Option<NodeRef>")]
    target: Option<NodeRef>,
}

impl Branch {
    pub fn new(label: impl Into<String>, target: impl Into<NodeRef>) -> Self {
        Self {
            label: label.into(),
            target: Some(target.into()),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> Option<&NodeRef> {
        self.target.as_ref()
    }
}

/// One step of a clinical pathway.
///
/// A node's identity is its position in the owning list; `key` is an optional stable alias that
/// targets may use instead of positions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PathwayNode {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::key")]
    #[schemars(with = "Option<NodeKey>")]
    key: Option<NodeKey>,
    #[serde(rename = "type", default, deserialize_with = "lenient::kind")]
    #[schemars(with = "NodeKind")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    label: Option<String>,
    #[serde(
        default,
        alias = "detail",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::text"
    )]
    #[schemars(with = "Option<String>")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::branches")]
    #[schemars(with = "Vec<Branch>")]
    branches: Vec<Branch>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::node_ref")]
    #[schemars(with = "Option<NodeRef>")]
    target: Option<NodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    role: Option<String>,
}

impl PathwayNode {
    pub fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn start(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Start, label)
    }

    pub fn decision(label: impl Into<String>, branches: impl IntoIterator<Item = Branch>) -> Self {
        Self::new(NodeKind::Decision, label).with_branches(branches)
    }

    pub fn process(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Process, label)
    }

    pub fn end(label: impl Into<String>) -> Self {
        Self::new(NodeKind::End, label)
    }

    pub fn with_key(mut self, key: NodeKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn with_branches(mut self, branches: impl IntoIterator<Item = Branch>) -> Self {
        self.branches = branches.into_iter().collect();
        self
    }

    pub fn with_target(mut self, target: impl Into<NodeRef>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn key(&self) -> Option<&NodeKey> {
        self.key.as_ref()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The authored label, or `Step <index>` when the node has none.
    pub fn display_label(&self, index: usize) -> String {
        match self.label.as_deref() {
            Some(label) => label.to_owned(),
            None => format!("Step {index}"),
        }
    }

    /// Notes with surrounding whitespace removed; blank notes read as absent.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().map(str::trim).filter(|notes| !notes.is_empty())
    }

    pub fn evidence(&self) -> Option<&str> {
        self.evidence.as_deref()
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn target(&self) -> Option<&NodeRef> {
        self.target.as_ref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Whether the node's outgoing edges come from its branch list.
    pub fn is_branching(&self) -> bool {
        self.kind == NodeKind::Decision && !self.branches.is_empty()
    }
}

/// An ordered node list, as authored upstream.
///
/// Deserialization never drops elements: an element that is not a usable node object becomes a
/// default Process node so every later position keeps its meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct NodeList(Vec<PathwayNode>);

impl NodeList {
    pub fn new(nodes: Vec<PathwayNode>) -> Self {
        Self(nodes)
    }

    pub fn into_inner(self) -> Vec<PathwayNode> {
        self.0
    }

    pub fn push(&mut self, node: PathwayNode) -> usize {
        self.0.push(node);
        self.0.len() - 1
    }

    pub fn resolver(&self) -> TargetResolver<'_> {
        TargetResolver::new(&self.0)
    }

    /// Gives every keyless node a generated key and rewrites positional targets into key
    /// targets, so the list can be reordered afterwards without breaking its edges.
    ///
    /// Positional targets that do not resolve are left untouched.
    pub fn assign_keys(&mut self) {
        let mut taken = self
            .0
            .iter()
            .filter_map(|node| node.key.as_ref().map(|key| key.as_str().to_owned()))
            .collect::<HashSet<_>>();

        for (index, node) in self.0.iter_mut().enumerate() {
            if node.key.is_some() {
                continue;
            }
            let mut candidate = format!("n{index}");
            let mut suffix = 1usize;
            while taken.contains(&candidate) {
                candidate = format!("n{index}_{suffix}");
                suffix += 1;
            }
            if let Ok(key) = NodeKey::new(candidate.clone()) {
                taken.insert(candidate);
                node.key = Some(key);
            }
        }

        let keys = self.0.iter().map(|node| node.key.clone()).collect::<Vec<_>>();
        let len = self.0.len();
        let to_key = |target: &mut Option<NodeRef>| {
            if let Some(NodeRef::Index(index)) = target {
                let resolved = usize::try_from(*index).ok().filter(|index| *index < len);
                if let Some(key) = resolved.and_then(|index| keys[index].clone()) {
                    *target = Some(NodeRef::Key(key));
                }
            }
        };

        for node in &mut self.0 {
            to_key(&mut node.target);
            for branch in &mut node.branches {
                to_key(&mut branch.target);
            }
        }
    }
}

impl Deref for NodeList {
    type Target = [PathwayNode];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<PathwayNode>> for NodeList {
    fn from(nodes: Vec<PathwayNode>) -> Self {
        Self(nodes)
    }
}

impl FromIterator<PathwayNode> for NodeList {
    fn from_iter<I: IntoIterator<Item = PathwayNode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for NodeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Value>::deserialize(deserializer)?;
        let nodes = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<PathwayNode>(item).unwrap_or_else(|err| {
                    tracing::warn!(index, error = %err, "node is not an object; using a default step");
                    PathwayNode::default()
                })
            })
            .collect();
        Ok(Self(nodes))
    }
}

/// Maps target references onto list positions.
///
/// Keys resolve through an index built once per list; when two nodes share a key the earlier
/// node wins. Positions outside `[0, n)` and unknown keys resolve to `None`.
#[derive(Debug, Clone)]
pub struct TargetResolver<'a> {
    len: usize,
    keys: HashMap<&'a str, usize>,
}

impl<'a> TargetResolver<'a> {
    pub fn new(nodes: &'a [PathwayNode]) -> Self {
        let mut keys = HashMap::new();
        for (index, node) in nodes.iter().enumerate() {
            if let Some(key) = node.key() {
                keys.entry(key.as_str()).or_insert(index);
            }
        }
        Self {
            len: nodes.len(),
            keys,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn resolve(&self, target: &NodeRef) -> Option<usize> {
        match target {
            NodeRef::Index(index) => usize::try_from(*index).ok().filter(|index| *index < self.len),
            NodeRef::Key(key) => self.keys.get(key.as_str()).copied(),
        }
    }

    pub(crate) fn resolve_opt(&self, target: Option<&NodeRef>) -> Option<usize> {
        target.and_then(|target| self.resolve(target))
    }
}

#[cfg(test)]
mod tests {
    use super::{Branch, NodeKind, NodeList, NodeRef, PathwayNode};
    use crate::model::NodeKey;

    fn key(value: &str) -> NodeKey {
        NodeKey::new(value).expect("node key")
    }

    #[test]
    fn node_kind_names_are_case_insensitive() {
        assert_eq!(NodeKind::from_name("decision"), Some(NodeKind::Decision));
        assert_eq!(NodeKind::from_name(" End "), Some(NodeKind::End));
        assert_eq!(NodeKind::from_name("question"), None);
    }

    #[test]
    fn missing_fields_default_to_process_with_placeholder_label() {
        let nodes: NodeList = serde_json::from_str(r#"[{}, {"type": "Bogus", "label": 4}]"#)
            .expect("node list");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind(), NodeKind::Process);
        assert_eq!(nodes[0].display_label(0), "Step 0");
        assert_eq!(nodes[1].kind(), NodeKind::Process);
        assert_eq!(nodes[1].display_label(1), "Step 1");
    }

    #[test]
    fn non_object_elements_keep_their_position() {
        let nodes: NodeList =
            serde_json::from_str(r#"[{"type": "Start", "label": "a"}, 7, {"type": "End"}]"#)
                .expect("node list");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1], PathwayNode::default());
        assert_eq!(nodes[2].kind(), NodeKind::End);
    }

    #[test]
    fn targets_accept_integers_floats_and_keys() {
        let nodes: NodeList = serde_json::from_str(
            r#"[
                {"type": "Process", "target": 2.0},
                {"type": "Process", "target": "icu"},
                {"type": "Process", "target": true},
                {"type": "Decision", "branches": [{"label": "Yes", "target": -1}, "junk", {"label": 3}]}
            ]"#,
        )
        .expect("node list");

        assert_eq!(nodes[0].target(), Some(&NodeRef::Index(2)));
        assert_eq!(nodes[1].target(), Some(&NodeRef::Key(key("icu"))));
        assert_eq!(nodes[2].target(), None);
        assert_eq!(nodes[3].branches().len(), 2);
        assert_eq!(nodes[3].branches()[0].target(), Some(&NodeRef::Index(-1)));
        assert_eq!(nodes[3].branches()[1].label(), "");
        assert_eq!(nodes[3].branches()[1].target(), None);
    }

    #[test]
    fn detail_is_accepted_as_notes() {
        let nodes: NodeList =
            serde_json::from_str(r#"[{"type": "Process", "label": "x", "detail": "  give O2 "}]"#)
                .expect("node list");
        assert_eq!(nodes[0].notes(), Some("give O2"));
    }

    #[test]
    fn resolver_handles_positions_and_keys() {
        let nodes = NodeList::new(vec![
            PathwayNode::start("a").with_key(key("entry")),
            PathwayNode::process("b").with_key(key("entry")),
            PathwayNode::end("c"),
        ]);
        let resolver = nodes.resolver();

        assert_eq!(resolver.resolve(&NodeRef::Index(2)), Some(2));
        assert_eq!(resolver.resolve(&NodeRef::Index(3)), None);
        assert_eq!(resolver.resolve(&NodeRef::Index(-1)), None);
        assert_eq!(resolver.resolve(&NodeRef::Key(key("entry"))), Some(0));
        assert_eq!(resolver.resolve(&NodeRef::Key(key("nope"))), None);
    }

    #[test]
    fn assign_keys_makes_targets_survive_reordering() {
        let mut nodes = NodeList::new(vec![
            PathwayNode::start("a"),
            PathwayNode::decision("b?", [Branch::new("Yes", 2usize), Branch::new("No", 3usize)]),
            PathwayNode::process("c").with_key(key("n3")),
            PathwayNode::end("d"),
        ]);
        nodes.assign_keys();

        assert_eq!(nodes[0].key(), Some(&key("n0")));
        assert_eq!(nodes[2].key(), Some(&key("n3")));
        // `n3` is taken by node 2, so node 3 gets a suffixed key.
        assert_eq!(nodes[3].key(), Some(&key("n3_1")));
        assert_eq!(nodes[1].branches()[0].target(), Some(&NodeRef::Key(key("n3"))));
        assert_eq!(nodes[1].branches()[1].target(), Some(&NodeRef::Key(key("n3_1"))));

        let mut reordered = nodes.into_inner();
        reordered.swap(2, 3);
        let reordered = NodeList::new(reordered);
        let resolver = reordered.resolver();
        let yes = reordered[1].branches()[0].target().expect("yes target");
        assert_eq!(resolver.resolve(yes), Some(3));
    }
}
