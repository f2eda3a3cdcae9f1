// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graphviz digraph export.
//!
//! Node shapes and fills follow the node kind, rank constraints come from
//! [`rank_hints`](crate::layout::rank_hints), and labels are wrapped rather than truncated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ident::{push_ident_list, push_node_ident};
use super::label::{sanitize_label, Dialect};
use super::DEFAULT_DOT_WRAP;
use crate::layout::rank_hints;
use crate::model::{NodeKind, PathwayEdge, PathwayNode};

const INDENT: &str = "  ";
const GRAPH_ATTRIBUTES: [&str; 5] = [
    "splines=ortho;",
    "nodesep=0.8;",
    "ranksep=1.0;",
    "node [fontname=Helvetica, fontsize=11];",
    "edge [fontname=Helvetica, fontsize=10];",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    #[serde(alias = "TD", alias = "TB", alias = "td", alias = "tb")]
    Vertical,
    #[serde(alias = "LR", alias = "lr")]
    Horizontal,
}

impl Orientation {
    pub fn rankdir(self) -> &'static str {
        match self {
            Self::Vertical => "TB",
            Self::Horizontal => "LR",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown orientation: {0:?} (expected vertical/TD/TB or horizontal/LR)")]
pub struct ParseOrientationError(String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" | "td" | "tb" => Ok(Self::Vertical),
            "horizontal" | "lr" => Ok(Self::Horizontal),
            _ => Err(ParseOrientationError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotOptions {
    pub orientation: Orientation,
    /// Characters per label line before wrapping.
    pub label_wrap: usize,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            label_wrap: DEFAULT_DOT_WRAP,
        }
    }
}

pub fn render_dot(nodes: &[PathwayNode], edges: &[PathwayEdge], orientation: Orientation) -> String {
    render_dot_with(
        nodes,
        edges,
        &DotOptions {
            orientation,
            ..DotOptions::default()
        },
    )
}

pub fn render_dot_with(
    nodes: &[PathwayNode],
    edges: &[PathwayEdge],
    options: &DotOptions,
) -> String {
    if nodes.is_empty() {
        return "digraph G {\n  // No nodes\n}\n".to_owned();
    }

    let mut out = String::with_capacity(256 + nodes.len() * 96 + edges.len() * 24);
    out.push_str("digraph G {\n");
    out.push_str(INDENT);
    out.push_str("rankdir=");
    out.push_str(options.orientation.rankdir());
    out.push_str(";\n");
    for attribute in GRAPH_ATTRIBUTES {
        out.push_str(INDENT);
        out.push_str(attribute);
        out.push('\n');
    }

    for (index, node) in nodes.iter().enumerate() {
        let (shape, fill) = shape_and_fill(node.kind());
        let mut label =
            sanitize_label(&node.display_label(index), options.label_wrap, Dialect::Digraph);
        if node.notes().is_some() {
            label.push_str("\\n(Note ");
            label.push_str(itoa::Buffer::new().format(index + 1));
            label.push(')');
        }

        out.push_str(INDENT);
        push_node_ident(&mut out, index);
        out.push_str(" [label=\"");
        out.push_str(&label);
        out.push_str("\", shape=");
        out.push_str(shape);
        out.push_str(", style=filled, fillcolor=\"");
        out.push_str(fill);
        out.push_str("\"];\n");
    }

    out.push('\n');
    let hints = rank_hints(nodes);
    if let Some(source) = hints.source {
        push_rank(&mut out, "source", &[source]);
    }
    if !hints.sinks.is_empty() {
        push_rank(&mut out, "sink", &hints.sinks);
    }
    for group in &hints.same_rank {
        push_rank(&mut out, "same", group);
    }

    out.push('\n');
    let len = nodes.len();
    for edge in edges {
        if edge.source() >= len || edge.destination() >= len {
            tracing::debug!(
                source = edge.source(),
                destination = edge.destination(),
                "skipping edge outside the node list"
            );
            continue;
        }
        out.push_str(INDENT);
        push_node_ident(&mut out, edge.source());
        out.push_str(" -> ");
        push_node_ident(&mut out, edge.destination());
        if let Some(label) = edge.label() {
            out.push_str(" [label=\"");
            out.push_str(&sanitize_label(label, options.label_wrap, Dialect::Digraph));
            out.push_str("\"]");
        }
        out.push_str(";\n");
    }

    out.push_str("}\n");
    out
}

fn push_rank(out: &mut String, rank: &str, indices: &[usize]) {
    out.push_str(INDENT);
    out.push_str("{ rank=");
    out.push_str(rank);
    out.push_str("; ");
    push_ident_list(out, indices, "; ");
    out.push_str("; }\n");
}

fn shape_and_fill(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Decision => ("diamond", "#F8CECC"),
        NodeKind::Start | NodeKind::End => ("oval", "#D5E8D4"),
        NodeKind::Process | NodeKind::Reevaluation => ("box", "#FFF2CC"),
    }
}
