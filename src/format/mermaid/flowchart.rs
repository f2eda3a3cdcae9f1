// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::format::ident::{node_ident, push_node_ident};
use crate::format::label::{sanitize_label, Dialect};
use crate::format::{DEFAULT_EDGE_LABEL_MAX, DEFAULT_NODE_LABEL_MAX, DEFAULT_NOTE_MAX};
use crate::model::{NodeKind, PathwayEdge, PathwayNode};

const INDENT: &str = "    ";
const EMPTY_BODY: &str = "NoNodes[\"No pathway nodes defined\"]";
const LEGEND_ID: &str = "notes_legend";
const LEGEND_TITLE: &str = "Notes Legend";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowchartOptions {
    pub include_styling: bool,
    pub node_label_max: usize,
    pub edge_label_max: usize,
    pub note_max: usize,
}

impl Default for FlowchartOptions {
    fn default() -> Self {
        Self {
            include_styling: true,
            node_label_max: DEFAULT_NODE_LABEL_MAX,
            edge_label_max: DEFAULT_EDGE_LABEL_MAX,
            note_max: DEFAULT_NOTE_MAX,
        }
    }
}

/// Style classes in the order their `class` lines are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleClass {
    StartEnd,
    Decision,
    Process,
    Reeval,
    NoteBox,
}

impl StyleClass {
    pub fn name(self) -> &'static str {
        match self {
            Self::StartEnd => "startEnd",
            Self::Decision => "decision",
            Self::Process => "process",
            Self::Reeval => "reeval",
            Self::NoteBox => "noteBox",
        }
    }

    fn definition(self) -> &'static str {
        match self {
            Self::StartEnd => {
                "fill:#d4edda,stroke:#28a745,stroke-width:2px,color:#155724,font-weight:bold"
            }
            Self::Decision => {
                "fill:#f8d7da,stroke:#dc3545,stroke-width:2px,color:#721c24,font-weight:bold"
            }
            Self::Process => "fill:#fff3cd,stroke:#ffc107,stroke-width:1px,color:#856404",
            Self::Reeval => "fill:#ffe0b2,stroke:#e65100,stroke-width:2px,color:#bf360c",
            Self::NoteBox => {
                "fill:#bbdefb,stroke:#1565c0,stroke-width:1px,color:#0d47a1,font-size:11px"
            }
        }
    }

    fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Start | NodeKind::End => Self::StartEnd,
            NodeKind::Decision => Self::Decision,
            NodeKind::Reevaluation => Self::Reeval,
            NodeKind::Process => Self::Process,
        }
    }

    const ALL: [Self; 5] =
        [Self::StartEnd, Self::Decision, Self::Process, Self::Reeval, Self::NoteBox];
}

/// Renders a Mermaid `flowchart TD` with default label budgets.
pub fn render_flowchart(
    nodes: &[PathwayNode],
    edges: &[PathwayEdge],
    include_styling: bool,
) -> String {
    render_flowchart_with(
        nodes,
        edges,
        &FlowchartOptions {
            include_styling,
            ..FlowchartOptions::default()
        },
    )
}

pub fn render_flowchart_with(
    nodes: &[PathwayNode],
    edges: &[PathwayEdge],
    options: &FlowchartOptions,
) -> String {
    let mut out = String::with_capacity(64 + nodes.len() * 48 + edges.len() * 24);
    out.push_str("flowchart TD\n");

    if nodes.is_empty() {
        out.push_str(INDENT);
        out.push_str(EMPTY_BODY);
        out.push('\n');
        return out;
    }

    let notes = collect_notes(nodes);

    if options.include_styling {
        out.push('\n');
        for class in StyleClass::ALL {
            out.push_str(INDENT);
            out.push_str("classDef ");
            out.push_str(class.name());
            out.push(' ');
            out.push_str(class.definition());
            out.push('\n');
        }
        out.push('\n');
    }

    let mut note_iter = notes.iter().peekable();
    for (index, node) in nodes.iter().enumerate() {
        let mut label =
            sanitize_label(&node.display_label(index), options.node_label_max, Dialect::Flowchart);
        if let Some(note) = note_iter.next_if(|note| note.node == index) {
            label.push_str(" &#91;Note ");
            label.push_str(itoa::Buffer::new().format(note.number));
            label.push_str("&#93;");
        }

        let (open, close) = shape_delimiters(node.kind());
        out.push_str(INDENT);
        push_node_ident(&mut out, index);
        out.push_str(open);
        out.push('"');
        out.push_str(&label);
        out.push('"');
        out.push_str(close);
        out.push('\n');
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
        match edge.label() {
            Some(label) => {
                out.push_str(" -->|\"");
                out.push_str(&sanitize_label(label, options.edge_label_max, Dialect::Flowchart));
                out.push_str("\"| ");
            }
            None => out.push_str(" --> "),
        }
        push_node_ident(&mut out, edge.destination());
        out.push('\n');
    }

    if !notes.is_empty() {
        out.push('\n');
        out.push_str(INDENT);
        out.push_str("subgraph ");
        out.push_str(LEGEND_ID);
        out.push_str("[\"");
        out.push_str(LEGEND_TITLE);
        out.push_str("\"]\n");
        out.push_str(INDENT);
        out.push_str("direction TB\n");
        for note in &notes {
            let number = itoa::Buffer::new().format(note.number).to_owned();
            out.push_str(INDENT);
            out.push_str("NOTE");
            out.push_str(&number);
            out.push_str("[\"");
            out.push_str(&number);
            out.push_str(". ");
            out.push_str(&sanitize_label(note.text, options.note_max, Dialect::Flowchart));
            out.push_str("\"]\n");
        }
        out.push_str(INDENT);
        out.push_str("end\n");
    }

    if options.include_styling {
        out.push('\n');
        for (class, members) in style_groups(nodes, &notes) {
            out.push_str(INDENT);
            out.push_str("class ");
            out.push_str(&members.join(","));
            out.push(' ');
            out.push_str(class.name());
            out.push('\n');
        }
    }

    out
}

#[derive(Debug, Clone, Copy)]
struct Note<'a> {
    node: usize,
    number: usize,
    text: &'a str,
}

fn collect_notes(nodes: &[PathwayNode]) -> Vec<Note<'_>> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(node, n)| n.notes().map(|text| (node, text)))
        .enumerate()
        .map(|(pos, (node, text))| Note {
            node,
            number: pos + 1,
            text,
        })
        .collect()
}

/// Groups diagram identifiers by style class, in node order within each class.
fn style_groups(
    nodes: &[PathwayNode],
    notes: &[Note<'_>],
) -> BTreeMap<StyleClass, Vec<String>> {
    let node_members = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (StyleClass::for_kind(node.kind()), node_ident(index)));
    let note_members =
        notes.iter().map(|note| (StyleClass::NoteBox, format!("NOTE{}", note.number)));

    node_members.chain(note_members).fold(BTreeMap::new(), |mut groups, (class, ident)| {
        groups.entry(class).or_insert_with(Vec::new).push(ident);
        groups
    })
}

fn shape_delimiters(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Start | NodeKind::End => ("([", "])"),
        NodeKind::Decision => ("{", "}"),
        NodeKind::Reevaluation => ("[/", "\\]"),
        NodeKind::Process => ("[", "]"),
    }
}
