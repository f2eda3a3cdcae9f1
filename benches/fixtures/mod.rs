// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use carepath::model::{Branch, NodeKind, NodeList, PathwayEdge, PathwayNode};

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    if prefix.len() >= target_len {
        return prefix[..target_len].to_owned();
    }

    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

pub fn checksum_edges(edges: &[PathwayEdge]) -> u64 {
    let mut acc = 0u64;
    for edge in edges {
        acc = acc.wrapping_mul(131).wrapping_add(edge.source() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(edge.destination() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(edge.label().map_or(0, str::len) as u64);
    }
    acc
}

pub mod pathway {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Params {
        /// Decision/branches/join blocks between Start and End.
        pub segments: usize,
        pub branches: usize,
        /// The first branch of every segment is itself a Decision over its siblings.
        pub nested: bool,
        /// Targets are rewritten to generated keys.
        pub keyed: bool,
        pub label_len: usize,
    }

    impl Params {
        pub const fn new(
            segments: usize,
            branches: usize,
            nested: bool,
            keyed: bool,
            label_len: usize,
        ) -> Self {
            Self {
                segments,
                branches,
                nested,
                keyed,
                label_len,
            }
        }

        pub const fn node_count(self) -> usize {
            2 + self.segments * (self.branches + 2)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        Medium,
        Large500,
        Large500Nested,
        Large500Keyed,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::Medium => "medium",
                Self::Large500 => "large_500",
                Self::Large500Nested => "large_500_nested",
                Self::Large500Keyed => "large_500_keyed",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Small => Params::new(3, 2, false, false, 24),
                Self::Medium => Params::new(20, 3, false, false, 48),
                Self::Large500 => Params::new(83, 4, false, false, 96),
                Self::Large500Nested => Params::new(83, 4, true, false, 96),
                Self::Large500Keyed => Params::new(83, 4, false, true, 96),
            }
        }
    }

    fn label(kind: NodeKind, index: usize, len: usize) -> String {
        ascii_repeat_to_len(&format!("{kind} step {index} \"checked\" & noted"), 'x', len)
    }

    /// Start, then `segments` blocks of one Decision fanning out to `branches` Process nodes that
    /// reconverge on a join node, then End. Every other node carries a note.
    pub fn node_list(params: Params) -> NodeList {
        assert!(params.branches >= 2, "branches must be >= 2");

        let mut nodes = NodeList::default();
        nodes.push(PathwayNode::start(label(NodeKind::Start, 0, params.label_len)));

        for _ in 0..params.segments {
            let decision = nodes.len();
            let branches = (0..params.branches)
                .map(|pos| Branch::new(format!("Option {pos}"), decision + 1 + pos));
            nodes.push(
                PathwayNode::decision(label(NodeKind::Decision, decision, params.label_len), branches)
                    .with_notes("Reassess before choosing"),
            );

            for pos in 0..params.branches {
                let index = decision + 1 + pos;
                let node = if params.nested && pos == 0 {
                    PathwayNode::decision(
                        label(NodeKind::Decision, index, params.label_len),
                        [
                            Branch::new("Yes", index + 1),
                            Branch::new("No", index + 2),
                        ],
                    )
                } else {
                    PathwayNode::process(label(NodeKind::Process, index, params.label_len))
                };
                let node = if index % 2 == 0 {
                    node.with_notes(format!("Document finding {index}"))
                } else {
                    node
                };
                nodes.push(node);
            }

            let join = nodes.len();
            nodes.push(PathwayNode::process(label(NodeKind::Process, join, params.label_len)));
        }

        let end = nodes.len();
        nodes.push(PathwayNode::end(label(NodeKind::End, end, params.label_len)));

        if params.keyed {
            nodes.assign_keys();
        }
        nodes
    }

    pub fn fixture(case: Case) -> NodeList {
        node_list(case.params())
    }
}
