// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Non-fatal findings about a node list.
//!
//! Synthesis silently tolerates everything reported here; `diagnose` exists so authors can see
//! which edges were dropped and why.

use std::collections::HashMap;

use crate::model::{NodeKind, NodeRef, PathwayNode, TargetResolver};

use super::regions::{RegionMap, RegionPolicy};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("node list has no Start node")]
    MissingStart,
    #[error("node {node}: branch {branch} ({label:?}) targets {target}, which does not resolve")]
    InvalidBranchTarget {
        node: usize,
        branch: usize,
        label: String,
        target: NodeRef,
    },
    #[error("node {node}: branch {branch} ({label:?}) has no target")]
    MissingBranchTarget {
        node: usize,
        branch: usize,
        label: String,
    },
    #[error("node {node}: target {target} does not resolve; falling back to sequential flow")]
    InvalidTarget { node: usize, target: NodeRef },
    #[error("node {node}: target {target} is ignored on a {kind} node")]
    IgnoredTarget {
        node: usize,
        kind: &'static str,
        target: NodeRef,
    },
    #[error("node {second}: key {key:?} already used by node {first}")]
    DuplicateKey {
        key: String,
        first: usize,
        second: usize,
    },
    #[error(
        "node {node} lies in branch regions of decision {first_decision} and decision {second_decision}"
    )]
    OverlappingRegions {
        node: usize,
        first_decision: usize,
        second_decision: usize,
    },
}

impl Diagnostic {
    /// The node the finding is about, if it concerns a single node.
    pub fn node(&self) -> Option<usize> {
        match self {
            Self::MissingStart => None,
            Self::InvalidBranchTarget { node, .. }
            | Self::MissingBranchTarget { node, .. }
            | Self::InvalidTarget { node, .. }
            | Self::IgnoredTarget { node, .. }
            | Self::OverlappingRegions { node, .. } => Some(*node),
            Self::DuplicateKey { second, .. } => Some(*second),
        }
    }
}

/// Collects every finding, ordered by node position.
pub fn diagnose(nodes: &[PathwayNode]) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    if nodes.is_empty() {
        return found;
    }
    if !nodes.iter().any(|node| node.kind() == NodeKind::Start) {
        found.push(Diagnostic::MissingStart);
    }

    let resolver = TargetResolver::new(nodes);
    let mut keys = HashMap::<&str, usize>::new();

    for (index, node) in nodes.iter().enumerate() {
        if let Some(key) = node.key() {
            if let Some(&first) = keys.get(key.as_str()) {
                found.push(Diagnostic::DuplicateKey {
                    key: key.as_str().to_owned(),
                    first,
                    second: index,
                });
            } else {
                keys.insert(key.as_str(), index);
            }
        }

        if node.is_branching() {
            for (branch_index, branch) in node.branches().iter().enumerate() {
                match branch.target() {
                    None => found.push(Diagnostic::MissingBranchTarget {
                        node: index,
                        branch: branch_index,
                        label: branch.label().to_owned(),
                    }),
                    Some(target) if resolver.resolve(target).is_none() => {
                        found.push(Diagnostic::InvalidBranchTarget {
                            node: index,
                            branch: branch_index,
                            label: branch.label().to_owned(),
                            target: target.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let Some(target) = node.target() else {
            continue;
        };
        if node.is_branching() || node.kind() == NodeKind::End {
            found.push(Diagnostic::IgnoredTarget {
                node: index,
                kind: node.kind().as_str(),
                target: target.clone(),
            });
        } else if resolver.resolve(target).is_none() {
            found.push(Diagnostic::InvalidTarget {
                node: index,
                target: target.clone(),
            });
        }
    }

    // FirstWins never fails and records every contested node.
    if let Ok(regions) = RegionMap::compute(nodes, &resolver, RegionPolicy::FirstWins) {
        found.extend(regions.overlaps().iter().map(|overlap| Diagnostic::OverlappingRegions {
            node: overlap.node,
            first_decision: overlap.first_decision,
            second_decision: overlap.second_decision,
        }));
    }

    found.sort_by_key(|diagnostic| diagnostic.node().map_or(0, |node| node + 1));
    found
}
