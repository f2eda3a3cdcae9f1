// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Branch-aware edge synthesis.
//!
//! Edges are derived per node in ascending position order:
//! - a Decision with branches emits one labelled edge per resolvable branch, in branch order;
//! - an End node emits nothing;
//! - a resolvable explicit `target` wins over everything below it;
//! - a node inside a branch region flows to the next node, except the region's last node, which
//!   jumps to the reconvergence point;
//! - anything else flows to the next node when there is one.
//!
//! Targets that do not resolve are dropped without failing the synthesis.

use crate::model::{BranchRegion, NodeKind, PathwayEdge, PathwayNode, TargetResolver};

use super::regions::{RegionMap, RegionPolicy, StructuralError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SynthesisOptions {
    pub region_policy: RegionPolicy,
}

/// Edges plus the branch regions they were derived from.
///
/// `regions` lists every region as computed, in Decision order; when regions overlap, the
/// configured [`RegionPolicy`] decides which of them governs a shared node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Synthesis {
    pub edges: Vec<PathwayEdge>,
    pub regions: Vec<BranchRegion>,
}

/// Derives the full edge list using the default region policy.
pub fn synthesize(nodes: &[PathwayNode]) -> Vec<PathwayEdge> {
    // The default policy never rejects.
    synthesize_with(nodes, &SynthesisOptions::default())
        .map(|synthesis| synthesis.edges)
        .unwrap_or_default()
}

pub fn synthesize_with(
    nodes: &[PathwayNode],
    options: &SynthesisOptions,
) -> Result<Synthesis, StructuralError> {
    let resolver = TargetResolver::new(nodes);
    let regions = RegionMap::compute(nodes, &resolver, options.region_policy)?;
    let edges = emit_edges(nodes, &resolver, &regions);
    tracing::trace!(nodes = nodes.len(), edges = edges.len(), "synthesized pathway edges");
    Ok(Synthesis {
        edges,
        regions: regions.into_regions(),
    })
}

/// The branch regions of `nodes` under the default region policy.
pub fn branch_regions(nodes: &[PathwayNode]) -> Vec<BranchRegion> {
    let resolver = TargetResolver::new(nodes);
    RegionMap::compute(nodes, &resolver, RegionPolicy::default())
        .map(RegionMap::into_regions)
        .unwrap_or_default()
}

fn emit_edges(
    nodes: &[PathwayNode],
    resolver: &TargetResolver<'_>,
    regions: &RegionMap,
) -> Vec<PathwayEdge> {
    let len = nodes.len();
    let mut edges = Vec::with_capacity(len + len / 2);

    for (index, node) in nodes.iter().enumerate() {
        if node.is_branching() {
            for branch in node.branches() {
                match resolver.resolve_opt(branch.target()) {
                    Some(target) => {
                        edges.push(PathwayEdge::labelled(index, target, branch.label()));
                    }
                    None => tracing::debug!(
                        node = index,
                        label = branch.label(),
                        "dropping branch with unresolved target"
                    ),
                }
            }
            continue;
        }

        if node.kind() == NodeKind::End {
            continue;
        }

        if let Some(explicit) = node.target() {
            match resolver.resolve(explicit) {
                Some(target) => {
                    edges.push(PathwayEdge::new(index, target));
                    continue;
                }
                None => tracing::debug!(
                    node = index,
                    target = %explicit,
                    "ignoring unresolved explicit target"
                ),
            }
        }

        let next = match regions.region_at(index) {
            Some(region) if region.end() == index => region.reconvergence(),
            _ => index + 1,
        };
        if next < len {
            edges.push(PathwayEdge::new(index, next));
        }
    }

    edges
}
