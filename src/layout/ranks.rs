// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use crate::model::{NodeKind, PathwayNode, TargetResolver};

/// Rank constraints for ranked-digraph layouts.
///
/// The first Start node is pinned to the top rank, every End node to the bottom rank, and the
/// distinct branch targets of each Decision share a rank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankHints {
    pub source: Option<usize>,
    pub sinks: Vec<usize>,
    pub same_rank: Vec<Vec<usize>>,
}

impl RankHints {
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.sinks.is_empty() && self.same_rank.is_empty()
    }
}

pub fn rank_hints(nodes: &[PathwayNode]) -> RankHints {
    let resolver = TargetResolver::new(nodes);
    let mut hints = RankHints::default();

    for (index, node) in nodes.iter().enumerate() {
        match node.kind() {
            NodeKind::Start if hints.source.is_none() => hints.source = Some(index),
            NodeKind::End => hints.sinks.push(index),
            NodeKind::Decision => {
                let mut targets = SmallVec::<[usize; 4]>::new();
                for target in node
                    .branches()
                    .iter()
                    .filter_map(|branch| resolver.resolve_opt(branch.target()))
                {
                    if !targets.contains(&target) {
                        targets.push(target);
                    }
                }
                if targets.len() >= 2 {
                    hints.same_rank.push(targets.into_vec());
                }
            }
            _ => {}
        }
    }

    hints
}
