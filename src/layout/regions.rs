// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::{BranchRegion, PathwayNode, TargetResolver};

/// How a node claimed by the regions of two different Decisions is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionPolicy {
    /// Decisions are visited in ascending order and a later claim replaces an earlier one, so a
    /// Decision nested inside another Decision's branch owns its own regions.
    #[default]
    InnermostWins,
    /// The earliest Decision keeps the node.
    FirstWins,
    /// Any overlap is a [`StructuralError`].
    Reject,
}

impl RegionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InnermostWins => "innermost_wins",
            Self::FirstWins => "first_wins",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for RegionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region policy: {0:?} (expected innermost_wins, first_wins or reject)")]
pub struct ParseRegionPolicyError(String);

impl FromStr for RegionPolicy {
    type Err = ParseRegionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "innermost_wins" | "innermost" => Ok(Self::InnermostWins),
            "first_wins" | "first" => Ok(Self::FirstWins),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseRegionPolicyError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error(
        "node {node} lies in branch regions of decision {first_decision} and decision {second_decision}"
    )]
    OverlappingRegions {
        node: usize,
        first_decision: usize,
        second_decision: usize,
    },
}

/// Two Decisions claiming the same node; recorded under the non-rejecting policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegionOverlap {
    pub(crate) node: usize,
    pub(crate) first_decision: usize,
    pub(crate) second_decision: usize,
}

/// Regions computed for one node list plus the owning region of every position.
#[derive(Debug, Clone, Default)]
pub(crate) struct RegionMap {
    regions: Vec<BranchRegion>,
    owner: Vec<Option<usize>>,
    overlaps: Vec<RegionOverlap>,
}

impl RegionMap {
    pub(crate) fn compute(
        nodes: &[PathwayNode],
        resolver: &TargetResolver<'_>,
        policy: RegionPolicy,
    ) -> Result<Self, StructuralError> {
        let mut map = Self {
            regions: Vec::new(),
            owner: vec![None; nodes.len()],
            overlaps: Vec::new(),
        };

        for (decision, node) in nodes.iter().enumerate() {
            if !node.is_branching() {
                continue;
            }

            let mut forward = node
                .branches()
                .iter()
                .filter_map(|branch| resolver.resolve_opt(branch.target()))
                .filter(|target| *target > decision)
                .collect::<SmallVec<[usize; 4]>>();
            forward.sort_unstable();
            forward.dedup();

            let Some(&last) = forward.last() else {
                continue;
            };
            if forward.len() < 2 {
                continue;
            }
            let reconvergence = last + 1;

            for (pos, &start) in forward.iter().enumerate() {
                let next = forward.get(pos + 1).copied().unwrap_or(reconvergence);
                let region = BranchRegion::new(decision, start, next - 1, reconvergence);
                let region_id = map.regions.len();
                map.regions.push(region);

                for index in region.start()..=region.end() {
                    map.claim(index, region_id, policy)?;
                }
            }
        }

        Ok(map)
    }

    fn claim(
        &mut self,
        index: usize,
        region_id: usize,
        policy: RegionPolicy,
    ) -> Result<(), StructuralError> {
        let Some(existing) = self.owner[index] else {
            self.owner[index] = Some(region_id);
            return Ok(());
        };

        let overlap = RegionOverlap {
            node: index,
            first_decision: self.regions[existing].decision(),
            second_decision: self.regions[region_id].decision(),
        };
        match policy {
            RegionPolicy::Reject => {
                return Err(StructuralError::OverlappingRegions {
                    node: overlap.node,
                    first_decision: overlap.first_decision,
                    second_decision: overlap.second_decision,
                });
            }
            RegionPolicy::FirstWins => {}
            RegionPolicy::InnermostWins => {
                tracing::debug!(
                    node = index,
                    outer = overlap.first_decision,
                    inner = overlap.second_decision,
                    "nested decision takes over branch region"
                );
                self.owner[index] = Some(region_id);
            }
        }
        self.overlaps.push(overlap);
        Ok(())
    }

    /// The region owning `index`, if any.
    pub(crate) fn region_at(&self, index: usize) -> Option<&BranchRegion> {
        self.owner.get(index).copied().flatten().map(|id| &self.regions[id])
    }

    pub(crate) fn regions(&self) -> &[BranchRegion] {
        &self.regions
    }

    pub(crate) fn overlaps(&self) -> &[RegionOverlap] {
        &self.overlaps
    }

    pub(crate) fn into_regions(self) -> Vec<BranchRegion> {
        self.regions
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{RegionMap, RegionPolicy, StructuralError};
    use crate::model::fixtures::{nested_split, two_way_split};
    use crate::model::{BranchRegion, Branch, NodeList, PathwayNode};

    fn compute(nodes: &NodeList, policy: RegionPolicy) -> Result<RegionMap, StructuralError> {
        RegionMap::compute(nodes, &nodes.resolver(), policy)
    }

    #[test]
    fn two_way_split_has_one_region_per_branch() {
        let nodes = two_way_split();
        let map = compute(&nodes, RegionPolicy::default()).expect("regions");

        assert_eq!(map.regions(), &[BranchRegion::new(1, 2, 2, 4), BranchRegion::new(1, 3, 3, 4)]);
        assert_eq!(map.region_at(2), Some(&BranchRegion::new(1, 2, 2, 4)));
        assert_eq!(map.region_at(4), None);
        assert!(map.overlaps().is_empty());
    }

    #[test]
    fn single_forward_target_yields_no_region() {
        let nodes = NodeList::new(vec![
            PathwayNode::start("a"),
            PathwayNode::decision("b?", [Branch::new("Yes", 2usize), Branch::new("Back", 0usize)]),
            PathwayNode::process("c"),
            PathwayNode::end("d"),
        ]);
        let map = compute(&nodes, RegionPolicy::default()).expect("regions");
        assert!(map.regions().is_empty());
    }

    #[test]
    fn duplicate_targets_count_once() {
        let nodes = NodeList::new(vec![
            PathwayNode::decision("a?", [Branch::new("Yes", 1usize), Branch::new("Also", 1usize)]),
            PathwayNode::process("b"),
            PathwayNode::end("c"),
        ]);
        let map = compute(&nodes, RegionPolicy::default()).expect("regions");
        assert!(map.regions().is_empty());
    }

    #[rstest]
    #[case::innermost(RegionPolicy::InnermostWins, 3)]
    #[case::first(RegionPolicy::FirstWins, 1)]
    fn nested_split_ownership_follows_policy(
        #[case] policy: RegionPolicy,
        #[case] owner_of_four: usize,
    ) {
        let nodes = nested_split();
        let map = compute(&nodes, policy).expect("regions");

        assert_eq!(map.region_at(4).map(BranchRegion::decision), Some(owner_of_four));
        assert_eq!(map.region_at(6).map(BranchRegion::decision), Some(1));
        assert_eq!(map.overlaps().len(), 2);
    }

    #[test]
    fn reject_policy_reports_first_overlap() {
        let nodes = nested_split();
        let err = compute(&nodes, RegionPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            StructuralError::OverlappingRegions { node: 4, first_decision: 1, second_decision: 3 }
        );
    }

    #[rstest]
    #[case("innermost_wins", RegionPolicy::InnermostWins)]
    #[case("first-wins", RegionPolicy::FirstWins)]
    #[case("REJECT", RegionPolicy::Reject)]
    fn region_policy_parses_from_cli_spelling(#[case] raw: &str, #[case] expected: RegionPolicy) {
        assert_eq!(raw.parse::<RegionPolicy>(), Ok(expected));
    }
}
