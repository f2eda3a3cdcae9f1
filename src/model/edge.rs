// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

/// A derived, directed edge between two list positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PathwayEdge {
    source: usize,
    destination: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl PathwayEdge {
    pub fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination,
            label: None,
        }
    }

    /// An edge carrying a branch label; blank labels are dropped.
    pub fn labelled(source: usize, destination: usize, label: &str) -> Self {
        let label = Some(label).filter(|label| !label.trim().is_empty()).map(ToOwned::to_owned);
        Self {
            source,
            destination,
            label,
        }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn destination(&self) -> usize {
        self.destination
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// The contiguous span `[start, end]` followed along one forward branch of a Decision before
/// control rejoins at `reconvergence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BranchRegion {
    decision: usize,
    start: usize,
    end: usize,
    reconvergence: usize,
}

impl BranchRegion {
    pub fn new(decision: usize, start: usize, end: usize, reconvergence: usize) -> Self {
        Self {
            decision,
            start,
            end,
            reconvergence,
        }
    }

    pub fn decision(&self) -> usize {
        self.decision
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn reconvergence(&self) -> usize {
        self.reconvergence
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::{BranchRegion, PathwayEdge};

    #[test]
    fn labelled_edges_drop_blank_labels() {
        assert_eq!(PathwayEdge::labelled(1, 2, "  "), PathwayEdge::new(1, 2));
        assert_eq!(PathwayEdge::labelled(1, 2, "Yes").label(), Some("Yes"));
    }

    #[test]
    fn edge_serializes_without_empty_label() {
        let json = serde_json::to_string(&PathwayEdge::new(0, 1)).expect("serialize");
        assert_eq!(json, r#"{"source":0,"destination":1}"#);
    }

    #[test]
    fn region_bounds_are_inclusive() {
        let region = BranchRegion::new(1, 2, 4, 6);
        assert!(!region.contains(1));
        assert!(region.contains(2));
        assert!(region.contains(4));
        assert!(!region.contains(5));
    }
}
