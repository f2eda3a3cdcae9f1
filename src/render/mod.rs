// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Renders node lists into both diagram dialects.
//!
//! Edges are synthesized once per node list and shared by the flowchart and digraph renderers.

use rayon::prelude::*;

use crate::config::RenderConfig;
use crate::format::{render_dot_with, render_flowchart_with};
use crate::layout::{synthesize_with, StructuralError};
use crate::model::{NodeList, PathwayEdge, PathwayNode};

/// Both renderings of one node list plus the edges behind them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPathway {
    pub edges: Vec<PathwayEdge>,
    pub flowchart: String,
    pub dot: String,
}

pub fn render_nodes(
    nodes: &[PathwayNode],
    config: &RenderConfig,
) -> Result<RenderedPathway, StructuralError> {
    let synthesis = synthesize_with(nodes, &config.synthesis())?;
    let flowchart = render_flowchart_with(nodes, &synthesis.edges, &config.flowchart());
    let dot = render_dot_with(nodes, &synthesis.edges, &config.dot());
    Ok(RenderedPathway {
        edges: synthesis.edges,
        flowchart,
        dot,
    })
}

/// Renders every node list in parallel; results keep the input order.
pub fn render_many(
    lists: &[NodeList],
    config: &RenderConfig,
) -> Vec<Result<RenderedPathway, StructuralError>> {
    let rendered = lists
        .par_iter()
        .map(|nodes| render_nodes(nodes, config))
        .collect::<Vec<_>>();
    tracing::debug!(
        lists = lists.len(),
        failed = rendered.iter().filter(|result| result.is_err()).count(),
        "rendered node lists"
    );
    rendered
}

#[cfg(test)]
mod tests {
    use super::{render_many, render_nodes};
    use crate::config::RenderConfig;
    use crate::convert::pathway_to_nodes;
    use crate::format::{render_dot, render_flowchart, Orientation};
    use crate::layout::{synthesize, RegionPolicy, StructuralError};
    use crate::model::fixtures::{demo_pathway, nested_split, two_way_split};
    use crate::model::NodeList;

    #[test]
    fn defaults_match_the_individual_renderers() {
        let nodes = two_way_split();
        let rendered = render_nodes(&nodes, &RenderConfig::default()).expect("render");

        let edges = synthesize(&nodes);
        assert_eq!(rendered.edges, edges);
        assert_eq!(rendered.flowchart, render_flowchart(&nodes, &edges, true));
        assert_eq!(rendered.dot, render_dot(&nodes, &edges, Orientation::Vertical));
    }

    #[test]
    fn config_flows_into_both_dialects() {
        let config = RenderConfig {
            orientation: Orientation::Horizontal,
            include_styling: false,
            ..RenderConfig::default()
        };
        let rendered = render_nodes(&two_way_split(), &config).expect("render");

        assert!(rendered.dot.contains("  rankdir=LR;\n"));
        assert!(!rendered.flowchart.contains("classDef"));
    }

    #[test]
    fn reject_policy_surfaces_overlaps() {
        let config = RenderConfig {
            region_policy: RegionPolicy::Reject,
            ..RenderConfig::default()
        };
        let err = render_nodes(&nested_split(), &config).unwrap_err();
        assert!(matches!(err, StructuralError::OverlappingRegions { node: 4, .. }));
    }

    #[test]
    fn batch_rendering_keeps_input_order() {
        let lists = vec![
            pathway_to_nodes(&demo_pathway()),
            NodeList::default(),
            two_way_split(),
            nested_split(),
        ];
        let config = RenderConfig {
            region_policy: RegionPolicy::Reject,
            ..RenderConfig::default()
        };
        let rendered = render_many(&lists, &config);

        assert_eq!(rendered.len(), 4);
        for (nodes, result) in lists.iter().zip(&rendered).take(3) {
            assert_eq!(result.as_ref().expect("render"), &render_nodes(nodes, &config).expect("render"));
        }
        assert!(rendered[1].as_ref().expect("render").dot.contains("// No nodes"));
        assert!(rendered[3].is_err());
    }
}
