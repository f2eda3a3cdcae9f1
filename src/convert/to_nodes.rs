// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Branch, ClinicalPathway, NodeList, PathwayNode};

pub(crate) const NO_EVIDENCE: &str = "N/A";
pub(crate) const RED_FLAGS_PREFIX: &str = "Red flags:";
pub(crate) const REEVALUATE_PREFIX: &str = "Re-evaluate after initial workup:";
pub(crate) const CRITICAL_CARE_ROLE: &str = "Critical Care";

const INITIAL_SHOWN: usize = 3;
const ACTIONS_SHOWN: usize = 3;
const ORDERS_CONSIDERED: usize = 6;
const ORDERS_SHOWN: usize = 4;
const SECONDARY_SHOWN: usize = 2;
const EVIDENCE_SHOWN: usize = 3;

/// Lays a structured pathway out as an ordered node list.
///
/// The layout is fixed: Start, optional initial criticality split with its critical-care step,
/// optional orders step, optional secondary criticality split, up to three evidence steps, then a
/// disposition split with one End node per disposition (or a single default End).
pub fn pathway_to_nodes(pathway: &ClinicalPathway) -> NodeList {
    let mut nodes = NodeList::default();

    nodes.push(
        PathwayNode::start(format!(
            "Patient presents to {} with {}",
            pathway.clinical_setting, pathway.chief_complaint
        ))
        .with_evidence(NO_EVIDENCE),
    );

    let mut critical_care = None;
    let initial = &pathway.initial_criticality_criteria;
    if !initial.is_empty() {
        let mut shown = first(initial, INITIAL_SHOWN).join(" OR ");
        if initial.len() > INITIAL_SHOWN {
            shown.push_str(" OR other critical findings");
        }
        let decision = nodes.len();
        nodes.push(
            PathwayNode::decision(
                format!("Initial Criticality: {shown}?"),
                [
                    Branch::new("YES - Critical", decision + 1),
                    Branch::new("NO - Stable", decision + 2),
                ],
            )
            .with_evidence(NO_EVIDENCE)
            .with_notes(format!("{RED_FLAGS_PREFIX} {}", initial.join(", "))),
        );

        let actions = &pathway.critical_care_actions;
        critical_care = Some(nodes.push(
            PathwayNode::process(format!(
                "ERU/Critical Care: {}",
                first(actions, ACTIONS_SHOWN).join("; ")
            ))
            .with_evidence(NO_EVIDENCE)
            .with_notes(format!("Activate resuscitation team. {}", actions.join("; ")))
            .with_role(CRITICAL_CARE_ROLE),
        ));
    }

    if !pathway.pit_orders.is_empty() {
        let considered = first(&pathway.pit_orders, ORDERS_CONSIDERED);
        let labels =
            considered.iter().take(ORDERS_SHOWN).map(|order| order.label()).collect::<Vec<_>>();
        let notes = considered
            .iter()
            .filter_map(|order| {
                order
                    .notes
                    .as_deref()
                    .filter(|notes| !notes.trim().is_empty())
                    .map(|notes| format!("{}: {notes}", order.category))
            })
            .collect::<Vec<_>>();
        let notes = if notes.is_empty() {
            "Standard workup orders".to_owned()
        } else {
            notes.join("; ")
        };

        nodes.push(
            PathwayNode::process(format!("PIT Orders: {}", labels.join("; ")))
                .with_evidence(NO_EVIDENCE)
                .with_notes(notes),
        );
    }

    if let Some(secondary) = pathway.secondary_criticality_criteria.as_deref() {
        if !secondary.is_empty() {
            let decision = nodes.len();
            let mut branches = Vec::with_capacity(2);
            if let Some(critical_care) = critical_care {
                branches.push(Branch::new("YES - Escalate", critical_care));
            }
            branches.push(Branch::new("NO - Continue", decision + 1));

            nodes.push(
                PathwayNode::decision(
                    format!(
                        "Secondary Criticality: {}?",
                        first(secondary, SECONDARY_SHOWN).join(" OR ")
                    ),
                    branches,
                )
                .with_evidence(NO_EVIDENCE)
                .with_notes(format!("{REEVALUATE_PREFIX} {}", secondary.join(", "))),
            );
        }
    }

    for addition in first(&pathway.evidence_based_additions, EVIDENCE_SHOWN) {
        let mut node = PathwayNode::process(addition.label())
            .with_evidence(addition.pmid.as_deref().unwrap_or(NO_EVIDENCE));
        if !addition.description.trim().is_empty() {
            node = node.with_notes(addition.description.as_str());
        }
        nodes.push(node);
    }

    let dispositions = &pathway.disposition_criteria;
    if dispositions.is_empty() {
        nodes.push(PathwayNode::end("Disposition per clinical judgment").with_evidence(NO_EVIDENCE));
        return nodes;
    }

    let decision = nodes.len();
    nodes.push(
        PathwayNode::decision(
            "Disposition Assessment",
            dispositions
                .iter()
                .enumerate()
                .map(|(pos, disposition)| {
                    Branch::new(disposition.disposition_type.as_str(), decision + 1 + pos)
                }),
        )
        .with_evidence(NO_EVIDENCE)
        .with_notes("Determine appropriate disposition based on clinical status and criteria"),
    );
    for disposition in dispositions {
        let mut label = disposition.label();
        if let Some(follow_up) = disposition.follow_up.as_deref() {
            label.push_str(" Follow-up: ");
            label.push_str(follow_up);
        }
        let notes = disposition
            .additional_notes
            .clone()
            .filter(|notes| !notes.trim().is_empty())
            .unwrap_or_else(|| disposition.criteria.join("; "));

        let mut node = PathwayNode::end(label).with_evidence(NO_EVIDENCE);
        if !notes.is_empty() {
            node = node.with_notes(notes);
        }
        nodes.push(node);
    }

    nodes
}

fn first<T>(items: &[T], count: usize) -> &[T] {
    &items[..items.len().min(count)]
}
