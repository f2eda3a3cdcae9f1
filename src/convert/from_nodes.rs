// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

use super::to_nodes::{RED_FLAGS_PREFIX, REEVALUATE_PREFIX};
use crate::model::{ClinicalPathway, DispositionCriteria, DispositionType, NodeKind, PathwayNode};

pub const DEFAULT_COMPLAINT: &str = "Clinical presentation";

const CRITERIA_PER_DECISION: usize = 5;

/// A pathway recovered from a node list plus everything that could not be recovered faithfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub pathway: ClinicalPathway,
    pub warnings: Vec<ReconstructionWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconstructionWarning {
    #[error("no Start node; chief complaint defaults to {DEFAULT_COMPLAINT:?}")]
    MissingStart,
    #[error(
        "node {node}: Start label has no \"with <complaint>\"; chief complaint defaults to {DEFAULT_COMPLAINT:?}"
    )]
    ComplaintNotFound { node: usize },
    #[error("node {node}: End label {label:?} names no known disposition; treated as Discharge")]
    UnclassifiedDisposition { node: usize, label: String },
    #[error("node {node}: {kind} content is not carried over into the pathway record")]
    ContentNotRecovered { node: usize, kind: NodeKind },
}

/// Best-effort inverse of [`pathway_to_nodes`](super::pathway_to_nodes). Never fails.
pub fn nodes_to_pathway(
    nodes: &[PathwayNode],
    condition_name: &str,
    clinical_setting: &str,
) -> Reconstruction {
    let mut warnings = Vec::new();
    let chief_complaint = chief_complaint(nodes, &mut warnings);
    let mut pathway = ClinicalPathway::new(condition_name, chief_complaint, clinical_setting);

    let mut secondary = Vec::new();
    for (index, node) in nodes.iter().enumerate() {
        match node.kind() {
            NodeKind::Decision => {
                let label = node.label().unwrap_or_default().to_lowercase();
                if !label.contains("critical") {
                    continue;
                }
                let Some(notes) = node.notes() else {
                    continue;
                };
                let criteria = split_criteria(notes);
                if label.contains("initial") || !label.contains("secondary") {
                    pathway.initial_criticality_criteria.extend(criteria);
                } else {
                    secondary.extend(criteria);
                }
            }
            NodeKind::End => {
                let label = node.display_label(index);
                let disposition_type = classify_disposition(&label).unwrap_or_else(|| {
                    warnings.push(ReconstructionWarning::UnclassifiedDisposition {
                        node: index,
                        label: label.clone(),
                    });
                    DispositionType::Discharge
                });
                let mut disposition = DispositionCriteria::new(disposition_type, [label]);
                disposition.additional_notes = node.notes().map(str::to_owned);
                pathway.disposition_criteria.push(disposition);
            }
            NodeKind::Process | NodeKind::Reevaluation => {
                warnings.push(ReconstructionWarning::ContentNotRecovered {
                    node: index,
                    kind: node.kind(),
                });
            }
            NodeKind::Start => {}
        }
    }
    if !secondary.is_empty() {
        pathway.secondary_criticality_criteria = Some(secondary);
    }

    tracing::debug!(
        nodes = nodes.len(),
        warnings = warnings.len(),
        "reconstructed pathway from node list"
    );
    Reconstruction { pathway, warnings }
}

fn chief_complaint(nodes: &[PathwayNode], warnings: &mut Vec<ReconstructionWarning>) -> String {
    let Some((index, start)) =
        nodes.iter().enumerate().find(|(_, node)| node.kind() == NodeKind::Start)
    else {
        warnings.push(ReconstructionWarning::MissingStart);
        return DEFAULT_COMPLAINT.to_owned();
    };

    let label = start.label().unwrap_or_default();
    let complaint = after_last_with(label).map(str::trim).filter(|complaint| !complaint.is_empty());
    match complaint {
        Some(complaint) => complaint.to_owned(),
        None => {
            warnings.push(ReconstructionWarning::ComplaintNotFound { node: index });
            DEFAULT_COMPLAINT.to_owned()
        }
    }
}

/// The text after the last standalone word "with".
fn after_last_with(label: &str) -> Option<&str> {
    static WITH_WORD: OnceLock<Option<Regex>> = OnceLock::new();
    match WITH_WORD.get_or_init(|| Regex::new(r"(?i)\bwith\b").ok()) {
        Some(word) => word.find_iter(label).last().map(|found| &label[found.end()..]),
        None => label.rfind(" with ").map(|at| &label[at + " with ".len()..]),
    }
}

fn split_criteria(notes: &str) -> impl Iterator<Item = String> + '_ {
    let notes = [RED_FLAGS_PREFIX, REEVALUATE_PREFIX]
        .into_iter()
        .find_map(|prefix| notes.strip_prefix(prefix))
        .unwrap_or(notes);
    notes
        .split(',')
        .map(str::trim)
        .filter(|criterion| !criterion.is_empty())
        .take(CRITERIA_PER_DECISION)
        .map(str::to_owned)
}

/// Keyword classification in priority order: ICU, inpatient, observation, transfer.
pub(crate) fn classify_disposition(label: &str) -> Option<DispositionType> {
    let label = label.to_lowercase();
    if label.contains("icu") {
        Some(DispositionType::Icu)
    } else if label.contains("inpatient") || label.contains("admit") {
        Some(DispositionType::Inpatient)
    } else if label.contains("observation") || label.contains("obs") {
        Some(DispositionType::Observation)
    } else if label.contains("transfer") {
        Some(DispositionType::Transfer)
    } else if label.contains("discharge") {
        Some(DispositionType::Discharge)
    } else {
        None
    }
}
