// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#[cfg(test)]
use super::node::{Branch, NodeList, PathwayNode};
use super::pathway::{
    ClinicalPathway, DispositionCriteria, DispositionType, EvidenceBasedAddition, Order,
};

/// The built-in chest pain pathway used by `carepath demo`.
pub fn demo_pathway() -> ClinicalPathway {
    let mut pathway =
        ClinicalPathway::new("Chest Pain (ACS)", "Chest Pain / Chest Discomfort", "ED");

    pathway.initial_criticality_criteria = vec![
        "STEMI or Equivalent?".to_owned(),
        "Hemodynamic Instability?".to_owned(),
        "Cardiac Arrest/Post-ROSC?".to_owned(),
    ];
    pathway.critical_care_actions = vec![
        "Activate STEMI Team".to_owned(),
        "Immediate Resuscitation".to_owned(),
        "Prepare for Cath Lab".to_owned(),
    ];

    let mut meds = Order::new("Meds", ["ASA 162mg PO", "NTG 0.4mg SL"]);
    meds.conditional = Some("If no contraindications".to_owned());
    pathway.pit_orders = vec![
        Order::new("Labs", ["CBC", "BMP", "Troponin", "BNP"]),
        Order::new("Imaging", ["CXR"]),
        meds,
        Order::new("CV", ["EKG Immediate", "Cardiac Monitor"]),
    ];

    pathway.secondary_criticality_criteria =
        Some(vec!["STEMI on EKG?".to_owned(), "Critical Lab Values?".to_owned()]);

    pathway.evidence_based_additions = vec![EvidenceBasedAddition {
        category: "Risk Stratification".to_owned(),
        name: "HEART Score".to_owned(),
        description: "Calculate HEART score for ACS risk stratification".to_owned(),
        criteria: Some("Low Risk: Score <= 3; High Risk: Score >= 4".to_owned()),
        pmid: None,
    }];

    let mut discharge = DispositionCriteria::new(
        DispositionType::Discharge,
        ["HEART <= 3", "Negative serial troponins", "Pain resolved"],
    );
    discharge.follow_up = Some("Cardiology within 1 week".to_owned());
    let mut observation =
        DispositionCriteria::new(DispositionType::Observation, ["HEART 4-6", "Needs stress test"]);
    observation.follow_up = Some("Stress test within 24h".to_owned());
    let mut inpatient = DispositionCriteria::new(
        DispositionType::Inpatient,
        ["Positive troponin", "NSTEMI", "Unstable angina"],
    );
    inpatient.additional_notes = Some("Cardiology consult, consider cath lab".to_owned());
    pathway.disposition_criteria = vec![discharge, observation, inpatient];

    pathway.special_populations =
        vec!["Pregnant".to_owned(), "Elderly >75".to_owned(), "Renal Disease".to_owned()];

    pathway
}

/// Start → stable? → {routine care, escalate} → discharge.
#[cfg(test)]
pub(crate) fn two_way_split() -> NodeList {
    NodeList::new(vec![
        PathwayNode::start("Patient presents"),
        PathwayNode::decision("Stable?", [Branch::new("Yes", 2usize), Branch::new("No", 3usize)]),
        PathwayNode::process("Routine care"),
        PathwayNode::process("Escalate"),
        PathwayNode::end("Discharge"),
    ])
}

/// An outer three-way split whose first branch contains its own two-way split and join.
#[cfg(test)]
pub(crate) fn nested_split() -> NodeList {
    NodeList::new(vec![
        PathwayNode::start("Arrival"),
        PathwayNode::decision(
            "Acuity?",
            [Branch::new("High", 2usize), Branch::new("Medium", 7usize), Branch::new("Low", 8usize)],
        ),
        PathwayNode::process("Resus bay"),
        PathwayNode::decision("Airway ok?", [Branch::new("Yes", 4usize), Branch::new("No", 5usize)]),
        PathwayNode::process("Monitor"),
        PathwayNode::process("Intubate"),
        PathwayNode::process("Stabilised"),
        PathwayNode::process("Fast track"),
        PathwayNode::process("Self care advice"),
        PathwayNode::end("Disposition"),
    ])
}
