// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The structured clinical pathway record and its JSON field layout.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

pub const DEFAULT_CRITICAL_CARE_ACTION: &str = "Immediate Resuscitation";
pub const DEFAULT_VERSION: &str = "1.0";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum DispositionType {
    Discharge,
    Observation,
    Inpatient,
    #[serde(rename = "ICU")]
    Icu,
    Transfer,
}

impl DispositionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discharge => "Discharge",
            Self::Observation => "Observation",
            Self::Inpatient => "Inpatient",
            Self::Icu => "ICU",
            Self::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for DispositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clinical order group (labs, imaging, meds, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Order {
    pub category: String,
    #[serde(deserialize_with = "lenient::strings")]
    #[schemars(with = "Vec<String>")]
    pub items: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub conditional: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub notes: Option<String>,
}

impl Order {
    pub fn new(
        category: impl Into<String>,
        items: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            category: category.into(),
            items: items.into_iter().map(Into::into).collect(),
            conditional: None,
            notes: None,
        }
    }

    pub fn label(&self) -> String {
        let items = self.items.join(", ");
        match self.conditional.as_deref() {
            Some(conditional) => format!("{} ({conditional}): {items}", self.category),
            None => format!("{}: {items}", self.category),
        }
    }
}

/// An evidence-based intervention, risk score or advanced diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EvidenceBasedAddition {
    pub category: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    #[schemars(with = "String")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub criteria: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub pmid: Option<String>,
}

impl EvidenceBasedAddition {
    pub fn label(&self) -> String {
        match self.criteria.as_deref() {
            Some(criteria) => format!("{} ({criteria})", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DispositionCriteria {
    pub disposition_type: DispositionType,
    #[serde(default, deserialize_with = "lenient::strings")]
    #[schemars(with = "Vec<String>")]
    pub criteria: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub follow_up: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub additional_notes: Option<String>,
}

impl DispositionCriteria {
    pub fn new(
        disposition_type: DispositionType,
        criteria: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            disposition_type,
            criteria: criteria.into_iter().map(Into::into).collect(),
            follow_up: None,
            additional_notes: None,
        }
    }

    /// End-node label: the disposition plus its first two criteria.
    pub fn label(&self) -> String {
        let criteria = self.criteria.iter().take(2).map(String::as_str).collect::<Vec<_>>();
        format!("{}: {}", self.disposition_type, criteria.join("; "))
    }
}

/// A complete clinical pathway for one condition in one setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClinicalPathway {
    pub condition_name: String,
    pub chief_complaint: String,
    pub clinical_setting: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    #[schemars(with = "Vec<String>")]
    pub initial_criticality_criteria: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    #[schemars(with = "Vec<String>")]
    pub critical_care_actions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::entries")]
    #[schemars(with = "Vec<Order>")]
    pub pit_orders: Vec<Order>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_strings"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub secondary_criticality_criteria: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::entries")]
    #[schemars(with = "Vec<EvidenceBasedAddition>")]
    pub evidence_based_additions: Vec<EvidenceBasedAddition>,
    #[serde(default, deserialize_with = "lenient::entries")]
    #[schemars(with = "Vec<DispositionCriteria>")]
    pub disposition_criteria: Vec<DispositionCriteria>,
    #[serde(default, deserialize_with = "lenient::strings")]
    #[schemars(with = "Vec<String>")]
    pub special_populations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    #[schemars(with = "Vec<String>")]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub last_updated: Option<String>,
    #[serde(default = "default_version", deserialize_with = "version")]
    #[schemars(with = "String")]
    pub version: String,
}

impl ClinicalPathway {
    pub fn new(
        condition_name: impl Into<String>,
        chief_complaint: impl Into<String>,
        clinical_setting: impl Into<String>,
    ) -> Self {
        Self {
            condition_name: condition_name.into(),
            chief_complaint: chief_complaint.into(),
            clinical_setting: clinical_setting.into(),
            initial_criticality_criteria: Vec::new(),
            critical_care_actions: vec![DEFAULT_CRITICAL_CARE_ACTION.to_owned()],
            pit_orders: Vec::new(),
            secondary_criticality_criteria: None,
            evidence_based_additions: Vec::new(),
            disposition_criteria: Vec::new(),
            special_populations: Vec::new(),
            references: Vec::new(),
            last_updated: None,
            version: default_version(),
        }
    }

    /// Fills defaults that a freshly constructed pathway would carry.
    pub(crate) fn normalize(&mut self) {
        if self.critical_care_actions.is_empty() {
            self.critical_care_actions.push(DEFAULT_CRITICAL_CARE_ACTION.to_owned());
        }
        if self.version.trim().is_empty() {
            self.version = default_version();
        }
    }
}

fn default_version() -> String {
    DEFAULT_VERSION.to_owned()
}

fn version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::text(deserializer).map(|version| version.unwrap_or_else(default_version))
}

#[cfg(test)]
mod tests {
    use super::{DispositionCriteria, DispositionType, EvidenceBasedAddition, Order};

    #[test]
    fn order_label_includes_condition_when_present() {
        let mut order = Order::new("Meds", ["ASA 162mg PO", "NTG 0.4mg SL"]);
        assert_eq!(order.label(), "Meds: ASA 162mg PO, NTG 0.4mg SL");

        order.conditional = Some("If no contraindications".to_owned());
        assert_eq!(order.label(), "Meds (If no contraindications): ASA 162mg PO, NTG 0.4mg SL");
    }

    #[test]
    fn disposition_label_uses_first_two_criteria() {
        let disposition = DispositionCriteria::new(
            DispositionType::Discharge,
            ["HEART <= 3", "Negative serial troponins", "Pain resolved"],
        );
        assert_eq!(disposition.label(), "Discharge: HEART <= 3; Negative serial troponins");
    }

    #[test]
    fn evidence_label_appends_criteria() {
        let addition = EvidenceBasedAddition {
            category: "Risk Stratification".to_owned(),
            name: "HEART Score".to_owned(),
            description: String::new(),
            criteria: Some("Low Risk: Score <= 3".to_owned()),
            pmid: None,
        };
        assert_eq!(addition.label(), "HEART Score (Low Risk: Score <= 3)");
    }

    #[test]
    fn icu_serializes_in_upper_case() {
        let json = serde_json::to_string(&DispositionType::Icu).expect("serialize");
        assert_eq!(json, "\"ICU\"");
    }
}
