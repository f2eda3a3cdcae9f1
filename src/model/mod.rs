// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A pathway is authored as an ordered node list; edges and branch regions are derived from it
//! on every call and never stored.

pub mod edge;
pub mod fixtures;
pub mod ids;
mod lenient;
pub mod node;
pub mod pathway;

pub use edge::{BranchRegion, PathwayEdge};
pub use ids::{Id, IdError, NodeKey};
pub use node::{Branch, NodeKind, NodeList, NodeRef, PathwayNode, TargetResolver};
pub use pathway::{
    ClinicalPathway, DispositionCriteria, DispositionType, EvidenceBasedAddition, Order,
};
