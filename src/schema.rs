// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON Schemas for the documents carepath reads.
//!
//! The schemas describe the canonical shape that export writes; import is more lenient.

use schemars::{schema_for, Schema};

use crate::model::{ClinicalPathway, NodeList};

pub fn node_list_schema() -> Schema {
    schema_for!(NodeList)
}

pub fn pathway_schema() -> Schema {
    schema_for!(ClinicalPathway)
}
