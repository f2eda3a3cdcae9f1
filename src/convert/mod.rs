// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Conversion between structured pathway records and node lists.
//!
//! `pathway_to_nodes` is total and deterministic. `nodes_to_pathway` is best-effort: anything it
//! cannot map back is listed in [`Reconstruction::warnings`].

mod from_nodes;
mod to_nodes;

pub use from_nodes::{nodes_to_pathway, Reconstruction, ReconstructionWarning, DEFAULT_COMPLAINT};
pub use to_nodes::pathway_to_nodes;
