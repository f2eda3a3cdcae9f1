// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph derivation for node lists.
//!
//! This module turns an ordered node list into edges, branch regions and rank hints.

pub mod diagnostics;
pub mod edges;
pub mod ranks;
pub mod regions;

pub use diagnostics::{diagnose, Diagnostic};
pub use edges::{branch_regions, synthesize, synthesize_with, Synthesis, SynthesisOptions};
pub use ranks::{rank_hints, RankHints};
pub use regions::{ParseRegionPolicyError, RegionPolicy, StructuralError};
