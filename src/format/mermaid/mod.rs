// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid flowchart export for pathways.

pub mod flowchart;

pub use flowchart::{render_flowchart, render_flowchart_with, FlowchartOptions, StyleClass};
