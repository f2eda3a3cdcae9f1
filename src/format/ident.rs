// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Diagram identifiers are `N<position>` in both dialects.
pub(crate) fn push_node_ident(out: &mut String, index: usize) {
    let mut buf = itoa::Buffer::new();
    out.push('N');
    out.push_str(buf.format(index));
}

pub(crate) fn node_ident(index: usize) -> String {
    let mut out = String::with_capacity(6);
    push_node_ident(&mut out, index);
    out
}

/// Appends `N<a>; N<b>; ...` for rank and class groupings.
pub(crate) fn push_ident_list(out: &mut String, indices: &[usize], separator: &str) {
    for (pos, &index) in indices.iter().enumerate() {
        if pos > 0 {
            out.push_str(separator);
        }
        push_node_ident(out, index);
    }
}

#[cfg(test)]
mod tests {
    use super::{node_ident, push_ident_list};

    #[test]
    fn idents_are_positional() {
        assert_eq!(node_ident(0), "N0");
        assert_eq!(node_ident(512), "N512");
    }

    #[test]
    fn ident_lists_use_separator() {
        let mut out = String::new();
        push_ident_list(&mut out, &[1, 4, 9], "; ");
        assert_eq!(out, "N1; N4; N9");
    }
}
