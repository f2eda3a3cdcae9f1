// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Label sanitizing for quoted diagram labels.
//!
//! Both dialects first normalize whitespace: real line breaks and literal `\n` sequences become
//! spaces, runs of whitespace collapse to one space and the ends are trimmed. Empty text becomes
//! [`EMPTY_LABEL`].
//!
//! - [`Dialect::Flowchart`] replaces `"` with `'`, entity-escapes `#`, `&` and `\`, and truncates
//!   to `max_len` displayed characters with a trailing `...`. An entity counts as one character.
//! - [`Dialect::Digraph`] replaces `"` with `'`, escapes `\`, and word-wraps at `max_len`
//!   characters per line using the DOT `\n` line break. It never truncates.

use std::borrow::Cow;

use memchr::{memchr, memchr3, memmem};

pub const EMPTY_LABEL: &str = "Step";

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Flowchart,
    Digraph,
}

pub fn sanitize_label(text: &str, max_len: usize, dialect: Dialect) -> String {
    let text = normalize(text);
    if text.is_empty() {
        return EMPTY_LABEL.to_owned();
    }
    match dialect {
        Dialect::Flowchart => flowchart_label(&text, max_len),
        Dialect::Digraph => digraph_label(&text, max_len),
    }
}

fn normalize(text: &str) -> String {
    let text = if memmem::find(text.as_bytes(), b"\\n").is_some() {
        Cow::Owned(text.replace("\\n", " "))
    } else {
        Cow::Borrowed(text)
    };

    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn flowchart_label(text: &str, max_len: usize) -> String {
    let truncated = truncate_chars(text, max_len);
    let bytes = truncated.as_bytes();
    if memchr3(b'"', b'#', b'&', bytes).is_none() && memchr(b'\\', bytes).is_none() {
        return truncated.into_owned();
    }

    let mut out = String::with_capacity(truncated.len() + 8);
    for ch in truncated.chars() {
        match ch {
            '"' => out.push('\''),
            '#' => out.push_str("&#35;"),
            '&' => out.push_str("&#38;"),
            '\\' => out.push_str("&#92;"),
            _ => out.push(ch),
        }
    }
    out
}

fn truncate_chars(text: &str, max_len: usize) -> Cow<'_, str> {
    let Some((cut, _)) = text.char_indices().nth(max_len) else {
        return Cow::Borrowed(text);
    };
    if max_len < ELLIPSIS.len() {
        return Cow::Borrowed(&text[..cut]);
    }

    let keep = text
        .char_indices()
        .nth(max_len - ELLIPSIS.len())
        .map_or(text.len(), |(offset, _)| offset);
    let mut out = text[..keep].trim_end().to_owned();
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

fn digraph_label(text: &str, max_len: usize) -> String {
    let width = max_len.max(1);
    let text = if memchr(b'"', text.as_bytes()).is_some() {
        Cow::Owned(text.replace('"', "'"))
    } else {
        Cow::Borrowed(text)
    };

    let mut out = String::with_capacity(text.len() + 8);
    for (index, line) in wrap(&text, width).iter().enumerate() {
        if index > 0 {
            out.push_str("\\n");
        }
        if memchr(b'\\', line.as_bytes()).is_some() {
            out.push_str(&line.replace('\\', "\\\\"));
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Greedy word wrap over single-space separated words; words wider than a line are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split(' ') {
        let mut word = word;
        let mut word_len = word.chars().count();

        if line_len > 0 && line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
            continue;
        }
        if line_len > 0 {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        while word_len > width {
            let split = word.char_indices().nth(width).map_or(word.len(), |(offset, _)| offset);
            lines.push(word[..split].to_owned());
            word = &word[split..];
            word_len -= width;
        }
        line.push_str(word);
        line_len = word_len;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{sanitize_label, Dialect, EMPTY_LABEL};

    #[rstest]
    #[case::flowchart(Dialect::Flowchart)]
    #[case::digraph(Dialect::Digraph)]
    fn blank_text_becomes_placeholder(#[case] dialect: Dialect) {
        assert_eq!(sanitize_label("", 60, dialect), EMPTY_LABEL);
        assert_eq!(sanitize_label("  \n\t ", 60, dialect), EMPTY_LABEL);
        assert_eq!(sanitize_label("\\n", 60, dialect), EMPTY_LABEL);
    }

    #[test]
    fn newlines_and_whitespace_collapse() {
        assert_eq!(
            sanitize_label("  Assess\nairway\\nand   breathing ", 60, Dialect::Flowchart),
            "Assess airway and breathing"
        );
    }

    #[test]
    fn flowchart_escapes_without_double_escaping() {
        assert_eq!(
            sanitize_label(r#"Give "ASA" #1 & C:\meds"#, 60, Dialect::Flowchart),
            "Give 'ASA' &#35;1 &#38; C:&#92;meds"
        );
        assert_eq!(sanitize_label("&#35;", 60, Dialect::Flowchart), "&#38;&#35;35;");
    }

    #[test]
    fn flowchart_truncates_long_quoted_text() {
        let text = format!("\"{}", "x".repeat(80));
        let label = sanitize_label(&text, 60, Dialect::Flowchart);

        assert!(!label.contains('"'));
        assert!(label.ends_with("..."));
        assert_eq!(label.chars().count(), 60);
    }

    #[test]
    fn flowchart_truncation_trims_before_ellipsis() {
        let label = sanitize_label("Check vitals then reassess", 9, Dialect::Flowchart);
        assert_eq!(label, "Check...");
    }

    #[test]
    fn flowchart_entities_count_as_one_character() {
        let label = sanitize_label("a#b#c#d", 7, Dialect::Flowchart);
        assert_eq!(label, "a&#35;b&#35;c&#35;d");
    }

    #[test]
    fn flowchart_keeps_text_at_exact_limit() {
        let text = "y".repeat(35);
        assert_eq!(sanitize_label(&text, 35, Dialect::Flowchart), text);
    }

    #[test]
    fn digraph_wraps_on_word_boundaries() {
        let label = sanitize_label(
            "Patient presents to ED with Chest Pain / Chest Discomfort",
            40,
            Dialect::Digraph,
        );
        assert_eq!(label, "Patient presents to ED with Chest Pain /\\nChest Discomfort");
    }

    #[test]
    fn digraph_splits_overlong_words_and_never_truncates() {
        let label = sanitize_label("abcdefghij klm", 4, Dialect::Digraph);
        assert_eq!(label, "abcd\\nefgh\\nij\\nklm");
    }

    #[test]
    fn digraph_escapes_quotes_and_backslashes() {
        let label = sanitize_label(r#"say "hi" C:\x"#, 40, Dialect::Digraph);
        assert_eq!(label, r"say 'hi' C:\\x");
    }
}
