//! Markdown editor model.
//!
//! Drafts are plain markdown buffers. Formatting is expressed as explicit
//! commands over `(text, selection)` pairs so every edit is deterministic
//! and testable; there is no implicit rich-text surface. Selections are
//! byte offsets into the buffer, clamped to char boundaries before use.

use pulldown_cmark::{Options, Parser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

/// Result of applying a command: the new buffer and where the selection
/// lands inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub selection: Selection,
}

fn clamp_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn normalize(text: &str, selection: Selection) -> (usize, usize) {
    let start = clamp_boundary(text, selection.start);
    let end = clamp_boundary(text, selection.end.max(selection.start));
    (start, end)
}

/// Wrap the selection in a marker pair, e.g. `**bold**`. The returned
/// selection still covers the original text.
fn wrap(text: &str, selection: Selection, marker: &str) -> Edit {
    let (start, end) = normalize(text, selection);
    let mut out = String::with_capacity(text.len() + marker.len() * 2);
    out.push_str(&text[..start]);
    out.push_str(marker);
    out.push_str(&text[start..end]);
    out.push_str(marker);
    out.push_str(&text[end..]);
    Edit {
        text: out,
        selection: Selection {
            start: start + marker.len(),
            end: end + marker.len(),
        },
    }
}

pub fn bold(text: &str, selection: Selection) -> Edit {
    wrap(text, selection, "**")
}

pub fn italic(text: &str, selection: Selection) -> Edit {
    wrap(text, selection, "*")
}

/// Expand the selection to whole lines and transform each line's prefix.
fn prefix_lines<F>(text: &str, selection: Selection, prefix_for: F) -> Edit
where
    F: Fn(usize) -> String,
{
    let (start, end) = normalize(text, selection);
    let line_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[end..].find('\n').map(|i| end + i).unwrap_or(text.len());

    let block = &text[line_start..line_end];
    let prefixed: Vec<String> = block
        .lines()
        .enumerate()
        .map(|(i, line)| format!("{}{}", prefix_for(i), line))
        .collect();
    let replacement = if block.is_empty() {
        prefix_for(0)
    } else {
        prefixed.join("\n")
    };

    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..line_start]);
    out.push_str(&replacement);
    out.push_str(&text[line_end..]);

    let new_end = line_start + replacement.len();
    Edit {
        text: out,
        selection: Selection {
            start: line_start,
            end: new_end,
        },
    }
}

pub fn bullet_list(text: &str, selection: Selection) -> Edit {
    prefix_lines(text, selection, |_| "- ".to_string())
}

pub fn numbered_list(text: &str, selection: Selection) -> Edit {
    prefix_lines(text, selection, |i| format!("{}. ", i + 1))
}

pub fn blockquote(text: &str, selection: Selection) -> Edit {
    prefix_lines(text, selection, |_| "> ".to_string())
}

/// Replace the selection with a markdown link, leaving the label selected.
pub fn link(text: &str, selection: Selection, url: &str) -> Edit {
    let (start, end) = normalize(text, selection);
    let label = &text[start..end];
    let mut out = String::with_capacity(text.len() + url.len() + 4);
    out.push_str(&text[..start]);
    out.push('[');
    out.push_str(label);
    out.push_str("](");
    out.push_str(url);
    out.push(')');
    out.push_str(&text[end..]);
    Edit {
        text: out,
        selection: Selection {
            start: start + 1,
            end: start + 1 + label.len(),
        },
    }
}

/// Insert an inline citation at the caret, with the caret landing after it.
pub fn insert_citation(text: &str, selection: Selection, inline: &str) -> Edit {
    let at = clamp_boundary(text, selection.start);
    let mut out = String::with_capacity(text.len() + inline.len());
    out.push_str(&text[..at]);
    out.push_str(inline);
    out.push_str(&text[at..]);
    Edit {
        text: out,
        selection: Selection::caret(at + inline.len()),
    }
}

/// Whitespace-split word count, used for section and paper totals.
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Convert markdown to HTML for preview.
pub fn markdown_to_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    let parser = Parser::new_ext(content, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        let edit = bold("hello world", Selection { start: 6, end: 11 });
        assert_eq!(edit.text, "hello **world**");
        assert_eq!(edit.selection, Selection { start: 8, end: 13 });
        assert_eq!(&edit.text[edit.selection.start..edit.selection.end], "world");
    }

    #[test]
    fn test_italic_at_caret_inserts_empty_pair() {
        let edit = italic("abc", Selection::caret(3));
        assert_eq!(edit.text, "abc**");
        assert_eq!(edit.selection, Selection { start: 4, end: 4 });
    }

    #[test]
    fn test_bullet_list_prefixes_selected_lines() {
        let text = "one\ntwo\nthree";
        let edit = bullet_list(text, Selection { start: 5, end: 9 });
        assert_eq!(edit.text, "one\n- two\n- three");
    }

    #[test]
    fn test_numbered_list_counts_from_one() {
        let edit = numbered_list("a\nb", Selection { start: 0, end: 3 });
        assert_eq!(edit.text, "1. a\n2. b");
    }

    #[test]
    fn test_blockquote_single_line() {
        let edit = blockquote("claim", Selection { start: 2, end: 2 });
        assert_eq!(edit.text, "> claim");
    }

    #[test]
    fn test_link_replaces_selection_and_selects_label() {
        let edit = link("see docs here", Selection { start: 4, end: 8 }, "https://example.org");
        assert_eq!(edit.text, "see [docs](https://example.org) here");
        assert_eq!(&edit.text[edit.selection.start..edit.selection.end], "docs");
    }

    #[test]
    fn test_insert_citation_at_caret() {
        let edit = insert_citation("As shown .", Selection::caret(9), "(Smith, 2023)");
        assert_eq!(edit.text, "As shown (Smith, 2023).");
        assert_eq!(edit.selection, Selection::caret(22));
    }

    #[test]
    fn test_selection_clamped_to_char_boundary() {
        // 'é' is two bytes; offset 1 falls inside it.
        let edit = bold("é", Selection { start: 1, end: 1 });
        assert_eq!(edit.text, "****é");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one two  three\nfour"), 4);
    }

    #[test]
    fn test_markdown_preview() {
        let html = markdown_to_html("# Title\n\n**bold** text");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }
}
