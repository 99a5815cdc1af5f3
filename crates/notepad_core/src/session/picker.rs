//! Picker panel projection.
//!
//! # Responsibility
//! - Project the collection into rows for the note picker panel.
//! - Derive a one-line plain-text preview from note content.

use crate::session::state::SessionState;
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One picker row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    /// Position in the collection; pass to `select_note`.
    pub position: usize,
    pub title: String,
    pub preview: Option<String>,
    /// Highlighted row for the note under edit.
    pub is_active: bool,
}

impl SessionState {
    /// Returns picker rows in collection order.
    pub fn picker_items(&self) -> Vec<PickerItem> {
        self.notes()
            .iter()
            .enumerate()
            .map(|(position, note)| PickerItem {
                position,
                title: note.title.clone(),
                preview: derive_preview_text(&note.content),
                is_active: position == self.active_index(),
            })
            .collect()
    }
}

/// Strips markdown images, links and symbols, collapses whitespace and keeps
/// the first 100 characters. Returns `None` for blank content.
pub fn derive_preview_text(content: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::derive_preview_text;
    use crate::model::note::NoteRecord;
    use crate::session::state::SessionState;

    #[test]
    fn preview_strips_markdown_and_limits_length() {
        let source = format!("# title\n\n- [link](https://example.com) {}", "x".repeat(200));
        let preview = derive_preview_text(&source).expect("preview should exist");
        assert!(preview.starts_with("title link"));
        assert!(!preview.contains('#'));
        assert_eq!(preview.chars().count(), 100);
    }

    #[test]
    fn preview_is_none_for_blank_content() {
        assert_eq!(derive_preview_text("  \n ![img](a.png) "), None);
    }

    #[test]
    fn picker_marks_active_row() {
        let state = SessionState::loaded(vec![NoteRecord::untitled(), NoteRecord::untitled()])
            .select_note(1)
            .unwrap();
        let items = state.picker_items();
        assert_eq!(items.len(), 2);
        assert!(!items[0].is_active);
        assert!(items[1].is_active);
        assert_eq!(items[1].position, 1);
    }
}
