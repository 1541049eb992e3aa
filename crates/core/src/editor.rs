//! Inline text editor model.
//!
//! The editor has two states. While viewing it shows its value (or the
//! placeholder when the value is blank). While editing it holds a draft
//! buffer and a selection, and formatting commands are pure transforms of
//! that buffer producing lightweight markdown. Saving hands the trimmed
//! draft to a caller-supplied callback; the editor knows nothing about
//! documents or permissions.

use std::future::Future;

/// Emoji offered by the editor toolbar.
pub const EMOJI_PALETTE: &[&str] = &[
    "😀", "😃", "😄", "😁", "😆", "😅", "🤣", "😂", "🙂", "🙃", "😉", "😊", "😇", "🥰", "😍", "🤩", "😘", "😗", "😚",
    "😙", "😋", "😛", "😜", "🤪", "😝", "🤑", "🤗", "🤭", "🤫", "🤔", "🤐", "🤨", "😐", "😑", "😶", "😏", "😒", "🙄",
    "😬", "🤥", "👍", "👎", "👌", "✌️", "🤞", "🤟", "🤘", "🤙", "👈", "👉", "👆", "👇", "☝️", "👋", "🤚", "🖐️", "✋",
    "🖖", "👏", "🙌", "👐", "🤲", "🤝", "🙏", "✍️", "💪", "💯", "🔥", "⭐", "🌟", "💫", "✨", "🎉", "🎊", "🎈", "🎁",
    "💝", "💖", "💕", "💗", "💓", "💞", "💘", "💟", "💌", "❤️", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤍", "🤎",
];

/// How a page renders editable text, decided once per page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Viewer,
    Editor,
}

impl Capability {
    pub fn can_edit(self) -> bool {
        self == Capability::Editor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    SingleLine,
    MultiLine,
}

/// A selection in the draft, in character offsets. `start == end` is a
/// cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn cursor(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// A draft buffer plus its selection. Every formatting command maps one
/// `TextBuffer` to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    pub text: String,
    pub selection: Selection,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>, selection: Selection) -> Self {
        let text = text.into();
        let len = text.chars().count();
        let selection = Selection::new(selection.start.min(len), selection.end.min(len));
        Self { text, selection }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text.char_indices().nth(chars).map_or(self.text.len(), |(i, _)| i)
    }

    fn split(&self) -> (&str, &str, &str) {
        let start = self.byte_offset(self.selection.start);
        let end = self.byte_offset(self.selection.end);
        (&self.text[..start], &self.text[start..end], &self.text[end..])
    }

    pub fn selected(&self) -> &str {
        self.split().1
    }

    /// Replace the selection with `insert`, leaving the cursor after it.
    pub fn insert(&self, insert: &str) -> TextBuffer {
        let (before, _, after) = self.split();
        let cursor = self.selection.start + insert.chars().count();
        TextBuffer {
            text: format!("{before}{insert}{after}"),
            selection: Selection::cursor(cursor),
        }
    }

    /// Wrap the selection in `marker`, keeping the wrapped text selected. With
    /// nothing selected, insert an empty pair and place the cursor inside.
    pub fn wrap(&self, marker: &str) -> TextBuffer {
        let (before, selected, after) = self.split();
        let marker_len = marker.chars().count();
        let start = self.selection.start + marker_len;
        let end = start + selected.chars().count();
        TextBuffer {
            text: format!("{before}{marker}{selected}{marker}{after}"),
            selection: Selection::new(start, end),
        }
    }

    pub fn bold(&self) -> TextBuffer {
        self.wrap("**")
    }

    pub fn italic(&self) -> TextBuffer {
        self.wrap("*")
    }

    /// Insert `[label](url)` over the selection. The label is `text`, else
    /// the selected text, else the url. A blank url changes nothing.
    pub fn link(&self, url: &str, text: Option<&str>) -> TextBuffer {
        let url = url.trim();
        if url.is_empty() {
            return self.clone();
        }
        let label = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or_else(|| Some(self.selected().trim()).filter(|s| !s.is_empty()))
            .unwrap_or(url);
        self.insert(&format!("[{label}]({url})"))
    }

    /// Prefix every non-blank selected line with `- ` (or `1. `). With
    /// nothing selected, insert the prefix at the cursor.
    pub fn list(&self, ordered: bool) -> TextBuffer {
        let prefix = if ordered { "1. " } else { "- " };
        if self.selection.is_empty() {
            return self.insert(prefix);
        }
        let listed = self
            .selected()
            .split('\n')
            .map(|line| {
                if line.trim().is_empty() {
                    line.to_string()
                } else {
                    format!("{prefix}{}", line.trim())
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        self.insert(&listed)
    }
}

/// Lifecycle of an [`InlineEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Viewing,
    Editing(TextBuffer),
}

/// Result of [`InlineEditor::save`] when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The trimmed draft equals the trimmed value; nothing was sent.
    Unchanged,
    NotEditing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEditor {
    value: String,
    placeholder: String,
    mode: EditMode,
    state: EditorState,
}

impl InlineEditor {
    pub fn new(value: impl Into<String>, placeholder: impl Into<String>, mode: EditMode) -> Self {
        Self {
            value: value.into(),
            placeholder: placeholder.into(),
            mode,
            state: EditorState::Viewing,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    /// What the viewing state shows.
    pub fn display(&self) -> &str {
        if self.value.trim().is_empty() {
            &self.placeholder
        } else {
            &self.value
        }
    }

    pub fn draft(&self) -> Option<&TextBuffer> {
        match &self.state {
            EditorState::Editing(buffer) => Some(buffer),
            EditorState::Viewing => None,
        }
    }

    /// Enter editing with the current value as the draft, cursor at the end.
    pub fn begin_edit(&mut self) {
        if self.is_editing() {
            return;
        }
        let end = self.value.chars().count();
        self.state = EditorState::Editing(TextBuffer::new(self.value.clone(), Selection::cursor(end)));
    }

    fn apply(&mut self, f: impl FnOnce(&TextBuffer) -> TextBuffer) {
        if let EditorState::Editing(buffer) = &mut self.state {
            *buffer = f(buffer);
        }
    }

    /// Replace the draft, as typing does.
    pub fn set_draft(&mut self, text: impl Into<String>, selection: Selection) {
        let text = text.into();
        self.apply(|_| TextBuffer::new(text, selection));
    }

    pub fn select(&mut self, selection: Selection) {
        self.apply(|b| TextBuffer::new(b.text.clone(), selection));
    }

    pub fn type_text(&mut self, text: &str) {
        let text = match self.mode {
            EditMode::SingleLine => text.replace(['\r', '\n'], " "),
            EditMode::MultiLine => text.to_string(),
        };
        self.apply(|b| b.insert(&text));
    }

    pub fn bold(&mut self) {
        self.apply(TextBuffer::bold);
    }

    pub fn italic(&mut self) {
        self.apply(TextBuffer::italic);
    }

    pub fn insert_link(&mut self, url: &str, text: Option<&str>) {
        self.apply(|b| b.link(url, text));
    }

    pub fn bullet_list(&mut self) {
        self.apply(|b| b.list(false));
    }

    pub fn numbered_list(&mut self) {
        self.apply(|b| b.list(true));
    }

    /// Insert an emoji from the palette at the cursor. Returns false for
    /// anything not in the palette.
    pub fn insert_emoji(&mut self, emoji: &str) -> bool {
        if !EMOJI_PALETTE.contains(&emoji) || !self.is_editing() {
            return false;
        }
        self.apply(|b| b.insert(emoji));
        true
    }

    /// Insert a line break. Single-line editors refuse.
    pub fn insert_newline(&mut self) -> bool {
        if self.mode == EditMode::SingleLine || !self.is_editing() {
            return false;
        }
        self.apply(|b| b.insert("\n"));
        true
    }

    /// Discard the draft and return to viewing.
    pub fn cancel(&mut self) {
        self.state = EditorState::Viewing;
    }

    /// Persist the trimmed draft through `on_save`. On success the editor
    /// adopts the new value and stops editing; on failure it stays in
    /// editing with the draft intact and returns the error.
    pub async fn save<F, Fut, E>(&mut self, on_save: F) -> Result<SaveOutcome, E>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let Some(buffer) = self.draft() else {
            return Ok(SaveOutcome::NotEditing);
        };
        let trimmed = buffer.text.trim().to_string();
        if trimmed == self.value.trim() {
            self.state = EditorState::Viewing;
            return Ok(SaveOutcome::Unchanged);
        }
        on_save(trimmed.clone()).await?;
        self.value = trimmed;
        self.state = EditorState::Viewing;
        Ok(SaveOutcome::Saved)
    }
}
