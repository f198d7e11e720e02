// ============================================================================
// Text Field
// Owned mutable text + selection record standing in for the host widget
// ============================================================================

use crate::numeric::char_len;
use parking_lot::RwLock;
use std::sync::Arc;

/// A single mutable text + cursor resource.
///
/// This models exactly what the engine needs from a text widget: the full
/// displayed string, the selection bounds, and an optional maximum digit
/// count. Hosts mutate it when the user edits the field; the engine
/// mutates it when re-masking. Offsets are char offsets.
#[derive(Debug, Clone)]
pub struct TextField {
    text: String,
    selection_start: usize,
    selection_end: usize,
    max_length: Option<usize>,
}

/// Handle shared between the host and the engine.
///
/// The engine runs on a single event loop, but deferred continuations
/// capture clones of this handle to re-read the field on a later turn.
pub type SharedField = Arc<RwLock<TextField>>;

impl TextField {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            selection_start: 0,
            selection_end: 0,
            max_length: None,
        }
    }

    /// Builder method: Cap the number of digits the field accepts.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Wrap the field in the shared handle used by the engine.
    pub fn into_shared(self) -> SharedField {
        Arc::new(RwLock::new(self))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the displayed string. The selection is clamped to the new
    /// length rather than reset.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.clamp_selection();
    }

    /// Current selection bounds `(start, end)`, `start <= end`.
    pub fn selection(&self) -> (usize, usize) {
        (self.selection_start, self.selection_end)
    }

    /// Set the selection. Out-of-range positions are clamped, never
    /// rejected; inverted bounds are reordered.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = char_len(&self.text);
        let start = start.min(len);
        let end = end.min(len);
        self.selection_start = start.min(end);
        self.selection_end = start.max(end);
    }

    /// Collapse the selection to a single cursor position.
    pub fn set_cursor(&mut self, position: usize) {
        self.set_selection(position, position);
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn set_max_length(&mut self, max_length: Option<usize>) {
        self.max_length = max_length;
    }

    fn clamp_selection(&mut self) {
        let len = char_len(&self.text);
        self.selection_start = self.selection_start.min(len);
        self.selection_end = self.selection_end.min(len);
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}
