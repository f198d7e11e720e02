// ============================================================================
// Text Cursor Store
// Owns the raw displayed string, selection bounds, and the edit snapshot
// ============================================================================

use crate::domain::SharedField;
use crate::numeric::{char_len, char_slice, count_digits, is_mask_digit};
use parking_lot::RwLock;
use std::sync::Arc;

/// Leaf layer over the shared field: raw text access, cursor placement,
/// and the pre-edit snapshot the orchestrator diffs against.
///
/// Cheap to clone; clones share the same field and snapshot.
#[derive(Clone)]
pub struct TextCursorStore {
    field: SharedField,
    stored: Arc<RwLock<String>>,
}

impl TextCursorStore {
    pub fn new(field: SharedField) -> Self {
        let stored = field.read().text().to_string();
        Self {
            field,
            stored: Arc::new(RwLock::new(stored)),
        }
    }

    pub fn field(&self) -> &SharedField {
        &self.field
    }

    /// The field's current full displayed string.
    pub fn text(&self) -> String {
        self.field.read().text().to_string()
    }

    /// Replace the displayed string and refresh the snapshot used for
    /// future diffing.
    pub fn set_text(&self, text: &str) {
        self.field.write().set_text(text);
        *self.stored.write() = text.to_string();
    }

    /// The snapshot taken before the field's native value last mutated.
    pub fn stored_text(&self) -> String {
        self.stored.read().clone()
    }

    pub fn selection(&self) -> (usize, usize) {
        self.field.read().selection()
    }

    /// Set the selection bounds, clamped to the text.
    pub fn set_selection(&self, start: usize, end: usize) {
        self.field.write().set_selection(start, end);
    }

    /// Move both selection bounds to `position`, clamped to the text.
    pub fn set_cursor(&self, position: usize) {
        self.field.write().set_cursor(position);
    }

    /// Set the text and reposition the cursor at
    /// `desired_start - (old_length - new_length)`: the cursor keeps its
    /// logical offset from the end of the string across a length change,
    /// which is what makes placement survive separator reflow.
    pub fn update_text_and_cursor(&self, new_text: &str, old_length: usize, desired_start: usize) {
        self.set_text(new_text);
        let new_length = char_len(new_text);
        let shifted = desired_start as isize - (old_length as isize - new_length as isize);
        self.set_cursor(shifted.max(0) as usize);
    }

    /// Whether another digit may be inserted right now. True only when
    /// none of these block it: the digit count reached the field's
    /// maximum length, the selection spans a non-digit character, or the
    /// text starts with a literal `'0'`.
    pub fn can_accept_more_digits(&self) -> bool {
        let field = self.field.read();
        let text = field.text();

        let under_max = field
            .max_length()
            .map_or(true, |max| count_digits(text) < max);

        let (start, end) = field.selection();
        let clean_selection =
            start == end || char_slice(text, start, end).chars().all(is_mask_digit);

        let leading_zero = text.starts_with('0');

        under_max && clean_selection && !leading_zero
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TextField;

    fn store_with(text: &str) -> TextCursorStore {
        let field = TextField::new().into_shared();
        field.write().set_text(text);
        TextCursorStore::new(field)
    }

    #[test]
    fn test_set_text_refreshes_snapshot() {
        let store = store_with("$ 1.00");
        assert_eq!(store.stored_text(), "$ 1.00");
        store.set_text("$ 2.00");
        assert_eq!(store.text(), "$ 2.00");
        assert_eq!(store.stored_text(), "$ 2.00");
    }

    #[test]
    fn test_host_mutation_leaves_snapshot() {
        let store = store_with("$ 1.00");
        // A host edit touches the field directly, not the store.
        store.field().write().set_text("$ 12.00");
        assert_eq!(store.text(), "$ 12.00");
        assert_eq!(store.stored_text(), "$ 1.00");
    }

    #[test]
    fn test_cursor_keeps_offset_from_end() {
        let store = store_with("$123");
        // "$123" -> "$1,234": one char longer, cursor slides right with it.
        store.update_text_and_cursor("$1,234", 5, 5);
        assert_eq!(store.selection(), (6, 6));

        // Shrinking text pulls the cursor back.
        store.update_text_and_cursor("$12", 6, 4);
        assert_eq!(store.selection(), (1, 1));
    }

    #[test]
    fn test_cursor_never_goes_negative() {
        let store = store_with("$1,234");
        store.update_text_and_cursor("$1", 6, 1);
        assert_eq!(store.selection(), (0, 0));
    }

    #[test]
    fn test_set_cursor_clamps() {
        let store = store_with("$12");
        store.set_cursor(99);
        assert_eq!(store.selection(), (3, 3));
    }

    #[test]
    fn test_accepts_digits_by_default() {
        let store = store_with("$ 1.23");
        assert!(store.can_accept_more_digits());
    }

    #[test]
    fn test_max_length_blocks_insertion() {
        let field = TextField::new().with_max_length(3).into_shared();
        field.write().set_text("$ 1.23");
        let store = TextCursorStore::new(field);
        assert!(!store.can_accept_more_digits());
    }

    #[test]
    fn test_mixed_selection_blocks_insertion() {
        let store = store_with("$ 1.23");
        // Selection "1." spans a non-digit.
        store.field().write().set_selection(2, 4);
        assert!(!store.can_accept_more_digits());
        // A digits-only selection does not block.
        store.field().write().set_selection(4, 6);
        assert!(store.can_accept_more_digits());
    }

    #[test]
    fn test_leading_zero_blocks_insertion() {
        let store = store_with("0.50");
        assert!(!store.can_accept_more_digits());
    }
}
