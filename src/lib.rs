// ============================================================================
// Currency Mask Library
// Cursor-preserving currency input masking for host text widgets
// ============================================================================

//! # Currency Mask
//!
//! A host-agnostic engine that keeps a text field formatted as currency
//! while the user types, preserving the cursor across separator reflow.
//!
//! ## Features
//!
//! - **Live masking** with prefix, suffix, grouping, and precision rules
//! - **Cursor preservation** through every reformat, keyed off char offsets
//! - **Two entry modes**: ticker-style financial entry and positional
//!   natural entry
//! - **Exact arithmetic** via `rust_decimal`; no floating point anywhere
//! - **Deferred reconciliation** for cut/paste and native deletes, behind a
//!   pluggable scheduler
//!
//! ## Example
//!
//! ```rust
//! use currency_mask::prelude::*;
//!
//! let field = TextField::new().into_shared();
//! let mask = EditOrchestrator::new(field.clone(), MaskConfig::default());
//!
//! // The host widget applies the keystroke natively, then reports it.
//! {
//!     let mut f = field.write();
//!     f.set_text("1");
//!     f.set_cursor(1);
//! }
//! mask.on_event(FieldEvent::Input);
//!
//! assert_eq!(field.read().text(), "$ 0.01");
//! assert_eq!(mask.value(), Some(Decimal::new(1, 2)));
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        EventDisposition, FieldEvent, InputMode, Key, MaskConfig, MaskOverrides, SharedField,
        TextAlign, TextField,
    };
    pub use crate::engine::{EditOrchestrator, MaskingEngine, TextCursorStore};
    pub use crate::interfaces::{
        DeferredScheduler, InlineScheduler, LoggingValueListener, ManualScheduler,
        NoOpValueListener, ValueListener,
    };
    pub use rust_decimal::Decimal;
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;

    /// Apply a native keystroke the way a host widget would: mutate the
    /// field directly, then deliver the input event.
    fn type_char(mask: &EditOrchestrator, field: &SharedField, ch: char) {
        {
            let mut f = field.write();
            let (cursor, _) = f.selection();
            let mut chars: Vec<char> = f.text().chars().collect();
            let at = cursor.min(chars.len());
            chars.insert(at, ch);
            let text: String = chars.into_iter().collect();
            f.set_text(text);
            f.set_cursor(at + 1);
        }
        mask.on_event(FieldEvent::Input);
    }

    #[test]
    fn test_end_to_end_typing() {
        let field = TextField::new().into_shared();
        let mask = EditOrchestrator::new(field.clone(), MaskConfig::default());

        for ch in "123456".chars() {
            type_char(&mask, &field, ch);
        }

        assert_eq!(field.read().text(), "$ 1,234.56");
        assert_eq!(mask.value(), Some(Decimal::new(123456, 2)));
    }

    #[test]
    fn test_end_to_end_euro_entry_with_sign() {
        let field = TextField::new().into_shared();
        let mask = EditOrchestrator::new(field.clone(), MaskConfig::euro());

        type_char(&mask, &field, '5');
        assert_eq!(field.read().text(), "0,05 €");

        type_char(&mask, &field, '-');
        assert_eq!(field.read().text(), "-0,05 €");
        assert_eq!(mask.value(), Some(Decimal::new(-5, 2)));
    }

    #[test]
    fn test_end_to_end_select_all_backspace() {
        let field = TextField::new().into_shared();
        let mask = EditOrchestrator::new(field.clone(), MaskConfig::default());

        mask.set_value(Some(Decimal::new(123456, 2)));
        let len = field.read().text().chars().count();
        field.write().set_selection(0, len);

        let disposition = mask.on_event(FieldEvent::KeyDown(Key::Backspace));

        assert!(disposition.suppresses_default());
        assert_eq!(field.read().text(), "$ 0.00");
        assert_eq!(mask.value(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_end_to_end_nullable_roundtrip() {
        let field = TextField::new().into_shared();
        let mask =
            EditOrchestrator::new(field.clone(), MaskConfig::default().with_nullable(true));

        assert_eq!(mask.value(), None);

        type_char(&mask, &field, '7');
        assert_eq!(mask.value(), Some(Decimal::new(7, 2)));

        let len = field.read().text().chars().count();
        field.write().set_selection(0, len);
        mask.on_event(FieldEvent::KeyDown(Key::Delete));

        assert_eq!(field.read().text(), "");
        assert_eq!(mask.value(), None);
    }
}
