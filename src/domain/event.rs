// ============================================================================
// Field Events
// Host-facing event kinds and the disposition the host must honor
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Key identity carried by a key-down event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Key {
    Backspace,
    Delete,
    /// Any other key, by name. The engine lets these pass through.
    Other(String),
}

impl Key {
    /// Map a DOM-style key name onto the engine's key identity.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Backspace" => Key::Backspace,
            "Delete" | "Del" => Key::Delete,
            other => Key::Other(other.to_string()),
        }
    }
}

/// One field-level event, delivered after the host widget has already
/// applied its native mutation (for `Input`) or before it would (for
/// `KeyDown`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldEvent {
    /// The field's value changed natively; reconcile it.
    Input,
    /// A key was pressed; the engine may claim the edit for itself.
    KeyDown(Key),
    /// Clipboard cut; the native mutation may land after this event.
    Cut,
    /// Clipboard paste; the native mutation may land after this event.
    Paste,
    /// The field lost focus.
    Blur,
}

/// What the host must do with the native default edit behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// The engine performed (or will perform) the edit itself; the host
    /// must prevent the widget's default handling.
    SuppressDefault,
    /// Let the widget handle the event natively.
    Passthrough,
}

impl EventDisposition {
    pub fn suppresses_default(self) -> bool {
        matches!(self, EventDisposition::SuppressDefault)
    }
}
