// ============================================================================
// Domain Models Module
// Configuration, field record, and event value objects
// ============================================================================

pub mod config;
pub mod event;
pub mod field;

pub use config::{InputMode, MaskConfig, MaskOverrides, TextAlign};
pub use event::{EventDisposition, FieldEvent, Key};
pub use field::{SharedField, TextField};
