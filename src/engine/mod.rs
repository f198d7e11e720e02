// ============================================================================
// Engine Module
// Cursor store, masking engine, and the event orchestrator on top
// ============================================================================

mod cursor_store;
mod masking;
mod orchestrator;

pub use cursor_store::TextCursorStore;
pub use masking::MaskingEngine;
pub use orchestrator::EditOrchestrator;
