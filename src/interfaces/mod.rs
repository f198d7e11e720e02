// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod listener;
mod scheduler;

pub use listener::{LoggingValueListener, NoOpValueListener, ValueListener};
pub use scheduler::{DeferredScheduler, DeferredTask, InlineScheduler, ManualScheduler};
