// ============================================================================
// Value Listener Interface
// Defines the contract for reporting value changes to the host
// ============================================================================

use rust_decimal::Decimal;

/// Listener trait for value and focus reports from a masked field.
/// Implementations can drive model binding, dirty tracking, logging, etc.
///
/// The engine guarantees exactly one `on_value_change` per logical user
/// edit, even when the edit runs through multiple internal operations or
/// a deferred continuation.
pub trait ValueListener: Send + Sync {
    /// The field's numeric value after a committed edit. `None` only when
    /// the field is nullable and empty.
    fn on_value_change(&self, value: Option<Decimal>);

    /// The field lost focus.
    fn on_touched(&self) {}
}

/// No-op listener for testing and default construction.
pub struct NoOpValueListener;

impl ValueListener for NoOpValueListener {
    fn on_value_change(&self, _value: Option<Decimal>) {
        // Do nothing
    }
}

/// Logging listener
pub struct LoggingValueListener;

impl ValueListener for LoggingValueListener {
    fn on_value_change(&self, value: Option<Decimal>) {
        tracing::debug!(?value, "masked field value changed");
    }

    fn on_touched(&self) {
        tracing::debug!("masked field touched");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_listener() {
        let listener = NoOpValueListener;
        listener.on_value_change(Some(Decimal::ONE));
        listener.on_touched();
        // Should not panic
    }
}
