// ============================================================================
// Edit Orchestrator
// Classifies host field events and drives the masking engine
// ============================================================================

use crate::domain::{EventDisposition, FieldEvent, Key, MaskConfig, SharedField};
use crate::engine::masking::MaskingEngine;
use crate::interfaces::{DeferredScheduler, InlineScheduler, NoOpValueListener, ValueListener};
use crate::numeric::{char_at, char_len, is_mask_digit};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Clipboard cut events resync on the very next turn.
const CUT_RESYNC_DELAY: Duration = Duration::ZERO;
/// Paste resync waits one tick longer so the native mutation lands first.
const PASTE_RESYNC_DELAY: Duration = Duration::from_millis(1);
/// Native single-char shrinks replay as a deferred backspace.
const BACKSPACE_REPLAY_DELAY: Duration = Duration::ZERO;

/// Top layer: receives field events from the host, diffs the field against
/// the pre-edit snapshot, and translates each native mutation into the
/// equivalent engine operation. Reports the resulting value to the
/// listener exactly once per logical edit.
pub struct EditOrchestrator {
    engine: MaskingEngine,
    listener: Arc<dyn ValueListener>,
    scheduler: Arc<dyn DeferredScheduler>,
}

impl EditOrchestrator {
    pub fn new(field: SharedField, config: MaskConfig) -> Self {
        Self {
            engine: MaskingEngine::new(field, config),
            listener: Arc::new(NoOpValueListener),
            scheduler: Arc::new(InlineScheduler),
        }
    }

    /// Builder method: Set the value listener.
    pub fn with_listener(mut self, listener: Arc<dyn ValueListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Builder method: Set the deferred scheduler.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn DeferredScheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn set_listener(&mut self, listener: Arc<dyn ValueListener>) {
        self.listener = listener;
    }

    pub fn engine(&self) -> &MaskingEngine {
        &self.engine
    }

    /// Current numeric value of the field.
    pub fn value(&self) -> Option<rust_decimal::Decimal> {
        self.engine.value()
    }

    /// Programmatic value assignment. Host-initiated, so the listener is
    /// not notified.
    pub fn set_value(&self, value: Option<rust_decimal::Decimal>) {
        self.engine.set_value(value);
    }

    /// Swap the active configuration, reformatting the current value.
    pub fn update_configuration(&self, config: MaskConfig) {
        self.engine.update_config(config);
    }

    /// Feed one host event through the state machine. The returned
    /// disposition tells the host whether to cancel the widget's native
    /// default handling.
    pub fn on_event(&self, event: FieldEvent) -> EventDisposition {
        match event {
            FieldEvent::Input => {
                self.handle_input();
                EventDisposition::Passthrough
            }
            FieldEvent::KeyDown(key) => self.handle_keydown(key),
            FieldEvent::Cut => {
                self.schedule_resync(CUT_RESYNC_DELAY);
                EventDisposition::Passthrough
            }
            FieldEvent::Paste => {
                self.schedule_resync(PASTE_RESYNC_DELAY);
                EventDisposition::Passthrough
            }
            FieldEvent::Blur => {
                self.listener.on_touched();
                EventDisposition::Passthrough
            }
        }
    }

    fn report(&self) {
        self.listener.on_value_change(self.engine.value());
    }

    // ========================================================================
    // Input reconciliation
    // ========================================================================

    /// The widget already mutated its text natively; diff against the
    /// snapshot to recover what the user did, undo the native edit, and
    /// replay it through the mask.
    fn handle_input(&self) {
        let store = self.engine.store();
        let raw = store.text();
        let (cursor, _) = store.selection();
        let prior = store.stored_text();

        let new_len = char_len(&raw);
        let old_len = char_len(&prior);

        if new_len.abs_diff(old_len) != 1 {
            self.replay_bulk_change(&raw, cursor);
            self.report();
            return;
        }

        // Single-char diff: put the snapshot back, then apply the edit
        // through the engine instead.
        store.set_text(&prior);

        if new_len < old_len {
            // Native one-char delete. The surrounding widget may still be
            // moving the cursor, so the replay runs as a later turn.
            debug!(cursor, "replaying native delete as masked backspace");
            let engine = self.engine.clone();
            let listener = Arc::clone(&self.listener);
            self.scheduler.defer(
                BACKSPACE_REPLAY_DELAY,
                Box::new(move || {
                    engine.refresh_display(Some(cursor + 1));
                    engine.remove_digit(Key::Backspace);
                    listener.on_value_change(engine.value());
                }),
            );
            return;
        }

        // Native one-char insert: the typed char sits just left of the
        // post-insert cursor.
        let inserted = if cursor == 0 {
            None
        } else {
            char_at(&raw, cursor - 1)
        };
        self.engine
            .refresh_display(Some(cursor.saturating_sub(1)));

        match inserted {
            None | Some('\t') | Some('\n') | Some('\r') => return,
            Some('+') => self.engine.set_positive(),
            Some('-') => self.engine.set_negative(),
            Some(ch) => {
                trace!(%ch, "classified typed character");
                if self.engine.store().can_accept_more_digits() {
                    let (start, end) = self.engine.store().selection();
                    if end - start == char_len(&self.engine.store().text()) {
                        // The whole value is selected; the keystroke
                        // replaces it outright.
                        self.engine.set_value(None);
                    }
                    self.engine.insert_char(ch);
                }
            }
        }
        self.report();
    }

    /// Multi-char mutation (autofill, drag-drop, IME commit, programmatic
    /// write): rebuild the value from whatever digit stream survives.
    fn replay_bulk_change(&self, raw: &str, cursor: usize) {
        let stream: String = raw
            .chars()
            .filter(|c| is_mask_digit(*c) || *c == '.')
            .collect();
        debug!(len = char_len(raw), "reconciling bulk text change");

        if !stream.chars().any(is_mask_digit) {
            self.engine.refresh_display(Some(cursor));
            return;
        }

        self.engine.set_value(None);
        for ch in stream.chars() {
            self.engine.insert_char(ch);
        }
    }

    // ========================================================================
    // Keydown interception
    // ========================================================================

    /// Backspace and Delete are claimed by the engine before the widget
    /// can act. A selection reaching from inside the prefix to inside the
    /// suffix wipes the whole value; anything else removes one digit span.
    fn handle_keydown(&self, key: Key) -> EventDisposition {
        match key {
            Key::Backspace | Key::Delete => {
                let store = self.engine.store();
                let (start, end) = store.selection();
                let len = char_len(&store.text());

                let spans_value = start <= self.engine.prefix_length()
                    && end >= len.saturating_sub(self.engine.suffix_length());
                if spans_value {
                    self.engine.clear();
                } else {
                    self.engine.remove_digit(key);
                }
                self.report();
                EventDisposition::SuppressDefault
            }
            Key::Other(_) => EventDisposition::Passthrough,
        }
    }

    // ========================================================================
    // Clipboard resync
    // ========================================================================

    /// Cut and paste land natively at an unpredictable point after the
    /// event; re-read the field once the dust settles and re-render.
    fn schedule_resync(&self, delay: Duration) {
        let engine = self.engine.clone();
        let listener = Arc::clone(&self.listener);
        self.scheduler.defer(
            delay,
            Box::new(move || {
                engine.refresh_display(None);
                let value = engine.value();
                engine.set_value(value);
                listener.on_value_change(value);
            }),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
