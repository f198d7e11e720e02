// ============================================================================
// Masking Engine
// Converts between the displayed string and the canonical numeric value
// ============================================================================

use crate::domain::{InputMode, Key, MaskConfig, SharedField};
use crate::engine::cursor_store::TextCursorStore;
use crate::numeric::{
    char_at, char_index_of, char_len, char_slice, digit_value, is_mask_digit, is_zero_digit,
};
use parking_lot::RwLock;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use tracing::trace;

/// Applies prefix/suffix/separator/precision/sign rules over the cursor
/// store. Every operation rewrites the displayed string through the mask
/// and recomputes the numeric value from it; the two can never drift.
///
/// Cheap to clone; clones share the same field and configuration, which
/// is how deferred continuations capture the engine.
#[derive(Clone)]
pub struct MaskingEngine {
    store: TextCursorStore,
    config: Arc<RwLock<MaskConfig>>,
}

impl MaskingEngine {
    pub fn new(field: SharedField, config: MaskConfig) -> Self {
        Self {
            store: TextCursorStore::new(field),
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub fn store(&self) -> &TextCursorStore {
        &self.store
    }

    /// Snapshot of the active configuration.
    pub fn config(&self) -> MaskConfig {
        self.config.read().clone()
    }

    pub fn is_nullable(&self) -> bool {
        self.config.read().nullable
    }

    /// Rendered char length of the prefix, including a leading sign when
    /// the current text carries one.
    pub fn prefix_length(&self) -> usize {
        let base = char_len(&self.config.read().prefix);
        base + usize::from(self.store.text().starts_with('-'))
    }

    /// Rendered char length of the suffix.
    pub fn suffix_length(&self) -> usize {
        char_len(&self.config.read().suffix)
    }

    // ========================================================================
    // Value conversion
    // ========================================================================

    /// The numeric value currently displayed. `None` only for an empty
    /// nullable field; anything unparsable resolves to zero, never an
    /// error, because this runs on arbitrary mid-edit text.
    pub fn value(&self) -> Option<Decimal> {
        self.parse(&self.store.text())
    }

    /// Strip the mask from a displayed string and read the number out of
    /// the digit stream.
    pub fn parse(&self, raw: &str) -> Option<Decimal> {
        let cfg = self.config();

        let negative = raw.contains('-');
        let body = raw.strip_prefix('-').unwrap_or(raw);
        let body = body.strip_prefix(cfg.prefix.as_str()).unwrap_or(body);
        let body = body.strip_suffix(cfg.suffix.as_str()).unwrap_or(body);

        let mut integer = String::new();
        let mut fraction = String::new();
        let mut in_fraction = false;
        for c in body.chars() {
            if c == cfg.decimal_separator {
                in_fraction = true;
            } else if let Some(d) = digit_value(c) {
                let part = if in_fraction { &mut fraction } else { &mut integer };
                part.push(char::from_digit(d, 10).unwrap_or('0'));
            }
        }

        if integer.is_empty() && fraction.is_empty() {
            return if cfg.nullable { None } else { Some(Decimal::ZERO) };
        }

        let literal = format!(
            "{}{}.{}",
            if negative && cfg.allow_negative { "-" } else { "" },
            if integer.is_empty() { "0" } else { integer.as_str() },
            if fraction.is_empty() { "0" } else { fraction.as_str() },
        );
        // Adversarial pastes can exceed Decimal's mantissa range.
        Some(literal.parse().unwrap_or(Decimal::ZERO))
    }

    /// Render a numeric value as the fully formatted display string,
    /// clamped to the configured range.
    pub fn format(&self, value: Decimal) -> String {
        let cfg = self.config();
        let mut value = value;
        if let Some(min) = cfg.min {
            if value < min {
                value = min;
            }
        }
        if let Some(max) = cfg.max {
            if value > max {
                value = max;
            }
        }
        if value.is_sign_negative() && !cfg.allow_negative {
            value = value.abs();
        }

        let mut scaled = value
            .round_dp_with_strategy(cfg.precision, RoundingStrategy::MidpointAwayFromZero)
            .abs();
        scaled.rescale(cfg.precision);
        let digits = scaled.mantissa().to_string();
        Self::render(&digits, value.is_sign_negative(), &cfg)
    }

    /// Programmatically set the field's value, fully reformatting the
    /// display. `None` clears the field.
    pub fn set_value(&self, value: Option<Decimal>) {
        match value {
            None => {
                self.store.set_text("");
                self.store.set_cursor(0);
            }
            Some(v) => {
                let rendered = self.format(v);
                let cursor = char_len(&rendered).saturating_sub(self.suffix_length());
                self.store.set_text(&rendered);
                self.store.set_cursor(cursor);
            }
        }
    }

    // ========================================================================
    // Editing operations
    // ========================================================================

    /// Insert one typed character at the cursor.
    ///
    /// Financial mode appends to the digit stream, so the value shifts as
    /// `old * 10 + digit` at the fixed precision. Natural mode inserts
    /// positionally: digits right of the decimal separator overwrite, and
    /// typing the separator itself jumps the cursor past it. Either way
    /// the whole string re-renders and the cursor lands immediately after
    /// the inserted digit, accounting for separator reflow.
    pub fn insert_char(&self, ch: char) {
        let cfg = self.config();
        let natural = cfg.input_mode == InputMode::Natural;
        let is_decimal_char = ch == cfg.decimal_separator || ch == '.';
        if !is_mask_digit(ch) && !is_decimal_char {
            return;
        }

        let raw = self.store.text();

        if raw.is_empty() {
            let masked = self.apply_mask(&ch.to_string(), true);
            if masked.is_empty() {
                return;
            }
            let cursor = if natural && cfg.precision > 0 {
                match char_index_of(&masked, cfg.decimal_separator) {
                    Some(idx) => idx + usize::from(is_decimal_char && !is_mask_digit(ch)),
                    None => char_len(&masked).saturating_sub(self.suffix_length()),
                }
            } else {
                char_len(&masked).saturating_sub(self.suffix_length())
            };
            self.store.set_text(&masked);
            self.store.set_cursor(cursor);
            if self.out_of_range(&cfg) {
                trace!(%ch, "insertion exceeds configured range, reverting");
                self.store.set_text("");
                self.store.set_cursor(0);
            }
            return;
        }

        if is_decimal_char && !is_mask_digit(ch) {
            // Separator keystroke: jump the cursor into the fraction in
            // natural mode, otherwise ignore it.
            if natural && cfg.precision > 0 {
                if let Some(idx) = char_index_of(&raw, cfg.decimal_separator) {
                    self.sync_field(Some(idx + 1), true);
                }
            }
            return;
        }

        let (sel_start, sel_end) = self.store.selection();
        let len = char_len(&raw);
        let head = char_slice(&raw, 0, sel_start);
        let mut tail = char_slice(&raw, sel_end, len);

        let sep_index = char_index_of(&raw, cfg.decimal_separator);
        let in_fraction =
            natural && cfg.precision > 0 && sep_index.map_or(false, |idx| sel_start > idx);
        if in_fraction && sel_start == sel_end && !tail.is_empty() {
            // Overwrite fraction digits instead of shifting them.
            tail = tail.chars().skip(1).collect();
        }

        let previous_text = raw.clone();
        let previous_selection = (sel_start, sel_end);
        let new_raw = format!("{head}{ch}{tail}");
        self.store.set_text(&new_raw);
        self.sync_field(Some(sel_start + 1), true);

        if self.out_of_range(&cfg) {
            trace!(%ch, "insertion exceeds configured range, reverting");
            self.store.set_text(&previous_text);
            self.store
                .set_selection(previous_selection.0, previous_selection.1);
        }
    }

    /// Remove the digit adjacent to the cursor (or the selected span),
    /// skipping over separator characters, then re-render with the cursor
    /// at the removed digit's former offset.
    pub fn remove_digit(&self, key: Key) {
        let cfg = self.config();

        // A nullable field whose value is exactly zero clears outright.
        if cfg.nullable && self.value() == Some(Decimal::ZERO) {
            self.store.set_text("");
            self.store.set_cursor(0);
            return;
        }

        let raw = self.store.text();
        let len = char_len(&raw);
        let prefix_len = self.prefix_length();
        let suffix_start = len.saturating_sub(self.suffix_length());
        let clamp = |p: usize| p.max(prefix_len).min(suffix_start);

        let (raw_start, raw_end) = self.store.selection();
        let mut start = clamp(raw_start);
        let mut end = clamp(raw_end);

        // A selection entirely inside the prefix or suffix has nothing to
        // remove; just normalize the cursor.
        if start == end && raw_start != raw_end {
            self.sync_field(Some(start), false);
            return;
        }

        if start == end {
            match key {
                Key::Backspace => {
                    if start <= prefix_len {
                        return;
                    }
                    start -= 1;
                    if char_at(&raw, start).map_or(false, |c| !is_mask_digit(c)) {
                        start = start.saturating_sub(1);
                    }
                }
                Key::Delete => {
                    if end >= suffix_start {
                        return;
                    }
                    end += 1;
                    if char_at(&raw, end - 1).map_or(false, |c| !is_mask_digit(c)) {
                        end += 1;
                    }
                    end = end.min(suffix_start);
                }
                Key::Other(_) => return,
            }
        }

        let sep_index = char_index_of(&raw, cfg.decimal_separator);
        let in_fraction = cfg.input_mode == InputMode::Natural
            && cfg.precision > 0
            && sep_index.map_or(false, |idx| start > idx);
        let removed_digits = char_slice(&raw, start, end)
            .chars()
            .filter(|c| is_mask_digit(*c))
            .count();
        // Natural-mode fraction removals keep the decimal place count.
        let filler = if in_fraction {
            "0".repeat(removed_digits)
        } else {
            String::new()
        };

        let new_raw = format!(
            "{}{}{}",
            char_slice(&raw, 0, start),
            filler,
            char_slice(&raw, end, len)
        );
        self.store.set_text(&new_raw);
        self.sync_field(Some(start), false);
    }

    /// Toggle the value negative. No-op when negatives are disallowed,
    /// the field is empty, already negative, or exactly zero.
    pub fn set_negative(&self) {
        if !self.config.read().allow_negative {
            return;
        }
        let raw = self.store.text();
        if raw.is_empty() || raw.starts_with('-') {
            return;
        }
        if self.value().map_or(true, |v| v == Decimal::ZERO) {
            return;
        }
        let (cursor, _) = self.store.selection();
        let masked = self.apply_mask(&format!("-{raw}"), false);
        self.store
            .update_text_and_cursor(&masked, char_len(&raw), cursor);
    }

    /// Drop the sign from the value.
    pub fn set_positive(&self) {
        let raw = self.store.text();
        if !raw.contains('-') {
            return;
        }
        let stripped: String = raw.chars().filter(|c| *c != '-').collect();
        let (cursor, _) = self.store.selection();
        let masked = self.apply_mask(&stripped, false);
        self.store
            .update_text_and_cursor(&masked, char_len(&raw), cursor);
    }

    /// Reset the value to zero (or null when nullable), re-render, and
    /// park the cursor right after the prefix.
    pub fn clear(&self) {
        let nullable = self.config.read().nullable;
        self.set_value(if nullable { None } else { Some(Decimal::ZERO) });
        let prefix_len = self.prefix_length();
        self.store.set_cursor(prefix_len);
    }

    /// Re-mask the field's current text in place, repositioning the
    /// cursor at `cursor` (default: end of text) adjusted for any length
    /// change the mask introduces.
    pub fn refresh_display(&self, cursor: Option<usize>) {
        self.sync_field(cursor, true);
    }

    /// Swap in a new configuration and reformat the current value under
    /// it without resetting. Values the new rules cannot represent are
    /// clamped: out-of-range to the bound, negative to absolute when
    /// negatives become disallowed.
    pub fn update_config(&self, new_config: MaskConfig) {
        let value = self.value();
        *self.config.write() = new_config;
        self.set_value(value);
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Range guard for insertions: refuse the digit rather than commit a
    /// runaway value. The floor only matters while the value is negative,
    /// where further digits push it lower; positive values may still be
    /// typed upward toward a positive minimum.
    fn out_of_range(&self, cfg: &MaskConfig) -> bool {
        self.value().map_or(false, |v| {
            cfg.max.map_or(false, |max| v > max)
                || cfg
                    .min
                    .map_or(false, |min| v.is_sign_negative() && v < min)
        })
    }

    /// Re-mask the stored text; cursor clamped into the editable region
    /// between prefix and suffix, then shifted by the mask's length delta.
    fn sync_field(&self, cursor: Option<usize>, pad_and_trim: bool) {
        let raw = self.store.text();
        let old_len = char_len(&raw);
        let masked = self.apply_mask(&raw, pad_and_trim);

        let desired = cursor.unwrap_or(old_len);
        let suffix_start = old_len.saturating_sub(self.suffix_length());
        let clamped = desired.max(self.prefix_length()).min(suffix_start);

        self.store.update_text_and_cursor(&masked, old_len, clamped);
    }

    /// Mask an arbitrary raw string: collect its digit stream and sign,
    /// then re-render. Natural mode first pads/trims the fraction to the
    /// configured precision so the digit stream stays aligned with the
    /// visible separator.
    fn apply_mask(&self, raw: &str, pad_and_trim: bool) -> String {
        let cfg = self.config();
        if !raw.chars().any(is_mask_digit) {
            return String::new();
        }

        let work = if cfg.input_mode == InputMode::Natural && pad_and_trim && cfg.precision > 0 {
            Self::pad_or_trim_precision(raw, &cfg)
        } else {
            raw.to_string()
        };

        let digits: String = work.chars().filter(|c| is_mask_digit(*c)).collect();
        Self::render(&digits, work.contains('-'), &cfg)
    }

    /// Render a digit stream (fraction digits rightmost) with sign,
    /// prefix, grouping, separator, and suffix.
    fn render(digits: &str, negative: bool, cfg: &MaskConfig) -> String {
        let precision = cfg.precision as usize;
        let mut stream: Vec<char> = digits.chars().filter(|c| is_mask_digit(*c)).collect();
        if stream.is_empty() {
            return String::new();
        }
        while stream.len() < precision + 1 {
            stream.insert(0, '0');
        }

        let all_zero = stream.iter().all(|c| is_zero_digit(*c));
        if all_zero && !cfg.allow_zero {
            // Zero suppressed: render nothing at all.
            return String::new();
        }

        let split = stream.len() - precision;
        let mut integer: Vec<char> = stream[..split]
            .iter()
            .copied()
            .skip_while(|c| is_zero_digit(*c))
            .collect();
        if integer.is_empty() {
            integer.push('0');
        }

        let mut grouped = String::new();
        for (i, c) in integer.iter().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(cfg.thousands_separator);
            }
            grouped.push(*c);
        }

        let sign = if negative && cfg.allow_negative && !all_zero {
            "-"
        } else {
            ""
        };

        let mut out = String::with_capacity(grouped.len() + precision + 8);
        out.push_str(sign);
        out.push_str(&cfg.prefix);
        out.push_str(&grouped);
        if precision > 0 {
            out.push(cfg.decimal_separator);
            for c in &stream[split..] {
                out.push(*c);
            }
        }
        out.push_str(&cfg.suffix);
        out
    }

    /// Pad or trim the digits after the decimal separator to exactly the
    /// configured precision, appending a separator when missing.
    fn pad_or_trim_precision(raw: &str, cfg: &MaskConfig) -> String {
        let precision = cfg.precision as usize;
        let chars: Vec<char> = raw.chars().collect();
        let sep_index = chars
            .iter()
            .rposition(|c| *c == cfg.decimal_separator)
            .unwrap_or(chars.len());

        let head: String = chars[..sep_index].iter().collect();
        let mut fraction: String = chars
            .get(sep_index + 1..)
            .unwrap_or(&[])
            .iter()
            .filter(|c| is_mask_digit(**c))
            .collect();

        while char_len(&fraction) < precision {
            fraction.push('0');
        }
        let fraction: String = fraction.chars().take(precision).collect();

        format!("{head}{}{fraction}", cfg.decimal_separator)
    }
}

// ============================================================================
// Tests
// ============================================================================
