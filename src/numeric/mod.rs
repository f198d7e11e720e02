// ============================================================================
// Numeric Module
// Digit-level helpers underneath the masking engine
// ============================================================================
//
// This module provides:
// - Digit classification across the supported digit classes (ASCII,
//   Arabic-Indic, Extended Arabic-Indic)
// - Char-offset string helpers so cursor math never touches byte offsets
//
// The canonical numeric value itself is rust_decimal::Decimal; nothing in
// the engine does floating-point arithmetic.

mod digits;

pub use digits::{
    char_at, char_index_of, char_len, char_slice, count_digits, digit_value, is_mask_digit,
    is_zero_digit,
};
