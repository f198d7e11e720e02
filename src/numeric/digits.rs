// ============================================================================
// Digit Classes and Char-Offset Helpers
// Locale-tolerant digit matching plus cursor-safe string slicing
// ============================================================================

/// Returns true for characters the mask treats as digits.
///
/// Covers ASCII digits plus the Arabic-Indic and Extended Arabic-Indic
/// ranges, for parity with the field's locale-tolerant matching.
#[inline]
pub fn is_mask_digit(c: char) -> bool {
    c.is_ascii_digit()
        || ('\u{0660}'..='\u{0669}').contains(&c)
        || ('\u{06F0}'..='\u{06F9}').contains(&c)
}

/// Numeric value of a mask digit, or `None` for any other character.
#[inline]
pub fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        '\u{0660}'..='\u{0669}' => Some(c as u32 - 0x0660),
        '\u{06F0}'..='\u{06F9}' => Some(c as u32 - 0x06F0),
        _ => None,
    }
}

/// True when the character is a zero digit in any supported digit class.
#[inline]
pub fn is_zero_digit(c: char) -> bool {
    digit_value(c) == Some(0)
}

/// Number of mask digits in a string.
pub fn count_digits(s: &str) -> usize {
    s.chars().filter(|c| is_mask_digit(*c)).count()
}

/// String length in chars. Cursor offsets are char offsets, never bytes,
/// so multi-byte prefixes ("R$ ", "€") don't skew cursor math.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Substring by char offsets, clamped to the string bounds.
pub fn char_slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Character at a char offset.
#[inline]
pub fn char_at(s: &str, index: usize) -> Option<char> {
    s.chars().nth(index)
}

/// Char offset of the first occurrence of `needle`.
#[inline]
pub fn char_index_of(s: &str, needle: char) -> Option<usize> {
    s.chars().position(|c| c == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_classes() {
        assert!(is_mask_digit('0'));
        assert!(is_mask_digit('9'));
        assert!(is_mask_digit('\u{0665}')); // Arabic-Indic five
        assert!(is_mask_digit('\u{06F7}')); // Extended Arabic-Indic seven
        assert!(!is_mask_digit('a'));
        assert!(!is_mask_digit('.'));
        assert!(!is_mask_digit('-'));
    }

    #[test]
    fn test_digit_value() {
        assert_eq!(digit_value('7'), Some(7));
        assert_eq!(digit_value('\u{0663}'), Some(3));
        assert_eq!(digit_value('\u{06F9}'), Some(9));
        assert_eq!(digit_value('$'), None);
    }

    #[test]
    fn test_zero_digit() {
        assert!(is_zero_digit('0'));
        assert!(is_zero_digit('\u{0660}'));
        assert!(is_zero_digit('\u{06F0}'));
        assert!(!is_zero_digit('1'));
        assert!(!is_zero_digit('o'));
    }

    #[test]
    fn test_count_digits() {
        assert_eq!(count_digits("$ 1,234.56"), 6);
        assert_eq!(count_digits(""), 0);
        assert_eq!(count_digits("abc"), 0);
    }

    #[test]
    fn test_char_offsets_are_not_bytes() {
        let s = "€ 12";
        assert_eq!(char_len(s), 4);
        assert_eq!(char_at(s, 0), Some('€'));
        assert_eq!(char_at(s, 2), Some('1'));
        assert_eq!(char_slice(s, 2, 4), "12");
    }

    #[test]
    fn test_char_slice_clamps() {
        assert_eq!(char_slice("abc", 1, 10), "bc");
        assert_eq!(char_slice("abc", 2, 1), "");
        assert_eq!(char_slice("abc", 5, 7), "");
    }

    #[test]
    fn test_char_index_of() {
        assert_eq!(char_index_of("$ 0.05", '.'), Some(3));
        assert_eq!(char_index_of("$ 005", '.'), None);
    }
}
