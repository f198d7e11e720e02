// ============================================================================
// Mask Configuration
// Formatting rules applied to a bound field, immutable per update cycle
// ============================================================================

use crate::numeric::is_mask_digit;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Input Mode
// ============================================================================

/// How digit entry interacts with the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputMode {
    /// Typewriter-style ticker entry: every digit shifts the value left,
    /// with the decimal point implicit at the configured precision.
    #[default]
    Financial,

    /// Positional entry: digits land literally at the cursor, relative to
    /// a visible decimal point.
    Natural,
}

/// Horizontal text alignment the host should apply to the widget.
///
/// The engine never renders; this is carried so hosts can style the field
/// from the same configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextAlign {
    Left,
    #[default]
    Right,
}

// ============================================================================
// Complete Mask Configuration
// ============================================================================

/// Formatting rules for one masked field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaskConfig {
    /// Literal text rendered before the number (e.g. `"$ "`).
    pub prefix: String,

    /// Literal text rendered after the number (e.g. `" kg"`).
    pub suffix: String,

    /// Grouping character inserted every 3 integer digits.
    pub thousands_separator: char,

    /// Character separating the integer and fraction parts.
    pub decimal_separator: char,

    /// Number of fraction digits. Zero disables the decimal separator.
    pub precision: u32,

    /// Whether negative values may be entered and rendered.
    pub allow_negative: bool,

    /// Whether an exact zero may be displayed. When false, edits that
    /// produce zero render the empty string instead.
    pub allow_zero: bool,

    /// Whether an empty field maps to `None` rather than zero.
    pub nullable: bool,

    /// Alignment hint for the host widget.
    pub align: TextAlign,

    /// Digit-entry mode.
    pub input_mode: InputMode,

    /// Optional numeric floor. Values below are clamped on formatting.
    pub min: Option<Decimal>,

    /// Optional numeric ceiling. Insertions that would exceed it revert.
    pub max: Option<Decimal>,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            prefix: "$ ".to_string(),
            suffix: String::new(),
            thousands_separator: ',',
            decimal_separator: '.',
            precision: 2,
            allow_negative: true,
            allow_zero: true,
            nullable: false,
            align: TextAlign::Right,
            input_mode: InputMode::Financial,
            min: None,
            max: None,
        }
    }
}

impl MaskConfig {
    /// Builder method: Set the prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Builder method: Set the suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Builder method: Set thousands and decimal separators.
    pub fn with_separators(mut self, thousands: char, decimal: char) -> Self {
        self.thousands_separator = thousands;
        self.decimal_separator = decimal;
        self
    }

    /// Builder method: Set the fraction digit count.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set the digit-entry mode.
    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    /// Builder method: Allow or forbid negative values.
    pub fn with_allow_negative(mut self, allow: bool) -> Self {
        self.allow_negative = allow;
        self
    }

    /// Builder method: Allow or forbid a rendered zero.
    pub fn with_allow_zero(mut self, allow: bool) -> Self {
        self.allow_zero = allow;
        self
    }

    /// Builder method: Map the empty field to `None`.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Builder method: Set the numeric range.
    pub fn with_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.thousands_separator == self.decimal_separator {
            return Err("Thousands and decimal separators must differ".to_string());
        }
        if is_mask_digit(self.thousands_separator) || is_mask_digit(self.decimal_separator) {
            return Err("Separators cannot be digit characters".to_string());
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err("Minimum cannot exceed maximum".to_string());
            }
        }
        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl MaskConfig {
    /// US dollar style: `$ 1,234.56`.
    pub fn us_dollar() -> Self {
        Self::default()
    }

    /// Euro style: `1.234,56 €`.
    pub fn euro() -> Self {
        Self::default()
            .with_prefix("")
            .with_suffix(" €")
            .with_separators('.', ',')
    }

    /// Brazilian real style: `R$ 1.234,56`.
    pub fn brazilian_real() -> Self {
        Self::default()
            .with_prefix("R$ ")
            .with_separators('.', ',')
    }

    /// Whole-number percentage: `42 %`.
    pub fn percent() -> Self {
        Self::default()
            .with_prefix("")
            .with_suffix(" %")
            .with_precision(0)
            .with_allow_negative(false)
    }
}

// ============================================================================
// Overrides (explicit merge, override wins)
// ============================================================================

/// Partial configuration merged over a base `MaskConfig`.
///
/// Hosts typically hold one global template and apply per-field overrides;
/// this replaces ad-hoc object spreading with an explicit merge.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaskOverrides {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub thousands_separator: Option<char>,
    pub decimal_separator: Option<char>,
    pub precision: Option<u32>,
    pub allow_negative: Option<bool>,
    pub allow_zero: Option<bool>,
    pub nullable: Option<bool>,
    pub align: Option<TextAlign>,
    pub input_mode: Option<InputMode>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl MaskOverrides {
    /// Merge these overrides over `base`. Set fields win; unset fields
    /// keep the base value.
    pub fn apply(&self, base: &MaskConfig) -> MaskConfig {
        MaskConfig {
            prefix: self.prefix.clone().unwrap_or_else(|| base.prefix.clone()),
            suffix: self.suffix.clone().unwrap_or_else(|| base.suffix.clone()),
            thousands_separator: self.thousands_separator.unwrap_or(base.thousands_separator),
            decimal_separator: self.decimal_separator.unwrap_or(base.decimal_separator),
            precision: self.precision.unwrap_or(base.precision),
            allow_negative: self.allow_negative.unwrap_or(base.allow_negative),
            allow_zero: self.allow_zero.unwrap_or(base.allow_zero),
            nullable: self.nullable.unwrap_or(base.nullable),
            align: self.align.unwrap_or(base.align),
            input_mode: self.input_mode.unwrap_or(base.input_mode),
            min: self.min.or(base.min),
            max: self.max.or(base.max),
        }
    }
}
