/// What to do with an integer that does not fit its destination, e.g. `300`
/// into a `u8`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OverflowPolicy {
    /// Fail with [`DecodeErrorKind::NumberOutOfRange`](crate::DecodeErrorKind::NumberOutOfRange).
    #[default]
    Error,
    /// Keep the low bits, two's complement, like an `as` cast: `300` → `44u8`.
    Wrap,
    /// Clamp to the nearest bound: `300` → `255u8`, `-1` → `0u8`.
    Saturate,
}

/// How table keys are matched to struct fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FieldMatching {
    /// Keys must equal the field's serialized name.
    #[default]
    Exact,
    /// Try an exact match first, then an ASCII case-insensitive one.
    CaseInsensitiveFallback,
}

/// Knobs for a [`Decoder`](crate::Decoder).
///
/// ```
/// use tomlbind::{DecodeOptions, FieldMatching, OverflowPolicy};
///
/// let options = DecodeOptions::default()
///     .overflow(OverflowPolicy::Saturate)
///     .field_matching(FieldMatching::CaseInsensitiveFallback);
/// assert!(options.apply_defaults);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Policy for integers outside a field's range
    pub overflow: OverflowPolicy,
    /// Policy for matching keys to fields
    pub field_matching: FieldMatching,
    /// Whether `#[bind(default = ...)]` literals are applied
    pub apply_defaults: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::default(),
            field_matching: FieldMatching::default(),
            apply_defaults: true,
        }
    }
}

impl DecodeOptions {
    /// Sets the overflow policy.
    pub fn overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Sets the field matching policy.
    pub fn field_matching(mut self, field_matching: FieldMatching) -> Self {
        self.field_matching = field_matching;
        self
    }

    /// Turns declared defaults on or off.
    pub fn apply_defaults(mut self, apply_defaults: bool) -> Self {
        self.apply_defaults = apply_defaults;
        self
    }
}
