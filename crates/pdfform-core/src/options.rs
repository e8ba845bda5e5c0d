//! Options controlling how forms are read and filled.

/// What to do with text longer than a field's `/MaxLen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MaxLengthPolicy {
    /// Reject the value with `ValueTooLong`.
    #[default]
    Reject,
    /// Keep the first `/MaxLen` characters.
    Truncate,
}

/// Options for form reading and filling.
///
/// Provides configurable limits and policies. Use `FormOptions::default()`
/// for strict validation with standard limits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormOptions {
    /// Reject values outside a field's option set (default: true).
    ///
    /// When false, unknown radio values reset the group to `Off`, unknown
    /// choice values clear the field, and nothing aborts the fill.
    pub strict: bool,
    /// Maximum nesting depth of the field tree (default: 64).
    pub max_depth: usize,
    /// Let a value-less named field adopt its first kid's value on read (default: true).
    pub adopt_kid_value: bool,
    /// Handling of over-long text values (default: Reject).
    pub max_length_policy: MaxLengthPolicy,
    /// Set the read-only flag on every written field (default: false).
    pub flatten: bool,
    /// Maximum input PDF size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
    /// Set `/NeedAppearances true` after a fill (default: true).
    pub need_appearances: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            strict: true,
            max_depth: 64,
            adopt_kid_value: true,
            max_length_policy: MaxLengthPolicy::Reject,
            flatten: false,
            max_input_bytes: None,
            need_appearances: true,
        }
    }
}

impl FormOptions {
    /// Strict validation: invalid options and over-long values abort the fill.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Best-effort filling for partially-known forms.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }

    /// Check an input size against `max_input_bytes`.
    pub fn check_input_size(&self, len: usize) -> Result<(), crate::FormError> {
        match self.max_input_bytes {
            Some(limit) if len > limit => Err(crate::FormError::ResourceLimitExceeded {
                limit_name: "max_input_bytes".to_string(),
                limit_value: limit,
                actual_value: len,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormError;

    #[test]
    fn defaults() {
        let opts = FormOptions::default();
        assert!(opts.strict);
        assert_eq!(opts.max_depth, 64);
        assert!(opts.adopt_kid_value);
        assert_eq!(opts.max_length_policy, MaxLengthPolicy::Reject);
        assert!(!opts.flatten);
        assert_eq!(opts.max_input_bytes, None);
        assert!(opts.need_appearances);
    }

    #[test]
    fn lenient_only_relaxes_strictness() {
        let opts = FormOptions::lenient();
        assert!(!opts.strict);
        assert_eq!(opts.max_depth, 64);
        assert_eq!(FormOptions::strict(), FormOptions::default());
    }

    #[test]
    fn input_size_limit() {
        let opts = FormOptions {
            max_input_bytes: Some(10),
            ..FormOptions::default()
        };
        assert!(opts.check_input_size(10).is_ok());
        let err = opts.check_input_size(11).unwrap_err();
        assert!(matches!(
            err,
            FormError::ResourceLimitExceeded {
                limit_value: 10,
                actual_value: 11,
                ..
            }
        ));
        assert!(FormOptions::default().check_input_size(usize::MAX).is_ok());
    }
}
