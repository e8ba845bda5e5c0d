//! Field flag (`/Ff`) decoding.
//!
//! [`FieldFlags`] wraps the raw bitmask; [`FlagMeanings`] is the decoded,
//! serializable view every caller sees. Bit positions follow PDF 1.7
//! Tables 221, 226, 228 and 230.

use bitflags::bitflags;

bitflags! {
    /// Field flags from a field dictionary's `/Ff` entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u32 {
        /// The user may not change the value of the field.
        const READ_ONLY = 1 << 0;
        /// The field must have a value at submit time.
        const REQUIRED = 1 << 1;
        /// The field must not be exported by a submit-form action.
        const NO_EXPORT = 1 << 2;
        /// Text: may contain multiple lines.
        const MULTILINE = 1 << 12;
        /// Text: value is a password and must not be echoed.
        const PASSWORD = 1 << 13;
        /// Radio: exactly one button must be selected at all times.
        const NO_TOGGLE_TO_OFF = 1 << 14;
        /// Button: the field is a set of radio buttons.
        const RADIO = 1 << 15;
        /// Button: the field is a push button.
        const PUSH_BUTTON = 1 << 16;
        /// Choice: the field is a combo box (otherwise a list box).
        const COMBO = 1 << 17;
        /// Combo: includes an editable text box.
        const EDIT = 1 << 18;
        /// Choice: options should be sorted alphabetically.
        const SORT = 1 << 19;
        /// Text: value is a file path.
        const FILE_SELECT = 1 << 20;
        /// Choice: more than one option may be selected.
        const MULTI_SELECT = 1 << 21;
        /// Text/choice: do not spell-check.
        const DO_NOT_SPELL_CHECK = 1 << 22;
        /// Text: do not scroll beyond the widget.
        const DO_NOT_SCROLL = 1 << 23;
        /// Text: divide the field into `/MaxLen` equally spaced combs.
        const COMB = 1 << 24;
        /// Text: value is rich text.
        const RICH_TEXT = 1 << 25;
        /// Radio: buttons with the same export value toggle together.
        const RADIOS_IN_UNISON = 1 << 25;
        /// Choice: commit the value as soon as a selection is made.
        const COMMIT_ON_SEL_CHANGE = 1 << 26;
    }
}

impl FieldFlags {
    /// Build flags from the `/Ff` integer, keeping unknown bits.
    pub fn from_raw(raw: i64) -> Self {
        Self::from_bits_retain(raw as u32)
    }

    /// Decode the bitmask into named booleans.
    pub fn meanings(&self) -> FlagMeanings {
        FlagMeanings::from(*self)
    }
}

/// Decoded meaning of every documented field-flag bit.
///
/// Bit 25 is shared: `rich_text` for text fields, `radios_in_unison` for
/// radio buttons. Both are reported so callers need not know the field type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagMeanings {
    pub read_only: bool,
    pub required: bool,
    pub no_export: bool,
    pub multiline: bool,
    pub password: bool,
    pub radio: bool,
    pub push_button: bool,
    pub combo: bool,
    pub edit: bool,
    pub sort: bool,
    pub file_select: bool,
    pub multi_select: bool,
    pub do_not_spell_check: bool,
    pub do_not_scroll: bool,
    pub comb: bool,
    pub rich_text: bool,
    pub radios_in_unison: bool,
    pub commit_on_sel_change: bool,
}

impl From<FieldFlags> for FlagMeanings {
    fn from(flags: FieldFlags) -> Self {
        Self {
            read_only: flags.contains(FieldFlags::READ_ONLY),
            required: flags.contains(FieldFlags::REQUIRED),
            no_export: flags.contains(FieldFlags::NO_EXPORT),
            multiline: flags.contains(FieldFlags::MULTILINE),
            password: flags.contains(FieldFlags::PASSWORD),
            radio: flags.contains(FieldFlags::RADIO),
            push_button: flags.contains(FieldFlags::PUSH_BUTTON),
            combo: flags.contains(FieldFlags::COMBO),
            edit: flags.contains(FieldFlags::EDIT),
            sort: flags.contains(FieldFlags::SORT),
            file_select: flags.contains(FieldFlags::FILE_SELECT),
            multi_select: flags.contains(FieldFlags::MULTI_SELECT),
            do_not_spell_check: flags.contains(FieldFlags::DO_NOT_SPELL_CHECK),
            do_not_scroll: flags.contains(FieldFlags::DO_NOT_SCROLL),
            comb: flags.contains(FieldFlags::COMB),
            rich_text: flags.contains(FieldFlags::RICH_TEXT),
            radios_in_unison: flags.contains(FieldFlags::RADIOS_IN_UNISON),
            commit_on_sel_change: flags.contains(FieldFlags::COMMIT_ON_SEL_CHANGE),
        }
    }
}
