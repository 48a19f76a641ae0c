//! Unicode general categories and the category bitmask.
//!
//! Each [`UnicodeCategory`] owns one bit of a [`CategoryMask`]. Membership
//! of a code point in a mask is a single classification plus a bit test;
//! no ranges are ever materialized for a category.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use icu_properties::props::GeneralCategory;
use icu_properties::CodePointMapData;

/// A Unicode general category.
///
/// The discriminant is the category's bit index in a [`CategoryMask`].
/// Bit 17 is unused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum UnicodeCategory {
    /// `Cn`
    Unassigned = 0,
    /// `Lu`
    UppercaseLetter = 1,
    /// `Ll`
    LowercaseLetter = 2,
    /// `Lt`
    TitlecaseLetter = 3,
    /// `Lm`
    ModifierLetter = 4,
    /// `Lo`
    OtherLetter = 5,
    /// `Mn`
    NonSpacingMark = 6,
    /// `Me`
    EnclosingMark = 7,
    /// `Mc`
    CombiningSpacingMark = 8,
    /// `Nd`
    DecimalDigitNumber = 9,
    /// `Nl`
    LetterNumber = 10,
    /// `No`
    OtherNumber = 11,
    /// `Zs`
    SpaceSeparator = 12,
    /// `Zl`
    LineSeparator = 13,
    /// `Zp`
    ParagraphSeparator = 14,
    /// `Cc`
    Control = 15,
    /// `Cf`
    Format = 16,
    /// `Co`
    PrivateUse = 18,
    /// `Cs`
    Surrogate = 19,
    /// `Pd`
    DashPunctuation = 20,
    /// `Ps`
    StartPunctuation = 21,
    /// `Pe`
    EndPunctuation = 22,
    /// `Pc`
    ConnectorPunctuation = 23,
    /// `Po`
    OtherPunctuation = 24,
    /// `Sm`
    MathSymbol = 25,
    /// `Sc`
    CurrencySymbol = 26,
    /// `Sk`
    ModifierSymbol = 27,
    /// `So`
    OtherSymbol = 28,
    /// `Pi`
    InitialQuotePunctuation = 29,
    /// `Pf`
    FinalQuotePunctuation = 30,
}

impl UnicodeCategory {
    /// Every category, in bit order.
    pub const ALL: [UnicodeCategory; 30] = [
        Self::Unassigned,
        Self::UppercaseLetter,
        Self::LowercaseLetter,
        Self::TitlecaseLetter,
        Self::ModifierLetter,
        Self::OtherLetter,
        Self::NonSpacingMark,
        Self::EnclosingMark,
        Self::CombiningSpacingMark,
        Self::DecimalDigitNumber,
        Self::LetterNumber,
        Self::OtherNumber,
        Self::SpaceSeparator,
        Self::LineSeparator,
        Self::ParagraphSeparator,
        Self::Control,
        Self::Format,
        Self::PrivateUse,
        Self::Surrogate,
        Self::DashPunctuation,
        Self::StartPunctuation,
        Self::EndPunctuation,
        Self::ConnectorPunctuation,
        Self::OtherPunctuation,
        Self::MathSymbol,
        Self::CurrencySymbol,
        Self::ModifierSymbol,
        Self::OtherSymbol,
        Self::InitialQuotePunctuation,
        Self::FinalQuotePunctuation,
    ];

    /// Classify a code point using the compiled Unicode character database.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpset_core::UnicodeCategory;
    ///
    /// assert_eq!(UnicodeCategory::of('7' as u32), UnicodeCategory::DecimalDigitNumber);
    /// assert_eq!(UnicodeCategory::of(0xD800), UnicodeCategory::Surrogate);
    /// ```
    pub fn of(code_point: u32) -> Self {
        match CodePointMapData::<GeneralCategory>::new().get32(code_point) {
            GeneralCategory::UppercaseLetter => Self::UppercaseLetter,
            GeneralCategory::LowercaseLetter => Self::LowercaseLetter,
            GeneralCategory::TitlecaseLetter => Self::TitlecaseLetter,
            GeneralCategory::ModifierLetter => Self::ModifierLetter,
            GeneralCategory::OtherLetter => Self::OtherLetter,
            GeneralCategory::NonspacingMark => Self::NonSpacingMark,
            GeneralCategory::EnclosingMark => Self::EnclosingMark,
            GeneralCategory::SpacingMark => Self::CombiningSpacingMark,
            GeneralCategory::DecimalNumber => Self::DecimalDigitNumber,
            GeneralCategory::LetterNumber => Self::LetterNumber,
            GeneralCategory::OtherNumber => Self::OtherNumber,
            GeneralCategory::SpaceSeparator => Self::SpaceSeparator,
            GeneralCategory::LineSeparator => Self::LineSeparator,
            GeneralCategory::ParagraphSeparator => Self::ParagraphSeparator,
            GeneralCategory::Control => Self::Control,
            GeneralCategory::Format => Self::Format,
            GeneralCategory::PrivateUse => Self::PrivateUse,
            GeneralCategory::Surrogate => Self::Surrogate,
            GeneralCategory::DashPunctuation => Self::DashPunctuation,
            GeneralCategory::OpenPunctuation => Self::StartPunctuation,
            GeneralCategory::ClosePunctuation => Self::EndPunctuation,
            GeneralCategory::ConnectorPunctuation => Self::ConnectorPunctuation,
            GeneralCategory::OtherPunctuation => Self::OtherPunctuation,
            GeneralCategory::MathSymbol => Self::MathSymbol,
            GeneralCategory::CurrencySymbol => Self::CurrencySymbol,
            GeneralCategory::ModifierSymbol => Self::ModifierSymbol,
            GeneralCategory::OtherSymbol => Self::OtherSymbol,
            GeneralCategory::InitialPunctuation => Self::InitialQuotePunctuation,
            GeneralCategory::FinalPunctuation => Self::FinalQuotePunctuation,
            _ => Self::Unassigned,
        }
    }

    /// Bit index in a [`CategoryMask`].
    #[inline]
    pub fn bit(self) -> u32 {
        self as u32
    }

    /// Two-letter property value alias, e.g. `"Nd"`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Unassigned => "Cn",
            Self::UppercaseLetter => "Lu",
            Self::LowercaseLetter => "Ll",
            Self::TitlecaseLetter => "Lt",
            Self::ModifierLetter => "Lm",
            Self::OtherLetter => "Lo",
            Self::NonSpacingMark => "Mn",
            Self::EnclosingMark => "Me",
            Self::CombiningSpacingMark => "Mc",
            Self::DecimalDigitNumber => "Nd",
            Self::LetterNumber => "Nl",
            Self::OtherNumber => "No",
            Self::SpaceSeparator => "Zs",
            Self::LineSeparator => "Zl",
            Self::ParagraphSeparator => "Zp",
            Self::Control => "Cc",
            Self::Format => "Cf",
            Self::PrivateUse => "Co",
            Self::Surrogate => "Cs",
            Self::DashPunctuation => "Pd",
            Self::StartPunctuation => "Ps",
            Self::EndPunctuation => "Pe",
            Self::ConnectorPunctuation => "Pc",
            Self::OtherPunctuation => "Po",
            Self::MathSymbol => "Sm",
            Self::CurrencySymbol => "Sc",
            Self::ModifierSymbol => "Sk",
            Self::OtherSymbol => "So",
            Self::InitialQuotePunctuation => "Pi",
            Self::FinalQuotePunctuation => "Pf",
        }
    }

    /// Look up a category by its two-letter alias.
    pub fn from_abbreviation(alias: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.abbreviation() == alias)
    }
}

impl fmt::Display for UnicodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// A set of general categories, one bit per [`UnicodeCategory`].
///
/// # Examples
///
/// ```
/// use cpset_core::{CategoryMask, UnicodeCategory};
///
/// let mask = CategoryMask::LETTERS | UnicodeCategory::DecimalDigitNumber;
/// assert!(mask.matches('q' as u32));
/// assert!(mask.matches('4' as u32));
/// assert!(!mask.matches('-' as u32));
///
/// let no_upper = mask.without(UnicodeCategory::UppercaseLetter.into());
/// assert!(!no_upper.matches('Q' as u32));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategoryMask(u64);

impl CategoryMask {
    /// No categories.
    pub const EMPTY: CategoryMask = CategoryMask(0);

    /// `L`: all letter categories.
    pub const LETTERS: CategoryMask = CategoryMask(0b11_1110);
    /// `M`: all mark categories.
    pub const MARKS: CategoryMask = CategoryMask(0b1_1100_0000);
    /// `N`: all number categories.
    pub const NUMBERS: CategoryMask = CategoryMask(0b1110_0000_0000);
    /// `Z`: all separator categories.
    pub const SEPARATORS: CategoryMask = CategoryMask(0b111_0000_0000_0000);
    /// `P`: all punctuation categories.
    pub const PUNCTUATION: CategoryMask =
        CategoryMask(0b1_1111 << 20 | 1 << 29 | 1 << 30);
    /// `S`: all symbol categories.
    pub const SYMBOLS: CategoryMask = CategoryMask(0b1111 << 25);

    /// Build a mask from raw bits. Bits above 30 and bit 17 never match.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw bits.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether no category is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `category` is set.
    #[inline]
    pub fn contains(self, category: UnicodeCategory) -> bool {
        self.0 & (1 << category.bit()) != 0
    }

    /// Set `category`.
    pub fn insert(&mut self, category: UnicodeCategory) {
        self.0 |= 1 << category.bit();
    }

    /// Union of two masks.
    pub const fn union(self, other: CategoryMask) -> Self {
        Self(self.0 | other.0)
    }

    /// This mask with every category of `other` cleared.
    pub const fn without(self, other: CategoryMask) -> Self {
        Self(self.0 & !other.0)
    }

    /// Whether the two masks share a category.
    pub const fn intersects(self, other: CategoryMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether the category of `code_point` is set.
    ///
    /// Skips classification entirely for an empty mask.
    #[inline]
    pub fn matches(self, code_point: u32) -> bool {
        !self.is_empty() && self.contains(UnicodeCategory::of(code_point))
    }

    /// Set categories, in bit order.
    pub fn iter(self) -> impl Iterator<Item = UnicodeCategory> {
        UnicodeCategory::ALL
            .into_iter()
            .filter(move |&c| self.contains(c))
    }
}

impl From<UnicodeCategory> for CategoryMask {
    fn from(category: UnicodeCategory) -> Self {
        Self(1 << category.bit())
    }
}

impl FromIterator<UnicodeCategory> for CategoryMask {
    fn from_iter<I: IntoIterator<Item = UnicodeCategory>>(iter: I) -> Self {
        let mut mask = Self::EMPTY;
        for c in iter {
            mask.insert(c);
        }
        mask
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: CategoryMask) -> CategoryMask {
        self.union(rhs)
    }
}

impl BitOr<UnicodeCategory> for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: UnicodeCategory) -> CategoryMask {
        self.union(rhs.into())
    }
}

impl BitOrAssign for CategoryMask {
    fn bitor_assign(&mut self, rhs: CategoryMask) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for CategoryMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
