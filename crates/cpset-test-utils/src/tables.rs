//! Sample code point tables.
//!
//! Each table is a list of inclusive `(from, to)` pairs in the shape a
//! per-language alphabet table would have. Together they cover all three
//! width tiers and many distinct blocks.

/// Basic Latin letters and digits.
pub const BASIC_LATIN: &[(u32, u32)] = &[(0x30, 0x39), (0x41, 0x5A), (0x61, 0x7A)];

/// Latin-1 letters, skipping the multiplication and division signs.
pub const LATIN1_LETTERS: &[(u32, u32)] = &[(0xC0, 0xD6), (0xD8, 0xF6), (0xF8, 0xFF)];

/// Greek capital and small letters.
pub const GREEK: &[(u32, u32)] = &[(0x391, 0x3A1), (0x3A3, 0x3A9), (0x3B1, 0x3C9)];

/// Russian alphabet.
pub const CYRILLIC: &[(u32, u32)] = &[(0x401, 0x401), (0x410, 0x44F), (0x451, 0x451)];

/// Hiragana, Katakana and the CJK unified ideographs.
pub const CJK: &[(u32, u32)] = &[(0x3041, 0x3096), (0x30A1, 0x30FA), (0x4E00, 0x9FFF)];

/// A few emoji blocks, all above the BMP.
pub const EMOJI: &[(u32, u32)] = &[(0x1F300, 0x1F5FF), (0x1F600, 0x1F64F), (0x1F680, 0x1F6FF)];

/// Every table above, concatenated. Contains adjacent entries
/// (`0x1F5FF`/`0x1F600`) and entries that straddle a block edge.
pub const MIXED_SCRIPTS: &[(u32, u32)] = &[
    (0x30, 0x39),
    (0x41, 0x5A),
    (0x61, 0x7A),
    (0xC0, 0xD6),
    (0xD8, 0xF6),
    (0xF8, 0xFF),
    (0x391, 0x3A1),
    (0x3A3, 0x3A9),
    (0x3B1, 0x3C9),
    (0x401, 0x401),
    (0x410, 0x44F),
    (0x451, 0x451),
    (0x3041, 0x3096),
    (0x30A1, 0x30FA),
    (0x4E00, 0x9FFF),
    (0x1F300, 0x1F5FF),
    (0x1F600, 0x1F64F),
    (0x1F680, 0x1F6FF),
];

/// Naive membership test against a table.
pub fn table_contains(table: &[(u32, u32)], code_point: u32) -> bool {
    table
        .iter()
        .any(|&(from, to)| from <= code_point && code_point <= to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_is_the_concatenation() {
        let joined: Vec<_> = [BASIC_LATIN, LATIN1_LETTERS, GREEK, CYRILLIC, CJK, EMOJI].concat();
        assert_eq!(joined, MIXED_SCRIPTS);
    }

    #[test]
    fn table_lookup() {
        assert!(table_contains(GREEK, 0x3A3));
        assert!(!table_contains(GREEK, 0x3A2));
    }
}
