//! Named character-reference expansion interface.
//!
//! The full named-entity table is an external collaborator; the tokenizer
//! only consults this interface with a longest-match lookup. The built-in
//! table is a minimal, explicitly limited subset.

/// Result of a longest-match lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityMatch {
    /// Bytes of the matched name, excluding the leading `&`.
    pub len: usize,
    /// Whether the matched name ends with `;`.
    pub terminated: bool,
    /// One or two replacement scalars.
    pub chars: (char, Option<char>),
}

/// Longest-match lookup over a named-entity table.
pub trait NamedEntitySet {
    /// Longest table entry that is a prefix of `input`, where `input` starts
    /// immediately after the `&`.
    fn longest_match(&self, input: &str) -> Option<EntityMatch>;
}

/// Minimal built-in table.
///
/// Contract:
/// - The predefined XML entities plus `nbsp`, with and without the
///   terminating semicolon where the semicolon-less legacy form exists.
/// - Every replacement is a single scalar.
///
/// This is intentionally narrow; a full table plugs in via
/// [`NamedEntitySet`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimalEntities;

const TABLE: &[(&str, char)] = &[
    ("amp;", '&'),
    ("amp", '&'),
    ("apos;", '\''),
    ("gt;", '>'),
    ("gt", '>'),
    ("lt;", '<'),
    ("lt", '<'),
    ("nbsp;", '\u{00A0}'),
    ("nbsp", '\u{00A0}'),
    ("quot;", '"'),
    ("quot", '"'),
];

impl NamedEntitySet for MinimalEntities {
    fn longest_match(&self, input: &str) -> Option<EntityMatch> {
        let mut best: Option<(&'static str, char)> = None;
        for (name, ch) in TABLE {
            let longer = best.map_or(true, |(b, _)| name.len() > b.len());
            if longer && input.starts_with(name) {
                best = Some((name, *ch));
            }
        }
        best.map(|(name, ch)| EntityMatch {
            len: name.len(),
            terminated: name.ends_with(';'),
            chars: (ch, None),
        })
    }
}

/// windows-1252 remap for numeric references in the C1 range.
pub(crate) fn remap_c1_control(code: u32) -> Option<char> {
    let ch = match code {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => return None,
    };
    Some(ch)
}

/// Noncharacter code points as defined by Unicode.
pub(crate) fn is_noncharacter(code: u32) -> bool {
    (0xFDD0..=0xFDEF).contains(&code) || (code & 0xFFFE) == 0xFFFE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match_prefers_terminated_form() {
        let entities = MinimalEntities;
        let matched = entities.longest_match("amp;x").expect("amp; should match");
        assert_eq!(matched.len, 4);
        assert!(matched.terminated);
        assert_eq!(matched.chars, ('&', None));
    }

    #[test]
    fn legacy_form_matches_without_semicolon() {
        let entities = MinimalEntities;
        let matched = entities.longest_match("ampx").expect("amp should match");
        assert_eq!(matched.len, 3);
        assert!(!matched.terminated);
    }

    #[test]
    fn unknown_names_do_not_match() {
        assert_eq!(MinimalEntities.longest_match("bogus;"), None);
        // `apos` has no legacy form.
        assert_eq!(MinimalEntities.longest_match("apos "), None);
    }

    #[test]
    fn c1_remap_covers_the_euro_sign_and_skips_holes() {
        assert_eq!(remap_c1_control(0x80), Some('\u{20AC}'));
        assert_eq!(remap_c1_control(0x81), None);
        assert_eq!(remap_c1_control(0x9F), Some('\u{0178}'));
    }

    #[test]
    fn noncharacters_are_detected() {
        assert!(is_noncharacter(0xFDD0));
        assert!(is_noncharacter(0xFFFE));
        assert!(is_noncharacter(0x10FFFF));
        assert!(!is_noncharacter(0xFFFD));
    }
}
