//! Character-reference states.
//!
//! The expansion table is consulted through
//! [`NamedEntitySet`](crate::entity::NamedEntitySet); everything here is
//! return-state plumbing, the temporary buffer, and the numeric endgame.

use super::{State, Tokenizer};
use crate::entity::{is_noncharacter, remap_c1_control};
use crate::error::ErrorCode;

impl Tokenizer<'_> {
    pub(super) fn step_character_reference(&mut self) {
        self.temp.clear();
        self.temp.push('&');
        match self.input.try_consume_next() {
            Some(ch) if ch.is_ascii_alphanumeric() => {
                self.reconsume_in(State::NamedCharacterReference);
            }
            Some('#') => {
                self.temp.push('#');
                self.transition_to(State::NumericCharacterReference);
            }
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in_return_state();
            }
        }
    }

    pub(super) fn step_named_character_reference(&mut self) {
        let rest = self.input.rest();
        match self.entities.longest_match(rest) {
            Some(matched) => {
                self.input.skip(matched.len);
                self.temp.push_str(&rest[..matched.len]);
                // Historical quirk: a legacy (semicolon-less) match inside an
                // attribute is taken literally when followed by `=` or an
                // alphanumeric.
                let blocked = self.charref_in_attribute()
                    && !matched.terminated
                    && self
                        .input
                        .rest()
                        .chars()
                        .next()
                        .is_some_and(|next| next == '=' || next.is_ascii_alphanumeric());
                if !blocked {
                    if !matched.terminated {
                        self.emit_error(ErrorCode::MissingSemicolonAfterCharacterReference);
                    }
                    self.temp.clear();
                    self.temp.push(matched.chars.0);
                    if let Some(second) = matched.chars.1 {
                        self.temp.push(second);
                    }
                }
                self.flush_code_points_consumed_as_character_reference();
                self.return_from_charref();
            }
            None => {
                self.flush_code_points_consumed_as_character_reference();
                self.transition_to(State::AmbiguousAmpersand);
            }
        }
    }

    pub(super) fn step_ambiguous_ampersand(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if ch.is_ascii_alphanumeric() => {
                if self.charref_in_attribute() {
                    self.tag_mut().append_to_attr_value(ch);
                } else {
                    self.emit_char(ch);
                }
            }
            Some(';') => {
                self.emit_error(ErrorCode::UnknownNamedCharacterReference);
                self.reconsume_in_return_state();
            }
            _ => self.reconsume_in_return_state(),
        }
    }

    pub(super) fn step_numeric_character_reference(&mut self) {
        self.char_ref_code = 0;
        match self.input.try_consume_next() {
            Some(ch @ ('x' | 'X')) => {
                self.temp.push(ch);
                self.transition_to(State::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(State::DecimalCharacterReferenceStart),
        }
    }

    pub(super) fn step_hexadecimal_character_reference_start(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if ch.is_ascii_hexdigit() => {
                self.reconsume_in(State::HexadecimalCharacterReference);
            }
            _ => {
                self.emit_error(ErrorCode::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in_return_state();
            }
        }
    }

    pub(super) fn step_decimal_character_reference_start(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if ch.is_ascii_digit() => {
                self.reconsume_in(State::DecimalCharacterReference);
            }
            _ => {
                self.emit_error(ErrorCode::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in_return_state();
            }
        }
    }

    pub(super) fn step_hexadecimal_character_reference(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if ch.is_ascii_hexdigit() => {
                let digit = ch.to_digit(16).expect("guarded hex digit");
                self.accumulate_char_ref_digit(16, digit);
            }
            Some(';') => self.transition_to(State::NumericCharacterReferenceEnd),
            _ => {
                self.emit_error(ErrorCode::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(State::NumericCharacterReferenceEnd);
            }
        }
    }

    pub(super) fn step_decimal_character_reference(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if ch.is_ascii_digit() => {
                let digit = ch.to_digit(10).expect("guarded decimal digit");
                self.accumulate_char_ref_digit(10, digit);
            }
            Some(';') => self.transition_to(State::NumericCharacterReferenceEnd),
            _ => {
                self.emit_error(ErrorCode::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(State::NumericCharacterReferenceEnd);
            }
        }
    }

    fn accumulate_char_ref_digit(&mut self, radix: u32, digit: u32) {
        self.char_ref_code = self
            .char_ref_code
            .saturating_mul(radix)
            .saturating_add(digit);
        // Clamp once out of range; further digits cannot bring it back.
        if self.char_ref_code > 0x10FFFF {
            self.char_ref_code = 0x11_0000;
        }
    }

    /// Check the accumulated code and deliver the replacement scalar.
    /// Consumes nothing.
    pub(super) fn step_numeric_character_reference_end(&mut self) {
        let code = self.char_ref_code;
        let ch = if code == 0 {
            self.emit_error(ErrorCode::NullCharacterReference);
            '\u{FFFD}'
        } else if code > 0x10FFFF {
            self.emit_error(ErrorCode::CharacterReferenceOutsideUnicodeRange);
            '\u{FFFD}'
        } else if (0xD800..=0xDFFF).contains(&code) {
            self.emit_error(ErrorCode::SurrogateCharacterReference);
            '\u{FFFD}'
        } else if is_noncharacter(code) {
            self.emit_error(ErrorCode::NoncharacterCharacterReference);
            char::from_u32(code).unwrap_or('\u{FFFD}')
        } else if code == 0x0D || (is_control_code(code) && !is_whitespace_code(code)) {
            self.emit_error(ErrorCode::ControlCharacterReference);
            remap_c1_control(code)
                .or_else(|| char::from_u32(code))
                .unwrap_or('\u{FFFD}')
        } else {
            char::from_u32(code).unwrap_or('\u{FFFD}')
        };
        self.temp.clear();
        self.temp.push(ch);
        self.flush_code_points_consumed_as_character_reference();
        self.return_from_charref();
    }
}

fn is_control_code(code: u32) -> bool {
    code <= 0x1F || (0x7F..=0x9F).contains(&code)
}

fn is_whitespace_code(code: u32) -> bool {
    matches!(code, 0x09 | 0x0A | 0x0C | 0x0D | 0x20)
}
