//! DOCTYPE states, through the public/system identifier tail.

use super::{is_html_whitespace, State, Tokenizer};
use crate::error::ErrorCode;

impl Tokenizer<'_> {
    pub(super) fn step_doctype(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {
                self.transition_to(State::BeforeDoctypeName);
            }
            Some('>') => self.reconsume_in(State::BeforeDoctypeName),
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.emit_quirks_doctype();
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(State::BeforeDoctypeName);
            }
        }
    }

    pub(super) fn step_before_doctype_name(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {}
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.start_doctype();
                self.doctype_mut().append_to_name('\u{FFFD}');
                self.transition_to(State::DoctypeName);
            }
            Some('>') => {
                self.emit_error(ErrorCode::MissingDoctypeName);
                self.start_doctype();
                self.doctype_mut().force_quirks = true;
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.emit_quirks_doctype();
                self.emit_eof();
            }
            Some(ch) => {
                self.start_doctype();
                self.doctype_mut().append_to_name(ch);
                self.transition_to(State::DoctypeName);
            }
        }
    }

    pub(super) fn step_doctype_name(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {
                self.transition_to(State::AfterDoctypeName);
            }
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.doctype_mut().append_to_name('\u{FFFD}');
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(ch) => self.doctype_mut().append_to_name(ch),
        }
    }

    pub(super) fn step_after_doctype_name(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {}
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {
                // The keyword check starts from the current character.
                self.input.reconsume();
                if self.input.lookahead_eq_ignore_ascii_case(b"PUBLIC") {
                    self.input.skip(6);
                    self.transition_to(State::AfterDoctypePublicKeyword);
                } else if self.input.lookahead_eq_ignore_ascii_case(b"SYSTEM") {
                    self.input.skip(6);
                    self.transition_to(State::AfterDoctypeSystemKeyword);
                } else {
                    self.emit_error(ErrorCode::InvalidCharacterSequenceAfterDoctypeName);
                    self.doctype_mut().force_quirks = true;
                    self.transition_to(State::BogusDoctype);
                }
            }
        }
    }

    pub(super) fn step_after_doctype_public_keyword(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {
                self.transition_to(State::BeforeDoctypePublicIdentifier);
            }
            Some(quote @ ('"' | '\'')) => {
                self.emit_error(ErrorCode::MissingWhitespaceAfterDoctypePublicKeyword);
                self.doctype_mut().public_id = Some(String::new());
                self.transition_to(public_id_state(quote));
            }
            Some('>') => {
                self.emit_error(ErrorCode::MissingDoctypePublicIdentifier);
                self.doctype_mut().force_quirks = true;
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::MissingQuoteBeforeDoctypePublicIdentifier);
                self.doctype_mut().force_quirks = true;
                self.reconsume_in(State::BogusDoctype);
            }
        }
    }

    pub(super) fn step_before_doctype_public_identifier(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {}
            Some(quote @ ('"' | '\'')) => {
                self.doctype_mut().public_id = Some(String::new());
                self.transition_to(public_id_state(quote));
            }
            Some('>') => {
                self.emit_error(ErrorCode::MissingDoctypePublicIdentifier);
                self.doctype_mut().force_quirks = true;
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::MissingQuoteBeforeDoctypePublicIdentifier);
                self.doctype_mut().force_quirks = true;
                self.reconsume_in(State::BogusDoctype);
            }
        }
    }

    pub(super) fn step_doctype_public_identifier_quoted(&mut self, quote: char) {
        match self.input.try_consume_next() {
            Some(ch) if ch == quote => {
                self.transition_to(State::AfterDoctypePublicIdentifier);
            }
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.doctype_mut().append_to_public_id('\u{FFFD}');
            }
            Some('>') => {
                self.emit_error(ErrorCode::AbruptDoctypePublicIdentifier);
                self.doctype_mut().force_quirks = true;
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(ch) => self.doctype_mut().append_to_public_id(ch),
        }
    }

    pub(super) fn step_after_doctype_public_identifier(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {
                self.transition_to(State::BetweenDoctypePublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            Some(quote @ ('"' | '\'')) => {
                self.emit_error(
                    ErrorCode::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.doctype_mut().system_id = Some(String::new());
                self.transition_to(system_id_state(quote));
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.doctype_mut().force_quirks = true;
                self.reconsume_in(State::BogusDoctype);
            }
        }
    }

    pub(super) fn step_between_doctype_public_and_system_identifiers(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {}
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            Some(quote @ ('"' | '\'')) => {
                self.doctype_mut().system_id = Some(String::new());
                self.transition_to(system_id_state(quote));
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.doctype_mut().force_quirks = true;
                self.reconsume_in(State::BogusDoctype);
            }
        }
    }

    pub(super) fn step_after_doctype_system_keyword(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {
                self.transition_to(State::BeforeDoctypeSystemIdentifier);
            }
            Some(quote @ ('"' | '\'')) => {
                self.emit_error(ErrorCode::MissingWhitespaceAfterDoctypeSystemKeyword);
                self.doctype_mut().system_id = Some(String::new());
                self.transition_to(system_id_state(quote));
            }
            Some('>') => {
                self.emit_error(ErrorCode::MissingDoctypeSystemIdentifier);
                self.doctype_mut().force_quirks = true;
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.doctype_mut().force_quirks = true;
                self.reconsume_in(State::BogusDoctype);
            }
        }
    }

    pub(super) fn step_before_doctype_system_identifier(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {}
            Some(quote @ ('"' | '\'')) => {
                self.doctype_mut().system_id = Some(String::new());
                self.transition_to(system_id_state(quote));
            }
            Some('>') => {
                self.emit_error(ErrorCode::MissingDoctypeSystemIdentifier);
                self.doctype_mut().force_quirks = true;
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.doctype_mut().force_quirks = true;
                self.reconsume_in(State::BogusDoctype);
            }
        }
    }

    pub(super) fn step_doctype_system_identifier_quoted(&mut self, quote: char) {
        match self.input.try_consume_next() {
            Some(ch) if ch == quote => {
                self.transition_to(State::AfterDoctypeSystemIdentifier);
            }
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.doctype_mut().append_to_system_id('\u{FFFD}');
            }
            Some('>') => {
                self.emit_error(ErrorCode::AbruptDoctypeSystemIdentifier);
                self.doctype_mut().force_quirks = true;
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(ch) => self.doctype_mut().append_to_system_id(ch),
        }
    }

    pub(super) fn step_after_doctype_system_identifier(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {}
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            None => {
                self.emit_error(ErrorCode::EofInDoctype);
                self.doctype_mut().force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {
                // Trailing junk does not force quirks here.
                self.emit_error(ErrorCode::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(State::BogusDoctype);
            }
        }
    }

    pub(super) fn step_bogus_doctype(&mut self) {
        match self.input.try_consume_next() {
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_doctype();
            }
            Some('\0') => self.emit_error(ErrorCode::UnexpectedNullCharacter),
            None => {
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {}
        }
    }
}

fn public_id_state(quote: char) -> State {
    if quote == '"' {
        State::DoctypePublicIdentifierDoubleQuoted
    } else {
        State::DoctypePublicIdentifierSingleQuoted
    }
}

fn system_id_state(quote: char) -> State {
    if quote == '"' {
        State::DoctypeSystemIdentifierDoubleQuoted
    } else {
        State::DoctypeSystemIdentifierSingleQuoted
    }
}
