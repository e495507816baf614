//! Character-data states: Data, the raw-text families, and PLAINTEXT.
//!
//! Each handler scans the plain run up to the next delimiter byte in one
//! pass, emits it as per-scalar character tokens, then dispatches on the
//! delimiter. All delimiters are ASCII, so the byte scan lands on scalar
//! boundaries.

use memchr::{memchr, memchr2, memchr3};

use super::{is_html_whitespace, State, Tokenizer};
use crate::error::ErrorCode;

impl Tokenizer<'_> {
    /// Emit everything before the next byte in `specials` and leave the
    /// cursor on that byte (or at end of content).
    fn emit_run_until(&mut self, special_at: Option<usize>) {
        let rest = self.input.rest();
        let len = special_at.unwrap_or(rest.len());
        if len > 0 {
            self.input.skip(len);
            self.emit_chars(&rest[..len]);
        }
    }

    pub(super) fn step_data(&mut self) {
        let special = memchr3(b'&', b'<', 0, self.input.rest().as_bytes());
        self.emit_run_until(special);
        match self.input.try_consume_next() {
            Some('&') => {
                self.return_state = Some(State::Data);
                self.transition_to(State::CharacterReference);
            }
            Some('<') => self.transition_to(State::TagOpen),
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.emit_char('\0');
            }
            Some(ch) => self.emit_char(ch),
            None => self.emit_eof(),
        }
    }

    pub(super) fn step_rcdata(&mut self) {
        let special = memchr3(b'&', b'<', 0, self.input.rest().as_bytes());
        self.emit_run_until(special);
        match self.input.try_consume_next() {
            Some('&') => {
                self.return_state = Some(State::Rcdata);
                self.transition_to(State::CharacterReference);
            }
            Some('<') => self.transition_to(State::RcdataLessThanSign),
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.emit_char('\u{FFFD}');
            }
            Some(ch) => self.emit_char(ch),
            None => self.emit_eof(),
        }
    }

    pub(super) fn step_rawtext(&mut self) {
        self.raw_text_common(State::RawtextLessThanSign);
    }

    pub(super) fn step_script_data(&mut self) {
        self.raw_text_common(State::ScriptDataLessThanSign);
    }

    fn raw_text_common(&mut self, less_than_sign: State) {
        let special = memchr2(b'<', 0, self.input.rest().as_bytes());
        self.emit_run_until(special);
        match self.input.try_consume_next() {
            Some('<') => self.transition_to(less_than_sign),
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.emit_char('\u{FFFD}');
            }
            Some(ch) => self.emit_char(ch),
            None => self.emit_eof(),
        }
    }

    pub(super) fn step_plaintext(&mut self) {
        let special = memchr(0, self.input.rest().as_bytes());
        self.emit_run_until(special);
        match self.input.try_consume_next() {
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.emit_char('\u{FFFD}');
            }
            Some(ch) => self.emit_char(ch),
            None => self.emit_eof(),
        }
    }

    // ---- raw-text end-tag recognition ------------------------------------
    //
    // Shared across RCDATA, RAWTEXT, and script data; the only difference is
    // which content state the fallback path returns to.

    pub(super) fn step_raw_less_than_sign(&mut self, raw_state: State) {
        match self.input.try_consume_next() {
            Some('/') => {
                self.temp.clear();
                self.transition_to(raw_end_tag_open_state(raw_state));
            }
            _ => {
                self.emit_char('<');
                self.reconsume_in(raw_state);
            }
        }
    }

    pub(super) fn step_raw_end_tag_open(&mut self, raw_state: State) {
        match self.input.try_consume_next() {
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.start_end_tag();
                self.reconsume_in(raw_end_tag_name_state(raw_state));
            }
            _ => {
                self.emit_char('<');
                self.emit_char('/');
                self.reconsume_in(raw_state);
            }
        }
    }

    pub(super) fn step_raw_end_tag_name(&mut self, raw_state: State) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) && self.is_appropriate_end_tag() => {
                self.transition_to(State::BeforeAttributeName);
            }
            Some('/') if self.is_appropriate_end_tag() => {
                self.transition_to(State::SelfClosingStartTag);
            }
            Some('>') if self.is_appropriate_end_tag() => {
                self.transition_to(State::Data);
                self.emit_current_tag();
            }
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.tag_mut().append_to_name(ch);
                self.temp.push(ch);
            }
            // Not an end tag for the open element after all: the pending end
            // tag token is abandoned and the text is surfaced verbatim.
            _ => {
                self.discard_current();
                self.emit_char('<');
                self.emit_char('/');
                let temp = std::mem::take(&mut self.temp);
                self.emit_chars(&temp);
                self.reconsume_in(raw_state);
            }
        }
    }
}

fn raw_end_tag_open_state(raw_state: State) -> State {
    match raw_state {
        State::Rcdata => State::RcdataEndTagOpen,
        State::Rawtext => State::RawtextEndTagOpen,
        State::ScriptData => State::ScriptDataEndTagOpen,
        other => unreachable!("no end-tag-open state for {other:?}"),
    }
}

fn raw_end_tag_name_state(raw_state: State) -> State {
    match raw_state {
        State::Rcdata => State::RcdataEndTagName,
        State::Rawtext => State::RawtextEndTagName,
        State::ScriptData => State::ScriptDataEndTagName,
        other => unreachable!("no end-tag-name state for {other:?}"),
    }
}
