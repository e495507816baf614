//! Markup declarations, comments, and CDATA sections.

use memchr::{memchr, memchr3};

use super::{State, Tokenizer};
use crate::error::ErrorCode;

impl Tokenizer<'_> {
    /// Pure lookahead; the single-character dispatch convention does not
    /// apply here. The opening `<!` has already been consumed.
    pub(super) fn step_markup_declaration_open(&mut self) {
        if self.input.lookahead_eq(b"--") {
            self.input.skip(2);
            self.start_comment("");
            self.transition_to(State::CommentStart);
            return;
        }
        if self.input.lookahead_eq_ignore_ascii_case(b"DOCTYPE") {
            self.input.skip(7);
            self.transition_to(State::Doctype);
            return;
        }
        if self.input.lookahead_eq(b"[CDATA[") {
            self.input.skip(7);
            if self.in_foreign_content() {
                self.transition_to(State::CdataSection);
            } else {
                self.emit_error(ErrorCode::CdataInHtmlContent);
                self.start_comment("[CDATA[");
                self.transition_to(State::BogusComment);
            }
            return;
        }
        self.emit_error(ErrorCode::IncorrectlyOpenedComment);
        self.start_comment("");
        self.transition_to(State::BogusComment);
    }

    pub(super) fn step_bogus_comment(&mut self) {
        match self.input.try_consume_next() {
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_comment();
            }
            None => {
                self.emit_current_comment();
                self.emit_eof();
            }
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.comment_mut().push('\u{FFFD}');
            }
            Some(ch) => self.comment_mut().push(ch),
        }
    }

    pub(super) fn step_comment_start(&mut self) {
        match self.input.try_consume_next() {
            Some('-') => self.transition_to(State::CommentStartDash),
            Some('>') => {
                self.emit_error(ErrorCode::AbruptClosingOfEmptyComment);
                self.transition_to(State::Data);
                self.emit_current_comment();
            }
            _ => self.reconsume_in(State::Comment),
        }
    }

    pub(super) fn step_comment_start_dash(&mut self) {
        match self.input.try_consume_next() {
            Some('-') => self.transition_to(State::CommentEnd),
            Some('>') => {
                self.emit_error(ErrorCode::AbruptClosingOfEmptyComment);
                self.transition_to(State::Data);
                self.emit_current_comment();
            }
            None => {
                self.emit_error(ErrorCode::EofInComment);
                self.emit_current_comment();
                self.emit_eof();
            }
            Some(_) => {
                self.comment_mut().push('-');
                self.reconsume_in(State::Comment);
            }
        }
    }

    pub(super) fn step_comment(&mut self) {
        // Fast path: plain comment bytes up to '<', '-', or NUL.
        let rest = self.input.rest();
        let len = memchr3(b'<', b'-', 0, rest.as_bytes()).unwrap_or(rest.len());
        if len > 0 {
            self.input.skip(len);
            self.comment_mut().push_str(&rest[..len]);
        }
        match self.input.try_consume_next() {
            Some('<') => {
                self.comment_mut().push('<');
                self.transition_to(State::CommentLessThanSign);
            }
            Some('-') => self.transition_to(State::CommentEndDash),
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.comment_mut().push('\u{FFFD}');
            }
            None => {
                self.emit_error(ErrorCode::EofInComment);
                self.emit_current_comment();
                self.emit_eof();
            }
            Some(ch) => self.comment_mut().push(ch),
        }
    }

    pub(super) fn step_comment_less_than_sign(&mut self) {
        match self.input.try_consume_next() {
            Some('!') => {
                self.comment_mut().push('!');
                self.transition_to(State::CommentLessThanSignBang);
            }
            Some('<') => self.comment_mut().push('<'),
            _ => self.reconsume_in(State::Comment),
        }
    }

    pub(super) fn step_comment_less_than_sign_bang(&mut self) {
        match self.input.try_consume_next() {
            Some('-') => self.transition_to(State::CommentLessThanSignBangDash),
            _ => self.reconsume_in(State::Comment),
        }
    }

    pub(super) fn step_comment_less_than_sign_bang_dash(&mut self) {
        match self.input.try_consume_next() {
            Some('-') => self.transition_to(State::CommentLessThanSignBangDashDash),
            _ => self.reconsume_in(State::CommentEndDash),
        }
    }

    pub(super) fn step_comment_less_than_sign_bang_dash_dash(&mut self) {
        match self.input.try_consume_next() {
            Some('>') | None => self.reconsume_in(State::CommentEnd),
            Some(_) => {
                self.emit_error(ErrorCode::NestedComment);
                self.reconsume_in(State::CommentEnd);
            }
        }
    }

    pub(super) fn step_comment_end_dash(&mut self) {
        match self.input.try_consume_next() {
            Some('-') => self.transition_to(State::CommentEnd),
            None => {
                self.emit_error(ErrorCode::EofInComment);
                self.emit_current_comment();
                self.emit_eof();
            }
            Some(_) => {
                self.comment_mut().push('-');
                self.reconsume_in(State::Comment);
            }
        }
    }

    pub(super) fn step_comment_end(&mut self) {
        match self.input.try_consume_next() {
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_comment();
            }
            Some('!') => self.transition_to(State::CommentEndBang),
            Some('-') => self.comment_mut().push('-'),
            None => {
                self.emit_error(ErrorCode::EofInComment);
                self.emit_current_comment();
                self.emit_eof();
            }
            Some(_) => {
                self.comment_mut().push_str("--");
                self.reconsume_in(State::Comment);
            }
        }
    }

    pub(super) fn step_comment_end_bang(&mut self) {
        match self.input.try_consume_next() {
            Some('-') => {
                self.comment_mut().push_str("--!");
                self.transition_to(State::CommentEndDash);
            }
            Some('>') => {
                self.emit_error(ErrorCode::IncorrectlyClosedComment);
                self.transition_to(State::Data);
                self.emit_current_comment();
            }
            None => {
                self.emit_error(ErrorCode::EofInComment);
                self.emit_current_comment();
                self.emit_eof();
            }
            Some(_) => {
                self.comment_mut().push_str("--!");
                self.reconsume_in(State::Comment);
            }
        }
    }

    // ---- CDATA -----------------------------------------------------------
    //
    // Reached only in foreign content. NULs pass through unchanged here.

    pub(super) fn step_cdata_section(&mut self) {
        let rest = self.input.rest();
        let len = memchr(b']', rest.as_bytes()).unwrap_or(rest.len());
        if len > 0 {
            self.input.skip(len);
            self.emit_chars(&rest[..len]);
        }
        match self.input.try_consume_next() {
            Some(']') => self.transition_to(State::CdataSectionBracket),
            None => {
                self.emit_error(ErrorCode::EofInCdata);
                self.emit_eof();
            }
            Some(ch) => self.emit_char(ch),
        }
    }

    pub(super) fn step_cdata_section_bracket(&mut self) {
        match self.input.try_consume_next() {
            Some(']') => self.transition_to(State::CdataSectionEnd),
            _ => {
                self.emit_char(']');
                self.reconsume_in(State::CdataSection);
            }
        }
    }

    pub(super) fn step_cdata_section_end(&mut self) {
        match self.input.try_consume_next() {
            Some(']') => self.emit_char(']'),
            Some('>') => self.transition_to(State::Data),
            _ => {
                self.emit_char(']');
                self.emit_char(']');
                self.reconsume_in(State::CdataSection);
            }
        }
    }
}
