//! Tag-open, tag-name, and attribute states.

use memchr::memchr3;

use super::{is_html_whitespace, State, Tokenizer};
use crate::error::ErrorCode;

impl Tokenizer<'_> {
    pub(super) fn step_tag_open(&mut self) {
        match self.input.try_consume_next() {
            Some('!') => self.transition_to(State::MarkupDeclarationOpen),
            Some('/') => self.transition_to(State::EndTagOpen),
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.start_start_tag();
                self.reconsume_in(State::TagName);
            }
            Some('?') => {
                self.emit_error(ErrorCode::UnexpectedQuestionMarkInsteadOfTagName);
                self.start_comment("");
                self.reconsume_in(State::BogusComment);
            }
            None => {
                self.emit_error(ErrorCode::EofBeforeTagName);
                self.emit_char('<');
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::InvalidFirstCharacterOfTagName);
                self.emit_char('<');
                self.reconsume_in(State::Data);
            }
        }
    }

    pub(super) fn step_end_tag_open(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.start_end_tag();
                self.reconsume_in(State::TagName);
            }
            Some('>') => {
                self.emit_error(ErrorCode::MissingEndTagName);
                self.transition_to(State::Data);
            }
            None => {
                self.emit_error(ErrorCode::EofBeforeTagName);
                self.emit_char('<');
                self.emit_char('/');
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::InvalidFirstCharacterOfTagName);
                self.start_comment("");
                self.reconsume_in(State::BogusComment);
            }
        }
    }

    pub(super) fn step_tag_name(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {
                self.transition_to(State::BeforeAttributeName);
            }
            Some('/') => self.transition_to(State::SelfClosingStartTag),
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_tag();
            }
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.tag_mut().append_to_name('\u{FFFD}');
            }
            None => {
                self.emit_error(ErrorCode::EofInTag);
                self.emit_eof();
            }
            Some(ch) => {
                self.tag_mut().append_to_name(ch);
                // Drain the rest of the name run without re-entering the
                // dispatcher.
                while let Some(next) = self.input.try_consume_next() {
                    if is_html_whitespace(next) || matches!(next, '/' | '>' | '\0') {
                        self.input.reconsume();
                        break;
                    }
                    self.tag_mut().append_to_name(next);
                }
            }
        }
    }

    pub(super) fn step_before_attribute_name(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {}
            Some('/') | Some('>') => self.reconsume_in(State::AfterAttributeName),
            None => self.reconsume_in(State::AfterAttributeName),
            Some('=') => {
                self.emit_error(ErrorCode::UnexpectedEqualsSignBeforeAttributeName);
                let tag = self.tag_mut();
                tag.start_attribute();
                tag.append_to_attr_name('=');
                self.transition_to(State::AttributeName);
            }
            Some(_) => {
                self.tag_mut().start_attribute();
                self.reconsume_in(State::AttributeName);
            }
        }
    }

    pub(super) fn step_attribute_name(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {
                self.seal_attr_name();
                self.reconsume_in(State::AfterAttributeName);
            }
            Some('/') | Some('>') => {
                self.seal_attr_name();
                self.reconsume_in(State::AfterAttributeName);
            }
            None => {
                self.seal_attr_name();
                self.reconsume_in(State::AfterAttributeName);
            }
            Some('=') => {
                self.seal_attr_name();
                self.transition_to(State::BeforeAttributeValue);
            }
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.tag_mut().append_to_attr_name('\u{FFFD}');
            }
            Some(ch @ ('"' | '\'' | '<')) => {
                self.emit_error(ErrorCode::UnexpectedCharacterInAttributeName);
                self.tag_mut().append_to_attr_name(ch);
            }
            Some(ch) => self.tag_mut().append_to_attr_name(ch),
        }
    }

    /// Duplicate check at the point the attribute name is complete.
    fn seal_attr_name(&mut self) {
        if self.tag_mut().seal_attr_name() {
            self.emit_error(ErrorCode::DuplicateAttribute);
        }
    }

    pub(super) fn step_after_attribute_name(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {}
            Some('/') => {
                self.tag_mut().finish_attribute();
                self.transition_to(State::SelfClosingStartTag);
            }
            Some('=') => self.transition_to(State::BeforeAttributeValue),
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_tag();
            }
            None => {
                self.emit_error(ErrorCode::EofInTag);
                self.emit_eof();
            }
            Some(_) => {
                let tag = self.tag_mut();
                tag.finish_attribute();
                tag.start_attribute();
                self.reconsume_in(State::AttributeName);
            }
        }
    }

    pub(super) fn step_before_attribute_value(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {}
            Some('"') => self.transition_to(State::AttributeValueDoubleQuoted),
            Some('\'') => self.transition_to(State::AttributeValueSingleQuoted),
            Some('>') => {
                self.emit_error(ErrorCode::MissingAttributeValue);
                self.transition_to(State::Data);
                self.emit_current_tag();
            }
            _ => self.reconsume_in(State::AttributeValueUnquoted),
        }
    }

    pub(super) fn step_attribute_value_quoted(&mut self, quote: char) {
        // Fast path: the run up to the closing quote, a reference, or NUL.
        let rest = self.input.rest();
        let len = memchr3(quote as u8, b'&', 0, rest.as_bytes()).unwrap_or(rest.len());
        if len > 0 {
            self.input.skip(len);
            self.tag_mut().push_str_to_attr_value(&rest[..len]);
        }
        match self.input.try_consume_next() {
            Some(ch) if ch == quote => {
                self.tag_mut().finish_attribute();
                self.transition_to(State::AfterAttributeValueQuoted);
            }
            Some('&') => {
                self.return_state = Some(if quote == '"' {
                    State::AttributeValueDoubleQuoted
                } else {
                    State::AttributeValueSingleQuoted
                });
                self.transition_to(State::CharacterReference);
            }
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.tag_mut().append_to_attr_value('\u{FFFD}');
            }
            None => {
                self.emit_error(ErrorCode::EofInTag);
                self.emit_eof();
            }
            Some(ch) => self.tag_mut().append_to_attr_value(ch),
        }
    }

    pub(super) fn step_attribute_value_unquoted(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {
                self.tag_mut().finish_attribute();
                self.transition_to(State::BeforeAttributeName);
            }
            Some('&') => {
                self.return_state = Some(State::AttributeValueUnquoted);
                self.transition_to(State::CharacterReference);
            }
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_tag();
            }
            Some('\0') => {
                self.emit_error(ErrorCode::UnexpectedNullCharacter);
                self.tag_mut().append_to_attr_value('\u{FFFD}');
            }
            Some(ch @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.emit_error(ErrorCode::UnexpectedCharacterInUnquotedAttributeValue);
                self.tag_mut().append_to_attr_value(ch);
            }
            None => {
                self.emit_error(ErrorCode::EofInTag);
                self.emit_eof();
            }
            Some(ch) => self.tag_mut().append_to_attr_value(ch),
        }
    }

    pub(super) fn step_after_attribute_value_quoted(&mut self) {
        match self.input.try_consume_next() {
            Some(ch) if is_html_whitespace(ch) => {
                self.transition_to(State::BeforeAttributeName);
            }
            Some('/') => self.transition_to(State::SelfClosingStartTag),
            Some('>') => {
                self.transition_to(State::Data);
                self.emit_current_tag();
            }
            None => {
                self.emit_error(ErrorCode::EofInTag);
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::MissingWhitespaceBetweenAttributes);
                self.reconsume_in(State::BeforeAttributeName);
            }
        }
    }

    pub(super) fn step_self_closing_start_tag(&mut self) {
        match self.input.try_consume_next() {
            Some('>') => {
                self.tag_mut().self_closing = true;
                self.transition_to(State::Data);
                self.emit_current_tag();
            }
            None => {
                self.emit_error(ErrorCode::EofInTag);
                self.emit_eof();
            }
            Some(_) => {
                self.emit_error(ErrorCode::UnexpectedSolidusInTag);
                self.reconsume_in(State::BeforeAttributeName);
            }
        }
    }
}
