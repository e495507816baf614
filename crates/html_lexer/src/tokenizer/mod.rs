//! Tokenizer context, driver, and public API.
//!
//! The tokenizer is an explicit state machine driven over one borrowed input
//! buffer. A run is single-threaded and synchronous: the driver dispatches on
//! the current state until the end-of-file token has been emitted, and each
//! handler completes in bounded time.
//!
//! Handler convention:
//! - A handler consumes at most one scalar through the input stream (the
//!   keyword-lookahead states consume a fixed slice instead).
//! - Reconsumption is the `reconsume_in` helper, which rewinds the cursor by
//!   one scalar and switches state; handlers do not return a control value.
//! - Emission goes through `emit_token` / `emit_error`; tokens are delivered
//!   to the sink in the order those calls are made.

use crate::builder::{DoctypeBuilder, TagBuilder, TokenBuilder};
use crate::emit::{ErrorSink, TokenSink};
use crate::entity::{MinimalEntities, NamedEntitySet};
use crate::error::ErrorCode;
use crate::input::InputStream;
use crate::token::{Doctype, Tag, Token};

mod charref;
mod data;
mod doctype;
mod markup;
mod states;
mod tag;

pub use states::State;

#[cfg(test)]
mod tests;

/// Configuration for a tokenizer run.
#[derive(Clone, Debug)]
pub struct TokenizerOpts {
    /// Emit the final `Eof` token (the run still terminates when disabled).
    pub emit_eof: bool,
    /// Switch into RCDATA/RAWTEXT/script-data/PLAINTEXT after emitting the
    /// corresponding start tags. Disable when an external tree builder steers
    /// those transitions through [`Tokenizer::set_state`].
    pub raw_text_auto_switch: bool,
}

impl Default for TokenizerOpts {
    fn default() -> Self {
        Self {
            emit_eof: true,
            raw_text_auto_switch: true,
        }
    }
}

/// Minimal tokenizer instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizerStats {
    pub steps: u64,
    pub state_transitions: u64,
    pub tokens_emitted: u64,
    pub parse_errors: u64,
}

/// Script-data insertion-point notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptBoundary {
    Enter,
    Exit,
}

/// Feedback surface from the tree-construction stage.
///
/// `in_foreign_content` is consulted only by the markup-declaration-open
/// handler to decide CDATA handling; `script_data_boundary` fires when script
/// data is entered and when its end tag is emitted. Both default to inert
/// behavior suitable for standalone tokenization.
pub trait InsertionContext {
    fn in_foreign_content(&self) -> bool {
        false
    }

    fn script_data_boundary(&mut self, _boundary: ScriptBoundary) {}
}

/// Standalone HTML context: never foreign, no script feedback.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlContext;

impl InsertionContext for HtmlContext {}

static DEFAULT_ENTITIES: MinimalEntities = MinimalEntities;

/// Guard against a handler failing to consume, emit, or otherwise make
/// progress. No input can legitimately chain this many dispatches without
/// moving the cursor or emitting a token.
const MAX_STEPS_WITHOUT_PROGRESS: u32 = 128;

/// HTML tokenizer bound to one input buffer and one pair of sinks.
pub struct Tokenizer<'r> {
    input: InputStream<'r>,
    sink: &'r mut dyn TokenSink,
    errors: Option<&'r mut dyn ErrorSink>,
    context: Option<&'r mut dyn InsertionContext>,
    entities: &'r dyn NamedEntitySet,
    opts: TokenizerOpts,
    state: State,
    /// Where the character-reference machinery returns to.
    return_state: Option<State>,
    current: Option<TokenBuilder>,
    /// Temporary buffer (raw-text end tags, character references).
    temp: String,
    char_ref_code: u32,
    /// Name of the most recently emitted start tag, for the
    /// appropriate-end-tag check in the raw-text families.
    last_start_tag: Option<String>,
    in_script_data: bool,
    eof_emitted: bool,
    stats: TokenizerStats,
}

impl<'r> Tokenizer<'r> {
    pub fn new(content: &'r str, sink: &'r mut dyn TokenSink, opts: TokenizerOpts) -> Self {
        Self {
            input: InputStream::new(content),
            sink,
            errors: None,
            context: None,
            entities: &DEFAULT_ENTITIES,
            opts,
            state: State::Data,
            return_state: None,
            current: None,
            temp: String::new(),
            char_ref_code: 0,
            last_start_tag: None,
            in_script_data: false,
            eof_emitted: false,
            stats: TokenizerStats::default(),
        }
    }

    pub fn with_error_sink(mut self, errors: &'r mut dyn ErrorSink) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_context(mut self, context: &'r mut dyn InsertionContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_entities(mut self, entities: &'r dyn NamedEntitySet) -> Self {
        self.entities = entities;
        self
    }

    /// Tree-builder integration point; call only between emitted tokens.
    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }

    /// Seed the appropriate-end-tag check, for runs that start inside a
    /// raw-text state.
    pub fn set_last_start_tag(&mut self, name: &str) {
        self.last_start_tag = Some(name.to_ascii_lowercase());
    }

    pub fn stats(&self) -> TokenizerStats {
        self.stats
    }

    /// Drive the state machine until the end-of-file token has been emitted.
    pub fn run(&mut self) {
        assert!(
            !self.eof_emitted,
            "Tokenizer::run called after the end-of-file token was emitted"
        );
        let mut stalled: u32 = 0;
        let mut last_cursor = self.input.position();
        let mut last_emitted = self.stats.tokens_emitted;
        while !self.eof_emitted {
            self.stats.steps = self.stats.steps.saturating_add(1);
            self.step();
            if self.input.position() != last_cursor || self.stats.tokens_emitted != last_emitted {
                stalled = 0;
                last_cursor = self.input.position();
                last_emitted = self.stats.tokens_emitted;
            } else {
                stalled += 1;
                assert!(
                    stalled < MAX_STEPS_WITHOUT_PROGRESS,
                    "driver stalled without progress: state={:?} cursor={}",
                    self.state,
                    self.input.position()
                );
            }
        }
        debug_assert!(
            self.input.at_eof(),
            "end-of-file token emitted before end of content (cursor={})",
            self.input.position()
        );
    }

    fn step(&mut self) {
        match self.state {
            State::Data => self.step_data(),
            State::Rcdata => self.step_rcdata(),
            State::Rawtext => self.step_rawtext(),
            State::ScriptData => self.step_script_data(),
            State::Plaintext => self.step_plaintext(),
            State::TagOpen => self.step_tag_open(),
            State::EndTagOpen => self.step_end_tag_open(),
            State::TagName => self.step_tag_name(),
            State::RcdataLessThanSign => self.step_raw_less_than_sign(State::Rcdata),
            State::RcdataEndTagOpen => self.step_raw_end_tag_open(State::Rcdata),
            State::RcdataEndTagName => self.step_raw_end_tag_name(State::Rcdata),
            State::RawtextLessThanSign => self.step_raw_less_than_sign(State::Rawtext),
            State::RawtextEndTagOpen => self.step_raw_end_tag_open(State::Rawtext),
            State::RawtextEndTagName => self.step_raw_end_tag_name(State::Rawtext),
            State::ScriptDataLessThanSign => self.step_raw_less_than_sign(State::ScriptData),
            State::ScriptDataEndTagOpen => self.step_raw_end_tag_open(State::ScriptData),
            State::ScriptDataEndTagName => self.step_raw_end_tag_name(State::ScriptData),
            State::BeforeAttributeName => self.step_before_attribute_name(),
            State::AttributeName => self.step_attribute_name(),
            State::AfterAttributeName => self.step_after_attribute_name(),
            State::BeforeAttributeValue => self.step_before_attribute_value(),
            State::AttributeValueDoubleQuoted => self.step_attribute_value_quoted('"'),
            State::AttributeValueSingleQuoted => self.step_attribute_value_quoted('\''),
            State::AttributeValueUnquoted => self.step_attribute_value_unquoted(),
            State::AfterAttributeValueQuoted => self.step_after_attribute_value_quoted(),
            State::SelfClosingStartTag => self.step_self_closing_start_tag(),
            State::BogusComment => self.step_bogus_comment(),
            State::MarkupDeclarationOpen => self.step_markup_declaration_open(),
            State::CommentStart => self.step_comment_start(),
            State::CommentStartDash => self.step_comment_start_dash(),
            State::Comment => self.step_comment(),
            State::CommentLessThanSign => self.step_comment_less_than_sign(),
            State::CommentLessThanSignBang => self.step_comment_less_than_sign_bang(),
            State::CommentLessThanSignBangDash => self.step_comment_less_than_sign_bang_dash(),
            State::CommentLessThanSignBangDashDash => {
                self.step_comment_less_than_sign_bang_dash_dash()
            }
            State::CommentEndDash => self.step_comment_end_dash(),
            State::CommentEnd => self.step_comment_end(),
            State::CommentEndBang => self.step_comment_end_bang(),
            State::Doctype => self.step_doctype(),
            State::BeforeDoctypeName => self.step_before_doctype_name(),
            State::DoctypeName => self.step_doctype_name(),
            State::AfterDoctypeName => self.step_after_doctype_name(),
            State::AfterDoctypePublicKeyword => self.step_after_doctype_public_keyword(),
            State::BeforeDoctypePublicIdentifier => self.step_before_doctype_public_identifier(),
            State::DoctypePublicIdentifierDoubleQuoted => {
                self.step_doctype_public_identifier_quoted('"')
            }
            State::DoctypePublicIdentifierSingleQuoted => {
                self.step_doctype_public_identifier_quoted('\'')
            }
            State::AfterDoctypePublicIdentifier => self.step_after_doctype_public_identifier(),
            State::BetweenDoctypePublicAndSystemIdentifiers => {
                self.step_between_doctype_public_and_system_identifiers()
            }
            State::AfterDoctypeSystemKeyword => self.step_after_doctype_system_keyword(),
            State::BeforeDoctypeSystemIdentifier => self.step_before_doctype_system_identifier(),
            State::DoctypeSystemIdentifierDoubleQuoted => {
                self.step_doctype_system_identifier_quoted('"')
            }
            State::DoctypeSystemIdentifierSingleQuoted => {
                self.step_doctype_system_identifier_quoted('\'')
            }
            State::AfterDoctypeSystemIdentifier => self.step_after_doctype_system_identifier(),
            State::BogusDoctype => self.step_bogus_doctype(),
            State::CdataSection => self.step_cdata_section(),
            State::CdataSectionBracket => self.step_cdata_section_bracket(),
            State::CdataSectionEnd => self.step_cdata_section_end(),
            State::CharacterReference => self.step_character_reference(),
            State::NamedCharacterReference => self.step_named_character_reference(),
            State::AmbiguousAmpersand => self.step_ambiguous_ampersand(),
            State::NumericCharacterReference => self.step_numeric_character_reference(),
            State::HexadecimalCharacterReferenceStart => {
                self.step_hexadecimal_character_reference_start()
            }
            State::DecimalCharacterReferenceStart => self.step_decimal_character_reference_start(),
            State::HexadecimalCharacterReference => self.step_hexadecimal_character_reference(),
            State::DecimalCharacterReference => self.step_decimal_character_reference(),
            State::NumericCharacterReferenceEnd => self.step_numeric_character_reference_end(),
        }
    }

    // ---- transitions -----------------------------------------------------

    fn transition_to(&mut self, next: State) {
        if self.state == next {
            return;
        }
        log::trace!(
            target: "lexer.tokenizer",
            "state {:?} -> {:?} @{}",
            self.state,
            next,
            self.input.position()
        );
        self.state = next;
        self.stats.state_transitions = self.stats.state_transitions.saturating_add(1);
    }

    /// Rewind the most recently consumed scalar and re-dispatch it in `next`.
    fn reconsume_in(&mut self, next: State) {
        self.input.reconsume();
        self.transition_to(next);
    }

    // ---- emission --------------------------------------------------------

    fn emit_token(&mut self, token: Token) {
        log::trace!(target: "lexer.tokenizer", "emit token: {token:?}");
        self.stats.tokens_emitted = self.stats.tokens_emitted.saturating_add(1);
        self.sink.process_token(token);
    }

    fn emit_char(&mut self, ch: char) {
        self.emit_token(Token::Character(ch));
    }

    fn emit_chars(&mut self, text: &str) {
        for ch in text.chars() {
            self.emit_char(ch);
        }
    }

    fn emit_eof(&mut self) {
        assert!(!self.eof_emitted, "end-of-file token emitted twice");
        if self.opts.emit_eof {
            self.emit_token(Token::Eof);
        }
        self.eof_emitted = true;
    }

    fn emit_error(&mut self, code: ErrorCode) {
        let position = self.input.last_position();
        log::trace!(target: "lexer.tokenizer", "parse error: {code} @{position}");
        self.stats.parse_errors = self.stats.parse_errors.saturating_add(1);
        if let Some(errors) = self.errors.as_mut() {
            errors.process_error(crate::error::ParseError { code, position });
        }
    }

    // ---- current-token builders ------------------------------------------

    fn start_start_tag(&mut self) {
        self.current = Some(TokenBuilder::Tag(TagBuilder::new(false)));
    }

    fn start_end_tag(&mut self) {
        self.current = Some(TokenBuilder::Tag(TagBuilder::new(true)));
    }

    fn start_comment(&mut self, data: &str) {
        self.current = Some(TokenBuilder::Comment(data.to_string()));
    }

    fn start_doctype(&mut self) {
        self.current = Some(TokenBuilder::Doctype(DoctypeBuilder::default()));
    }

    fn discard_current(&mut self) {
        self.current = None;
    }

    fn tag_mut(&mut self) -> &mut TagBuilder {
        let (state, cursor) = (self.state, self.input.position());
        match self.current.as_mut() {
            Some(TokenBuilder::Tag(tag)) => tag,
            other => panic!(
                "expected a tag builder in state {state:?} at cursor {cursor} (found {})",
                other.map_or("none", |b| b.kind())
            ),
        }
    }

    fn comment_mut(&mut self) -> &mut String {
        let (state, cursor) = (self.state, self.input.position());
        match self.current.as_mut() {
            Some(TokenBuilder::Comment(data)) => data,
            other => panic!(
                "expected a comment builder in state {state:?} at cursor {cursor} (found {})",
                other.map_or("none", |b| b.kind())
            ),
        }
    }

    fn doctype_mut(&mut self) -> &mut DoctypeBuilder {
        let (state, cursor) = (self.state, self.input.position());
        match self.current.as_mut() {
            Some(TokenBuilder::Doctype(doctype)) => doctype,
            other => panic!(
                "expected a doctype builder in state {state:?} at cursor {cursor} (found {})",
                other.map_or("none", |b| b.kind())
            ),
        }
    }

    /// Finalize and emit the current tag builder.
    ///
    /// End tags drop collected attributes and the self-closing flag, each
    /// with its parse error. Start tags arm the appropriate-end-tag check
    /// and, in standalone mode, switch into the raw-text state their element
    /// calls for.
    fn emit_current_tag(&mut self) {
        let (state, cursor) = (self.state, self.input.position());
        let mut tag = match self.current.take() {
            Some(TokenBuilder::Tag(tag)) => tag,
            other => panic!(
                "emit_current_tag in state {state:?} at cursor {cursor} (found {})",
                other.as_ref().map_or("none", |b| b.kind())
            ),
        };
        tag.finish_attribute();
        if tag.is_end {
            if tag.self_closing {
                self.emit_error(ErrorCode::EndTagWithTrailingSolidus);
            }
            if !tag.attrs.is_empty() {
                self.emit_error(ErrorCode::EndTagWithAttributes);
            }
            if self.in_script_data && tag.name == "script" {
                self.in_script_data = false;
                self.notify_script_boundary(ScriptBoundary::Exit);
            }
            self.emit_token(Token::EndTag { name: tag.name });
        } else {
            self.last_start_tag = Some(tag.name.clone());
            let switch = self.opts.raw_text_auto_switch && !tag.self_closing;
            let name = tag.name.clone();
            self.emit_token(Token::StartTag(Tag {
                name: tag.name,
                self_closing: tag.self_closing,
                attrs: tag.attrs,
            }));
            if switch {
                self.auto_switch_raw_text(&name);
            }
        }
    }

    /// Elements the standard tokenizes as RCDATA, RAWTEXT, script data, or
    /// PLAINTEXT. An external tree builder replicates this through
    /// `set_state`; standalone runs get it built in.
    fn auto_switch_raw_text(&mut self, name: &str) {
        match name {
            "title" | "textarea" => self.transition_to(State::Rcdata),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                self.transition_to(State::Rawtext)
            }
            "script" => {
                self.in_script_data = true;
                self.notify_script_boundary(ScriptBoundary::Enter);
                self.transition_to(State::ScriptData);
            }
            "plaintext" => self.transition_to(State::Plaintext),
            _ => {}
        }
    }

    fn emit_current_comment(&mut self) {
        let (state, cursor) = (self.state, self.input.position());
        match self.current.take() {
            Some(TokenBuilder::Comment(data)) => self.emit_token(Token::Comment(data)),
            other => panic!(
                "emit_current_comment in state {state:?} at cursor {cursor} (found {})",
                other.as_ref().map_or("none", |b| b.kind())
            ),
        }
    }

    fn emit_current_doctype(&mut self) {
        let (state, cursor) = (self.state, self.input.position());
        match self.current.take() {
            Some(TokenBuilder::Doctype(doctype)) => self.emit_token(Token::Doctype(Doctype {
                name: doctype.name,
                public_id: doctype.public_id,
                system_id: doctype.system_id,
                force_quirks: doctype.force_quirks,
            })),
            other => panic!(
                "emit_current_doctype in state {state:?} at cursor {cursor} (found {})",
                other.as_ref().map_or("none", |b| b.kind())
            ),
        }
    }

    /// Create and emit a force-quirks DOCTYPE in one step (EOF paths that
    /// never reached a name).
    fn emit_quirks_doctype(&mut self) {
        self.start_doctype();
        self.doctype_mut().force_quirks = true;
        self.emit_current_doctype();
    }

    // ---- raw text / character reference support --------------------------

    fn is_appropriate_end_tag(&self) -> bool {
        match (&self.current, &self.last_start_tag) {
            (Some(TokenBuilder::Tag(tag)), Some(last)) => tag.is_end && tag.name == *last,
            _ => false,
        }
    }

    fn charref_in_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                State::AttributeValueDoubleQuoted
                    | State::AttributeValueSingleQuoted
                    | State::AttributeValueUnquoted
            )
        )
    }

    /// Deliver the temporary buffer: into the pending attribute value when
    /// the reference started inside one, as character tokens otherwise.
    fn flush_code_points_consumed_as_character_reference(&mut self) {
        let temp = std::mem::take(&mut self.temp);
        if self.charref_in_attribute() {
            self.tag_mut().push_str_to_attr_value(&temp);
        } else {
            self.emit_chars(&temp);
        }
        // Hand the allocation back for the next reference.
        self.temp = temp;
        self.temp.clear();
    }

    /// Leave the character-reference machinery for the recorded return state.
    fn return_from_charref(&mut self) {
        let state = self
            .return_state
            .take()
            .expect("character reference with no return state");
        self.transition_to(state);
    }

    /// As `return_from_charref`, but re-dispatching the current scalar.
    fn reconsume_in_return_state(&mut self) {
        let state = self
            .return_state
            .take()
            .expect("character reference with no return state");
        self.reconsume_in(state);
    }

    fn notify_script_boundary(&mut self, boundary: ScriptBoundary) {
        if let Some(context) = self.context.as_mut() {
            context.script_data_boundary(boundary);
        }
    }

    fn in_foreign_content(&self) -> bool {
        self.context
            .as_ref()
            .map_or(false, |context| context.in_foreign_content())
    }
}

/// Tokenizer whitespace: TAB, LF, FF, SPACE. CR is normalized away by the
/// upstream decoder.
pub(crate) fn is_html_whitespace(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\u{000C}' | ' ')
}
