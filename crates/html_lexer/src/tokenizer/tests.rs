use super::{InsertionContext, ScriptBoundary, State, Tokenizer, TokenizerOpts};
use crate::emit::{ErrorCollector, TokenCollector};
use crate::error::ErrorCode;
use crate::token::{Attribute, Doctype, Tag, Token};
use crate::tokenize;

fn tokens_of(input: &str) -> Vec<Token> {
    let (tokens, _) = tokenize(input);
    tokens
}

fn error_codes_of(input: &str) -> Vec<ErrorCode> {
    let (_, errors) = tokenize(input);
    errors.into_iter().map(|error| error.code).collect()
}

fn start_tag(name: &str) -> Token {
    Token::StartTag(Tag {
        name: name.to_string(),
        self_closing: false,
        attrs: Vec::new(),
    })
}

fn end_tag(name: &str) -> Token {
    Token::EndTag {
        name: name.to_string(),
    }
}

fn chars(text: &str) -> Vec<Token> {
    text.chars().map(Token::Character).collect()
}

fn attr(name: &str, value: &str) -> Attribute {
    Attribute {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn empty_input_yields_exactly_eof() {
    assert_eq!(tokens_of(""), vec![Token::Eof]);
    assert!(error_codes_of("").is_empty());
}

#[test]
fn single_character_input_is_consumed() {
    assert_eq!(tokens_of("a"), vec![Token::Character('a'), Token::Eof]);
}

#[test]
fn text_run_produces_one_token_per_scalar() {
    assert_eq!(
        tokens_of("ab é"),
        vec![
            Token::Character('a'),
            Token::Character('b'),
            Token::Character(' '),
            Token::Character('é'),
            Token::Eof
        ]
    );
}

#[test]
fn null_in_data_passes_through_with_error() {
    assert_eq!(tokens_of("\0"), vec![Token::Character('\0'), Token::Eof]);
    assert_eq!(
        error_codes_of("\0"),
        vec![ErrorCode::UnexpectedNullCharacter]
    );
}

#[test]
fn lone_less_than_at_eof() {
    assert_eq!(tokens_of("<"), vec![Token::Character('<'), Token::Eof]);
    assert_eq!(error_codes_of("<"), vec![ErrorCode::EofBeforeTagName]);
}

#[test]
fn lone_end_tag_opener_at_eof() {
    let mut expected = chars("</");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("</"), expected);
    assert_eq!(error_codes_of("</"), vec![ErrorCode::EofBeforeTagName]);
}

#[test]
fn simple_start_tag() {
    assert_eq!(tokens_of("<html>"), vec![start_tag("html"), Token::Eof]);
}

#[test]
fn start_tag_name_is_lowercased() {
    assert_eq!(tokens_of("<P>"), vec![start_tag("p"), Token::Eof]);
    assert_eq!(tokens_of("<DIV>"), tokens_of("<div>"));
}

#[test]
fn end_tag_name_is_lowercased() {
    assert_eq!(tokens_of("</Html>"), vec![end_tag("html"), Token::Eof]);
}

#[test]
fn consecutive_tags() {
    assert_eq!(
        tokens_of("<a><b>"),
        vec![start_tag("a"), start_tag("b"), Token::Eof]
    );
}

#[test]
fn null_in_tag_name_becomes_replacement_character() {
    assert_eq!(
        tokens_of("<p\0>"),
        vec![start_tag("p\u{FFFD}"), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<p\0>"),
        vec![ErrorCode::UnexpectedNullCharacter]
    );
}

#[test]
fn invalid_tag_opener_surfaces_the_less_than_sign() {
    let mut expected = chars("<4>");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("<4>"), expected);
    assert_eq!(
        error_codes_of("<4>"),
        vec![ErrorCode::InvalidFirstCharacterOfTagName]
    );
}

#[test]
fn empty_end_tag_is_dropped() {
    assert_eq!(tokens_of("</>"), vec![Token::Eof]);
    assert_eq!(error_codes_of("</>"), vec![ErrorCode::MissingEndTagName]);
}

#[test]
fn eof_inside_tag() {
    assert_eq!(tokens_of("<div"), vec![Token::Eof]);
    assert_eq!(error_codes_of("<div"), vec![ErrorCode::EofInTag]);
}

// ---- attributes ----------------------------------------------------------

#[test]
fn attributes_quoted_unquoted_and_empty() {
    let tokens = tokens_of("<a href=\"x\" id=y z>");
    assert_eq!(
        tokens,
        vec![
            Token::StartTag(Tag {
                name: "a".to_string(),
                self_closing: false,
                attrs: vec![attr("href", "x"), attr("id", "y"), attr("z", "")],
            }),
            Token::Eof
        ]
    );
}

#[test]
fn single_quoted_attribute_value() {
    let tokens = tokens_of("<a title='it''s'>");
    // The second quote pair starts a new (empty-name-less) parse: the
    // trailing `s'` is a fresh attribute named `s'`.
    match &tokens[0] {
        Token::StartTag(tag) => {
            assert_eq!(tag.attrs[0], attr("title", "it"));
        }
        other => panic!("expected start tag, got {other:?}"),
    }
}

#[test]
fn attribute_names_are_lowercased() {
    let tokens = tokens_of("<a HREF=x>");
    match &tokens[0] {
        Token::StartTag(tag) => assert_eq!(tag.attrs, vec![attr("href", "x")]),
        other => panic!("expected start tag, got {other:?}"),
    }
}

#[test]
fn duplicate_attribute_is_dropped_first_wins() {
    let tokens = tokens_of("<a id=1 ID=2>");
    match &tokens[0] {
        Token::StartTag(tag) => assert_eq!(tag.attrs, vec![attr("id", "1")]),
        other => panic!("expected start tag, got {other:?}"),
    }
    assert_eq!(
        error_codes_of("<a id=1 ID=2>"),
        vec![ErrorCode::DuplicateAttribute]
    );
}

#[test]
fn duplicate_attribute_value_is_still_parsed() {
    // The dropped duplicate's value must not leak into the surviving one.
    let tokens = tokens_of("<a id=\"1\" id=\"2\" x=\"3\">");
    match &tokens[0] {
        Token::StartTag(tag) => {
            assert_eq!(tag.attrs, vec![attr("id", "1"), attr("x", "3")]);
        }
        other => panic!("expected start tag, got {other:?}"),
    }
}

#[test]
fn missing_attribute_value() {
    let tokens = tokens_of("<a href=>");
    match &tokens[0] {
        Token::StartTag(tag) => assert_eq!(tag.attrs, vec![attr("href", "")]),
        other => panic!("expected start tag, got {other:?}"),
    }
    assert_eq!(
        error_codes_of("<a href=>"),
        vec![ErrorCode::MissingAttributeValue]
    );
}

#[test]
fn equals_sign_starts_an_attribute_name_with_error() {
    let tokens = tokens_of("<a =x>");
    match &tokens[0] {
        Token::StartTag(tag) => assert_eq!(tag.attrs, vec![attr("=x", "")]),
        other => panic!("expected start tag, got {other:?}"),
    }
    assert_eq!(
        error_codes_of("<a =x>"),
        vec![ErrorCode::UnexpectedEqualsSignBeforeAttributeName]
    );
}

#[test]
fn missing_whitespace_between_attributes() {
    let tokens = tokens_of("<a b=\"1\"c=\"2\">");
    match &tokens[0] {
        Token::StartTag(tag) => {
            assert_eq!(tag.attrs, vec![attr("b", "1"), attr("c", "2")]);
        }
        other => panic!("expected start tag, got {other:?}"),
    }
    assert_eq!(
        error_codes_of("<a b=\"1\"c=\"2\">"),
        vec![ErrorCode::MissingWhitespaceBetweenAttributes]
    );
}

#[test]
fn self_closing_start_tag() {
    assert_eq!(
        tokens_of("<br/>"),
        vec![
            Token::StartTag(Tag {
                name: "br".to_string(),
                self_closing: true,
                attrs: Vec::new(),
            }),
            Token::Eof
        ]
    );
}

#[test]
fn solidus_not_followed_by_gt_is_an_error() {
    let tokens = tokens_of("<a / href=x>");
    match &tokens[0] {
        Token::StartTag(tag) => {
            assert!(!tag.self_closing);
            assert_eq!(tag.attrs, vec![attr("href", "x")]);
        }
        other => panic!("expected start tag, got {other:?}"),
    }
    assert_eq!(
        error_codes_of("<a / href=x>"),
        vec![ErrorCode::UnexpectedSolidusInTag]
    );
}

#[test]
fn end_tag_drops_attributes_and_solidus_with_errors() {
    assert_eq!(tokens_of("</div id=x>"), vec![end_tag("div"), Token::Eof]);
    assert_eq!(
        error_codes_of("</div id=x>"),
        vec![ErrorCode::EndTagWithAttributes]
    );
    assert_eq!(tokens_of("</br/>"), vec![end_tag("br"), Token::Eof]);
    assert_eq!(
        error_codes_of("</br/>"),
        vec![ErrorCode::EndTagWithTrailingSolidus]
    );
}

// ---- comments ------------------------------------------------------------

#[test]
fn simple_comment() {
    assert_eq!(
        tokens_of("<!--hi-->"),
        vec![Token::Comment("hi".to_string()), Token::Eof]
    );
    assert!(error_codes_of("<!--hi-->").is_empty());
}

#[test]
fn abruptly_closed_empty_comments() {
    assert_eq!(
        tokens_of("<!-->"),
        vec![Token::Comment(String::new()), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<!-->"),
        vec![ErrorCode::AbruptClosingOfEmptyComment]
    );
    assert_eq!(
        tokens_of("<!--->"),
        vec![Token::Comment(String::new()), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<!--->"),
        vec![ErrorCode::AbruptClosingOfEmptyComment]
    );
}

#[test]
fn comment_with_dashes_inside() {
    assert_eq!(
        tokens_of("<!--a-b--c-->"),
        vec![Token::Comment("a-b--c".to_string()), Token::Eof]
    );
}

#[test]
fn nested_comment_opener_is_an_error() {
    assert_eq!(
        tokens_of("<!-- <!-- -->"),
        vec![Token::Comment(" <!-- ".to_string()), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<!-- <!-- -->"),
        vec![ErrorCode::NestedComment]
    );
}

#[test]
fn incorrectly_closed_comment() {
    assert_eq!(
        tokens_of("<!--a--!>"),
        vec![Token::Comment("a".to_string()), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<!--a--!>"),
        vec![ErrorCode::IncorrectlyClosedComment]
    );
}

#[test]
fn eof_in_comment_still_emits_the_comment() {
    assert_eq!(
        tokens_of("<!-- unclosed"),
        vec![Token::Comment(" unclosed".to_string()), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<!-- unclosed"),
        vec![ErrorCode::EofInComment]
    );
}

#[test]
fn question_mark_opens_a_bogus_comment() {
    assert_eq!(
        tokens_of("<?php?>"),
        vec![Token::Comment("?php?".to_string()), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<?php?>"),
        vec![ErrorCode::UnexpectedQuestionMarkInsteadOfTagName]
    );
}

#[test]
fn unknown_markup_declaration_is_a_bogus_comment() {
    assert_eq!(
        tokens_of("<!x>"),
        vec![Token::Comment("x".to_string()), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<!x>"),
        vec![ErrorCode::IncorrectlyOpenedComment]
    );
}

// ---- DOCTYPE -------------------------------------------------------------

fn doctype(name: &str, quirks: bool) -> Token {
    Token::Doctype(Doctype {
        name: name.to_string(),
        public_id: None,
        system_id: None,
        force_quirks: quirks,
    })
}

#[test]
fn simple_doctype() {
    assert_eq!(
        tokens_of("<!DOCTYPE html>"),
        vec![doctype("html", false), Token::Eof]
    );
    assert!(error_codes_of("<!DOCTYPE html>").is_empty());
}

#[test]
fn doctype_keyword_is_case_insensitive_and_name_lowercased() {
    assert_eq!(tokens_of("<!doctype HTML>"), tokens_of("<!DOCTYPE html>"));
}

#[test]
fn doctype_tolerates_surrounding_whitespace() {
    assert_eq!(
        tokens_of("<!doctype\tHTML >"),
        vec![doctype("html", false), Token::Eof]
    );
}

#[test]
fn doctype_without_name() {
    assert_eq!(
        tokens_of("<!DOCTYPE>"),
        vec![doctype("", true), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<!DOCTYPE>"),
        vec![ErrorCode::MissingDoctypeName]
    );
}

#[test]
fn doctype_truncated_at_eof_forces_quirks() {
    assert_eq!(
        tokens_of("<!DOCTYPE"),
        vec![doctype("", true), Token::Eof]
    );
    assert_eq!(error_codes_of("<!DOCTYPE"), vec![ErrorCode::EofInDoctype]);
}

#[test]
fn doctype_missing_whitespace_before_name() {
    assert_eq!(
        tokens_of("<!DOCTYPEhtml>"),
        vec![doctype("html", false), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<!DOCTYPEhtml>"),
        vec![ErrorCode::MissingWhitespaceBeforeDoctypeName]
    );
}

#[test]
fn doctype_with_public_and_system_identifiers() {
    let input = "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \
                 \"http://www.w3.org/TR/html4/strict.dtd\">";
    assert_eq!(
        tokens_of(input),
        vec![
            Token::Doctype(Doctype {
                name: "html".to_string(),
                public_id: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
                system_id: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
                force_quirks: false,
            }),
            Token::Eof
        ]
    );
    assert!(error_codes_of(input).is_empty());
}

#[test]
fn doctype_with_system_identifier_only() {
    assert_eq!(
        tokens_of("<!DOCTYPE html SYSTEM 'about:legacy-compat'>"),
        vec![
            Token::Doctype(Doctype {
                name: "html".to_string(),
                public_id: None,
                system_id: Some("about:legacy-compat".to_string()),
                force_quirks: false,
            }),
            Token::Eof
        ]
    );
}

#[test]
fn doctype_public_keyword_without_identifier() {
    assert_eq!(
        tokens_of("<!DOCTYPE html PUBLIC>"),
        vec![
            Token::Doctype(Doctype {
                name: "html".to_string(),
                public_id: None,
                system_id: None,
                force_quirks: true,
            }),
            Token::Eof
        ]
    );
    assert_eq!(
        error_codes_of("<!DOCTYPE html PUBLIC>"),
        vec![ErrorCode::MissingDoctypePublicIdentifier]
    );
}

#[test]
fn doctype_with_junk_after_name_goes_bogus() {
    assert_eq!(
        tokens_of("<!DOCTYPE html foo>"),
        vec![doctype("html", true), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<!DOCTYPE html foo>"),
        vec![ErrorCode::InvalidCharacterSequenceAfterDoctypeName]
    );
}

#[test]
fn doctype_junk_after_system_identifier_does_not_force_quirks() {
    let input = "<!DOCTYPE html SYSTEM \"s\" junk>";
    match &tokens_of(input)[0] {
        Token::Doctype(d) => {
            assert_eq!(d.system_id.as_deref(), Some("s"));
            assert!(!d.force_quirks);
        }
        other => panic!("expected doctype, got {other:?}"),
    }
    assert_eq!(
        error_codes_of(input),
        vec![ErrorCode::UnexpectedCharacterAfterDoctypeSystemIdentifier]
    );
}

// ---- character references ------------------------------------------------

#[test]
fn named_reference_in_text() {
    let mut expected = chars("a&b");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("a&amp;b"), expected);
    assert!(error_codes_of("a&amp;b").is_empty());
}

#[test]
fn legacy_reference_without_semicolon_in_text() {
    let mut expected = chars("a& b");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("a&amp b"), expected);
    assert_eq!(
        error_codes_of("a&amp b"),
        vec![ErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn unknown_named_reference_with_semicolon() {
    let mut expected = chars("&bogus;");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("&bogus;"), expected);
    assert_eq!(
        error_codes_of("&bogus;"),
        vec![ErrorCode::UnknownNamedCharacterReference]
    );
}

#[test]
fn bare_ampersand_is_literal() {
    let mut expected = chars("a& b");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("a& b"), expected);
    assert!(error_codes_of("a& b").is_empty());
}

#[test]
fn numeric_references() {
    let mut expected = chars("A\u{2764}");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("&#65;&#x2764;"), expected);
    assert!(error_codes_of("&#65;&#x2764;").is_empty());
}

#[test]
fn numeric_reference_without_semicolon() {
    let mut expected = chars("0");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("&#48"), expected);
    assert_eq!(
        error_codes_of("&#48"),
        vec![ErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn numeric_reference_endgame_replacements() {
    assert_eq!(
        tokens_of("&#0;"),
        vec![Token::Character('\u{FFFD}'), Token::Eof]
    );
    assert_eq!(
        error_codes_of("&#0;"),
        vec![ErrorCode::NullCharacterReference]
    );

    assert_eq!(
        tokens_of("&#xD83D;"),
        vec![Token::Character('\u{FFFD}'), Token::Eof]
    );
    assert_eq!(
        error_codes_of("&#xD83D;"),
        vec![ErrorCode::SurrogateCharacterReference]
    );

    assert_eq!(
        tokens_of("&#x110000;"),
        vec![Token::Character('\u{FFFD}'), Token::Eof]
    );
    assert_eq!(
        error_codes_of("&#x110000;"),
        vec![ErrorCode::CharacterReferenceOutsideUnicodeRange]
    );

    // C1 controls remap through the windows-1252 table.
    assert_eq!(
        tokens_of("&#x80;"),
        vec![Token::Character('\u{20AC}'), Token::Eof]
    );
    assert_eq!(
        error_codes_of("&#x80;"),
        vec![ErrorCode::ControlCharacterReference]
    );
}

#[test]
fn numeric_reference_without_digits() {
    let mut expected = chars("&#;");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("&#;"), expected);
    assert_eq!(
        error_codes_of("&#;"),
        vec![ErrorCode::AbsenceOfDigitsInNumericCharacterReference]
    );

    let mut expected = chars("&#x;");
    expected.push(Token::Eof);
    assert_eq!(tokens_of("&#x;"), expected);
}

#[test]
fn reference_expands_inside_attribute_value() {
    let tokens = tokens_of("<a href=\"?x=1&amp;y=2\">");
    match &tokens[0] {
        Token::StartTag(tag) => {
            assert_eq!(tag.attrs, vec![attr("href", "?x=1&y=2")]);
        }
        other => panic!("expected start tag, got {other:?}"),
    }
}

#[test]
fn legacy_reference_in_attribute_followed_by_alnum_stays_literal() {
    let tokens = tokens_of("<a href=\"x&ampy\">");
    match &tokens[0] {
        Token::StartTag(tag) => {
            assert_eq!(tag.attrs, vec![attr("href", "x&ampy")]);
        }
        other => panic!("expected start tag, got {other:?}"),
    }
    assert!(error_codes_of("<a href=\"x&ampy\">").is_empty());
}

// ---- raw text, RCDATA, script data, PLAINTEXT ----------------------------

#[test]
fn script_content_is_not_tokenized_as_markup() {
    let mut expected = vec![start_tag("script")];
    expected.extend(chars("if (a<b) {}"));
    expected.push(end_tag("script"));
    expected.push(Token::Eof);
    assert_eq!(tokens_of("<script>if (a<b) {}</script>"), expected);
}

#[test]
fn script_end_tag_is_case_insensitive() {
    let mut expected = vec![start_tag("script")];
    expected.extend(chars("x"));
    expected.push(end_tag("script"));
    expected.push(Token::Eof);
    assert_eq!(tokens_of("<script>x</SCRIPT>"), expected);
}

#[test]
fn partial_script_end_tag_is_text() {
    let mut expected = vec![start_tag("script")];
    expected.extend(chars("x</scr"));
    expected.push(end_tag("script"));
    expected.push(Token::Eof);
    assert_eq!(tokens_of("<script>x</scr</script>"), expected);
}

#[test]
fn rcdata_expands_references_but_not_tags() {
    let mut expected = vec![start_tag("title")];
    expected.extend(chars("a<b&c"));
    expected.push(end_tag("title"));
    expected.push(Token::Eof);
    assert_eq!(tokens_of("<title>a<b&amp;c</title>"), expected);
}

#[test]
fn rawtext_style_ignores_references() {
    let mut expected = vec![start_tag("style")];
    expected.extend(chars("a&amp;b"));
    expected.push(end_tag("style"));
    expected.push(Token::Eof);
    assert_eq!(tokens_of("<style>a&amp;b</style>"), expected);
}

#[test]
fn self_closing_raw_text_element_does_not_switch() {
    let mut expected = vec![Token::StartTag(Tag {
        name: "title".to_string(),
        self_closing: true,
        attrs: Vec::new(),
    })];
    expected.push(start_tag("b"));
    expected.push(Token::Eof);
    assert_eq!(tokens_of("<title/><b>"), expected);
}

#[test]
fn plaintext_consumes_everything() {
    let mut expected = vec![start_tag("plaintext")];
    expected.extend(chars("</plaintext><b>"));
    expected.push(Token::Eof);
    assert_eq!(tokens_of("<plaintext></plaintext><b>"), expected);
}

#[test]
fn raw_text_eof_without_end_tag() {
    let mut expected = vec![start_tag("style")];
    expected.extend(chars("a"));
    expected.push(Token::Eof);
    assert_eq!(tokens_of("<style>a"), expected);
    assert!(error_codes_of("<style>a").is_empty());
}

#[test]
fn external_driver_can_enter_rcdata_directly() {
    let mut tokens = TokenCollector::default();
    let opts = TokenizerOpts {
        raw_text_auto_switch: false,
        ..TokenizerOpts::default()
    };
    let mut tokenizer = Tokenizer::new("a</textarea>", &mut tokens, opts);
    tokenizer.set_state(State::Rcdata);
    tokenizer.set_last_start_tag("TEXTAREA");
    tokenizer.run();
    assert_eq!(
        tokens.tokens,
        vec![Token::Character('a'), end_tag("textarea"), Token::Eof]
    );
}

// ---- CDATA and the insertion context -------------------------------------

#[derive(Default)]
struct RecordingContext {
    foreign: bool,
    boundaries: Vec<ScriptBoundary>,
}

impl InsertionContext for RecordingContext {
    fn in_foreign_content(&self) -> bool {
        self.foreign
    }

    fn script_data_boundary(&mut self, boundary: ScriptBoundary) {
        self.boundaries.push(boundary);
    }
}

#[test]
fn cdata_in_html_content_is_a_bogus_comment() {
    assert_eq!(
        tokens_of("<![CDATA[x]]>"),
        vec![Token::Comment("[CDATA[x]]".to_string()), Token::Eof]
    );
    assert_eq!(
        error_codes_of("<![CDATA[x]]>"),
        vec![ErrorCode::CdataInHtmlContent]
    );
}

#[test]
fn cdata_in_foreign_content_is_character_data() {
    let mut context = RecordingContext {
        foreign: true,
        ..RecordingContext::default()
    };
    let mut tokens = TokenCollector::default();
    let mut errors = ErrorCollector::default();
    Tokenizer::new("<![CDATA[a]]b]]>", &mut tokens, TokenizerOpts::default())
        .with_error_sink(&mut errors)
        .with_context(&mut context)
        .run();
    let mut expected = chars("a]]b");
    expected.push(Token::Eof);
    assert_eq!(tokens.tokens, expected);
    assert!(errors.errors.is_empty());
}

#[test]
fn cdata_nul_passes_through_unchanged() {
    let mut context = RecordingContext {
        foreign: true,
        ..RecordingContext::default()
    };
    let mut tokens = TokenCollector::default();
    let mut errors = ErrorCollector::default();
    Tokenizer::new("<![CDATA[\0]]>", &mut tokens, TokenizerOpts::default())
        .with_error_sink(&mut errors)
        .with_context(&mut context)
        .run();
    assert_eq!(tokens.tokens, vec![Token::Character('\0'), Token::Eof]);
    assert!(errors.errors.is_empty());
}

#[test]
fn eof_in_cdata_is_reported() {
    let mut context = RecordingContext {
        foreign: true,
        ..RecordingContext::default()
    };
    let mut tokens = TokenCollector::default();
    let mut errors = ErrorCollector::default();
    Tokenizer::new("<![CDATA[x", &mut tokens, TokenizerOpts::default())
        .with_error_sink(&mut errors)
        .with_context(&mut context)
        .run();
    assert_eq!(tokens.tokens, vec![Token::Character('x'), Token::Eof]);
    assert_eq!(
        errors.errors.iter().map(|e| e.code).collect::<Vec<_>>(),
        vec![ErrorCode::EofInCdata]
    );
}

#[test]
fn script_data_boundaries_fire_around_script_content() {
    let mut context = RecordingContext::default();
    let mut tokens = TokenCollector::default();
    Tokenizer::new(
        "<script>a</script><b>",
        &mut tokens,
        TokenizerOpts::default(),
    )
    .with_context(&mut context)
    .run();
    assert_eq!(
        context.boundaries,
        vec![ScriptBoundary::Enter, ScriptBoundary::Exit]
    );
}

// ---- driver contract -----------------------------------------------------

#[test]
fn eof_is_always_last_and_unique() {
    for input in ["", "a", "<", "</", "<a href=x", "<!--", "<!DOCTYPE", "&#"] {
        let tokens = tokens_of(input);
        assert_eq!(tokens.last(), Some(&Token::Eof), "input: {input:?}");
        let eof_count = tokens.iter().filter(|t| t.is_eof()).count();
        assert_eq!(eof_count, 1, "input: {input:?}");
    }
}

#[test]
fn emit_eof_can_be_disabled() {
    let mut tokens = TokenCollector::default();
    let opts = TokenizerOpts {
        emit_eof: false,
        ..TokenizerOpts::default()
    };
    Tokenizer::new("a", &mut tokens, opts).run();
    assert_eq!(tokens.tokens, vec![Token::Character('a')]);
}

#[test]
#[should_panic(expected = "run called after the end-of-file token was emitted")]
fn run_after_eof_panics() {
    let mut tokens = TokenCollector::default();
    let mut tokenizer = Tokenizer::new("a", &mut tokens, TokenizerOpts::default());
    tokenizer.run();
    tokenizer.run();
}

#[test]
fn stats_count_steps_and_tokens() {
    let mut tokens = TokenCollector::default();
    let mut tokenizer = Tokenizer::new("<p>x</p>", &mut tokens, TokenizerOpts::default());
    tokenizer.run();
    let stats = tokenizer.stats();
    assert_eq!(stats.tokens_emitted, tokens.tokens.len() as u64);
    assert!(stats.steps >= stats.tokens_emitted);
    assert_eq!(stats.parse_errors, 0);
}

#[test]
fn error_positions_point_at_the_offending_character() {
    let (_, errors) = tokenize("ab\0");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].position, 2);

    let (_, errors) = tokenize("<div");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].position, 4);
}
