//! WHATWG-style HTML tokenization front-end.
//!
//! This crate is the lexical stage of an HTML parser: it consumes a decoded
//! buffer of Unicode scalar values and delivers a stream of syntactic tokens
//! (DOCTYPE, start/end tags, characters, comments, end-of-file) to a sink,
//! recording parse errors along the way without ever refusing input.
//!
//! Out of scope by design: tree construction, input decoding, the full
//! named-entity table (an interface is consulted instead), and any host
//! integration. The input buffer is borrowed read-only for the duration of a
//! run; CR normalization is the upstream decoder's job.
//!
//! ```
//! use html_lexer::{tokenize, Token};
//!
//! let (tokens, errors) = tokenize("<p>hi</p>");
//! assert!(errors.is_empty());
//! assert!(matches!(&tokens[0], Token::StartTag(tag) if tag.name == "p"));
//! assert_eq!(tokens.last(), Some(&Token::Eof));
//! ```

mod builder;
mod emit;
mod entity;
mod error;
mod input;
mod token;
mod tokenizer;

pub use emit::{ErrorCollector, ErrorSink, TokenCollector, TokenSink};
pub use entity::{EntityMatch, MinimalEntities, NamedEntitySet};
pub use error::{ErrorCode, ParseError};
pub use token::{Attribute, Doctype, Tag, Token};
pub use tokenizer::{
    HtmlContext, InsertionContext, ScriptBoundary, State, Tokenizer, TokenizerOpts, TokenizerStats,
};

/// Tokenize `content` in one pass, delivering tokens to `tokens` and parse
/// errors to `errors` (dropped when absent). The token sink always receives
/// at least the end-of-file token.
pub fn run(
    content: &str,
    tokens: &mut dyn TokenSink,
    errors: Option<&mut dyn ErrorSink>,
) {
    let mut tokenizer = Tokenizer::new(content, tokens, TokenizerOpts::default());
    if let Some(errors) = errors {
        tokenizer = tokenizer.with_error_sink(errors);
    }
    tokenizer.run();
}

/// Collector convenience over [`run`].
pub fn tokenize(content: &str) -> (Vec<Token>, Vec<ParseError>) {
    let mut tokens = TokenCollector::default();
    let mut errors = ErrorCollector::default();
    run(content, &mut tokens, Some(&mut errors));
    (tokens.tokens, errors.errors)
}
