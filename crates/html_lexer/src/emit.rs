//! Token and parse-error sinks.
//!
//! Sinks are invoked synchronously from the driver thread, in strict source
//! order. A sink must not mutate the input buffer and must not re-enter the
//! tokenizer that is calling it.

use crate::error::ParseError;
use crate::token::Token;

/// Receives finalized tokens, one at a time, ending with `Token::Eof`.
pub trait TokenSink {
    fn process_token(&mut self, token: Token);
}

/// Receives parse-error events. Absence of a sink drops the events.
pub trait ErrorSink {
    fn process_error(&mut self, error: ParseError);
}

/// Vec-backed token sink for tests and simple consumers.
#[derive(Debug, Default)]
pub struct TokenCollector {
    pub tokens: Vec<Token>,
}

impl TokenSink for TokenCollector {
    fn process_token(&mut self, token: Token) {
        self.tokens.push(token);
    }
}

/// Vec-backed error sink.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    pub errors: Vec<ParseError>,
}

impl ErrorSink for ErrorCollector {
    fn process_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }
}
