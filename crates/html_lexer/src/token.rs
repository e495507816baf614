//! Token model.

/// A single tag attribute.
///
/// Names are canonical lowercase on their ASCII-letter subset. Encounter order
/// is preserved; duplicate names never reach this type (first occurrence wins
/// during tokenization).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Payload shared by start tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub self_closing: bool,
    pub attrs: Vec<Attribute>,
}

impl Tag {
    /// Value of the first attribute with `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// DOCTYPE declaration payload.
///
/// `name` may be empty on malformed input; `force_quirks` tells the tree
/// builder to enter quirks mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: String,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
    pub force_quirks: bool,
}

/// A finalized syntactic token.
///
/// Tokens are emitted in strict source order. `Character` carries exactly one
/// scalar value; runs of text produce one token per scalar. `Eof` is terminal
/// and emitted exactly once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(Doctype),
    StartTag(Tag),
    EndTag { name: String },
    Character(char),
    Comment(String),
    Eof,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }
}
