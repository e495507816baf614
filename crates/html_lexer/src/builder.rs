//! Current-token builders.
//!
//! At most one builder exists at a time, owned by the tokenizer context. A
//! handler creates it when it first recognizes the token kind, later handlers
//! mutate it, and finalization transfers the accumulated fields into an
//! immutable [`Token`](crate::token::Token). Name fields are ASCII-lowercased
//! as they are appended.

use crate::token::Attribute;

/// Pending attribute slot on a tag builder.
///
/// The value keeps accumulating even for a dropped duplicate; it just never
/// reaches the attribute list.
#[derive(Debug, Default)]
struct PendingAttr {
    name: String,
    value: String,
    dropped: bool,
}

/// Start or end tag under construction.
#[derive(Debug, Default)]
pub(crate) struct TagBuilder {
    pub(crate) name: String,
    pub(crate) is_end: bool,
    pub(crate) self_closing: bool,
    pub(crate) attrs: Vec<Attribute>,
    pending: Option<PendingAttr>,
}

impl TagBuilder {
    pub(crate) fn new(is_end: bool) -> Self {
        Self {
            is_end,
            ..Self::default()
        }
    }

    pub(crate) fn append_to_name(&mut self, ch: char) {
        self.name.push(ch.to_ascii_lowercase());
    }

    pub(crate) fn start_attribute(&mut self) {
        debug_assert!(self.pending.is_none(), "previous attribute not finished");
        self.pending = Some(PendingAttr::default());
    }

    pub(crate) fn append_to_attr_name(&mut self, ch: char) {
        self.pending_mut().name.push(ch.to_ascii_lowercase());
    }

    pub(crate) fn append_to_attr_value(&mut self, ch: char) {
        self.pending_mut().value.push(ch);
    }

    pub(crate) fn push_str_to_attr_value(&mut self, text: &str) {
        self.pending_mut().value.push_str(text);
    }

    /// Run the duplicate check once the attribute name is complete.
    ///
    /// Returns `true` when the name duplicates an earlier attribute; the
    /// first occurrence wins and this one will be dropped at finish.
    pub(crate) fn seal_attr_name(&mut self) -> bool {
        let attrs = &self.attrs;
        let pending = self
            .pending
            .as_mut()
            .expect("seal_attr_name with no attribute in progress");
        pending.dropped = attrs.iter().any(|attr| attr.name == pending.name);
        pending.dropped
    }

    /// Move the pending attribute into the list (no-op without one).
    pub(crate) fn finish_attribute(&mut self) {
        if let Some(pending) = self.pending.take() {
            if !pending.dropped {
                self.attrs.push(Attribute {
                    name: pending.name,
                    value: pending.value,
                });
            }
        }
    }
}

/// DOCTYPE under construction.
#[derive(Debug, Default)]
pub(crate) struct DoctypeBuilder {
    pub(crate) name: String,
    pub(crate) public_id: Option<String>,
    pub(crate) system_id: Option<String>,
    pub(crate) force_quirks: bool,
}

impl DoctypeBuilder {
    pub(crate) fn append_to_name(&mut self, ch: char) {
        self.name.push(ch.to_ascii_lowercase());
    }

    pub(crate) fn append_to_public_id(&mut self, ch: char) {
        self.public_id
            .get_or_insert_with(String::new)
            .push(ch);
    }

    pub(crate) fn append_to_system_id(&mut self, ch: char) {
        self.system_id
            .get_or_insert_with(String::new)
            .push(ch);
    }
}

/// The current-token accumulator, one variant per mutable token kind.
///
/// Handlers that mutate the builder first assert the expected variant; a
/// mismatch is a programming error, not an input condition.
#[derive(Debug)]
pub(crate) enum TokenBuilder {
    Tag(TagBuilder),
    Comment(String),
    Doctype(DoctypeBuilder),
}

impl TokenBuilder {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            TokenBuilder::Tag(tag) if tag.is_end => "end tag",
            TokenBuilder::Tag(_) => "start tag",
            TokenBuilder::Comment(_) => "comment",
            TokenBuilder::Doctype(_) => "doctype",
        }
    }
}

impl TagBuilder {
    fn pending_mut(&mut self) -> &mut PendingAttr {
        self.pending
            .as_mut()
            .expect("attribute append with no attribute in progress")
    }
}
