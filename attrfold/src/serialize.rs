//! Rendering attribute trees to attribute strings.

use crate::escaping::{Escaper, HtmlEscaper};
use crate::tracing_macros::trace;
use crate::tree::{AttributeNode, AttributeSet, RenderValue};

static DEFAULT_ESCAPER: HtmlEscaper = HtmlEscaper;

/// Quote character around attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// `name='value'`
    #[default]
    Single,
    /// `name="value"`
    Double,
}

impl QuoteStyle {
    const fn as_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// Options for attribute serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Quote character around values (default: single quotes)
    pub quote: QuoteStyle,
}

impl SerializeOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quote style.
    pub const fn quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }
}

/// Accumulates ` name='value'` pairs for one tag.
pub struct AttributeWriter<'e> {
    out: String,
    options: SerializeOptions,
    escaper: &'e dyn Escaper,
}

impl AttributeWriter<'static> {
    /// A writer using the default [`HtmlEscaper`].
    pub fn new(options: SerializeOptions) -> Self {
        Self::with_escaper(options, &DEFAULT_ESCAPER)
    }
}

impl<'e> AttributeWriter<'e> {
    /// A writer using a caller-provided escaper.
    pub fn with_escaper(options: SerializeOptions, escaper: &'e dyn Escaper) -> Self {
        Self {
            out: String::new(),
            options,
            escaper,
        }
    }

    /// Write every node of `set`, in order.
    pub fn write_set(&mut self, set: &AttributeSet) {
        for (name, node) in set {
            self.write_node(name, node);
        }
    }

    /// Write a top-level node and its flattened children.
    pub fn write_node(&mut self, name: &str, node: &AttributeNode) {
        self.write_prefixed(String::new(), name, node);
    }

    fn write_prefixed(&mut self, mut full_name: String, name: &str, node: &AttributeNode) {
        full_name.push_str(name);
        let full_name = full_name.replace('_', "-");

        match &node.leaf {
            Some(RenderValue::Text(text)) => {
                trace!(attribute = %full_name, "write text attribute");
                self.write_attribute(&full_name, text);
            }
            Some(RenderValue::Bool(true)) => {
                trace!(attribute = %full_name, "write boolean attribute");
                self.write_attribute(&full_name, &full_name);
            }
            Some(RenderValue::Bool(false)) | None => {}
        }

        for (child_name, child) in &node.children {
            let mut prefix = String::with_capacity(full_name.len() + 1 + child_name.len());
            prefix.push_str(&full_name);
            prefix.push('-');
            self.write_prefixed(prefix, child_name, child);
        }
    }

    fn write_attribute(&mut self, name: &str, value: &str) {
        let quote = self.options.quote.as_char();
        self.out.push(' ');
        self.escaper.escape_into(name, &mut self.out);
        self.out.push('=');
        self.out.push(quote);
        self.escaper.escape_into(value, &mut self.out);
        self.out.push(quote);
    }

    /// The rendered attributes: empty, or starting with a space.
    pub fn finish(self) -> String {
        self.out
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Serialize an attribute set with default options.
pub fn to_string(set: &AttributeSet) -> String {
    to_string_with_options(set, &SerializeOptions::default())
}

/// Serialize an attribute set with custom options.
pub fn to_string_with_options(set: &AttributeSet, options: &SerializeOptions) -> String {
    let mut writer = AttributeWriter::new(options.clone());
    writer.write_set(set);
    writer.finish()
}
