//! Attribute escaping.

use std::borrow::Cow;

/// The escaping primitive applied to every emitted attribute name and value.
///
/// Implementations must escape at least the quote characters and `&`, so a
/// value can never terminate its attribute early.
pub trait Escaper {
    /// Append the escaped form of `text` to `out`.
    fn escape_into(&self, text: &str, out: &mut String);
}

/// Default escaper for HTML and XML attributes.
/// Escapes: `&` `<` `>` `"` `'`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl Escaper for HtmlEscaper {
    fn escape_into(&self, text: &str, out: &mut String) {
        let mut rest = text;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            out.push_str(&rest[..pos]);
            out.push_str(match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            });
            rest = &rest[pos + 1..];
        }
        out.push_str(rest);
    }
}

/// Escape `text` with [`HtmlEscaper`], borrowing when nothing needs escaping.
pub fn escape(text: &str) -> Cow<'_, str> {
    if text.contains(['&', '<', '>', '"', '\'']) {
        let mut out = String::with_capacity(text.len() + 8);
        HtmlEscaper.escape_into(text, &mut out);
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}
