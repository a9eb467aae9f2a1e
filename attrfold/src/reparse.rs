//! Parsing rendered attribute strings back into values, using html5gum.

use attrfold_value::{VObject, Value};
use html5gum::{Token, Tokenizer};

use crate::AttrError;

/// Parse an attribute string such as ` id='a' data-x='1'` into an object of
/// attribute name to decoded string value.
///
/// The string is tokenized as the attribute list of a synthetic start tag.
/// Character references are decoded in values only: a name the serializer
/// had to escape, such as `x'y`, comes back as `x&#39;y`, so only names made
/// of plain characters survive a render and reparse unchanged. Attribute
/// order is not preserved, and when a name repeats only its first occurrence
/// is kept.
pub fn reparse(attributes: &str) -> Result<Value, AttrError> {
    let input = format!("<x {attributes}>");
    let mut tokenizer = Tokenizer::new(input.as_str());

    while let Some(token_result) = tokenizer.next() {
        let token = token_result.map_err(|_| AttrError::Reparse("tokenizer error".into()))?;

        match token {
            Token::StartTag(tag) => {
                let object: VObject = tag
                    .attributes
                    .iter()
                    .map(|(k, v)| {
                        (
                            String::from_utf8_lossy(k).into_owned(),
                            Value::String(String::from_utf8_lossy(v).into_owned()),
                        )
                    })
                    .collect();
                return Ok(Value::Object(object));
            }
            // recoverable errors such as duplicate attributes
            _ => {}
        }
    }

    Err(AttrError::Reparse(format!(
        "no start tag in attribute string {attributes:?}"
    )))
}
