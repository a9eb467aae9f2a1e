//! Rendered attribute strings survive a parse and re-merge unchanged.

use attrfold::{AttributeSet, AttributeStore, SerializeOptions, reparse, value};
use attrfold_testhelpers::{IPanic, test};
use bolero::check;

use crate::equivalence::{Choices, stored};

/// Parse `rendered`, spread the result into an empty set and render again.
fn rerender(rendered: &str) -> Result<String, IPanic> {
    let parsed = reparse(rendered)?;
    let mut set = AttributeSet::new();
    set.spread(&parsed)?;
    Ok(set.render(&SerializeOptions::default()))
}

#[test]
fn flattened_attributes_reparse_to_their_values() -> Result<(), IPanic> {
    let mut set = AttributeSet::new();
    set.contribute("id", &value!(["main", "panel"]))?;
    set.contribute("data", &value!({"foo": {"bar": "x"}, "n": 3}))?;
    set.contribute("title", &value!("it's <b>"))?;
    let rendered = set.render(&SerializeOptions::default());

    let parsed = reparse(&rendered)?;
    assert_eq!(
        parsed,
        value!({
            "id": "main-panel",
            "data-foo-bar": "x",
            "data-n": "3",
            "title": "it's <b>"
        })
    );
    Ok(())
}

#[test]
fn rerendering_is_idempotent() -> Result<(), IPanic> {
    let rendered = " class='a b' disabled='disabled' data-x='1'";
    let again = rerender(rendered)?;
    assert_eq!(reparse(&again)?, reparse(rendered)?);
    Ok(())
}

#[test]
fn rerendering_generated_sets_preserves_meaning() {
    check!().with_type::<Vec<u8>>().for_each(|bytes| {
        let contributions = Choices::new(bytes).contributions();
        let Ok(rendered) = stored(AttributeSet::new(), &contributions) else {
            return;
        };

        let again = rerender(&rendered).unwrap();
        assert_eq!(
            reparse(&again).unwrap(),
            reparse(&rendered).unwrap(),
            "{rendered:?} re-rendered as {again:?}"
        );
    });
}

#[test]
fn attributes_may_span_lines() -> Result<(), IPanic> {
    let parsed = reparse(indoc::indoc! {r#"
        id="card"
        class='a
        b'
        hidden
    "#})?;
    assert_eq!(parsed, value!({"id": "card", "class": "a\nb", "hidden": ""}));
    Ok(())
}
