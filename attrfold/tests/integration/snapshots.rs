use attrfold::{Expr, SerializeOptions, Value, plan, value};
use attrfold_testhelpers::test;

fn render(contributions: &[(&str, Value)]) -> String {
    let expr = contributions
        .iter()
        .fold(Expr::new(), |expr, (name, value)| expr.merge(*name, value.clone()));
    match plan(expr, &SerializeOptions::default()) {
        Ok(plan) => plan.as_constant().unwrap_or("<deferred>").to_owned(),
        Err(err) => format!("error: {err}"),
    }
}

#[test]
fn attribute_rendering_table() {
    let cases: &[(&str, &[(&str, Value)])] = &[
        (
            r#"id = "main", id = "panel""#,
            &[("id", value!("main")), ("id", value!("panel"))],
        ),
        (
            r#"class = ["a", "b"], class = "c""#,
            &[("class", value!(["a", "b"])), ("class", value!("c"))],
        ),
        (
            r#"class = [false, "a", null, "b"]"#,
            &[("class", value!([false, "a", null, "b"]))],
        ),
        ("disabled = true", &[("disabled", value!(true))]),
        ("hidden = false", &[("hidden", value!(false))]),
        (
            r#"data = {foo: {bar: "x"}}"#,
            &[("data", value!({"foo": {"bar": "x"}}))],
        ),
        (
            r#"href = "/x", href = "/y""#,
            &[("href", value!("/x")), ("href", value!("/y"))],
        ),
        (
            r#"aria_label = "Tom & Jerry""#,
            &[("aria_label", value!("Tom & Jerry"))],
        ),
    ];

    let width = cases.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let table = cases
        .iter()
        .map(|(label, contributions)| format!("{label:<width$} => [{}]", render(contributions)))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(table, @r#"
    id = "main", id = "panel"       => [ id='main-panel']
    class = ["a", "b"], class = "c" => [ class='a b c']
    class = [false, "a", null, "b"] => [ class='a b']
    disabled = true                 => [ disabled='disabled']
    hidden = false                  => []
    data = {foo: {bar: "x"}}        => [ data-foo-bar='x']
    href = "/x", href = "/y"        => [ href='/y']
    aria_label = "Tom & Jerry"      => [ aria-label='Tom &amp; Jerry']
    "#);
}

#[test]
fn error_messages() {
    let table = [
        render(&[("src", Value::bytes(vec![1, 2]))]),
        render(&[("class", value!(["a", ["b"]]))]),
    ]
    .join("\n");

    insta::assert_snapshot!(table, @r"
    error: unsupported contribution shape for `src`: bytes
    error: unsupported contribution shape for `class`: array
    ");
}
