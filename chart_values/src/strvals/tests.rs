//! Grammar coverage for the assignment parsers.

use super::{
    AssignmentError, ValueShape, parse, parse_file, parse_into, parse_json, parse_literal,
    parse_literal_into, parse_string,
};
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde_json::{Map, Value, json};
use test_helpers::json::object;

#[rstest]
#[case::single("name=value", json!({"name": "value"}))]
#[case::integer("long_int_string=1234567890", json!({"long_int_string": 1_234_567_890}))]
#[case::negative_integer("offset=-12", json!({"offset": -12}))]
#[case::boolean("boolean=true", json!({"boolean": true}))]
#[case::boolean_any_case("flag=FaLsE", json!({"flag": false}))]
#[case::null("is_null=null", json!({"is_null": null}))]
#[case::zero("zero=0", json!({"zero": 0}))]
#[case::leading_zeros("leading_zeros=00009", json!({"leading_zeros": "00009"}))]
#[case::float_stays_text("ratio=1.5", json!({"ratio": "1.5"}))]
#[case::pair("name=value,key=value", json!({"name": "value", "key": "value"}))]
#[case::empty_first("name1=,name2=value2", json!({"name1": "", "name2": "value2"}))]
#[case::empty_last("name1=value1,name2=", json!({"name1": "value1", "name2": ""}))]
#[case::trailing_comma("name1=value1,name2=value2,", json!({"name1": "value1", "name2": "value2"}))]
#[case::escaped_comma(r"name1=one\,two", json!({"name1": "one,two"}))]
#[case::escaped_dot(r"annotations.example\.com/role=edge", json!({"annotations": {"example.com/role": "edge"}}))]
#[case::escaped_equals(r"a\=b=c", json!({"a=b": "c"}))]
#[case::escaped_brackets(r"key\[0\]=v", json!({"key[0]": "v"}))]
#[case::nested("outer.inner=value", json!({"outer": {"inner": "value"}}))]
#[case::deeply_nested("outer.middle.inner=value", json!({"outer": {"middle": {"inner": "value"}}}))]
#[case::siblings(
    "outer.inner1=value,outer.middle.inner=value",
    json!({"outer": {"inner1": "value", "middle": {"inner": "value"}}})
)]
#[case::nested_empty("a.b=", json!({"a": {"b": ""}}))]
#[case::list_entry("list[0]=foo", json!({"list": ["foo"]}))]
#[case::list_entries("list[0]=foo,list[1]=bar", json!({"list": ["foo", "bar"]}))]
#[case::list_gap("list[0]=foo,list[3]=bar", json!({"list": ["foo", null, null, "bar"]}))]
#[case::list_empty_value("noval[0]=", json!({"noval": [""]}))]
#[case::list_of_documents(
    "list[0].foo=bar,list[0].hello=world",
    json!({"list": [{"foo": "bar", "hello": "world"}]})
)]
#[case::nested_lists("nested[1][1]=1", json!({"nested": [null, [null, 1]]}))]
#[case::out_of_order_documents(
    "name1.name2[1].foo=bar,name1.name2[0].foo=bar",
    json!({"name1": {"name2": [{"foo": "bar"}, {"foo": "bar"}]}})
)]
#[case::brace_list("list={a,b,c}", json!({"list": ["a", "b", "c"]}))]
#[case::typed_brace_list("list={1,true,x},after=1", json!({"list": [1, true, "x"], "after": 1}))]
fn typed_assignments(#[case] expression: &str, #[case] expected: Value) -> Result<()> {
    let parsed = parse(expression)?;
    ensure!(
        parsed == object(expected.clone())?,
        "'{expression}' parsed to {parsed:?}, expected {expected}"
    );
    Ok(())
}

#[rstest]
#[case::dangling_key("name1=value1,name2")]
#[case::key_then_comma("name1,name2=")]
#[case::repeated_commas("name1=value1,,,,name2=value2")]
#[case::dotted_without_value("name1.name2")]
#[case::dotted_then_comma("name1.name2,name1.name3")]
#[case::empty_nested_key("name1.=name2")]
#[case::index_without_value("noval[0]")]
#[case::unclosed_index("list[0=1")]
#[case::non_numeric_index("list[a]=1")]
#[case::negative_index("list[-30].hello=world")]
#[case::index_too_large("list[65537]=x")]
#[case::unterminated_list("list={a,b")]
#[case::stray_index_data("list[0]x=v")]
#[case::stray_index_data_before_dot("list[0]x.y=1")]
#[case::stray_nested_index_data("grid[0][1]x=v")]
fn malformed_typed_assignments_fail(#[case] expression: &str) {
    assert!(parse(expression).is_err(), "'{expression}' should fail");
}

#[rstest]
fn error_messages_name_the_key() {
    let err = parse("name1=value1,name2").expect_err("dangling key must fail");
    assert_eq!(err.to_string(), "key \"name2\" has no value");

    let err = parse("name1,name2=").expect_err("trailing comma must fail");
    assert_eq!(err.to_string(), "key \"name1\" has no value (cannot end with ,)");

    let err = parse("name1.=name2").expect_err("empty key map must fail");
    assert_eq!(err.to_string(), "key map \"name1\" has no value");
}

#[rstest]
fn index_limits_are_reported() {
    assert!(matches!(
        parse("list[-1]=x"),
        Err(AssignmentError::NegativeIndex { index: -1 })
    ));
    assert!(matches!(
        parse("list[65537]=x"),
        Err(AssignmentError::IndexTooLarge { index: 65_537 })
    ));
    assert!(parse("list[65536]=x").is_ok());
}

#[rstest]
#[case::string("list[0]x=v", parse_string)]
#[case::literal("list[0]x=v", parse_literal)]
#[case::json("list[0]x={}", |expression: &str| {
    let mut values = Map::new();
    parse_json(expression, &mut values).map(|()| values)
})]
fn text_after_an_index_is_rejected_in_every_mode(
    #[case] expression: &str,
    #[case] parser: fn(&str) -> Result<Map<String, Value>, AssignmentError>,
) {
    assert!(
        matches!(
            parser(expression),
            Err(AssignmentError::UnexpectedIndexData { ref data }) if data == "x"
        ),
        "'{expression}' must report the stray text"
    );
}

#[rstest]
#[case::nested_indices("a", "[0]")]
#[case::documents_in_lists("a", "[0].a")]
fn index_chains_share_the_nesting_cap(#[case] head: &str, #[case] step: &str) -> Result<()> {
    let within = format!("{head}{}=1", step.repeat(super::MAX_NESTED_NAME_LEVEL));
    ensure!(parse(&within).is_ok(), "'{within}' is within the cap");

    let very_deep = format!("{head}{}=1", step.repeat(5_000));
    ensure!(
        matches!(parse(&very_deep), Err(AssignmentError::TooDeep)),
        "thousands of nested indices must fail cleanly"
    );
    Ok(())
}

#[rstest]
fn nesting_depth_is_capped() -> Result<()> {
    let at_limit = format!("{}leaf=1", "k.".repeat(super::MAX_NESTED_NAME_LEVEL));
    ensure!(parse(&at_limit).is_ok(), "30 levels must be accepted");

    let beyond = format!("{}leaf=1", "k.".repeat(super::MAX_NESTED_NAME_LEVEL + 1));
    ensure!(
        matches!(parse(&beyond), Err(AssignmentError::TooDeep)),
        "31 levels must be rejected"
    );
    Ok(())
}

#[rstest]
#[case::integer("long_int_string=1234567890", json!({"long_int_string": "1234567890"}))]
#[case::boolean("boolean=true", json!({"boolean": "true"}))]
#[case::null("is_null=null", json!({"is_null": "null"}))]
#[case::brace_list("list={1,2}", json!({"list": ["1", "2"]}))]
#[case::indexed("list[1]=7", json!({"list": [null, "7"]}))]
fn string_assignments_never_infer(#[case] expression: &str, #[case] expected: Value) -> Result<()> {
    ensure!(parse_string(expression)? == object(expected)?, "'{expression}' mismatch");
    Ok(())
}

#[rstest]
#[case::object(r#"outer.inner={"a":1,"b":[true]}"#, json!({"outer": {"inner": {"a": 1, "b": [true]}}}))]
#[case::several(r#"a=[1,2],b="x""#, json!({"a": [1, 2], "b": "x"}))]
#[case::float("ratio=1.5", json!({"ratio": 1.5}))]
#[case::empty_is_null("a=", json!({"a": null}))]
#[case::blank_is_null("a=  ,b=1", json!({"a": null, "b": 1}))]
#[case::indexed(r#"list[1]={"x":1}"#, json!({"list": [null, {"x": 1}]}))]
#[case::padded_value(r#"a= "spaced" ,b=2"#, json!({"a": "spaced", "b": 2}))]
fn json_assignments(#[case] expression: &str, #[case] expected: Value) -> Result<()> {
    let mut values = Map::new();
    parse_json(expression, &mut values)?;
    ensure!(
        values == object(expected.clone())?,
        "'{expression}' parsed to {values:?}, expected {expected}"
    );
    Ok(())
}

#[rstest]
fn malformed_json_is_rejected() {
    let mut values = Map::new();
    let err = parse_json("a=[1,2", &mut values).expect_err("unterminated JSON must fail");
    assert!(matches!(err, AssignmentError::Json { .. }));
}

#[rstest]
#[case::commas_and_equals("key=a,b=c", json!({"key": "a,b=c"}))]
#[case::backslashes(r"path=C:\dir\file", json!({"path": r"C:\dir\file"}))]
#[case::nested("outer.inner=x=y", json!({"outer": {"inner": "x=y"}}))]
#[case::indexed("list[1]=v", json!({"list": [null, "v"]}))]
#[case::indexed_document("list[0].name={a,b}", json!({"list": [{"name": "{a,b}"}]}))]
#[case::nested_lists("grid[0][1]=true", json!({"grid": [[null, "true"]]}))]
#[case::empty_value("key=", json!({"key": ""}))]
fn literal_assignments_keep_raw_text(#[case] expression: &str, #[case] expected: Value) -> Result<()> {
    ensure!(parse_literal(expression)? == object(expected)?, "'{expression}' mismatch");
    Ok(())
}

#[rstest]
fn typed_parser_splits_what_literal_keeps() -> Result<()> {
    ensure!(
        parse("key=a,b=c")? == object(json!({"key": "a", "b": "c"}))?,
        "plain assignment should split on the comma"
    );
    Ok(())
}

#[rstest]
#[case::stray_index_data("list[0]x=v")]
#[case::dangling_key("name")]
#[case::dangling_index("list[0]")]
fn malformed_literal_assignments_fail(#[case] expression: &str) {
    assert!(parse_literal(expression).is_err(), "'{expression}' should fail");
}

#[rstest]
fn file_assignments_use_the_reader() -> Result<()> {
    let mut requested = Vec::new();
    let values = parse_file("tls.cert=certs/tls.crt,tls.key=certs/tls.key", |path| {
        requested.push(path.to_owned());
        Ok(Value::String(format!("contents of {path}")))
    })?;
    ensure!(
        values
            == object(json!({"tls": {
                "cert": "contents of certs/tls.crt",
                "key": "contents of certs/tls.key",
            }}))?,
        "unexpected file values: {values:?}"
    );
    ensure!(requested == ["certs/tls.crt", "certs/tls.key"], "reads out of order");
    Ok(())
}

#[rstest]
fn file_lists_resolve_each_item() -> Result<()> {
    let mut requested = Vec::new();
    let values = parse_file("chain={ca.crt,leaf.crt},name=web", |path| {
        requested.push(path.to_owned());
        Ok(Value::String(path.to_uppercase()))
    })?;
    ensure!(
        values == object(json!({"chain": ["CA.CRT", "LEAF.CRT"], "name": "WEB"}))?,
        "unexpected file values: {values:?}"
    );
    ensure!(
        requested == ["ca.crt", "leaf.crt", "web"],
        "reader calls: {requested:?}"
    );
    Ok(())
}

#[rstest]
fn file_reader_errors_propagate() {
    let err = parse_file("cert=missing.pem", |path| {
        Err(AssignmentError::Read {
            path: path.to_owned(),
            source: std::io::ErrorKind::NotFound.into(),
        })
    })
    .expect_err("reader failure must propagate");
    assert!(matches!(err, AssignmentError::Read { ref path, .. } if path == "missing.pem"));
}

#[rstest]
fn assignments_merge_into_existing_documents() -> Result<()> {
    let mut values = object(json!({"image": {"repository": "nginx", "tag": "1.0"}}))?;
    parse_into("image.tag=1.1,replicas=2", &mut values)?;
    ensure!(
        values
            == object(json!({
                "image": {"repository": "nginx", "tag": "1.1"},
                "replicas": 2,
            }))?,
        "unexpected merge result: {values:?}"
    );
    Ok(())
}

#[rstest]
fn existing_lists_are_extended_in_place() -> Result<()> {
    let mut values = object(json!({"hosts": ["a.example", "b.example"]}))?;
    parse_literal_into("hosts[3]=d.example", &mut values)?;
    ensure!(
        values == object(json!({"hosts": ["a.example", "b.example", null, "d.example"]}))?,
        "unexpected list: {values:?}"
    );
    Ok(())
}

#[rstest]
#[case::scalar_as_document(json!({"a": 1}), "a.b=2", "a", ValueShape::Document, ValueShape::Number)]
#[case::null_as_document(json!({"a": null}), "a.b=2", "a", ValueShape::Document, ValueShape::Null)]
#[case::scalar_as_list(json!({"a": "x"}), "a[0]=1", "a", ValueShape::Sequence, ValueShape::String)]
#[case::document_as_list(json!({"a": {}}), "a[0]=1", "a", ValueShape::Sequence, ValueShape::Document)]
#[case::nested_scalar_as_list(json!({"a": ["x"]}), "a[0][0]=1", "0", ValueShape::Sequence, ValueShape::String)]
fn shape_conflicts_are_fatal(
    #[case] existing: Value,
    #[case] expression: &str,
    #[case] key: &str,
    #[case] expected: ValueShape,
    #[case] found: ValueShape,
) -> Result<()> {
    let mut values = object(existing)?;
    let err = parse_into(expression, &mut values)
        .err()
        .ok_or_else(|| anyhow!("'{expression}' should conflict"))?;
    match err {
        AssignmentError::Conflict {
            key: actual_key,
            expected: actual_expected,
            found: actual_found,
        } => {
            ensure!(actual_key == key, "conflict reported on {actual_key}");
            ensure!(actual_expected == expected, "expected shape {actual_expected}");
            ensure!(actual_found == found, "found shape {actual_found}");
            Ok(())
        }
        other => Err(anyhow!("expected a conflict, got {other}")),
    }
}

#[rstest]
fn scalar_assignment_replaces_documents() -> Result<()> {
    let mut values = object(json!({"a": {"x": 1}}))?;
    parse_into("a=5", &mut values)?;
    ensure!(values == object(json!({"a": 5}))?, "scalar must replace the document");
    Ok(())
}

#[rstest]
fn empty_keys_are_not_stored() -> Result<()> {
    ensure!(parse("=value")?.is_empty(), "empty key must be ignored");
    ensure!(parse(".a=1")?.is_empty(), "empty parent key must be ignored");
    Ok(())
}
