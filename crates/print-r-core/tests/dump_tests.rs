use std::borrow::Cow;

use print_r_core::{from_bytes, from_str, ErrorKind, Value};

fn s(text: &str) -> Value<'_> {
    Value::String(Cow::Borrowed(text))
}

fn assert_kind(input: &str, expected: ErrorKind) {
    let err = from_str(input).unwrap_err();
    assert_eq!(err.kind, expected, "input: {input:?}\nerror: {err}");
}

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn list_of_strings() {
    let dump = "Array
(
    [0] => a
    [1] => b
)
";
    assert_eq!(from_str(dump).unwrap(), Value::Sequence(vec![s("a"), s("b")]));
}

#[test]
fn record_with_coerced_age() {
    let dump = "Array
(
    [name] => John
    [age] => 30
)
";
    assert_eq!(
        from_str(dump).unwrap(),
        Value::Mapping(vec![
            (Cow::Borrowed("name"), s("John")),
            (Cow::Borrowed("age"), Value::Integer(30)),
        ])
    );
}

#[test]
fn boolean_like_flags_stay_integers() {
    let dump = "Array
(
    [active] => 1
    [admin] => 0
    [banned] =>
)
";
    let value = from_str(dump).unwrap();
    assert_eq!(value.get("active"), Some(&Value::Integer(1)));
    assert_eq!(value.get("admin"), Some(&Value::Integer(0)));
    assert_eq!(value.get("banned"), Some(&Value::EmptyString));
}

#[test]
fn nested_hobbies() {
    let dump = "Array
(
    [name] => John
    [hobbies] => Array
        (
            [0] => x
        )

)
";
    let value = from_str(dump).unwrap();
    assert!(value.is_mapping());
    assert_eq!(value.get("hobbies"), Some(&Value::Sequence(vec![s("x")])));
}

#[test]
fn list_of_records() {
    let dump = "Array
(
    [0] => Array
        (
            [id] => 1
            [price] => 9.99
        )

    [1] => Array
        (
            [id] => 2
            [price] => .5
        )

)
";
    let value = from_str(dump).unwrap();
    let items = value.as_sequence().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get("price"), Some(&Value::Float(9.99)));
    assert_eq!(items[1].get("id"), Some(&Value::Integer(2)));
    assert_eq!(items[1].get("price"), Some(&Value::Float(0.5)));
}

#[test]
fn gapped_numeric_keys_become_mapping() {
    let dump = "Array
(
    [0] => a
    [2] => c
    [1] => b
)
";
    let value = from_str(dump).unwrap();
    let keys: Vec<&str> = value
        .as_mapping()
        .unwrap()
        .iter()
        .map(|(k, _)| &**k)
        .collect();
    assert_eq!(keys, vec!["0", "2", "1"]);
}

#[test]
fn strings_keep_inner_whitespace_and_symbols() {
    let dump = "Array
(
    [greeting] =>   Hello,   World!  
    [negative] => -5
    [exponent] => 1e10
    [email] => someone@example.com
    [arrow] => a => b
)
";
    let value = from_str(dump).unwrap();
    assert_eq!(value.get("greeting"), Some(&s("Hello,   World!")));
    assert_eq!(value.get("negative"), Some(&s("-5")));
    assert_eq!(value.get("exponent"), Some(&s("1e10")));
    assert_eq!(value.get("email"), Some(&s("someone@example.com")));
    assert_eq!(value.get("arrow"), Some(&s("a => b")));
}

#[test]
fn keys_with_spaces_and_symbols() {
    let dump = "Array\n(\n    [first name] => Ann\n    [x-y.z] => 1\n)";
    let value = from_str(dump).unwrap();
    assert_eq!(value.get("first name"), Some(&s("Ann")));
    assert_eq!(value.get("x-y.z"), Some(&Value::Integer(1)));
}

#[test]
fn windows_line_endings() {
    let dump = "Array\r\n(\r\n    [0] => a\r\n    [1] => Array\r\n        (\r\n        )\r\n\r\n)\r\n";
    assert_eq!(
        from_str(dump).unwrap(),
        Value::Sequence(vec![s("a"), Value::Mapping(vec![])])
    );
}

#[test]
fn indentation_is_irrelevant() {
    let flat = "Array\n(\n[a] => Array\n(\n[0] => 1\n)\n)";
    let indented = "Array\n  (\n      [a] => Array\n            (\n   [0] => 1\n        )\n )";
    assert_eq!(from_str(flat).unwrap(), from_str(indented).unwrap());
}

#[test]
fn owned_value_outlives_input() {
    let value = {
        let dump = String::from("Array\n(\n    [k] => v\n)");
        let owned = from_str(&dump).unwrap().into_owned();
        owned
    };
    assert_eq!(value.get("k").and_then(Value::as_str), Some("v"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn empty_input() {
    assert_kind("", ErrorKind::EmptyInput);
    assert_kind("\n   \r\n", ErrorKind::EmptyInput);
}

#[test]
fn non_text_input() {
    let err = from_bytes(b"Array\n(\n\xc3\x28\n)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidInput);
}

#[test]
fn missing_array_header() {
    assert_kind("foo", ErrorKind::TopLevelNotArray);
    assert_kind("(\n)", ErrorKind::TopLevelNotArray);
}

#[test]
fn missing_open_paren() {
    assert_kind("Array", ErrorKind::MissingOpenParen);
    assert_kind("Array\n[0] => a\n)", ErrorKind::MissingOpenParen);
}

#[test]
fn missing_close_paren() {
    assert_kind("Array\n(\n    [0] => a", ErrorKind::UnexpectedEndOfInput);
    assert_kind(
        "Array\n(\n    [0] => Array\n        (\n            [0] => a\n        )\n",
        ErrorKind::UnexpectedEndOfInput,
    );
}

#[test]
fn keyless_nested_array() {
    assert_kind(
        "Array\n(\n    [0] => a\n    Array\n    (\n    )\n)",
        ErrorKind::AmbiguousNestedArray,
    );
}

#[test]
fn error_message_is_readable() {
    let err = from_str("Array\n(\n    [0] => a").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected end of input at line 3 (container is missing its closing ')')"
    );
}
