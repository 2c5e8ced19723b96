use immutable_json::{JsonObject, Value};
use immutable_json_codec::{
    codecs, decode_field, decode_named, decoders, object, DecodeError, DecodeResultExt,
};
use serde_json::json;

fn doc(v: serde_json::Value) -> JsonObject {
    Value::from(v).as_object_or_empty().into_owned()
}

#[test]
fn missing_required_field() {
    let err = decode_named(&doc(json!({})), "age", &decoders::i32()).unwrap_err();
    assert_eq!(err.to_string(), "'age' not found in {}");
    assert!(matches!(err, DecodeError::NotFound { .. }));
}

#[test]
fn malformed_field_is_attributed() {
    let err = decode_named(&doc(json!({"age": "x"})), "age", &decoders::i32()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "'age' failed with message: 'JString is not a JNumber'"
    );
}

#[test]
fn default_value_fallback() {
    let age = decoders::i32().with_default_value(21).field("age");
    assert_eq!(decode_field(&doc(json!({})), &age), Ok(21));
    assert_eq!(decode_field(&doc(json!({"age": [1]})), &age), Ok(21));
    assert_eq!(decode_field(&doc(json!({"age": 3})), &age), Ok(3));
}

#[test]
fn default_does_not_leak_to_siblings() {
    let d = object::decode(
        (
            decoders::string().with_default_value("anon".into()).field("name"),
            decoders::i32().field("age"),
        ),
        |(name, age)| (name, age),
    );
    assert_eq!(
        d.from_json(&Value::from(json!({"age": 5}))),
        Ok(("anon".to_string(), 5))
    );
    assert_eq!(
        d.from_json(&Value::from(json!({}))).unwrap_err().to_string(),
        "'age' not found in {}"
    );
}

#[test]
fn optional_field_swallows_malformed_values() {
    let nick = decoders::string().option().field("nick");
    assert_eq!(decode_field(&doc(json!({})), &nick), Ok(None));
    assert_eq!(decode_field(&doc(json!({"nick": null})), &nick), Ok(None));
    assert_eq!(decode_field(&doc(json!({"nick": 12})), &nick), Ok(None));
    assert_eq!(
        decode_field(&doc(json!({"nick": "zed"})), &nick),
        Ok(Some("zed".to_string()))
    );
}

#[test]
fn list_field() {
    let tags = decoders::string().list().field("tags");
    assert_eq!(decode_field(&doc(json!({})), &tags), Ok(vec![]));

    // The list's empty default also covers a malformed element at field level.
    assert_eq!(
        decode_field(&doc(json!({"tags": ["a", "b", 3, "d"]})), &tags),
        Ok(vec![])
    );

    let err = decoders::string()
        .list()
        .from_json(&Value::from(json!(["a", "b", 3, "d"])))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "One or more results failed: JNumber is not a JString"
    );

    // Without a default the element failure is attributed to the field.
    let strict = decoders::string().list().map(|tags| tags).field("tags");
    let err = decode_field(&doc(json!({"tags": ["a", 3]})), &strict).unwrap_err();
    assert_eq!(
        err.to_string(),
        "'tags' failed with message: 'One or more results failed: JNumber is not a JString'"
    );
}

#[test]
fn nested_not_found_for_same_name_is_not_rewrapped() {
    // The inner record reports its own "id" as missing. Because the outer
    // field is also called "id", the failure passes through unwrapped.
    let inner = object::decode((decoders::i64().field("id"),), |(id,)| id);
    let outer = inner.field("id");

    let err = decode_field(&doc(json!({"id": {"name": "x"}})), &outer).unwrap_err();
    assert_eq!(err.to_string(), r#"'id' not found in {"name":"x"}"#);

    let other = object::decode((decoders::i64().field("id"),), |(id,)| id).field("owner");
    let err = decode_field(&doc(json!({"owner": {}})), &other).unwrap_err();
    assert_eq!(
        err.to_string(),
        "'owner' failed with message: ''id' not found in {}'"
    );
}

#[test]
fn not_found_text_inside_the_searched_object_counts() {
    // The inner "id" lookup fails, and the object it searched quotes the
    // phrase for "owner", so the outer field leaves the failure as it is.
    let owner = object::decode((decoders::i64().field("id"),), |(id,)| id).field("owner");
    let err = decode_field(&doc(json!({"owner": {"note": "'owner' not found"}})), &owner)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"'id' not found in {"note":"'owner' not found"}"#
    );
}

#[test]
fn string_map_field() {
    let scores = codecs::string_map(codecs::i32()).field("scores");
    let decoded = decode_field(&doc(json!({"scores": {"ann": 3, "bob": 5}})), &scores).unwrap();
    assert_eq!(decoded.get("bob"), Some(&5));
    assert_eq!(decode_field(&doc(json!({})), &scores).unwrap().len(), 0);
}

#[test]
fn escalation_carries_the_message() {
    let result = decode_named(&doc(json!({})), "id", &decoders::string());
    let escalated: Result<String, std::io::Error> = result.get_or_else_throw(std::io::Error::other);
    assert_eq!(escalated.unwrap_err().to_string(), "'id' not found in {}");
}

#[test]
#[should_panic(expected = "'id' not found in {}")]
fn unsafe_get_panics() {
    decode_named(&doc(json!({})), "id", &decoders::string()).unsafe_get();
}
