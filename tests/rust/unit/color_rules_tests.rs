use graphlens::graph_catalog::ColorSchema;
use graphlens::graph_model::{resolve_color, PropertyMap};
use serde_json::{json, Value};

const EXAMPLE_SCHEMA: &str = r#"{
    "default": "gray",
    "property": { "status": { "active": "green", "inactive": "red" } },
    "labels": { "Person": "blue" }
}"#;

fn schema() -> ColorSchema {
    ColorSchema::from_json_str(EXAMPLE_SCHEMA).expect("example schema should parse")
}

fn properties(value: Value) -> PropertyMap {
    value.as_object().cloned().expect("properties must be an object")
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn property_rule_matches_case_insensitively() {
    let schema = schema();
    let color = resolve_color(&labels(&["Person"]), &properties(json!({"status": "Active"})), &schema);
    assert_eq!(color, "green");
}

#[test]
fn label_rule_applies_without_matching_property() {
    let schema = schema();
    assert_eq!(resolve_color(&labels(&["Person"]), &PropertyMap::new(), &schema), "blue");
}

#[test]
fn unknown_label_gets_default() {
    let schema = schema();
    assert_eq!(resolve_color(&labels(&["Unknown"]), &PropertyMap::new(), &schema), "gray");
}

#[test]
fn uppercase_rule_key_matches_mixed_case_value() {
    let schema = ColorSchema::from_json_str(
        r#"{"default": "gray", "property": {"status": {"ACTIVE": "green"}}}"#,
    )
    .unwrap();
    let color = resolve_color(&[], &properties(json!({"status": "Active"})), &schema);
    assert_eq!(color, "green");
}

#[test]
fn first_label_in_node_order_wins() {
    let schema =
        ColorSchema::from_json_str(r#"{"default": "gray", "labels": {"A": "x", "B": "y"}}"#).unwrap();
    assert_eq!(resolve_color(&labels(&["B", "A"]), &PropertyMap::new(), &schema), "y");
}

#[test]
fn property_rules_follow_document_order() {
    let schema = ColorSchema::from_yaml_str(
        r#"
default: gray
property:
  zone:
    north: cyan
  area:
    north: magenta
"#,
    )
    .unwrap();
    let node = properties(json!({"area": "north", "zone": "North"}));
    assert_eq!(resolve_color(&[], &node, &schema), "cyan");
}
