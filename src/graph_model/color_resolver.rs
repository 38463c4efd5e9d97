//! Node color resolution.
//!
//! Rules are consulted in a fixed priority order and the first hit wins:
//!
//! 1. property rules, in schema order (value compared case-insensitively)
//! 2. label rules, in the node's own label order
//! 3. the schema default

use serde_json::Value;

use super::PropertyMap;
use crate::graph_catalog::ColorSchema;

/// Pick the display color for a node.
///
/// Always returns a color: one of the property rule colors, a label color or
/// the schema default.
pub fn resolve_color<'s>(
    labels: &[String],
    properties: &PropertyMap,
    schema: &'s ColorSchema,
) -> &'s str {
    for rule in schema.property_rules() {
        let Some(value) = properties.get(rule.property()).and_then(normalized_value) else {
            continue;
        };
        if let Some(color) = rule.color_for(&value) {
            log::debug!(
                "Assigned color {} based on property {}={}",
                color,
                rule.property(),
                value
            );
            return color;
        }
    }

    for label in labels {
        if let Some(color) = schema.label_color(label) {
            log::debug!("Assigned color {} based on label {}", color, label);
            return color;
        }
    }

    log::debug!(
        "No matching rule for labels {:?}, using default color {}",
        labels,
        schema.default_color()
    );
    schema.default_color()
}

/// Uppercased string form of a property value; `None` for null.
fn normalized_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.to_uppercase()),
        other => Some(other.to_string().to_uppercase()),
    }
}
