//! Node color schema.
//!
//! The schema is defined in JSON (or YAML) with the following structure:
//!
//! ```json
//! {
//!   "default": "#9e9e9e",
//!   "property": {
//!     "status": { "active": "green", "inactive": "red" },
//!     "tier":   { "gold": "#ffd700" }
//!   },
//!   "labels": { "Person": "blue", "Company": "orange" },
//!   "input_properties": ["name", "status"]
//! }
//! ```
//!
//! Property rules are kept in document order because the first matching rule
//! wins. Rule values are compared case-insensitively, so their keys are
//! uppercased once here instead of on every lookup.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use validator::Validate;

use super::errors::CatalogError;

/// Maps the values of one node property to colors.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRule {
    property: String,
    /// Keyed by the uppercased property value
    colors: HashMap<String, String>,
}

impl PropertyRule {
    /// Build a rule. When two value keys collide after uppercasing, the later one wins.
    pub fn new<K, C>(property: impl Into<String>, colors: impl IntoIterator<Item = (K, C)>) -> Self
    where
        K: AsRef<str>,
        C: Into<String>,
    {
        let property = property.into();
        let mut normalized = HashMap::new();
        for (value, color) in colors {
            let key = value.as_ref().to_uppercase();
            if let Some(previous) = normalized.insert(key.clone(), color.into()) {
                log::warn!(
                    "Color rule for property '{}': value '{}' overrides earlier color {} (values are case-insensitive)",
                    property,
                    key,
                    previous
                );
            }
        }

        PropertyRule {
            property,
            colors: normalized,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// Look up an already-uppercased property value.
    pub fn color_for(&self, normalized_value: &str) -> Option<&str> {
        self.colors.get(normalized_value).map(String::as_str)
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.colors.values().map(String::as_str)
    }
}

/// Immutable color rules shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSchema {
    default: String,
    property_rules: Vec<PropertyRule>,
    labels: HashMap<String, String>,
    input_properties: Vec<String>,
}

impl ColorSchema {
    /// A schema with only a fallback color
    pub fn new(default: impl Into<String>) -> Self {
        ColorSchema {
            default: default.into(),
            property_rules: Vec::new(),
            labels: HashMap::new(),
            input_properties: Vec::new(),
        }
    }

    /// Append a property rule; it is consulted after the rules already present.
    pub fn with_property_rule(mut self, rule: PropertyRule) -> Self {
        self.property_rules.push(rule);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>, color: impl Into<String>) -> Self {
        self.labels.insert(label.into(), color.into());
        self
    }

    pub fn with_input_properties<S: Into<String>>(
        mut self,
        properties: impl IntoIterator<Item = S>,
    ) -> Self {
        self.input_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Load and validate a schema file (`.json` or YAML)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let document: ColorSchemaDocument = super::load_document(path)?;
        document.into_schema(&path.display().to_string())
    }

    /// Parse and validate a JSON schema document
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let document: ColorSchemaDocument = super::parse_document("<inline>", content, true)?;
        document.into_schema("<inline>")
    }

    /// Parse and validate a YAML schema document
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let document: ColorSchemaDocument = super::parse_document("<inline>", content, false)?;
        document.into_schema("<inline>")
    }

    pub fn default_color(&self) -> &str {
        &self.default
    }

    /// Property rules in declaration order
    pub fn property_rules(&self) -> &[PropertyRule] {
        &self.property_rules
    }

    pub fn label_color(&self, label: &str) -> Option<&str> {
        self.labels.get(label).map(String::as_str)
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn sorted_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.labels.keys().cloned().collect();
        labels.sort();
        labels
    }

    pub fn sorted_input_properties(&self) -> Vec<String> {
        let mut properties = self.input_properties.clone();
        properties.sort();
        properties.dedup();
        properties
    }

    /// Every color this schema can hand out
    pub fn all_colors(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.default.as_str())
            .chain(self.property_rules.iter().flat_map(|rule| rule.colors()))
            .chain(self.labels.values().map(String::as_str))
    }
}

/// On-disk shape of the schema
#[derive(Debug, Deserialize, Validate)]
struct ColorSchemaDocument {
    #[validate(length(min = 1, message = "default color cannot be empty"))]
    default: String,
    #[serde(default)]
    property: OrderedPairs<OrderedPairs<String>>,
    #[serde(default)]
    labels: HashMap<String, String>,
    #[serde(default)]
    input_properties: Vec<String>,
}

impl ColorSchemaDocument {
    fn into_schema(self, source: &str) -> Result<ColorSchema, CatalogError> {
        self.validate()
            .map_err(|e| CatalogError::config_error_with_context(source, e.to_string()))?;

        for (property, values) in &self.property.0 {
            if property.is_empty() {
                return Err(CatalogError::config_error_with_context(
                    source,
                    "property rule names cannot be empty",
                ));
            }
            if let Some((value, _)) = values.0.iter().find(|(_, color)| color.is_empty()) {
                return Err(CatalogError::config_error_with_context(
                    source,
                    format!("`property.{}.{}` must be a non-empty color", property, value),
                ));
            }
        }
        if let Some((label, _)) = self.labels.iter().find(|(_, color)| color.is_empty()) {
            return Err(CatalogError::config_error_with_context(
                source,
                format!("`labels.{}` must be a non-empty color", label),
            ));
        }

        let property_rules = self
            .property
            .0
            .into_iter()
            .map(|(property, values)| PropertyRule::new(property, values.0))
            .collect();

        Ok(ColorSchema {
            default: self.default,
            property_rules,
            labels: self.labels,
            input_properties: self.input_properties,
        })
    }
}

/// A mapping deserialized into a list of entries, keeping document order.
///
/// A repeated key keeps its first position and takes the later value.
#[derive(Debug)]
struct OrderedPairs<V>(Vec<(String, V)>);

impl<V> Default for OrderedPairs<V> {
    fn default() -> Self {
        OrderedPairs(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedPairs<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for PairsVisitor<V> {
            type Value = OrderedPairs<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    match pairs.iter_mut().find(|(existing, _)| *existing == key) {
                        Some((_, slot)) => {
                            log::warn!("Duplicate schema key '{}': later value wins", key);
                            *slot = value;
                        }
                        None => pairs.push((key, value)),
                    }
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}
