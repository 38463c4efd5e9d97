//! Path records → visualization graph.
//!
//! Nodes are deduplicated by id, keeping the first occurrence untouched; later
//! sightings of the same id are ignored rather than merged. Relationships are
//! never deduplicated: every traversal becomes its own link, even when an
//! identical one was already emitted.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

use super::{
    color_resolver::resolve_color, errors::ExtractionError, GraphData, Link, Node, PathRecord,
    PropertyMap,
};
use crate::graph_catalog::ColorSchema;

/// Node entry as returned by the database
#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "elementId")]
    element_id: Option<String>,
    id: Option<Value>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    properties: PropertyMap,
}

/// Relationship entry as returned by the database
#[derive(Debug, Deserialize)]
struct RawRelationship {
    #[serde(rename = "type")]
    rel_type: Option<String>,
    #[serde(rename = "startNodeElementId")]
    start_element_id: Option<String>,
    #[serde(rename = "startNode")]
    start_node: Option<Value>,
    #[serde(rename = "endNodeElementId")]
    end_element_id: Option<String>,
    #[serde(rename = "endNode")]
    end_node: Option<Value>,
    #[serde(default)]
    properties: PropertyMap,
}

/// Build the visualization graph from a query's path records.
///
/// Nodes come out in first-seen order, links in traversal order across all
/// records. An empty input yields an empty graph. Any record without the
/// expected path shape fails the whole extraction.
pub fn extract_graph<I>(records: I, schema: &ColorSchema) -> Result<GraphData, ExtractionError>
where
    I: IntoIterator<Item = PathRecord>,
{
    let mut nodes = Vec::new();
    let mut links = Vec::new();
    let mut seen_nodes = HashSet::new();

    for (index, record) in records.into_iter().enumerate() {
        let (raw_nodes, raw_relationships) = split_path(index, record)?;

        for raw in raw_nodes {
            let raw: RawNode = decode(index, "node", raw)?;
            let id = identity(raw.element_id, raw.id).ok_or(ExtractionError::MissingIdentifier {
                record: index,
                entity: "node",
                field: "elementId",
            })?;

            if seen_nodes.contains(&id) {
                continue;
            }

            let color = resolve_color(&raw.labels, &raw.properties, schema).to_string();
            log::debug!(
                "Node {}: labels={:?}, properties={:?}, color={}",
                id,
                raw.labels,
                raw.properties,
                color
            );

            seen_nodes.insert(id.clone());
            nodes.push(Node {
                id,
                labels: raw.labels,
                properties: raw.properties,
                color,
            });
        }

        for raw in raw_relationships {
            let raw: RawRelationship = decode(index, "relationship", raw)?;
            let missing = |field| ExtractionError::MissingIdentifier {
                record: index,
                entity: "relationship",
                field,
            };

            let source = identity(raw.start_element_id, raw.start_node)
                .ok_or_else(|| missing("startNodeElementId"))?;
            let target = identity(raw.end_element_id, raw.end_node)
                .ok_or_else(|| missing("endNodeElementId"))?;
            let rel_type = raw.rel_type.ok_or_else(|| missing("type"))?;

            links.push(Link {
                source,
                target,
                rel_type,
                properties: raw.properties,
            });
        }
    }

    Ok(GraphData { nodes, links })
}

/// Take the `nodes` and `relationships` arrays out of a record.
fn split_path(index: usize, record: PathRecord) -> Result<(Vec<Value>, Vec<Value>), ExtractionError> {
    let Value::Object(mut path) = record.into_raw() else {
        return Err(ExtractionError::NotAPath { record: index });
    };

    let mut collection = |name: &'static str| match path.remove(name) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ExtractionError::MalformedEntity {
            record: index,
            entity: "path",
            reason: format!("`{}` is not a list", name),
        }),
        None => Err(ExtractionError::MissingCollection {
            record: index,
            collection: name,
        }),
    };

    let nodes = collection("nodes")?;
    let relationships = collection("relationships")?;
    Ok((nodes, relationships))
}

fn decode<T: serde::de::DeserializeOwned>(
    index: usize,
    entity: &'static str,
    raw: Value,
) -> Result<T, ExtractionError> {
    serde_json::from_value(raw).map_err(|e| ExtractionError::MalformedEntity {
        record: index,
        entity,
        reason: e.to_string(),
    })
}

/// Prefer the string element id, fall back to the legacy id.
fn identity(element_id: Option<String>, legacy: Option<Value>) -> Option<String> {
    if let Some(id) = element_id.filter(|id| !id.is_empty()) {
        return Some(id);
    }
    match legacy? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
