//! Visualization graph model
//!
//! Turns the path rows returned by the graph database into the structure the
//! front-end draws: a deduplicated node list, each node carrying a display color,
//! and a link list with one entry per traversed relationship.
//!
//! ```text
//! PathRecord { nodes: [a, b], relationships: [a->b] }
//! PathRecord { nodes: [a, c], relationships: [a->c] }
//!
//! GraphData {
//!     nodes: [a (color), b (color), c (color)],
//!     links: [a->b, a->c],
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod color_resolver;
pub mod errors;
pub mod graph_extractor;

pub use color_resolver::resolve_color;
pub use errors::ExtractionError;
pub use graph_extractor::extract_graph;

/// Property bag of a node or relationship, in the order the database returned it.
pub type PropertyMap = Map<String, Value>;

/// A node ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Database identifier (elementId, or the legacy numeric id rendered as a string)
    pub id: String,
    /// Labels in database order
    pub labels: Vec<String>,
    pub properties: PropertyMap,
    /// Display color chosen by the color schema
    pub color: String,
}

/// A relationship ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Start node id
    pub source: String,
    /// End node id
    pub target: String,
    /// Relationship type (e.g. "KNOWS")
    #[serde(rename = "type")]
    pub rel_type: String,
    pub properties: PropertyMap,
}

/// Result of one graph extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

/// One result row from the query executor.
///
/// Holds the row's graph projection as returned by the database, i.e. an object
/// with `nodes` and `relationships` arrays. Rows without any graph column are
/// carried as their plain column values. The shape is only checked when the
/// record is extracted, so such rows surface as an [`ExtractionError`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    graph: Value,
}

impl PathRecord {
    pub fn new(graph: Value) -> Self {
        PathRecord { graph }
    }

    /// Build a record from already-separated node and relationship entries.
    pub fn from_parts(nodes: Vec<Value>, relationships: Vec<Value>) -> Self {
        PathRecord {
            graph: serde_json::json!({
                "nodes": nodes,
                "relationships": relationships,
            }),
        }
    }

    pub fn raw(&self) -> &Value {
        &self.graph
    }

    pub fn into_raw(self) -> Value {
        self.graph
    }
}
