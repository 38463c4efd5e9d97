use thiserror::Error;

/// Raised when a query result row does not have the path shape the extractor expects.
///
/// `record` is the zero-based position of the offending row in the result set.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("Record {record} does not contain a path (expected an object with `nodes` and `relationships`)")]
    NotAPath { record: usize },
    #[error("Record {record} is missing its `{collection}` collection")]
    MissingCollection {
        record: usize,
        collection: &'static str,
    },
    #[error("Record {record}: malformed {entity}: {reason}")]
    MalformedEntity {
        record: usize,
        entity: &'static str,
        reason: String,
    },
    #[error("Record {record}: {entity} has no `{field}`")]
    MissingIdentifier {
        record: usize,
        entity: &'static str,
        field: &'static str,
    },
}
