//! Query orchestration: executor → extractor, with every failure turned into a
//! [`QueryError`] value.

use std::sync::Arc;
use std::time::Instant;

use super::{errors::QueryError, query_executor::QueryExecutor};
use crate::graph_catalog::ColorSchema;
use crate::graph_model::{extract_graph, GraphData};

pub struct QueryService {
    executor: Arc<dyn QueryExecutor>,
    database: String,
    schema: Arc<ColorSchema>,
}

impl QueryService {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        database: impl Into<String>,
        schema: Arc<ColorSchema>,
    ) -> Self {
        Self {
            executor,
            database: database.into(),
            schema,
        }
    }

    pub fn schema(&self) -> &ColorSchema {
        &self.schema
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Run one query and build its visualization graph.
    ///
    /// Blank query text is rejected without contacting the database.
    pub async fn run_query(&self, query: &str) -> Result<GraphData, QueryError> {
        if query.trim().is_empty() {
            return Err(QueryError::missing_query());
        }

        let started = Instant::now();
        log::debug!("Executing query on {}: {}", self.database, query);

        let result = match self.executor.execute(query, &self.database).await {
            Ok(records) => {
                let row_count = records.len();
                extract_graph(records, &self.schema)
                    .map(|graph| (row_count, graph))
                    .map_err(QueryError::from)
            }
            Err(e) => Err(QueryError::from(e)),
        };

        match result {
            Ok((row_count, graph)) => {
                log::info!(
                    "Query returned {} rows -> {} nodes, {} links in {:.3}ms",
                    row_count,
                    graph.nodes.len(),
                    graph.links.len(),
                    started.elapsed().as_secs_f64() * 1000.0
                );
                Ok(graph)
            }
            Err(e) => {
                log::error!("Query execution failed: {}", e);
                Err(e)
            }
        }
    }
}
