use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};

use super::{
    errors::QueryError,
    models::{LabelsResponse, QueryRequest},
    AppState,
};

/// Simple health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "graphlens",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `POST /query`: run the query and answer with the colored graph or `{"error": ...}`.
pub async fn query_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        // Unparsable JSON cannot carry a query
        Err(JsonRejection::JsonSyntaxError(rejection)) => {
            log::debug!("Rejected query request body: {}", rejection.body_text());
            return QueryError::missing_query().into_response();
        }
        Err(rejection) => {
            log::debug!("Rejected query request body: {}", rejection.body_text());
            return QueryError::from(rejection).into_response();
        }
    };

    let Some(query) = request.query.filter(|q| !q.trim().is_empty()) else {
        return QueryError::missing_query().into_response();
    };

    match app_state.query_service.run_query(&query).await {
        Ok(graph) => Json(graph).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /labels`: labels and input properties known to the color schema.
pub async fn labels_handler(State(app_state): State<Arc<AppState>>) -> Json<LabelsResponse> {
    let schema = app_state.query_service.schema();
    Json(LabelsResponse {
        labels: schema.sorted_labels(),
        input_properties: schema.sorted_input_properties(),
    })
}
