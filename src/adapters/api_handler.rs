//! REST handlers for the mock resource surface.
//!
//! One resource per serving session: the schema's pluralized lower-cased
//! name. Bodies are the raw generated instances; error responses carry a
//! `{"detail": ...}` body.

use crate::adapters::store::MockStore;
use crate::schema::SchemaHandle;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Shared state for one serving session. The store is owned here, not a
/// process-wide singleton, so separate sessions and tests stay isolated.
#[derive(Clone)]
pub struct AppState {
    pub schema: SchemaHandle,
    pub resource: String,
    pub store: MockStore,
}

impl AppState {
    pub fn new(schema: SchemaHandle, store: MockStore) -> Self {
        let resource = schema.resource_name();
        Self {
            schema,
            resource,
            store,
        }
    }
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.store.count(&state.resource).await;
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "schema": state.schema.name(),
            "resource": state.resource,
            "instances": count,
        })),
    )
}

pub async fn list_items(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Response {
    if resource != state.resource {
        return unknown_resource(&resource);
    }
    let items = state.store.list(&resource, &state.schema, &filters).await;
    (StatusCode::OK, Json(Value::Array(items))).into_response()
}

pub async fn get_item(
    State(state): State<AppState>,
    Path((resource, identifier)): Path<(String, String)>,
) -> Response {
    if resource != state.resource {
        return unknown_resource(&resource);
    }
    match state.store.get(&resource, &state.schema, &identifier).await {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => item_not_found(&state, &identifier),
    }
}

pub async fn create_item(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    if resource != state.resource {
        return unknown_resource(&resource);
    }
    let Value::Object(payload) = payload else {
        return detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Request body must be a JSON object.",
        );
    };
    let created = state.store.create(&resource, &state.schema, payload).await;
    (StatusCode::CREATED, Json(created)).into_response()
}

pub async fn update_item(
    State(state): State<AppState>,
    Path((resource, identifier)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Response {
    if resource != state.resource {
        return unknown_resource(&resource);
    }
    let Value::Object(payload) = payload else {
        return detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Request body must be a JSON object.",
        );
    };
    match state
        .store
        .update(&resource, &state.schema, &identifier, payload)
        .await
    {
        Some(updated) => (StatusCode::OK, Json(updated)).into_response(),
        None => item_not_found(&state, &identifier),
    }
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((resource, identifier)): Path<(String, String)>,
) -> Response {
    if resource != state.resource {
        return unknown_resource(&resource);
    }
    if state
        .store
        .delete(&resource, &state.schema, &identifier)
        .await
    {
        StatusCode::NO_CONTENT.into_response()
    } else {
        item_not_found(&state, &identifier)
    }
}

fn unknown_resource(resource: &str) -> Response {
    detail(
        StatusCode::NOT_FOUND,
        &format!("Resource '{resource}' not found."),
    )
}

fn item_not_found(state: &AppState, identifier: &str) -> Response {
    detail(
        StatusCode::NOT_FOUND,
        &format!(
            "{} with id/index '{identifier}' not found.",
            state.schema.name()
        ),
    )
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}
