//! HTTP handlers for menu item operations
//!
//! Handlers are generic over the entity variant. They forward to the
//! record store and re-validate whatever comes back before answering.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header::CACHE_CONTROL},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::core::validation::{ValidatedCreate, ValidatedUpdate};
use crate::core::{MenuEntity, ProxyError, ProxyResult, RecordStore, StoreOperation};

/// State shared across handlers
#[derive(Clone)]
pub struct ProxyState {
    pub store: Arc<dyn RecordStore>,
}

impl ProxyState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

/// Body returned by a successful delete
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse<I> {
    pub message: String,
    pub id: I,
}

/// A store answer is only passed on once it is a valid record
fn checked_record<E: MenuEntity>(value: Value) -> ProxyResult<E> {
    E::validate_record(value).map_err(|errors| ProxyError::ResponseShape {
        entity: E::display_name(),
        errors,
    })
}

/// Ids no record could carry are reported as missing without asking the store
fn known_id<E: MenuEntity>(raw: &str) -> ProxyResult<E::Id> {
    E::parse_id(raw).ok_or_else(|| ProxyError::NotFound {
        entity: E::display_name(),
        id: raw.to_string(),
    })
}

fn to_store_body<E: MenuEntity>(record: &E) -> ProxyResult<Value> {
    serde_json::to_value(record).map_err(|e| ProxyError::Internal(e.to_string()))
}

/// List items
///
/// GET /items?...
///
/// Query pairs go to the store untouched and the payload comes back
/// untouched; browsers are told not to cache it.
pub async fn list(
    State(state): State<ProxyState>,
    Query(query): Query<Vec<(String, String)>>,
) -> ProxyResult<impl IntoResponse> {
    let payload = state
        .store
        .list(&query)
        .await
        .map_err(|source| ProxyError::Store {
            operation: StoreOperation::List,
            source,
        })?;

    Ok(([(CACHE_CONTROL, "no-store")], Json(payload)))
}

/// Get one item
///
/// GET /items/{id}
pub async fn get_item<E: MenuEntity>(
    State(state): State<ProxyState>,
    Path(raw_id): Path<String>,
) -> ProxyResult<Json<E>> {
    let id = known_id::<E>(&raw_id)?;
    let value = state
        .store
        .get(&id.to_string())
        .await
        .map_err(|e| ProxyError::from_store(StoreOperation::Fetch, E::display_name(), &id, e))?;

    checked_record::<E>(value).map(Json)
}

/// Create an item
///
/// POST /items
pub async fn create<E: MenuEntity>(
    State(state): State<ProxyState>,
    ValidatedCreate(form): ValidatedCreate<E>,
) -> ProxyResult<(StatusCode, Json<E>)> {
    let record = E::to_domain(form);
    let body = to_store_body(&record)?;

    let created = state
        .store
        .create(body)
        .await
        .map_err(|source| ProxyError::Store {
            operation: StoreOperation::Create,
            source,
        })?;
    let created = checked_record::<E>(created)?;

    if let Some(id) = created.id() {
        tracing::info!(entity = E::display_name(), id = %id, "item created");
    }
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an item in place
///
/// PUT /items/{id}
///
/// The record must already exist; a missing record is a 404 before any
/// write is attempted.
pub async fn update<E: MenuEntity>(
    State(state): State<ProxyState>,
    ValidatedUpdate { id, form }: ValidatedUpdate<E>,
) -> ProxyResult<Json<E>> {
    let key = id.to_string();
    let entity = E::display_name();

    state
        .store
        .get(&key)
        .await
        .map_err(|e| ProxyError::from_store(StoreOperation::CheckExists, entity, &id, e))?;

    let body = to_store_body(&E::to_domain(form))?;
    let updated = state
        .store
        .update(&key, body)
        .await
        .map_err(|e| ProxyError::from_store(StoreOperation::Update, entity, &id, e))?;

    tracing::info!(entity, id = %id, "item updated");
    checked_record::<E>(updated).map(Json)
}

/// Delete an item
///
/// DELETE /items/{id}
pub async fn delete<E: MenuEntity>(
    State(state): State<ProxyState>,
    Path(raw_id): Path<String>,
) -> ProxyResult<Json<DeleteResponse<E::Id>>> {
    let id = known_id::<E>(&raw_id)?;
    let entity = E::display_name();

    state
        .store
        .delete(&id.to_string())
        .await
        .map_err(|e| ProxyError::from_store(StoreOperation::Delete, entity, &id, e))?;

    tracing::info!(entity, id = %id, "item deleted");
    Ok(Json(DeleteResponse {
        message: format!("{} deleted successfully", entity),
        id,
    }))
}

/// Flip availability, re-submitting the full record
///
/// PATCH /items/{id}/availability
pub async fn toggle_availability<E: MenuEntity>(
    State(state): State<ProxyState>,
    Path(raw_id): Path<String>,
) -> ProxyResult<Json<E>> {
    let id = known_id::<E>(&raw_id)?;
    let key = id.to_string();
    let entity = E::display_name();

    let current = state
        .store
        .get(&key)
        .await
        .map_err(|e| ProxyError::from_store(StoreOperation::Fetch, entity, &id, e))?;
    let toggled = checked_record::<E>(current)?
        .toggle_availability()
        .ok_or_else(|| ProxyError::Internal(format!("{} has no availability", entity)))?;

    let updated = state
        .store
        .update(&key, to_store_body(&toggled)?)
        .await
        .map_err(|e| ProxyError::from_store(StoreOperation::Update, entity, &id, e))?;

    tracing::info!(entity, id = %id, "availability toggled");
    checked_record::<E>(updated).map(Json)
}

/// Liveness probe
///
/// GET /health
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "menu-proxy",
    }))
}
