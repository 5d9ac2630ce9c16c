//! Axum extractors for validated request bodies
//!
//! Bodies are read as raw bytes and parsed as JSON whatever the declared
//! content type, so a client that forgets the header still gets field
//! level errors instead of a generic rejection.

use crate::core::entity::MenuEntity;
use crate::core::error::{IdentifierError, ProxyError};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Create payload that passed the entity's constraint table
///
/// ```rust,ignore
/// pub async fn create<E: MenuEntity>(
///     State(state): State<ProxyState>,
///     ValidatedCreate(form): ValidatedCreate<E>,
/// ) -> ProxyResult<(StatusCode, Json<E>)> {
///     // form is already trimmed, coerced and checked
/// }
/// ```
pub struct ValidatedCreate<E: MenuEntity>(pub E::Form);

/// Update payload checked against the `{id}` path segment
pub struct ValidatedUpdate<E: MenuEntity> {
    pub id: E::Id,
    pub form: E::Form,
}

async fn read_json<S: Send + Sync>(req: Request, state: &S) -> Result<Value, Response> {
    // Body rejections (size limit, broken stream) keep their own status
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(IntoResponse::into_response)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        ProxyError::MalformedBody {
            message: e.to_string(),
        }
        .into_response()
    })
}

impl<S, E> FromRequest<S> for ValidatedCreate<E>
where
    S: Send + Sync,
    E: MenuEntity,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = read_json(req, state).await?;

        E::validate_create(&payload)
            .map(ValidatedCreate)
            .map_err(|errors| ProxyError::Validation(errors).into_response())
    }
}

impl<S, E> FromRequest<S> for ValidatedUpdate<E>
where
    S: Send + Sync,
    E: MenuEntity,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // The path id is checked before the body is even read
        let Path(raw_id) = Path::<String>::from_request_parts(&mut parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let id = E::parse_id(&raw_id).ok_or_else(|| {
            ProxyError::from(IdentifierError::Invalid {
                value: raw_id.clone(),
                reason: E::invalid_id_message().to_string(),
            })
            .into_response()
        })?;

        let payload = read_json(Request::from_parts(parts, body), state).await?;

        if let Some(body_id) = payload.get("id").filter(|v| !v.is_null()) {
            if let Ok(body_id) = serde_json::from_value::<E::Id>(body_id.clone()) {
                if body_id != id {
                    return Err(ProxyError::from(IdentifierError::Mismatch {
                        body: body_id.to_string(),
                        path: id.to_string(),
                    })
                    .into_response());
                }
            }
        }

        let form = E::validate_update(&payload, Some(&id))
            .map_err(|errors| ProxyError::Validation(errors).into_response())?;

        Ok(ValidatedUpdate { id, form })
    }
}
