use crate::{
    errors::{ApiError, ServerError, ServerResult},
    AppState,
};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    Json,
};
use roster_core::{MessageResponse, RosterError, User, UserInput};
use std::sync::Arc;

/// The `{id}` segment of a single-user route.
///
/// An id that is not a 32-bit integer cannot name a row, so it is
/// rejected as not found before any store access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

impl UserId {
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse::<i32>().ok().map(UserId)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::not_found(format!("bad path: {}", e)))?;

        UserId::parse(&raw)
            .ok_or_else(|| ApiError::not_found(format!("malformed user id: {}", raw)).into())
    }
}

fn decode_body(body: &Bytes) -> UserInput {
    UserInput::from_json(body).unwrap_or_else(|| {
        tracing::debug!(len = body.len(), "body is not a JSON object, using empty fields");
        UserInput::default()
    })
}

/// Log a store failure against the user it concerns. Not-found is left to
/// the response mapping.
fn store_failure(id: i32, operation: &'static str) -> impl FnOnce(RosterError) -> ServerError {
    move |e| {
        if !e.is_not_found() {
            tracing::error!(id, operation, %e, "store failure");
        }
        e.into()
    }
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> ServerResult<Json<Vec<User>>> {
    let users = state.store.list().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
) -> ServerResult<Json<User>> {
    let user = state
        .store
        .get(id)
        .await
        .map_err(store_failure(id, "get"))?
        .ok_or_else(|| ApiError::not_found(format!("user {}", id)))?;

    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ServerResult<Json<User>> {
    let input = decode_body(&body);
    let id = state.store.create(&input).await?;

    tracing::debug!(id, "created user");
    Ok(Json(User::from_input(id, input)))
}

/// Update never answers not-found: an id that cannot be parsed, or that
/// names no row, is a failed update.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
    body: Bytes,
) -> ServerResult<Json<User>> {
    let UserId(id) = UserId::parse(&raw).ok_or_else(|| {
        ApiError::internal(format!("cannot update malformed user id: {}", raw))
    })?;

    let input = decode_body(&body);
    let affected = state
        .store
        .update(id, &input)
        .await
        .map_err(store_failure(id, "update"))?;
    tracing::debug!(id, affected, "updated user");

    let user = state
        .store
        .get(id)
        .await
        .map_err(store_failure(id, "get"))?
        .ok_or_else(|| ApiError::internal(format!("user {} missing after update", id)))?;

    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
) -> ServerResult<Json<MessageResponse>> {
    state
        .store
        .delete(id)
        .await
        .map_err(store_failure(id, "delete"))?;

    tracing::debug!(id, "deleted user");
    Ok(Json(MessageResponse::user_deleted()))
}
