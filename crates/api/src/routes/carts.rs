//! Cart endpoints under `/api/carts`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use domain::CartDto;
use entity_store::OrderStore;
use user_directory::UserDirectory;

use super::{DtoCollectionResponse, parse_id};
use crate::error::ApiError;
use crate::state::OrderAppState;

type AppState<S, D> = State<Arc<OrderAppState<S, D>>>;

/// GET /api/carts
#[tracing::instrument(skip(state))]
pub async fn find_all<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
) -> Result<Json<DtoCollectionResponse<CartDto>>, ApiError> {
    let carts = state.carts.find_all().await?;
    Ok(Json(carts.into()))
}

/// GET /api/carts/{id}
#[tracing::instrument(skip(state))]
pub async fn find_by_id<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    Path(id): Path<String>,
) -> Result<Json<CartDto>, ApiError> {
    let cart = state.carts.find_by_id(parse_id(&id)?).await?;
    Ok(Json(cart))
}

/// POST /api/carts
#[tracing::instrument(skip(state, payload))]
pub async fn save<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    payload: Result<Json<CartDto>, JsonRejection>,
) -> Result<Json<CartDto>, ApiError> {
    let Json(dto) = payload?;
    Ok(Json(state.carts.save(dto).await?))
}

/// PUT /api/carts
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    payload: Result<Json<CartDto>, JsonRejection>,
) -> Result<Json<CartDto>, ApiError> {
    let Json(dto) = payload?;
    Ok(Json(state.carts.update(dto).await?))
}

/// PUT /api/carts/{id}
#[tracing::instrument(skip(state, payload))]
pub async fn update_by_id<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    Path(id): Path<String>,
    payload: Result<Json<CartDto>, JsonRejection>,
) -> Result<Json<CartDto>, ApiError> {
    let cart_id = parse_id(&id)?;
    let Json(dto) = payload?;
    Ok(Json(state.carts.update_by_id(cart_id, dto).await?))
}

/// DELETE /api/carts/{id}
#[tracing::instrument(skip(state))]
pub async fn delete_by_id<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    Path(id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    state.carts.delete_by_id(parse_id(&id)?).await?;
    Ok(Json(true))
}
