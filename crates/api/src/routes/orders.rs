//! Order endpoints under `/api/orders`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use domain::OrderDto;
use entity_store::OrderStore;
use user_directory::UserDirectory;

use super::{DtoCollectionResponse, parse_id};
use crate::error::ApiError;
use crate::state::OrderAppState;

type AppState<S, D> = State<Arc<OrderAppState<S, D>>>;

/// GET /api/orders
#[tracing::instrument(skip(state))]
pub async fn find_all<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
) -> Result<Json<DtoCollectionResponse<OrderDto>>, ApiError> {
    let orders = state.orders.find_all().await?;
    Ok(Json(orders.into()))
}

/// GET /api/orders/{id}
#[tracing::instrument(skip(state))]
pub async fn find_by_id<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    Path(id): Path<String>,
) -> Result<Json<OrderDto>, ApiError> {
    let order = state.orders.find_by_id(parse_id(&id)?).await?;
    Ok(Json(order))
}

/// POST /api/orders
#[tracing::instrument(skip(state, payload))]
pub async fn save<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    payload: Result<Json<OrderDto>, JsonRejection>,
) -> Result<Json<OrderDto>, ApiError> {
    let Json(dto) = payload?;
    Ok(Json(state.orders.save(dto).await?))
}

/// PUT /api/orders
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    payload: Result<Json<OrderDto>, JsonRejection>,
) -> Result<Json<OrderDto>, ApiError> {
    let Json(dto) = payload?;
    Ok(Json(state.orders.update(dto).await?))
}

/// PUT /api/orders/{id}
#[tracing::instrument(skip(state, payload))]
pub async fn update_by_id<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    Path(id): Path<String>,
    payload: Result<Json<OrderDto>, JsonRejection>,
) -> Result<Json<OrderDto>, ApiError> {
    let order_id = parse_id(&id)?;
    let Json(dto) = payload?;
    Ok(Json(state.orders.update_by_id(order_id, dto).await?))
}

/// DELETE /api/orders/{id}
#[tracing::instrument(skip(state))]
pub async fn delete_by_id<S: OrderStore + 'static, D: UserDirectory + 'static>(
    State(state): AppState<S, D>,
    Path(id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    state.orders.delete_by_id(parse_id(&id)?).await?;
    Ok(Json(true))
}
