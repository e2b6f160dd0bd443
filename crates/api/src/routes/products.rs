//! Product endpoints under `/api/products`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use domain::ProductDto;
use entity_store::CatalogStore;

use super::{DtoCollectionResponse, parse_id};
use crate::error::ApiError;
use crate::state::CatalogAppState;

type AppState<S> = State<Arc<CatalogAppState<S>>>;

/// GET /api/products
#[tracing::instrument(skip(state))]
pub async fn find_all<S: CatalogStore + 'static>(
    State(state): AppState<S>,
) -> Result<Json<DtoCollectionResponse<ProductDto>>, ApiError> {
    let products = state.products.find_all().await?;
    Ok(Json(products.into()))
}

/// GET /api/products/{id}
#[tracing::instrument(skip(state))]
pub async fn find_by_id<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    Path(id): Path<String>,
) -> Result<Json<ProductDto>, ApiError> {
    let product = state.products.find_by_id(parse_id(&id)?).await?;
    Ok(Json(product))
}

/// POST /api/products
#[tracing::instrument(skip(state, payload))]
pub async fn save<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    payload: Result<Json<ProductDto>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let Json(dto) = payload?;
    Ok(Json(state.products.save(dto).await?))
}

/// PUT /api/products
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    payload: Result<Json<ProductDto>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let Json(dto) = payload?;
    Ok(Json(state.products.update(dto).await?))
}

/// PUT /api/products/{id}
#[tracing::instrument(skip(state, payload))]
pub async fn update_by_id<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    Path(id): Path<String>,
    payload: Result<Json<ProductDto>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let product_id = parse_id(&id)?;
    let Json(dto) = payload?;
    Ok(Json(state.products.update_by_id(product_id, dto).await?))
}

/// DELETE /api/products/{id}
#[tracing::instrument(skip(state))]
pub async fn delete_by_id<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    Path(id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    state.products.delete_by_id(parse_id(&id)?).await?;
    Ok(Json(true))
}
