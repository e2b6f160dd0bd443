//! Category endpoints under `/api/categories`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use domain::CategoryDto;
use entity_store::CatalogStore;

use super::{DtoCollectionResponse, parse_id};
use crate::error::ApiError;
use crate::state::CatalogAppState;

type AppState<S> = State<Arc<CatalogAppState<S>>>;

/// GET /api/categories
#[tracing::instrument(skip(state))]
pub async fn find_all<S: CatalogStore + 'static>(
    State(state): AppState<S>,
) -> Result<Json<DtoCollectionResponse<CategoryDto>>, ApiError> {
    let categories = state.categories.find_all().await?;
    Ok(Json(categories.into()))
}

/// GET /api/categories/{id}
#[tracing::instrument(skip(state))]
pub async fn find_by_id<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    Path(id): Path<String>,
) -> Result<Json<CategoryDto>, ApiError> {
    let category = state.categories.find_by_id(parse_id(&id)?).await?;
    Ok(Json(category))
}

/// POST /api/categories
#[tracing::instrument(skip(state, payload))]
pub async fn save<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    payload: Result<Json<CategoryDto>, JsonRejection>,
) -> Result<Json<CategoryDto>, ApiError> {
    let Json(dto) = payload?;
    Ok(Json(state.categories.save(dto).await?))
}

/// PUT /api/categories
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    payload: Result<Json<CategoryDto>, JsonRejection>,
) -> Result<Json<CategoryDto>, ApiError> {
    let Json(dto) = payload?;
    Ok(Json(state.categories.update(dto).await?))
}

/// PUT /api/categories/{id}
#[tracing::instrument(skip(state, payload))]
pub async fn update_by_id<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryDto>, JsonRejection>,
) -> Result<Json<CategoryDto>, ApiError> {
    let category_id = parse_id(&id)?;
    let Json(dto) = payload?;
    Ok(Json(state.categories.update_by_id(category_id, dto).await?))
}

/// DELETE /api/categories/{id}
#[tracing::instrument(skip(state))]
pub async fn delete_by_id<S: CatalogStore + 'static>(
    State(state): AppState<S>,
    Path(id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    state.categories.delete_by_id(parse_id(&id)?).await?;
    Ok(Json(true))
}
