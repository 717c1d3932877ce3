//! Rutas de la lista de precios de extras

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::extra_controller::ExtraController;
use crate::dto::common::ApiResponse;
use crate::dto::extra_dto::CreateExtraRequest;
use crate::models::extra::Extra;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_extra_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_extra))
        .route("/", get(list_extras))
}

async fn create_extra(
    State(state): State<AppState>,
    Json(request): Json<CreateExtraRequest>,
) -> Result<Json<ApiResponse<Extra>>, AppError> {
    let response = ExtraController::new(state.pool.clone()).create(request).await?;
    Ok(Json(response))
}

async fn list_extras(State(state): State<AppState>) -> Result<Json<Vec<Extra>>, AppError> {
    let response = ExtraController::new(state.pool.clone()).list().await?;
    Ok(Json(response))
}
