//! Rutas del directorio de clientes

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::renter_controller::RenterController;
use crate::dto::common::ApiResponse;
use crate::dto::renter_dto::CreateRenterRequest;
use crate::models::renter::Renter;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_renter_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_renter))
        .route("/", get(list_renters))
        .route("/:id", get(get_renter))
}

async fn create_renter(
    State(state): State<AppState>,
    Json(request): Json<CreateRenterRequest>,
) -> Result<Json<ApiResponse<Renter>>, AppError> {
    let response = RenterController::new(state.pool.clone()).create(request).await?;
    Ok(Json(response))
}

async fn list_renters(State(state): State<AppState>) -> Result<Json<Vec<Renter>>, AppError> {
    let response = RenterController::new(state.pool.clone()).list().await?;
    Ok(Json(response))
}

async fn get_renter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Renter>, AppError> {
    let response = RenterController::new(state.pool.clone()).get_by_id(id).await?;
    Ok(Json(response))
}
