//! Rutas del motor de reservas

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    BookingListResponse, BookingResponse, BookingStatsResponse, BulkTransitionRequest,
    BulkTransitionResponse, CreateBookingRequest, ModifyBookingRequest, QuoteRequest,
    QuoteResponse, RecordPaymentRequest, TransitionStatusRequest, UpdateNotesRequest,
};
use crate::dto::common::ApiResponse;
use crate::models::booking::BookingFilters;
use crate::models::payment::BookingPayment;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/stats", get(booking_stats))
        .route("/quote", post(quote_booking))
        .route("/bulk/status", post(bulk_transition))
        .route("/:id", get(get_booking))
        .route("/:id", put(modify_booking))
        .route("/:id", delete(purge_booking))
        .route("/:id/status", patch(transition_booking))
        .route("/:id/notes", patch(update_booking_notes))
        .route("/:id/payments", post(record_payment))
        .route("/:id/payments", get(list_payments))
}

fn controller(state: &AppState) -> BookingController {
    BookingController::new(state.pool.clone(), &state.config)
}

async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(filters): Query<BookingFilters>,
) -> Result<Json<BookingListResponse>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn booking_stats(
    State(state): State<AppState>,
) -> Result<Json<BookingStatsResponse>, AppError> {
    let response = controller(&state).stats().await?;
    Ok(Json(response))
}

async fn quote_booking(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let response = controller(&state).quote(request).await?;
    Ok(Json(response))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn modify_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ModifyBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let response = controller(&state).modify(id, request).await?;
    Ok(Json(response))
}

async fn purge_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).purge(id).await?;
    Ok(Json(response))
}

async fn transition_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionStatusRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let response = controller(&state).transition_status(id, request).await?;
    Ok(Json(response))
}

async fn bulk_transition(
    State(state): State<AppState>,
    Json(request): Json<BulkTransitionRequest>,
) -> Result<Json<ApiResponse<BulkTransitionResponse>>, AppError> {
    let response = controller(&state).bulk_transition(request).await?;
    Ok(Json(response))
}

async fn update_booking_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateNotesRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let response = controller(&state).update_notes(id, request).await?;
    Ok(Json(response))
}

async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<ApiResponse<BookingPayment>>, AppError> {
    let response = controller(&state).record_payment(id, request).await?;
    Ok(Json(response))
}

async fn list_payments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<BookingPayment>>, AppError> {
    let response = controller(&state).list_payments(id).await?;
    Ok(Json(response))
}
