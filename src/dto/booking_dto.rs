//! DTOs del motor de reservas
//!
//! Requests validados con `validator` y responses explícitos. El resultado
//! de las operaciones bulk es una lista de desenlaces por reserva
//! (éxito parcial por diseño, inspeccionable programáticamente).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::{Booking, BookingExtra, BookingStatus, BookingStatusCount};
use crate::services::pricing_service::PricedLine;
use crate::utils::validation::{validate_non_negative, validate_positive};

/// Línea de extra solicitada (el precio se resuelve en el servidor)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingExtraRequest {
    pub extra_id: Uuid,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

// Request para crear una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub renter_id: Uuid,
    pub vehicle_id: Uuid,
    pub pickup_branch_id: Uuid,
    pub return_branch_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate]
    #[serde(default)]
    pub extras: Vec<BookingExtraRequest>,
    #[validate(custom = "validate_non_negative")]
    pub discount_amount: Option<Decimal>,
    pub notes: Option<String>,
}

// Request para modificar una reserva (campos ausentes = sin cambio)
#[derive(Debug, Deserialize, Validate)]
pub struct ModifyBookingRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub pickup_branch_id: Option<Uuid>,
    pub return_branch_id: Option<Uuid>,
    #[validate]
    pub extras: Option<Vec<BookingExtraRequest>>,
    #[validate(custom = "validate_non_negative")]
    pub discount_amount: Option<Decimal>,
    pub notes: Option<String>,
}

// Request para una transición de estado individual
#[derive(Debug, Deserialize)]
pub struct TransitionStatusRequest {
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
}

// Request para transiciones en bloque
#[derive(Debug, Deserialize, Validate)]
pub struct BulkTransitionRequest {
    #[validate(length(min = 1, message = "booking_ids must not be empty"))]
    pub booking_ids: Vec<Uuid>,
    pub status: BookingStatus,
    pub notes: Option<String>,
}

// Request para actualizar las notas de auditoría
#[derive(Debug, Deserialize)]
pub struct UpdateNotesRequest {
    pub notes: Option<String>,
}

// Request para registrar un apunte de pago
#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    #[validate(custom = "validate_positive")]
    pub amount: Decimal,
    #[validate(length(min = 1, message = "method is required"))]
    pub method: String,
    pub reference: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

// Request para cotizar sin persistir
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequest {
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate]
    #[serde(default)]
    pub extras: Vec<BookingExtraRequest>,
    #[validate(custom = "validate_non_negative")]
    pub discount_amount: Option<Decimal>,
}

// Response de reserva con sus líneas
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub booking_number: String,
    pub renter_id: Uuid,
    pub vehicle_id: Uuid,
    pub pickup_branch_id: Uuid,
    pub return_branch_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
    pub daily_rate: Decimal,
    pub rental_cost: Decimal,
    pub extras_cost: Decimal,
    pub total_cost: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub extras: Vec<BookingExtra>,
}

impl BookingResponse {
    pub fn from_parts(booking: Booking, extras: Vec<BookingExtra>) -> Self {
        Self {
            id: booking.id,
            booking_number: booking.booking_number,
            renter_id: booking.renter_id,
            vehicle_id: booking.vehicle_id,
            pickup_branch_id: booking.pickup_branch_id,
            return_branch_id: booking.return_branch_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_days: booking.total_days,
            daily_rate: booking.daily_rate,
            rental_cost: booking.rental_cost,
            extras_cost: booking.extras_cost,
            total_cost: booking.total_cost,
            discount_amount: booking.discount_amount,
            final_amount: booking.final_amount,
            status: booking.status,
            notes: booking.notes,
            cancellation_reason: booking.cancellation_reason,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
            extras,
        }
    }
}

// Response de listado paginado
#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub page: i64,
    pub page_size: i64,
    pub count: usize,
    pub bookings: Vec<Booking>,
}

// Response de cotización (sin persistencia)
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub vehicle_id: Uuid,
    pub vehicle_available: bool,
    pub total_days: i32,
    pub daily_rate: Decimal,
    pub rental_cost: Decimal,
    pub extras_cost: Decimal,
    pub total_cost: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub lines: Vec<PricedLine>,
}

/// Desenlace de una reserva dentro de una operación bulk
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BulkTransitionOutcome {
    Success,
    /// Ya estaba en el estado destino
    Skipped,
    Failed { reason: String },
}

#[derive(Debug, Serialize)]
pub struct BulkTransitionItem {
    pub booking_id: Uuid,
    #[serde(flatten)]
    pub outcome: BulkTransitionOutcome,
}

#[derive(Debug, Serialize)]
pub struct BulkTransitionResponse {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub results: Vec<BulkTransitionItem>,
}

// Response del resumen agregado para el dashboard
#[derive(Debug, Serialize)]
pub struct BookingStatsResponse {
    pub total_bookings: i64,
    pub total_revenue: Decimal,
    pub by_status: Vec<BookingStatusCount>,
}
