//! Controller del motor de reservas
//!
//! Valida los requests y delega en el orquestador; las respuestas viajan
//! envueltas en `ApiResponse`.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::booking_dto::{
    BookingListResponse, BookingResponse, BookingStatsResponse, BulkTransitionRequest,
    BulkTransitionResponse, CreateBookingRequest, ModifyBookingRequest, QuoteRequest,
    QuoteResponse, RecordPaymentRequest, TransitionStatusRequest, UpdateNotesRequest,
};
use crate::dto::common::ApiResponse;
use crate::models::booking::BookingFilters;
use crate::models::payment::BookingPayment;
use crate::services::BookingService;
use crate::utils::errors::AppError;

pub struct BookingController {
    service: BookingService,
    default_page_size: i64,
    max_page_size: i64,
}

impl BookingController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            service: BookingService::new(pool, config),
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        }
    }

    pub async fn create(
        &self,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;

        let (booking, extras) = self.service.create(request).await?;
        Ok(ApiResponse::success_with_message(
            BookingResponse::from_parts(booking, extras),
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn modify(
        &self,
        id: Uuid,
        request: ModifyBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;

        let (booking, extras) = self.service.modify(id, request).await?;
        Ok(ApiResponse::success_with_message(
            BookingResponse::from_parts(booking, extras),
            "Reserva actualizada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BookingResponse, AppError> {
        let (booking, extras) = self.service.get(id).await?;
        Ok(BookingResponse::from_parts(booking, extras))
    }

    pub async fn list(&self, filters: BookingFilters) -> Result<BookingListResponse, AppError> {
        let (page_size, offset) =
            filters.limit_offset(self.default_page_size, self.max_page_size);
        let page = offset / page_size + 1;

        let bookings = self.service.list(&filters).await?;

        Ok(BookingListResponse {
            page,
            page_size,
            count: bookings.len(),
            bookings,
        })
    }

    pub async fn transition_status(
        &self,
        id: Uuid,
        request: TransitionStatusRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let booking = self.service.transition_status(id, request).await?;
        let extras = self.service.get(booking.id).await?.1;

        Ok(ApiResponse::success_with_message(
            BookingResponse::from_parts(booking, extras),
            "Estado actualizado exitosamente".to_string(),
        ))
    }

    pub async fn bulk_transition(
        &self,
        request: BulkTransitionRequest,
    ) -> Result<ApiResponse<BulkTransitionResponse>, AppError> {
        request.validate()?;

        let result = self.service.bulk_transition(request).await?;
        let message = format!(
            "{} de {} reservas actualizadas",
            result.succeeded, result.total
        );
        Ok(ApiResponse::success_with_message(result, message))
    }

    pub async fn update_notes(
        &self,
        id: Uuid,
        request: UpdateNotesRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let booking = self.service.update_notes(id, request.notes).await?;
        let extras = self.service.get(booking.id).await?.1;

        Ok(ApiResponse::success_with_message(
            BookingResponse::from_parts(booking, extras),
            "Notas actualizadas exitosamente".to_string(),
        ))
    }

    pub async fn purge(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.service.purge(id).await?;
        Ok(ApiResponse::message_only(
            "Reserva eliminada exitosamente".to_string(),
        ))
    }

    pub async fn record_payment(
        &self,
        id: Uuid,
        request: RecordPaymentRequest,
    ) -> Result<ApiResponse<BookingPayment>, AppError> {
        request.validate()?;

        let payment = self.service.record_payment(id, request).await?;
        Ok(ApiResponse::success_with_message(
            payment,
            "Pago registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_payments(&self, id: Uuid) -> Result<Vec<BookingPayment>, AppError> {
        self.service.list_payments(id).await
    }

    pub async fn quote(&self, request: QuoteRequest) -> Result<QuoteResponse, AppError> {
        request.validate()?;
        self.service.quote(request).await
    }

    pub async fn stats(&self) -> Result<BookingStatsResponse, AppError> {
        self.service.stats().await
    }
}
