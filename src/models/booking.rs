//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking, sus líneas de extras y el
//! enum de estados del ciclo de vida. Mapea exactamente al schema
//! PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la reserva - mapea al ENUM booking_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Open,
    Confirmed,
    InProgress,
    Completed,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Open => "open",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Canceled => "canceled",
        }
    }

    /// Estados terminales: no admiten transiciones ni modificaciones
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Canceled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
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
}

/// Línea de extra de una reserva - mapea a la tabla booking_extras
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingExtra {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub extra_id: Uuid,
    pub extra_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Claves de ordenación permitidas en los listados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSortKey {
    CreatedAt,
    StartDate,
    FinalAmount,
}

impl BookingSortKey {
    /// Columna SQL correspondiente (lista blanca, nunca input crudo)
    pub fn column(&self) -> &'static str {
        match self {
            BookingSortKey::CreatedAt => "created_at",
            BookingSortKey::StartDate => "start_date",
            BookingSortKey::FinalAmount => "final_amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Filtros para búsqueda de reservas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilters {
    pub status: Option<BookingStatus>,
    pub vehicle_id: Option<Uuid>,
    pub renter_id: Option<Uuid>,
    /// Coincide contra la sucursal de recogida o la de devolución
    pub branch_id: Option<Uuid>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
    pub end_date_from: Option<NaiveDate>,
    pub end_date_to: Option<NaiveDate>,
    pub min_final_amount: Option<Decimal>,
    pub max_final_amount: Option<Decimal>,
    pub sort_by: Option<BookingSortKey>,
    pub sort_dir: Option<SortDirection>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl BookingFilters {
    /// Normalizar paginación a LIMIT/OFFSET acotados
    pub fn limit_offset(&self, default_page_size: i64, max_page_size: i64) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(default_page_size)
            .clamp(1, max_page_size);
        (page_size, (page - 1) * page_size)
    }
}

/// Fila agregada del resumen por estado
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingStatusCount {
    pub status: BookingStatus,
    pub bookings: i64,
    pub revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Canceled.is_terminal());
        assert!(!BookingStatus::Open.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(!BookingStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_status_as_str_matches_db_enum() {
        assert_eq!(BookingStatus::InProgress.as_str(), "in_progress");
        assert_eq!(BookingStatus::Open.as_str(), "open");
        assert_eq!(BookingStatus::Canceled.as_str(), "canceled");
    }

    #[test]
    fn test_limit_offset_defaults_and_bounds() {
        let filters = BookingFilters::default();
        assert_eq!(filters.limit_offset(50, 200), (50, 0));

        let filters = BookingFilters {
            page: Some(3),
            page_size: Some(20),
            ..Default::default()
        };
        assert_eq!(filters.limit_offset(50, 200), (20, 40));

        // page_size por encima del máximo queda acotado
        let filters = BookingFilters {
            page: Some(0),
            page_size: Some(10_000),
            ..Default::default()
        };
        assert_eq!(filters.limit_offset(50, 200), (200, 0));
    }

    #[test]
    fn test_sort_key_columns_are_whitelisted() {
        assert_eq!(BookingSortKey::CreatedAt.column(), "created_at");
        assert_eq!(BookingSortKey::StartDate.column(), "start_date");
        assert_eq!(BookingSortKey::FinalAmount.column(), "final_amount");
        assert_eq!(SortDirection::Desc.keyword(), "DESC");
    }
}
