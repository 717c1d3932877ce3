//! Modelo de BookingPayment
//!
//! Apuntes de pago registrados contra una reserva. El sistema actúa como
//! espejo de un libro mayor externo: no se concilia contra final_amount.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Pago registrado - mapea exactamente a la tabla booking_payments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingPayment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: Decimal,
    pub method: String,
    pub reference: Option<String>,
    pub paid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
