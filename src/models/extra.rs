//! Modelo de Extra
//!
//! Lista de precios de complementos (sillas infantiles, GPS, etc.).
//! El precio unitario se congela en la reserva al contratarlo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Extra principal - mapea exactamente a la tabla extras
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Extra {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub daily_price: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
