//! Modelo de Renter
//!
//! Directorio de clientes que alquilan vehículos. Catálogo de referencia:
//! el motor de reservas solo comprueba existencia por id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Renter principal - mapea exactamente a la tabla renters
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Renter {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
