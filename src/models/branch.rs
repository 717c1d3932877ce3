//! Modelo de Branch
//!
//! Sucursales de recogida y devolución. Catálogo de referencia.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Branch principal - mapea exactamente a la tabla branches
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}
