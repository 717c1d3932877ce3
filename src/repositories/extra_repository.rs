//! Repositorio de Extras
//!
//! Lista de precios de complementos. `resolve_prices` devuelve únicamente
//! los extras activos que existen; la política sobre los ids no resueltos
//! (descartar vs. fallar) la decide el orquestador.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::extra::Extra;
use crate::utils::errors::AppError;

pub struct ExtraRepository {
    pool: PgPool,
}

impl ExtraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        daily_price: Decimal,
    ) -> Result<Extra, AppError> {
        let extra = sqlx::query_as::<_, Extra>(
            r#"
            INSERT INTO extras (id, name, description, daily_price, active, created_at)
            VALUES ($1, $2, $3, $4, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(daily_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(extra)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Extra>, AppError> {
        let extra = sqlx::query_as::<_, Extra>("SELECT * FROM extras WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(extra)
    }

    /// Resolver los precios vigentes de un conjunto de ids
    pub async fn resolve_prices(&self, ids: &[Uuid]) -> Result<Vec<Extra>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let extras = sqlx::query_as::<_, Extra>(
            "SELECT * FROM extras WHERE id = ANY($1) AND active = TRUE",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(extras)
    }

    pub async fn list(&self) -> Result<Vec<Extra>, AppError> {
        let extras = sqlx::query_as::<_, Extra>("SELECT * FROM extras ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(extras)
    }
}
