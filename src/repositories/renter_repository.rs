//! Repositorio de Renters
//!
//! Directorio de clientes. El motor de reservas solo comprueba existencia.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::renter::Renter;
use crate::utils::errors::AppError;

pub struct RenterRepository {
    pool: PgPool,
}

impl RenterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        full_name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<Renter, AppError> {
        let renter = sqlx::query_as::<_, Renter>(
            r#"
            INSERT INTO renters (id, full_name, email, phone, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(renter)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Renter>, AppError> {
        let renter = sqlx::query_as::<_, Renter>("SELECT * FROM renters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(renter)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM renters WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM renters WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn list(&self) -> Result<Vec<Renter>, AppError> {
        let renters = sqlx::query_as::<_, Renter>("SELECT * FROM renters ORDER BY full_name")
            .fetch_all(&self.pool)
            .await?;

        Ok(renters)
    }
}
