//! Repositorio de Vehicles
//!
//! Catálogo de vehículos. `set_status` es la única vía de escritura del
//! estado del vehículo: la invoca el motor de reservas dentro de la misma
//! transacción que el cambio de estado de la reserva.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleFilters, VehicleStatus};
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        license_plate: String,
        brand: String,
        model: String,
        daily_rate: Decimal,
    ) -> Result<Vehicle, AppError> {
        let now = Utc::now();
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, license_plate, brand, model, daily_rate, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'available', $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(license_plate)
        .bind(brand)
        .bind(model)
        .bind(daily_rate)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Bloquear la fila del vehículo dentro de la transacción del llamador.
    ///
    /// Serializa la sección crítica "comprobar disponibilidad + escribir
    /// reserva" por vehículo: de dos creates concurrentes solo uno pasa.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(vehicle)
    }

    pub async fn license_plate_exists(&self, license_plate: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1)")
                .bind(license_plate)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        let mut query = sqlx::QueryBuilder::new("SELECT * FROM vehicles WHERE 1=1");

        if let Some(status) = filters.status {
            query.push(" AND status = ");
            query.push_bind(status);
        }
        if let Some(brand) = &filters.brand {
            query.push(" AND brand ILIKE ");
            query.push_bind(format!("%{}%", brand));
        }

        query.push(" ORDER BY created_at DESC");
        query.push(" LIMIT ");
        query.push_bind(filters.limit.unwrap_or(100).clamp(1, 500));
        query.push(" OFFSET ");
        query.push_bind(filters.offset.unwrap_or(0).max(0));

        let vehicles = query
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    /// Actualizar datos de catálogo. Los cambios de tarifa no afectan a las
    /// reservas existentes: la tarifa viaja congelada dentro de cada reserva.
    pub async fn update(
        &self,
        id: Uuid,
        license_plate: Option<String>,
        brand: Option<String>,
        model: Option<String>,
        daily_rate: Option<Decimal>,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET license_plate = $2, brand = $3, model = $4, daily_rate = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(license_plate.unwrap_or(current.license_plate))
        .bind(brand.unwrap_or(current.brand))
        .bind(model.unwrap_or(current.model))
        .bind(daily_rate.unwrap_or(current.daily_rate))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Única vía de escritura del estado del vehículo
    pub async fn set_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: VehicleStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicles SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(conn)
            .await?;

        Ok(())
    }
}
