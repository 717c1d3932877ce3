//! Controller del catálogo de vehículos
//!
//! Altas, consultas y el toggle de mantenimiento. El estado 'rented'
//! pertenece en exclusiva al motor de reservas: este controller solo
//! permite mover available ↔ maintenance (y retired como baja).

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, SetVehicleStatusRequest, UpdateVehicleRequest};
use crate::models::vehicle::{Vehicle, VehicleFilters, VehicleStatus};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct VehicleController {
    pool: PgPool,
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        if self
            .repository
            .license_plate_exists(&request.license_plate)
            .await?
        {
            return Err(conflict_error("Vehicle", "license_plate", &request.license_plate));
        }

        let vehicle = self
            .repository
            .create(
                request.license_plate,
                request.brand,
                request.model,
                request.daily_rate,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        self.repository.list(&filters).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .update(
                id,
                request.license_plate,
                request.brand,
                request.model,
                request.daily_rate,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    /// Toggle administrativo de estado, bajo el lock de la fila para no
    /// pisarse con una transición de reserva concurrente
    pub async fn set_status(
        &self,
        id: Uuid,
        request: SetVehicleStatusRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        if request.status == VehicleStatus::Rented {
            return Err(AppError::BadRequest(
                "'rented' is driven by the booking lifecycle and cannot be set directly"
                    .to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let vehicle = VehicleRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        if vehicle.status == VehicleStatus::Rented {
            return Err(AppError::InvalidState(format!(
                "vehicle '{}' is rented; wait for the booking to complete",
                vehicle.license_plate
            )));
        }

        VehicleRepository::set_status(&mut tx, id, request.status).await?;
        tx.commit().await?;

        let updated = self.get_by_id(id).await?;
        Ok(ApiResponse::success_with_message(
            updated,
            "Estado del vehículo actualizado".to_string(),
        ))
    }
}
