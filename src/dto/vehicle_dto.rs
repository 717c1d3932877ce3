//! DTOs del catálogo de vehículos

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::VehicleStatus;
use crate::utils::validation::validate_positive;

// Request para dar de alta un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, message = "license_plate is required"))]
    pub license_plate: String,
    #[validate(length(min = 1, message = "brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    #[validate(custom = "validate_positive")]
    pub daily_rate: Decimal,
}

// Request para actualizar datos de catálogo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    pub license_plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[validate(custom = "validate_positive")]
    pub daily_rate: Option<Decimal>,
}

// Request del toggle de mantenimiento (available ↔ maintenance);
// 'rented' queda reservado al motor de reservas
#[derive(Debug, Deserialize)]
pub struct SetVehicleStatusRequest {
    pub status: VehicleStatus,
}
