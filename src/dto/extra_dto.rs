//! DTOs de la lista de precios de extras

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_positive;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExtraRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom = "validate_positive")]
    pub daily_price: Decimal,
}
