//! DTOs del directorio de clientes

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRenterRequest {
    #[validate(length(min = 1, message = "full_name is required"))]
    pub full_name: String,
    #[validate(email(message = "email must be valid"))]
    pub email: String,
    pub phone: Option<String>,
}
