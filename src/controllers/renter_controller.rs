//! Controller del directorio de clientes

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::renter_dto::CreateRenterRequest;
use crate::models::renter::Renter;
use crate::repositories::renter_repository::RenterRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct RenterController {
    repository: RenterRepository,
}

impl RenterController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RenterRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateRenterRequest,
    ) -> Result<ApiResponse<Renter>, AppError> {
        request.validate()?;

        if self.repository.email_exists(&request.email).await? {
            return Err(conflict_error("Renter", "email", &request.email));
        }

        let renter = self
            .repository
            .create(request.full_name, request.email, request.phone)
            .await?;

        Ok(ApiResponse::success_with_message(
            renter,
            "Cliente creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Renter, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Renter", &id.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Renter>, AppError> {
        self.repository.list().await
    }
}
