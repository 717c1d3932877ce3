//! Controller de la lista de precios de extras

use sqlx::PgPool;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::extra_dto::CreateExtraRequest;
use crate::models::extra::Extra;
use crate::repositories::extra_repository::ExtraRepository;
use crate::utils::errors::AppError;

pub struct ExtraController {
    repository: ExtraRepository,
}

impl ExtraController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ExtraRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateExtraRequest,
    ) -> Result<ApiResponse<Extra>, AppError> {
        request.validate()?;

        let extra = self
            .repository
            .create(request.name, request.description, request.daily_price)
            .await?;

        Ok(ApiResponse::success_with_message(
            extra,
            "Extra creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<Extra>, AppError> {
        self.repository.list().await
    }
}
