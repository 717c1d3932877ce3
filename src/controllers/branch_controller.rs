//! Controller del catálogo de sucursales

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::branch_dto::CreateBranchRequest;
use crate::dto::common::ApiResponse;
use crate::models::branch::Branch;
use crate::repositories::branch_repository::BranchRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct BranchController {
    repository: BranchRepository,
}

impl BranchController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BranchRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateBranchRequest,
    ) -> Result<ApiResponse<Branch>, AppError> {
        request.validate()?;

        let branch = self
            .repository
            .create(request.name, request.city, request.address)
            .await?;

        Ok(ApiResponse::success_with_message(
            branch,
            "Sucursal creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Branch, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Branch", &id.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Branch>, AppError> {
        self.repository.list().await
    }
}
