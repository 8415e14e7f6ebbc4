//! Category management with guarded deletion.

use crate::error::ApiAdminError;
use crate::models::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use fundi_db::{Service, WorkerService};
use sqlx::PgPool;
use tracing::info;

/// Service for admin category operations, including the catalog lifecycle
/// guard for deletions.
#[derive(Clone)]
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories with their association usage counts.
    pub async fn list(&self) -> Result<Vec<CategoryResponse>, ApiAdminError> {
        let services = Service::list_all(&self.pool).await?;

        let mut rows = Vec::with_capacity(services.len());
        for service in services {
            let count = WorkerService::count_for_service(&self.pool, service.id).await?;
            rows.push(CategoryResponse::from_service(service, count));
        }
        Ok(rows)
    }

    /// Create a category. The name is trimmed and must be non-empty;
    /// uniqueness is a product expectation, not enforced here.
    pub async fn create(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<CategoryResponse, ApiAdminError> {
        let name = Self::normalized_name(&request.name)?;
        let service = Service::create(&self.pool, &name).await?;

        info!(service_id = %service.id, name = %service.name, "Category created");
        Ok(CategoryResponse::from_service(service, 0))
    }

    /// Rename a category.
    ///
    /// Workers registered under the old name keep their denormalized
    /// position label; the rename is display-only going forward.
    pub async fn rename(
        &self,
        id: uuid::Uuid,
        request: UpdateCategoryRequest,
    ) -> Result<CategoryResponse, ApiAdminError> {
        let name = Self::normalized_name(&request.name)?;
        let service = Service::update_name(&self.pool, id, &name)
            .await?
            .ok_or(ApiAdminError::CategoryNotFound)?;

        let count = WorkerService::count_for_service(&self.pool, service.id).await?;
        Ok(CategoryResponse::from_service(service, count))
    }

    /// Delete a category, guarded by its association count.
    ///
    /// The count query runs first; a nonzero count refuses the delete with
    /// the blocking count in the error and mutates nothing. This is
    /// enforced here, above the store, so the caller gets an actionable
    /// rejection instead of a raw foreign-key violation.
    pub async fn delete(&self, id: uuid::Uuid) -> Result<(), ApiAdminError> {
        Service::find_by_id(&self.pool, id)
            .await?
            .ok_or(ApiAdminError::CategoryNotFound)?;

        let count = WorkerService::count_for_service(&self.pool, id).await?;
        if count > 0 {
            return Err(ApiAdminError::CategoryInUse { count });
        }

        let removed = Service::delete(&self.pool, id).await?;
        if removed == 0 {
            return Err(ApiAdminError::CategoryNotFound);
        }

        info!(service_id = %id, "Category deleted");
        Ok(())
    }

    fn normalized_name(name: &str) -> Result<String, ApiAdminError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiAdminError::Validation(
                "Service name is required".to_string(),
            ));
        }
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_name_trims() {
        assert_eq!(
            CategoryService::normalized_name("  plumbing  ").unwrap(),
            "plumbing"
        );
    }

    #[test]
    fn test_normalized_name_rejects_empty() {
        assert!(CategoryService::normalized_name("").is_err());
        assert!(CategoryService::normalized_name("   ").is_err());
    }
}
