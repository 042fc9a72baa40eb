use std::sync::Arc;

use super::platforms_model::{NewPlatform, Platform};
use super::platforms_traits::{PlatformRepositoryTrait, PlatformServiceTrait};
use crate::errors::{DatabaseError, ValidationError};
use crate::{Error, Result};
use async_trait::async_trait;

/// Service for managing trading platforms.
pub struct PlatformService {
    platform_repository: Arc<dyn PlatformRepositoryTrait>,
}

impl PlatformService {
    pub fn new(platform_repository: Arc<dyn PlatformRepositoryTrait>) -> Self {
        Self {
            platform_repository,
        }
    }

    fn check_name_available(&self, name: &str, exclude_id: Option<&str>) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if let Some(existing) = self.platform_repository.find_by_name(name)? {
            if Some(existing.id.as_str()) != exclude_id {
                return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                    "A platform named '{}' already exists",
                    name
                ))));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PlatformServiceTrait for PlatformService {
    fn get_platform(&self, platform_id: &str) -> Result<Platform> {
        self.platform_repository.get_platform(platform_id)
    }

    fn get_platforms(&self) -> Result<Vec<Platform>> {
        self.platform_repository.get_platforms()
    }

    async fn create_platform(&self, new_platform: NewPlatform) -> Result<Platform> {
        self.check_name_available(&new_platform.name, None)?;
        self.platform_repository.create_platform(new_platform).await
    }

    async fn update_platform(&self, platform: Platform) -> Result<Platform> {
        self.check_name_available(&platform.name, Some(&platform.id))?;
        self.platform_repository.update_platform(platform).await
    }

    async fn delete_platform(&self, platform_id: &str) -> Result<()> {
        // Referencing investments keep the row alive via FK; the storage
        // layer surfaces that as a ForeignKeyViolation.
        self.platform_repository.delete_platform(platform_id).await
    }
}
