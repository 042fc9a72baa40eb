use super::platforms_model::{NewPlatform, Platform};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PlatformRepositoryTrait: Send + Sync {
    fn get_platform(&self, platform_id: &str) -> Result<Platform>;
    fn get_platforms(&self) -> Result<Vec<Platform>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Platform>>;
    async fn create_platform(&self, new_platform: NewPlatform) -> Result<Platform>;
    async fn update_platform(&self, platform: Platform) -> Result<Platform>;
    async fn delete_platform(&self, platform_id: &str) -> Result<()>;
}

#[async_trait]
pub trait PlatformServiceTrait: Send + Sync {
    fn get_platform(&self, platform_id: &str) -> Result<Platform>;
    fn get_platforms(&self) -> Result<Vec<Platform>>;
    async fn create_platform(&self, new_platform: NewPlatform) -> Result<Platform>;
    async fn update_platform(&self, platform: Platform) -> Result<Platform>;
    async fn delete_platform(&self, platform_id: &str) -> Result<()>;
}
