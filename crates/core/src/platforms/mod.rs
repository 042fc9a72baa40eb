//! Platforms module - where a trade was executed (broker/app).

mod platforms_model;
mod platforms_service;
mod platforms_traits;

pub use platforms_model::{NewPlatform, Platform};
pub use platforms_service::PlatformService;
pub use platforms_traits::{PlatformRepositoryTrait, PlatformServiceTrait};
