mod model;
mod repository;

pub use model::PlatformDB;
pub use repository::PlatformRepository;
