mod model;
mod repository;

pub use model::FxRateDB;
pub use repository::FxRepository;
