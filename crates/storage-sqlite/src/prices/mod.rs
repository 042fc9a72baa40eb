mod model;
mod repository;

pub use model::HistoricalPriceDB;
pub use repository::PriceRepository;
