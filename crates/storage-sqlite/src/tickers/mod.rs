mod model;
mod repository;

pub use model::TickerDB;
pub use repository::TickerRepository;
