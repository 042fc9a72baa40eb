mod model;
mod repository;

pub use model::ExchangeDB;
pub use repository::ExchangeRepository;
