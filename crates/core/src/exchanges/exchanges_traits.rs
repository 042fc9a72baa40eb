use super::exchanges_model::{Exchange, NewExchange};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ExchangeRepositoryTrait: Send + Sync {
    fn get_exchange(&self, exchange_id: &str) -> Result<Exchange>;
    fn get_exchanges(&self) -> Result<Vec<Exchange>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Exchange>>;
    async fn create_exchange(&self, new_exchange: NewExchange) -> Result<Exchange>;
    async fn update_exchange(&self, exchange: Exchange) -> Result<Exchange>;
    async fn delete_exchange(&self, exchange_id: &str) -> Result<()>;
}

#[async_trait]
pub trait ExchangeServiceTrait: Send + Sync {
    fn get_exchange(&self, exchange_id: &str) -> Result<Exchange>;
    fn get_exchanges(&self) -> Result<Vec<Exchange>>;
    async fn create_exchange(&self, new_exchange: NewExchange) -> Result<Exchange>;
    async fn update_exchange(&self, exchange: Exchange) -> Result<Exchange>;
    async fn delete_exchange(&self, exchange_id: &str) -> Result<()>;
}
