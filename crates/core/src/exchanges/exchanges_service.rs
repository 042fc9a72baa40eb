use std::sync::Arc;

use super::exchanges_model::{Exchange, NewExchange};
use super::exchanges_traits::{ExchangeRepositoryTrait, ExchangeServiceTrait};
use crate::errors::{DatabaseError, ValidationError};
use crate::{Error, Result};
use async_trait::async_trait;

/// Service for managing exchanges.
pub struct ExchangeService {
    exchange_repository: Arc<dyn ExchangeRepositoryTrait>,
}

impl ExchangeService {
    pub fn new(exchange_repository: Arc<dyn ExchangeRepositoryTrait>) -> Self {
        Self {
            exchange_repository,
        }
    }

    fn check_name_available(&self, name: &str, exclude_id: Option<&str>) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if let Some(existing) = self.exchange_repository.find_by_name(name)? {
            if Some(existing.id.as_str()) != exclude_id {
                return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                    "An exchange named '{}' already exists",
                    name
                ))));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ExchangeServiceTrait for ExchangeService {
    fn get_exchange(&self, exchange_id: &str) -> Result<Exchange> {
        self.exchange_repository.get_exchange(exchange_id)
    }

    fn get_exchanges(&self) -> Result<Vec<Exchange>> {
        self.exchange_repository.get_exchanges()
    }

    async fn create_exchange(&self, new_exchange: NewExchange) -> Result<Exchange> {
        self.check_name_available(&new_exchange.name, None)?;
        self.exchange_repository.create_exchange(new_exchange).await
    }

    async fn update_exchange(&self, exchange: Exchange) -> Result<Exchange> {
        self.check_name_available(&exchange.name, Some(&exchange.id))?;
        self.exchange_repository.update_exchange(exchange).await
    }

    async fn delete_exchange(&self, exchange_id: &str) -> Result<()> {
        self.exchange_repository.delete_exchange(exchange_id).await
    }
}
