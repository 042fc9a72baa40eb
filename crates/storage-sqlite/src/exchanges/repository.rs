use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use cartera_core::errors::DatabaseError;
use cartera_core::exchanges::{Exchange, ExchangeRepositoryTrait, NewExchange};
use cartera_core::{Error, Result};

use super::model::ExchangeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::exchanges;
use crate::utils::now_string;

#[derive(Clone)]
pub struct ExchangeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExchangeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ExchangeRepositoryTrait for ExchangeRepository {
    fn get_exchange(&self, exchange_id: &str) -> Result<Exchange> {
        let mut conn = get_connection(&self.pool)?;
        exchanges::table
            .find(exchange_id)
            .first::<ExchangeDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Exchange::from)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(exchange_id.to_string())))
    }

    fn get_exchanges(&self) -> Result<Vec<Exchange>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = exchanges::table
            .order_by(exchanges::name.asc())
            .load::<ExchangeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Exchange::from).collect())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Exchange>> {
        let mut conn = get_connection(&self.pool)?;
        let row = exchanges::table
            .filter(exchanges::name.eq(name))
            .first::<ExchangeDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Exchange::from))
    }

    async fn create_exchange(&self, new_exchange: NewExchange) -> Result<Exchange> {
        self.writer
            .exec(move |conn| {
                let row = ExchangeDB::from(new_exchange);
                diesel::insert_into(exchanges::table)
                    .values(&row)
                    .get_result::<ExchangeDB>(conn)
                    .map(Exchange::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn update_exchange(&self, exchange: Exchange) -> Result<Exchange> {
        self.writer
            .exec(move |conn| {
                diesel::update(exchanges::table.find(&exchange.id))
                    .set((
                        exchanges::name.eq(&exchange.name),
                        exchanges::country.eq(&exchange.country),
                        exchanges::default_currency.eq(&exchange.default_currency),
                        exchanges::updated_at.eq(now_string()),
                    ))
                    .get_result::<ExchangeDB>(conn)
                    .map(Exchange::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn delete_exchange(&self, exchange_id: &str) -> Result<()> {
        let exchange_id = exchange_id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(exchanges::table.find(&exchange_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(exchange_id)));
                }
                Ok(())
            })
            .await
    }
}
