use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use cartera_core::dividends::{
    Dividend, DividendRepositoryTrait, DividendUpdate, NewDividend,
};
use cartera_core::errors::DatabaseError;
use cartera_core::{Error, Result};

use super::model::{DividendChangeset, DividendDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::dividends;

#[derive(Clone)]
pub struct DividendRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DividendRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl DividendRepositoryTrait for DividendRepository {
    fn get_dividend(&self, dividend_id: &str) -> Result<Dividend> {
        let mut conn = get_connection(&self.pool)?;
        dividends::table
            .find(dividend_id)
            .first::<DividendDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Dividend::from)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(dividend_id.to_string())))
    }

    fn get_dividends(&self) -> Result<Vec<Dividend>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = dividends::table
            .order_by(dividends::pay_date.asc())
            .load::<DividendDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Dividend::from).collect())
    }

    fn get_dividends_by_ticker(&self, ticker_id: &str) -> Result<Vec<Dividend>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = dividends::table
            .filter(dividends::ticker_id.eq(ticker_id))
            .order_by(dividends::pay_date.asc())
            .load::<DividendDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Dividend::from).collect())
    }

    async fn create_dividend(&self, new_dividend: NewDividend) -> Result<Dividend> {
        self.writer
            .exec(move |conn| {
                let row = DividendDB::from(new_dividend);
                diesel::insert_into(dividends::table)
                    .values(&row)
                    .get_result::<DividendDB>(conn)
                    .map(Dividend::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn update_dividend(&self, update: DividendUpdate) -> Result<Dividend> {
        self.writer
            .exec(move |conn| {
                let id = update.id.clone();
                diesel::update(dividends::table.find(&id))
                    .set(DividendChangeset::from(update))
                    .get_result::<DividendDB>(conn)
                    .map(Dividend::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn delete_dividend(&self, dividend_id: &str) -> Result<()> {
        let dividend_id = dividend_id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(dividends::table.find(&dividend_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(dividend_id)));
                }
                Ok(())
            })
            .await
    }
}
