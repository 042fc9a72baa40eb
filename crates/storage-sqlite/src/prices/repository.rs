use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use cartera_core::errors::DatabaseError;
use cartera_core::prices::{HistoricalPrice, NewPrice, PriceRepositoryTrait};
use cartera_core::{Error, Result};

use super::model::HistoricalPriceDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::historical_prices;
use crate::utils::{format_date, parse_date};

#[derive(Clone)]
pub struct PriceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PriceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn upsert_row(
        conn: &mut SqliteConnection,
        row: &HistoricalPriceDB,
    ) -> std::result::Result<usize, diesel::result::Error> {
        diesel::insert_into(historical_prices::table)
            .values(row)
            .on_conflict((historical_prices::ticker_id, historical_prices::price_date))
            .do_update()
            .set((
                historical_prices::price.eq(&row.price),
                historical_prices::source.eq(&row.source),
                historical_prices::updated_at.eq(&row.updated_at),
            ))
            .execute(conn)
    }
}

#[async_trait]
impl PriceRepositoryTrait for PriceRepository {
    fn get_prices_for_ticker(&self, ticker_id: &str) -> Result<Vec<HistoricalPrice>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = historical_prices::table
            .filter(historical_prices::ticker_id.eq(ticker_id))
            .order_by(historical_prices::price_date.asc())
            .load::<HistoricalPriceDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(HistoricalPrice::from).collect())
    }

    fn get_price_on_or_before(
        &self,
        ticker_id: &str,
        date: NaiveDate,
    ) -> Result<Option<HistoricalPrice>> {
        let mut conn = get_connection(&self.pool)?;
        let row = historical_prices::table
            .filter(historical_prices::ticker_id.eq(ticker_id))
            .filter(historical_prices::price_date.le(format_date(date)))
            .order_by(historical_prices::price_date.desc())
            .first::<HistoricalPriceDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(HistoricalPrice::from))
    }

    fn get_last_price_date(&self, ticker_id: &str) -> Result<Option<NaiveDate>> {
        let mut conn = get_connection(&self.pool)?;
        let row: Option<String> = historical_prices::table
            .filter(historical_prices::ticker_id.eq(ticker_id))
            .select(historical_prices::price_date)
            .order_by(historical_prices::price_date.desc())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(|d| parse_date(&d, "historical_prices.price_date")))
    }

    async fn upsert_price(&self, price: NewPrice) -> Result<HistoricalPrice> {
        self.writer
            .exec(move |conn| {
                let row = HistoricalPriceDB::from(price);
                Self::upsert_row(conn, &row).map_err(StorageError::from)?;
                historical_prices::table
                    .find((&row.ticker_id, &row.price_date))
                    .first::<HistoricalPriceDB>(conn)
                    .map(HistoricalPrice::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn upsert_prices(&self, prices: Vec<NewPrice>) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                let mut stored = 0;
                for price in prices {
                    let row = HistoricalPriceDB::from(price);
                    stored += Self::upsert_row(conn, &row).map_err(StorageError::from)?;
                }
                Ok(stored)
            })
            .await
    }

    async fn delete_price(&self, ticker_id: &str, date: NaiveDate) -> Result<()> {
        let ticker_id = ticker_id.to_string();
        self.writer
            .exec(move |conn| {
                let key = (ticker_id.clone(), format_date(date));
                let deleted = diesel::delete(historical_prices::table.find(key))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "price for {} on {}",
                        ticker_id, date
                    ))));
                }
                Ok(())
            })
            .await
    }
}
