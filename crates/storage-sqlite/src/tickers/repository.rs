use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use cartera_core::errors::DatabaseError;
use cartera_core::tickers::{NewTicker, Ticker, TickerRepositoryTrait, TickerUpdate};
use cartera_core::{Error, Result};

use super::model::{TickerChangeset, TickerDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::tickers;
use crate::utils::now_string;

#[derive(Clone)]
pub struct TickerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TickerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TickerRepositoryTrait for TickerRepository {
    fn get_ticker(&self, ticker_id: &str) -> Result<Ticker> {
        let mut conn = get_connection(&self.pool)?;
        tickers::table
            .find(ticker_id)
            .first::<TickerDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Ticker::from)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(ticker_id.to_string())))
    }

    fn get_tickers(&self) -> Result<Vec<Ticker>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tickers::table
            .order_by(tickers::symbol.asc())
            .load::<TickerDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Ticker::from).collect())
    }

    fn get_active_tickers(&self) -> Result<Vec<Ticker>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tickers::table
            .filter(tickers::is_active.eq(true))
            .order_by(tickers::symbol.asc())
            .load::<TickerDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Ticker::from).collect())
    }

    fn find_by_symbol(&self, symbol: &str) -> Result<Option<Ticker>> {
        let mut conn = get_connection(&self.pool)?;
        // Prefer the active row when an inactive duplicate exists.
        let row = tickers::table
            .filter(tickers::symbol.eq(symbol))
            .order_by(tickers::is_active.desc())
            .first::<TickerDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Ticker::from))
    }

    async fn create_ticker(&self, new_ticker: NewTicker) -> Result<Ticker> {
        self.writer
            .exec(move |conn| {
                let row = TickerDB::from(new_ticker);
                diesel::insert_into(tickers::table)
                    .values(&row)
                    .get_result::<TickerDB>(conn)
                    .map(Ticker::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn update_ticker(&self, update: TickerUpdate) -> Result<Ticker> {
        self.writer
            .exec(move |conn| {
                let id = update.id.clone();
                diesel::update(tickers::table.find(&id))
                    .set(TickerChangeset::from(update))
                    .get_result::<TickerDB>(conn)
                    .map(Ticker::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn set_active(&self, ticker_id: &str, active: bool) -> Result<Ticker> {
        let ticker_id = ticker_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::update(tickers::table.find(&ticker_id))
                    .set((
                        tickers::is_active.eq(active),
                        tickers::updated_at.eq(now_string()),
                    ))
                    .get_result::<TickerDB>(conn)
                    .map(Ticker::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn delete_ticker(&self, ticker_id: &str) -> Result<()> {
        let ticker_id = ticker_id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(tickers::table.find(&ticker_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(ticker_id)));
                }
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn setup() -> (tempfile::TempDir, Arc<DbPool>, WriteHandle) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let pool = db::create_pool(db_path.to_str().unwrap()).unwrap();
        db::run_migrations(&pool).unwrap();
        let writer = db::spawn_writer((*pool).clone());
        (dir, pool, writer)
    }

    fn new_ticker(symbol: &str) -> NewTicker {
        NewTicker {
            id: None,
            symbol: symbol.to_string(),
            name: format!("{} Inc", symbol),
            currency: "USD".to_string(),
            instrument_type: "STOCK".to_string(),
            exchange_id: None,
            country: Some("US".to_string()),
            sector: None,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_round_trip() {
        let (_dir, pool, writer) = setup().await;
        let repo = TickerRepository::new(pool, writer);

        let created = repo.create_ticker(new_ticker("AAPL")).await.unwrap();
        let fetched = repo.get_ticker(&created.id).unwrap();
        assert_eq!(fetched.symbol, "AAPL");
        assert!(fetched.is_active);

        let found = repo.find_by_symbol("AAPL").unwrap();
        assert_eq!(found.map(|t| t.id), Some(created.id));
    }

    #[tokio::test]
    async fn migration_seeds_benchmark_indices() {
        let (_dir, pool, writer) = setup().await;
        let repo = TickerRepository::new(pool, writer);

        let sp500 = repo.find_by_symbol("^GSPC").unwrap().unwrap();
        assert_eq!(sp500.instrument_type, "INDEX");
        assert!(repo.find_by_symbol("^SPBLPGPT").unwrap().is_some());
    }

    #[tokio::test]
    async fn deactivate_keeps_row() {
        let (_dir, pool, writer) = setup().await;
        let repo = TickerRepository::new(pool, writer);

        let created = repo.create_ticker(new_ticker("VOO")).await.unwrap();
        repo.set_active(&created.id, false).await.unwrap();

        let fetched = repo.get_ticker(&created.id).unwrap();
        assert!(!fetched.is_active);
        assert!(!repo
            .get_active_tickers()
            .unwrap()
            .iter()
            .any(|t| t.id == created.id));
    }

    #[tokio::test]
    async fn delete_missing_ticker_is_not_found() {
        let (_dir, pool, writer) = setup().await;
        let repo = TickerRepository::new(pool, writer);
        let err = repo.delete_ticker("nope").await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    }
}
