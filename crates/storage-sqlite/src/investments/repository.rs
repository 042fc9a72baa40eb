use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;

use cartera_core::errors::DatabaseError;
use cartera_core::investments::{
    Investment, InvestmentRepositoryTrait, InvestmentUpdate, NewInvestment,
};
use cartera_core::{Error, Result};

use super::model::{InvestmentChangeset, InvestmentDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::investments;
use crate::utils::{format_date, parse_decimal};

#[derive(Clone)]
pub struct InvestmentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvestmentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn get_investment(&self, investment_id: &str) -> Result<Investment> {
        let mut conn = get_connection(&self.pool)?;
        investments::table
            .find(investment_id)
            .first::<InvestmentDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Investment::from)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(investment_id.to_string())))
    }

    fn get_investments(&self) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investments::table
            .order_by((investments::event_date.asc(), investments::created_at.asc()))
            .load::<InvestmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Investment::from).collect())
    }

    fn get_investments_by_ticker(&self, ticker_id: &str) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investments::table
            .filter(investments::ticker_id.eq(ticker_id))
            .order_by((investments::event_date.asc(), investments::created_at.asc()))
            .load::<InvestmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Investment::from).collect())
    }

    fn count_for_ticker(&self, ticker_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        investments::table
            .filter(investments::ticker_id.eq(ticker_id))
            .count()
            .get_result(&mut conn)
            .map_err(|e| StorageError::from(e).into())
    }

    fn net_quantity_as_of(
        &self,
        ticker_id: &str,
        as_of: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        // Quantities are stored as text, so the sum happens here.
        // ISO dates compare correctly as strings.
        let mut query = investments::table
            .filter(investments::ticker_id.eq(ticker_id))
            .filter(investments::event_date.le(format_date(as_of)))
            .select(investments::quantity)
            .into_boxed();
        if let Some(exclude) = exclude_id {
            query = query.filter(investments::id.ne(exclude.to_string()));
        }
        let quantities: Vec<String> = query.load(&mut conn).map_err(StorageError::from)?;
        Ok(quantities
            .iter()
            .map(|q| parse_decimal(q, "investments.quantity"))
            .sum())
    }

    async fn create_investment(&self, new_investment: NewInvestment) -> Result<Investment> {
        self.writer
            .exec(move |conn| {
                let row = InvestmentDB::from(new_investment);
                diesel::insert_into(investments::table)
                    .values(&row)
                    .get_result::<InvestmentDB>(conn)
                    .map(Investment::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn update_investment(&self, update: InvestmentUpdate) -> Result<Investment> {
        self.writer
            .exec(move |conn| {
                let id = update.id.clone();
                diesel::update(investments::table.find(&id))
                    .set(InvestmentChangeset::from(update))
                    .get_result::<InvestmentDB>(conn)
                    .map(Investment::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn delete_investment(&self, investment_id: &str) -> Result<()> {
        let investment_id = investment_id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(investments::table.find(&investment_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(investment_id)));
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
    use crate::tickers::TickerRepository;
    use cartera_core::investments::{CapitalOrigin, OperationType};
    use cartera_core::tickers::{NewTicker, TickerRepositoryTrait};
    use rust_decimal_macros::dec;

    async fn setup() -> (tempfile::TempDir, Arc<DbPool>, WriteHandle, String) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let pool = db::create_pool(db_path.to_str().unwrap()).unwrap();
        db::run_migrations(&pool).unwrap();
        let writer = db::spawn_writer((*pool).clone());

        let ticker_repo = TickerRepository::new(pool.clone(), writer.clone());
        let ticker = ticker_repo
            .create_ticker(NewTicker {
                id: None,
                symbol: "VOO".to_string(),
                name: "Vanguard S&P 500".to_string(),
                currency: "USD".to_string(),
                instrument_type: "ETF".to_string(),
                exchange_id: None,
                country: Some("US".to_string()),
                sector: None,
            })
            .await
            .unwrap();

        (dir, pool, writer, ticker.id)
    }

    fn event(
        ticker_id: &str,
        date: (i32, u32, u32),
        amount: Decimal,
        quantity: Decimal,
    ) -> NewInvestment {
        NewInvestment {
            id: None,
            ticker_id: ticker_id.to_string(),
            event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount,
            quantity,
            platform_id: None,
            exchange_id: None,
            operation: if amount.is_sign_positive() {
                OperationType::Investment
            } else {
                OperationType::Divestment
            },
            capital_origin: CapitalOrigin::FreshCash,
            notes: None,
        }
    }

    #[tokio::test]
    async fn round_trips_signed_decimals_and_dates() {
        let (_dir, pool, writer, ticker_id) = setup().await;
        let repo = InvestmentRepository::new(pool, writer);

        let created = repo
            .create_investment(event(&ticker_id, (2024, 1, 15), dec!(1050.25), dec!(10.5)))
            .await
            .unwrap();

        let fetched = repo.get_investment(&created.id).unwrap();
        assert_eq!(fetched.amount, dec!(1050.25));
        assert_eq!(fetched.quantity, dec!(10.5));
        assert_eq!(
            fetched.event_date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(fetched.operation, OperationType::Investment);
    }

    #[tokio::test]
    async fn net_quantity_honors_date_and_exclusion() {
        let (_dir, pool, writer, ticker_id) = setup().await;
        let repo = InvestmentRepository::new(pool, writer);

        repo.create_investment(event(&ticker_id, (2024, 1, 10), dec!(1000), dec!(10)))
            .await
            .unwrap();
        let sale = repo
            .create_investment(event(&ticker_id, (2024, 2, 10), dec!(-400), dec!(-4)))
            .await
            .unwrap();
        repo.create_investment(event(&ticker_id, (2024, 3, 10), dec!(500), dec!(5)))
            .await
            .unwrap();

        let as_of_feb = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert_eq!(
            repo.net_quantity_as_of(&ticker_id, as_of_feb, None).unwrap(),
            dec!(6)
        );
        // Excluding the sale reverts to the original ten units.
        assert_eq!(
            repo.net_quantity_as_of(&ticker_id, as_of_feb, Some(&sale.id))
                .unwrap(),
            dec!(10)
        );
    }

    #[tokio::test]
    async fn foreign_key_rejects_unknown_ticker() {
        let (_dir, pool, writer, _ticker_id) = setup().await;
        let repo = InvestmentRepository::new(pool, writer);

        let err = repo
            .create_investment(event("ghost", (2024, 1, 1), dec!(100), dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
    }
}
