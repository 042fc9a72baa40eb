use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use cartera_core::errors::DatabaseError;
use cartera_core::fx::{FxRate, FxRepositoryTrait, NewFxRate};
use cartera_core::{Error, Result};

use super::model::FxRateDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::fx_rates;
use crate::utils::{format_date, parse_date};

#[derive(Clone)]
pub struct FxRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FxRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn upsert_row(
        conn: &mut SqliteConnection,
        row: &FxRateDB,
    ) -> std::result::Result<usize, diesel::result::Error> {
        diesel::insert_into(fx_rates::table)
            .values(row)
            .on_conflict(fx_rates::rate_date)
            .do_update()
            .set((
                fx_rates::usd_pen.eq(&row.usd_pen),
                fx_rates::source.eq(&row.source),
                fx_rates::updated_at.eq(&row.updated_at),
            ))
            .execute(conn)
    }
}

#[async_trait]
impl FxRepositoryTrait for FxRepository {
    fn get_rates(&self) -> Result<Vec<FxRate>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = fx_rates::table
            .order_by(fx_rates::rate_date.asc())
            .load::<FxRateDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(FxRate::from).collect())
    }

    fn get_rate_on_or_before(&self, date: NaiveDate) -> Result<Option<FxRate>> {
        let mut conn = get_connection(&self.pool)?;
        let row = fx_rates::table
            .filter(fx_rates::rate_date.le(format_date(date)))
            .order_by(fx_rates::rate_date.desc())
            .first::<FxRateDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(FxRate::from))
    }

    fn get_last_rate_date(&self) -> Result<Option<NaiveDate>> {
        let mut conn = get_connection(&self.pool)?;
        let row: Option<String> = fx_rates::table
            .select(fx_rates::rate_date)
            .order_by(fx_rates::rate_date.desc())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(|d| parse_date(&d, "fx_rates.rate_date")))
    }

    async fn upsert_rate(&self, rate: NewFxRate) -> Result<FxRate> {
        self.writer
            .exec(move |conn| {
                let row = FxRateDB::from(rate);
                Self::upsert_row(conn, &row).map_err(StorageError::from)?;
                fx_rates::table
                    .find(&row.rate_date)
                    .first::<FxRateDB>(conn)
                    .map(FxRate::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn upsert_rates(&self, rates: Vec<NewFxRate>) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                let mut stored = 0;
                for rate in rates {
                    let row = FxRateDB::from(rate);
                    stored += Self::upsert_row(conn, &row).map_err(StorageError::from)?;
                }
                Ok(stored)
            })
            .await
    }

    async fn delete_rate(&self, date: NaiveDate) -> Result<()> {
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(fx_rates::table.find(format_date(date)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "fx rate for {}",
                        date
                    ))));
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
    use cartera_core::prices::DataSource;
    use rust_decimal_macros::dec;

    async fn setup() -> (tempfile::TempDir, Arc<DbPool>, WriteHandle) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let pool = db::create_pool(db_path.to_str().unwrap()).unwrap();
        db::run_migrations(&pool).unwrap();
        let writer = db::spawn_writer((*pool).clone());
        (dir, pool, writer)
    }

    fn rate(date: (i32, u32, u32), value: rust_decimal::Decimal) -> NewFxRate {
        NewFxRate {
            rate_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            usd_pen: value,
            source: DataSource::Sbs,
        }
    }

    #[tokio::test]
    async fn one_row_per_date_with_upsert() {
        let (_dir, pool, writer) = setup().await;
        let repo = FxRepository::new(pool, writer);

        repo.upsert_rate(rate((2024, 3, 15), dec!(3.70))).await.unwrap();
        let updated = repo.upsert_rate(rate((2024, 3, 15), dec!(3.72))).await.unwrap();

        assert_eq!(updated.usd_pen, dec!(3.72));
        assert_eq!(repo.get_rates().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn on_or_before_ignores_later_rates() {
        let (_dir, pool, writer) = setup().await;
        let repo = FxRepository::new(pool, writer);

        repo.upsert_rates(vec![
            rate((2024, 3, 10), dec!(3.70)),
            rate((2024, 3, 20), dec!(3.90)),
        ])
        .await
        .unwrap();

        let found = repo
            .get_rate_on_or_before(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(found.usd_pen, dec!(3.70));
    }
}
