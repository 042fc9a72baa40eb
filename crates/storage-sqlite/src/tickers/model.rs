use diesel::prelude::*;
use uuid::Uuid;

use cartera_core::tickers::{NewTicker, Ticker, TickerUpdate};

use crate::schema::tickers;
use crate::utils::{now_string, parse_timestamp};

#[derive(Queryable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = tickers)]
pub struct TickerDB {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub instrument_type: String,
    pub exchange_id: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Changeset for edits; `created_at` is never touched. None clears
/// the column rather than skipping it.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = tickers, treat_none_as_null = true)]
pub struct TickerChangeset {
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub instrument_type: String,
    pub exchange_id: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub is_active: bool,
    pub updated_at: String,
}

impl From<TickerDB> for Ticker {
    fn from(db: TickerDB) -> Self {
        Ticker {
            created_at: parse_timestamp(&db.created_at, "tickers.created_at"),
            updated_at: parse_timestamp(&db.updated_at, "tickers.updated_at"),
            id: db.id,
            symbol: db.symbol,
            name: db.name,
            currency: db.currency,
            instrument_type: db.instrument_type,
            exchange_id: db.exchange_id,
            country: db.country,
            sector: db.sector,
            is_active: db.is_active,
        }
    }
}

impl From<NewTicker> for TickerDB {
    fn from(new: NewTicker) -> Self {
        let now = now_string();
        TickerDB {
            id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            symbol: new.symbol,
            name: new.name,
            currency: new.currency,
            instrument_type: new.instrument_type,
            exchange_id: new.exchange_id,
            country: new.country,
            sector: new.sector,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl From<TickerUpdate> for TickerChangeset {
    fn from(update: TickerUpdate) -> Self {
        TickerChangeset {
            symbol: update.symbol,
            name: update.name,
            currency: update.currency,
            instrument_type: update.instrument_type,
            exchange_id: update.exchange_id,
            country: update.country,
            sector: update.sector,
            is_active: update.is_active,
            updated_at: now_string(),
        }
    }
}
