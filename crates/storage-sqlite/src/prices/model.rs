use diesel::prelude::*;

use cartera_core::prices::{DataSource, HistoricalPrice, NewPrice};

use crate::schema::historical_prices;
use crate::utils::{format_date, now_string, parse_date, parse_decimal, parse_timestamp};

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = historical_prices)]
pub struct HistoricalPriceDB {
    pub ticker_id: String,
    pub price_date: String,
    pub price: String,
    pub source: String,
    pub updated_at: String,
}

impl From<HistoricalPriceDB> for HistoricalPrice {
    fn from(db: HistoricalPriceDB) -> Self {
        HistoricalPrice {
            price_date: parse_date(&db.price_date, "historical_prices.price_date"),
            price: parse_decimal(&db.price, "historical_prices.price"),
            source: DataSource::from(db.source.as_str()),
            updated_at: parse_timestamp(&db.updated_at, "historical_prices.updated_at"),
            ticker_id: db.ticker_id,
        }
    }
}

impl From<NewPrice> for HistoricalPriceDB {
    fn from(new: NewPrice) -> Self {
        HistoricalPriceDB {
            ticker_id: new.ticker_id,
            price_date: format_date(new.price_date),
            price: new.price.to_string(),
            source: new.source.as_str().to_string(),
            updated_at: now_string(),
        }
    }
}
