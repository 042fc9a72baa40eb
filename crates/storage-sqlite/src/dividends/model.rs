use diesel::prelude::*;
use uuid::Uuid;

use cartera_core::dividends::{Dividend, DividendUpdate, NewDividend};

use crate::schema::dividends;
use crate::utils::{format_date, now_string, parse_date, parse_decimal, parse_timestamp};

#[derive(Queryable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = dividends)]
pub struct DividendDB {
    pub id: String,
    pub ticker_id: String,
    pub pay_date: String,
    pub amount: String,
    pub currency: String,
    pub market: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = dividends, treat_none_as_null = true)]
pub struct DividendChangeset {
    pub ticker_id: String,
    pub pay_date: String,
    pub amount: String,
    pub currency: String,
    pub market: Option<String>,
    pub updated_at: String,
}

impl From<DividendDB> for Dividend {
    fn from(db: DividendDB) -> Self {
        Dividend {
            pay_date: parse_date(&db.pay_date, "dividends.pay_date"),
            amount: parse_decimal(&db.amount, "dividends.amount"),
            created_at: parse_timestamp(&db.created_at, "dividends.created_at"),
            updated_at: parse_timestamp(&db.updated_at, "dividends.updated_at"),
            id: db.id,
            ticker_id: db.ticker_id,
            currency: db.currency,
            market: db.market,
        }
    }
}

impl From<NewDividend> for DividendDB {
    fn from(new: NewDividend) -> Self {
        let now = now_string();
        DividendDB {
            id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            ticker_id: new.ticker_id,
            pay_date: format_date(new.pay_date),
            amount: new.amount.to_string(),
            currency: new.currency,
            market: new.market,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl From<DividendUpdate> for DividendChangeset {
    fn from(update: DividendUpdate) -> Self {
        DividendChangeset {
            ticker_id: update.ticker_id,
            pay_date: format_date(update.pay_date),
            amount: update.amount.to_string(),
            currency: update.currency,
            market: update.market,
            updated_at: now_string(),
        }
    }
}
