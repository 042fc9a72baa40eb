use diesel::prelude::*;

use cartera_core::fx::{FxRate, NewFxRate};
use cartera_core::prices::DataSource;

use crate::schema::fx_rates;
use crate::utils::{format_date, now_string, parse_date, parse_decimal, parse_timestamp};

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = fx_rates)]
pub struct FxRateDB {
    pub rate_date: String,
    pub usd_pen: String,
    pub source: String,
    pub updated_at: String,
}

impl From<FxRateDB> for FxRate {
    fn from(db: FxRateDB) -> Self {
        FxRate {
            rate_date: parse_date(&db.rate_date, "fx_rates.rate_date"),
            usd_pen: parse_decimal(&db.usd_pen, "fx_rates.usd_pen"),
            source: DataSource::from(db.source.as_str()),
            updated_at: parse_timestamp(&db.updated_at, "fx_rates.updated_at"),
        }
    }
}

impl From<NewFxRate> for FxRateDB {
    fn from(new: NewFxRate) -> Self {
        FxRateDB {
            rate_date: format_date(new.rate_date),
            usd_pen: new.usd_pen.to_string(),
            source: new.source.as_str().to_string(),
            updated_at: now_string(),
        }
    }
}
