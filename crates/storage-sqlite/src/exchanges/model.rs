use diesel::prelude::*;
use uuid::Uuid;

use cartera_core::exchanges::{Exchange, NewExchange};

use crate::schema::exchanges;
use crate::utils::{now_string, parse_timestamp};

#[derive(Queryable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = exchanges)]
pub struct ExchangeDB {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub default_currency: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ExchangeDB> for Exchange {
    fn from(db: ExchangeDB) -> Self {
        Exchange {
            created_at: parse_timestamp(&db.created_at, "exchanges.created_at"),
            updated_at: parse_timestamp(&db.updated_at, "exchanges.updated_at"),
            id: db.id,
            name: db.name,
            country: db.country,
            default_currency: db.default_currency,
        }
    }
}

impl From<NewExchange> for ExchangeDB {
    fn from(new: NewExchange) -> Self {
        let now = now_string();
        ExchangeDB {
            id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new.name,
            country: new.country,
            default_currency: new.default_currency,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
