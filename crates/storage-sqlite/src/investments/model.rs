use diesel::prelude::*;
use log::error;
use uuid::Uuid;

use cartera_core::investments::{
    CapitalOrigin, Investment, InvestmentUpdate, NewInvestment, OperationType,
};

use crate::schema::investments;
use crate::utils::{format_date, now_string, parse_date, parse_decimal, parse_timestamp};

#[derive(Queryable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = investments)]
pub struct InvestmentDB {
    pub id: String,
    pub ticker_id: String,
    pub event_date: String,
    pub amount: String,
    pub quantity: String,
    pub platform_id: Option<String>,
    pub exchange_id: Option<String>,
    pub operation: String,
    pub capital_origin: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = investments, treat_none_as_null = true)]
pub struct InvestmentChangeset {
    pub ticker_id: String,
    pub event_date: String,
    pub amount: String,
    pub quantity: String,
    pub platform_id: Option<String>,
    pub exchange_id: Option<String>,
    pub operation: String,
    pub capital_origin: String,
    pub notes: Option<String>,
    pub updated_at: String,
}

impl From<InvestmentDB> for Investment {
    fn from(db: InvestmentDB) -> Self {
        let operation = OperationType::from_str_db(&db.operation).unwrap_or_else(|| {
            error!("Unknown operation '{}' on investment {}", db.operation, db.id);
            OperationType::Investment
        });
        let capital_origin =
            CapitalOrigin::from_str_db(&db.capital_origin).unwrap_or_else(|| {
                error!(
                    "Unknown capital origin '{}' on investment {}",
                    db.capital_origin, db.id
                );
                CapitalOrigin::FreshCash
            });
        Investment {
            event_date: parse_date(&db.event_date, "investments.event_date"),
            amount: parse_decimal(&db.amount, "investments.amount"),
            quantity: parse_decimal(&db.quantity, "investments.quantity"),
            created_at: parse_timestamp(&db.created_at, "investments.created_at"),
            updated_at: parse_timestamp(&db.updated_at, "investments.updated_at"),
            operation,
            capital_origin,
            id: db.id,
            ticker_id: db.ticker_id,
            platform_id: db.platform_id,
            exchange_id: db.exchange_id,
            notes: db.notes,
        }
    }
}

impl From<NewInvestment> for InvestmentDB {
    fn from(new: NewInvestment) -> Self {
        let now = now_string();
        InvestmentDB {
            id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            ticker_id: new.ticker_id,
            event_date: format_date(new.event_date),
            amount: new.amount.to_string(),
            quantity: new.quantity.to_string(),
            platform_id: new.platform_id,
            exchange_id: new.exchange_id,
            operation: new.operation.as_str().to_string(),
            capital_origin: new.capital_origin.as_str().to_string(),
            notes: new.notes,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl From<InvestmentUpdate> for InvestmentChangeset {
    fn from(update: InvestmentUpdate) -> Self {
        InvestmentChangeset {
            ticker_id: update.ticker_id,
            event_date: format_date(update.event_date),
            amount: update.amount.to_string(),
            quantity: update.quantity.to_string(),
            platform_id: update.platform_id,
            exchange_id: update.exchange_id,
            operation: update.operation.as_str().to_string(),
            capital_origin: update.capital_origin.as_str().to_string(),
            notes: update.notes,
            updated_at: now_string(),
        }
    }
}
