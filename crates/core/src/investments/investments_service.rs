use std::sync::Arc;

use super::investments_errors::InvestmentError;
use super::investments_model::{Investment, InvestmentUpdate, NewInvestment, OperationType};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
use crate::tickers::TickerRepositoryTrait;
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Service for recording investment/divestment events.
///
/// All invariants are enforced here, at write time. The aggregation
/// layer assumes event lists it reads are already well formed.
pub struct InvestmentService {
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    ticker_repository: Arc<dyn TickerRepositoryTrait>,
}

impl InvestmentService {
    pub fn new(
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        ticker_repository: Arc<dyn TickerRepositoryTrait>,
    ) -> Self {
        Self {
            investment_repository,
            ticker_repository,
        }
    }

    fn validate_signs(
        operation: OperationType,
        amount: Decimal,
        quantity: Decimal,
    ) -> Result<()> {
        if amount.is_zero() || quantity.is_zero() {
            return Err(InvestmentError::InvalidData(
                "amount and quantity must be non-zero".to_string(),
            )
            .into());
        }
        let consistent = match operation {
            OperationType::Investment => {
                amount.is_sign_positive() && quantity.is_sign_positive()
            }
            OperationType::Divestment => {
                amount.is_sign_negative() && quantity.is_sign_negative()
            }
        };
        if !consistent {
            return Err(InvestmentError::InvalidData(format!(
                "amount {} and quantity {} are inconsistent with operation {}",
                amount,
                quantity,
                operation.as_str()
            ))
            .into());
        }
        Ok(())
    }

    /// A divestment may not take the running position negative as of
    /// its date.
    fn validate_position(
        &self,
        ticker_id: &str,
        event_date: NaiveDate,
        quantity: Decimal,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        if quantity.is_sign_positive() {
            return Ok(());
        }
        let available =
            self.investment_repository
                .net_quantity_as_of(ticker_id, event_date, exclude_id)?;
        let requested = -quantity;
        if requested > available {
            return Err(InvestmentError::InsufficientQuantity {
                ticker_id: ticker_id.to_string(),
                date: event_date,
                available,
                requested,
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl InvestmentServiceTrait for InvestmentService {
    fn get_investment(&self, investment_id: &str) -> Result<Investment> {
        self.investment_repository.get_investment(investment_id)
    }

    fn get_investments(&self) -> Result<Vec<Investment>> {
        self.investment_repository.get_investments()
    }

    fn get_investments_by_ticker(&self, ticker_id: &str) -> Result<Vec<Investment>> {
        self.investment_repository.get_investments_by_ticker(ticker_id)
    }

    async fn create_investment(&self, new_investment: NewInvestment) -> Result<Investment> {
        // A missing ticker surfaces as NotFound before anything else.
        self.ticker_repository.get_ticker(&new_investment.ticker_id)?;
        Self::validate_signs(
            new_investment.operation,
            new_investment.amount,
            new_investment.quantity,
        )?;
        self.validate_position(
            &new_investment.ticker_id,
            new_investment.event_date,
            new_investment.quantity,
            None,
        )?;
        self.investment_repository
            .create_investment(new_investment)
            .await
    }

    async fn update_investment(&self, update: InvestmentUpdate) -> Result<Investment> {
        self.ticker_repository.get_ticker(&update.ticker_id)?;
        Self::validate_signs(update.operation, update.amount, update.quantity)?;
        self.validate_position(
            &update.ticker_id,
            update.event_date,
            update.quantity,
            Some(&update.id),
        )?;
        self.investment_repository.update_investment(update).await
    }

    async fn delete_investment(&self, investment_id: &str) -> Result<()> {
        self.investment_repository
            .delete_investment(investment_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DatabaseError;
    use crate::investments::CapitalOrigin;
    use crate::tickers::{NewTicker, Ticker, TickerUpdate};
    use crate::Error;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct FakeInvestmentRepo {
        investments: Mutex<Vec<Investment>>,
    }

    #[async_trait]
    impl InvestmentRepositoryTrait for FakeInvestmentRepo {
        fn get_investment(&self, investment_id: &str) -> Result<Investment> {
            self.investments
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == investment_id)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(investment_id.to_string()).into())
        }

        fn get_investments(&self) -> Result<Vec<Investment>> {
            Ok(self.investments.lock().unwrap().clone())
        }

        fn get_investments_by_ticker(&self, ticker_id: &str) -> Result<Vec<Investment>> {
            Ok(self
                .investments
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.ticker_id == ticker_id)
                .cloned()
                .collect())
        }

        fn count_for_ticker(&self, ticker_id: &str) -> Result<i64> {
            Ok(self.get_investments_by_ticker(ticker_id)?.len() as i64)
        }

        fn net_quantity_as_of(
            &self,
            ticker_id: &str,
            as_of: NaiveDate,
            exclude_id: Option<&str>,
        ) -> Result<Decimal> {
            Ok(self
                .investments
                .lock()
                .unwrap()
                .iter()
                .filter(|i| {
                    i.ticker_id == ticker_id
                        && i.event_date <= as_of
                        && Some(i.id.as_str()) != exclude_id
                })
                .map(|i| i.quantity)
                .sum())
        }

        async fn create_investment(&self, new_investment: NewInvestment) -> Result<Investment> {
            let created = Investment {
                id: new_investment.id.unwrap_or_else(|| "generated".to_string()),
                ticker_id: new_investment.ticker_id,
                event_date: new_investment.event_date,
                amount: new_investment.amount,
                quantity: new_investment.quantity,
                platform_id: new_investment.platform_id,
                exchange_id: new_investment.exchange_id,
                operation: new_investment.operation,
                capital_origin: new_investment.capital_origin,
                notes: new_investment.notes,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.investments.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update_investment(&self, update: InvestmentUpdate) -> Result<Investment> {
            self.get_investment(&update.id)
        }

        async fn delete_investment(&self, investment_id: &str) -> Result<()> {
            self.investments
                .lock()
                .unwrap()
                .retain(|i| i.id != investment_id);
            Ok(())
        }
    }

    struct FakeTickerRepo;

    #[async_trait]
    impl TickerRepositoryTrait for FakeTickerRepo {
        fn get_ticker(&self, ticker_id: &str) -> Result<Ticker> {
            if ticker_id == "missing" {
                return Err(DatabaseError::NotFound(ticker_id.to_string()).into());
            }
            Ok(Ticker {
                id: ticker_id.to_string(),
                symbol: "VOO".to_string(),
                name: "Vanguard S&P 500".to_string(),
                currency: "USD".to_string(),
                instrument_type: "ETF".to_string(),
                exchange_id: None,
                country: None,
                sector: None,
                is_active: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }
        fn get_tickers(&self) -> Result<Vec<Ticker>> {
            Ok(Vec::new())
        }
        fn get_active_tickers(&self) -> Result<Vec<Ticker>> {
            Ok(Vec::new())
        }
        fn find_by_symbol(&self, _symbol: &str) -> Result<Option<Ticker>> {
            Ok(None)
        }
        async fn create_ticker(&self, _new_ticker: NewTicker) -> Result<Ticker> {
            unimplemented!()
        }
        async fn update_ticker(&self, _update: TickerUpdate) -> Result<Ticker> {
            unimplemented!()
        }
        async fn set_active(&self, _ticker_id: &str, _active: bool) -> Result<Ticker> {
            unimplemented!()
        }
        async fn delete_ticker(&self, _ticker_id: &str) -> Result<()> {
            Ok(())
        }
    }

    fn service() -> InvestmentService {
        InvestmentService::new(
            Arc::new(FakeInvestmentRepo {
                investments: Mutex::new(Vec::new()),
            }),
            Arc::new(FakeTickerRepo),
        )
    }

    fn buy(date: (i32, u32, u32), amount: Decimal, quantity: Decimal) -> NewInvestment {
        NewInvestment {
            id: None,
            ticker_id: "t1".to_string(),
            event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount,
            quantity,
            platform_id: None,
            exchange_id: None,
            operation: OperationType::Investment,
            capital_origin: CapitalOrigin::FreshCash,
            notes: None,
        }
    }

    fn sell(date: (i32, u32, u32), amount: Decimal, quantity: Decimal) -> NewInvestment {
        NewInvestment {
            operation: OperationType::Divestment,
            ..buy(date, amount, quantity)
        }
    }

    #[tokio::test]
    async fn rejects_zero_amount() {
        let err = service()
            .create_investment(buy((2024, 1, 1), dec!(0), dec!(10)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Investment(InvestmentError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn rejects_sign_mismatch() {
        // A divestment with positive legs is inconsistent.
        let err = service()
            .create_investment(sell((2024, 1, 1), dec!(500), dec!(5)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Investment(InvestmentError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn rejects_divestment_beyond_position() {
        let svc = service();
        svc.create_investment(buy((2024, 1, 1), dec!(1000), dec!(10)))
            .await
            .unwrap();

        let err = svc
            .create_investment(sell((2024, 2, 1), dec!(-1200), dec!(-12)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Investment(InvestmentError::InsufficientQuantity { .. })
        ));
    }

    #[tokio::test]
    async fn accepts_divestment_within_position() {
        let svc = service();
        svc.create_investment(buy((2024, 1, 1), dec!(1000), dec!(10)))
            .await
            .unwrap();
        assert!(svc
            .create_investment(sell((2024, 2, 1), dec!(-400), dec!(-4)))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn divestment_only_counts_prior_quantity() {
        let svc = service();
        // Position opens in March; a January sale has nothing to sell.
        svc.create_investment(buy((2024, 3, 1), dec!(1000), dec!(10)))
            .await
            .unwrap();
        let err = svc
            .create_investment(sell((2024, 1, 15), dec!(-100), dec!(-1)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Investment(InvestmentError::InsufficientQuantity { .. })
        ));
    }

    #[tokio::test]
    async fn rejects_unknown_ticker() {
        let mut input = buy((2024, 1, 1), dec!(1000), dec!(10));
        input.ticker_id = "missing".to_string();
        let err = service().create_investment(input).await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    }
}
