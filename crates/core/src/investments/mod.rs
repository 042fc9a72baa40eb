//! Investments module - the cash-flow events the analytics run on.

mod cash_flow;
mod investments_errors;
mod investments_model;
mod investments_service;
mod investments_traits;

pub use cash_flow::{extract_cash_flows, CashFlow};
pub use investments_errors::InvestmentError;
pub use investments_model::{
    CapitalOrigin, Investment, InvestmentUpdate, NewInvestment, OperationType,
};
pub use investments_service::InvestmentService;
pub use investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
