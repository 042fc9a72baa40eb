//! Priority-ordered provider chain.
//!
//! Providers are tried one at a time in fixed priority order. Every
//! attempt is recorded; the first provider that returns rows wins and
//! the rest are not called. Exhausting the chain is a soft "no data"
//! outcome, not an error.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::models::{FetchReport, PriceRequest, ProviderAttempt};
use crate::provider::PriceProvider;

/// Pause between remote calls, to stay clear of free-tier rate limits.
pub const DEFAULT_CALL_DELAY: Duration = Duration::from_millis(1200);

pub struct ProviderChain {
    providers: Vec<Arc<dyn PriceProvider>>,
    call_delay: Duration,
}

impl ProviderChain {
    pub fn new(mut providers: Vec<Arc<dyn PriceProvider>>) -> Self {
        providers.sort_by_key(|p| p.priority());
        ProviderChain {
            providers,
            call_delay: DEFAULT_CALL_DELAY,
        }
    }

    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = delay;
        self
    }

    /// Walks the chain for one symbol. Providers that do not support
    /// the request are skipped without an attempt record.
    pub async fn fetch_historical(&self, request: &PriceRequest) -> FetchReport {
        let mut report = FetchReport::empty(&request.symbol);
        let mut called_before = false;

        for provider in &self.providers {
            if !provider.supports(request) {
                debug!("{}: skipping {}", request.symbol, provider.id());
                continue;
            }

            if called_before && !self.call_delay.is_zero() {
                tokio::time::sleep(self.call_delay).await;
            }
            called_before = true;

            match provider.historical_prices(request).await {
                Ok(prices) if !prices.is_empty() => {
                    report.attempts.push(ProviderAttempt {
                        provider: provider.id().to_string(),
                        success: true,
                        error: None,
                        prices_fetched: prices.len(),
                    });
                    report.source = Some(provider.id().to_string());
                    report.prices = prices;
                    return report;
                }
                Ok(_) => {
                    report.attempts.push(ProviderAttempt {
                        provider: provider.id().to_string(),
                        success: false,
                        error: Some("no rows in range".to_string()),
                        prices_fetched: 0,
                    });
                }
                Err(err) => {
                    warn!("{}: {} failed: {}", request.symbol, provider.id(), err);
                    report.attempts.push(ProviderAttempt {
                        provider: provider.id().to_string(),
                        success: false,
                        error: Some(err.to_string()),
                        prices_fetched: 0,
                    });
                }
            }
        }

        report
    }
}
