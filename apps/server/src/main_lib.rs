use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use cartera_core::dividends::{DividendService, DividendServiceTrait};
use cartera_core::exchanges::{ExchangeService, ExchangeServiceTrait};
use cartera_core::fx::{FxService, FxServiceTrait};
use cartera_core::investments::{InvestmentService, InvestmentServiceTrait};
use cartera_core::platforms::{PlatformService, PlatformServiceTrait};
use cartera_core::portfolio::performance::{PerformanceService, PerformanceServiceTrait};
use cartera_core::prices::{
    PriceService, PriceServiceTrait, PriceSyncService, PriceSyncServiceTrait,
};
use cartera_core::tickers::{TickerService, TickerServiceTrait};
use cartera_market_data::{
    AlphaVantageProvider, BvlProvider, PolygonProvider, PriceProvider, ProviderChain,
    SbsProvider, YahooProvider,
};
use cartera_storage_sqlite::dividends::DividendRepository;
use cartera_storage_sqlite::exchanges::ExchangeRepository;
use cartera_storage_sqlite::fx::FxRepository;
use cartera_storage_sqlite::investments::InvestmentRepository;
use cartera_storage_sqlite::platforms::PlatformRepository;
use cartera_storage_sqlite::prices::PriceRepository;
use cartera_storage_sqlite::tickers::TickerRepository;
use cartera_storage_sqlite::{db, spawn_writer};

pub struct AppState {
    pub ticker_service: Arc<dyn TickerServiceTrait>,
    pub platform_service: Arc<dyn PlatformServiceTrait>,
    pub exchange_service: Arc<dyn ExchangeServiceTrait>,
    pub investment_service: Arc<dyn InvestmentServiceTrait>,
    pub dividend_service: Arc<dyn DividendServiceTrait>,
    pub price_service: Arc<dyn PriceServiceTrait>,
    pub price_sync_service: Arc<dyn PriceSyncServiceTrait>,
    pub fx_service: Arc<dyn FxServiceTrait>,
    pub performance_service: Arc<dyn PerformanceServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("CARTERA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let ticker_repo = Arc::new(TickerRepository::new(pool.clone(), writer.clone()));
    let platform_repo = Arc::new(PlatformRepository::new(pool.clone(), writer.clone()));
    let exchange_repo = Arc::new(ExchangeRepository::new(pool.clone(), writer.clone()));
    let investment_repo = Arc::new(InvestmentRepository::new(pool.clone(), writer.clone()));
    let dividend_repo = Arc::new(DividendRepository::new(pool.clone(), writer.clone()));
    let price_repo = Arc::new(PriceRepository::new(pool.clone(), writer.clone()));
    let fx_repo = Arc::new(FxRepository::new(pool.clone(), writer.clone()));

    // Price providers, tried in priority order. Keyless providers are
    // always present; the paid ones only join when configured.
    let mut providers: Vec<Arc<dyn PriceProvider>> = Vec::new();
    if let Some(key) = &config.polygon_api_key {
        providers.push(Arc::new(PolygonProvider::new(key.clone())));
    }
    if let Some(key) = &config.alpha_vantage_api_key {
        providers.push(Arc::new(AlphaVantageProvider::new(key.clone())));
    }
    providers.push(Arc::new(YahooProvider::new()));
    providers.push(Arc::new(BvlProvider::new()));
    let chain = ProviderChain::new(providers);

    let ticker_service = Arc::new(TickerService::new(
        ticker_repo.clone(),
        investment_repo.clone(),
    ));
    let platform_service = Arc::new(PlatformService::new(platform_repo.clone()));
    let exchange_service = Arc::new(ExchangeService::new(exchange_repo.clone()));
    let investment_service = Arc::new(InvestmentService::new(
        investment_repo.clone(),
        ticker_repo.clone(),
    ));
    let dividend_service = Arc::new(DividendService::new(
        dividend_repo.clone(),
        ticker_repo.clone(),
    ));
    let price_service = Arc::new(PriceService::new(price_repo.clone(), ticker_repo.clone()));
    let price_sync_service = Arc::new(PriceSyncService::new(
        chain,
        ticker_repo.clone(),
        price_repo.clone(),
    ));
    let fx_service = Arc::new(FxService::new(fx_repo.clone(), Arc::new(SbsProvider::new())));
    let performance_service = Arc::new(PerformanceService::new(
        ticker_repo.clone(),
        investment_repo.clone(),
        dividend_repo.clone(),
        price_repo.clone(),
        fx_repo.clone(),
    ));

    Ok(Arc::new(AppState {
        ticker_service,
        platform_service,
        exchange_service,
        investment_service,
        dividend_service,
        price_service,
        price_sync_service,
        fx_service,
        performance_service,
        db_path,
    }))
}
