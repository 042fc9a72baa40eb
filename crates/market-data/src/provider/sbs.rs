//! SBS (Superintendencia de Banca y Seguros del Perú) FX provider.
//!
//! Daily USD/PEN reference rates. The SBS publishes one "venta" and one
//! "compra" figure per business day; the venta rate is stored, matching
//! what the rest of the system expects from a USD/PEN quote.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::ProviderFxRate;
use crate::provider::traits::FxRateProvider;

const BASE_URL: &str = "https://www.sbs.gob.pe/app/pp/SISTIP_PORTAL/Paginas/Publicacion/api/TipoCambio";
const PROVIDER_ID: &str = "SBS";

pub struct SbsProvider {
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateResponse {
    items: Option<Vec<RateRow>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateRow {
    /// Publication date, "dd/mm/YYYY".
    fecha: String,
    venta: Option<Decimal>,
}

impl SbsProvider {
    pub fn new() -> Self {
        SbsProvider {
            client: Client::new(),
        }
    }

    fn collect(rows: Vec<RateRow>, start: NaiveDate, end: NaiveDate) -> Vec<ProviderFxRate> {
        let mut rates: Vec<ProviderFxRate> = rows
            .into_iter()
            .filter_map(|row| {
                let date = NaiveDate::parse_from_str(&row.fecha, "%d/%m/%Y").ok()?;
                if date < start || date > end {
                    return None;
                }
                Some(ProviderFxRate {
                    date,
                    rate: row.venta?,
                })
            })
            .collect();
        rates.sort_by_key(|r| r.date);
        rates
    }
}

impl Default for SbsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FxRateProvider for SbsProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn usd_pen_rates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProviderFxRate>, MarketDataError> {
        debug!("SBS request: USD/PEN [{} - {}]", start, end);
        let body: RateResponse = self
            .client
            .get(BASE_URL)
            .query(&[
                ("fechaInicio", start.format("%d/%m/%Y").to_string()),
                ("fechaFin", end.format("%d/%m/%Y").to_string()),
                ("moneda", "02".to_string()),
            ])
            .send()
            .await
            .map_err(|e| MarketDataError::from_request(PROVIDER_ID, e))?
            .json()
            .await
            .map_err(|e| MarketDataError::ParseError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        let rows = body
            .items
            .ok_or_else(|| MarketDataError::NoData("USD/PEN".to_string()))?;
        Ok(Self::collect(rows, start, end))
    }
}
