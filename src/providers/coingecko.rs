use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::{MarketChartProvider, PricePoint, PriceProvider, SpotQuote, Timeframe};

const USER_AGENT: &str = "btcsite/0.1";
const COIN_ID: &str = "bitcoin";
const VS_CURRENCY: &str = "usd";

/// Public CoinGecko endpoints: `simple/price` for the ticker and
/// `coins/{id}/market_chart` for the historical chart. No API key.
pub struct CoinGeckoProvider {
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Self {
        CoinGeckoProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_text(&self, url: &str, what: &str) -> Result<String> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for {} URL: {}", e, what, url))?;

        debug!(status = %response.status(), "Received CoinGecko response");

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for {}", response.status(), what));
        }

        Ok(response.text().await?)
    }
}

#[derive(Debug, Deserialize)]
struct SimplePriceEntry {
    usd: f64,
    usd_24h_change: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoSpotFetch", skip(self))]
    async fn fetch_spot(&self) -> Result<SpotQuote> {
        let url = format!(
            "{}/simple/price?ids={COIN_ID}&vs_currencies={VS_CURRENCY}&include_24hr_change=true",
            self.base_url
        );
        debug!("Requesting spot price from {}", url);

        let text = self.get_text(&url, "spot price").await?;
        let mut data: HashMap<String, SimplePriceEntry> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for spot price: {}", e))?;

        let entry = data
            .remove(COIN_ID)
            .ok_or_else(|| anyhow!("No spot price found for {}", COIN_ID))?;

        Ok(SpotQuote {
            price: entry.usd,
            change_24h: entry.usd_24h_change,
            currency: VS_CURRENCY.to_uppercase(),
        })
    }
}

#[async_trait]
impl MarketChartProvider for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoChartFetch", skip(self), fields(timeframe = %timeframe))]
    async fn fetch_market_chart(&self, timeframe: Timeframe) -> Result<Vec<PricePoint>> {
        let url = format!(
            "{}/coins/{COIN_ID}/market_chart?vs_currency={VS_CURRENCY}&days={}",
            self.base_url,
            timeframe.days()
        );
        debug!("Requesting market chart from {}", url);

        let text = self.get_text(&url, "market chart").await?;
        let data: MarketChartResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for market chart: {}", e))?;

        if data.prices.is_empty() {
            return Err(anyhow!("No market chart data for timeframe: {}", timeframe));
        }

        Ok(data
            .prices
            .into_iter()
            .map(|(timestamp, price)| PricePoint {
                timestamp: timestamp as i64,
                price,
            })
            .collect())
    }
}
