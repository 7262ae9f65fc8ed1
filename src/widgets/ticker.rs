use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::WidgetState;
use super::poller::{PollHandle, spawn_poller};
use crate::core::PriceProvider;
use crate::core::metrics::{format_change, format_usd};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerView {
    pub price: f64,
    pub price_display: String,
    pub change_24h: Option<f64>,
    pub change_display: Option<String>,
    pub currency: String,
    pub updated_at: DateTime<Utc>,
}

/// Live price widget. Holds the latest view in memory and refreshes it on a
/// timer once activated. A failed refresh clears the view and sets the error
/// flag; there is no synthetic fallback for the ticker.
#[derive(Clone)]
pub struct PriceTicker {
    provider: Arc<dyn PriceProvider>,
    state: Arc<RwLock<WidgetState<TickerView>>>,
}

impl PriceTicker {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        PriceTicker {
            provider,
            state: Arc::new(RwLock::new(WidgetState::loading())),
        }
    }

    pub async fn refresh(&self) {
        let next = match self.provider.fetch_spot().await {
            Ok(quote) => {
                debug!(price = quote.price, "Ticker refreshed");
                WidgetState::ready(TickerView {
                    price: quote.price,
                    price_display: format_usd(quote.price),
                    change_24h: quote.change_24h,
                    change_display: quote.change_24h.map(format_change),
                    currency: quote.currency,
                    updated_at: Utc::now(),
                })
            }
            Err(e) => {
                warn!(error = %e, "Ticker refresh failed");
                WidgetState::failed()
            }
        };
        *self.state.write().await = next;
    }

    pub async fn snapshot(&self) -> WidgetState<TickerView> {
        self.state.read().await.clone()
    }

    /// Latest view for a page load. A failed state is fetched again first,
    /// so reloading the page retries the ticker.
    pub async fn current(&self) -> WidgetState<TickerView> {
        let state = self.snapshot().await;
        if !state.error {
            return state;
        }
        debug!("Retrying failed ticker");
        self.refresh().await;
        self.snapshot().await
    }

    /// Starts polling: one refresh now, then one per `period`.
    pub fn activate(&self, period: Duration) -> PollHandle {
        debug!(period_secs = period.as_secs(), "Activating price ticker");
        let ticker = self.clone();
        spawn_poller(period, move || {
            let ticker = ticker.clone();
            async move { ticker.refresh().await }
        })
    }
}
