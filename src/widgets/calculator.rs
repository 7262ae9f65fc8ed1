//! "What if you had bought bitcoin instead of the season pass?"

use serde::Serialize;
use tracing::warn;

use super::WidgetState;
use crate::core::PriceProvider;
use crate::core::metrics::{format_change, format_usd, percent_change};

/// Season pass price for a year next to the approximate BTC price on the
/// day passes went on sale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PassYear {
    pub year: u16,
    pub pass_price: f64,
    pub btc_price: f64,
}

pub const PASS_HISTORY: &[PassYear] = &[
    PassYear {
        year: 2016,
        pass_price: 849.0,
        btc_price: 430.0,
    },
    PassYear {
        year: 2017,
        pass_price: 899.0,
        btc_price: 1180.0,
    },
    PassYear {
        year: 2018,
        pass_price: 999.0,
        btc_price: 6347.0,
    },
    PassYear {
        year: 2019,
        pass_price: 1049.0,
        btc_price: 8000.0,
    },
    PassYear {
        year: 2020,
        pass_price: 1099.0,
        btc_price: 9100.0,
    },
    PassYear {
        year: 2021,
        pass_price: 1149.0,
        btc_price: 35000.0,
    },
    PassYear {
        year: 2022,
        pass_price: 1199.0,
        btc_price: 30000.0,
    },
    PassYear {
        year: 2023,
        pass_price: 1249.0,
        btc_price: 27000.0,
    },
    PassYear {
        year: 2024,
        pass_price: 1299.0,
        btc_price: 64000.0,
    },
];

pub const DEFAULT_YEAR: u16 = 2018;

pub fn find_year(year: u16) -> Option<&'static PassYear> {
    PASS_HISTORY.iter().find(|entry| entry.year == year)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub year: u16,
    pub pass_price: f64,
    pub historical_btc_price: f64,
    pub current_price: f64,
    pub btc_amount: f64,
    pub value_today: f64,
    pub gain_loss: f64,
    pub gain_loss_percent: f64,
}

impl Comparison {
    pub fn compute(entry: &PassYear, current_price: f64) -> Self {
        let btc_amount = entry.pass_price / entry.btc_price;
        let value_today = btc_amount * current_price;
        Comparison {
            year: entry.year,
            pass_price: entry.pass_price,
            historical_btc_price: entry.btc_price,
            current_price,
            btc_amount,
            value_today,
            gain_loss: value_today - entry.pass_price,
            gain_loss_percent: percent_change(entry.pass_price, value_today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorView {
    pub comparison: Comparison,
    pub btc_display: String,
    pub pass_display: String,
    pub value_today_display: String,
    pub gain_loss_display: String,
    pub gain_loss_percent_display: String,
}

impl From<Comparison> for CalculatorView {
    fn from(comparison: Comparison) -> Self {
        CalculatorView {
            btc_display: format!("{:.6} BTC", comparison.btc_amount),
            pass_display: format_usd(comparison.pass_price),
            value_today_display: format_usd(comparison.value_today),
            gain_loss_display: format_usd(comparison.gain_loss),
            gain_loss_percent_display: format_change(comparison.gain_loss_percent),
            comparison,
        }
    }
}

/// Fetches the spot price and compares it against `entry`.
pub async fn load_calculator(
    provider: &dyn PriceProvider,
    entry: &PassYear,
) -> WidgetState<CalculatorView> {
    match provider.fetch_spot().await {
        Ok(quote) => WidgetState::ready(Comparison::compute(entry, quote.price).into()),
        Err(e) => {
            warn!(error = %e, year = entry.year, "Calculator price fetch failed");
            WidgetState::failed()
        }
    }
}
