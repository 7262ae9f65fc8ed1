//! Pricing abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Range of history requested by the chart widget.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize,
)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    OneDay,
    #[default]
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Timeframe::OneDay => "1d",
                Timeframe::SevenDays => "7d",
                Timeframe::ThirtyDays => "30d",
                Timeframe::NinetyDays => "90d",
                Timeframe::OneYear => "1y",
            }
        )
    }
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::OneDay,
        Timeframe::SevenDays,
        Timeframe::ThirtyDays,
        Timeframe::NinetyDays,
        Timeframe::OneYear,
    ];

    /// Number of days of history, as the market-chart endpoint expects it.
    pub fn days(&self) -> u32 {
        match self {
            Timeframe::OneDay => 1,
            Timeframe::SevenDays => 7,
            Timeframe::ThirtyDays => 30,
            Timeframe::NinetyDays => 90,
            Timeframe::OneYear => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "24H",
            Timeframe::SevenDays => "7D",
            Timeframe::ThirtyDays => "30D",
            Timeframe::NinetyDays => "90D",
            Timeframe::OneYear => "1Y",
        }
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" | "1" => Ok(Timeframe::OneDay),
            "7d" | "7" => Ok(Timeframe::SevenDays),
            "30d" | "30" => Ok(Timeframe::ThirtyDays),
            "90d" | "90" => Ok(Timeframe::NinetyDays),
            "1y" | "365" => Ok(Timeframe::OneYear),
            _ => Err(anyhow::anyhow!("Invalid timeframe: {}", s)),
        }
    }
}

/// One sample of a price series. `timestamp` is unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
}

/// Latest spot price with the provider-reported 24h change in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotQuote {
    pub price: f64,
    pub change_24h: Option<f64>,
    pub currency: String,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_spot(&self) -> Result<SpotQuote>;
}

#[async_trait]
pub trait MarketChartProvider: Send + Sync {
    async fn fetch_market_chart(&self, timeframe: Timeframe) -> Result<Vec<PricePoint>>;
}
