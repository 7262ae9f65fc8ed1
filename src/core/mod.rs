//! Core abstractions: configuration, logging, price types and derived metrics

pub mod config;
pub mod log;
pub mod metrics;
pub mod price;
pub mod theme;

// Re-export main types for cleaner imports
pub use price::{MarketChartProvider, PricePoint, PriceProvider, SpotQuote, Timeframe};
pub use theme::Theme;
