use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::warn;

use super::WidgetState;
use crate::core::metrics::{ChartGeometry, SeriesStats, format_change, format_usd};
use crate::core::{MarketChartProvider, PricePoint, Timeframe};

/// Number of synthetic samples substituted when the history fetch fails.
pub const FALLBACK_POINTS: usize = 20;
const FALLBACK_BASE_PRICE: f64 = 45_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub timeframe: Timeframe,
    pub points: Vec<PricePoint>,
    pub stats: SeriesStats,
    pub change_display: String,
    pub low_display: String,
    pub high_display: String,
    pub polyline: String,
    pub width: f64,
    pub height: f64,
}

impl ChartView {
    /// `None` for an empty series.
    pub fn from_points(
        timeframe: Timeframe,
        points: Vec<PricePoint>,
        geometry: ChartGeometry,
    ) -> Option<Self> {
        let stats = SeriesStats::from_points(&points)?;
        Some(ChartView {
            timeframe,
            change_display: format_change(stats.change_percent),
            low_display: format_usd(stats.min),
            high_display: format_usd(stats.max),
            polyline: geometry.polyline(&points),
            width: geometry.width,
            height: geometry.height,
            stats,
            points,
        })
    }
}

/// Placeholder series: evenly spaced over the timeframe, ending at `now`, a
/// small random walk around a fixed base price.
pub fn fallback_series(timeframe: Timeframe, now: DateTime<Utc>) -> Vec<PricePoint> {
    let span = Duration::days(i64::from(timeframe.days()));
    let start = now - span;
    let step_ms = span.num_milliseconds() / (FALLBACK_POINTS as i64 - 1);

    let mut rng = rand::thread_rng();
    let mut price = FALLBACK_BASE_PRICE;
    (0..FALLBACK_POINTS)
        .map(|i| {
            if i > 0 {
                price *= 1.0 + rng.gen_range(-0.02..0.02);
            }
            PricePoint {
                timestamp: start.timestamp_millis() + step_ms * i as i64,
                price,
            }
        })
        .collect()
}

/// Fetches history for `timeframe`. Any failure (or an empty series) yields
/// the synthetic fallback with the error flag set, so the chart never renders
/// empty.
pub async fn load_chart(
    provider: &dyn MarketChartProvider,
    timeframe: Timeframe,
    geometry: ChartGeometry,
) -> WidgetState<ChartView> {
    let fetched = match provider.fetch_market_chart(timeframe).await {
        Ok(points) => ChartView::from_points(timeframe, points, geometry),
        Err(e) => {
            warn!(error = %e, %timeframe, "Chart fetch failed, using fallback series");
            None
        }
    };

    match fetched {
        Some(view) => WidgetState::ready(view),
        None => {
            let points = fallback_series(timeframe, Utc::now());
            match ChartView::from_points(timeframe, points, geometry) {
                Some(view) => WidgetState::fallback(view),
                None => WidgetState::failed(),
            }
        }
    }
}
