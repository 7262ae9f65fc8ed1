//! Derived values computed from fetched price series.
//!
//! Everything here is a pure function of its inputs so widgets can recompute
//! their display values whenever a new payload (or a fallback) arrives.

use crate::core::price::PricePoint;
use serde::Serialize;

/// Percentage change from `first` to `last`. A zero base yields 0.
pub fn percent_change(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        return 0.0;
    }
    (last - first) / first * 100.0
}

/// Formats a percentage with two decimals, prefixed with `+` when non-negative.
pub fn format_change(percent: f64) -> String {
    if percent >= 0.0 {
        format!("+{:.2}%", percent.abs())
    } else {
        format!("{percent:.2}%")
    }
}

/// Formats a dollar amount with thousands separators and two decimals.
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{cents}")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl SeriesStats {
    /// Summarises a series; `None` when it is empty.
    pub fn from_points(points: &[PricePoint]) -> Option<Self> {
        let first = points.first()?.price;
        let last = points.last()?.price;
        let (min, max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.price), hi.max(p.price))
            });

        Some(SeriesStats {
            first,
            last,
            min,
            max,
            change: last - first,
            change_percent: percent_change(first, last),
        })
    }
}

/// Linear mapping of a price series onto a `width` x `height` drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        ChartGeometry {
            width: 600.0,
            height: 200.0,
        }
    }
}

impl ChartGeometry {
    /// Projects each sample to `(x, y)`. Timestamps span the full width and
    /// prices span the height between the observed min (bottom) and max
    /// (top). A degenerate range places points on the centre line.
    pub fn project(&self, points: &[PricePoint]) -> Vec<(f64, f64)> {
        let Some(stats) = SeriesStats::from_points(points) else {
            return Vec::new();
        };
        let t0 = points.iter().map(|p| p.timestamp).min().unwrap_or(0);
        let t1 = points.iter().map(|p| p.timestamp).max().unwrap_or(0);
        let time_range = (t1 - t0) as f64;
        let price_range = stats.max - stats.min;

        points
            .iter()
            .map(|p| {
                let x = if time_range > 0.0 {
                    (p.timestamp - t0) as f64 / time_range * self.width
                } else {
                    self.width / 2.0
                };
                let y = if price_range > 0.0 {
                    self.height - (p.price - stats.min) / price_range * self.height
                } else {
                    self.height / 2.0
                };
                (x, y)
            })
            .collect()
    }

    /// SVG `points` attribute for a polyline through the projected samples.
    pub fn polyline(&self, points: &[PricePoint]) -> String {
        self.project(points)
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
