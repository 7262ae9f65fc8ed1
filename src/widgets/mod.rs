//! Data widgets: each fetches from a market-data provider, derives display
//! values, and degrades to an error flag (or fallback data) on failure.

pub mod calculator;
pub mod chart;
pub mod learning;
pub mod poller;
pub mod ticker;

use serde::Serialize;

/// What a widget renders from. `data` is always the result of the latest
/// fetch (or its fallback); it is never merged with earlier results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetState<T> {
    pub loading: bool,
    pub error: bool,
    pub data: Option<T>,
}

impl<T> WidgetState<T> {
    pub fn loading() -> Self {
        WidgetState {
            loading: true,
            error: false,
            data: None,
        }
    }

    pub fn ready(data: T) -> Self {
        WidgetState {
            loading: false,
            error: false,
            data: Some(data),
        }
    }

    pub fn failed() -> Self {
        WidgetState {
            loading: false,
            error: true,
            data: None,
        }
    }

    /// Failed fetch with substitute data to display instead.
    pub fn fallback(data: T) -> Self {
        WidgetState {
            loading: false,
            error: true,
            data: Some(data),
        }
    }
}
