//! HTTP surface: the page, widget JSON views, theme switch and the proxy.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{
        HeaderMap, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::config::{AppConfig, STRIKE_API_KEY_VAR, SiteConfig};
use crate::core::metrics::ChartGeometry;
use crate::core::{MarketChartProvider, PriceProvider, Theme, Timeframe};
use crate::page::{PageParams, PageProps, PageQuery, render_page};
use crate::providers::CoinGeckoProvider;
use crate::proxy::{self, StrikeProxy};
use crate::widgets::WidgetState;
use crate::widgets::calculator::{self, load_calculator};
use crate::widgets::chart::load_chart;
use crate::widgets::learning::{LearningTab, LearningView};
use crate::widgets::ticker::PriceTicker;

const STYLESHEET: &str = include_str!("../assets/site.css");

#[derive(Clone)]
pub struct AppState {
    site: SiteConfig,
    ticker: PriceTicker,
    spot: Arc<dyn PriceProvider>,
    history: Arc<dyn MarketChartProvider>,
    geometry: ChartGeometry,
}

impl AppState {
    pub fn new(
        site: SiteConfig,
        ticker: PriceTicker,
        spot: Arc<dyn PriceProvider>,
        history: Arc<dyn MarketChartProvider>,
    ) -> Self {
        AppState {
            site,
            ticker,
            spot,
            history,
            geometry: ChartGeometry::default(),
        }
    }
}

pub fn router(state: AppState, strike: StrikeProxy) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(|| async { "ok" }))
        .route("/theme/{theme}", get(set_theme))
        .route("/assets/site.css", get(stylesheet))
        .route("/api/widgets/price", get(price_widget))
        .route("/api/widgets/chart", get(chart_widget))
        .route("/api/widgets/calculator", get(calculator_widget))
        .route("/api/widgets/learning", get(learning_widget))
        .with_state(state)
        .merge(proxy::routes(strike))
}

fn theme_from_headers(headers: &HeaderMap) -> Theme {
    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(Theme::from_cookie_header)
        .unwrap_or_default()
}

async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Html<String> {
    let query = PageQuery::from(params);
    let theme = theme_from_headers(&headers);
    debug!(?query, %theme, "Rendering page");

    let ticker = state.ticker.current().await;

    let calculator_state = async {
        match calculator::find_year(query.year) {
            Some(entry) => load_calculator(state.spot.as_ref(), entry).await,
            None => WidgetState::failed(),
        }
    };
    let (chart, calculator) = futures::join!(
        load_chart(state.history.as_ref(), query.timeframe, state.geometry),
        calculator_state
    );

    let props = PageProps {
        theme,
        site: state.site.clone(),
        query,
        ticker,
        chart,
        calculator,
    };
    Html(render_page(props).await)
}

async fn set_theme(Path(theme): Path<String>) -> Response {
    match theme.parse::<Theme>() {
        Ok(theme) => ([(SET_COOKIE, theme.to_set_cookie())], Redirect::to("/")).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

async fn stylesheet() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn price_widget(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.ticker.current().await)
}

#[derive(Debug, Deserialize)]
struct ChartParams {
    timeframe: Option<String>,
}

async fn chart_widget(
    State(state): State<AppState>,
    Query(params): Query<ChartParams>,
) -> impl IntoResponse {
    let timeframe = params
        .timeframe
        .and_then(|t| t.parse::<Timeframe>().ok())
        .unwrap_or_default();
    Json(load_chart(state.history.as_ref(), timeframe, state.geometry).await)
}

#[derive(Debug, Deserialize)]
struct CalculatorParams {
    year: Option<String>,
}

async fn calculator_widget(
    State(state): State<AppState>,
    Query(params): Query<CalculatorParams>,
) -> Response {
    let year = params
        .year
        .and_then(|y| y.parse::<u16>().ok())
        .unwrap_or(calculator::DEFAULT_YEAR);
    match calculator::find_year(year) {
        Some(entry) => Json(load_calculator(state.spot.as_ref(), entry).await).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("No pass price recorded for {year}") })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct LearningParams {
    tab: Option<String>,
}

async fn learning_widget(Query(params): Query<LearningParams>) -> impl IntoResponse {
    let tab = params
        .tab
        .and_then(|t| t.parse::<LearningTab>().ok())
        .unwrap_or_default();
    Json(LearningView::from(tab))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Builds providers from `config`, activates the ticker and serves until
/// ctrl-c. The ticker's poller is cancelled once the server has stopped.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let market = Arc::new(CoinGeckoProvider::new(
        config.providers.coingecko_base_url(),
    ));
    let ticker = PriceTicker::new(market.clone());
    let poll = ticker.activate(Duration::from_secs(config.ticker.poll_interval_secs.max(1)));

    let strike = StrikeProxy::new(
        config.providers.strike_base_url(),
        AppConfig::strike_api_key(),
    )?;
    if !strike.is_configured() {
        warn!(
            "{} is not set, Strike proxy requests will fail",
            STRIKE_API_KEY_VAR
        );
    }

    let state = AppState::new(config.site.clone(), ticker, market.clone(), market);
    let app = router(state, strike);

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    poll.cancel();
    info!("Server stopped");
    Ok(())
}
