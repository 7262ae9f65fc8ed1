use serde_json::{Value, json};
use tracing::info;

// Mock upstreams and a running app on an ephemeral port
mod test_utils {
    use std::sync::Arc;

    use btcsite::core::config::SiteConfig;
    use btcsite::providers::CoinGeckoProvider;
    use btcsite::proxy::StrikeProxy;
    use btcsite::server::{AppState, router};
    use btcsite::widgets::ticker::PriceTicker;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const SPOT_BODY: &str = r#"{"bitcoin": {"usd": 60000.0, "usd_24h_change": 3.21}}"#;

    pub async fn create_coingecko_mock(
        spot: ResponseTemplate,
        chart: ResponseTemplate,
    ) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(spot)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/coins/bitcoin/market_chart"))
            .respond_with(chart)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn chart_body() -> String {
        let prices: Vec<(i64, f64)> = (0..10)
            .map(|i| (1_700_000_000_000 + i * 3_600_000, 50_000.0 + i as f64 * 100.0))
            .collect();
        serde_json::json!({ "prices": prices }).to_string()
    }

    /// Boots the router and returns its base URL.
    pub async fn spawn_app(market_url: &str, strike_url: &str, strike_key: Option<&str>) -> String {
        let market = Arc::new(CoinGeckoProvider::new(market_url));
        let ticker = PriceTicker::new(market.clone());
        ticker.refresh().await;

        let state = AppState::new(SiteConfig::default(), ticker, market.clone(), market);
        let strike = StrikeProxy::new(strike_url, strike_key.map(str::to_string))
            .expect("Failed to build proxy");
        let app = router(state, strike);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("No local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        format!("http://{addr}")
    }

    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build client")
    }
}

use test_utils::{SPOT_BODY, chart_body, client, create_coingecko_mock, spawn_app};
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn healthy_market() -> MockServer {
    create_coingecko_mock(
        ResponseTemplate::new(200).set_body_string(SPOT_BODY),
        ResponseTemplate::new(200).set_body_string(chart_body()),
    )
    .await
}

#[test_log::test(tokio::test)]
async fn test_proxy_without_key_returns_not_configured() {
    let market = healthy_market().await;
    let strike = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&strike)
        .await;

    let base = spawn_app(&market.uri(), &format!("{}/v1", strike.uri()), None).await;
    let response = client()
        .get(format!("{base}/api/strike/foo?x=1"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    info!(?body, "Proxy response");
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[test_log::test(tokio::test)]
async fn test_proxy_get_relays_upstream() {
    let market = healthy_market().await;
    let strike = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/foo"))
        .and(query_param("x", "1"))
        .and(header("authorization", "Bearer integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "items": [1, 2]})))
        .expect(1)
        .mount(&strike)
        .await;

    let base = spawn_app(
        &market.uri(),
        &format!("{}/v1", strike.uri()),
        Some("integration-key"),
    )
    .await;
    let response = client()
        .get(format!("{base}/api/strike/foo?x=1"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"ok": true, "items": [1, 2]}));
}

#[test_log::test(tokio::test)]
async fn test_proxy_relays_upstream_error_status() {
    let market = healthy_market().await;
    let strike = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/invoices"))
        .respond_with(ResponseTemplate::new(422).set_body_string("amount is required"))
        .mount(&strike)
        .await;

    let base = spawn_app(&market.uri(), &format!("{}/v1", strike.uri()), Some("k")).await;
    let response = client()
        .post(format!("{base}/api/strike/invoices"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"], "amount is required");
}

#[test_log::test(tokio::test)]
async fn test_proxy_delete_without_json_content_type() {
    let market = healthy_market().await;
    let strike = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/invoices/abc"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&strike)
        .await;

    let base = spawn_app(&market.uri(), &format!("{}/v1", strike.uri()), Some("k")).await;
    let response = client()
        .delete(format!("{base}/api/strike/invoices/abc"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": true}));
}

#[test_log::test(tokio::test)]
async fn test_proxy_transport_failure_is_generic_500() {
    let market = healthy_market().await;
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", Some("k")).await;

    let response = client()
        .patch(format!("{base}/api/strike/invoices/abc"))
        .body(r#"{"description": "updated"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Failed to communicate")
    );
}

#[test_log::test(tokio::test)]
async fn test_proxy_rejects_other_methods() {
    let market = healthy_market().await;
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", Some("k")).await;

    let response = client()
        .put(format!("{base}/api/strike/invoices/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 405);
}

#[test_log::test(tokio::test)]
async fn test_page_renders_all_sections_with_theme() {
    let market = healthy_market().await;
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", None).await;

    let response = client()
        .get(format!("{base}/?timeframe=1d&year=2018&tab=learn"))
        .header("cookie", "theme=dark")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let html = response.text().await.unwrap();
    assert!(html.contains(r#"data-theme="dark""#));
    for id in ["services", "tools", "about", "resources", "blog", "contact"] {
        assert!(html.contains(&format!(r#"id="{id}""#)), "missing {id}");
    }
    assert!(html.contains("$60,000.00"));
    assert!(html.contains("+3.21%"));
    assert!(html.contains("The Bitcoin Whitepaper"));
    assert!(html.contains("0.157397 BTC"));
}

#[test_log::test(tokio::test)]
async fn test_page_survives_market_outage() {
    let market = create_coingecko_mock(ResponseTemplate::new(503), ResponseTemplate::new(503)).await;
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", None).await;

    let html = client()
        .get(format!("{base}/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("Unable to load price"));
    assert!(html.contains(r#"class="retry""#));
    assert!(html.contains("showing sample data"));
    assert!(html.contains("<polyline"));
}

#[test_log::test(tokio::test)]
async fn test_page_reload_retries_failed_ticker() {
    let market = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&market)
        .await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SPOT_BODY))
        .mount(&market)
        .await;

    // The startup refresh consumes the 503.
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", None).await;

    let html = client()
        .get(format!("{base}/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!html.contains("Unable to load price"));
    assert!(html.contains("$60,000.00"));
    assert!(html.contains("+3.21%"));

    let price: Value = client()
        .get(format!("{base}/api/widgets/price"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(price["error"], false);
    assert_eq!(price["data"]["price"], 60_000.0);
}

#[test_log::test(tokio::test)]
async fn test_chart_widget_falls_back_to_twenty_points() {
    let market = create_coingecko_mock(
        ResponseTemplate::new(200).set_body_string(SPOT_BODY),
        ResponseTemplate::new(500),
    )
    .await;
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", None).await;

    let body: Value = client()
        .get(format!("{base}/api/widgets/chart?timeframe=90d"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["error"], true);
    assert_eq!(body["data"]["timeframe"], "90d");
    assert_eq!(body["data"]["points"].as_array().unwrap().len(), 20);
}

#[test_log::test(tokio::test)]
async fn test_chart_widget_live_series() {
    let market = healthy_market().await;
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", None).await;

    let body: Value = client()
        .get(format!("{base}/api/widgets/chart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["error"], false);
    assert_eq!(body["data"]["points"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["stats"]["min"], 50_000.0);
    assert_eq!(body["data"]["stats"]["max"], 50_900.0);
    assert_eq!(body["data"]["change_display"], "+1.80%");
}

#[test_log::test(tokio::test)]
async fn test_calculator_widget() {
    let market = healthy_market().await;
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", None).await;

    let body: Value = client()
        .get(format!("{base}/api/widgets/calculator?year=2018"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let comparison = &body["data"]["comparison"];
    let btc_amount = comparison["btc_amount"].as_f64().unwrap();
    assert!((btc_amount - 0.157397).abs() < 1e-6);
    assert_eq!(
        comparison["gain_loss"].as_f64().unwrap(),
        (999.0 / 6347.0) * 60_000.0 - 999.0
    );

    let missing = client()
        .get(format!("{base}/api/widgets/calculator?year=1999"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    let garbled: Value = client()
        .get(format!("{base}/api/widgets/calculator?year=abc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(garbled["data"]["comparison"]["year"], 2018);
}

#[test_log::test(tokio::test)]
async fn test_price_and_learning_widgets() {
    let market = healthy_market().await;
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", None).await;

    let price: Value = client()
        .get(format!("{base}/api/widgets/price"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(price["data"]["price"], 60_000.0);
    assert_eq!(price["data"]["change_display"], "+3.21%");

    let learning: Value = client()
        .get(format!("{base}/api/widgets/learning?tab=tools"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(learning["tab"], "tools");
    assert_eq!(learning["entries"][0]["title"], "mempool.space");
}

#[test_log::test(tokio::test)]
async fn test_theme_route_sets_cookie() {
    let market = healthy_market().await;
    let base = spawn_app(&market.uri(), "http://127.0.0.1:1/v1", None).await;

    let response = client()
        .get(format!("{base}/theme/dark"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("theme=dark"));

    let bad = client()
        .get(format!("{base}/theme/sepia"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), 400);

    let css = client()
        .get(format!("{base}/assets/site.css"))
        .send()
        .await
        .unwrap();
    assert!(
        css.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
}
