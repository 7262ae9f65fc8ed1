//! Pass-through proxy to the Strike API.
//!
//! Requests to `/api/strike/{*path}` are forwarded to `{base_url}/{path}` with
//! the server-held bearer credential attached. Bodies travel as opaque JSON in
//! both directions. Nothing is retried, cached or remembered between requests.

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

const USER_AGENT: &str = "btcsite/0.1";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Strike API key not configured")]
    NotConfigured,
    #[error("Strike API error: {status}")]
    Upstream { status: StatusCode, body: String },
    #[error("Failed to communicate with Strike API")]
    Transport(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::NotConfigured => {
                error!("Strike API key not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Strike API key not configured" })),
                )
                    .into_response()
            }
            ProxyError::Upstream { status, body } => {
                warn!(%status, "Strike API returned an error");
                (
                    status,
                    Json(json!({ "error": "Strike API error", "details": body })),
                )
                    .into_response()
            }
            ProxyError::Transport(e) => {
                error!(error = %e, "Failed to communicate with Strike API");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to communicate with Strike API" })),
                )
                    .into_response()
            }
        }
    }
}

/// The four operations the proxy relays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMethod {
    Read,
    Create,
    PartialUpdate,
    Delete,
}

impl ProxyMethod {
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(ProxyMethod::Read),
            Method::POST => Some(ProxyMethod::Create),
            Method::PATCH => Some(ProxyMethod::PartialUpdate),
            Method::DELETE => Some(ProxyMethod::Delete),
            _ => None,
        }
    }

    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            ProxyMethod::Read => reqwest::Method::GET,
            ProxyMethod::Create => reqwest::Method::POST,
            ProxyMethod::PartialUpdate => reqwest::Method::PATCH,
            ProxyMethod::Delete => reqwest::Method::DELETE,
        }
    }

    fn carries_body(&self) -> bool {
        matches!(self, ProxyMethod::Create | ProxyMethod::PartialUpdate)
    }
}

/// Upstream status and JSON body, relayed as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Clone)]
pub struct StrikeProxy {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl StrikeProxy {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(StrikeProxy {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}/{}?{}", self.base_url, path, query),
            None => format!("{}/{}", self.base_url, path),
        }
    }

    #[instrument(name = "StrikeProxy", skip(self, body))]
    pub async fn forward(
        &self,
        method: ProxyMethod,
        path: &str,
        query: Option<&str>,
        body: Bytes,
    ) -> Result<ProxyResponse, ProxyError> {
        let api_key = self.api_key.as_deref().ok_or(ProxyError::NotConfigured)?;

        let url = self.upstream_url(path, query);
        debug!("Forwarding to {}", url);

        let mut request = self
            .client
            .request(method.as_reqwest(), &url)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if method.carries_body() {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        debug!(%status, "Received Strike response");

        if !status.is_success() {
            let body = response.text().await?;
            return Err(ProxyError::Upstream { status, body });
        }

        if method == ProxyMethod::Delete && !is_json(response.headers()) {
            return Ok(ProxyResponse {
                status: StatusCode::OK,
                body: json!({ "success": true }),
            });
        }

        let body = response.json::<Value>().await?;
        Ok(ProxyResponse { status, body })
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

async fn strike_handler(
    State(proxy): State<StrikeProxy>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let Some(method) = ProxyMethod::from_http(&method) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };
    match proxy.forward(method, &path, query.as_deref(), body).await {
        Ok(response) => response.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Routes for `/api/strike/{*path}` (GET, POST, PATCH, DELETE).
pub fn routes(proxy: StrikeProxy) -> Router {
    Router::new()
        .route(
            "/api/strike/{*path}",
            get(strike_handler)
                .post(strike_handler)
                .patch(strike_handler)
                .delete(strike_handler),
        )
        .with_state(proxy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{any, body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn proxy_for(server: &MockServer, key: Option<&str>) -> StrikeProxy {
        StrikeProxy::new(&format!("{}/v1", server.uri()), key.map(str::to_string)).unwrap()
    }

    #[test]
    fn test_upstream_url_concatenation() {
        let proxy = StrikeProxy::new("https://api.strike.me/v1/", None).unwrap();
        assert_eq!(
            proxy.upstream_url("invoices/abc", Some("x=1&y=2")),
            "https://api.strike.me/v1/invoices/abc?x=1&y=2"
        );
        assert_eq!(
            proxy.upstream_url("balances", None),
            "https://api.strike.me/v1/balances"
        );
        assert_eq!(
            proxy.upstream_url("balances", Some("")),
            "https://api.strike.me/v1/balances"
        );
        assert!(!proxy.is_configured());
    }

    #[tokio::test]
    async fn test_missing_key_never_calls_upstream() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let proxy = proxy_for(&server, None);
        let err = proxy
            .forward(ProxyMethod::Read, "foo", Some("x=1"), Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::NotConfigured));
        assert!(err.to_string().contains("not configured"));
    }

    #[tokio::test]
    async fn test_get_attaches_bearer_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/balances"))
            .and(query_param("currency", "BTC"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"available": "0.1"}])))
            .expect(1)
            .mount(&server)
            .await;

        let proxy = proxy_for(&server, Some("secret"));
        let response = proxy
            .forward(ProxyMethod::Read, "balances", Some("currency=BTC"), Bytes::new())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!([{"available": "0.1"}]));
    }

    #[tokio::test]
    async fn test_post_forwards_body_unchanged() {
        let server = MockServer::start().await;
        let payload = json!({"amount": {"amount": "10.00", "currency": "USD"}, "description": "consult"});
        Mock::given(method("POST"))
            .and(path("/v1/invoices"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"invoiceId": "inv-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let proxy = proxy_for(&server, Some("secret"));
        let response = proxy
            .forward(
                ProxyMethod::Create,
                "invoices",
                None,
                Bytes::from(payload.to_string()),
            )
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["invoiceId"], "inv-1");
    }

    #[tokio::test]
    async fn test_upstream_error_relays_status_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/invoices/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("invoice not found"))
            .mount(&server)
            .await;

        let proxy = proxy_for(&server, Some("secret"));
        let err = proxy
            .forward(
                ProxyMethod::PartialUpdate,
                "invoices/missing",
                None,
                Bytes::from_static(b"{}"),
            )
            .await
            .unwrap_err();
        match err {
            ProxyError::Upstream { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "invoice not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_without_json_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/subscriptions/sub-1"))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("content-type", "text/plain")
                    .set_body_string("{\"looks\": \"like json\"}"),
            )
            .mount(&server)
            .await;

        let proxy = proxy_for(&server, Some("secret"));
        let response = proxy
            .forward(ProxyMethod::Delete, "subscriptions/sub-1", None, Bytes::new())
            .await
            .unwrap();
        assert_eq!(response.body, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_delete_with_json_is_relayed() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/subscriptions/sub-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": "sub-2"})))
            .mount(&server)
            .await;

        let proxy = proxy_for(&server, Some("secret"));
        let response = proxy
            .forward(ProxyMethod::Delete, "subscriptions/sub-2", None, Bytes::new())
            .await
            .unwrap();
        assert_eq!(response.body, json!({"deleted": "sub-2"}));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_generic_error() {
        let proxy = StrikeProxy::new("http://127.0.0.1:1/v1", Some("secret".to_string())).unwrap();
        let err = proxy
            .forward(ProxyMethod::Read, "balances", None, Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Transport(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(ProxyMethod::from_http(&Method::GET), Some(ProxyMethod::Read));
        assert_eq!(
            ProxyMethod::from_http(&Method::PATCH),
            Some(ProxyMethod::PartialUpdate)
        );
        assert_eq!(ProxyMethod::from_http(&Method::PUT), None);
        assert!(ProxyMethod::Create.carries_body());
        assert!(!ProxyMethod::Delete.carries_body());
    }
}
