//! Shared test plumbing: a stub OBP server speaking just enough of the
//! upstream API, and an app instance wired to it.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{Value, json};

use moneymate_api::app;
use moneymate_api::config::{AppEnv, Config, ObpAuthConfig, ObpConfig};
use moneymate_api::services::obp::auth::ServiceAuthenticator;
use moneymate_api::services::obp::gateway::ObpGateway;
use moneymate_api::services::obp::transport::ObpTransport;
use moneymate_api::services::session::memory::InMemorySessionStore;
use moneymate_api::services::session::service::SessionService;
use moneymate_api::services::session::store::SessionTokenStore;
use moneymate_api::state::AppState;

pub const API_VERSION: &str = "v5.1.0";
pub const CONSUMER_KEY: &str = "ck-test";

/// Tokens the stub issues.
pub const USER_TOKEN: &str = "U1";
pub const SERVICE_TOKEN: &str = "S1";

/// Behavior knobs for the stub OBP server.
#[derive(Clone)]
pub struct StubObp {
    pub login_calls: Arc<AtomicUsize>,
    /// Artificial DirectLogin latency, to widen concurrency windows.
    pub login_delay: Duration,
    /// Account id whose detail (balance) call answers 500.
    pub fail_details_for: Option<String>,
}

impl StubObp {
    pub fn new() -> Self {
        Self {
            login_calls: Arc::new(AtomicUsize::new(0)),
            login_delay: Duration::ZERO,
            fail_details_for: None,
        }
    }

    pub fn with_login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = delay;
        self
    }

    pub fn with_failing_details(mut self, account_id: &str) -> Self {
        self.fail_details_for = Some(account_id.to_string());
        self
    }

    pub fn login_count(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }
}

fn directlogin_header(headers: &HeaderMap) -> String {
    headers
        .get("directlogin")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn stub_direct_login(
    State(stub): State<StubObp>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    stub.login_calls.fetch_add(1, Ordering::SeqCst);

    if !stub.login_delay.is_zero() {
        tokio::time::sleep(stub.login_delay).await;
    }

    let header = directlogin_header(&headers);
    let alice = format!("username=alice, password=secret, consumer_key={CONSUMER_KEY}");
    let app = format!("username=app, password=app-secret, consumer_key={CONSUMER_KEY}");

    if header == alice {
        (StatusCode::OK, Json(json!({ "token": USER_TOKEN })))
    } else if header == app {
        (StatusCode::OK, Json(json!({ "token": SERVICE_TOKEN })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid login credentials" })),
        )
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let header = directlogin_header(headers);
    header == format!("token={USER_TOKEN}") || header == format!("token={SERVICE_TOKEN}")
}

async fn stub_current_user(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "no" })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "user_id": "user-alice",
            "email": "alice@example.com",
            "username": "alice",
            "provider_id": "alice",
            "provider": "obp"
        })),
    )
}

async fn stub_accounts(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "no" })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "accounts": [
                {
                    "id": "acc-1",
                    "label": "Main",
                    "bank_id": "b1",
                    "account_type": "CURRENT",
                    "account_routings": [
                        { "scheme": "IBAN", "address": "DE89370400440532013000" }
                    ]
                },
                {
                    "id": "acc-2",
                    "label": "Savings",
                    "bank_id": "b1",
                    "account_type": "SAVINGS",
                    "account_routings": []
                },
                {
                    "id": "acc-3",
                    "label": null,
                    "bank_id": "b2",
                    "account_type": "CURRENT",
                    "account_routings": []
                }
            ]
        })),
    )
}

async fn stub_banks(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "no" })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "banks": [
                { "id": "b1", "short_name": "Test Bank", "full_name": "Test Bank plc", "logo": null, "website": null },
                { "id": "b2", "short_name": null, "full_name": "Other Bank", "logo": null, "website": null }
            ]
        })),
    )
}

async fn stub_account_details(
    State(stub): State<StubObp>,
    Path((bank_id, account_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "no" })));
    }

    if stub.fail_details_for.as_deref() == Some(account_id.as_str()) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "boom" })),
        );
    }

    let balance = match account_id.as_str() {
        "acc-1" => json!({ "currency": "EUR", "amount": "100.00" }),
        "acc-2" => json!({ "currency": "EUR", "amount": "50.00" }),
        _ => json!({ "currency": "GBP", "amount": "9.99" }),
    };

    (
        StatusCode::OK,
        Json(json!({
            "id": account_id,
            "label": "Main",
            "number": "123",
            "product_code": null,
            "balance": balance,
            "bank_id": bank_id
        })),
    )
}

async fn stub_transactions(
    Path((_bank_id, account_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "no" })));
    }

    let transactions = if account_id == "acc-1" {
        json!([
            {
                "id": "txn-1",
                "details": {
                    "type": "SANDBOX_TAN",
                    "description": "coffee",
                    "posted": "2026-01-02T03:04:05Z",
                    "completed": "2026-01-02T03:04:05Z",
                    "new_balance": { "currency": "EUR", "amount": "90.00" },
                    "value": { "currency": "EUR", "amount": "-10.00" }
                }
            },
            {
                "id": "txn-2",
                "details": {
                    "type": "SANDBOX_TAN",
                    "description": "salary",
                    "posted": "2026-01-03T00:00:00Z",
                    "completed": "2026-01-03T00:00:00Z",
                    "new_balance": { "currency": "EUR", "amount": "1090.00" },
                    "value": { "currency": "EUR", "amount": "1000.00" }
                }
            }
        ])
    } else {
        json!([])
    };

    (StatusCode::OK, Json(json!({ "transactions": transactions })))
}

fn stub_router(stub: StubObp) -> Router {
    Router::new()
        .route("/my/logins/direct", post(stub_direct_login))
        .route(
            &format!("/obp/{API_VERSION}/users/current"),
            get(stub_current_user),
        )
        .route(
            &format!("/obp/{API_VERSION}/my/accounts"),
            get(stub_accounts),
        )
        .route(&format!("/obp/{API_VERSION}/banks"), get(stub_banks))
        .route(
            &format!("/obp/{API_VERSION}/banks/{{bank_id}}/accounts/{{account_id}}/owner/account"),
            get(stub_account_details),
        )
        .route(
            &format!(
                "/obp/{API_VERSION}/banks/{{bank_id}}/accounts/{{account_id}}/owner/transactions"
            ),
            get(stub_transactions),
        )
        .with_state(stub)
}

/// Serve the stub on an ephemeral local port; returns its base URL.
pub async fn spawn_stub(stub: StubObp) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = stub_router(stub);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn obp_config(base_url: &str, username: &str, password: &str) -> ObpConfig {
    ObpConfig {
        base_url: base_url.to_string(),
        api_version: API_VERSION.to_string(),
        connect_timeout: Duration::from_millis(1_000),
        read_timeout: Duration::from_millis(2_000),
        auth: ObpAuthConfig {
            username: username.to_string(),
            password: password.to_string(),
            consumer_key: CONSUMER_KEY.to_string(),
        },
    }
}

/// The application under test, with handles on its process-wide state.
pub struct TestApp {
    pub router: Router,
    pub sessions: Arc<InMemorySessionStore>,
    pub service_auth: Arc<ServiceAuthenticator>,
    pub gateway: Arc<ObpGateway>,
}

pub fn build_app(obp_base_url: &str) -> TestApp {
    build_app_with_auth(obp_base_url, "app", "app-secret")
}

/// Same composition as `app::build_state`, but keeps the concrete store
/// type so tests can inspect session counts.
pub fn build_app_with_auth(obp_base_url: &str, username: &str, password: &str) -> TestApp {
    let obp = obp_config(obp_base_url, username, password);

    let transport = Arc::new(ObpTransport::new(&obp).unwrap());
    let gateway = Arc::new(ObpGateway::new(transport.clone()));
    let service_auth = Arc::new(ServiceAuthenticator::new(transport, obp.auth.clone()));

    let sessions = Arc::new(InMemorySessionStore::new());
    let sessions_dyn: Arc<dyn SessionTokenStore> = sessions.clone();
    let session_service = Arc::new(SessionService::new(gateway.clone(), sessions_dyn.clone()));

    let state = AppState::new(
        sessions_dyn,
        gateway.clone(),
        session_service,
        service_auth.clone(),
    );

    TestApp {
        router: app::build_router(state),
        sessions,
        service_auth,
        gateway,
    }
}

/// Sanity helper for wiring `build_state` itself (used by http tests).
pub fn full_config(obp_base_url: &str) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        obp: obp_config(obp_base_url, "app", "app-secret"),
        startup_probe: false,
    }
}

// ---- request helpers ----

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_authed(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn delete_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
