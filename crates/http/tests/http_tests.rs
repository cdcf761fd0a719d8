use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use freshboard_core::constants::{
    COL_ID, COL_IDEAL_TEMP, COL_MEASURED_TEMP, COL_POSITION, COL_QR_CODE, COL_SCANNED_AT,
};
use freshboard_core::{
    ChatMessage, ColumnSet, Reading, ReadingTable, TableName, TableResolver, User,
};
use freshboard_http::{create_router, AppState};
use freshboard_llm::{CompletionProvider, LlmError};
use freshboard_service::{AuthService, ChatService, DashboardService};
use freshboard_storage::{ReadingStore, StorageError, UserStore};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::sync::Notify;

struct Users(HashMap<String, User>);

#[async_trait]
impl UserStore for Users {
    async fn find_user(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self.0.get(username).cloned())
    }
}

struct Readings(HashMap<String, ReadingTable>);

#[async_trait]
impl ReadingStore for Readings {
    async fn load_readings(&self, table: &TableName) -> Result<ReadingTable, StorageError> {
        self.0
            .get(table.as_str())
            .cloned()
            .ok_or_else(|| StorageError::TableMissing(table.as_str().to_owned()))
    }
}

struct Echo;

#[async_trait]
impl CompletionProvider for Echo {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        Ok(format!("seen {} messages", messages.len()))
    }
}

#[derive(Default)]
struct Gate {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl CompletionProvider for Gate {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok("done".to_owned())
    }
}

fn reading(id: i64, qr: &str, measured: f64, ideal: f64, scanned_at: &str) -> Reading {
    Reading {
        id: Some(id),
        qr_code: Some(qr.to_owned()),
        measured_temp: Some(measured),
        ideal_temp: Some(ideal),
        position: Some("45.0, 9.0".to_owned()),
        scanned_at: Some(scanned_at.to_owned()),
        ..Reading::default()
    }
}

fn user(name: &str, company: &str) -> User {
    User {
        username: name.to_owned(),
        password_hash: bcrypt::hash("secret", 4).unwrap(),
        company_name: company.to_owned(),
    }
}

async fn spawn_app(chat_enabled: bool) -> SocketAddr {
    spawn_app_with(chat_enabled.then(|| Arc::new(Echo) as Arc<dyn CompletionProvider>)).await
}

async fn spawn_app_with(provider: Option<Arc<dyn CompletionProvider>>) -> SocketAddr {
    let users = Users(HashMap::from([
        ("mario".to_owned(), user("mario", "Acme")),
        ("luigi".to_owned(), user("luigi", "Ghost")),
        ("anna".to_owned(), user("anna", "Acme Foods")),
    ]));
    let acme = ReadingTable {
        columns: ColumnSet::new([
            COL_ID,
            COL_QR_CODE,
            COL_IDEAL_TEMP,
            COL_MEASURED_TEMP,
            COL_POSITION,
            COL_SCANNED_AT,
        ]),
        rows: vec![
            reading(1, "QR-1", 5.0, 5.5, "01/03/2025 08:00"),
            reading(2, "QR-2", 10.0, 4.0, "02/03/2025 08:00"),
        ],
    };
    let readings = Readings(HashMap::from([("acme".to_owned(), acme)]));

    let dashboard = Arc::new(DashboardService::new(Arc::new(readings)));
    let state = Arc::new(AppState::new(
        AuthService::new(Arc::new(users), TableResolver::derived()),
        Arc::clone(&dashboard),
        ChatService::new(provider, dashboard),
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    addr
}

async fn login(client: &reqwest::Client, addr: SocketAddr, username: &str) -> String {
    let resp: Value = client
        .post(format!("http://{addr}/api/login"))
        .json(&json!({"username": username, "password": "secret"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    resp["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn health_and_version() {
    let addr = spawn_app(false).await;
    let body = reqwest::get(format!("http://{addr}/health")).await.unwrap().text().await.unwrap();
    assert_eq!(body, "ok");
    let version: Value =
        reqwest::get(format!("http://{addr}/api/version")).await.unwrap().json().await.unwrap();
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn viewer_is_served() {
    let addr = spawn_app(false).await;
    let resp = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("freshboard"));
}

#[tokio::test]
async fn login_then_dashboard() {
    let addr = spawn_app(false).await;
    let client = reqwest::Client::new();
    let login: Value = client
        .post(format!("http://{addr}/api/login"))
        .json(&json!({"username": "mario", "password": "secret"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(login["company"], "Acme");
    assert_eq!(login["table"], "acme");
    let token = login["token"].as_str().unwrap();

    let overview: Value = client
        .get(format!("http://{addr}/api/dashboard"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(overview["kpis"]["total_scans"], 2);
    assert_eq!(overview["kpis"]["in_range_pct"], 50.0);

    let scans: Value = client
        .get(format!("http://{addr}/api/scans?sort=id&order=asc"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(scans["rows"][0]["freshness"], 100);
    assert_eq!(scans["rows"][0]["in_range"], true);
    assert_eq!(scans["rows"][1]["freshness"], 20);
    assert_eq!(scans["rows"][1]["out_of_range"], true);
    assert_eq!(scans["total_rows"], 2);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let addr = spawn_app(false).await;
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/login"))
        .json(&json!({"username": "mario", "password": "nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("wrong password"));
}

#[tokio::test]
async fn empty_credentials_are_bad_request() {
    let addr = spawn_app(false).await;
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/login"))
        .json(&json!({"username": "", "password": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn requests_without_session_are_unauthorized() {
    let addr = spawn_app(false).await;
    let client = reqwest::Client::new();
    let resp = client.get(format!("http://{addr}/api/dashboard")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(format!("http://{addr}/api/dashboard"))
        .bearer_auth("00000000-0000-0000-0000-000000000000")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_token() {
    let addr = spawn_app(false).await;
    let client = reqwest::Client::new();
    let token = login(&client, addr, "mario").await;

    let resp: Value = client
        .post(format!("http://{addr}/api/logout"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp["logged_out"], true);

    let resp =
        client.get(format!("http://{addr}/api/session")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_table_gives_warning_not_error() {
    let addr = spawn_app(false).await;
    let client = reqwest::Client::new();
    let token = login(&client, addr, "luigi").await;
    let resp = client
        .get(format!("http://{addr}/api/dashboard"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kpis"]["total_scans"], 0);
    assert_eq!(body["warnings"][0], "table 'ghost' does not exist in the database");
}

#[tokio::test]
async fn company_without_valid_table_name_logs_in() {
    let addr = spawn_app(false).await;
    let client = reqwest::Client::new();
    let login: Value = client
        .post(format!("http://{addr}/api/login"))
        .json(&json!({"username": "anna", "password": "secret"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(login["company"], "Acme Foods");
    assert!(login["table"].is_null());
    let token = login["token"].as_str().unwrap();

    let resp =
        client.get(format!("http://{addr}/api/dashboard")).bearer_auth(token).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kpis"]["total_scans"], 0);
    assert!(body["warnings"][0].as_str().unwrap().contains("Acme Foods"));
}

#[tokio::test]
async fn invalid_queries_are_bad_request() {
    let addr = spawn_app(false).await;
    let client = reqwest::Client::new();
    let token = login(&client, addr, "mario").await;
    for path in [
        "/api/scans?page_size=7",
        "/api/scans?sort=colour",
        "/api/dashboard?start=2025-03-05&end=2025-03-01",
    ] {
        let resp =
            client.get(format!("http://{addr}{path}")).bearer_auth(&token).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{path}");
    }
}

#[tokio::test]
async fn selection_drives_history_and_map() {
    let addr = spawn_app(false).await;
    let client = reqwest::Client::new();
    let token = login(&client, addr, "mario").await;

    let sel: Value = client
        .post(format!("http://{addr}/api/selection"))
        .bearer_auth(&token)
        .json(&json!({"qr_code": "QR-2"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sel["selected_qr"], "QR-2");
    assert_eq!(sel["changed"], true);

    let history: Value = client
        .get(format!("http://{addr}/api/history"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["rows"].as_array().unwrap().len(), 1);

    let map: Value = client
        .get(format!("http://{addr}/api/map"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(map["zoom"], 6);

    let reset: Value = client
        .delete(format!("http://{addr}/api/selection"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(reset["selected_qr"].is_null());
    assert_eq!(reset["grid_seed"], 1);

    let trends: Value = client
        .get(format!("http://{addr}/api/trends"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trends["daily"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn chat_round_trip() {
    let addr = spawn_app(true).await;
    let client = reqwest::Client::new();
    let token = login(&client, addr, "mario").await;

    let reply: Value = client
        .post(format!("http://{addr}/api/chat"))
        .bearer_auth(&token)
        .json(&json!({"message": "how fresh is QR-1?"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reply["answer"], "seen 2 messages");

    let transcript: Value = client
        .get(format!("http://{addr}/api/chat"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(transcript["configured"], true);
    assert_eq!(transcript["messages"].as_array().unwrap().len(), 2);
    assert_eq!(transcript["messages"][0]["role"], "user");
}

#[tokio::test]
async fn chat_without_key_is_unavailable() {
    let addr = spawn_app(false).await;
    let client = reqwest::Client::new();
    let token = login(&client, addr, "mario").await;
    let resp = client
        .post(format!("http://{addr}/api/chat"))
        .bearer_auth(&token)
        .json(&json!({"message": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn pending_chat_does_not_block_other_requests() {
    let gate = Arc::new(Gate::default());
    let addr = spawn_app_with(Some(Arc::clone(&gate) as Arc<dyn CompletionProvider>)).await;
    let client = reqwest::Client::new();
    let token = login(&client, addr, "mario").await;

    let pending = tokio::spawn({
        let client = client.clone();
        let token = token.clone();
        async move {
            client
                .post(format!("http://{addr}/api/chat"))
                .bearer_auth(&token)
                .json(&json!({"message": "take your time"}))
                .send()
                .await
                .unwrap()
                .status()
        }
    });
    gate.entered.notified().await;

    let transcript = tokio::time::timeout(
        Duration::from_secs(2),
        client.get(format!("http://{addr}/api/chat")).bearer_auth(&token).send(),
    )
    .await
    .expect("transcript request blocked by a pending chat turn")
    .unwrap();
    assert_eq!(transcript.status(), StatusCode::OK);

    gate.release.notify_one();
    assert_eq!(pending.await.unwrap(), StatusCode::OK);
}
