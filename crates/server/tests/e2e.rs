use std::net::SocketAddr;

use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
}

fn temp_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.storage.backend = StorageBackend::File;
    cfg.storage.data_file = format!("target/test-data/{}/luggage.json", Uuid::new_v4());
    cfg.admin.api_key = Some("e2e-admin".into());
    cfg
}

async fn start_server(cfg: &AppConfig) -> anyhow::Result<TestApp> {
    let state = server::build_state(cfg).await?;
    let app = server::build_app(state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().build().expect("reqwest client")
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let cfg = temp_config();
    let app = start_server(&cfg).await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_lifecycle_survives_restart() -> anyhow::Result<()> {
    let cfg = temp_config();
    let http = client();

    let app = start_server(&cfg).await?;
    let res = http
        .post(format!("{}/luggage", app.base_url))
        .header("X-Caller-Id", "alice.near")
        .header("X-Request-Timestamp", "1000")
        .json(&json!({"id": "bag1", "flight_number": "QF1", "origin": "SYD", "destination": "LAX"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = http
        .post(format!("{}/luggage/bag1/en-route", app.base_url))
        .header("X-Caller-Id", "handler")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // second instance over the same data file
    let restarted = start_server(&cfg).await?;
    let res = http
        .get(format!("{}/luggage/bag1", restarted.base_url))
        .header("X-Caller-Id", "alice.near")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "en-route");
    assert_eq!(body["owner_identity"], "alice.near");
    assert_eq!(body["check_in_time"], 1000);

    let res = http
        .post(format!("{}/luggage/bag1/ready", restarted.base_url))
        .header("X-Caller-Id", "handler")
        .json(&json!({"collection_point": "Carousel 3"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = http
        .post(format!("{}/luggage/bag1/collect", restarted.base_url))
        .header("X-Caller-Id", "alice.near")
        .header("X-Request-Timestamp", "5000")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["result"], "collected");

    let raw = tokio::fs::read_to_string(&cfg.storage.data_file).await?;
    let on_disk: Value = serde_json::from_str(&raw)?;
    assert_eq!(on_disk["bag1"]["status"], "collected");
    assert_eq!(on_disk["bag1"]["check_out_time"], 5000);
    Ok(())
}

#[tokio::test]
async fn e2e_admin_clear_empties_the_file() -> anyhow::Result<()> {
    let cfg = temp_config();
    let http = client();
    let app = start_server(&cfg).await?;

    for id in ["a", "b"] {
        let res = http
            .post(format!("{}/luggage", app.base_url))
            .header("X-Caller-Id", "bob.near")
            .json(&json!({"id": id, "flight_number": "NZ2", "origin": "AKL", "destination": "SFO"}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = http
        .delete(format!("{}/admin/luggage", app.base_url))
        .header("X-API-Key", "wrong")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let res = http
        .delete(format!("{}/admin/luggage", app.base_url))
        .header("X-API-Key", "e2e-admin")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let restarted = start_server(&cfg).await?;
    let res = http
        .get(format!("{}/stats", restarted.base_url))
        .header("X-Caller-Id", "bob.near")
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["total_bags"], 0);
    Ok(())
}
