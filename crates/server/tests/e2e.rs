use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::{Method, StatusCode as HttpStatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    root: PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let root = std::env::temp_dir().join(format!("vehicle_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = root.join("data");
    cfg.storage.static_dir = root.clone();

    let app = server::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, root })
}

#[tokio::test]
async fn e2e_save_load_delete_cycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let record = json!({
        "plateNumber": "서울12가3456",
        "vehicle": {"id": "v-kr", "name": "트럭"},
        "items": [{"name": "박스", "qty": 3}]
    });
    let res = c.post(format!("{}/api/save", app.base_url)).json(&record).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "success");

    // non-ASCII survives the trip to disk unescaped
    let text = tokio::fs::read_to_string(app.root.join("data").join("서울12가3456.json")).await?;
    assert!(text.contains("\"트럭\""));

    let res = c.get(format!("{}/api/load-all", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["vehicles"], json!([{"id": "v-kr", "name": "트럭"}]));
    assert_eq!(body["vehicleData"]["v-kr"]["items"], json!([{"name": "박스", "qty": 3}]));

    let res = c
        .post(format!("{}/api/delete", app.base_url))
        .json(&json!({"plateNumber": "서울12가3456"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"status": "success"}));

    let res = c.get(format!("{}/api/load-all", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, json!({"vehicles": [], "vehicleData": {}}));

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_preflight_and_static() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .request(Method::OPTIONS, format!("{}/api/save", app.base_url))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["access-control-allow-methods"], "GET, POST, OPTIONS");
    assert!(res.bytes().await?.is_empty());

    tokio::fs::write(app.root.join("hello.txt"), "hi").await?;
    let res = c.get(format!("{}/hello.txt", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "hi");

    let res = c.get(format!("{}/nope.txt", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}
