use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode};
use roster_server::{build_router, store::MemoryStore, AppState};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_server() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind test listener")?;
    let addr = listener.local_addr()?;
    let app = build_router(Arc::new(AppState::new(Arc::new(MemoryStore::new()))));

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    Ok(addr)
}

#[tokio::test]
async fn test_crud_over_http() -> Result<()> {
    let addr = spawn_server().await?;
    let client = Client::new();
    let base = format!("http://{}/api/users", addr);

    let created: Value = client
        .post(&base)
        .json(&json!({"name": "Ann", "email": "ann@x.com"}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(created, json!({"id": 1, "name": "Ann", "email": "ann@x.com"}));

    let response = client
        .put(format!("{}/1", base))
        .json(&json!({"name": "Ann B", "email": "ann@x.com"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Value>().await?["name"], "Ann B");

    let listed: Vec<Value> = client.get(&base).send().await?.json().await?;
    assert_eq!(listed.len(), 1);

    let response = client.delete(format!("{}/1", base)).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Value>().await?, json!({"message": "User deleted"}));

    let response = client.get(format!("{}/1", base)).send().await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_browser_preflight() -> Result<()> {
    let addr = spawn_server().await?;

    let response = Client::new()
        .request(Method::OPTIONS, format!("http://{}/api/users/1", addr))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, PUT, DELETE");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert!(response.bytes().await?.is_empty());

    Ok(())
}
