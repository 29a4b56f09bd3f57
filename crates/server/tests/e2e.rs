use std::net::SocketAddr;

use configs::{AppConfig, BootstrapAdmin, DatabaseConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::routes;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig::sqlite_memory();
    cfg.auth.jwt_secret = "e2e-secret".into();
    cfg.auth.bootstrap_admin = Some(BootstrapAdmin {
        username: "admin".into(),
        password: "admin-pass".into(),
        email: "admin@example.com".into(),
        name: "Administrador".into(),
    });

    let state = server::build_state(&cfg).await?;
    let app = routes::build_router(state, &cfg.server.static_dir);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    let client = reqwest::Client::builder().cookie_store(true).build()?;
    Ok(TestApp { base_url, client })
}

/// Log in through the shared cookie store and hand back the CSRF token.
async fn login(app: &TestApp, username: &str, password: &str) -> anyhow::Result<String> {
    let resp = app
        .client
        .post(app.url("/api/login"))
        .json(&json!({"username": username, "password": password}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let csrf = resp
        .headers()
        .get("x-csrf-token")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("login did not return a csrf token"))?;
    Ok(csrf)
}

#[tokio::test]
async fn e2e_public_endpoints() -> anyhow::Result<()> {
    let app = start_server().await?;

    let resp = app.client.get(app.url("/api/health")).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);

    let services: Value = app.client.get(app.url("/api/services")).send().await?.json().await?;
    assert_eq!(services.as_array().map(Vec::len), Some(4));

    let hours: Value = app.client.get(app.url("/api/hours")).send().await?.json().await?;
    assert_eq!(hours.as_array().map(Vec::len), Some(6));

    let resp = app.client.get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_admin_manages_catalog_and_staff() -> anyhow::Result<()> {
    let app = start_server().await?;
    let csrf = login(&app, "admin", "admin-pass").await?;

    let resp = app
        .client
        .post(app.url("/api/services"))
        .header("x-csrf-token", &csrf)
        .json(&json!({"name": "Afeitado clásico", "kind": "beardeyebrow", "description": "Navaja y toalla caliente", "durationMin": 45, "price": 12.5}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let created: Value = resp.json().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let resp = app
        .client
        .put(app.url(&format!("/api/services/{id}")))
        .header("x-csrf-token", &csrf)
        .json(&json!({"price": 15.0}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let updated: Value = resp.json().await?;
    assert_eq!(updated["price"], 15.0);
    assert_eq!(updated["durationMin"], 45);

    let resp = app
        .client
        .post(app.url("/api/users/admin"))
        .header("x-csrf-token", &csrf)
        .json(&json!({"username": "tomas", "name": "Tomás", "email": "tomas@example.com", "password": "barber1", "role": "barbero"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);

    let barbers: Value = app.client.get(app.url("/api/users/barbers")).send().await?.json().await?;
    assert_eq!(barbers.as_array().map(Vec::len), Some(1));
    assert_eq!(barbers[0]["username"], "tomas");

    let resp = app
        .client
        .delete(app.url(&format!("/api/services/{id}")))
        .header("x-csrf-token", &csrf)
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);
    let resp = app.client.get(app.url(&format!("/api/services/{id}"))).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_booking_and_staff_agenda() -> anyhow::Result<()> {
    let app = start_server().await?;

    let resp = app
        .client
        .post(app.url("/api/users"))
        .json(&json!({"username": "sofia", "name": "Sofía Pérez", "email": "sofia@example.com", "password": "secret1"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);

    let services: Value = app.client.get(app.url("/api/services")).send().await?.json().await?;
    let service_id = services[0]["id"].as_str().unwrap_or_default().to_string();

    let csrf = login(&app, "sofia", "secret1").await?;
    // 2099-01-05 is a Monday
    let resp = app
        .client
        .post(app.url("/api/reservations"))
        .header("x-csrf-token", &csrf)
        .json(&json!({"serviceId": service_id, "date": "2099-01-05", "time": "09:00"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let booked: Value = resp.json().await?;
    assert_eq!(booked["fullName"], "Sofía Pérez");
    let reservation_id = booked["id"].as_str().unwrap_or_default().to_string();

    // lunch break is not bookable
    let resp = app
        .client
        .post(app.url("/api/reservations"))
        .header("x-csrf-token", &csrf)
        .json(&json!({"serviceId": service_id, "date": "2099-01-05", "time": "12:00"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::BAD_REQUEST);

    let resp = app
        .client
        .put(app.url(&format!("/api/reservations/{reservation_id}")))
        .header("x-csrf-token", &csrf)
        .json(&json!({"status": "confirmed"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::FORBIDDEN);

    let admin_csrf = login(&app, "admin", "admin-pass").await?;
    let resp = app
        .client
        .put(app.url(&format!("/api/reservations/{reservation_id}")))
        .header("x-csrf-token", &admin_csrf)
        .json(&json!({"status": "confirmed"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);

    let agenda: Value = app
        .client
        .get(app.url("/api/reservations/confirmed-by-day?date=2099-01-05"))
        .header("x-csrf-token", &admin_csrf)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(agenda.as_array().map(Vec::len), Some(1));
    assert_eq!(agenda[0]["clientName"], "Sofía Pérez");

    let resp = app
        .client
        .post(app.url("/api/login/logout"))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let resp = app
        .client
        .get(app.url("/api/login/me"))
        .header("x-csrf-token", &admin_csrf)
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}
