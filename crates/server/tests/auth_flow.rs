use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use service::auth::AuthConfig;
use service::{Repositories, Services};
use tower::Service;

use server::routes;
use server::state::ServerState;

async fn build_app() -> anyhow::Result<Router> {
    let services = Services::new(
        Repositories::in_memory(),
        AuthConfig { jwt_secret: "test-secret".into(), token_ttl_secs: 3600 },
        30,
    );
    services.seed_defaults().await?;
    services.auth.ensure_admin("admin", "admin-pass", "admin@example.com", "Administrador").await?;
    let state = ServerState { services, secure_cookies: false };
    Ok(routes::build_router(state, "dist"))
}

/// Cookie pair and CSRF token of a logged-in session.
struct Session {
    cookie: String,
    csrf: String,
}

fn json_request(method: &str, uri: &str, body: Value, session: Option<&Session>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(s) = session {
        builder = builder.header(header::COOKIE, &s.cookie).header("x-csrf-token", &s.csrf);
    }
    Ok(builder.body(Body::from(serde_json::to_vec(&body)?))?)
}

fn get_request(uri: &str, session: Option<&Session>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(s) = session {
        builder = builder.header(header::COOKIE, &s.cookie).header("x-csrf-token", &s.csrf);
    }
    Ok(builder.body(Body::empty())?)
}

async fn body_json(resp: Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn login(app: &mut Router, username: &str, password: &str) -> anyhow::Result<Session> {
    let req = json_request("POST", "/api/login", json!({"username": username, "password": password}), None)?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp.headers().get(header::SET_COOKIE).expect("token cookie").to_str()?.to_string();
    assert!(set_cookie.contains("HttpOnly"));
    let csrf = resp.headers().get("x-csrf-token").expect("csrf header").to_str()?.to_string();
    let cookie = set_cookie.split(';').next().unwrap_or_default().to_string();
    Ok(Session { cookie, csrf })
}

async fn register(app: &mut Router, username: &str) -> anyhow::Result<Response> {
    let body = json!({
        "username": username,
        "name": "Cliente Prueba",
        "email": format!("{username}@example.com"),
        "password": "secret1",
    });
    Ok(app.call(json_request("POST", "/api/users", body, None)?).await?)
}

async fn haircut_id(app: &mut Router) -> anyhow::Result<String> {
    let resp = app.call(get_request("/api/services", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await?;
    let id = list
        .as_array()
        .and_then(|items| items.iter().find(|s| s["name"] == "Corte de cabello"))
        .and_then(|s| s["id"].as_str())
        .expect("seeded haircut service");
    Ok(id.to_string())
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let resp = app.call(get_request("/api/health", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn unknown_api_path_is_json_404() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let resp = app.call(get_request("/api/nope", None)?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await?, json!({"error": "unknown endpoint"}));
    Ok(())
}

#[tokio::test]
async fn register_login_and_me() -> anyhow::Result<()> {
    let mut app = build_app().await?;

    let resp = register(&mut app, "maria").await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await?;
    assert_eq!(created["role"], "cliente");
    assert!(created.get("passwordHash").is_none());

    let resp = register(&mut app, "maria").await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let session = login(&mut app, "maria", "secret1").await?;
    let resp = app.call(get_request("/api/login/me", Some(&session))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?["username"], "maria");
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_rejected() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    register(&mut app, "pedro").await?;
    let req = json_request("POST", "/api/login", json!({"username": "pedro", "password": "nope-nope"}), None)?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await?, json!({"error": "invalid username or password"}));
    Ok(())
}

#[tokio::test]
async fn session_needs_cookie_and_matching_csrf() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    register(&mut app, "lucia").await?;

    let resp = app.call(get_request("/api/login/me", None)?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await?, json!({"error": "token missing"}));

    let session = login(&mut app, "lucia", "secret1").await?;
    let forged = Session { cookie: session.cookie.clone(), csrf: "not-the-token".into() };
    let resp = app.call(get_request("/api/login/me", Some(&forged))?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn staff_routes_are_role_gated() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    register(&mut app, "ana").await?;
    let client = login(&mut app, "ana", "secret1").await?;

    let resp = app.call(get_request("/api/users", Some(&client))?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await?, json!({"error": "insufficient permissions"}));

    let resp = app.call(get_request("/api/reservations", Some(&client))?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let admin = login(&mut app, "admin", "admin-pass").await?;
    let resp = app.call(get_request("/api/users", Some(&admin))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn self_registration_cannot_pick_a_staff_role() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let body = json!({
        "username": "intruso",
        "name": "Intruso",
        "email": "intruso@example.com",
        "password": "secret1",
        "role": "admin",
    });
    let resp = app.call(json_request("POST", "/api/users", body, None)?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn malformed_id_is_bad_request() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let resp = app.call(get_request("/api/services/not-a-uuid", None)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await?, json!({"error": "malformatted id"}));
    Ok(())
}

#[tokio::test]
async fn booking_a_taken_slot_conflicts() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let service_id = haircut_id(&mut app).await?;
    register(&mut app, "carla").await?;
    register(&mut app, "diego").await?;
    let carla = login(&mut app, "carla", "secret1").await?;
    let diego = login(&mut app, "diego", "secret1").await?;

    // 2099-01-05 is a Monday, open 09:00-19:00 by default
    let uri = format!("/api/reservations/availability?date=2099-01-05&serviceId={service_id}");
    let resp = app.call(get_request(&uri, None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let availability = body_json(resp).await?;
    let ten = availability["slots"]
        .as_array()
        .and_then(|slots| slots.iter().find(|s| s["time"] == "10:00"))
        .cloned()
        .expect("10:00 slot");
    assert_eq!(ten["available"], true);

    let booking = json!({"serviceId": service_id, "date": "2099-01-05", "time": "10:00"});
    let resp = app.call(json_request("POST", "/api/reservations", booking.clone(), Some(&carla))?).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await?;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["time"], "10:00");

    let resp = app.call(json_request("POST", "/api/reservations", booking, Some(&diego))?).await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await?, json!({"error": "time slot not available"}));

    let resp = app.call(get_request(&uri, None)?).await?;
    let availability = body_json(resp).await?;
    let ten = availability["slots"]
        .as_array()
        .and_then(|slots| slots.iter().find(|s| s["time"] == "10:00"))
        .cloned()
        .expect("10:00 slot");
    assert_eq!(ten["available"], false);

    let resp = app.call(get_request("/api/reservations/my-reservations", Some(&carla))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?.as_array().map(Vec::len), Some(1));

    let id = created["id"].as_str().expect("reservation id");
    let resp = app.call(json_request("DELETE", &format!("/api/reservations/{id}"), json!({}), Some(&diego))?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = app.call(json_request("DELETE", &format!("/api/reservations/{id}"), json!({}), Some(&carla))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?["status"], "cancelled");
    Ok(())
}

#[tokio::test]
async fn logout_clears_the_cookie() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let resp = app.call(json_request("POST", "/api/login/logout", json!({}), None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp.headers().get(header::SET_COOKIE).expect("removal cookie").to_str()?.to_string();
    assert!(set_cookie.starts_with("token="));
    assert_eq!(body_json(resp).await?, json!({"message": "Logged out successfully"}));
    Ok(())
}
