use actix_web::{test, web, App};
use authgate_server::auth::handlers::{login, protected};
use authgate_server::auth::RequireAuth;
use authgate_server::config::{AuthConfig, CorsConfig, ServerConfig};
use authgate_server::{AppState, Settings, TokenService, UserStore};
use serde_json::json;
use std::sync::Arc;

fn test_state(ttl_seconds: i64) -> web::Data<AppState> {
    let config = Settings {
        environment: "test".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: 1,
        },
        auth: AuthConfig {
            jwt_secret: "test_secret".to_string(),
            token_ttl_seconds: ttl_seconds,
        },
        cors: CorsConfig {
            enabled: false,
            allow_any_origin: false,
            max_age: 3600,
        },
    };

    let tokens = TokenService::new(
        config.auth.jwt_secret.clone(),
        chrono::Duration::seconds(ttl_seconds),
    )
    .unwrap();

    web::Data::new(AppState {
        config: Arc::new(config),
        users: Arc::new(UserStore::with_defaults()),
        tokens: Arc::new(tokens),
    })
}

macro_rules! spawn_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .route("/login", web::post().to(login))
                .service(
                    web::scope("")
                        .wrap(RequireAuth::new($state.tokens.clone()))
                        .route("/protected", web::get().to(protected)),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn test_login_and_access_protected() {
    let state = test_state(60);
    let app = spawn_app!(state);

    let login_response = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({
            "username": "testing@test.com",
            "password": "changeme"
        }))
        .send_request(&app)
        .await;

    assert_eq!(login_response.status(), 200);
    let login_body: serde_json::Value = test::read_body_json(login_response).await;
    let token = login_body["token"].as_str().expect("token is a string");
    assert_eq!(token.split('.').count(), 3);

    let protected_response = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .send_request(&app)
        .await;

    assert_eq!(protected_response.status(), 200);
    let body: serde_json::Value = test::read_body_json(protected_response).await;
    assert_eq!(body["message"], "You made it!");
    assert_eq!(body["user"]["sub"], "testing@test.com");
}

#[actix_web::test]
async fn test_login_unknown_user() {
    let state = test_state(60);
    let app = spawn_app!(state);

    let response = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({
            "username": "nonexistent@test.com",
            "password": "changeme"
        }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "incorrect username \\ password");
}

#[actix_web::test]
async fn test_login_wrong_password() {
    let state = test_state(60);
    let app = spawn_app!(state);

    let response = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({
            "username": "testing@test.com",
            "password": "wrong"
        }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 401);
    let wrong_password_body: serde_json::Value = test::read_body_json(response).await;

    // The body must not reveal whether the user exists
    let response = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({
            "username": "nonexistent@test.com",
            "password": "wrong"
        }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 401);
    let unknown_user_body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(wrong_password_body, unknown_user_body);
}

#[actix_web::test]
async fn test_login_rejects_malformed_body() {
    let state = test_state(60);
    let app = spawn_app!(state);

    // Missing password field
    let response = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "testing@test.com" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);

    // Wrong-typed username field
    let response = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": 42, "password": "changeme" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_protected_without_token() {
    let state = test_state(60);
    let app = spawn_app!(state);

    let response = test::TestRequest::get()
        .uri("/protected")
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "token not found");
}

#[actix_web::test]
async fn test_protected_with_bare_scheme() {
    let state = test_state(60);
    let app = spawn_app!(state);

    // "Bearer" with no second part presents no token
    let response = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer"))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "token not found");
}

#[actix_web::test]
async fn test_protected_with_wrong_scheme() {
    let state = test_state(60);
    let app = spawn_app!(state);

    let response = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Token abc"))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "invalid token");
}

#[actix_web::test]
async fn test_protected_with_tampered_token() {
    let state = test_state(60);
    let app = spawn_app!(state);

    let mut token = state.tokens.issue("testing@test.com").unwrap();
    let last = token.pop().unwrap();
    token.push(if last == 'A' { 'B' } else { 'A' });

    let response = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "invalid token");
}

#[actix_web::test]
async fn test_protected_with_expired_token() {
    // A negative TTL mints tokens that are already past their expiry
    let state = test_state(-60);
    let app = spawn_app!(state);

    let login_response = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({
            "username": "testing@test.com",
            "password": "changeme"
        }))
        .send_request(&app)
        .await;

    assert_eq!(login_response.status(), 200);
    let login_body: serde_json::Value = test::read_body_json(login_response).await;
    let token = login_body["token"].as_str().unwrap();

    let response = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "token expired");
}
