//! API route table
//!
//! Composition only: each feature area owns its handlers and exposes a
//! route group; this module assigns every group a path prefix. Prefixes
//! are disjoint by design, so the order groups are mounted in can never
//! change how a request dispatches, and a new feature area is added with
//! one new `.nest(...)` line without touching the existing ones.

use crate::api::handlers::{
    create_pet, delete_pet, get_pet, health_check, list_pets, update_pet, AppState,
};
use crate::auth::middleware::authenticate;
use crate::auth::routes::{login_routes, register_routes};
use axum::{
    middleware,
    routing::get,
    Router,
};

/// Build the API routes
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        .nest("/login", login_routes())
        .nest("/register", register_routes())
        .nest("/pets", pet_routes(state.clone()))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Pet group, mounted under `/pets` behind token authentication
fn pet_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_pets).post(create_pet))
        .route("/:id", get(get_pet).patch(update_pet).delete(delete_pet))
        .layer(middleware::from_fn_with_state(state, authenticate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenIssuer;
    use crate::auth::password::hash_password;
    use crate::db::manager::DatabaseManager;
    use crate::db::models::User;
    use crate::db::repository::{PetRepository, Repository, UserRepository};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_state() -> (AppState, Arc<DatabaseManager>) {
        let db = Arc::new(DatabaseManager::new_in_memory().unwrap());
        let state = AppState {
            user_repo: Arc::new(UserRepository::new(db.clone())),
            pet_repo: Arc::new(PetRepository::new(db.clone())),
            token_issuer: Arc::new(TokenIssuer::new("test-secret").unwrap()),
        };

        state
            .user_repo
            .create(&User {
                id: "u1".to_string(),
                full_name: "A".to_string(),
                email: "a@x.com".to_string(),
                password_hash: hash_password("secret123").unwrap(),
                avatar: String::new(),
                created_at: chrono::Utc::now().to_rfc3339(),
            })
            .await
            .unwrap();

        (state, db)
    }

    fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn bearer_request(
        method: &str,
        uri: &str,
        token: &str,
        body: Option<&serde_json::Value>,
    ) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json");
        match body {
            Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn response_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    async fn login(router: &Router, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
        let request = json_request(
            "POST",
            "/login",
            &serde_json::json!({"email": email, "password": password}),
        );
        let response = router.clone().oneshot(request).await.unwrap();
        response_json(response).await
    }

    #[tokio::test]
    async fn test_login_success_returns_user_and_token() {
        let (state, _db) = test_state().await;
        let issuer = state.token_issuer.clone();
        let router = build_api_routes(state);

        let (status, body) = login(&router, "a@x.com", "secret123").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "u1");
        assert_eq!(body["name"], "A");
        assert_eq!(body["email"], "a@x.com");

        // The token round-trips to the verified subject.
        let claims = issuer.decode(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.sub, "u1");

        // The stored credential never appears in the response.
        assert!(body.get("password_hash").is_none());
        assert!(body.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (state, _db) = test_state().await;
        let router = build_api_routes(state);

        let (wrong_status, wrong_body) = login(&router, "a@x.com", "wrong").await;
        let (unknown_status, unknown_body) = login(&router, "nobody@x.com", "anything").await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body["message"], "Email hoặc mật khẩu không đúng");
        assert_eq!(unknown_status, wrong_status);
        assert_eq!(unknown_body, wrong_body);
    }

    #[tokio::test]
    async fn test_store_fault_maps_to_generic_server_error() {
        let (state, db) = test_state().await;
        let router = build_api_routes(state);

        db.execute(|conn| {
            conn.execute_batch("DROP TABLE users")?;
            Ok(())
        })
        .await
        .unwrap();

        let (status, body) = login(&router, "a@x.com", "secret123").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Lỗi server");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_register_creates_account_and_issues_token() {
        let (state, _db) = test_state().await;
        let issuer = state.token_issuer.clone();
        let router = build_api_routes(state);

        let request = json_request(
            "POST",
            "/register",
            &serde_json::json!({
                "fullName": "B",
                "email": "b@x.com",
                "password": "hunter2hunter2"
            }),
        );
        let response = router.clone().oneshot(request).await.unwrap();
        let (status, body) = response_json(response).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "B");
        assert_eq!(body["email"], "b@x.com");
        let claims = issuer.decode(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.sub, body["id"].as_str().unwrap());

        // The new account can log in.
        let (status, _) = login(&router, "b@x.com", "hunter2hunter2").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let (state, _db) = test_state().await;
        let router = build_api_routes(state);

        let request = json_request(
            "POST",
            "/register",
            &serde_json::json!({
                "fullName": "A again",
                "email": "a@x.com",
                "password": "secret123"
            }),
        );
        let response = router.oneshot(request).await.unwrap();
        let (status, body) = response_json(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email đã được sử dụng");
    }

    #[tokio::test]
    async fn test_register_rejects_missing_fields() {
        let (state, _db) = test_state().await;
        let router = build_api_routes(state);

        let request = json_request(
            "POST",
            "/register",
            &serde_json::json!({
                "fullName": " ",
                "email": "c@x.com",
                "password": "secret123"
            }),
        );
        let response = router.oneshot(request).await.unwrap();
        let (status, body) = response_json(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Vui lòng nhập đầy đủ thông tin");
    }

    #[tokio::test]
    async fn test_pet_routes_require_authentication() {
        let (state, _db) = test_state().await;
        let router = build_api_routes(state);

        let request = Request::builder()
            .method("GET")
            .uri("/pets")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let (status, body) = response_json(response).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Không được phép truy cập");
    }

    #[tokio::test]
    async fn test_pet_lifecycle_through_the_router() {
        let (state, _db) = test_state().await;
        let router = build_api_routes(state);

        let (_, login_body) = login(&router, "a@x.com", "secret123").await;
        let token = login_body["token"].as_str().unwrap().to_string();

        // Starts empty
        let response = router
            .clone()
            .oneshot(bearer_request("GET", "/pets", &token, None))
            .await
            .unwrap();
        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 0);

        // Create
        let response = router
            .clone()
            .oneshot(bearer_request(
                "POST",
                "/pets",
                &token,
                Some(&serde_json::json!({"name": "Blaze", "species": "dragon"})),
            ))
            .await
            .unwrap();
        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Blaze");
        assert_eq!(body["level"], 1);
        let pet_id = body["id"].as_str().unwrap().to_string();

        // Gain experience: 250 XP lifts level 1 -> 3
        let response = router
            .clone()
            .oneshot(bearer_request(
                "PATCH",
                &format!("/pets/{}", pet_id),
                &token,
                Some(&serde_json::json!({"gain_experience": 250})),
            ))
            .await
            .unwrap();
        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"], 250);
        assert_eq!(body["level"], 3);

        // Delete
        let response = router
            .clone()
            .oneshot(bearer_request(
                "DELETE",
                &format!("/pets/{}", pet_id),
                &token,
                None,
            ))
            .await
            .unwrap();
        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_other_users_pets_read_as_missing() {
        let (state, _db) = test_state().await;

        state
            .user_repo
            .create(&User {
                id: "u2".to_string(),
                full_name: "B".to_string(),
                email: "b@x.com".to_string(),
                password_hash: hash_password("hunter2hunter2").unwrap(),
                avatar: String::new(),
                created_at: chrono::Utc::now().to_rfc3339(),
            })
            .await
            .unwrap();
        let router = build_api_routes(state);

        let (_, a_login) = login(&router, "a@x.com", "secret123").await;
        let a_token = a_login["token"].as_str().unwrap().to_string();

        let response = router
            .clone()
            .oneshot(bearer_request(
                "POST",
                "/pets",
                &a_token,
                Some(&serde_json::json!({"name": "Blaze", "species": "dragon"})),
            ))
            .await
            .unwrap();
        let (_, pet) = response_json(response).await;
        let pet_id = pet["id"].as_str().unwrap().to_string();

        let (_, b_login) = login(&router, "b@x.com", "hunter2hunter2").await;
        let b_token = b_login["token"].as_str().unwrap().to_string();

        let response = router
            .oneshot(bearer_request(
                "GET",
                &format!("/pets/{}", pet_id),
                &b_token,
                None,
            ))
            .await
            .unwrap();
        let (status, _) = response_json(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mounting_more_groups_leaves_login_unchanged() {
        let (state, _db) = test_state().await;

        // Login group alone, and the full table with every group mounted.
        let login_only = Router::new()
            .nest("/login", login_routes())
            .with_state(state.clone());
        let full = build_api_routes(state);

        let request = serde_json::json!({"email": "a@x.com", "password": "wrong"});
        let lone = login_only
            .oneshot(json_request("POST", "/login", &request))
            .await
            .unwrap();
        let composed = full
            .oneshot(json_request("POST", "/login", &request))
            .await
            .unwrap();

        let (lone_status, lone_body) = response_json(lone).await;
        let (composed_status, composed_body) = response_json(composed).await;

        assert_eq!(lone_status, composed_status);
        assert_eq!(lone_body, composed_body);
    }

    #[tokio::test]
    async fn test_unknown_prefix_is_not_found() {
        let (state, _db) = test_state().await;
        let router = build_api_routes(state);

        let request = Request::builder()
            .method("GET")
            .uri("/workouts")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
