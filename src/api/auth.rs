use crate::auth::{create_jwt, hash_password, verify_password, Claims};
use crate::game::GameProfile;
use crate::models::user::{self, Entity as User, UserSummary};
use crate::services::game_service;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    name: String,
}

pub async fn signup(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<SignupRequest>,
) -> impl IntoResponse {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || payload.password.is_empty() || payload.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email, password and name are required" })),
        )
            .into_response();
    }

    let existing = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(&db)
        .await;
    match existing {
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "An account already exists with this email" })),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
        Ok(None) => {}
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e })),
            )
                .into_response();
        }
    };

    let now = chrono::Utc::now().to_rfc3339();
    let new_user = user::ActiveModel {
        email: Set(email),
        password_hash: Set(password_hash),
        name: Set(payload.name.trim().to_owned()),
        role: Set("user".to_string()),
        points: Set(0),
        level: Set(1),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = match new_user.insert(&db).await {
        Ok(u) => u,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    // Create the fresh game profile alongside the account. A failure here is
    // non-fatal: the profile is created lazily on first access anyway.
    if !game_service::persist_profile(&db, saved.id, &GameProfile::default()).await {
        tracing::warn!("Signup for user {} without initial game profile", saved.id);
    }

    match create_jwt(saved.id, &saved.email, &saved.role) {
        Ok(token) => (
            StatusCode::CREATED,
            Json(json!({ "token": token, "user": UserSummary::from(saved) })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let email = payload.email.trim().to_lowercase();
    tracing::info!("Login attempt for {}", email);

    let user = match User::find()
        .filter(user::Column::Email.eq(&email))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            tracing::warn!("User not found: {}", email);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => match create_jwt(user.id, &user.email, &user.role) {
            Ok(token) => (
                StatusCode::OK,
                Json(json!({ "token": token, "user": UserSummary::from(user) })),
            )
                .into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e })),
            )
                .into_response(),
        },
        _ => {
            tracing::warn!("Password verification failed for {}", user.email);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }
}

pub async fn me(State(db): State<DatabaseConnection>, claims: Claims) -> impl IntoResponse {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    let user = match User::find_by_id(user_id).one(&db).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "User not found" })),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let game = game_service::load_profile_or_default(&db, user_id).await;

    (
        StatusCode::OK,
        Json(json!({ "user": UserSummary::from(user), "game": game })),
    )
        .into_response()
}
