//! Game profile endpoints: the HTTP face of the reconciler.
//!
//! Every mutation applies to the in-memory snapshot first and returns it;
//! persistence is best-effort and a failed write is logged, never surfaced
//! as a blocking error.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::game::GamePatch;
use crate::services::game_service;

/// Persist the snapshot and mirror points/level onto the users row.
/// Both writes are independent; either may fail without affecting the
/// response.
async fn persist_snapshot(db: &DatabaseConnection, user_id: i32, profile: &crate::game::GameProfile) {
    game_service::persist_profile(db, user_id, profile).await;
    if let Err(e) = game_service::sync_user_points(db, user_id, profile.points, profile.level).await
    {
        tracing::warn!("Failed to sync user points for user {}: {:?}", user_id, e);
    }
}

#[utoipa::path(
    get,
    path = "/api/users/me/game",
    responses(
        (status = 200, description = "Current game profile snapshot"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_game(State(db): State<DatabaseConnection>, claims: Claims) -> impl IntoResponse {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    let profile = game_service::load_profile_or_default(&db, user_id).await;
    (StatusCode::OK, Json(profile)).into_response()
}

pub async fn patch_game(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(patch): Json<GamePatch>,
) -> impl IntoResponse {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    let mut profile = game_service::load_profile_or_default(&db, user_id).await;
    profile.apply_patch(patch);
    persist_snapshot(&db, user_id, &profile).await;

    (StatusCode::OK, Json(profile)).into_response()
}

pub async fn patch_points(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    // Validated before any state change; negative or oversized totals are
    // also malformed.
    let points = match body
        .get("points")
        .and_then(Value::as_u64)
        .and_then(|p| u32::try_from(p).ok())
    {
        Some(p) => p,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "points (non-negative number) is required" })),
            )
                .into_response();
        }
    };

    let mut profile = game_service::load_profile_or_default(&db, user_id).await;
    profile.reconcile_points(points);
    persist_snapshot(&db, user_id, &profile).await;

    (
        StatusCode::OK,
        Json(json!({ "points": profile.points, "level": profile.level })),
    )
        .into_response()
}

/// Daily activity check-in: advances the streak for today and fires any
/// milestone unlocks. Safe to call repeatedly; same-day repeats are no-ops.
pub async fn check_in(State(db): State<DatabaseConnection>, claims: Claims) -> impl IntoResponse {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    let today = chrono::Utc::now().date_naive();
    let mut profile = game_service::load_profile_or_default(&db, user_id).await;
    let outcome = profile.increment_streak(today);
    if outcome.advanced {
        persist_snapshot(&db, user_id, &profile).await;
    }

    (
        StatusCode::OK,
        Json(json!({
            "advanced": outcome.advanced,
            "unlockedBadges": outcome.unlocked_badges,
            "bonusPoints": outcome.bonus_points,
            "game": profile,
        })),
    )
        .into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultRequest {
    correct: u32,
    total: u32,
}

pub async fn submit_quiz_result(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<QuizResultRequest>,
) -> impl IntoResponse {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    if payload.total == 0 || payload.correct > payload.total {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "correct must be between 0 and total, total > 0" })),
        )
            .into_response();
    }

    let today = chrono::Utc::now().date_naive();
    let mut profile = game_service::load_profile_or_default(&db, user_id).await;
    let outcome = profile.record_quiz_result(payload.correct, payload.total, today);
    persist_snapshot(&db, user_id, &profile).await;

    (
        StatusCode::OK,
        Json(json!({
            "pointsAwarded": outcome.points_awarded,
            "perfect": outcome.perfect,
            "streak": profile.streak,
            "game": profile,
        })),
    )
        .into_response()
}
