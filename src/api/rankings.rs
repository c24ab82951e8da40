use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::*;
use serde_json::json;

use crate::models::user::{self, Entity as User, UserSummary};

/// How many leaderboard entries a single read returns.
const LEADERBOARD_CAP: u64 = 100;

#[utoipa::path(
    get,
    path = "/api/rankings",
    responses(
        (status = 200, description = "Top users by points, descending")
    )
)]
pub async fn get_rankings(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match User::find()
        .order_by_desc(user::Column::Points)
        .limit(LEADERBOARD_CAP)
        .all(&db)
        .await
    {
        Ok(users) => {
            let leaderboard: Vec<UserSummary> =
                users.into_iter().map(UserSummary::from).collect();
            (StatusCode::OK, Json(json!({ "leaderboard": leaderboard }))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
