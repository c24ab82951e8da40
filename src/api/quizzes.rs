use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::models::quiz::{self, Entity as QuizEntity, Quiz};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuery {
    course_id: Option<i32>,
}

pub async fn get_quiz_for_course(
    State(db): State<DatabaseConnection>,
    Query(query): Query<QuizQuery>,
) -> impl IntoResponse {
    let course_id = match query.course_id {
        Some(id) => id,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "courseId is required" })),
            )
                .into_response();
        }
    };

    match QuizEntity::find()
        .filter(quiz::Column::CourseId.eq(course_id))
        .one(&db)
        .await
    {
        Ok(Some(model)) => (StatusCode::OK, Json(Quiz::from(model))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No quiz for this course" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn get_quiz(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match QuizEntity::find_by_id(id).one(&db).await {
        Ok(Some(model)) => (StatusCode::OK, Json(Quiz::from(model))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Quiz not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn create_quiz(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<Quiz>,
) -> impl IntoResponse {
    if !claims.is_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin role required" })),
        )
            .into_response();
    }

    if payload.title.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "courseId and title are required" })),
        )
            .into_response();
    }

    let questions = match serde_json::to_string(&payload.questions) {
        Ok(q) => q,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let now = chrono::Utc::now().to_rfc3339();
    let new_quiz = quiz::ActiveModel {
        course_id: Set(payload.course_id),
        title: Set(payload.title),
        questions: Set(questions),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_quiz.insert(&db).await {
        Ok(model) => (StatusCode::CREATED, Json(Quiz::from(model))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn update_quiz(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<Quiz>,
) -> impl IntoResponse {
    if !claims.is_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin role required" })),
        )
            .into_response();
    }

    let existing = match QuizEntity::find_by_id(id).one(&db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Quiz not found" })),
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

    let questions = match serde_json::to_string(&payload.questions) {
        Ok(q) => q,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let mut active: quiz::ActiveModel = existing.into();
    active.course_id = Set(payload.course_id);
    active.title = Set(payload.title);
    active.questions = Set(questions);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(model) => (StatusCode::OK, Json(Quiz::from(model))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn delete_quiz(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if !claims.is_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin role required" })),
        )
            .into_response();
    }

    match QuizEntity::delete_by_id(id).exec(&db).await {
        Ok(res) if res.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Quiz not found" })),
        )
            .into_response(),
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
