use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde_json::json;

use crate::auth::Claims;
use crate::models::course::{self, Course, Entity as CourseEntity};

pub async fn list_courses(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match CourseEntity::find()
        .order_by_asc(course::Column::SortOrder)
        .all(&db)
        .await
    {
        Ok(courses) => {
            let dtos: Vec<Course> = courses.into_iter().map(Course::from).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn get_course(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match CourseEntity::find_by_id(id).one(&db).await {
        Ok(Some(model)) => (StatusCode::OK, Json(Course::from(model))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Course not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn get_course_by_slug(
    State(db): State<DatabaseConnection>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match CourseEntity::find()
        .filter(course::Column::Slug.eq(&slug))
        .one(&db)
        .await
    {
        Ok(Some(model)) => (StatusCode::OK, Json(Course::from(model))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Course not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn create_course(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<Course>,
) -> impl IntoResponse {
    if !claims.is_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin role required" })),
        )
            .into_response();
    }

    if payload.title.is_empty() || payload.slug.is_empty() || payload.description.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "title, slug and description are required" })),
        )
            .into_response();
    }

    let sections = match serde_json::to_string(&payload.sections) {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let now = chrono::Utc::now().to_rfc3339();
    let new_course = course::ActiveModel {
        slug: Set(payload.slug),
        title: Set(payload.title),
        description: Set(payload.description),
        sections: Set(sections),
        sort_order: Set(payload.order),
        color: Set(payload.color),
        bg_color: Set(payload.bg_color),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_course.insert(&db).await {
        Ok(model) => (StatusCode::CREATED, Json(Course::from(model))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn update_course(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<Course>,
) -> impl IntoResponse {
    if !claims.is_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin role required" })),
        )
            .into_response();
    }

    let existing = match CourseEntity::find_by_id(id).one(&db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Course not found" })),
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

    let sections = match serde_json::to_string(&payload.sections) {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let mut active: course::ActiveModel = existing.into();
    active.slug = Set(payload.slug);
    active.title = Set(payload.title);
    active.description = Set(payload.description);
    active.sections = Set(sections);
    active.sort_order = Set(payload.order);
    active.color = Set(payload.color);
    active.bg_color = Set(payload.bg_color);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(model) => (StatusCode::OK, Json(Course::from(model))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn delete_course(
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

    match CourseEntity::delete_by_id(id).exec(&db).await {
        Ok(res) if res.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Course not found" })),
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
