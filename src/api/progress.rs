//! Course progress endpoints.
//!
//! Section completion is computed server-side from the course content, so a
//! client can only ever mark a real section done; points and the
//! `first-steps` badge follow from the completion, idempotently.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::game::CourseProgress;
use crate::models::course::{Course, Entity as CourseEntity};
use crate::services::game_service;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    course_id: Option<i32>,
}

pub async fn get_progress(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(query): Query<ProgressQuery>,
) -> impl IntoResponse {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    if let Some(course_id) = query.course_id {
        return match game_service::load_course_progress(&db, user_id, course_id).await {
            Ok(record) => (StatusCode::OK, Json(record)).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("{:?}", e) })),
            )
                .into_response(),
        };
    }

    match game_service::load_all_progress(&db, user_id).await {
        Ok(records) => {
            let by_course: BTreeMap<String, CourseProgress> = records
                .into_iter()
                .map(|(course_id, record)| (course_id.to_string(), record))
                .collect();
            (StatusCode::OK, Json(by_course)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("{:?}", e) })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSectionRequest {
    course_id: i32,
    section_index: u32,
}

pub async fn complete_section(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CompleteSectionRequest>,
) -> impl IntoResponse {
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    // Course content is the external fact source for section count and points.
    let course = match CourseEntity::find_by_id(payload.course_id).one(&db).await {
        Ok(Some(model)) => Course::from(model),
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

    let total_sections = course.sections.len() as u32;
    let section = match course.sections.get(payload.section_index as usize) {
        Some(s) => s,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "sectionIndex out of range" })),
            )
                .into_response();
        }
    };
    let section_points = section.points;

    let first_ever = match game_service::total_completed_sections(&db, user_id).await {
        Ok(total) => total == 0,
        Err(e) => {
            tracing::warn!("Failed to count completed sections: {:?}", e);
            false
        }
    };

    let mut record = match game_service::load_course_progress(&db, user_id, payload.course_id).await
    {
        Ok(r) => r,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("{:?}", e) })),
            )
                .into_response();
        }
    };

    let mut profile = game_service::load_profile_or_default(&db, user_id).await;
    let course_key = payload.course_id.to_string();
    let outcome = profile.complete_section(
        &course_key,
        &mut record,
        payload.section_index,
        total_sections,
        section_points,
        first_ever,
    );

    if outcome.newly_completed {
        if let Err(e) =
            game_service::save_course_progress(&db, user_id, payload.course_id, &record).await
        {
            tracing::warn!("Failed to save course progress: {:?}", e);
        }
        game_service::persist_profile(&db, user_id, &profile).await;
        if let Err(e) =
            game_service::sync_user_points(&db, user_id, profile.points, profile.level).await
        {
            tracing::warn!("Failed to sync user points: {:?}", e);
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "progress": record,
            "pointsAwarded": outcome.points_awarded,
            "firstStepsUnlocked": outcome.first_steps_unlocked,
            "game": profile,
        })),
    )
        .into_response()
}
