//! Game Service - persistence for game profiles and course progress.
//!
//! Pure business logic lives in `crate::game`; this module is the sync point
//! between in-memory snapshots and the store. Saves are best-effort: handlers
//! mutate the local snapshot first and a failed write never rolls it back.

use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::BTreeMap;

use crate::game::{CourseProgress, GameProfile};
use crate::models::user::{self, Entity as User};
use crate::models::user_game::{self, Entity as UserGame};
use crate::models::user_progress::{self, Entity as UserProgress};

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    Database(String),
    NotFound,
    Validation(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}

/// Load a user's game profile, or None when no row exists yet.
pub async fn load_profile(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<GameProfile>, ServiceError> {
    let row = UserGame::find()
        .filter(user_game::Column::UserId.eq(user_id))
        .one(db)
        .await?;
    Ok(row.map(GameProfile::from))
}

/// Load a profile, falling back to the fresh default on absence or failure.
///
/// Load failures are logged and swallowed: the caller gets a usable zero
/// state instead of an error (a missing profile is not an error condition).
pub async fn load_profile_or_default(db: &DatabaseConnection, user_id: i32) -> GameProfile {
    match load_profile(db, user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => GameProfile::default(),
        Err(e) => {
            tracing::warn!("Failed to load game profile for user {}: {:?}", user_id, e);
            GameProfile::default()
        }
    }
}

/// Upsert the full profile snapshot for a user.
pub async fn save_profile(
    db: &DatabaseConnection,
    user_id: i32,
    profile: &GameProfile,
) -> Result<(), ServiceError> {
    let badges = serde_json::to_string(&profile.badges)
        .map_err(|e| ServiceError::Validation(e.to_string()))?;
    let progress = serde_json::to_string(&profile.progress)
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    let row = user_game::ActiveModel {
        user_id: Set(user_id),
        points: Set(profile.points as i32),
        level: Set(profile.level as i32),
        streak: Set(profile.streak as i32),
        last_active_date: Set(profile.last_active_date.map(|d| d.to_string())),
        badges: Set(badges),
        progress: Set(progress),
        updated_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };

    UserGame::insert(row)
        .on_conflict(
            OnConflict::column(user_game::Column::UserId)
                .update_columns([
                    user_game::Column::Points,
                    user_game::Column::Level,
                    user_game::Column::Streak,
                    user_game::Column::LastActiveDate,
                    user_game::Column::Badges,
                    user_game::Column::Progress,
                    user_game::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

/// Best-effort persist: apply-locally-first callers use this after mutating
/// their snapshot. Returns whether the write actually landed; a failure is
/// logged and otherwise ignored.
pub async fn persist_profile(
    db: &DatabaseConnection,
    user_id: i32,
    profile: &GameProfile,
) -> bool {
    match save_profile(db, user_id, profile).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                "Game profile sync failed for user {} (local state kept): {:?}",
                user_id,
                e
            );
            false
        }
    }
}

/// Update the denormalized points/level copy on the users row (rankings read
/// model). Separate write from the profile upsert; no atomicity between them.
pub async fn sync_user_points(
    db: &DatabaseConnection,
    user_id: i32,
    points: u32,
    level: u32,
) -> Result<(), ServiceError> {
    let user = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let mut active: user::ActiveModel = user.into();
    active.points = Set(points as i32);
    active.level = Set(level as i32);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());
    active.update(db).await?;

    Ok(())
}

/// Load the progress record for one course; absent records come back as the
/// empty default, not an error.
pub async fn load_course_progress(
    db: &DatabaseConnection,
    user_id: i32,
    course_id: i32,
) -> Result<CourseProgress, ServiceError> {
    let row = UserProgress::find()
        .filter(user_progress::Column::UserId.eq(user_id))
        .filter(user_progress::Column::CourseId.eq(course_id))
        .one(db)
        .await?;
    Ok(row.map(CourseProgress::from).unwrap_or_default())
}

/// Load all of a user's course progress records, keyed by course id.
pub async fn load_all_progress(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<BTreeMap<i32, CourseProgress>, ServiceError> {
    let rows = UserProgress::find()
        .filter(user_progress::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.course_id, CourseProgress::from(row)))
        .collect())
}

/// Upsert one course progress record.
pub async fn save_course_progress(
    db: &DatabaseConnection,
    user_id: i32,
    course_id: i32,
    record: &CourseProgress,
) -> Result<(), ServiceError> {
    let completed = serde_json::to_string(&record.completed_sections)
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    let row = user_progress::ActiveModel {
        user_id: Set(user_id),
        course_id: Set(course_id),
        completed_sections: Set(completed),
        progress_percent: Set(record.progress_percent as i32),
        updated_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };

    UserProgress::insert(row)
        .on_conflict(
            OnConflict::columns([
                user_progress::Column::UserId,
                user_progress::Column::CourseId,
            ])
            .update_columns([
                user_progress::Column::CompletedSections,
                user_progress::Column::ProgressPercent,
                user_progress::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

/// Total completed sections across all of a user's courses.
/// Zero means the next completion is the user's first ever.
pub async fn total_completed_sections(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<u64, ServiceError> {
    let progress = load_all_progress(db, user_id).await?;
    Ok(progress
        .values()
        .map(|record| record.completed_sections.len() as u64)
        .sum())
}
