//! Orchestration over the profile snapshot: client patch merges, quiz
//! results, section completion, and login reconciliation.
//!
//! The policy throughout is local-wins: mutations apply to the in-memory
//! snapshot immediately and unconditionally, and point totals never decrease
//! to match a lower remote value.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use super::badges::{BadgeStatus, FIRST_STEPS, PERFECTIONIST};
use super::profile::GameProfile;
use super::progress::CourseProgress;
use super::streak::StreakOutcome;

/// Points per correctly answered quiz question.
const POINTS_PER_CORRECT_ANSWER: u32 = 20;

/// Partial game-state update as sent by a client sync.
///
/// `level` is deliberately absent: it is always rederived from points.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePatch {
    pub points: Option<u32>,
    pub streak: Option<u32>,
    pub last_active_date: Option<NaiveDate>,
    pub badges: Option<Vec<BadgeStatus>>,
    pub progress: Option<BTreeMap<String, f64>>,
}

/// Result of recording a finished quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub points_awarded: u32,
    pub perfect: bool,
    pub streak: StreakOutcome,
}

/// Result of completing a lesson section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOutcome {
    pub newly_completed: bool,
    pub points_awarded: u32,
    pub first_steps_unlocked: bool,
}

impl GameProfile {
    /// Reconcile against a point total reported from elsewhere (e.g. a
    /// client's unsynced local state at login). A higher reported total is
    /// adopted by adding the positive difference; a lower one is ignored.
    pub fn reconcile_points(&mut self, reported: u32) {
        if reported > self.points {
            self.add_points(reported - self.points);
        }
    }

    /// Merge a client patch into the snapshot.
    ///
    /// Points are reconciled (never decreased), badges merge unlock-only,
    /// progress percents are clamped. Streak and last-active-date are taken
    /// as sent, since the client computed them via the same streak rules.
    pub fn apply_patch(&mut self, patch: GamePatch) {
        if let Some(points) = patch.points {
            self.reconcile_points(points);
        }
        if let Some(streak) = patch.streak {
            self.streak = streak;
        }
        if let Some(date) = patch.last_active_date {
            self.last_active_date = Some(date);
        }
        if let Some(badges) = patch.badges {
            for badge in badges.iter().filter(|b| b.unlocked) {
                self.unlock_badge(&badge.id);
            }
        }
        if let Some(progress) = patch.progress {
            for (course_id, percent) in progress {
                self.update_progress(&course_id, percent);
            }
        }
    }

    /// Record a finished quiz attempt: 20 points per correct answer,
    /// `perfectionist` on a faultless pass, then a streak check for `today`.
    pub fn record_quiz_result(&mut self, correct: u32, total: u32, today: NaiveDate) -> QuizOutcome {
        let points_awarded = correct * POINTS_PER_CORRECT_ANSWER;
        if points_awarded > 0 {
            self.add_points(points_awarded);
        }

        let perfect = total > 0 && correct == total;
        if perfect {
            self.unlock_badge(PERFECTIONIST);
        }

        let streak = self.increment_streak(today);

        QuizOutcome {
            points_awarded,
            perfect,
            streak,
        }
    }

    /// Complete one lesson section of a course.
    ///
    /// `record` is the user's ledger for this course, mutated in place.
    /// `first_ever` says whether the user had zero completed sections across
    /// all courses before this call (the `first-steps` trigger). Idempotent:
    /// a re-completed section awards nothing and fires nothing.
    pub fn complete_section(
        &mut self,
        course_id: &str,
        record: &mut CourseProgress,
        section_index: u32,
        total_sections: u32,
        section_points: u32,
        first_ever: bool,
    ) -> SectionOutcome {
        if !record.mark_section_complete(section_index, total_sections) {
            return SectionOutcome {
                newly_completed: false,
                points_awarded: 0,
                first_steps_unlocked: false,
            };
        }

        self.add_points(section_points);
        self.update_progress(course_id, record.progress_percent as f64);

        let first_steps_unlocked = first_ever && self.unlock_badge(FIRST_STEPS);

        SectionOutcome {
            newly_completed: true,
            points_awarded: section_points,
            first_steps_unlocked,
        }
    }
}
