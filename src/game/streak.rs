//! Consecutive-day activity streak.
//!
//! Dates are compared at day granularity using ISO calendar dates, never
//! timestamps, so time-of-day components cannot cause off-by-one errors.

use chrono::NaiveDate;

use super::badges::{STREAK_10, STREAK_5, STREAK_7};
use super::profile::GameProfile;

/// Points granted when a streak reaches 7 consecutive days.
const WEEK_STREAK_BONUS: u32 = 100;

/// What a streak increment did, so callers can log or notify.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StreakOutcome {
    /// False when the call was a no-op (same day, or clock skew guard).
    pub advanced: bool,
    pub streak: u32,
    pub unlocked_badges: Vec<String>,
    pub bonus_points: u32,
}

impl GameProfile {
    /// Advance the streak for activity on `today`.
    ///
    /// Same-day repeats and out-of-order dates (today before the last active
    /// date) are no-ops. A one-day gap extends the streak, anything larger
    /// restarts it at 1. Milestones fire on the exact values 5, 7 and 10.
    pub fn increment_streak(&mut self, today: NaiveDate) -> StreakOutcome {
        let new_streak = match self.last_active_date {
            None => 1,
            Some(last) => {
                let diff_days = (today - last).num_days();
                if diff_days == 1 {
                    self.streak + 1
                } else if diff_days > 1 {
                    1
                } else {
                    // Same day already counted, or clock skew; leave untouched.
                    return StreakOutcome {
                        advanced: false,
                        streak: self.streak,
                        ..Default::default()
                    };
                }
            }
        };

        self.streak = new_streak;
        self.last_active_date = Some(today);

        let mut outcome = StreakOutcome {
            advanced: true,
            streak: new_streak,
            ..Default::default()
        };

        let milestone = match new_streak {
            5 => Some(STREAK_5),
            7 => Some(STREAK_7),
            10 => Some(STREAK_10),
            _ => None,
        };
        if let Some(badge_id) = milestone {
            if self.unlock_badge(badge_id) {
                outcome.unlocked_badges.push(badge_id.to_string());
            }
            if new_streak == 7 {
                self.add_points(WEEK_STREAK_BONUS);
                outcome.bonus_points = WEEK_STREAK_BONUS;
            }
        }

        outcome
    }

    /// Drop the streak back to zero and forget the last active date.
    /// No badge side effects.
    pub fn reset_streak(&mut self) {
        self.streak = 0;
        self.last_active_date = None;
    }
}
