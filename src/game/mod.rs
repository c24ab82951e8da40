//! Gamification core: points, levels, streaks, badges, and course progress.
//!
//! Everything in this tree is pure and synchronous. State lives in an owned
//! [`GameProfile`] snapshot that callers thread through mutation operations;
//! persistence is a separate, best-effort concern handled by
//! `services::game_service`.

pub mod badges;
pub mod level;
pub mod profile;
pub mod progress;
pub mod reconciler;
pub mod streak;

pub use badges::{badge_catalog, BadgeStatus};
pub use level::level_for;
pub use profile::GameProfile;
pub use progress::CourseProgress;
pub use reconciler::{GamePatch, QuizOutcome, SectionOutcome};
pub use streak::StreakOutcome;
