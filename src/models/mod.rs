pub mod course;
pub mod quiz;
pub mod user;
pub mod user_game;
pub mod user_progress;

pub use course::Course;
pub use quiz::Quiz;
