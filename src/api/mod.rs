pub mod auth;
pub mod courses;
pub mod game;
pub mod health;
pub mod progress;
pub mod quizzes;
pub mod rankings;

use axum::{
    routing::{get, patch, post},
    Router,
};
use sea_orm::DatabaseConnection;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Courses
        .route(
            "/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/:id",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/courses/slug/:slug", get(courses::get_course_by_slug))
        // Quizzes
        .route(
            "/quizzes",
            get(quizzes::get_quiz_for_course).post(quizzes::create_quiz),
        )
        .route(
            "/quizzes/:id",
            get(quizzes::get_quiz)
                .put(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
        // Game profile
        .route(
            "/users/me/game",
            get(game::get_game).patch(game::patch_game),
        )
        .route("/users/me/points", patch(game::patch_points))
        .route("/users/me/streak", post(game::check_in))
        .route("/users/me/quiz-results", post(game::submit_quiz_result))
        // Course progress
        .route(
            "/users/me/progress",
            get(progress::get_progress).patch(progress::complete_section),
        )
        // Rankings
        .route("/rankings", get(rankings::get_rankings))
        .with_state(db)
}
