//! API integration tests
//!
//! Exercises the HTTP surface against an in-memory SQLite database using
//! `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::{json, Value};
use stratquest::models::course::CourseSection;
use stratquest::{api, auth, db, models};
use tower::util::ServiceExt; // for `oneshot`

async fn setup_test_app() -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    (api::api_router(db.clone()), db)
}

// Helper to create a user directly and mint a token for them
async fn create_test_user(db: &DatabaseConnection, email: &str, role: &str) -> (i32, String) {
    let now = chrono::Utc::now().to_rfc3339();
    let user = models::user::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(auth::hash_password("password123").expect("hash")),
        name: Set("Test User".to_string()),
        role: Set(role.to_string()),
        points: Set(0),
        level: Set(1),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let saved = user.insert(db).await.expect("Failed to create user");
    let token = auth::create_jwt(saved.id, email, role).expect("Failed to create token");
    (saved.id, token)
}

// Helper to create a course with 4 sections worth 10 points each
async fn create_test_course(db: &DatabaseConnection, slug: &str) -> i32 {
    let sections: Vec<CourseSection> = (0..4)
        .map(|i| CourseSection {
            title: format!("Section {}", i),
            content: "Lesson content".to_string(),
            image: None,
            video_id: None,
            points: 10,
            order: i,
        })
        .collect();

    let now = chrono::Utc::now().to_rfc3339();
    let course = models::course::ActiveModel {
        slug: Set(slug.to_string()),
        title: Set("Test Course".to_string()),
        description: Set("A course for testing".to_string()),
        sections: Set(serde_json::to_string(&sections).unwrap()),
        sort_order: Set(0),
        color: Set(None),
        bg_color: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    course.insert(db).await.expect("Failed to create course").id
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not valid JSON")
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_signup_login_me_flow() {
    let (app, _db) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/signup",
            None,
            json!({ "email": "Alice@Example.com", "password": "secret123", "name": "Alice" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["points"], 0);
    assert_eq!(body["user"]["level"], 1);

    // Login with the same credentials (email is normalized)
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "email": "alice@example.com", "password": "secret123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let token = body["token"].as_str().expect("token").to_string();

    // /auth/me returns the user and a fresh game snapshot
    let response = app
        .oneshot(get_request("/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"]["name"], "Alice");
    assert_eq!(body["game"]["points"], 0);
    assert_eq!(body["game"]["level"], 1);
    assert_eq!(body["game"]["badges"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_duplicate_signup_rejected() {
    let (app, db) = setup_test_app().await;
    create_test_user(&db, "taken@example.com", "user").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/signup",
            None,
            json!({ "email": "taken@example.com", "password": "x12345", "name": "Dup" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_game_returns_default_profile() {
    let (app, db) = setup_test_app().await;
    let (_id, token) = create_test_user(&db, "fresh@example.com", "user").await;

    // No user_games row exists yet; the endpoint must return the zero state
    let response = app
        .oneshot(get_request("/users/me/game", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["points"], 0);
    assert_eq!(body["level"], 1);
    assert_eq!(body["streak"], 0);
    let badges = body["badges"].as_array().unwrap();
    assert_eq!(badges.len(), 7);
    assert!(badges.iter().all(|b| b["unlocked"] == false));
    assert_eq!(body["progress"], json!({}));
}

#[tokio::test]
async fn test_patch_points_is_monotonic() {
    let (app, db) = setup_test_app().await;
    let (user_id, token) = create_test_user(&db, "points@example.com", "user").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/users/me/points",
            Some(&token),
            json!({ "points": 150 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["points"], 150);
    assert_eq!(body["level"], 2);

    // A stale lower total must not decrease the stored points
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/users/me/points",
            Some(&token),
            json!({ "points": 100 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["points"], 150);
    assert_eq!(body["level"], 2);

    // The denormalized rankings copy follows
    let user = models::user::Entity::find_by_id(user_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.points, 150);
    assert_eq!(user.level, 2);
}

#[tokio::test]
async fn test_patch_points_requires_number() {
    let (app, db) = setup_test_app().await;
    let (_id, token) = create_test_user(&db, "badpoints@example.com", "user").await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/users/me/points",
            Some(&token),
            json!({ "points": "lots" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_points_rejects_oversized_total() {
    let (app, db) = setup_test_app().await;
    let (_id, token) = create_test_user(&db, "overflow@example.com", "user").await;

    // A total beyond the supported range must be rejected, not wrapped
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/users/me/points",
            Some(&token),
            json!({ "points": 4_294_967_297u64 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // And the stored profile is untouched
    let response = app
        .oneshot(get_request("/users/me/game", Some(&token)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["points"], 0);
}

#[tokio::test]
async fn test_patch_game_merges_and_persists() {
    let (app, db) = setup_test_app().await;
    let (_id, token) = create_test_user(&db, "merge@example.com", "user").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/users/me/game",
            Some(&token),
            json!({
                "points": 120,
                "streak": 2,
                "lastActiveDate": "2026-08-30",
                "progress": { "1": 50.0 }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["points"], 120);
    assert_eq!(body["level"], 2);
    assert_eq!(body["streak"], 2);
    assert_eq!(body["progress"]["1"], 50);

    // A second GET reads back the persisted snapshot
    let response = app
        .oneshot(get_request("/users/me/game", Some(&token)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["points"], 120);
    assert_eq!(body["lastActiveDate"], "2026-08-30");
}

#[tokio::test]
async fn test_complete_section_over_http_is_idempotent() {
    let (app, db) = setup_test_app().await;
    let (_id, token) = create_test_user(&db, "sections@example.com", "user").await;
    let course_id = create_test_course(&db, "test-course").await;

    let payload = json!({ "courseId": course_id, "sectionIndex": 0 });

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/users/me/progress",
            Some(&token),
            payload.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["pointsAwarded"], 10);
    assert_eq!(body["firstStepsUnlocked"], true);
    assert_eq!(body["progress"]["progressPercent"], 25);
    assert_eq!(body["game"]["points"], 10);

    // Re-marking the same section awards nothing
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/users/me/progress",
            Some(&token),
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["pointsAwarded"], 0);
    assert_eq!(body["firstStepsUnlocked"], false);
    assert_eq!(body["game"]["points"], 10);

    // Single-course read shows one completed section
    let uri = format!("/users/me/progress?courseId={}", course_id);
    let response = app.oneshot(get_request(&uri, Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["completedSections"], json!([0]));
    assert_eq!(body["progressPercent"], 25);
}

#[tokio::test]
async fn test_complete_all_sections_reaches_full_percent() {
    let (app, db) = setup_test_app().await;
    let (_id, token) = create_test_user(&db, "finisher@example.com", "user").await;
    let course_id = create_test_course(&db, "finish-course").await;

    let mut last_body = json!(null);
    for index in 0..4 {
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                "/users/me/progress",
                Some(&token),
                json!({ "courseId": course_id, "sectionIndex": index }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        last_body = json_body(response).await;
    }

    assert_eq!(last_body["progress"]["progressPercent"], 100);
    assert_eq!(last_body["game"]["points"], 40);
    assert_eq!(last_body["game"]["progress"][course_id.to_string()], 100);
}

#[tokio::test]
async fn test_section_index_out_of_range_rejected() {
    let (app, db) = setup_test_app().await;
    let (_id, token) = create_test_user(&db, "range@example.com", "user").await;
    let course_id = create_test_course(&db, "range-course").await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/users/me/progress",
            Some(&token),
            json!({ "courseId": course_id, "sectionIndex": 99 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quiz_result_awards_points_and_badge() {
    let (app, db) = setup_test_app().await;
    let (_id, token) = create_test_user(&db, "quiz@example.com", "user").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/users/me/quiz-results",
            Some(&token),
            json!({ "correct": 5, "total": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["pointsAwarded"], 100);
    assert_eq!(body["perfect"], true);
    assert_eq!(body["streak"], 1);
    let badges = body["game"]["badges"].as_array().unwrap();
    let perfectionist = badges
        .iter()
        .find(|b| b["id"] == "perfectionist")
        .expect("perfectionist in catalog");
    assert_eq!(perfectionist["unlocked"], true);
}

#[tokio::test]
async fn test_streak_check_in_same_day_noop() {
    let (app, db) = setup_test_app().await;
    let (_id, token) = create_test_user(&db, "streak@example.com", "user").await;

    let check_in = |app: Router, token: String| async move {
        app.oneshot(
            Request::builder()
                .uri("/users/me/streak")
                .method("POST")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    };

    let response = check_in(app.clone(), token.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["advanced"], true);
    assert_eq!(body["game"]["streak"], 1);

    // Checking in again the same day changes nothing
    let response = check_in(app, token).await;
    let body = json_body(response).await;
    assert_eq!(body["advanced"], false);
    assert_eq!(body["game"]["streak"], 1);
}

#[tokio::test]
async fn test_rankings_sorted_by_points() {
    let (app, db) = setup_test_app().await;
    let (_low_id, _) = create_test_user(&db, "low@example.com", "user").await;
    let (high_id, high_token) = create_test_user(&db, "high@example.com", "user").await;

    // Give the second user some points through the API
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/users/me/points",
            Some(&high_token),
            json!({ "points": 300 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/rankings", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let leaderboard = body["leaderboard"].as_array().unwrap();
    assert_eq!(leaderboard.len(), 2);
    assert_eq!(leaderboard[0]["id"], high_id);
    assert_eq!(leaderboard[0]["points"], 300);
    assert_eq!(leaderboard[0]["level"], 4);
}

#[tokio::test]
async fn test_course_create_requires_admin() {
    let (app, db) = setup_test_app().await;
    let (_id, user_token) = create_test_user(&db, "plain@example.com", "user").await;
    let (_id, admin_token) = create_test_user(&db, "admin@example.com", "admin").await;

    let payload = json!({
        "slug": "new-course",
        "title": "New Course",
        "description": "Created in a test",
        "sections": []
    });

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/courses",
            Some(&user_token),
            payload.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/courses", Some(&admin_token), payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The course is publicly listable
    let response = app.oneshot(get_request("/courses", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["slug"], "new-course");
}

#[tokio::test]
async fn test_course_lookup_by_slug() {
    let (app, db) = setup_test_app().await;
    let course_id = create_test_course(&db, "findable").await;

    let response = app
        .oneshot(get_request("/courses/slug/findable", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], course_id);
    assert_eq!(body["sections"].as_array().unwrap().len(), 4);
}
