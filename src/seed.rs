use crate::auth::hash_password;
use crate::game::GameProfile;
use crate::models::course::{self, CourseSection};
use crate::models::quiz::{self, QuizOption, QuizQuestion};
use crate::models::user;
use crate::services::game_service;
use sea_orm::*;

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Create Users
    let admin_password = hash_password("admin").unwrap();
    let user_password = hash_password("learner").unwrap();

    let admin = user::ActiveModel {
        email: Set("admin@stratquest.local".to_owned()),
        password_hash: Set(admin_password),
        name: Set("Admin".to_owned()),
        role: Set("admin".to_owned()),
        points: Set(0),
        level: Set(1),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };

    let learner = user::ActiveModel {
        email: Set("learner@stratquest.local".to_owned()),
        password_hash: Set(user_password),
        name: Set("Demo Learner".to_owned()),
        role: Set("user".to_owned()),
        points: Set(0),
        level: Set(1),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };

    // A conflicting insert with do_nothing surfaces as RecordNotInserted;
    // re-seeding over an existing database is not an error.
    let _ = user::Entity::insert(admin)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await;

    let learner_res = user::Entity::insert(learner)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await;

    if let Ok(res) = learner_res {
        let _ = game_service::save_profile(db, res.last_insert_id, &GameProfile::default()).await;
    }

    // 2. Create demo courses, one per strategy framework
    let demo_courses: Vec<(&str, &str, &str, i32)> = vec![
        (
            "vrio",
            "VRIO Analysis",
            "Evaluate resources by value, rarity, imitability and organization.",
            0,
        ),
        (
            "swot",
            "SWOT Analysis",
            "Map strengths, weaknesses, opportunities and threats.",
            1,
        ),
        (
            "core-competence",
            "Core Competence",
            "Identify the capabilities that drive competitive advantage.",
            2,
        ),
    ];

    for (slug, title, description, order) in demo_courses {
        let sections = vec![
            CourseSection {
                title: format!("{} basics", title),
                content: "What this framework is and when to reach for it.".to_owned(),
                image: None,
                video_id: None,
                points: 10,
                order: 0,
            },
            CourseSection {
                title: "Walkthrough".to_owned(),
                content: "A worked example, step by step.".to_owned(),
                image: None,
                video_id: None,
                points: 10,
                order: 1,
            },
            CourseSection {
                title: "Applying it yourself".to_owned(),
                content: "Common pitfalls and how to avoid them.".to_owned(),
                image: None,
                video_id: None,
                points: 20,
                order: 2,
            },
        ];

        let course_model = course::ActiveModel {
            slug: Set(slug.to_owned()),
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            sections: Set(serde_json::to_string(&sections).unwrap_or_else(|_| "[]".to_owned())),
            sort_order: Set(order),
            color: Set(None),
            bg_color: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };

        let res = course::Entity::insert(course_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(course::Column::Slug)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await;

        // 3. One demo quiz per freshly inserted course
        if let Ok(res) = res {
            let questions = vec![QuizQuestion {
                question: format!("What is the main goal of {}?", title),
                options: vec![
                    QuizOption {
                        text: "Structuring strategic analysis".to_owned(),
                        explanation: "Right: it is an analysis framework.".to_owned(),
                    },
                    QuizOption {
                        text: "Accounting compliance".to_owned(),
                        explanation: "No, that is a different discipline.".to_owned(),
                    },
                ],
                correct: 0,
                general_explanation: "Frameworks structure thinking; they do not replace it."
                    .to_owned(),
                order: 0,
            }];

            let quiz_model = quiz::ActiveModel {
                course_id: Set(res.last_insert_id),
                title: Set(format!("{} Quiz", title)),
                questions: Set(
                    serde_json::to_string(&questions).unwrap_or_else(|_| "[]".to_owned())
                ),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            };
            let _ = quiz_model.insert(db).await;
        }
    }

    Ok(())
}
