use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    pub description: String,
    pub sections: String, // JSON array of CourseSection
    pub sort_order: i32,
    pub color: Option<String>,
    pub bg_color: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quiz::Entity")]
    Quizzes,
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quizzes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn default_section_points() -> u32 {
    10
}

/// A single lesson section inside a course
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSection {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default = "default_section_points")]
    pub points: u32,
    #[serde(default)]
    pub order: i32,
}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Option<i32>,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub sections: Vec<CourseSection>,
    #[serde(default)]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
}

impl From<Model> for Course {
    fn from(model: Model) -> Self {
        let sections: Vec<CourseSection> =
            serde_json::from_str(&model.sections).unwrap_or_default();

        Self {
            id: Some(model.id),
            slug: model.slug,
            title: model.title,
            description: model.description,
            sections,
            order: model.sort_order,
            color: model.color,
            bg_color: model.bg_color,
        }
    }
}
