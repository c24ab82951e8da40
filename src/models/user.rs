use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: String, // 'user' or 'admin'
    // Denormalized copy of the game profile totals, kept for the rankings
    // read model. Written alongside user_games with no cross-write atomicity.
    pub points: i32,
    pub level: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_game::Entity")]
    UserGame,
    #[sea_orm(has_many = "super::user_progress::Entity")]
    UserProgress,
}

impl Related<super::user_game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserGame.def()
    }
}

impl Related<super::user_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Public user summary returned by auth and rankings endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
    pub points: i32,
    pub level: i32,
}

impl From<Model> for UserSummary {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            role: model.role,
            points: model.points,
            level: model.level,
        }
    }
}
