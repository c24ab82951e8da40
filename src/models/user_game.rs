use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game::GameProfile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub points: i32,
    pub level: i32,
    pub streak: i32,
    pub last_active_date: Option<String>, // ISO calendar date, no time component
    pub badges: String,                   // JSON array of BadgeStatus
    pub progress: String,                 // JSON map of course id -> percent
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for GameProfile {
    fn from(model: Model) -> Self {
        let mut profile = GameProfile::default();
        profile.add_points(model.points.max(0) as u32);
        profile.streak = model.streak.max(0) as u32;
        profile.last_active_date = model.last_active_date.and_then(|d| d.parse().ok());
        profile.progress = serde_json::from_str(&model.progress).unwrap_or_default();

        // Stored badge rows may lag behind the catalog; start from the fresh
        // catalog and replay unlocks so the id set always matches the registry.
        let stored: Vec<crate::game::BadgeStatus> =
            serde_json::from_str(&model.badges).unwrap_or_default();
        for badge in stored.iter().filter(|b| b.unlocked) {
            profile.unlock_badge(&badge.id);
        }

        profile
    }
}
