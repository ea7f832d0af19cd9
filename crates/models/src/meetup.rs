use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{file, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meetups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: DateTimeWithTimeZone,
    pub user_id: i32,
    pub banner_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Banner,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Banner => Entity::belongs_to(file::Entity)
                .from(Column::BannerId)
                .to(file::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<file::Entity> for Entity {
    fn to() -> RelationDef { Relation::Banner.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the scheduled date is already in the past.
    pub fn has_occurred(&self) -> bool {
        self.date.with_timezone(&Utc) < Utc::now()
    }
}
