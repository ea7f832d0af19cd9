use chrono::Utc;
use once_cell::sync::Lazy;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use std::env;

use crate::errors;

/// Base URL banners are served from, e.g. `http://localhost:8080`.
pub static APP_URL: Lazy<String> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
});

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub path: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Public download URL of the stored asset.
    pub fn url(&self) -> String {
        format!("{}/files/{}", APP_URL.as_str(), self.path)
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Meetup,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Meetup => Entity::has_many(crate::meetup::Entity).into() }
    }
}

impl Related<crate::meetup::Entity> for Entity {
    fn to() -> RelationDef { Relation::Meetup.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, name: &str, path: &str) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if path.trim().is_empty() { return Err(errors::ModelError::Validation("path required".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        path: Set(path.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
