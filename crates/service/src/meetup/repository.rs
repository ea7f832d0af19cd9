use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use super::domain::{MeetupChanges, MeetupSummary, NewMeetup};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Repository abstraction for meetup persistence.
#[async_trait]
pub trait MeetupRepository: Send + Sync {
    async fn find_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>, page: Pagination) -> Result<Vec<MeetupSummary>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<models::meetup::Model>, ServiceError>;
    async fn insert(&self, user_id: i32, new: NewMeetup) -> Result<models::meetup::Model, ServiceError>;
    async fn update(&self, id: i32, changes: MeetupChanges) -> Result<models::meetup::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmMeetupRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl MeetupRepository for SeaOrmMeetupRepository {
    async fn find_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>, page: Pagination) -> Result<Vec<MeetupSummary>, ServiceError> {
        crate::db::meetup_service::find_by_date_range(&self.db, start, end, page).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<models::meetup::Model>, ServiceError> {
        crate::db::meetup_service::find_by_id(&self.db, id).await
    }

    async fn insert(&self, user_id: i32, new: NewMeetup) -> Result<models::meetup::Model, ServiceError> {
        crate::db::meetup_service::insert_meetup(&self.db, user_id, new).await
    }

    async fn update(&self, id: i32, changes: MeetupChanges) -> Result<models::meetup::Model, ServiceError> {
        crate::db::meetup_service::update_meetup(&self.db, id, changes).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        crate::db::meetup_service::delete_meetup(&self.db, id).await
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::meetup::domain::{BannerView, OwnerView};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Holds meetup rows only; owner and banner columns in summaries are
    /// canned since the mock does not model users or files.
    #[derive(Default)]
    pub struct MockMeetupRepository {
        meetups: Mutex<HashMap<i32, models::meetup::Model>>,
        next_id: Mutex<i32>,
    }

    fn summary(m: models::meetup::Model) -> MeetupSummary {
        MeetupSummary {
            id: m.id,
            name: m.name,
            description: m.description,
            location: m.location,
            date: m.date,
            user: OwnerView {
                fullname: "Mock User".to_string(),
                username: "mock".to_string(),
                email: "mock@example.com".to_string(),
            },
            banner: BannerView {
                name: "banner.png".to_string(),
                path: "mock.png".to_string(),
                url: "http://localhost:8080/files/mock.png".to_string(),
            },
        }
    }

    #[async_trait]
    impl MeetupRepository for MockMeetupRepository {
        async fn find_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>, page: Pagination) -> Result<Vec<MeetupSummary>, ServiceError> {
            let (offset, limit) = page.normalize();
            let meetups = self.meetups.lock().unwrap();
            let mut rows: Vec<_> = meetups
                .values()
                .filter(|m| {
                    let d = m.date.with_timezone(&Utc);
                    d >= start && d <= end
                })
                .cloned()
                .collect();
            rows.sort_by_key(|m| m.date);
            Ok(rows
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .map(summary)
                .collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<models::meetup::Model>, ServiceError> {
            let meetups = self.meetups.lock().unwrap();
            Ok(meetups.get(&id).cloned())
        }

        async fn insert(&self, user_id: i32, new: NewMeetup) -> Result<models::meetup::Model, ServiceError> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
            let m = models::meetup::Model {
                id: *next_id,
                name: new.name,
                description: new.description,
                location: new.location,
                date: new.date.into(),
                user_id,
                banner_id: new.banner_id,
                created_at: now,
                updated_at: now,
            };
            self.meetups.lock().unwrap().insert(m.id, m.clone());
            Ok(m)
        }

        async fn update(&self, id: i32, changes: MeetupChanges) -> Result<models::meetup::Model, ServiceError> {
            let mut meetups = self.meetups.lock().unwrap();
            let m = meetups.get_mut(&id).ok_or_else(|| ServiceError::not_found("meetup"))?;
            if let Some(v) = changes.name { m.name = v; }
            if let Some(v) = changes.description { m.description = v; }
            if let Some(v) = changes.location { m.location = v; }
            if let Some(v) = changes.date { m.date = v.into(); }
            if let Some(v) = changes.banner_id { m.banner_id = v; }
            m.updated_at = Utc::now().into();
            Ok(m.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut meetups = self.meetups.lock().unwrap();
            Ok(meetups.remove(&id).is_some())
        }
    }
}
