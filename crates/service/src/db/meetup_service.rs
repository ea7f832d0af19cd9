use chrono::{DateTime, Utc};
use models::meetup::{self, Entity as MeetupEntity};
use models::{file, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::errors::ServiceError;
use crate::meetup::domain::{MeetupChanges, MeetupSummary, NewMeetup};
use crate::pagination::Pagination;

/// Fetch one page of meetups with `date` inside `[start, end]`, oldest
/// first, joined with their owner and banner rows.
pub async fn find_by_date_range(
    db: &DatabaseConnection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    page: Pagination,
) -> Result<Vec<MeetupSummary>, ServiceError> {
    let (offset, limit) = page.normalize();
    let rows = MeetupEntity::find()
        .filter(meetup::Column::Date.between(start, end))
        .order_by_asc(meetup::Column::Date)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let owners = rows.load_one(user::Entity, db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let banners = rows.load_one(file::Entity, db).await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let mut out = Vec::with_capacity(rows.len());
    for ((m, owner), banner) in rows.into_iter().zip(owners).zip(banners) {
        // Both FKs are NOT NULL; a missing row means the store is inconsistent.
        let owner = owner.ok_or_else(|| ServiceError::Db(format!("meetup {} has no owner row", m.id)))?;
        let banner = banner.ok_or_else(|| ServiceError::Db(format!("meetup {} has no banner row", m.id)))?;
        out.push(MeetupSummary::from((m, owner, banner)));
    }
    Ok(out)
}

/// Get a meetup by id.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<meetup::Model>, ServiceError> {
    MeetupEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Insert a validated meetup owned by `user_id`.
pub async fn insert_meetup(
    db: &DatabaseConnection,
    user_id: i32,
    new: NewMeetup,
) -> Result<meetup::Model, ServiceError> {
    let now = Utc::now().into();
    let am = meetup::ActiveModel {
        name: Set(new.name),
        description: Set(new.description),
        location: Set(new.location),
        date: Set(new.date.into()),
        user_id: Set(user_id),
        banner_id: Set(new.banner_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Apply a partial update; fields absent from `changes` keep their values.
pub async fn update_meetup(
    db: &DatabaseConnection,
    id: i32,
    changes: MeetupChanges,
) -> Result<meetup::Model, ServiceError> {
    let current = find_by_id(db, id).await?;
    let Some(existing) = current else { return Err(ServiceError::not_found("meetup")); };
    let mut am: meetup::ActiveModel = existing.into();
    if let Some(v) = changes.name { am.name = Set(v); }
    if let Some(v) = changes.description { am.description = Set(v); }
    if let Some(v) = changes.location { am.location = Set(v); }
    if let Some(v) = changes.date { am.date = Set(v.into()); }
    if let Some(v) = changes.banner_id { am.banner_id = Set(v); }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Delete a meetup; returns true if a row was removed.
pub async fn delete_meetup(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = MeetupEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meetup::domain;
    use crate::test_support::get_db;
    use chrono::Duration;
    use uuid::Uuid;

    async fn seed(db: &DatabaseConnection) -> anyhow::Result<(models::user::Model, models::file::Model)> {
        let username = format!("svc_{}", Uuid::new_v4());
        let owner = models::user::create(db, "Service Owner", &username, &format!("{}@example.com", username)).await?;
        let banner = models::file::create(db, "banner.png", &format!("{}.png", Uuid::new_v4())).await?;
        Ok((owner, banner))
    }

    fn new_meetup(name: &str, date: DateTime<Utc>, banner_id: i32) -> NewMeetup {
        NewMeetup {
            name: name.to_string(),
            description: "a meetup".to_string(),
            location: "downtown".to_string(),
            date,
            banner_id,
        }
    }

    #[tokio::test]
    async fn meetup_crud_queries() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (owner, banner) = seed(&db).await?;

        // Put the whole fixture on one far-future day so other test data
        // cannot land inside the queried range.
        let day = (Utc::now() + Duration::days(3650)).date_naive();
        let (start, end) = domain::day_bounds(day)?;
        let noon = start + Duration::hours(12);

        let a = insert_meetup(&db, owner.id, new_meetup("range_a", noon, banner.id)).await?;
        let b = insert_meetup(&db, owner.id, new_meetup("range_b", noon + Duration::hours(1), banner.id)).await?;

        let found = find_by_id(&db, a.id).await?.unwrap();
        assert_eq!(found.name, "range_a");
        assert_eq!(found.user_id, owner.id);

        let page = find_by_date_range(&db, start, end, Pagination::default()).await?;
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, a.id);
        assert_eq!(page[1].id, b.id);
        assert_eq!(page[0].user.username, owner.username);
        assert!(page[0].banner.url.ends_with(&format!("/files/{}", banner.path)));

        // Outside the day's bounds nothing comes back
        let empty = find_by_date_range(&db, start - Duration::days(1), end - Duration::days(1), Pagination::default()).await?;
        assert!(empty.is_empty());

        let updated = update_meetup(
            &db,
            a.id,
            MeetupChanges { location: Some("rooftop".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.location, "rooftop");
        assert_eq!(updated.name, "range_a");

        assert!(delete_meetup(&db, a.id).await?);
        assert!(delete_meetup(&db, b.id).await?);
        assert!(!delete_meetup(&db, a.id).await?);

        // cleanup
        models::user::Entity::delete_by_id(owner.id).exec(&db).await?;
        models::file::Entity::delete_by_id(banner.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn pagination_slices_the_day() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (owner, banner) = seed(&db).await?;

        let day = (Utc::now() + Duration::days(4000)).date_naive();
        let (start, end) = domain::day_bounds(day)?;

        let mut ids = Vec::new();
        for i in 0..12 {
            let m = insert_meetup(
                &db,
                owner.id,
                new_meetup(&format!("page_{}", i), start + Duration::minutes(i * 10), banner.id),
            )
            .await?;
            ids.push(m.id);
        }

        let first = find_by_date_range(&db, start, end, Pagination::page(1)).await?;
        let second = find_by_date_range(&db, start, end, Pagination::page(2)).await?;
        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 2);
        assert_eq!(first[0].id, ids[0]);
        assert_eq!(second[0].id, ids[10]);

        for id in ids {
            delete_meetup(&db, id).await?;
        }
        models::user::Entity::delete_by_id(owner.id).exec(&db).await?;
        models::file::Entity::delete_by_id(banner.id).exec(&db).await?;
        Ok(())
    }
}
