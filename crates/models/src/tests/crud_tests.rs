use crate::db::connect;
use crate::{file, meetup, user};
use anyhow::Result;
use chrono::{Duration, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set};
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;

    // Run migrations if needed
    migration::Migrator::up(&db, None).await?;

    Ok(db)
}

async fn insert_meetup(
    db: &DatabaseConnection,
    owner: &user::Model,
    banner: &file::Model,
    date: chrono::DateTime<Utc>,
) -> Result<meetup::Model> {
    let now = Utc::now().into();
    let am = meetup::ActiveModel {
        name: Set(format!("meetup_{}", Uuid::new_v4())),
        description: Set("a meetup".to_string()),
        location: Set("downtown".to_string()),
        date: Set(date.into()),
        user_id: Set(owner.id),
        banner_id: Set(banner.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Test user CRUD operations
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let username = format!("user_{}", Uuid::new_v4());
    let email = format!("{}@example.com", username);
    let created = user::create(&db, "Test User", &username, &email).await?;

    assert_eq!(created.username, username);
    assert_eq!(created.email, email);

    // Read back by id and by username
    let found = user::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().email, email);

    let by_username = user::Entity::find()
        .filter(user::Column::Username.eq(username.clone()))
        .one(&db)
        .await?;
    assert_eq!(by_username.unwrap().id, created.id);

    // Validation failures never hit the database
    assert!(user::create(&db, "X", &format!("u_{}", Uuid::new_v4()), "not-an-email").await.is_err());
    assert!(user::create(&db, "X", "", "x@example.com").await.is_err());

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Test file CRUD operations and URL derivation
#[tokio::test]
async fn test_file_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let path = format!("{}.png", Uuid::new_v4());
    let created = file::create(&db, "banner.png", &path).await?;

    assert_eq!(created.name, "banner.png");
    assert_eq!(created.path, path);
    assert!(created.url().ends_with(&format!("/files/{}", path)));

    let found = file::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());

    assert!(file::create(&db, "", &path).await.is_err());

    file::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Test meetup CRUD operations against its FK targets
#[tokio::test]
async fn test_meetup_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let username = format!("owner_{}", Uuid::new_v4());
    let owner = user::create(&db, "Meetup Owner", &username, &format!("{}@example.com", username)).await?;
    let banner = file::create(&db, "banner.png", &format!("{}.png", Uuid::new_v4())).await?;

    let date = Utc::now() + Duration::days(3);
    let created = insert_meetup(&db, &owner, &banner, date).await?;

    assert_eq!(created.user_id, owner.id);
    assert_eq!(created.banner_id, banner.id);
    assert!(!created.has_occurred());

    // Read back with related rows
    let found = meetup::Entity::find_by_id(created.id).one(&db).await?.unwrap();
    let related_user = found.find_related(user::Entity).one(&db).await?.unwrap();
    let related_banner = found.find_related(file::Entity).one(&db).await?.unwrap();
    assert_eq!(related_user.id, owner.id);
    assert_eq!(related_banner.id, banner.id);

    // Partial update
    let mut am: meetup::ActiveModel = found.into();
    am.location = Set("rooftop".to_string());
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.location, "rooftop");
    assert_eq!(updated.user_id, owner.id);

    meetup::Entity::delete_by_id(created.id).exec(&db).await?;
    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    file::Entity::delete_by_id(banner.id).exec(&db).await?;
    Ok(())
}

/// Past dates are representable at the model layer; the business rule lives
/// in the service layer
#[tokio::test]
async fn test_meetup_has_occurred() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let username = format!("past_{}", Uuid::new_v4());
    let owner = user::create(&db, "Past Owner", &username, &format!("{}@example.com", username)).await?;
    let banner = file::create(&db, "banner.png", &format!("{}.png", Uuid::new_v4())).await?;

    let created = insert_meetup(&db, &owner, &banner, Utc::now() - Duration::hours(2)).await?;
    assert!(created.has_occurred());

    meetup::Entity::delete_by_id(created.id).exec(&db).await?;
    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    file::Entity::delete_by_id(banner.id).exec(&db).await?;
    Ok(())
}

/// Deleting a user cascades to their meetups; banners stay
#[tokio::test]
async fn test_user_delete_cascades_meetups() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let username = format!("cascade_{}", Uuid::new_v4());
    let owner = user::create(&db, "Cascade Owner", &username, &format!("{}@example.com", username)).await?;
    let banner = file::create(&db, "banner.png", &format!("{}.png", Uuid::new_v4())).await?;

    let created = insert_meetup(&db, &owner, &banner, Utc::now() + Duration::days(1)).await?;

    user::Entity::delete_by_id(owner.id).exec(&db).await?;

    let gone = meetup::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());
    let banner_left = file::Entity::find_by_id(banner.id).one(&db).await?;
    assert!(banner_left.is_some());

    file::Entity::delete_by_id(banner.id).exec(&db).await?;
    Ok(())
}
