use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use super::domain::{self, CreateMeetupPayload, MeetupSummary, UpdateMeetupPayload};
use super::repository::MeetupRepository;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Application service encapsulating the meetup business rules: schema
/// validation, the past-date rule on create, and the ownership and
/// already-occurred rules on update/delete.
pub struct MeetupService<R: MeetupRepository> {
    repo: Arc<R>,
}

impl<R: MeetupRepository> MeetupService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// One page of the given local calendar day, oldest first.
    pub async fn list(&self, day: NaiveDate, page: Pagination) -> Result<Vec<MeetupSummary>, ServiceError> {
        let (start, end) = domain::day_bounds(day)?;
        self.repo.find_by_date_range(start, end, page).await
    }

    /// Create a meetup owned by `acting_user`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::meetup::{domain::CreateMeetupPayload, repository::mock::MockMeetupRepository, service::MeetupService};
    /// let svc = MeetupService::new(Arc::new(MockMeetupRepository::default()));
    /// let payload = CreateMeetupPayload {
    ///     name: Some("Rust Meetup".into()),
    ///     description: Some("Monthly gathering".into()),
    ///     location: Some("Downtown".into()),
    ///     date: Some((chrono::Utc::now() + chrono::Duration::days(1)).to_rfc3339()),
    ///     banner_id: Some(1),
    /// };
    /// let created = tokio_test::block_on(svc.create(7, &payload)).unwrap();
    /// assert_eq!(created.user_id, 7);
    /// ```
    #[instrument(skip(self, payload), fields(user_id = acting_user))]
    pub async fn create(&self, acting_user: i32, payload: &CreateMeetupPayload) -> Result<models::meetup::Model, ServiceError> {
        let new = domain::validate_create(payload)?;
        if new.date < Utc::now() {
            return Err(ServiceError::PastDate);
        }
        let created = self.repo.insert(acting_user, new).await?;
        info!(meetup_id = created.id, user_id = acting_user, "meetup_created");
        Ok(created)
    }

    /// Partially update a meetup owned by `acting_user`.
    #[instrument(skip(self, payload), fields(meetup_id = id, user_id = acting_user))]
    pub async fn update(&self, acting_user: i32, id: i32, payload: &UpdateMeetupPayload) -> Result<models::meetup::Model, ServiceError> {
        let changes = domain::validate_update(payload)?;
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("meetup"))?;
        if existing.user_id != acting_user {
            return Err(ServiceError::Forbidden("meetup belongs to another user".into()));
        }
        if existing.has_occurred() {
            return Err(ServiceError::AlreadyOccurred);
        }
        let updated = self.repo.update(id, changes).await?;
        info!(meetup_id = id, user_id = acting_user, "meetup_updated");
        Ok(updated)
    }

    /// Permanently remove a meetup owned by `acting_user`; returns the
    /// record as it existed before removal.
    #[instrument(skip(self), fields(meetup_id = id, user_id = acting_user))]
    pub async fn delete(&self, acting_user: i32, id: i32) -> Result<models::meetup::Model, ServiceError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("meetup"))?;
        if existing.user_id != acting_user {
            return Err(ServiceError::Forbidden("meetup belongs to another user".into()));
        }
        if existing.has_occurred() {
            return Err(ServiceError::AlreadyOccurred);
        }
        self.repo.delete(id).await?;
        info!(meetup_id = id, user_id = acting_user, "meetup_deleted");
        Ok(existing)
    }
}
