use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Wire payload for create. Every field is optional so that required-ness is
/// enforced by `validate_create` and missing fields stay on the 400 path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMeetupPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub banner_id: Option<i32>,
}

/// Wire payload for update; fields are type-checked only when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMeetupPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub banner_id: Option<i32>,
}

/// Validated create input.
#[derive(Debug, Clone)]
pub struct NewMeetup {
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub banner_id: i32,
}

/// Validated partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct MeetupChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub banner_id: Option<i32>,
}

/// Owner columns exposed by the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerView {
    pub fullname: String,
    pub username: String,
    pub email: String,
}

/// Banner columns exposed by the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerView {
    pub name: String,
    pub path: String,
    pub url: String,
}

/// One listing row: the meetup joined with its owner and banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetupSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<FixedOffset>,
    pub user: OwnerView,
    pub banner: BannerView,
}

impl From<(models::meetup::Model, models::user::Model, models::file::Model)> for MeetupSummary {
    fn from((meetup, owner, banner): (models::meetup::Model, models::user::Model, models::file::Model)) -> Self {
        let url = banner.url();
        Self {
            id: meetup.id,
            name: meetup.name,
            description: meetup.description,
            location: meetup.location,
            date: meetup.date,
            user: OwnerView { fullname: owner.fullname, username: owner.username, email: owner.email },
            banner: BannerView { name: banner.name, path: banner.path, url },
        }
    }
}

/// Update response: id plus the editable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedMeetup {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<FixedOffset>,
}

impl From<models::meetup::Model> for UpdatedMeetup {
    fn from(m: models::meetup::Model) -> Self {
        Self { id: m.id, name: m.name, description: m.description, location: m.location, date: m.date }
    }
}

fn required_text(value: Option<&str>, field: &str) -> Result<String, ServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(ServiceError::Validation(format!("{field} is required"))),
    }
}

/// Accepts an RFC 3339 timestamp, e.g. `2019-12-25T18:00:00-03:00`.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, ServiceError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ServiceError::Validation(format!("invalid date: {s}")))
}

/// Accepts a calendar date (`2019-12-25`) or a full RFC 3339 timestamp,
/// resolved to the server's local calendar day.
pub fn parse_day(s: &str) -> Result<NaiveDate, ServiceError> {
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .map_err(|_| ServiceError::Validation(format!("invalid date: {s}")))
}

/// Inclusive `[start, end]` bounds of the local calendar day, in UTC.
pub fn day_bounds(day: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), ServiceError> {
    let invalid = || ServiceError::Validation("invalid date".to_string());
    let start = day
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(invalid)?;
    let end = day
        .and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(invalid)?
        .and_local_timezone(Local)
        .latest()
        .ok_or_else(invalid)?;
    Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

pub fn validate_create(payload: &CreateMeetupPayload) -> Result<NewMeetup, ServiceError> {
    let name = required_text(payload.name.as_deref(), "name")?;
    let description = required_text(payload.description.as_deref(), "description")?;
    let location = required_text(payload.location.as_deref(), "location")?;
    let date = match payload.date.as_deref() {
        Some(s) => parse_date(s)?,
        None => return Err(ServiceError::Validation("date is required".into())),
    };
    let banner_id = payload
        .banner_id
        .ok_or_else(|| ServiceError::Validation("banner_id is required".into()))?;
    Ok(NewMeetup { name, description, location, date, banner_id })
}

pub fn validate_update(payload: &UpdateMeetupPayload) -> Result<MeetupChanges, ServiceError> {
    let mut changes = MeetupChanges::default();
    if payload.name.is_some() {
        changes.name = Some(required_text(payload.name.as_deref(), "name")?);
    }
    if payload.description.is_some() {
        changes.description = Some(required_text(payload.description.as_deref(), "description")?);
    }
    if payload.location.is_some() {
        changes.location = Some(required_text(payload.location.as_deref(), "location")?);
    }
    if let Some(s) = payload.date.as_deref() {
        changes.date = Some(parse_date(s)?);
    }
    changes.banner_id = payload.banner_id;
    Ok(changes)
}
