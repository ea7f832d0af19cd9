use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use service::meetup::domain::{self, CreateMeetupPayload, MeetupSummary, UpdateMeetupPayload, UpdatedMeetup};
use service::pagination::Pagination;

use crate::auth::{AuthUser, ServerState};
use crate::errors::ApiError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Calendar day to list, ISO-8601
    pub date: Option<String>,
    /// 1-based page number; falls back to 1 when absent or unparsable
    pub page: Option<String>,
}

#[utoipa::path(
    get, path = "/meetups", tag = "meetups",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<MeetupSummary>>, ApiError> {
    let Some(date) = q.date.as_deref() else {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "date query parameter is required"));
    };
    let day = domain::parse_day(date)?;
    let page = q.page.as_deref().and_then(|p| p.parse::<u32>().ok()).unwrap_or(1);

    let list = state.meetups.list(day, Pagination::page(page)).await?;
    info!(count = list.len(), date = %day, page, "list_meetups");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/meetups", tag = "meetups",
    request_body = crate::openapi::CreateMeetupInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<models::meetup::Model>, ApiError> {
    // Deserialize by hand so type mismatches stay on the 400 path
    let payload: CreateMeetupPayload = serde_json::from_value(body)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("invalid request: {e}")))?;
    let created = state.meetups.create(user.id, &payload).await?;
    info!(meetup_id = created.id, user_id = user.id, "created meetup");
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/meetups/{id}", tag = "meetups",
    params(("id" = i32, Path, description = "Meetup ID")),
    request_body = crate::openapi::UpdateMeetupInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Not Owner"),
        (status = 403, description = "Already Occurred"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<UpdatedMeetup>, ApiError> {
    let payload: UpdateMeetupPayload = serde_json::from_value(body)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("invalid request: {e}")))?;
    let updated = state.meetups.update(user.id, id, &payload).await?;
    info!(meetup_id = id, user_id = user.id, "updated meetup");
    Ok(Json(UpdatedMeetup::from(updated)))
}

#[utoipa::path(
    delete, path = "/meetups/{id}", tag = "meetups",
    params(("id" = i32, Path, description = "Meetup ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 401, description = "Not Owner"),
        (status = 403, description = "Already Occurred"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<models::meetup::Model>, ApiError> {
    let deleted = state.meetups.delete(user.id, id).await?;
    info!(meetup_id = id, user_id = user.id, "deleted meetup");
    Ok(Json(deleted))
}
