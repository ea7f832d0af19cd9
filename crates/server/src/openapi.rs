use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct CreateMeetupInputDoc {
    pub name: String,
    pub description: String,
    pub location: String,
    /// RFC 3339 timestamp
    pub date: String,
    pub banner_id: i32,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateMeetupInputDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub banner_id: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::meetups::list,
        crate::routes::meetups::create,
        crate::routes::meetups::update,
        crate::routes::meetups::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CreateMeetupInputDoc,
            UpdateMeetupInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "meetups")
    )
)]
pub struct ApiDoc;
