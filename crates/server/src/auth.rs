use std::sync::Arc;

use axum::{extract::{Request, State}, http::StatusCode, middleware::Next, response::Response};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use service::meetup::{repository::SeaOrmMeetupRepository, service::MeetupService};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub meetups: Arc<MeetupService<SeaOrmMeetupRepository>>,
}

/// Acting user identity, injected into request extensions by the
/// bearer-token middleware.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    #[allow(dead_code)]
    exp: Option<usize>,
}

/// Middleware for the meetup routes: verify `Authorization: Bearer <token>`
/// and stash the acting user id from the token subject.
/// Missing token is a 400, invalid or expired tokens a 401.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();

    let authz = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header) = authz else {
        tracing::warn!(path = %path, "missing Authorization header");
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "token missing"));
    };
    let prefix = "Bearer ";
    if !header.starts_with(prefix) {
        tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
        return Err(ApiError::new(StatusCode::UNAUTHORIZED, "invalid token"));
    }
    let token = &header[prefix.len()..];

    let key = DecodingKey::from_secret(state.auth.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => {
            let user_id = data.claims.sub.as_deref().and_then(|s| s.parse::<i32>().ok());
            let Some(id) = user_id else {
                tracing::warn!(path = %path, "token subject is not a user id");
                return Err(ApiError::new(StatusCode::UNAUTHORIZED, "invalid token"));
            };
            req.extensions_mut().insert(AuthUser { id });
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::error!(path = %path, err = %e, "token validation failed");
            Err(ApiError::new(StatusCode::UNAUTHORIZED, "invalid token"))
        }
    }
}
