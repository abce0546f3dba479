use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use crate::{
    adapters::{cookies::ACCESS_TOKEN_COOKIE, state::AppState},
    application::error::ApplicationError,
    domain::models::user::User,
    services::TokenError,
};

/// Verifies the access-token cookie, loads the caller and attaches it to the
/// request. Runs in front of every authenticated route.
pub async fn protect_route(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApplicationError> {
    let token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| {
            ApplicationError::Unauthorized("Unauthorized - No access token provided".to_string())
        })?;

    let claims = app_state
        .token_service
        .verify_access_token(&token)
        .map_err(|e| match e {
            TokenError::Expired => {
                ApplicationError::Unauthorized("Unauthorized - Access token expired".to_string())
            }
            TokenError::Invalid(_) => {
                ApplicationError::Unauthorized("Unauthorized - Invalid access token".to_string())
            }
        })?;

    let user = app_state
        .user_repository
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(|| {
            ApplicationError::Unauthorized("Unauthorized - User not found".to_string())
        })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Admin gate. Must be layered inside `protect_route`.
pub async fn admin_route(
    Extension(user): Extension<User>,
    request: Request,
    next: Next,
) -> Result<Response, ApplicationError> {
    if !user.is_admin() {
        warn!("User {} denied access to admin route", user.id);
        return Err(ApplicationError::Forbidden(
            "Access denied - Admin only".to_string(),
        ));
    }
    Ok(next.run(request).await)
}
