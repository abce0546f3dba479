use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    Extension, Json,
};
use axum_extra::extract::CookieJar;
use rand::{distributions::Alphanumeric, Rng};
use tracing::{info, warn};

use crate::{
    adapters::{
        cookies::{self, ACCESS_TOKEN_COOKIE, OAUTH_STATE_COOKIE, REFRESH_TOKEN_COOKIE},
        dto::auth_dto::{
            GoogleCallbackQuery, LoginRequest, MessageResponse, SignupRequest, UserResponse,
        },
        state::AppState,
    },
    application::{dto::user_dto::NewUser, error::ApplicationError},
    domain::models::user::User,
    services::GoogleUserInfo,
};

pub struct AuthController;

impl AuthController {
    pub async fn signup(
        State(app_state): State<AppState>,
        jar: CookieJar,
        Json(body): Json<SignupRequest>,
    ) -> Result<(StatusCode, CookieJar, Json<UserResponse>), ApplicationError> {
        let name = body.name.trim().to_string();
        let email = body.email.trim().to_lowercase();

        if name.is_empty() {
            return Err(ApplicationError::BadRequest("Name is required".to_string()));
        }
        if email.is_empty() {
            return Err(ApplicationError::BadRequest("Email is required".to_string()));
        }
        if body.password.len() < 6 {
            return Err(ApplicationError::BadRequest(
                "Password must be at least 6 characters long".to_string(),
            ));
        }

        if app_state
            .user_repository
            .find_by_email(&email)
            .await?
            .is_some()
        {
            return Err(ApplicationError::Conflict("User already exists".to_string()));
        }

        let password_hash = bcrypt::hash(&body.password, bcrypt::DEFAULT_COST)
            .map_err(|e| ApplicationError::InternalError(format!("Failed to hash password: {}", e)))?;

        let user = app_state
            .user_repository
            .create_user(NewUser::local(name, email, password_hash))
            .await?;

        info!("User {} signed up", user.id);

        let jar = Self::start_session(&app_state, jar, &user).await?;
        Ok((StatusCode::CREATED, jar, Json(UserResponse::from(&user))))
    }

    pub async fn login(
        State(app_state): State<AppState>,
        jar: CookieJar,
        Json(body): Json<LoginRequest>,
    ) -> Result<(CookieJar, Json<UserResponse>), ApplicationError> {
        let email = body.email.trim().to_lowercase();

        // Same generic answer for unknown email, federated-only account and
        // wrong password.
        let user = app_state
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(ApplicationError::InvalidCredentials)?;
        if !Self::verify_password(&body.password, &user)? {
            return Err(ApplicationError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);

        let jar = Self::start_session(&app_state, jar, &user).await?;
        Ok((jar, Json(UserResponse::from(&user))))
    }

    pub async fn logout(
        State(app_state): State<AppState>,
        jar: CookieJar,
    ) -> Result<(CookieJar, Json<MessageResponse>), ApplicationError> {
        if let Some(cookie) = jar.get(REFRESH_TOKEN_COOKIE) {
            // A decode failure here surfaces as the generic 500; see DESIGN.md.
            let claims = app_state.token_service.verify_refresh_token(cookie.value())?;
            app_state
                .token_service
                .revoke_refresh_token(claims.user_id)
                .await?;
            info!("User {} logged out", claims.user_id);
        }

        let jar = jar
            .remove(cookies::clear_cookie(ACCESS_TOKEN_COOKIE))
            .remove(cookies::clear_cookie(REFRESH_TOKEN_COOKIE));
        Ok((jar, Json(MessageResponse::new("Logged out successfully"))))
    }

    pub async fn refresh_token(
        State(app_state): State<AppState>,
        jar: CookieJar,
    ) -> Result<(CookieJar, Json<MessageResponse>), ApplicationError> {
        let presented = jar
            .get(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| {
                ApplicationError::Unauthorized("No refresh token provided".to_string())
            })?;

        let claims = app_state.token_service.verify_refresh_token(&presented)?;

        if !app_state
            .token_service
            .validate_refresh_token(claims.user_id, &presented)
            .await?
        {
            return Err(ApplicationError::Forbidden(
                "Invalid refresh token".to_string(),
            ));
        }

        // The refresh token itself is not rotated.
        let access_token = app_state.token_service.issue_access_token(claims.user_id)?;
        let secure = app_state.environment.is_production();
        let jar = jar.add(cookies::access_token_cookie(access_token, secure));

        Ok((
            jar,
            Json(MessageResponse::new("Access token refreshed successfully")),
        ))
    }

    /// The user arrives via `protect_route`, which already verified the access
    /// cookie and loaded the record.
    pub async fn get_profile(Extension(user): Extension<User>) -> Json<User> {
        Json(user)
    }

    pub async fn google_auth(
        State(app_state): State<AppState>,
        jar: CookieJar,
    ) -> (CookieJar, Redirect) {
        let state: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let url = app_state.google_oauth.authorize_url(&state);
        let secure = app_state.environment.is_production();
        let jar = jar.add(cookies::oauth_state_cookie(state, secure));
        (jar, Redirect::to(&url))
    }

    pub async fn google_callback(
        State(app_state): State<AppState>,
        jar: CookieJar,
        Query(query): Query<GoogleCallbackQuery>,
    ) -> Result<(CookieJar, Redirect), ApplicationError> {
        let cookie_state = jar
            .get(OAUTH_STATE_COOKIE)
            .map(|cookie| cookie.value().to_string());
        let jar = jar.remove(cookies::clear_cookie(OAUTH_STATE_COOKIE));

        let code = match (&query.error, query.code.as_deref()) {
            (None, Some(code)) => code.to_string(),
            _ => {
                warn!("Google OAuth denied: {:?}", query.error);
                return Ok((jar, Redirect::to("/api/auth/google/failure")));
            }
        };

        match (query.state.as_deref(), cookie_state.as_deref()) {
            (Some(sent), Some(stored)) if sent == stored => {}
            _ => {
                return Err(ApplicationError::Unauthorized(
                    "Invalid OAuth state".to_string(),
                ))
            }
        }

        let profile = app_state.google_oauth.exchange_code(&code).await?;
        let user = Self::find_or_create_google_user(&app_state, profile).await?;

        info!("User {} authenticated via Google", user.id);

        let jar = Self::start_session(&app_state, jar, &user).await?;
        Ok((jar, Redirect::to(&app_state.client_url)))
    }

    pub async fn google_auth_failure() -> (StatusCode, Json<MessageResponse>) {
        (
            StatusCode::UNAUTHORIZED,
            Json(MessageResponse::new("Google authentication failed")),
        )
    }

    /// Issues the token pair, persists the refresh token (overwriting any
    /// previous session) and sets both cookies.
    async fn start_session(
        app_state: &AppState,
        jar: CookieJar,
        user: &User,
    ) -> Result<CookieJar, ApplicationError> {
        let pair = app_state.token_service.issue_token_pair(user.id)?;
        app_state
            .token_service
            .persist_refresh_token(user.id, &pair.refresh_token)
            .await?;

        let secure = app_state.environment.is_production();
        Ok(jar
            .add(cookies::access_token_cookie(pair.access_token, secure))
            .add(cookies::refresh_token_cookie(pair.refresh_token, secure)))
    }

    fn verify_password(password: &str, user: &User) -> Result<bool, ApplicationError> {
        match &user.password_hash {
            // Federated accounts carry no local password.
            None => Ok(false),
            Some(hash) => bcrypt::verify(password, hash).map_err(|e| {
                ApplicationError::InternalError(format!("Password comparison failed: {}", e))
            }),
        }
    }

    async fn find_or_create_google_user(
        app_state: &AppState,
        profile: GoogleUserInfo,
    ) -> Result<User, ApplicationError> {
        if let Some(user) = app_state
            .user_repository
            .find_by_google_id(&profile.sub)
            .await?
        {
            return Ok(user);
        }

        let email = profile.email.trim().to_lowercase();
        if let Some(existing) = app_state.user_repository.find_by_email(&email).await? {
            info!("Linking Google identity to existing user {}", existing.id);
            return app_state
                .user_repository
                .link_google_account(existing.id, &profile.sub, &profile.picture)
                .await;
        }

        let name = if profile.name.is_empty() {
            email.clone()
        } else {
            profile.name.clone()
        };
        app_state
            .user_repository
            .create_user(NewUser::federated(name, email, profile.sub, profile.picture))
            .await
    }
}
