use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use encuentro_db::models::user::CreateUser;
use encuentro_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::generate_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Lifetime of a password reset token.
const RESET_TOKEN_EXPIRY_HOURS: i64 = 1;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub whatsapp: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    // 1. Validate the request fields.
    if input.username.trim().is_empty() {
        return Err(AppError::validation("Username is required"));
    }
    if input.email.trim().is_empty() || !input.email.contains('@') {
        return Err(AppError::validation("A valid email address is required"));
    }
    if input.whatsapp.trim().is_empty() {
        return Err(AppError::validation(
            "A whatsapp contact number is required",
        ));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;

    // 2. Hash the password before it ever touches the database.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 3. Insert the user. Duplicate email or whatsapp surfaces as 409 via
    //    the unique-constraint classification in the error layer.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            whatsapp: input.whatsapp,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    // 1. Find the user. Unknown email and wrong password return the same
    //    message so the endpoint does not leak which accounts exist.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or(AppError::unauthorized("Invalid email or password"))?;

    // 2. Verify the password.
    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    // 3. Issue a signed token.
    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenResponse { token }))
}

/// POST /api/v1/auth/forgot-password
///
/// Always returns 200 with the same message so the endpoint cannot be used
/// to probe which email addresses are registered.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_EXPIRY_HOURS);

        UserRepo::set_reset_token(&state.pool, &input.email, &token, expires_at).await?;

        match &state.mailer {
            Some(mailer) => {
                if let Err(e) = mailer
                    .send_password_reset(&user.email, &user.username, &token)
                    .await
                {
                    tracing::warn!(user_id = %user.id, error = %e, "Failed to send password reset email");
                }
            }
            None => {
                tracing::warn!(user_id = %user.id, "SMTP not configured, password reset email not sent");
            }
        }
    }

    Ok(Json(MessageResponse::new(
        "If that email is registered, a password reset link has been sent",
    )))
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    // 1. Look up an unexpired token.
    let user = UserRepo::find_by_reset_token(&state.pool, &input.token)
        .await?
        .ok_or(AppError::unauthorized("Invalid or expired token"))?;

    // 2. Validate and hash the replacement password.
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;
    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 3. Store it and invalidate the token.
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = %user.id, "Password reset completed");

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
