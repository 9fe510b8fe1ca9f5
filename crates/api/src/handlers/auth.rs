//! Handlers for the `/auth` resource (signup, login, refresh, logout, session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use lander_core::error::CoreError;
use lander_core::types::DbId;
use lander_db::models::operator::{CreateOperator, OperatorResponse};
use lander_db::models::session::CreateSession;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthOperator;
use crate::middleware::operator::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub operator: OperatorInfo,
}

/// Public operator info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct OperatorInfo {
    pub id: DbId,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an operator account. Open while no operator exists; afterwards only
/// when `ALLOW_SIGNUP` is set.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<OperatorResponse>>)> {
    let input = SignupRequest {
        email: normalize_email(&input.email),
        password: input.password,
    };
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // Early refusal; the store repeats the check atomically below.
    if !state.config.allow_signup && state.operators.count_operators().await? > 0 {
        return Err(signup_closed());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateOperator {
        email: input.email,
        password_hash,
    };
    let operator = if state.config.allow_signup {
        state.operators.create_operator(&create).await?
    } else {
        state
            .operators
            .create_first_operator(&create)
            .await?
            .ok_or_else(signup_closed)?
    };

    tracing::info!(
        operator_id = operator.id,
        open_signup = state.config.allow_signup,
        "Operator signed up",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: OperatorResponse::from(&operator),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find operator by email.
    let operator = state
        .operators
        .find_operator_by_email(&normalize_email(&input.email))
        .await?
        .ok_or_else(invalid_credentials)?;

    // 2. Check if the account is active.
    if !operator.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Check if the account is temporarily locked.
    if let Some(locked_until) = operator.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 4. Verify password.
    let password_valid = verify_password(&input.password, &operator.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: count it, lock once the threshold is reached. An
        //    expired lock starts a fresh run of attempts.
        let lock_expired = operator.locked_until.is_some_and(|until| until <= Utc::now());
        let prior_failures = if lock_expired { 0 } else { operator.failed_login_count };
        let new_count = prior_failures + 1;
        let lock_until = (new_count >= MAX_FAILED_ATTEMPTS)
            .then(|| Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS));
        state
            .operators
            .record_failed_login(operator.id, lock_until)
            .await?;
        if lock_until.is_some() {
            tracing::warn!(operator_id = operator.id, "Operator locked after failed logins");
        }

        return Err(invalid_credentials());
    }

    // 6. On success: reset failed count, set last_login_at.
    state.operators.record_successful_login(operator.id).await?;

    // 7. Generate tokens and create session.
    let response = create_auth_response(&state, operator.id, &operator.email).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = state
        .operators
        .find_active_session(&token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Rotation: the presented token is single-use.
    state.operators.revoke_session(session.id).await?;

    let operator = state
        .operators
        .find_operator_by_id(session.operator_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Operator no longer exists".into()))
        })?;

    if !operator.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, operator.id, &operator.email).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated operator. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthOperator,
) -> AppResult<StatusCode> {
    let revoked = state.operators.revoke_all_sessions(auth.operator_id).await?;
    tracing::info!(operator_id = auth.operator_id, revoked, "Operator signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
///
/// The signed-in operator, after the operator gate.
pub async fn session(
    RequireOperator(operator): RequireOperator,
) -> AppResult<Json<DataResponse<OperatorResponse>>> {
    Ok(Json(DataResponse {
        data: OperatorResponse::from(&operator),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn signup_closed() -> AppError {
    AppError::Core(CoreError::Forbidden(
        "Sign-up is closed. Ask an existing operator for access.".into(),
    ))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    operator_id: DbId,
    email: &str,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(operator_id, email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    state
        .operators
        .create_session(&CreateSession {
            operator_id,
            refresh_token_hash: refresh_hash,
            expires_at,
        })
        .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        operator: OperatorInfo {
            id: operator_id,
            email: email.to_string(),
        },
    })
}
