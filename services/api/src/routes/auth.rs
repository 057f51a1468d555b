//! Registration and login endpoints

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    models::{NewUser, Role, User},
    validation::validate_email,
};

/// Configured admin identity; compared byte-for-byte at login
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl AdminConfig {
    /// Create a new AdminConfig from environment variables
    ///
    /// # Environment Variables
    /// - `ADMIN_EMAIL`, `ADMIN_PASSWORD`: Admin credentials (required)
    pub fn from_env() -> anyhow::Result<Self> {
        let email = std::env::var("ADMIN_EMAIL")
            .map_err(|_| anyhow::anyhow!("ADMIN_EMAIL environment variable not set"))?;
        let password = std::env::var("ADMIN_PASSWORD")
            .map_err(|_| anyhow::anyhow!("ADMIN_PASSWORD environment variable not set"))?;

        Ok(AdminConfig { email, password })
    }
}

/// Request for user registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Identity plus issued token, returned by both endpoints
#[derive(Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

fn auth_response(state: &AppState, user: &User) -> Result<AuthResponse, ApiError> {
    let token = state
        .jwt_service
        .generate_token(user.id, user.role)
        .map_err(|e| {
            error!("Failed to generate token: {}", e);
            ApiError::Internal
        })?;

    Ok(AuthResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        token,
    })
}

/// Register a new user account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(name), Some(email), Some(password)) = (
        payload.name.filter(|s| !s.is_empty()),
        payload.email.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::Validation("All fields are required".to_string()));
    };

    validate_email(&email).map_err(ApiError::Validation)?;

    let exists = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal
        })?;

    if exists.is_some() {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    // A concurrent register may win the insert after the lookup above; the
    // repository reports the unique violation as None.
    let user = state
        .user_repository
        .create(&NewUser {
            name,
            email,
            password,
            role: Role::User,
        })
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::Conflict("Email already exists".to_string()))?;

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(auth_response(&state, &user)?)))
}

/// Log in as a user or as the configured admin
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(email), Some(password), Some(role)) = (
        payload.email.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
        payload.role.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::Validation(
            "Email, password, and role are required".to_string(),
        ));
    };

    let role: Role = role
        .parse()
        .map_err(|_| ApiError::Validation("Invalid role".to_string()))?;

    if role.is_admin() {
        // Admin credentials come from configuration, not from the store.
        if email != state.admin.email || password != state.admin.password {
            return Err(ApiError::Forbidden("Invalid admin credentials".to_string()));
        }

        let admin = state
            .user_repository
            .find_or_create_admin(&state.admin.email, &state.admin.password)
            .await
            .map_err(|e| {
                error!("Failed to resolve admin user: {}", e);
                ApiError::Internal
            })?;

        return Ok((StatusCode::OK, Json(auth_response(&state, &admin)?)));
    }

    let user = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let password_ok = state
        .user_repository
        .verify_password(&user, &password)
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::Internal
        })?;

    if !password_ok {
        return Err(ApiError::Validation("Invalid credentials".to_string()));
    }

    if user.role != Role::User {
        return Err(ApiError::Forbidden(
            "Access denied. This is a user login.".to_string(),
        ));
    }

    Ok((StatusCode::OK, Json(auth_response(&state, &user)?)))
}
