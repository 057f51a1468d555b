//! Middleware for JWT token validation and authorization checks

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;
use uuid::Uuid;

use crate::{AppState, error::ApiError, models::Role};

/// Authenticated caller, inserted into request extensions by the middleware
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// True when this caller owns the given resource or is an admin
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.id == owner_id || self.role.is_admin()
    }
}

/// Capability check for admin-only operations
pub fn require_admin(user: &AuthUser) -> Result<(), ApiError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}

/// Extract and validate the JWT from the Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ApiError::Unauthorized
    })?;

    let user = AuthUser {
        id: claims.sub,
        role: claims.role,
    };
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_admin_rejects_users() {
        let admin = AuthUser {
            id: Uuid::new_v4(),
            role: Role::Admin,
        };
        let user = AuthUser {
            id: Uuid::new_v4(),
            role: Role::User,
        };

        assert!(require_admin(&admin).is_ok());
        assert!(require_admin(&user).is_err());
    }

    #[test]
    fn ownership_check_allows_owner_and_admin() {
        let owner_id = Uuid::new_v4();
        let owner = AuthUser {
            id: owner_id,
            role: Role::User,
        };
        let admin = AuthUser {
            id: Uuid::new_v4(),
            role: Role::Admin,
        };
        let stranger = AuthUser {
            id: Uuid::new_v4(),
            role: Role::User,
        };

        assert!(owner.can_access(owner_id));
        assert!(admin.can_access(owner_id));
        assert!(!stranger.can_access(owner_id));
    }
}
