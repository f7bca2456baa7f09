use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{jwt::TokenError, middleware::AuthError, ownership::Forbidden, password::HashError};

// ============= Authentication Types =============

/// Sign-up payload (JSON).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignUpRequest {
    #[schema(example = "name@server.com")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::InvalidInput(
                "A valid email address is required".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(AppError::InvalidInput("Password is required".to_string()));
        }
        Ok(())
    }
}

/// Sign-in payload, form-encoded as in the OAuth2 password flow.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignInForm {
    /// The account email
    #[schema(example = "name@server.com")]
    pub username: String,
    #[schema(example = "secret")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
        }
    }
}

/// Verified token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity (the account email)
    pub sub: String,
    /// Expiry as seconds since the Unix epoch
    pub exp: i64,
}

// ============= Generic Responses =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventCreatedResponse {
    pub message: String,
    pub id: i64,
}

// ============= Event Types =============

/// A stored event. `creator` is the owning identity and is written once, at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: i64,
    pub creator: String,
    pub title: String,
    pub image: String,
    pub description: String,
    pub tags: Vec<String>,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "title": "Event title",
    "image": "https://link-to-image.com/image.png",
    "description": "Event description",
    "tags": ["tag1", "tag2"],
    "location": "online"
}))]
pub struct EventCreate {
    pub title: String,
    pub image: String,
    pub description: String,
    pub tags: Vec<String>,
    pub location: String,
}

impl EventCreate {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::InvalidInput("Event title must not be empty".to_string()));
        }
        Ok(())
    }

    /// Builds the stored record, stamping the authenticated subject as creator.
    pub fn into_event(self, id: i64, creator: &str) -> Event {
        Event {
            id,
            creator: creator.to_string(),
            title: self.title,
            image: self.image,
            description: self.description,
            tags: self.tags,
            location: self.location,
        }
    }
}

/// Partial update. Only the fields listed here can be changed; unknown keys
/// in the payload (including `id` and `creator`) are dropped by serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EventUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
}

impl EventUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::InvalidInput(
                    "Event title must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.image.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.location.is_none()
    }

    /// Merges the supplied fields into `event`, leaving the rest untouched.
    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(image) = self.image {
            event.image = image;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(tags) = self.tags {
            event.tags = tags;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Sign in for access")]
    Unauthenticated,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired!")]
    TokenExpired,

    #[error("Wrong credential passed")]
    WrongCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => AppError::Unauthenticated,
            AuthError::InvalidToken => AppError::InvalidToken,
            AuthError::TokenExpired => AppError::TokenExpired,
        }
    }
}

impl From<Forbidden> for AppError {
    fn from(err: Forbidden) -> Self {
        AppError::Forbidden(err.to_string())
    }
}

impl From<HashError> for AppError {
    fn from(err: HashError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AuthError::from(err).into()
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Unauthenticated | AppError::InvalidToken | AppError::TokenExpired => {
                (StatusCode::FORBIDDEN, self.to_string())
            }
            AppError::WrongCredentials => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Database(msg) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn sample_event() -> Event {
        Event {
            id: 7,
            creator: "alice@x.com".to_string(),
            title: "Launch".to_string(),
            image: "https://img/launch.png".to_string(),
            description: "Product launch".to_string(),
            tags: vec!["launch".to_string()],
            location: "online".to_string(),
        }
    }

    #[test]
    fn test_update_only_touches_supplied_fields() {
        let mut event = sample_event();
        let update = EventUpdate {
            title: Some("Relaunch".to_string()),
            ..Default::default()
        };

        update.apply(&mut event);

        assert_eq!(event.title, "Relaunch");
        assert_eq!(event.description, "Product launch");
        assert_eq!(event.tags, vec!["launch".to_string()]);
    }

    #[test]
    fn test_update_payload_cannot_reach_id_or_creator() {
        let payload = serde_json::json!({
            "id": 99,
            "creator": "mallory@x.com",
            "location": "Berlin"
        });
        let update: EventUpdate = serde_json::from_value(payload).expect("should deserialize");
        let mut event = sample_event();

        update.apply(&mut event);

        assert_eq!(event.id, 7);
        assert_eq!(event.creator, "alice@x.com");
        assert_eq!(event.location, "Berlin");
    }

    #[test]
    fn test_empty_update_detected() {
        assert!(EventUpdate::default().is_empty());
        let update: EventUpdate =
            serde_json::from_value(serde_json::json!({"creator": "x"})).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_blank_title_rejected() {
        let update = EventUpdate {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_sign_up_validation() {
        let ok = SignUpRequest {
            email: "alice@x.com".to_string(),
            password: "pw1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = SignUpRequest {
            email: "alice".to_string(),
            password: "pw1".to_string(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_auth_failures_are_forbidden() {
        for err in [
            AppError::Unauthenticated,
            AppError::InvalidToken,
            AppError::TokenExpired,
            AppError::WrongCredentials,
            AppError::Forbidden("Operation not allowed".to_string()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let response = AppError::Database("disk I/O error at /var/db".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
