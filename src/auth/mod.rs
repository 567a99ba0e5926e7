pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{BcryptHasher, PasswordHasher};
pub use token::{Claims, IssuedToken, JwtIssuer, TokenIssuer};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required field"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required field"))]
    pub password: String,
}

impl LoginRequest {
    pub fn normalize(&mut self) {
        self.email = self.email.trim().to_string();
        self.password = self.password.trim().to_string();
    }
}

/// Body of both logout and refresh requests. A missing token decodes as
/// empty and is rejected as `TokenEmpty`.
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: String,
}

/// Access/refresh token pair returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// The authenticated user's public profile. Never carries the password digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let mut valid_login = LoginRequest {
            email: " gopher@go.dev ".to_string(),
            password: "secret_password".to_string(),
        };
        valid_login.normalize();
        assert!(valid_login.validate().is_ok());
        assert_eq!(valid_login.email, "gopher@go.dev");

        let mut blank_password = LoginRequest {
            email: "gopher@go.dev".to_string(),
            password: "   ".to_string(),
        };
        blank_password.normalize();
        assert!(blank_password.validate().is_err());
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let login: LoginRequest = serde_json::from_str(r#"{"email": "gopher@go.dev"}"#).unwrap();
        assert_eq!(login.password, "");
        assert!(login.validate().is_err());

        let refresh: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(refresh.refresh_token, "");
    }

    #[test]
    fn test_profile_has_no_password_field() {
        let profile = Profile {
            id: "user-1".into(),
            name: "Gopher".into(),
            email: "gopher@go.dev".into(),
        };
        let json = serde_json::to_value(profile).unwrap();
        assert_eq!(json.as_object().map(|o| o.len()), Some(3));
        assert!(json.get("password").is_none());
    }
}
