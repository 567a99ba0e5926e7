//! Session lifecycle: login, logout, token refresh and profile lookup.
//!
//! The engine keeps no state of its own. Everything it knows lives in the
//! user and session repositories, so a single instance is shared by all
//! request handlers.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::{PasswordHasher, Profile, TokenIssuer, TokenPair};
use crate::error::{AppError, AppResult};
use crate::models::{NewSession, SessionToken};
use crate::repository::{SessionRepository, UserRepository};

pub struct AuthUsecase {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthUsecase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            tokens,
        }
    }

    /// Checks the credentials and opens a new session.
    ///
    /// An unknown email and a wrong password are reported as different errors.
    /// Nothing is stored unless both checks pass.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::EmailNotFound)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::PasswordIncorrect);
        }

        let access = self.tokens.generate_access_token(&user.id)?;
        let refresh = self.tokens.generate_refresh_token(&user.id)?;

        self.sessions
            .store(&NewSession {
                user_id: user.id.clone(),
                token: refresh.token.clone(),
                expires_at: refresh.expires_at,
            })
            .await?;

        log::info!("user {} logged in", user.id);
        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
        })
    }

    /// Removes the session bound to `refresh_token`.
    ///
    /// A blank token is rejected before the store is touched. Logging out the
    /// same token twice fails the second time with `AuthNotExist`.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        let token = SessionToken::parse(refresh_token)?;

        let deleted = self.sessions.delete_by_token(token.as_str()).await?;
        if deleted == 0 {
            return Err(AppError::AuthNotExist);
        }

        log::info!("session closed");
        Ok(())
    }

    /// Exchanges a live refresh token for a new token pair.
    ///
    /// An expired session is left in the store untouched. The old session is
    /// replaced through `SessionRepository::rotate`, so of several concurrent
    /// refreshes of one token at most one succeeds.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let session = self
            .sessions
            .find_by_token(refresh_token)
            .await?
            .ok_or(AppError::SessionNotFound)?;

        session.verify_not_expired(Utc::now())?;

        let access = self.tokens.generate_access_token(&session.user_id)?;
        let refresh = self.tokens.generate_refresh_token(&session.user_id)?;

        self.sessions
            .rotate(
                &session.token,
                &NewSession {
                    user_id: session.user_id.clone(),
                    token: refresh.token.clone(),
                    expires_at: refresh.expires_at,
                },
            )
            .await?;

        log::info!("session refreshed for user {}", session.user_id);
        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
        })
    }

    pub async fn profile(&self, user_id: &str) -> AppResult<Profile> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        Ok(Profile {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }
}
