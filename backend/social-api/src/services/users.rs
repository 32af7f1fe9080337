/// User service - registration and login
use crate::config::JwtSettings;
use crate::db;
use crate::error::{ApiError, FieldErrors, Result};
use crate::models::User;
use crate::security::{hash_password, issue_token, verify_password};
use crate::validators::{validate_login_input, validate_register_input};
use sqlx::PgPool;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
    jwt: JwtSettings,
}

impl UserService {
    pub fn new(pool: PgPool, jwt: JwtSettings) -> Self {
        Self { pool, jwt }
    }

    /// Register a new account and sign a token for it.
    ///
    /// The username pre-check gives the common case a friendly error; the
    /// UNIQUE constraint underneath closes the race and also maps to
    /// `Conflict` if two registrations collide.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(User, String)> {
        let errors = validate_register_input(username, email, password, confirm_password);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        if db::users::find_by_username(&self.pool, username)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict("Username is taken".to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = db::users::insert(&self.pool, username, email, &password_hash).await?;

        let token = issue_token(&user, &self.jwt.secret, self.jwt.expiry_secs)?;
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");

        Ok((user, token))
    }

    /// Authenticate by username and password, signing a fresh token.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String)> {
        let errors = validate_login_input(username, password);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let user = match db::users::find_by_username(&self.pool, username).await? {
            Some(user) => user,
            None => {
                return Err(ApiError::Validation(FieldErrors::general("User not found")));
            }
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(username = %username, "login rejected: wrong credentials");
            return Err(ApiError::Validation(FieldErrors::general(
                "Wrong credentials",
            )));
        }

        let token = issue_token(&user, &self.jwt.secret, self.jwt.expiry_secs)?;

        Ok((user, token))
    }
}
