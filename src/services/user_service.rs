//! UserService — registration, credential checks, and profile maintenance.

use crate::{
    dto::{pin::PinView, user::UserView},
    models::user::{EMAIL_MAX_LEN, USERNAME_MAX_LEN, User},
    password::{hash_password, verify_password, verify_without_account},
    repositories::{
        is_unique_violation, pin_repository::PinRepository, user_repository::UserRepository,
    },
    services::{ServiceError, ServiceResult, ensure_len},
};
use chrono::Utc;
use sqlx::SqlitePool;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info};

const DUPLICATE_ACCOUNT: &str = "Username or email already exists";

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    pins: PinRepository,
}

impl UserService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            pins: PinRepository::new(db),
        }
    }

    /// Create an account. Username and email are trimmed and must both be
    /// unused.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<UserView> {
        let (username, email) = (username.trim(), email.trim());
        validate_profile(username, email, password)?;

        if self.users.find_by_username(username).await?.is_some()
            || self.users.find_by_email(email).await?.is_some()
        {
            return Err(ServiceError::Conflict(DUPLICATE_ACCOUNT.into()));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .insert(username, email, &password_hash, Utc::now())
            .await
            .map_err(conflict_on_unique)?;

        info!(user_id = user.id, "registered user {}", user.username);
        Ok(UserView::new(&user, Vec::new()))
    }

    /// Stateless credential check. `username_or_email` is tried as a
    /// username first, then as an email.
    ///
    /// Unknown accounts and wrong passwords fail identically.
    pub async fn login(&self, username_or_email: &str, password: &str) -> ServiceResult<UserView> {
        let username_or_email = username_or_email.trim();
        let user = match self.users.find_by_username(username_or_email).await? {
            Some(user) => Some(user),
            None => self.users.find_by_email(username_or_email).await?,
        };

        let Some(user) = user else {
            verify_without_account(password);
            debug!("login failed: no account for {}", username_or_email);
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(password, &user.password)? {
            debug!(user_id = user.id, "login failed: password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        self.view(&user).await
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<UserView> {
        let user = self.fetch(id).await?;
        self.view(&user).await
    }

    /// Every user with their pins, ordered by id.
    pub async fn list_all(&self) -> ServiceResult<Vec<UserView>> {
        let users = self.users.find_all().await?;

        let mut pins_by_owner: HashMap<i64, Vec<PinView>> = HashMap::new();
        for pin in self.pins.find_all().await? {
            pins_by_owner
                .entry(pin.pin.user_id)
                .or_default()
                .push(pin.into());
        }

        Ok(users
            .iter()
            .map(|user| UserView::new(user, pins_by_owner.remove(&user.id).unwrap_or_default()))
            .collect())
    }

    /// Overwrite username, email, and password.
    ///
    /// The new username and email must not belong to any other user.
    pub async fn update(
        &self,
        id: i64,
        username: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<UserView> {
        let (username, email) = (username.trim(), email.trim());
        validate_profile(username, email, password)?;
        self.fetch(id).await?;

        let taken_by_other = |other: Option<User>| other.is_some_and(|other| other.id != id);
        if taken_by_other(self.users.find_by_username(username).await?)
            || taken_by_other(self.users.find_by_email(email).await?)
        {
            return Err(ServiceError::Conflict(DUPLICATE_ACCOUNT.into()));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .update(id, username, email, &password_hash, Utc::now())
            .await
            .map_err(conflict_on_unique)?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        info!(user_id = id, "updated user {}", user.username);
        self.view(&user).await
    }

    /// Delete by id. Deleting an unknown id is not an error.
    ///
    /// The user's pins, their comments, and comments on their pins are
    /// removed with it.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let removed = self.users.delete_by_id(id).await?;
        debug!(user_id = id, removed, "delete user");
        Ok(())
    }

    async fn fetch(&self, id: i64) -> ServiceResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))
    }

    async fn view(&self, user: &User) -> ServiceResult<UserView> {
        let pins = self
            .pins
            .find_by_user_id(user.id)
            .await?
            .into_iter()
            .map(PinView::from)
            .collect();
        Ok(UserView::new(user, pins))
    }
}

fn validate_profile(username: &str, email: &str, password: &str) -> ServiceResult<()> {
    ensure_len("username", username, USERNAME_MAX_LEN, true)?;
    ensure_len("email", email, EMAIL_MAX_LEN, true)?;
    if password.is_empty() {
        return Err(ServiceError::Validation("password must not be empty".into()));
    }
    Ok(())
}

fn conflict_on_unique(err: sqlx::Error) -> ServiceError {
    if is_unique_violation(&err) {
        ServiceError::Conflict(DUPLICATE_ACCOUNT.into())
    } else {
        ServiceError::Sqlx(err)
    }
}
