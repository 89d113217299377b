//! Auth repository: demo-directory sign-in over the persisted auth document.

use chrono::{DateTime, Utc};
use thiserror::Error;

use wearcast_store::{events, timestamp_id, DocStore, Document, StoreContext};

use crate::types::{AuthState, Language, Theme, User, UserRole};

// Demo credentials. The directory is fixed; there is no server to check
// against.
const SUPER_ADMIN: &str = "superadmin";
const SUPER_ADMIN_PASSWORD: &str = "super123";
const DEMO_PASSWORD: &str = "123456";
const EMAIL_CODE: &str = "123456";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid verification code")]
    InvalidCode,
}

/// Partial settings merge, the one sanctioned non-wholesale mutation of the
/// auth document.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub theme: Option<Theme>,
    pub language: Option<Language>,
    pub notifications: Option<bool>,
}

impl Document for AuthState {
    const KEY: &'static str = "wearcast-auth";
    const EVENT: &'static str = events::AUTH_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self::signed_out()
    }
}

pub struct AuthRepository {
    docs: DocStore<AuthState>,
}

impl AuthRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    /// Current auth state; signed out when nothing is stored.
    pub fn state(&self) -> AuthState {
        self.docs.load()
    }

    /// Password sign-in against the demo directory.
    ///
    /// # Errors
    /// `InvalidCredentials` when the username is unknown or the password
    /// does not match.
    pub fn login(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthState, AuthError> {
        let expected = if username == SUPER_ADMIN { SUPER_ADMIN_PASSWORD } else { DEMO_PASSWORD };
        let user = directory_user(username, now)
            .filter(|_| password == expected)
            .ok_or(AuthError::InvalidCredentials)?;

        let state = AuthState::signed_in(user);
        self.docs.save(&state);
        tracing::info!(username, "signed in");
        Ok(state)
    }

    /// Email-code sign-in. An email outside the directory mints a new user
    /// named after the mailbox.
    ///
    /// # Errors
    /// `InvalidCode` when the verification code does not match.
    pub fn login_with_email(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthState, AuthError> {
        if code != EMAIL_CODE {
            return Err(AuthError::InvalidCode);
        }

        let user = directory_user_by_email(email, now).unwrap_or_else(|| User {
            id: timestamp_id(now),
            username: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            role: UserRole::User,
            avatar: None,
            created_at: now,
        });

        let state = AuthState::signed_in(user);
        self.docs.save(&state);
        tracing::info!(email, "signed in via email code");
        Ok(state)
    }

    /// The demo flow only logs the send; there is no mail service.
    pub fn send_verification_code(&self, email: &str) {
        tracing::info!(email, "verification code sent");
    }

    /// Wholesale reset to the signed-out state.
    pub fn logout(&self) {
        self.docs.save(&AuthState::signed_out());
        tracing::info!("signed out");
    }

    /// Merge a settings patch into the current session. A no-op unless a
    /// user is signed in with settings present.
    pub fn update_settings(&self, patch: ProfilePatch) -> AuthState {
        let mut state = self.docs.load();
        if !state.is_authenticated {
            return state;
        }
        let Some(settings) = state.settings.as_mut() else {
            return state;
        };

        if let Some(theme) = patch.theme {
            settings.theme = theme;
        }
        if let Some(language) = patch.language {
            settings.language = language;
        }
        if let Some(notifications) = patch.notifications {
            settings.notifications = notifications;
        }

        self.docs.save(&state);
        state
    }
}

fn directory() -> [(&'static str, &'static str, UserRole); 3] {
    [
        (SUPER_ADMIN, "superadmin@example.com", UserRole::Admin),
        ("admin", "admin@example.com", UserRole::Admin),
        ("user", "user@example.com", UserRole::User),
    ]
}

fn directory_user(username: &str, now: DateTime<Utc>) -> Option<User> {
    directory()
        .into_iter()
        .enumerate()
        .find(|(_, (name, _, _))| *name == username)
        .map(|(index, entry)| make_user(index, entry, now))
}

fn directory_user_by_email(email: &str, now: DateTime<Utc>) -> Option<User> {
    directory()
        .into_iter()
        .enumerate()
        .find(|(_, (_, mail, _))| *mail == email)
        .map(|(index, entry)| make_user(index, entry, now))
}

fn make_user(
    index: usize,
    (username, email, role): (&str, &str, UserRole),
    now: DateTime<Utc>,
) -> User {
    User {
        id: (index + 1).to_string(),
        username: username.to_string(),
        email: email.to_string(),
        role,
        avatar: None,
        created_at: now,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn repo() -> AuthRepository {
        AuthRepository::new(StoreContext::in_memory())
    }

    #[test]
    fn test_default_state_is_signed_out() {
        let repo = repo();
        let state = repo.state();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.settings.is_none());
    }

    #[test]
    fn test_super_admin_needs_its_own_password() {
        let repo = repo();
        let now = Utc::now();

        assert!(matches!(
            repo.login("superadmin", "123456", now),
            Err(AuthError::InvalidCredentials)
        ));

        let state = repo.login("superadmin", "super123", now).unwrap();
        assert!(state.is_authenticated);
        assert_eq!(state.user.unwrap().role, UserRole::Admin);
    }

    #[test]
    fn test_directory_users_share_the_demo_password() {
        let repo = repo();
        let now = Utc::now();

        let state = repo.login("user", "123456", now).unwrap();
        assert_eq!(state.user.unwrap().username, "user");

        assert!(matches!(
            repo.login("user", "wrong", now),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            repo.login("stranger", "123456", now),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_persists_state() {
        let ctx = StoreContext::in_memory();
        let repo = AuthRepository::new(ctx.clone());
        repo.login("admin", "123456", Utc::now()).unwrap();

        // A second repository over the same context sees the session.
        let other = AuthRepository::new(ctx);
        assert!(other.state().is_authenticated);
    }

    #[test]
    fn test_email_login_checks_the_code() {
        let repo = repo();
        let now = Utc::now();

        assert!(matches!(
            repo.login_with_email("user@example.com", "000000", now),
            Err(AuthError::InvalidCode)
        ));

        let state = repo.login_with_email("user@example.com", "123456", now).unwrap();
        assert_eq!(state.user.unwrap().username, "user");
    }

    #[test]
    fn test_unknown_email_mints_a_user() {
        let repo = repo();
        let state = repo.login_with_email("ada@lovelace.dev", "123456", Utc::now()).unwrap();

        let user = state.user.unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(user.role, UserRole::User);
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_logout_resets_wholesale() {
        let repo = repo();
        repo.login("user", "123456", Utc::now()).unwrap();
        repo.logout();

        assert_eq!(repo.state(), AuthState::signed_out());
    }

    #[test]
    fn test_settings_merge_touches_only_patched_fields() {
        let repo = repo();
        repo.login("user", "123456", Utc::now()).unwrap();

        let state = repo.update_settings(ProfilePatch {
            theme: Some(Theme::Dark),
            ..ProfilePatch::default()
        });

        let settings = state.settings.unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, Language::ZhCn);
        assert!(settings.notifications);
    }

    #[test]
    fn test_settings_merge_is_noop_when_signed_out() {
        let repo = repo();
        let state = repo.update_settings(ProfilePatch {
            theme: Some(Theme::Dark),
            ..ProfilePatch::default()
        });
        assert!(!state.is_authenticated);
        assert!(state.settings.is_none());
    }

    #[test]
    fn test_garbage_auth_document_reads_as_signed_out() {
        let ctx = StoreContext::in_memory();
        ctx.kv.set("wearcast-auth", "{not json").unwrap();

        let repo = AuthRepository::new(ctx);
        assert_eq!(repo.state(), AuthState::signed_out());
    }
}
