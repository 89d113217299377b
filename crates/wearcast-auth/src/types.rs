use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
}

/// Per-account presentation settings, created with defaults at sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    pub theme: Theme,
    pub language: Language,
    pub notifications: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self { theme: Theme::Light, language: Language::ZhCn, notifications: true }
    }
}

/// The auth singleton. Signed out is the zero state: no user, no settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub settings: Option<ProfileSettings>,
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self { is_authenticated: false, user: None, settings: None }
    }

    pub fn signed_in(user: User) -> Self {
        Self { is_authenticated: true, user: Some(user), settings: Some(ProfileSettings::default()) }
    }
}
