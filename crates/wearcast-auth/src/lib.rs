//! Authentication state.
//!
//! A demo-grade sign-in against a fixed user directory, persisted as a
//! single auth document. The state is replaced wholesale on login and
//! logout; the only partial mutation is the explicit settings merge.

pub mod repository;
pub mod types;

pub use repository::{AuthError, AuthRepository, ProfilePatch};
pub use types::{AuthState, Language, ProfileSettings, Theme, User, UserRole};
