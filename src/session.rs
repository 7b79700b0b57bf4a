//! Signed-in user context, persisted at ~/.hazardx/session.json.
//!
//! The session is an explicit value owned by the caller; nothing reads it
//! through globals. Login replaces it, logout clears it.

use crate::location::catalog;
use crate::location::DivisionalSecretariat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown role '{0}' (expected ds, dmc or volunteer)")]
    UnknownRole(String),

    #[error("role mismatch: account is {actual}, but {expected} was selected")]
    RoleMismatch { expected: Role, actual: Role },

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Account role; decides which dashboard a user lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Divisional secretariat officer.
    Ds,
    /// Disaster management centre officer.
    Dmc,
    Volunteer,
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ds" | "ds officer" => Ok(Self::Ds),
            "dmc" | "dmc officer" => Ok(Self::Dmc),
            "volunteer" => Ok(Self::Volunteer),
            _ => Err(SessionError::UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ds => write!(f, "ds"),
            Self::Dmc => write!(f, "dmc"),
            Self::Volunteer => write!(f, "volunteer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub divisional_secretariat: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
}

impl User {
    /// The user's home division, when both names form a catalog pair.
    pub fn home_division(&self) -> Option<DivisionalSecretariat> {
        let district = self.district.as_deref()?;
        let ds = self.divisional_secretariat.as_deref()?;
        catalog::division(district, ds)
    }
}

/// The current session and where it is stored.
pub struct SessionContext {
    path: PathBuf,
    user: Option<User>,
}

impl SessionContext {
    /// Load from the default location (~/.hazardx/session.json).
    pub fn load() -> Result<Self, SessionError> {
        Self::load_from(Self::default_path())
    }

    /// Load from a specific path. A missing file is an empty session.
    pub fn load_from(path: PathBuf) -> Result<Self, SessionError> {
        let user = Self::read_file(&path)?;
        Ok(Self { path, user })
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hazardx")
            .join("session.json")
    }

    fn read_file(path: &Path) -> Result<Option<User>, SessionError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Start a session for `user`, who signed in under `selected` role.
    ///
    /// The divisional secretariat is stored trimmed. A role that differs from
    /// the account's own is rejected and the previous session is kept.
    pub fn login(&mut self, mut user: User, selected: Role) -> Result<&User, SessionError> {
        if user.username.trim().is_empty() {
            return Err(SessionError::EmptyUsername);
        }
        if user.role != selected {
            return Err(SessionError::RoleMismatch {
                expected: selected,
                actual: user.role,
            });
        }

        user.divisional_secretariat = user
            .divisional_secretariat
            .map(|ds| ds.trim().to_string())
            .filter(|ds| !ds.is_empty());

        if user.role == Role::Ds && user.home_division().is_none() {
            debug!(
                district = ?user.district,
                ds = ?user.divisional_secretariat,
                "ds officer's division is not in the catalog"
            );
        }

        info!(username = %user.username, role = %user.role, "login");
        self.persist_user(&user)?;
        Ok(&*self.user.insert(user))
    }

    /// End the session; returns the user who was signed in.
    pub fn logout(&mut self) -> Result<Option<User>, SessionError> {
        let previous = self.user.take();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        if let Some(ref user) = previous {
            info!(username = %user.username, "logout");
        }
        Ok(previous)
    }

    fn persist_user(&self, user: &User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(user)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_session() -> (SessionContext, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");
        (SessionContext::load_from(path).unwrap(), dir)
    }

    fn officer() -> User {
        User {
            id: 7,
            username: "kamal".into(),
            role: Role::Ds,
            divisional_secretariat: Some("  Hikkaduwa ".into()),
            district: Some("Galle".into()),
            email: Some("kamal@example.lk".into()),
            full_name: None,
            contact_no: None,
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("DS".parse::<Role>().unwrap(), Role::Ds);
        assert_eq!("DMC Officer".parse::<Role>().unwrap(), Role::Dmc);
        assert_eq!(" volunteer ".parse::<Role>().unwrap(), Role::Volunteer);
        assert!(matches!("admin".parse::<Role>(), Err(SessionError::UnknownRole(_))));
    }

    #[test]
    fn test_empty_session() {
        let (session, _dir) = test_session();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_login_trims_division() {
        let (mut session, _dir) = test_session();
        let user = session.login(officer(), Role::Ds).unwrap();
        assert_eq!(user.divisional_secretariat.as_deref(), Some("Hikkaduwa"));
        let home = user.home_division().unwrap();
        assert_eq!(home.district, "Galle");
        assert!(home.coordinates.is_some());
    }

    #[test]
    fn test_role_mismatch_keeps_previous() {
        let (mut session, _dir) = test_session();
        session.login(officer(), Role::Ds).unwrap();

        let volunteer = User {
            id: 9,
            username: "nimali".into(),
            role: Role::Volunteer,
            ..officer()
        };
        let err = session.login(volunteer, Role::Dmc).unwrap_err();
        assert!(matches!(
            err,
            SessionError::RoleMismatch { expected: Role::Dmc, actual: Role::Volunteer }
        ));
        assert_eq!(session.user().unwrap().username, "kamal");
    }

    #[test]
    fn test_empty_username_rejected() {
        let (mut session, _dir) = test_session();
        let user = User { username: "  ".into(), ..officer() };
        assert!(matches!(session.login(user, Role::Ds), Err(SessionError::EmptyUsername)));
    }

    #[test]
    fn test_persistence_and_logout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        {
            let mut session = SessionContext::load_from(path.clone()).unwrap();
            session.login(officer(), Role::Ds).unwrap();
        }

        let mut reloaded = SessionContext::load_from(path.clone()).unwrap();
        assert_eq!(reloaded.user().unwrap().id, 7);

        let previous = reloaded.logout().unwrap();
        assert_eq!(previous.unwrap().username, "kamal");
        assert!(!reloaded.is_authenticated());
        assert!(!path.exists());

        // Logging out twice is harmless.
        assert!(reloaded.logout().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(SessionContext::load_from(path), Err(SessionError::Json(_))));
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"id":1,"username":"a","role":"dmc","divisionalSecretariat":"Colombo","district":"Colombo"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Dmc);
        assert_eq!(user.home_division().unwrap().name, "Colombo");
    }
}
