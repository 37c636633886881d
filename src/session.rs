use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    Professor,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Professor => "PROFESSOR",
        }
    }
}

/// Authenticated lab session, persisted as a plain JSON blob so the login
/// gate is skipped on the next launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub username: String,
    pub role: Role,
}

/// Two-code login gate. This is a classroom access gate, not security:
/// the codes map to the demo identities the lab hands out.
pub fn login(access_code: &str) -> Option<UserSession> {
    match access_code.trim() {
        "admin" => Some(UserSession {
            username: "Prof. Falken".to_string(),
            role: Role::Professor,
        }),
        "student" => Some(UserSession {
            username: "Student Unit 1".to_string(),
            role: Role::Student,
        }),
        _ => None,
    }
}

fn session_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("session.json")
}

pub fn load_session() -> Option<UserSession> {
    load_session_from(&session_path())
}

pub fn save_session(session: &UserSession) -> Result<()> {
    save_session_to(&session_path(), session)
}

pub fn clear_session() {
    let _ = fs::remove_file(session_path());
}

pub fn load_session_from(path: &Path) -> Option<UserSession> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

pub fn save_session_to(path: &Path, session: &UserSession) -> Result<()> {
    let data = serde_json::to_string_pretty(session)?;
    fs::write(path, data).with_context(|| format!("writing session blob {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn only_the_two_access_codes_pass() {
        let prof = login("admin").unwrap();
        assert_eq!(prof.role, Role::Professor);
        assert_eq!(prof.username, "Prof. Falken");

        let student = login("  student ").unwrap();
        assert_eq!(student.role, Role::Student);

        assert!(login("root").is_none());
        assert!(login("").is_none());
        assert!(login("ADMIN").is_none());
    }

    #[test]
    fn session_blob_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = login("admin").unwrap();
        save_session_to(&path, &session).unwrap();
        let loaded = load_session_from(&path).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn missing_or_garbled_blob_yields_no_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        assert!(load_session_from(&path).is_none());

        fs::write(&path, "not json").unwrap();
        assert!(load_session_from(&path).is_none());
    }
}
