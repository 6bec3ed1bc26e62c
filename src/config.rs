//! Runtime configuration for the tracker binary.
use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = "sage.sqlite3";
pub const DEFAULT_USER_ID: &str = "local";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub user_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl Config {
    /// Builds a config from optional overrides, falling back to the defaults.
    /// Blank user ids are treated as absent.
    pub fn new(database_path: Option<PathBuf>, user_id: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_path: database_path.unwrap_or(defaults.database_path),
            user_id: user_id
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .unwrap_or(defaults.user_id),
        }
    }
}
