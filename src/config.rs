use std::path::PathBuf;

use crate::error::ConfigError;

const DEFAULT_CITIES_FILE: &str = "cities.txt";
const DEFAULT_DB_PATH: &str = "db.sqlite";
pub const DEFAULT_ROUNDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cities_file: PathBuf,
    pub rounds: usize,
    pub storage: StorageBackend,
    pub db_path: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    /// `.env` has to be loaded by the caller beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cities_file = lookup("CITIES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CITIES_FILE));

        let rounds = match lookup("QUIZ_ROUNDS") {
            None => DEFAULT_ROUNDS,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(rounds) if rounds >= 1 => rounds,
                _ => return Err(ConfigError::InvalidRounds { value }),
            },
        };

        let storage = match lookup("QUIZ_STORAGE") {
            None => StorageBackend::Sqlite,
            Some(value) => match value.trim().to_lowercase().as_str() {
                "sqlite" => StorageBackend::Sqlite,
                "memory" => StorageBackend::Memory,
                _ => return Err(ConfigError::InvalidStorage { value }),
            },
        };

        let db_path = lookup("QUIZ_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        Ok(Self {
            cities_file,
            rounds,
            storage,
            db_path,
        })
    }
}
