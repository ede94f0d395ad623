use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::ConfigError;

const FIELD_SEPARATOR: char = '|';

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub province: String,
    pub fact: String,
    pub image: String,
}

impl CityRecord {
    pub fn new(name: &str, province: &str, fact: &str, image: &str) -> Self {
        Self {
            name: name.to_string(),
            province: province.to_string(),
            fact: fact.to_string(),
            image: image.to_string(),
        }
    }

    /// Parses a `Name|Province|Fact|path/to/image` line.
    /// Returns `None` unless there are exactly four fields.
    fn parse_line(line: &str) -> Option<Self> {
        let parts = line
            .split(FIELD_SEPARATOR)
            .map(str::trim)
            .collect::<Vec<_>>();
        match parts.as_slice() {
            [name, province, fact, image] => Some(Self::new(name, province, fact, image)),
            _ => None,
        }
    }
}

/// The cities questions are drawn from. A city is identified by its
/// position in the catalog, and a catalog is never empty.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    cities: Vec<CityRecord>,
}

impl CityCatalog {
    pub fn new(cities: Vec<CityRecord>) -> Result<Self, ConfigError> {
        if cities.is_empty() {
            return Err(ConfigError::EmptyCatalog {
                origin: "in-memory catalog".to_string(),
            });
        }
        Ok(Self { cities })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ConfigError::MissingCatalog {
                path: path.to_path_buf(),
            },
            _ => ConfigError::CatalogRead {
                path: path.to_path_buf(),
                source: err,
            },
        })?;

        let catalog = Self::from_reader(BufReader::new(file), &path.display().to_string())
            .map_err(|err| match err {
                ConfigError::CatalogRead { source, .. } => ConfigError::CatalogRead {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })?;

        log::info!(
            "Loaded {} cities from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_reader<R: BufRead>(reader: R, origin: &str) -> Result<Self, ConfigError> {
        let mut cities = Vec::new();

        for (line_number, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ConfigError::CatalogRead {
                path: origin.into(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match CityRecord::parse_line(line) {
                Some(city) => cities.push(city),
                None => log::warn!(
                    "{}:{}: skipping line without exactly 4 fields",
                    origin,
                    line_number + 1
                ),
            }
        }

        if cities.is_empty() {
            return Err(ConfigError::EmptyCatalog {
                origin: origin.to_string(),
            });
        }
        Ok(Self { cities })
    }

    pub fn get(&self, index: usize) -> Option<&CityRecord> {
        self.cities.get(index)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn cities(&self) -> &[CityRecord] {
        &self.cities
    }
}
