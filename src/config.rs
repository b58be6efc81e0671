use crate::{collection::Collection, error::ConfigError};

use std::{env, str::FromStr};

/// Default table behind the Books collection.
pub const DEFAULT_BOOKS_TABLE: &str = "Books";
/// Default table behind the Reviews collection.
pub const DEFAULT_REVIEWS_TABLE: &str = "Reviews";

/// Where API Gateway puts key parameters.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum KeySource {
    /// `?book_id=...` query string parameters only.
    Query,
    /// `/books/{book_id}` path parameters only.
    Path,
    /// Path parameters first, then query string parameters.
    #[default]
    Any,
}

impl FromStr for KeySource {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "path" => Ok(Self::Path),
            "any" => Ok(Self::Any),
            _ => Err(ConfigError::InvalidKeySource(value.to_string())),
        }
    }
}

/// Runtime settings, read once at startup.
///
/// | variable          | default   |
/// |-------------------|-----------|
/// | `BOOKS_TABLE`     | `Books`   |
/// | `REVIEWS_TABLE`   | `Reviews` |
/// | `KEY_SOURCE`      | `any`     |
/// | `CONSISTENT_READ` | `false`   |
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Table behind the Books collection.
    pub books_table: String,
    /// Table behind the Reviews collection.
    pub reviews_table: String,
    /// Where key parameters are read from.
    pub key_source: KeySource,
    /// Use strongly consistent reads for ReadOne and ReadAll.
    pub consistent_read: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            books_table: DEFAULT_BOOKS_TABLE.to_string(),
            reviews_table: DEFAULT_REVIEWS_TABLE.to_string(),
            key_source: KeySource::default(),
            consistent_read: false,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table = |name: &'static str, default: &str| match lookup(name) {
            Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyTableName(name)),
            Some(value) => Ok(value),
            None => Ok(default.to_string()),
        };
        let key_source = match lookup("KEY_SOURCE") {
            Some(value) => value.parse()?,
            None => KeySource::default(),
        };
        let consistent_read = match lookup("CONSISTENT_READ") {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" | "" => false,
                _ => return Err(ConfigError::InvalidConsistentRead(value)),
            },
            None => false,
        };
        Ok(Self {
            books_table: table("BOOKS_TABLE", DEFAULT_BOOKS_TABLE)?,
            reviews_table: table("REVIEWS_TABLE", DEFAULT_REVIEWS_TABLE)?,
            key_source,
            consistent_read,
        })
    }

    /// The collections these settings describe.
    pub fn collections(&self) -> Vec<Collection> {
        vec![
            Collection::books(self.books_table.clone()),
            Collection::reviews(self.reviews_table.clone()),
        ]
    }
}
