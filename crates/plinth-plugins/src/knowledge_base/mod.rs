//! Ambient environment facts available to plugins.
//!
//! The knowledge base is an immutable snapshot built once per trial. Caller
//! overrides are merged over a fixed set of defaults so that plugins can ask
//! for `hostname`, `zone`, `users`, or `codepage` without handling absence.

use std::collections::BTreeMap;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use time::UtcOffset;
use time::macros::format_description;

/// Mapping of knowledge base keys to arbitrary JSON values.
pub type KnowledgeBaseValues = BTreeMap<String, Value>;

/// Key holding the host name of the system the fixture came from.
pub const HOSTNAME_KEY: &str = "hostname";
/// Key holding the time zone used for timestamps without an explicit offset.
pub const ZONE_KEY: &str = "zone";
/// Key holding the list of known user accounts.
pub const USERS_KEY: &str = "users";
/// Key holding the code page used for byte strings.
pub const CODEPAGE_KEY: &str = "codepage";

/// Errors raised when a knowledge base value has an unusable shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeBaseError {
    /// The value stored under `key` does not have the expected type.
    #[error("knowledge base value '{key}' must be {expected}")]
    InvalidValue {
        /// Offending key.
        key: String,
        /// Human-readable description of the expected shape.
        expected: &'static str,
    },

    /// The `zone` value is neither `UTC` nor a `±HH:MM` offset.
    #[error("unsupported time zone '{value}': expected UTC or a ±HH:MM offset")]
    InvalidZone {
        /// Raw zone value.
        value: String,
    },
}

/// A user account known to the system the fixture came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    username: String,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    home: Option<String>,
}

impl UserAccount {
    /// Creates a user account record.
    #[must_use]
    pub fn new(username: impl Into<String>, uid: Option<String>, home: Option<String>) -> Self {
        Self {
            username: username.into(),
            uid,
            home,
        }
    }

    /// Returns the account name.
    #[must_use]
    pub const fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the numeric user identifier, if known.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Returns the home directory, if known.
    #[must_use]
    pub fn home(&self) -> Option<&str> {
        self.home.as_deref()
    }
}

/// Read-only environment facts for one trial.
///
/// # Example
///
/// ```
/// use plinth_plugins::{KnowledgeBase, KnowledgeBaseValues};
///
/// let defaults = KnowledgeBase::new(None);
/// assert_eq!(defaults.hostname().expect("string"), "");
///
/// let mut overrides = KnowledgeBaseValues::new();
/// overrides.insert("hostname".into(), "forensics-lab".into());
/// let custom = KnowledgeBase::new(Some(overrides));
/// assert_eq!(custom.hostname().expect("string"), "forensics-lab");
/// assert_eq!(custom.zone(), defaults.zone());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    values: KnowledgeBaseValues,
}

impl KnowledgeBase {
    /// Builds a knowledge base from optional overrides.
    ///
    /// Overrides replace defaults key by key; keys without an override keep
    /// their default value.
    #[must_use]
    pub fn new(overrides: Option<KnowledgeBaseValues>) -> Self {
        let mut values = Self::default_values();
        if let Some(overrides) = overrides {
            values.extend(overrides);
        }
        Self { values }
    }

    /// Returns the built-in default values.
    #[must_use]
    pub fn default_values() -> KnowledgeBaseValues {
        let mut values = KnowledgeBaseValues::new();
        values.insert(HOSTNAME_KEY.to_owned(), Value::String(String::new()));
        values.insert(ZONE_KEY.to_owned(), Value::String("UTC".to_owned()));
        values.insert(
            USERS_KEY.to_owned(),
            json!([{ "username": "root", "uid": "0", "home": "/var/root" }]),
        );
        values.insert(CODEPAGE_KEY.to_owned(), Value::String("utf-8".to_owned()));
        values
    }

    /// Looks up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns every value, defaults included.
    #[must_use]
    pub const fn values(&self) -> &KnowledgeBaseValues {
        &self.values
    }

    /// Looks up a string value.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeBaseError::InvalidValue`] if the value is not a
    /// string.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, KnowledgeBaseError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(KnowledgeBaseError::InvalidValue {
                key: key.to_owned(),
                expected: "a string",
            }),
        }
    }

    /// Returns the host name, empty when unknown.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeBaseError::InvalidValue`] if the value is not a
    /// string.
    pub fn hostname(&self) -> Result<&str, KnowledgeBaseError> {
        Ok(self.get_str(HOSTNAME_KEY)?.unwrap_or_default())
    }

    /// Returns the code page used to decode byte strings.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeBaseError::InvalidValue`] if the value is not a
    /// string.
    pub fn codepage(&self) -> Result<&str, KnowledgeBaseError> {
        Ok(self.get_str(CODEPAGE_KEY)?.unwrap_or("utf-8"))
    }

    /// Returns the offset used for timestamps that carry none.
    ///
    /// Accepts `UTC`, `Z`, or a `±HH:MM` offset.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeBaseError::InvalidValue`] if the value is not a
    /// string, or [`KnowledgeBaseError::InvalidZone`] if it names an
    /// unsupported zone.
    pub fn zone(&self) -> Result<UtcOffset, KnowledgeBaseError> {
        let raw = self.get_str(ZONE_KEY)?.unwrap_or("UTC").trim();
        if raw.eq_ignore_ascii_case("utc") || raw.eq_ignore_ascii_case("z") {
            return Ok(UtcOffset::UTC);
        }
        UtcOffset::parse(
            raw,
            format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
        )
        .map_err(|_| KnowledgeBaseError::InvalidZone {
            value: raw.to_owned(),
        })
    }

    /// Returns the known user accounts.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeBaseError::InvalidValue`] if the value is not a
    /// list of account objects.
    pub fn users(&self) -> Result<Vec<UserAccount>, KnowledgeBaseError> {
        let Some(value) = self.values.get(USERS_KEY) else {
            return Ok(Vec::new());
        };
        serde_json::from_value(value.clone()).map_err(|_| KnowledgeBaseError::InvalidValue {
            key: USERS_KEY.to_owned(),
            expected: "a list of user accounts",
        })
    }

    /// Returns the name of the first known user, if any.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`users`](Self::users).
    pub fn default_username(&self) -> Result<Option<String>, KnowledgeBaseError> {
        Ok(self
            .users()?
            .into_iter()
            .next()
            .map(|account| account.username))
    }

    /// Returns the user whose home directory contains `path`.
    ///
    /// Homes are compared by whole path components, and the deepest matching
    /// home wins. Accounts whose home is empty or the filesystem root are
    /// never matched.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`users`](Self::users).
    pub fn user_for_path(&self, path: &str) -> Result<Option<UserAccount>, KnowledgeBaseError> {
        let target = Utf8Path::new(path);
        Ok(self
            .users()?
            .into_iter()
            .filter_map(|account| {
                let depth = account
                    .home()
                    .map(Utf8Path::new)
                    .filter(|home| home.parent().is_some() && target.starts_with(home))?
                    .components()
                    .count();
                Some((depth, account))
            })
            .max_by_key(|(depth, _)| *depth)
            .map(|(_, account)| account))
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests;
