//! Records published by plugins.
//!
//! An [`Event`] is a timestamped domain record with named fields. A
//! [`ParseError`] describes a recoverable problem a plugin met while reading
//! a document. Both are immutable once published and travel on separate
//! queues.

use std::collections::BTreeMap;
use std::fmt;

use time::OffsetDateTime;

/// Timestamp description for values recording when data was written.
pub const WRITTEN_TIME: &str = "Written Time";
/// Timestamp description for the last Bluetooth inquiry of a device.
pub const LAST_INQUIRY_TIME: &str = "Last Inquiry Time";
/// Timestamp description for the last device name update.
pub const LAST_NAME_UPDATE_TIME: &str = "Last Name Update Time";
/// Timestamp description for the last service discovery of a device.
pub const LAST_SERVICES_UPDATE_TIME: &str = "Last Services Update Time";

/// Value of a named event field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text.
    String(String),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Real(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Point in time.
    Timestamp(OffsetDateTime),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Returns the text if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a timestamp value.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Timestamp(value) => write!(f, "{value}"),
            Self::Bytes(value) => write!(f, "<{} bytes>", value.len()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<OffsetDateTime> for FieldValue {
    fn from(value: OffsetDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// A timestamped record extracted by a plugin.
///
/// # Example
///
/// ```
/// use plinth_plugins::Event;
/// use plinth_plugins::event::WRITTEN_TIME;
/// use time::macros::datetime;
///
/// let event = Event::new(datetime!(2012-11-02 01:21:38.997672 UTC), WRITTEN_TIME, "plist:key")
///     .with_field("key", "LastUsed")
///     .with_message("/DE-00-AD-00-BE-EF/LastUsed");
///
/// assert_eq!(event.field("key").and_then(|value| value.as_str()), Some("LastUsed"));
/// assert_eq!(event.message(), Some("/DE-00-AD-00-BE-EF/LastUsed"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    timestamp: OffsetDateTime,
    timestamp_description: String,
    data_type: String,
    plugin_name: String,
    message: Option<String>,
    fields: BTreeMap<String, FieldValue>,
}

impl Event {
    /// Creates an event with no fields.
    #[must_use]
    pub fn new(
        timestamp: OffsetDateTime,
        timestamp_description: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            timestamp_description: timestamp_description.into(),
            data_type: data_type.into(),
            plugin_name: String::new(),
            message: None,
            fields: BTreeMap::new(),
        }
    }

    /// Adds or replaces a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Sets the human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Records the name of the plugin that produced the event.
    #[must_use]
    pub fn with_plugin_name(mut self, plugin_name: impl Into<String>) -> Self {
        self.plugin_name = plugin_name.into();
        self
    }

    /// Adds a field only when no field of that name exists yet.
    #[must_use]
    pub fn with_default_field(self, name: &str, value: impl Into<FieldValue>) -> Self {
        if self.fields.contains_key(name) {
            self
        } else {
            self.with_field(name, value)
        }
    }

    /// Returns the event timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Returns what the timestamp means (e.g. "Written Time").
    #[must_use]
    pub const fn timestamp_description(&self) -> &str {
        self.timestamp_description.as_str()
    }

    /// Returns the data type tag identifying the record's source.
    #[must_use]
    pub const fn data_type(&self) -> &str {
        self.data_type.as_str()
    }

    /// Returns the producing plugin's name, empty if not yet stamped.
    #[must_use]
    pub const fn plugin_name(&self) -> &str {
        self.plugin_name.as_str()
    }

    /// Returns the human-readable message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns all fields ordered by name.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }
}

/// A recoverable extraction failure reported alongside events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    plugin_name: String,
    plist_name: String,
    message: String,
}

impl ParseError {
    /// Creates a parse error record.
    #[must_use]
    pub fn new(
        plugin_name: impl Into<String>,
        plist_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            plist_name: plist_name.into(),
            message: message.into(),
        }
    }

    /// Returns the reporting plugin's name.
    #[must_use]
    pub const fn plugin_name(&self) -> &str {
        self.plugin_name.as_str()
    }

    /// Returns the logical name of the document being parsed.
    #[must_use]
    pub const fn plist_name(&self) -> &str {
        self.plist_name.as_str()
    }

    /// Returns the description of the failure.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed on '{}': {}",
            self.plugin_name, self.plist_name, self.message
        )
    }
}
