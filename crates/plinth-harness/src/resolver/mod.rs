//! Turning fixture locations into readable handles.
//!
//! A [`PathResolver`] is the seam between the harness and wherever fixture
//! bytes live. [`OsResolver`] opens files on the host file system through a
//! capability-scoped directory handle; [`MemoryResolver`] serves fixtures a
//! test registered up front.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Cursor, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::Dir;
use plinth_config::SourceType;
use tracing::debug;

use crate::error::HarnessError;

/// Tracing target for resolver activity.
const RESOLVER_TARGET: &str = "plinth_harness::resolver";

/// A readable fixture together with the location it came from.
pub struct FileHandle {
    location: Utf8PathBuf,
    reader: Box<dyn Read>,
}

impl FileHandle {
    /// Wraps an arbitrary reader.
    #[must_use]
    pub fn new(location: impl Into<Utf8PathBuf>, reader: impl Read + 'static) -> Self {
        Self {
            location: location.into(),
            reader: Box::new(reader),
        }
    }

    /// Wraps an in-memory byte buffer.
    #[must_use]
    pub fn from_bytes(location: impl Into<Utf8PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(location, Cursor::new(bytes.into()))
    }

    /// Location the handle was resolved from.
    #[must_use]
    pub fn location(&self) -> &Utf8Path {
        &self.location
    }
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Resolves a fixture location into a [`FileHandle`].
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use plinth_config::SourceType;
/// use plinth_harness::{MemoryResolver, PathResolver};
///
/// let resolver = MemoryResolver::new().with_fixture("my_app.plist", b"<plist/>".to_vec());
/// let handle = resolver
///     .resolve(Utf8Path::new("my_app.plist"), SourceType::Memory)
///     .expect("fixture is registered");
/// assert_eq!(handle.location().as_str(), "my_app.plist");
/// ```
pub trait PathResolver {
    /// Opens `location` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Resolution`] when the location does not exist,
    /// cannot be opened, or belongs to a source type this resolver does not
    /// serve.
    fn resolve(
        &self,
        location: &Utf8Path,
        source_type: SourceType,
    ) -> Result<FileHandle, HarnessError>;
}

fn ensure_source(
    location: &Utf8Path,
    requested: SourceType,
    served: SourceType,
) -> Result<(), HarnessError> {
    if requested == served {
        Ok(())
    } else {
        Err(HarnessError::resolution(
            location,
            format!("source type '{requested}' is not served by the {served} resolver"),
        ))
    }
}

/// Read-only resolver for the host file system.
///
/// Only the fixture's parent directory is opened with ambient authority; the
/// file itself is opened relative to that directory handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsResolver;

impl PathResolver for OsResolver {
    fn resolve(
        &self,
        location: &Utf8Path,
        source_type: SourceType,
    ) -> Result<FileHandle, HarnessError> {
        ensure_source(location, source_type, SourceType::Os)?;

        let Some(file_name) = location.file_name() else {
            return Err(HarnessError::resolution(
                location,
                "location does not name a file",
            ));
        };
        let parent = location
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));

        let dir = Dir::open_ambient_dir(parent, cap_std::ambient_authority())
            .map_err(|error| HarnessError::resolution_io(location, error))?;
        let file = dir
            .open(file_name)
            .map_err(|error| HarnessError::resolution_io(location, error))?;

        debug!(target: RESOLVER_TARGET, %location, "opened fixture");
        Ok(FileHandle::new(location, file))
    }
}

/// Resolver serving fixtures registered in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    fixtures: BTreeMap<Utf8PathBuf, Vec<u8>>,
}

impl MemoryResolver {
    /// Creates a resolver with no fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` under `location`, replacing any earlier fixture.
    pub fn insert(&mut self, location: impl Into<Utf8PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.fixtures.insert(location.into(), bytes.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_fixture(
        mut self,
        location: impl Into<Utf8PathBuf>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(location, bytes);
        self
    }
}

impl PathResolver for MemoryResolver {
    fn resolve(
        &self,
        location: &Utf8Path,
        source_type: SourceType,
    ) -> Result<FileHandle, HarnessError> {
        ensure_source(location, source_type, SourceType::Memory)?;
        let bytes = self
            .fixtures
            .get(location)
            .ok_or_else(|| HarnessError::resolution(location, "no fixture registered"))?;
        debug!(target: RESOLVER_TARGET, %location, bytes = bytes.len(), "serving fixture");
        Ok(FileHandle::from_bytes(location, bytes.clone()))
    }
}

#[cfg(test)]
mod tests;
