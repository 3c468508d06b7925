//! Decoding fixture bytes into documents.

use std::io::{Cursor, Read};
use std::sync::Arc;

use tracing::debug;

use crate::error::HarnessError;
use crate::resolver::FileHandle;

/// Tracing target for decoder activity.
const DECODER_TARGET: &str = "plinth_harness::decoder";

/// A decoded property-list document.
pub type Document = plist::Value;

/// Turns a [`FileHandle`] into a [`Document`].
pub trait DocumentDecoder {
    /// Reads the whole handle and decodes it.
    ///
    /// Returns `Ok(None)` when the handle holds no bytes at all.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Resolution`] if the handle cannot be read and
    /// [`HarnessError::Decode`] if the bytes are not a property list.
    fn decode(&self, handle: &mut FileHandle) -> Result<Option<Document>, HarnessError>;
}

/// Decoder for XML, binary and ASCII property lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlistDecoder;

impl DocumentDecoder for PlistDecoder {
    fn decode(&self, handle: &mut FileHandle) -> Result<Option<Document>, HarnessError> {
        let mut bytes = Vec::new();
        handle
            .read_to_end(&mut bytes)
            .map_err(|error| HarnessError::resolution_io(handle.location(), error))?;

        if bytes.is_empty() {
            debug!(target: DECODER_TARGET, location = %handle.location(), "fixture is empty");
            return Ok(None);
        }

        let document =
            plist::Value::from_reader(Cursor::new(bytes)).map_err(|error| HarnessError::Decode {
                location: handle.location().to_owned(),
                message: error.to_string(),
                source: Some(Arc::new(error)),
            })?;
        debug!(target: DECODER_TARGET, location = %handle.location(), "decoded fixture");
        Ok(Some(document))
    }
}

#[cfg(test)]
mod tests;
