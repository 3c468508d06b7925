//! Stages a trial moves through.

use strum::Display;

/// Position of a trial in the `Resolving → Decoding → Invoking → Draining`
/// sequence.
///
/// Stages only ever advance. A fatal error ends the trial in the stage where
/// it was raised; see [`HarnessError::stage`](crate::HarnessError::stage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TrialStage {
    /// Turning a fixture location into a readable handle.
    Resolving,
    /// Turning the handle's bytes into a document.
    Decoding,
    /// Running the plugin against the document.
    Invoking,
    /// Collecting what the plugin published.
    Draining,
}
