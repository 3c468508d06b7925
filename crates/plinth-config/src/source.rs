use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Storage backing a fixture location.
///
/// Resolvers only serve the source type they were built for, so a location
/// string is always interpreted together with one of these.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SourceType {
    /// The host operating system's file system.
    #[default]
    Os,
    /// Fixtures registered in memory by the test itself.
    Memory,
}
