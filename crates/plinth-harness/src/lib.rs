//! Test-fixture harness for property-list plugins.
//!
//! A trial takes one fixture and one [`PlistPlugin`](plinth_plugins::PlistPlugin),
//! drives the plugin the way production parsing would, and returns every
//! event and parse error it published as a [`TrialOutcome`]. The
//! [`HarnessDriver`] owns the sequence; [`PathResolver`] and
//! [`DocumentDecoder`] are the seams where fixtures enter.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use plinth_config::HarnessConfig;
//! use plinth_harness::{HarnessDriver, telemetry};
//! use plinth_plugins::DefaultPlugin;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HarnessConfig::from_env()?;
//! telemetry::initialise(&config)?;
//!
//! let driver = HarnessDriver::new(config);
//! let outcome = driver.run_from_path(
//!     &DefaultPlugin,
//!     Utf8Path::new("tests/fixtures/my_app.plist"),
//!     "my_app.plist",
//!     None,
//! )?;
//! for event in outcome.sorted_events() {
//!     println!("{} {:?}", event.timestamp(), event.message());
//! }
//! # Ok(())
//! # }
//! ```

pub mod decoder;
pub mod driver;
pub mod error;
pub mod outcome;
pub mod resolver;
pub mod stage;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use self::decoder::{Document, DocumentDecoder, PlistDecoder};
pub use self::driver::HarnessDriver;
pub use self::error::HarnessError;
pub use self::outcome::TrialOutcome;
pub use self::resolver::{FileHandle, MemoryResolver, OsResolver, PathResolver};
pub use self::stage::TrialStage;
