//! Core library for the `weather-panel` CLI.
//!
//! This crate defines:
//! - The weather document model and the sixteen display slots
//! - The presenter that formats a document into slot strings
//! - Weather sources (fixed endpoint, weatherapi.com, local file)
//! - The refresh chain with its single error boundary
//! - Configuration handling
//!
//! Hosts supply a [`DisplaySink`]; nothing here looks up UI elements itself.

pub mod config;
pub mod error;
pub mod labels;
pub mod model;
pub mod presenter;
pub mod refresh;
pub mod sink;
pub mod slot;
pub mod source;

pub use config::Config;
pub use error::FetchError;
pub use model::{LocationMatch, WeatherDocument};
pub use presenter::{Presentation, WeatherPresenter};
pub use refresh::{ErrorReporter, LogReporter, Outcome, refresh};
pub use sink::{DisplaySink, SlotBoard, TerminalSink};
pub use slot::SlotName;
pub use source::{SourceKind, WeatherSource};
