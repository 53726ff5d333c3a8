//! # Display Module
//!
//! Plain data records exchanged with the device collaborator.
//!
//! ## Modules
//!
//! - [`config`]: Per-call render configuration and the restricted subset
//! - [`state`]: Device geometry snapshot
//! - [`settings`]: JSON settings file

pub mod config;
pub mod settings;
pub mod state;

pub use config::{Align, BgColor, Config, FgColor, Font, RestrictedConfig};
pub use settings::{ConsoleSettings, Settings};
pub use state::State;
