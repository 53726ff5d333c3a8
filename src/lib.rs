//! # inkterm - FBInk bindings with a scrolling console
//!
//! inkterm drives e-ink screens (Kobo, Kindle) through the FBInk C library.
//! It provides:
//!
//! - **Bindings**: `#[repr(C)]` mirrors of FBInk's config and state records
//!   and safe wrappers around its entry points
//! - **Console**: a bounded scrolling text buffer on top of FBInk's
//!   one-shot print call
//! - **Preview**: an in-memory character grid that stands in for the
//!   framebuffer, for development and tests
//!
//! ## Quick Start
//!
//! ```
//! use inkterm::{
//!     Session,
//!     device::MemoryDisplay,
//!     display::{Align, Config, Font, RestrictedConfig},
//! };
//!
//! let mut config = Config::default();
//! config.row = 4;
//! config.halign = Align::Center;
//!
//! let restricted = RestrictedConfig {
//!     font_mult: 2,
//!     font: Font::Ibm,
//!     ..Default::default()
//! };
//!
//! // NativeDisplay::open()? on a real device
//! let mut session = Session::new(MemoryDisplay::default(), &mut config, restricted)?;
//!
//! for i in 0..10 {
//!     session.println(format_args!("Test line {}", i))?;
//! }
//! session.print_last_line("This should update the last line!")?;
//! session.progress_bar(50, &config)?;
//!
//! # Ok::<(), inkterm::InkError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`console`] | Scrolling line buffer |
//! | [`session`] | Device + console, the main entry point |
//! | [`device`] | Device trait, FBInk and in-memory backends |
//! | [`display`] | Config, restricted config, state, settings file |
//! | [`raster`] | Decoded image data |
//! | [`error`] | Error types |
//!
//! ## Features
//!
//! - `native`: link against libfbink and enable
//!   [`NativeDisplay`](device::NativeDisplay)

pub mod console;
pub mod device;
pub mod display;
pub mod error;
pub mod raster;
pub mod session;

// Re-exports for convenience
pub use console::ScrollingConsole;
pub use device::{DisplayDevice, MemoryDisplay};
pub use display::{Config, RestrictedConfig, Settings, State};
pub use error::{InkError, Result};
pub use session::Session;
