//! # Display Devices
//!
//! This module defines the [`DisplayDevice`] trait, the contract every
//! rendering backend fulfills, along with the available backends.
//!
//! ## Available Devices
//!
//! - [`native`]: The FBInk C library driving a real framebuffer (feature `native`)
//! - [`memory`]: An in-memory character grid for previews and tests
//!
//! ## Contract
//!
//! Every call is a synchronous round-trip. Text rendering reports how many
//! screen rows it consumed, which can exceed one when a line wraps. Errors
//! come from the closed set in [`InkError`](crate::InkError).

use std::path::Path;

use crate::display::{Config, State};
use crate::error::Result;
use crate::raster::RawImage;

pub mod ffi;
pub mod memory;
#[cfg(feature = "native")]
pub mod native;

pub use memory::MemoryDisplay;
#[cfg(feature = "native")]
pub use native::NativeDisplay;

/// Screen region for an explicit refresh, in pixels.
///
/// The all-zero region asks for a full-screen refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub top: u32,
    pub left: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// The whole screen
    pub const FULL: Self = Self {
        top: 0,
        left: 0,
        width: 0,
        height: 0,
    };
}

/// A rendering backend.
pub trait DisplayDevice {
    /// Version string of the backend
    fn version(&self) -> String;

    /// (Re)initialize the backend. Must be called again whenever the
    /// restricted part of `config` changes.
    fn init(&mut self, config: &Config) -> Result<()>;

    /// Print `text` starting at `config.row`, returning the rows consumed.
    fn print(&mut self, text: &str, config: &Config) -> Result<u16>;

    /// Draw a full-width progress bar. `percentage` is 0-100.
    fn progress_bar(&mut self, percentage: u8, config: &Config) -> Result<()>;

    /// Draw a full-width activity bar. `phase` is 0-19, 0 meaning an
    /// infinite animation.
    fn activity_bar(&mut self, phase: u8, config: &Config) -> Result<()>;

    /// Decode and draw the image file at `path`.
    fn print_image(&mut self, path: &Path, x: i16, y: i16, config: &Config) -> Result<()>;

    /// Draw already decoded pixel data.
    fn print_raw(&mut self, image: &RawImage, x: i16, y: i16, config: &Config) -> Result<()>;

    /// Refresh a region of the screen with the given waveform mode.
    fn refresh(&mut self, region: Region, waveform: &str, black_flash: bool) -> Result<()>;

    /// Snapshot of the device geometry for `config`
    fn state(&self, config: &Config) -> State;

    /// Release the device. Safe to call more than once.
    fn close(&mut self) -> Result<()>;
}

impl<D: DisplayDevice + ?Sized> DisplayDevice for &mut D {
    fn version(&self) -> String {
        (**self).version()
    }

    fn init(&mut self, config: &Config) -> Result<()> {
        (**self).init(config)
    }

    fn print(&mut self, text: &str, config: &Config) -> Result<u16> {
        (**self).print(text, config)
    }

    fn progress_bar(&mut self, percentage: u8, config: &Config) -> Result<()> {
        (**self).progress_bar(percentage, config)
    }

    fn activity_bar(&mut self, phase: u8, config: &Config) -> Result<()> {
        (**self).activity_bar(phase, config)
    }

    fn print_image(&mut self, path: &Path, x: i16, y: i16, config: &Config) -> Result<()> {
        (**self).print_image(path, x, y, config)
    }

    fn print_raw(&mut self, image: &RawImage, x: i16, y: i16, config: &Config) -> Result<()> {
        (**self).print_raw(image, x, y, config)
    }

    fn refresh(&mut self, region: Region, waveform: &str, black_flash: bool) -> Result<()> {
        (**self).refresh(region, waveform, black_flash)
    }

    fn state(&self, config: &Config) -> State {
        (**self).state(config)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
