//! # Display Session
//!
//! A [`Session`] owns the device for the lifetime of the program and pairs
//! it with a [`ScrollingConsole`]. It is the one object callers are meant
//! to hold; create exactly one per process.
//!
//! ## Restricted Options
//!
//! Font, font multiplier, centering, verbosity and quietness are baked into
//! FBInk's state at init time. [`Session::update_restricted`] applies a new
//! [`RestrictedConfig`] to the caller's config and to the console, then
//! re-initializes the device.

use std::fmt;
use std::path::Path;

use log::debug;

use crate::console::ScrollingConsole;
use crate::device::{DisplayDevice, Region};
use crate::display::{Config, RestrictedConfig, Settings, State};
use crate::error::{InkError, Result};
use crate::raster::RawImage;

/// Highest activity bar phase; 0 animates forever
pub const MAX_ACTIVITY_PHASE: u8 = 19;

/// A device plus the console drawn on it.
///
/// ## Example
///
/// ```
/// use inkterm::{Session, device::MemoryDisplay, display::{Config, RestrictedConfig}};
///
/// let mut config = Config::default();
/// let mut session = Session::new(MemoryDisplay::new(20, 10), &mut config, RestrictedConfig::default())?;
///
/// session.println("first")?;
/// session.println(format_args!("line {}", 2))?;
/// session.print_last_line("second")?;
///
/// assert_eq!(session.device().row(6), " second");
/// # Ok::<(), inkterm::InkError>(())
/// ```
#[derive(Debug)]
pub struct Session<D: DisplayDevice> {
    device: D,
    console: ScrollingConsole,
}

impl<D: DisplayDevice> Session<D> {
    /// Start a session, applying `restricted` to `config` and initializing
    /// the device with it.
    pub fn new(device: D, config: &mut Config, restricted: RestrictedConfig) -> Result<Self> {
        let mut session = Self {
            device,
            console: ScrollingConsole::new(config),
        };
        session.update_restricted(config, restricted)?;
        Ok(session)
    }

    /// Start a session from loaded [`Settings`].
    ///
    /// The device is initialized with [`Settings::resolved_config`], which
    /// callers should use for their own render calls too.
    pub fn with_settings(mut device: D, settings: &Settings) -> Result<Self> {
        let config = settings.resolved_config();
        device.init(&config)?;
        Ok(Self {
            device,
            console: ScrollingConsole::with_settings(&config, &settings.console),
        })
    }

    /// Apply new restricted options and re-initialize the device.
    pub fn update_restricted(
        &mut self,
        config: &mut Config,
        restricted: RestrictedConfig,
    ) -> Result<()> {
        debug!("updating restricted options: {:?}", restricted);
        config.apply_restricted(&restricted);
        self.console.set_restricted(&restricted);
        self.device.init(config)
    }

    /// Re-initialize the device with `config`.
    pub fn init(&mut self, config: &Config) -> Result<()> {
        self.device.init(config)
    }

    pub fn version(&self) -> String {
        self.device.version()
    }

    /// Print `text` once at `config.row`, returning the rows consumed.
    pub fn print(&mut self, text: &str, config: &Config) -> Result<u16> {
        self.device.print(text, config)
    }

    /// Append a line to the console, scrolling if needed.
    ///
    /// Returns the byte length of the formatted text.
    pub fn println<T: fmt::Display>(&mut self, text: T) -> Result<usize> {
        self.console.append_line(&mut self.device, &text.to_string())
    }

    /// Replace the last console line without scrolling.
    ///
    /// Returns the byte length of the formatted text.
    pub fn print_last_line<T: fmt::Display>(&mut self, text: T) -> Result<usize> {
        self.console.replace_last_line(&mut self.device, &text.to_string())
    }

    /// Draw a progress bar. Percentages above 100 are clamped.
    pub fn progress_bar(&mut self, percentage: u8, config: &Config) -> Result<()> {
        self.device.progress_bar(percentage.min(100), config)
    }

    /// Draw an activity bar at `phase` (0 for an infinite animation).
    pub fn activity_bar(&mut self, phase: u8, config: &Config) -> Result<()> {
        if phase > MAX_ACTIVITY_PHASE {
            return Err(InkError::InvalidArgument);
        }
        self.device.activity_bar(phase, config)
    }

    /// Draw an image file, decoded by the device.
    pub fn print_image<P: AsRef<Path>>(
        &mut self,
        path: P,
        x: i16,
        y: i16,
        config: &Config,
    ) -> Result<()> {
        self.device.print_image(path.as_ref(), x, y, config)
    }

    /// Draw pixels decoded on our side.
    pub fn print_raw_image(
        &mut self,
        image: &RawImage,
        x: i16,
        y: i16,
        config: &Config,
    ) -> Result<()> {
        self.device.print_raw(image, x, y, config)
    }

    pub fn refresh(&mut self, region: Region, waveform: &str, black_flash: bool) -> Result<()> {
        self.device.refresh(region, waveform, black_flash)
    }

    /// Device geometry for `config`
    pub fn state(&self, config: &Config) -> State {
        self.device.state(config)
    }

    /// Release the device.
    pub fn close(&mut self) -> Result<()> {
        self.device.close()
    }

    pub fn console(&self) -> &ScrollingConsole {
        &self.console
    }

    /// Forget the console contents; the screen is left as is.
    pub fn reset_console(&mut self) {
        self.console.reset();
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
