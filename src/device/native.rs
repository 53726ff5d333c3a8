//! # Native FBInk Device
//!
//! Drives a real e-ink framebuffer through libfbink.
//!
//! ## File Descriptor Handling
//!
//! FBInk can either work on a framebuffer descriptor obtained once with
//! `fbink_open`, or open and close the framebuffer on every call when handed
//! the `FBFD_AUTO` sentinel. [`NativeDisplay::open`] does the former,
//! [`NativeDisplay::auto`] the latter.
//!
//! FBInk keeps process-wide state behind the descriptor, so only one
//! `NativeDisplay` should be alive at a time.
//!
//! ## Linking
//!
//! Build with `--features native`. Point `FBINK_LIB_DIR` at the directory
//! holding `libfbink.so` (or `libfbink.a` together with `FBINK_STATIC=1`).

use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::os::raw::c_int;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use log::{debug, trace, warn};

use super::ffi::{self, FBFD_AUTO, FBInkConfig, FBInkState};
use super::{DisplayDevice, Region};
use crate::display::{Config, State};
use crate::error::{InkError, Result, check};
use crate::raster::RawImage;

/// # FBInk Framebuffer Device
///
/// ## Example
///
/// ```no_run
/// use inkterm::device::{DisplayDevice, NativeDisplay};
/// use inkterm::display::Config;
///
/// let mut device = NativeDisplay::open()?;
/// let config = Config::default();
/// device.init(&config)?;
/// let rows = device.print("Hello, Kobo!", &config)?;
/// println!("used {} rows", rows);
/// device.close()?;
///
/// # Ok::<(), inkterm::InkError>(())
/// ```
#[derive(Debug)]
pub struct NativeDisplay {
    fbfd: c_int,
    // FBInk's globals are not thread-safe
    _not_sync: PhantomData<*const ()>,
}

impl NativeDisplay {
    /// Open the framebuffer and keep its descriptor for the session.
    pub fn open() -> Result<Self> {
        let fbfd = check(unsafe { ffi::fbink_open() })?;
        if fbfd < 0 {
            return Err(InkError::NoDevice);
        }
        debug!("opened framebuffer, fd {}", fbfd);
        Ok(Self {
            fbfd,
            _not_sync: PhantomData,
        })
    }

    /// Let FBInk open the framebuffer lazily on every call.
    pub fn auto() -> Self {
        Self {
            fbfd: FBFD_AUTO,
            _not_sync: PhantomData,
        }
    }

    /// The framebuffer descriptor, if one was obtained
    pub fn fd(&self) -> Option<c_int> {
        (self.fbfd != FBFD_AUTO).then_some(self.fbfd)
    }

    /// Whether the framebuffer is in a quirky state (some Kobo kernels).
    pub fn is_fb_quirky(&self) -> bool {
        unsafe { ffi::fbink_is_fb_quirky() }
    }

    /// Look for, and optionally press, the "Connect" button of the Kobo
    /// USB connection screen.
    pub fn button_scan(&mut self, press_button: bool, no_sleep: bool) -> Result<()> {
        check(unsafe { ffi::fbink_button_scan(self.fbfd, press_button, no_sleep) })?;
        Ok(())
    }

    /// Wait for the end of a Kobo USBMS session, then look for a
    /// successful content import.
    pub fn wait_for_usbms_processing(&mut self, force_unplug: bool) -> Result<()> {
        check(unsafe { ffi::fbink_wait_for_usbms_processing(self.fbfd, force_unplug) })?;
        Ok(())
    }
}

impl DisplayDevice for NativeDisplay {
    fn version(&self) -> String {
        let ptr = unsafe { ffi::fbink_version() };
        if ptr.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }

    fn init(&mut self, config: &Config) -> Result<()> {
        let cfg = FBInkConfig::from(config);
        debug!(
            "init: font {:?} x{}, centered {}",
            config.font(),
            config.font_mult(),
            config.is_centered()
        );
        check(unsafe { ffi::fbink_init(self.fbfd, &cfg) })?;
        Ok(())
    }

    fn print(&mut self, text: &str, config: &Config) -> Result<u16> {
        let cfg = FBInkConfig::from(config);
        let text_c = CString::new(text)?;
        trace!("print at row {}: {:?}", config.row, text);
        let rows = check(unsafe { ffi::fbink_print(self.fbfd, text_c.as_ptr(), &cfg) })?;
        Ok(u16::try_from(rows.max(0)).unwrap_or(u16::MAX))
    }

    fn progress_bar(&mut self, percentage: u8, config: &Config) -> Result<()> {
        let cfg = FBInkConfig::from(config);
        check(unsafe { ffi::fbink_print_progress_bar(self.fbfd, percentage, &cfg) })?;
        Ok(())
    }

    fn activity_bar(&mut self, phase: u8, config: &Config) -> Result<()> {
        let cfg = FBInkConfig::from(config);
        check(unsafe { ffi::fbink_print_activity_bar(self.fbfd, phase, &cfg) })?;
        Ok(())
    }

    fn print_image(&mut self, path: &Path, x: i16, y: i16, config: &Config) -> Result<()> {
        let cfg = FBInkConfig::from(config);
        let path_c = CString::new(path.as_os_str().as_bytes())?;
        debug!("print image {} at ({}, {})", path.display(), x, y);
        check(unsafe { ffi::fbink_print_image(self.fbfd, path_c.as_ptr(), x, y, &cfg) })?;
        Ok(())
    }

    fn print_raw(&mut self, image: &RawImage, x: i16, y: i16, config: &Config) -> Result<()> {
        let width = c_int::try_from(image.width).map_err(|_| InkError::InvalidArgument)?;
        let height = c_int::try_from(image.height).map_err(|_| InkError::InvalidArgument)?;
        let cfg = FBInkConfig::from(config);
        debug!(
            "print raw {}x{}x{} at ({}, {})",
            image.width, image.height, image.channels, x, y
        );
        check(unsafe {
            ffi::fbink_print_raw_data(
                self.fbfd,
                image.data.as_ptr(),
                width,
                height,
                image.len(),
                x,
                y,
                &cfg,
            )
        })?;
        Ok(())
    }

    fn refresh(&mut self, region: Region, waveform: &str, black_flash: bool) -> Result<()> {
        let waveform_c = CString::new(waveform)?;
        check(unsafe {
            ffi::fbink_refresh(
                self.fbfd,
                region.top,
                region.left,
                region.width,
                region.height,
                waveform_c.as_ptr(),
                black_flash,
            )
        })?;
        Ok(())
    }

    fn state(&self, config: &Config) -> State {
        let cfg = FBInkConfig::from(config);
        let mut raw = FBInkState::default();
        unsafe {
            ffi::fbink_get_state(&cfg, &mut raw);
            raw.to_state()
        }
    }

    fn close(&mut self) -> Result<()> {
        // Nothing to do unless we obtained a descriptor
        if self.fbfd == FBFD_AUTO {
            return Ok(());
        }
        let fbfd = std::mem::replace(&mut self.fbfd, FBFD_AUTO);
        debug!("closing framebuffer, fd {}", fbfd);
        check(unsafe { ffi::fbink_close(fbfd) })?;
        Ok(())
    }
}

impl Drop for NativeDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("failed to close framebuffer: {}", e);
        }
    }
}
