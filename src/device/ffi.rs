//! # FBInk C ABI
//!
//! `#[repr(C)]` mirrors of `fbink.h` and the function declarations the
//! native backend calls. The struct layouts must match the header of the
//! libfbink release being linked.
//!
//! The conversions between these records and the crate's own
//! [`Config`]/[`State`] types live here as well. They are plain
//! field-by-field copies; enum values travel as their `u8` discriminants.
//!
//! The extern block is only compiled with the `native` feature so preview
//! builds never need libfbink at link time.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_long, c_short};

use crate::display::{Config, State};

/// Let FBInk open and close the framebuffer on every call
pub const FBFD_AUTO: c_int = -1;

/// `FBInkConfig`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FBInkConfig {
    pub row: c_short,
    pub col: c_short,
    pub fontmult: u8,
    pub fontname: u8,
    pub is_inverted: bool,
    pub is_flashing: bool,
    pub is_cleared: bool,
    pub is_centered: bool,
    pub hoffset: c_short,
    pub voffset: c_short,
    pub is_halfway: bool,
    pub is_padded: bool,
    pub fg_color: u8,
    pub bg_color: u8,
    pub is_overlay: bool,
    pub is_verbose: bool,
    pub is_quiet: bool,
    pub ignore_alpha: bool,
    pub halign: u8,
    pub valign: u8,
}

/// `FBInkState`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FBInkState {
    pub user_hz: c_long,
    pub font_name: *const c_char,
    pub view_width: u32,
    pub view_height: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    pub bpp: u32,
    pub device_name: [c_char; 16],
    pub device_codename: [c_char; 16],
    pub device_platform: [c_char; 16],
    pub device_id: u16,
    pub pen_fg_color: u8,
    pub pen_bg_color: u8,
    pub screen_dpi: u16,
    pub font_w: u16,
    pub font_h: u16,
    pub max_cols: u16,
    pub max_rows: u16,
    pub view_hori_origin: u8,
    pub view_vert_origin: u8,
    pub view_vert_offset: u8,
    pub fontsize_mult: u8,
    pub glyph_width: u8,
    pub glyph_height: u8,
    pub is_perfect_fit: bool,
    pub is_kobo_non_mt: bool,
    pub ntx_boot_rota: u8,
    pub ntx_rota_quirk: u8,
    pub is_ntx_quirky_landscape: bool,
    pub current_rota: u8,
    pub can_rotate: bool,
}

impl Default for FBInkState {
    fn default() -> Self {
        Self {
            user_hz: 0,
            font_name: std::ptr::null(),
            view_width: 0,
            view_height: 0,
            screen_width: 0,
            screen_height: 0,
            bpp: 0,
            device_name: [0; 16],
            device_codename: [0; 16],
            device_platform: [0; 16],
            device_id: 0,
            pen_fg_color: 0,
            pen_bg_color: 0,
            screen_dpi: 0,
            font_w: 0,
            font_h: 0,
            max_cols: 0,
            max_rows: 0,
            view_hori_origin: 0,
            view_vert_origin: 0,
            view_vert_offset: 0,
            fontsize_mult: 0,
            glyph_width: 0,
            glyph_height: 0,
            is_perfect_fit: false,
            is_kobo_non_mt: false,
            ntx_boot_rota: 0,
            ntx_rota_quirk: 0,
            is_ntx_quirky_landscape: false,
            current_rota: 0,
            can_rotate: false,
        }
    }
}

impl From<&Config> for FBInkConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            row: cfg.row,
            col: cfg.col,
            fontmult: cfg.font_mult(),
            fontname: cfg.font() as u8,
            is_inverted: cfg.is_inverted,
            is_flashing: cfg.is_flashing,
            is_cleared: cfg.is_cleared,
            is_centered: cfg.is_centered(),
            hoffset: cfg.hoffset,
            voffset: cfg.voffset,
            is_halfway: cfg.is_halfway,
            is_padded: cfg.is_padded,
            fg_color: cfg.fg_color as u8,
            bg_color: cfg.bg_color as u8,
            is_overlay: cfg.is_overlay,
            is_verbose: cfg.is_verbose(),
            is_quiet: cfg.is_quiet(),
            ignore_alpha: cfg.ignore_alpha,
            halign: cfg.halign as u8,
            valign: cfg.valign as u8,
        }
    }
}

impl FBInkState {
    /// Copy into an owned [`State`].
    ///
    /// # Safety
    ///
    /// `font_name` must be null or point to a NUL-terminated string that
    /// stays valid for the duration of the call (FBInk hands out a static).
    pub unsafe fn to_state(&self) -> State {
        let font_name = if self.font_name.is_null() {
            String::new()
        } else {
            unsafe { CStr::from_ptr(self.font_name) }
                .to_string_lossy()
                .into_owned()
        };

        State {
            user_hz: self.user_hz as i64,
            font_name,
            view_width: self.view_width,
            view_height: self.view_height,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            bpp: self.bpp,
            device_name: fixed_str(&self.device_name),
            device_codename: fixed_str(&self.device_codename),
            device_platform: fixed_str(&self.device_platform),
            device_id: self.device_id,
            pen_fg_color: self.pen_fg_color,
            pen_bg_color: self.pen_bg_color,
            screen_dpi: self.screen_dpi,
            font_w: self.font_w,
            font_h: self.font_h,
            max_cols: self.max_cols,
            max_rows: self.max_rows,
            view_hori_origin: self.view_hori_origin,
            view_vert_origin: self.view_vert_origin,
            view_vert_offset: self.view_vert_offset,
            fontsize_mult: self.fontsize_mult,
            glyph_width: self.glyph_width,
            glyph_height: self.glyph_height,
            is_perfect_fit: self.is_perfect_fit,
            current_rota: self.current_rota,
            can_rotate: self.can_rotate,
        }
    }
}

/// Read a fixed-size, possibly unterminated C char array.
fn fixed_str(buf: &[c_char]) -> String {
    let bytes: Vec<u8> = buf
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(feature = "native")]
unsafe extern "C" {
    pub fn fbink_version() -> *const c_char;
    pub fn fbink_open() -> c_int;
    pub fn fbink_close(fbfd: c_int) -> c_int;
    pub fn fbink_init(fbfd: c_int, fbink_cfg: *const FBInkConfig) -> c_int;
    pub fn fbink_get_state(fbink_cfg: *const FBInkConfig, fbink_state: *mut FBInkState);
    pub fn fbink_print(fbfd: c_int, string: *const c_char, fbink_cfg: *const FBInkConfig) -> c_int;
    pub fn fbink_refresh(
        fbfd: c_int,
        region_top: u32,
        region_left: u32,
        region_width: u32,
        region_height: u32,
        waveform_mode: *const c_char,
        is_flashing: bool,
    ) -> c_int;
    pub fn fbink_is_fb_quirky() -> bool;
    pub fn fbink_print_progress_bar(
        fbfd: c_int,
        percentage: u8,
        fbink_cfg: *const FBInkConfig,
    ) -> c_int;
    pub fn fbink_print_activity_bar(
        fbfd: c_int,
        progress: u8,
        fbink_cfg: *const FBInkConfig,
    ) -> c_int;
    pub fn fbink_print_image(
        fbfd: c_int,
        filename: *const c_char,
        x_off: c_short,
        y_off: c_short,
        fbink_cfg: *const FBInkConfig,
    ) -> c_int;
    pub fn fbink_print_raw_data(
        fbfd: c_int,
        data: *const u8,
        w: c_int,
        h: c_int,
        len: usize,
        x_off: c_short,
        y_off: c_short,
        fbink_cfg: *const FBInkConfig,
    ) -> c_int;
    pub fn fbink_button_scan(fbfd: c_int, press_button: bool, nosleep: bool) -> c_int;
    pub fn fbink_wait_for_usbms_processing(fbfd: c_int, force_unplug: bool) -> c_int;
}
