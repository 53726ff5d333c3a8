//! # Device State Snapshot
//!
//! [`State`] is the Rust side of `FBInkState`: a copy of the geometry and
//! font metrics FBInk derived at init time. It owns its strings, so it stays
//! valid after the session is gone.

use serde::Serialize;

/// Device geometry and font metrics, as reported by the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct State {
    /// `USER_HZ` of the running kernel
    pub user_hz: i64,
    /// Name of the active font
    pub font_name: String,
    /// Visible width in pixels
    pub view_width: u32,
    /// Visible height in pixels
    pub view_height: u32,
    /// Framebuffer width in pixels
    pub screen_width: u32,
    /// Framebuffer height in pixels
    pub screen_height: u32,
    /// Bits per pixel
    pub bpp: u32,
    /// Marketing name of the device
    pub device_name: String,
    /// Internal codename of the device
    pub device_codename: String,
    /// Board platform
    pub device_platform: String,
    /// Numeric device id
    pub device_id: u16,
    /// Current pen color (raw palette index)
    pub pen_fg_color: u8,
    /// Current background color (raw palette index)
    pub pen_bg_color: u8,
    /// Screen density
    pub screen_dpi: u16,
    /// Cell width in pixels
    pub font_w: u16,
    /// Cell height in pixels
    pub font_h: u16,
    /// Text columns that fit on one row
    pub max_cols: u16,
    /// Text rows that fit on screen
    pub max_rows: u16,
    /// Horizontal origin of the visible area
    pub view_hori_origin: u8,
    /// Vertical origin of the visible area
    pub view_vert_origin: u8,
    /// Vertical offset applied to center the text grid
    pub view_vert_offset: u8,
    /// Font scaling multiplier in effect
    pub fontsize_mult: u8,
    /// Glyph width in pixels before scaling
    pub glyph_width: u8,
    /// Glyph height in pixels before scaling
    pub glyph_height: u8,
    /// The text grid covers the screen exactly
    pub is_perfect_fit: bool,
    /// Current framebuffer rotation (0-3)
    pub current_rota: u8,
    /// The device supports rotation
    pub can_rotate: bool,
}

impl State {
    /// Resolve a possibly negative row against the screen height.
    ///
    /// FBInk treats negative rows as counting back from the bottom; the
    /// result is clamped to the screen.
    pub fn resolve_row(&self, row: i16) -> u16 {
        let max = self.max_rows as i32;
        let row = row as i32;
        let resolved = if row < 0 { max + row } else { row };
        resolved.clamp(0, (max - 1).max(0)) as u16
    }
}
