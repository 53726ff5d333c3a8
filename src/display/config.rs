//! # Render Configuration
//!
//! [`Config`] mirrors FBInk's `FBInkConfig`: it is passed by reference to
//! every render call and describes where and how to draw.
//!
//! A handful of fields are cached by the native library at init time, so
//! changing them without calling `init` again has no effect. Those fields
//! are kept private here and can only be set through a
//! [`RestrictedConfig`], which the session applies and follows with an
//! init.
//!
//! ## Usage
//!
//! ```
//! use inkterm::display::{Align, Config, Font, RestrictedConfig};
//!
//! let mut config = Config::default();
//! config.row = 4;
//! config.halign = Align::Center;
//!
//! let restricted = RestrictedConfig {
//!     font_mult: 3,
//!     font: Font::Ibm,
//!     ..Default::default()
//! };
//! config.apply_restricted(&restricted);
//! assert_eq!(config.restricted(), restricted);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// ENUMS
// ============================================================================

/// Built-in bitmap fonts, in FBInk's numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Font {
    #[default]
    Ibm = 0,
    Unscii,
    UnsciiAlt,
    UnsciiThin,
    UnsciiFantasy,
    UnsciiMcr,
    UnsciiTall,
    Block,
    Leggie,
    Veggie,
    Kates,
    Fkp,
    Ctrld,
    Orp,
    OrpB,
    OrpI,
    Scientifica,
    ScientificaB,
    ScientificaI,
}

/// Horizontal/vertical alignment used for image placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Align {
    #[default]
    None = 0,
    Center,
    Edge,
}

/// Foreground (pen) color, black to white
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FgColor {
    #[default]
    Black = 0,
    Gray1,
    Gray2,
    Gray3,
    Gray4,
    Gray5,
    Gray6,
    Gray7,
    Gray8,
    Gray9,
    GrayA,
    GrayB,
    GrayC,
    GrayD,
    GrayE,
    White,
}

/// Background color, white to black
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BgColor {
    #[default]
    White = 0,
    GrayE,
    GrayD,
    GrayC,
    GrayB,
    GrayA,
    Gray9,
    Gray8,
    Gray7,
    Gray6,
    Gray5,
    Gray4,
    Gray3,
    Gray2,
    Gray1,
    Black,
}

// ============================================================================
// RESTRICTED CONFIG
// ============================================================================

/// Options that require the device to be re-initialized when changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestrictedConfig {
    /// Font scaling multiplier (0 lets FBInk pick one for the screen)
    pub font_mult: u8,
    /// Font to render text with
    pub font: Font,
    /// Center text horizontally
    pub is_centered: bool,
    /// Let FBInk print diagnostics to stdout
    pub is_verbose: bool,
    /// Silence FBInk's own stderr chatter
    pub is_quiet: bool,
}

// ============================================================================
// CONFIG
// ============================================================================

/// Per-call render configuration.
///
/// Negative `row`/`col` count back from the bottom/right edge, as FBInk does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text row to start printing at
    pub row: i16,
    /// Text column to start printing at
    pub col: i16,
    /// Draw white on black
    pub is_inverted: bool,
    /// Request a flashing (full) refresh
    pub is_flashing: bool,
    /// Clear the screen before drawing
    pub is_cleared: bool,
    /// Horizontal pixel offset
    pub hoffset: i16,
    /// Vertical pixel offset
    pub voffset: i16,
    /// Vertically center the text block
    pub is_halfway: bool,
    /// Pad text with blanks up to the full row width
    pub is_padded: bool,
    /// Pen color
    pub fg_color: FgColor,
    /// Background color
    pub bg_color: BgColor,
    /// Only draw foreground pixels
    pub is_overlay: bool,
    /// Ignore the alpha channel of images
    pub ignore_alpha: bool,
    /// Horizontal image alignment
    pub halign: Align,
    /// Vertical image alignment
    pub valign: Align,

    #[serde(skip)]
    restricted: RestrictedConfig,
}

impl Config {
    /// Copy the restricted options into this config.
    ///
    /// This alone does not re-initialize the device; go through
    /// [`Session::update_restricted`](crate::Session::update_restricted)
    /// for that.
    pub fn apply_restricted(&mut self, restricted: &RestrictedConfig) {
        self.restricted = *restricted;
    }

    /// Restricted options currently carried by this config
    pub fn restricted(&self) -> RestrictedConfig {
        self.restricted
    }

    #[inline]
    pub fn font_mult(&self) -> u8 {
        self.restricted.font_mult
    }

    #[inline]
    pub fn font(&self) -> Font {
        self.restricted.font
    }

    #[inline]
    pub fn is_centered(&self) -> bool {
        self.restricted.is_centered
    }

    #[inline]
    pub fn is_verbose(&self) -> bool {
        self.restricted.is_verbose
    }

    #[inline]
    pub fn is_quiet(&self) -> bool {
        self.restricted.is_quiet
    }
}

// ============================================================================
// TESTS
// ============================================================================
