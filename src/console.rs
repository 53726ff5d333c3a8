//! # Scrolling Console
//!
//! FBInk has no notion of scrolling: it paints exactly the rows it is told
//! to and leaves everything else alone. [`ScrollingConsole`] fakes a
//! terminal on top of that by keeping the last few lines in a bounded FIFO
//! and repainting the whole block from a fixed top row whenever it changes.
//!
//! ## Redraw
//!
//! ```text
//! top_row ─► │ oldest line         │  each line advances the cursor by the
//!            │ ...                 │  rows the device says it consumed
//!            │ newest line         │  (long lines wrap)
//! extent  ─► │ (blanked if stale)  │
//!            │ (blanked if stale)  │
//! high_water►│                     │
//! ```
//!
//! After an append, if the block ended above the furthest row ever painted
//! (the high-water mark), the rows in between are overwritten with a blank
//! line so shrinking output leaves no garbage behind. The mark itself only
//! grows; [`ScrollingConsole::reset`] zeroes it.
//!
//! ## Errors
//!
//! A failed line does not stop the redraw. Every line is still painted,
//! each failure is logged, and the first one is returned once the redraw is
//! complete.

use std::collections::VecDeque;

use log::{trace, warn};

use crate::device::DisplayDevice;
use crate::display::{Config, ConsoleSettings, RestrictedConfig};
use crate::error::{InkError, Result};

/// Default number of buffered lines
pub const DEFAULT_CAPACITY: usize = 6;

/// Default row the console is drawn from
pub const DEFAULT_TOP_ROW: i16 = 4;

/// Default column every console line starts at
pub const DEFAULT_COL: i16 = 1;

/// Placeholder line, also used to erase stale rows
const BLANK: &str = " ";

/// A fixed-capacity scrolling text buffer rendered through a
/// [`DisplayDevice`].
#[derive(Debug, Clone)]
pub struct ScrollingConsole {
    lines: VecDeque<String>,
    capacity: usize,
    top_row: i16,
    config: Config,
    high_water: i16,
}

impl ScrollingConsole {
    /// Create a console with the default layout, seeded with one blank line.
    ///
    /// Only the restricted options of `config` are used; the console keeps
    /// its own row/column cursor.
    pub fn new(config: &Config) -> Self {
        Self::with_settings(config, &ConsoleSettings::default())
    }

    /// Create a console with a custom layout.
    ///
    /// A zero capacity is raised to 1 and a negative top row is clamped to
    /// 0, so the block always grows downward from a fixed row.
    pub fn with_settings(config: &Config, settings: &ConsoleSettings) -> Self {
        let capacity = settings.capacity.max(1);
        let top_row = settings.top_row.max(0);

        let mut own = Config::default();
        own.apply_restricted(&config.restricted());
        own.row = top_row;
        own.col = settings.col;
        // Every line erases the rest of its row
        own.is_padded = true;

        let mut console = Self {
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
            top_row,
            config: own,
            high_water: 0,
        };
        console.lines.push_back(BLANK.to_string());
        console
    }

    /// Follow a change of the restricted options.
    pub fn set_restricted(&mut self, restricted: &RestrictedConfig) {
        self.config.apply_restricted(restricted);
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn top_row(&self) -> i16 {
        self.top_row
    }

    /// Row just below the last painted line
    pub fn cursor_row(&self) -> i16 {
        self.config.row
    }

    /// Furthest row ever reached by a redraw
    pub fn high_water(&self) -> i16 {
        self.high_water
    }

    /// Config the console renders with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drop every line and forget the high-water mark. Nothing is drawn.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.lines.push_back(BLANK.to_string());
        self.config.row = self.top_row;
        self.high_water = 0;
    }

    /// Append `text` as the newest line, scrolling the oldest out when
    /// full, and repaint. Returns the byte length of `text`.
    pub fn append_line<D: DisplayDevice + ?Sized>(
        &mut self,
        device: &mut D,
        text: &str,
    ) -> Result<usize> {
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(text.to_string());

        let mut first_err = self.redraw(device);

        let extent = self.config.row;
        if extent > self.high_water {
            self.high_water = extent;
        } else if extent < self.high_water {
            trace!("blanking rows {}..{}", extent, self.high_water);
            for row in extent..self.high_water {
                self.config.row = row;
                if let Err(e) = device.print(BLANK, &self.config) {
                    warn!("failed to blank row {}: {}", row, e);
                    first_err.get_or_insert(e);
                }
            }
            self.config.row = extent;
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(text.len()),
        }
    }

    /// Replace the newest line with `text` and repaint, without scrolling.
    /// Returns the byte length of `text`.
    pub fn replace_last_line<D: DisplayDevice + ?Sized>(
        &mut self,
        device: &mut D,
        text: &str,
    ) -> Result<usize> {
        self.lines.pop_back();
        self.lines.push_back(text.to_string());

        match self.redraw(device) {
            Some(e) => Err(e),
            None => Ok(text.len()),
        }
    }

    /// Paint every line from the top row, leaving the cursor below the last.
    fn redraw<D: DisplayDevice + ?Sized>(&mut self, device: &mut D) -> Option<InkError> {
        self.config.row = self.top_row;
        let mut first_err = None;

        for line in &self.lines {
            match device.print(line, &self.config) {
                Ok(rows) => {
                    let rows = i16::try_from(rows).unwrap_or(i16::MAX);
                    self.config.row = self.config.row.saturating_add(rows);
                }
                Err(e) => {
                    warn!("failed to draw line at row {}: {}", self.config.row, e);
                    first_err.get_or_insert(e);
                }
            }
        }

        first_err
    }
}

// ============================================================================
// TESTS
// ============================================================================
