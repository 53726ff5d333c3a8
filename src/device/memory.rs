//! # In-Memory Display
//!
//! [`MemoryDisplay`] stands in for the framebuffer when there is none: text
//! goes into a fixed character grid, wrapping at the right edge the way
//! FBInk does, and every other call is recorded as an [`Event`]. The CLI
//! uses it for `--preview`; the tests use it to observe what a session drew.

use std::path::{Path, PathBuf};

use log::trace;

use super::{DisplayDevice, Region};
use crate::display::{Config, RestrictedConfig, State};
use crate::error::{InkError, Result};
use crate::raster::RawImage;

/// Default grid width in columns
pub const DEFAULT_COLS: u16 = 40;

/// Default grid height in rows
pub const DEFAULT_ROWS: u16 = 24;

/// Something the display was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Init(RestrictedConfig),
    Print { row: u16, text: String },
    ProgressBar(u8),
    ActivityBar(u8),
    Image { path: PathBuf, x: i16, y: i16 },
    RawImage { width: u32, height: u32, x: i16, y: i16 },
    Refresh { region: Region, waveform: String, black_flash: bool },
    Close,
}

/// A character-grid display kept in memory.
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    cols: u16,
    rows: u16,
    grid: Vec<String>,
    events: Vec<Event>,
    restricted: RestrictedConfig,
}

impl MemoryDisplay {
    /// Create a blank grid. Both dimensions are raised to at least 1.
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            grid: vec![String::new(); rows as usize],
            events: Vec::new(),
            restricted: RestrictedConfig::default(),
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Contents of one row, trailing blanks removed
    pub fn row(&self, row: u16) -> &str {
        self.grid
            .get(row as usize)
            .map(|r| r.trim_end())
            .unwrap_or("")
    }

    /// Every row, trailing blanks removed
    pub fn lines(&self) -> Vec<&str> {
        self.grid.iter().map(|r| r.trim_end()).collect()
    }

    /// The grid as text, one line per row
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Rows that received a print call, in call order
    pub fn printed_rows(&self) -> Vec<u16> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Print { row, .. } => Some(*row),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn clear(&mut self) {
        for row in &mut self.grid {
            row.clear();
        }
    }

    /// Overwrite the cells under `text`. Padded text also erases the rest
    /// of the row.
    fn paint(&mut self, row: usize, col: usize, text: &[char], padded: bool) {
        let end = col + text.len();
        let mut cells: Vec<char> = self.grid[row].chars().collect();
        if cells.len() < end {
            cells.resize(end, ' ');
        }
        cells[col..end].copy_from_slice(text);
        if padded {
            cells.truncate(end);
        }
        self.grid[row] = cells.into_iter().collect();
    }

    fn resolve_col(&self, col: i16) -> u16 {
        let max = self.cols as i32;
        let col = col as i32;
        let resolved = if col < 0 { max + col } else { col };
        resolved.clamp(0, max - 1) as u16
    }
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl DisplayDevice for MemoryDisplay {
    fn version(&self) -> String {
        format!("inkterm-memory {}", env!("CARGO_PKG_VERSION"))
    }

    fn init(&mut self, config: &Config) -> Result<()> {
        self.restricted = config.restricted();
        self.events.push(Event::Init(self.restricted));
        Ok(())
    }

    fn print(&mut self, text: &str, config: &Config) -> Result<u16> {
        if text.contains('\0') {
            return Err(InkError::IllegalSequence);
        }
        if config.is_cleared {
            self.clear();
        }

        let start = self.state(config).resolve_row(config.row);
        let col = self.resolve_col(config.col);
        let width = (self.cols - col) as usize;

        let chars: Vec<char> = text.chars().collect();
        let chunks: Vec<&[char]> = if chars.is_empty() {
            vec![&chars[..]]
        } else {
            chars.chunks(width).collect()
        };

        let mut used = 0u16;
        for (i, chunk) in chunks.iter().enumerate() {
            let row = start as usize + i;
            if row >= self.rows as usize {
                break;
            }
            self.paint(row, col as usize, chunk, config.is_padded);
            used += 1;
        }

        trace!("memory print at row {} ({} rows): {:?}", start, used, text);
        self.events.push(Event::Print {
            row: start,
            text: text.to_string(),
        });
        Ok(used)
    }

    fn progress_bar(&mut self, percentage: u8, _config: &Config) -> Result<()> {
        self.events.push(Event::ProgressBar(percentage));
        Ok(())
    }

    fn activity_bar(&mut self, phase: u8, _config: &Config) -> Result<()> {
        self.events.push(Event::ActivityBar(phase));
        Ok(())
    }

    fn print_image(&mut self, path: &Path, x: i16, y: i16, _config: &Config) -> Result<()> {
        self.events.push(Event::Image {
            path: path.to_path_buf(),
            x,
            y,
        });
        Ok(())
    }

    fn print_raw(&mut self, image: &RawImage, x: i16, y: i16, _config: &Config) -> Result<()> {
        if image.is_empty() {
            return Err(InkError::NoData);
        }
        self.events.push(Event::RawImage {
            width: image.width,
            height: image.height,
            x,
            y,
        });
        Ok(())
    }

    fn refresh(&mut self, region: Region, waveform: &str, black_flash: bool) -> Result<()> {
        self.events.push(Event::Refresh {
            region,
            waveform: waveform.to_string(),
            black_flash,
        });
        Ok(())
    }

    fn state(&self, config: &Config) -> State {
        let mult = config.font_mult().max(1);
        State {
            font_name: format!("{:?}", config.font()).to_lowercase(),
            view_width: self.cols as u32 * 8 * mult as u32,
            view_height: self.rows as u32 * 8 * mult as u32,
            screen_width: self.cols as u32 * 8 * mult as u32,
            screen_height: self.rows as u32 * 8 * mult as u32,
            bpp: 8,
            device_name: "Memory".to_string(),
            device_codename: "memory".to_string(),
            device_platform: "host".to_string(),
            font_w: 8 * mult as u16,
            font_h: 8 * mult as u16,
            max_cols: self.cols,
            max_rows: self.rows,
            fontsize_mult: mult,
            glyph_width: 8,
            glyph_height: 8,
            is_perfect_fit: true,
            ..Default::default()
        }
    }

    fn close(&mut self) -> Result<()> {
        self.events.push(Event::Close);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(row: i16) -> Config {
        let mut config = Config::default();
        config.row = row;
        config
    }

    #[test]
    fn test_short_text_uses_one_row() {
        let mut display = MemoryDisplay::new(10, 5);
        let rows = display.print("hello", &at(1)).unwrap();

        assert_eq!(rows, 1);
        assert_eq!(display.row(1), "hello");
        assert_eq!(display.row(0), "");
    }

    #[test]
    fn test_long_text_wraps() {
        let mut display = MemoryDisplay::new(4, 5);
        let rows = display.print("abcdefghij", &at(0)).unwrap();

        assert_eq!(rows, 3);
        assert_eq!(display.lines(), vec!["abcd", "efgh", "ij", "", ""]);
    }

    #[test]
    fn test_column_offset_narrows_rows() {
        let mut display = MemoryDisplay::new(5, 3);
        let mut config = at(0);
        config.col = 1;
        let rows = display.print("abcdefgh", &config).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(display.row(0), " abcd");
        assert_eq!(display.row(1), " efgh");
    }

    #[test]
    fn test_wrap_truncates_at_bottom() {
        let mut display = MemoryDisplay::new(2, 2);
        let rows = display.print("abcdef", &at(1)).unwrap();

        assert_eq!(rows, 1);
        assert_eq!(display.row(1), "ab");
    }

    #[test]
    fn test_negative_row_counts_from_bottom() {
        let mut display = MemoryDisplay::new(10, 5);
        display.print("last", &at(-1)).unwrap();
        assert_eq!(display.row(4), "last");
    }

    #[test]
    fn test_unpadded_text_keeps_old_tail() {
        let mut display = MemoryDisplay::new(10, 3);
        display.print("stale", &at(2)).unwrap();
        display.print("x", &at(2)).unwrap();
        assert_eq!(display.row(2), "xtale");
    }

    #[test]
    fn test_padded_blank_erases_row() {
        let mut display = MemoryDisplay::new(10, 3);
        display.print("stale", &at(2)).unwrap();
        let mut config = at(2);
        config.is_padded = true;
        display.print(" ", &config).unwrap();
        assert_eq!(display.row(2), "");
    }

    #[test]
    fn test_cleared_config_wipes_grid() {
        let mut display = MemoryDisplay::new(10, 3);
        display.print("one", &at(0)).unwrap();
        let mut config = at(2);
        config.is_cleared = true;
        display.print("two", &config).unwrap();

        assert_eq!(display.lines(), vec!["", "", "two"]);
    }

    #[test]
    fn test_nul_is_rejected() {
        let mut display = MemoryDisplay::default();
        let err = display.print("a\0b", &at(0)).unwrap_err();
        assert!(matches!(err, InkError::IllegalSequence));
    }

    #[test]
    fn test_events_are_recorded() {
        let mut display = MemoryDisplay::default();
        let config = Config::default();
        display.init(&config).unwrap();
        display.progress_bar(40, &config).unwrap();
        display.refresh(Region::FULL, "GC16", true).unwrap();
        display.close().unwrap();

        assert_eq!(
            display.events(),
            &[
                Event::Init(RestrictedConfig::default()),
                Event::ProgressBar(40),
                Event::Refresh {
                    region: Region::FULL,
                    waveform: "GC16".to_string(),
                    black_flash: true,
                },
                Event::Close,
            ]
        );
    }

    #[test]
    fn test_state_reflects_grid() {
        let display = MemoryDisplay::new(30, 12);
        let state = display.state(&Config::default());
        assert_eq!(state.max_cols, 30);
        assert_eq!(state.max_rows, 12);
        assert_eq!(state.font_name, "ibm");
    }
}
