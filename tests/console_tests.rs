//! # Console Behavior Tests
//!
//! These tests drive [`ScrollingConsole`] and [`Session`] through a scripted
//! device that reports chosen row counts and injects failures, and through
//! [`MemoryDisplay`] to check what ends up on screen.

use std::collections::HashMap;
use std::path::Path;

use inkterm::console::{DEFAULT_CAPACITY, DEFAULT_TOP_ROW};
use inkterm::device::{DisplayDevice, MemoryDisplay, Region};
use inkterm::display::{Config, ConsoleSettings, RestrictedConfig, State};
use inkterm::raster::RawImage;
use inkterm::{InkError, ScrollingConsole, Session};
use pretty_assertions::assert_eq;

// ============================================================================
// SCRIPTED DEVICE
// ============================================================================

/// Records every print as `(row, text)`. Lines listed in `rows` report that
/// many rows consumed (default 1); lines listed in `failures` fail.
#[derive(Default)]
struct ScriptedDevice {
    rows: HashMap<String, u16>,
    failures: HashMap<String, fn() -> InkError>,
    prints: Vec<(i16, String)>,
}

impl ScriptedDevice {
    fn with_rows(mut self, text: &str, rows: u16) -> Self {
        self.rows.insert(text.to_string(), rows);
        self
    }

    fn failing(mut self, text: &str, err: fn() -> InkError) -> Self {
        self.failures.insert(text.to_string(), err);
        self
    }

    fn take_prints(&mut self) -> Vec<(i16, String)> {
        std::mem::take(&mut self.prints)
    }
}

impl DisplayDevice for ScriptedDevice {
    fn version(&self) -> String {
        "scripted".to_string()
    }

    fn init(&mut self, _config: &Config) -> inkterm::Result<()> {
        Ok(())
    }

    fn print(&mut self, text: &str, config: &Config) -> inkterm::Result<u16> {
        self.prints.push((config.row, text.to_string()));
        if let Some(err) = self.failures.get(text) {
            return Err(err());
        }
        Ok(self.rows.get(text).copied().unwrap_or(1))
    }

    fn progress_bar(&mut self, _percentage: u8, _config: &Config) -> inkterm::Result<()> {
        Ok(())
    }

    fn activity_bar(&mut self, _phase: u8, _config: &Config) -> inkterm::Result<()> {
        Ok(())
    }

    fn print_image(&mut self, _: &Path, _: i16, _: i16, _: &Config) -> inkterm::Result<()> {
        Ok(())
    }

    fn print_raw(&mut self, _: &RawImage, _: i16, _: i16, _: &Config) -> inkterm::Result<()> {
        Ok(())
    }

    fn refresh(&mut self, _: Region, _: &str, _: bool) -> inkterm::Result<()> {
        Ok(())
    }

    fn state(&self, _config: &Config) -> State {
        State::default()
    }

    fn close(&mut self) -> inkterm::Result<()> {
        Ok(())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn console(capacity: usize) -> ScrollingConsole {
    let settings = ConsoleSettings {
        capacity,
        ..Default::default()
    };
    ScrollingConsole::with_settings(&Config::default(), &settings)
}

fn lines(console: &ScrollingConsole) -> Vec<String> {
    console.lines().map(str::to_string).collect()
}

fn print(row: i16, text: &str) -> (i16, String) {
    (row, text.to_string())
}

// ============================================================================
// BUFFER
// ============================================================================

#[test]
fn test_fifo_keeps_most_recent_lines() {
    for capacity in 1..=8 {
        for n in capacity + 1..capacity * 3 {
            let mut device = ScriptedDevice::default();
            let mut console = console(capacity);
            for i in 0..n {
                console.append_line(&mut device, &i.to_string()).unwrap();
            }

            let expected: Vec<String> = (n - capacity..n).map(|i| i.to_string()).collect();
            assert_eq!(lines(&console), expected, "capacity {}, {} lines", capacity, n);
        }
    }
}

#[test]
fn test_capacity_boundary_evicts_only_first() {
    let mut device = ScriptedDevice::default();
    let mut console = console(DEFAULT_CAPACITY);

    for i in 1..=DEFAULT_CAPACITY {
        console.append_line(&mut device, &format!("a{}", i)).unwrap();
    }
    let full: Vec<String> = (1..=DEFAULT_CAPACITY).map(|i| format!("a{}", i)).collect();
    assert_eq!(lines(&console), full);

    console.append_line(&mut device, "next").unwrap();
    let mut expected = full[1..].to_vec();
    expected.push("next".to_string());
    assert_eq!(lines(&console), expected);
}

#[test]
fn test_replace_never_changes_length() {
    let mut device = ScriptedDevice::default();
    let mut console = console(5);

    for len in 1..=5 {
        if len > 1 {
            console.append_line(&mut device, "filler").unwrap();
        }
        assert_eq!(console.len(), len);
        console.replace_last_line(&mut device, "status").unwrap();
        assert_eq!(console.len(), len);
        assert_eq!(console.lines().last(), Some("status"));
    }
}

#[test]
fn test_replace_is_idempotent() {
    let mut once = MemoryDisplay::new(30, 16);
    let mut console_once = console(4);
    console_once.append_line(&mut once, "one").unwrap();
    console_once.append_line(&mut once, "two").unwrap();
    console_once.replace_last_line(&mut once, "done").unwrap();

    let mut twice = MemoryDisplay::new(30, 16);
    let mut console_twice = console(4);
    console_twice.append_line(&mut twice, "one").unwrap();
    console_twice.append_line(&mut twice, "two").unwrap();
    console_twice.replace_last_line(&mut twice, "done").unwrap();
    console_twice.replace_last_line(&mut twice, "done").unwrap();

    assert_eq!(lines(&console_once), lines(&console_twice));
    assert_eq!(once.render(), twice.render());
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_hello_on_seeded_console() {
    let mut device = ScriptedDevice::default();
    let mut console = console(5);

    let n = console.append_line(&mut device, "hello").unwrap();

    assert_eq!(n, 5);
    assert_eq!(
        device.take_prints(),
        vec![print(DEFAULT_TOP_ROW, " "), print(DEFAULT_TOP_ROW + 1, "hello")]
    );
    assert_eq!(console.high_water(), DEFAULT_TOP_ROW + 2);
}

#[test]
fn test_cursor_advances_by_reported_rows() {
    let mut device = ScriptedDevice::default().with_rows("wide", 3);
    let mut console = console(5);

    console.append_line(&mut device, "wide").unwrap();
    console.append_line(&mut device, "after").unwrap();

    let prints = device.take_prints();
    assert_eq!(
        prints[prints.len() - 3..].to_vec(),
        vec![print(4, " "), print(5, "wide"), print(8, "after")]
    );
    assert_eq!(console.cursor_row(), 9);
    assert_eq!(console.high_water(), 9);
}

#[test]
fn test_shrinking_output_blanks_stale_rows() {
    let mut device = ScriptedDevice::default().with_rows("long", 5);
    let mut console = console(2);

    // [" ", long] -> rows 4, 5..10
    console.append_line(&mut device, "long").unwrap();
    // [long, short] -> rows 4..9, 9
    console.append_line(&mut device, "short").unwrap();
    assert_eq!(console.high_water(), 10);
    device.take_prints();

    // [short, s2] -> rows 4, 5; extent 6, previous 10
    console.append_line(&mut device, "s2").unwrap();

    assert_eq!(
        device.take_prints(),
        vec![
            print(4, "short"),
            print(5, "s2"),
            print(6, " "),
            print(7, " "),
            print(8, " "),
            print(9, " "),
        ]
    );
    assert_eq!(console.cursor_row(), 6);
}

#[test]
fn test_high_water_is_not_lowered() {
    let mut device = ScriptedDevice::default().with_rows("long", 5);
    let mut console = console(2);

    console.append_line(&mut device, "long").unwrap();
    console.append_line(&mut device, "a").unwrap();
    console.append_line(&mut device, "b").unwrap();
    assert_eq!(console.high_water(), 10);

    // Still below the mark, so the same rows are erased again
    device.take_prints();
    console.append_line(&mut device, "c").unwrap();
    let blanks = device
        .take_prints()
        .into_iter()
        .filter(|(_, text)| text == " ")
        .count();
    assert_eq!(blanks, 4);
    assert_eq!(console.high_water(), 10);
}

#[test]
fn test_replace_does_not_blank() {
    let mut device = ScriptedDevice::default().with_rows("long", 5);
    let mut console = console(3);

    console.append_line(&mut device, "long").unwrap();
    device.take_prints();

    console.replace_last_line(&mut device, "short").unwrap();
    assert_eq!(
        device.take_prints(),
        vec![print(4, " "), print(5, "short")]
    );
    assert_eq!(console.high_water(), 10);
}

#[test]
fn test_stale_rows_cleared_on_screen() {
    let mut display = MemoryDisplay::new(10, 20);
    let mut console = console(2);

    console
        .append_line(&mut display, "a fairly long line that wraps")
        .unwrap();
    console.append_line(&mut display, "x").unwrap();
    console.append_line(&mut display, "y").unwrap();

    let screen = display.lines();
    assert_eq!(screen[4], " x");
    assert_eq!(screen[5], " y");
    assert!(screen[6..].iter().all(|row| row.is_empty()));
}

#[test]
fn test_rows_below_high_water_blanked_again() {
    let mut display = MemoryDisplay::new(10, 20);
    let mut console = console(2);

    console
        .append_line(&mut display, "a fairly long line that wraps")
        .unwrap();
    console.append_line(&mut display, "x").unwrap();
    console.append_line(&mut display, "y").unwrap();
    display.clear_events();

    // [y, z] on rows 4 and 5, then 6, 7, 8 up to the mark at 9
    console.append_line(&mut display, "z").unwrap();
    assert_eq!(display.printed_rows(), vec![4, 5, 6, 7, 8]);
    assert_eq!(display.row(5), " z");
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_redraw_continues_after_failure() {
    let mut device = ScriptedDevice::default()
        .failing("bad", || InkError::IllegalSequence)
        .failing("worse", || InkError::NoDevice);
    let mut console = console(5);

    console.append_line(&mut device, "good").unwrap();
    let _ = console.append_line(&mut device, "bad");
    device.take_prints();

    let err = console.append_line(&mut device, "worse").unwrap_err();

    // First failure wins
    assert!(matches!(err, InkError::IllegalSequence));
    // Every line was still drawn; failed lines consume no rows
    assert_eq!(
        device.take_prints(),
        vec![
            print(4, " "),
            print(5, "good"),
            print(6, "bad"),
            print(6, "worse"),
        ]
    );
    assert_eq!(console.len(), 4);
}

#[test]
fn test_blank_failure_is_reported() {
    let mut device = ScriptedDevice::default()
        .with_rows("long", 5)
        .failing(" ", || InkError::TimedOut);
    let mut console = console(1);

    // Capacity 1 evicts the seed before anything is drawn
    console.append_line(&mut device, "long").unwrap();
    let err = console.append_line(&mut device, "short").unwrap_err();

    assert!(matches!(err, InkError::TimedOut));
    assert_eq!(console.lines().collect::<Vec<_>>(), vec!["short"]);
}

// ============================================================================
// SESSION
// ============================================================================

#[test]
fn test_session_demo_flow_on_screen() {
    let mut config = Config::default();
    let mut session = Session::new(
        MemoryDisplay::new(40, 16),
        &mut config,
        RestrictedConfig::default(),
    )
    .unwrap();

    for i in 0..10 {
        session.println(format_args!("Test line {}", i)).unwrap();
    }
    session
        .print_last_line("This should update the last line!")
        .unwrap();

    let screen = session.device().lines();
    assert_eq!(
        screen[4..10].to_vec(),
        vec![
            " Test line 4",
            " Test line 5",
            " Test line 6",
            " Test line 7",
            " Test line 8",
            " This should update the last line!",
        ]
    );
    assert_eq!(screen[10], "");
}

#[test]
fn test_session_reset_console() {
    let mut config = Config::default();
    let mut session = Session::new(
        ScriptedDevice::default(),
        &mut config,
        RestrictedConfig::default(),
    )
    .unwrap();

    session.println("one").unwrap();
    session.reset_console();
    session.device_mut().take_prints();

    session.println("fresh").unwrap();
    assert_eq!(
        session.device_mut().take_prints(),
        vec![print(4, " "), print(5, "fresh")]
    );
}
