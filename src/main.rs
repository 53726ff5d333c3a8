//! # inkterm CLI
//!
//! Command-line front end for the FBInk bindings.
//!
//! ## Usage
//!
//! ```bash
//! # Scroll some lines, replace the last one, then draw a progress bar
//! inkterm demo
//!
//! # Same thing, rendered into a terminal preview instead of the screen
//! inkterm --preview demo --delay-ms 0
//!
//! # One-shot print at the configured row
//! inkterm --config inkterm.json print Hello from Rust
//!
//! # Dump the device geometry
//! inkterm state --json
//! ```
//!
//! Set `RUST_LOG=debug` to see device traffic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use inkterm::{
    Config, DisplayDevice, InkError, MemoryDisplay, Session, Settings,
    device::{
        Region,
        memory::{DEFAULT_COLS, DEFAULT_ROWS},
    },
    display::{Font, RestrictedConfig},
    raster::RawImage,
};

/// inkterm - print text and images on e-ink screens via FBInk
#[derive(Parser, Debug)]
#[command(name = "inkterm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render into an in-memory grid and print it instead of using the framebuffer
    #[arg(long, global = true)]
    preview: bool,

    /// Preview grid width in columns
    #[arg(long, global = true, default_value_t = DEFAULT_COLS)]
    cols: u16,

    /// Preview grid height in rows
    #[arg(long, global = true, default_value_t = DEFAULT_ROWS)]
    rows: u16,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scroll test lines, update the last one, draw a progress bar, then
    /// repeat with a different font
    Demo {
        /// Pause between steps in milliseconds
        #[arg(long, default_value = "500")]
        delay_ms: u64,
    },

    /// Print text once at the configured row
    Print {
        /// Text to print (joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Draw a full-width progress bar
    Progress {
        /// Percentage, 0-100
        percentage: u8,
    },

    /// Draw a full-width activity bar
    Activity {
        /// Phase, 1-19 (0 animates forever)
        phase: u8,
    },

    /// Draw an image
    Image {
        /// Image file
        path: PathBuf,

        /// Horizontal offset in pixels
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: i16,

        /// Vertical offset in pixels
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        y: i16,

        /// Decode the image here and send raw pixels
        #[arg(long)]
        raw: bool,
    },

    /// Show the device geometry
    State {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the backend version
    Version,

    /// Refresh the whole screen
    Refresh {
        /// Waveform mode (e.g. GC16, DU, A2, AUTO)
        #[arg(long, default_value = "GC16")]
        waveform: String,

        /// Flash to black first
        #[arg(long)]
        flash: bool,
    },

    /// Look for (and optionally press) the Kobo USB "Connect" button
    #[cfg(feature = "native")]
    ButtonScan {
        #[arg(long)]
        press: bool,

        #[arg(long)]
        no_sleep: bool,
    },

    /// Wait for the end of a Kobo USBMS session
    #[cfg(feature = "native")]
    Usbms {
        #[arg(long)]
        force_unplug: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), InkError> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    #[cfg(feature = "native")]
    if !cli.preview {
        let device = inkterm::device::NativeDisplay::open()?;
        let mut session = Session::with_settings(device, &settings)?;
        log::info!("using FBInk {}", session.version());

        let result = match cli.command {
            Commands::ButtonScan { press, no_sleep } => {
                session.device_mut().button_scan(press, no_sleep)
            }
            Commands::Usbms { force_unplug } => session
                .device_mut()
                .wait_for_usbms_processing(force_unplug),
            command => execute(&mut session, &settings, command),
        };
        return result.and(session.close());
    }

    #[cfg(not(feature = "native"))]
    if !cli.preview {
        log::debug!("built without the native feature, rendering a preview");
    }

    let device = MemoryDisplay::new(cli.cols, cli.rows);
    let mut session = Session::with_settings(device, &settings)?;
    execute(&mut session, &settings, cli.command)?;
    print_preview(session.device());
    Ok(())
}

/// Run a subcommand against any device
fn execute<D: DisplayDevice>(
    session: &mut Session<D>,
    settings: &Settings,
    command: Commands,
) -> Result<(), InkError> {
    let mut config = settings.resolved_config();

    match command {
        Commands::Demo { delay_ms } => {
            let delay = Duration::from_millis(delay_ms);
            println!("Using {}", session.version());

            demo_prints(session, &config, delay)?;

            // Switching fonts needs a re-init, which update_restricted does
            let restricted = RestrictedConfig {
                is_centered: true,
                font: Font::Unscii,
                ..settings.restricted
            };
            session.update_restricted(&mut config, restricted)?;
            thread::sleep(delay * 2);

            demo_prints(session, &config, delay)?;
        }
        Commands::Print { text } => {
            let text = text.join(" ");
            let rows = session.print(&text, &config)?;
            println!("Printed {} row(s)", rows);
        }
        Commands::Progress { percentage } => {
            session.progress_bar(percentage, &config)?;
        }
        Commands::Activity { phase } => {
            session.activity_bar(phase, &config)?;
        }
        Commands::Image { path, x, y, raw } => {
            if raw {
                let image = RawImage::open(&path, false)?;
                session.print_raw_image(&image, x, y, &config)?;
            } else {
                session.print_image(&path, x, y, &config)?;
            }
            println!("Printed {}", path.display());
        }
        Commands::State { json } => {
            let state = session.state(&config);
            if json {
                let out = serde_json::to_string_pretty(&state)
                    .map_err(|e| InkError::Config(e.to_string()))?;
                println!("{}", out);
            } else {
                print_state(&state);
            }
        }
        Commands::Version => {
            println!("{}", session.version());
        }
        Commands::Refresh { waveform, flash } => {
            session.refresh(Region::FULL, &waveform, flash)?;
        }
        #[cfg(feature = "native")]
        Commands::ButtonScan { .. } | Commands::Usbms { .. } => {
            return Err(InkError::NotSupported);
        }
    }

    Ok(())
}

/// Exercise the scrolling console the way a status display would.
fn demo_prints<D: DisplayDevice>(
    session: &mut Session<D>,
    config: &Config,
    delay: Duration,
) -> Result<(), InkError> {
    for i in 0..10 {
        let line = format!("Test line {}", i);
        session.println(&line)?;
        println!("{}", line);
        thread::sleep(delay);
    }

    session.print_last_line("This should update the last line!")?;
    thread::sleep(delay * 2);

    for pct in (0..=100).step_by(10) {
        session.progress_bar(pct, config)?;
        println!("Progress bar @ {} %", pct);
        thread::sleep(delay);
    }

    Ok(())
}

fn print_state(state: &inkterm::State) {
    println!(
        "Device:      {} ({}, {})",
        state.device_name, state.device_codename, state.device_platform
    );
    println!(
        "Screen:      {}x{} @ {} bpp, {} dpi",
        state.screen_width, state.screen_height, state.bpp, state.screen_dpi
    );
    println!("View:        {}x{}", state.view_width, state.view_height);
    println!(
        "Font:        {} x{} ({}x{} px cells)",
        state.font_name, state.fontsize_mult, state.font_w, state.font_h
    );
    println!("Text grid:   {} cols x {} rows", state.max_cols, state.max_rows);
    let fixed = if state.can_rotate { "" } else { " (fixed)" };
    println!("Rotation:    {}{}", state.current_rota, fixed);
}

/// Draw the preview grid with a frame around it
fn print_preview(display: &MemoryDisplay) {
    let width = display.cols() as usize;
    let border = format!("+{}+", "-".repeat(width));

    println!("{}", border);
    for line in display.lines() {
        println!("|{:<width$}|", line, width = width);
    }
    println!("{}", border);
}
