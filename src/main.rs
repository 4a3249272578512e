// What you SEE now:
// • A white pad with a "sign here" baseline.
// • Hold Left Mouse and draw: ink follows the pointer, faster = thicker.
// • C erases the pad. S saves the signature as PNG. ESC quits.

use clap::Parser;
use signature_pad::hud::{draw_crosshair, draw_signing_guide, draw_text_5x7};
use signature_pad::window::PadWindow;
use signature_pad::{
    CaptureState, Error, FrameBuffer, SignatureCapture, SignatureDelegate, SignatureSurface,
    SurfaceConfig, export,
};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "signature-pad", version, about = "Capture a handwritten signature and save it as PNG")]
struct Cli {
    /// JSON file with surface settings (size, colors, ink model)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Pad width in pixels (overrides the config file)
    #[arg(long)]
    width: Option<usize>,
    /// Pad height in pixels (overrides the config file)
    #[arg(long)]
    height: Option<usize>,
    /// Where S saves the signature
    #[arg(short, long, default_value = "signature.png")]
    output: PathBuf,
    /// Save with a transparent background instead of the paper color
    #[arg(long)]
    transparent: bool,
}

/// Logs the start of each capture session and counts them.
#[derive(Default)]
struct SessionLog {
    sessions: Cell<u32>,
}

impl SignatureDelegate for SessionLog {
    fn signature_view_did_start_drawing(&self, surface: &dyn SignatureCapture) {
        self.sessions.set(self.sessions.get() + 1);
        info!(session = self.sessions.get(), state = ?surface.state(), "started drawing");
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_level(true)
        .with_target(false)
        .without_time();

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,signature_pad=debug"));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<SurfaceConfig, Error> {
    let mut config = match &cli.config {
        Some(path) => SurfaceConfig::from_json_file(path)?,
        None => SurfaceConfig::default(),
    };
    if let Some(w) = cli.width { config.width = w; }
    if let Some(h) = cli.height { config.height = h; }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Error> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(width = config.width, height = config.height, "starting signature pad");

    /* --- Surface + window setup ---
       Visual: window opens with a blank pad. */
    let mut surface = SignatureSurface::new(&config);
    let sessions = Rc::new(SessionLog::default());
    surface.set_delegate(&sessions);
    let mut window = PadWindow::new("Signature Pad", config.width, config.height)?;

    /* --- Reusable screen buffer ---
       Visual: the pad plus overlays; the surface bitmap itself stays clean. */
    let mut screen = FrameBuffer::filled(config.width, config.height, config.background_color);
    let guide_color = 0x00_B0_B0_B8;
    let hud_color = 0x00_70_70_78;
    let cursor_color = 0x00_33_66_CC;

    let transparent = cli.transparent.then_some(surface.renderer().background_color());

    /* ------------------------------ Main loop ------------------------------ */
    while window.is_open() && !window.esc_pressed() {
        /* 1) Inputs: at most one pointer edge per frame, then the keys. */
        if let Some(event) = window.poll_pointer() {
            surface.handle_event(event);
        }
        if window.c_pressed_once() {
            surface.erase(); // visual: the pad goes blank
        }
        if window.s_pressed_once() {
            if surface.has_signature() {
                if let Err(e) = export::save_png(&surface.signature_image(), &cli.output, transparent) {
                    warn!("could not save signature: {e}");
                }
            } else {
                warn!("nothing to save, the pad is empty");
            }
        }

        /* 2) Compose the screen: pad, guide, HUD, cursor. */
        screen.pixels.copy_from_slice(&surface.renderer().frame().pixels);
        if surface.state() == CaptureState::Empty {
            draw_signing_guide(&mut screen, guide_color);
        }

        let status = match surface.state() {
            CaptureState::Empty => "SIGN HERE",
            CaptureState::Drawing => "DRAWING",
            CaptureState::HasContent => "SIGNED",
        };
        let hud = format!("{status} | C: CLEAR  S: SAVE  ESC: QUIT");
        draw_text_5x7(&mut screen, 8, 8, &hud, hud_color);

        if let Some(p) = window.mouse_pos() {
            draw_crosshair(&mut screen, p.x as i32, p.y as i32, 6, cursor_color);
        }

        /* 3) Present to the window. */
        window.present(&screen)?;
    }

    info!(sessions = sessions.sessions.get(), "bye");
    Ok(())
}
