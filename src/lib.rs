//! signature-pad: a drawable surface that records freehand strokes and hands
//! the result out as a bitmap.
//!
//! The input source pushes pointer events into a [`SignatureSurface`], the
//! surface models them into ink and draws through a [`Renderer`], and an
//! optional [`SignatureDelegate`] hears when a capture session starts.

pub mod config;
pub mod error;
pub mod export;
pub mod hud;
pub mod ink;
pub mod input;
pub mod render;
pub mod surface;
pub mod types;
pub mod window;

pub use config::SurfaceConfig;
pub use error::Error;
pub use input::{InputSink, PointerEvent, PointerPhase, PointerTracker};
pub use render::{Renderer, SoftwareRenderer};
pub use surface::{CaptureState, SignatureCapture, SignatureDelegate, SignatureSurface, Stroke};
pub use types::{FrameBuffer, InkPoint, Point};
