//! The signature surface: collects pointer strokes, keeps the rendered bitmap
//! in sync with them and tells an optional delegate when drawing starts.
//!
//! Everything here runs on one thread (the host's UI thread). The delegate is
//! held as a `Weak`, so the surface never keeps its observer alive and simply
//! skips the callback once the observer is gone.

use crate::config::SurfaceConfig;
use crate::ink::{InkModel, InkParams};
use crate::input::{InputSink, PointerEvent, PointerPhase};
use crate::render::{Renderer, SoftwareRenderer};
use crate::types::{FrameBuffer, InkPoint, Point};
use std::rc::{Rc, Weak};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Where a surface is in its capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Nothing recorded since creation or the last erase.
    Empty,
    /// A stroke is open (pointer is down).
    Drawing,
    /// At least one finished stroke, pointer is up.
    HasContent,
}

/// One pointer-down .. pointer-up run.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    samples: Vec<Point>,
    ink: Vec<InkPoint>,
}

impl Stroke {
    /// Raw coordinates as delivered by the input source, in order.
    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    /// The modeled path that gets rasterized.
    pub fn ink(&self) -> &[InkPoint] {
        &self.ink
    }
}

/// Read-only view of a surface, handed to delegates.
pub trait SignatureCapture {
    /// True iff any stroke point is recorded and not erased since.
    fn has_signature(&self) -> bool;
    /// Owned copy of the current bitmap; blank when there is no signature.
    fn signature_image(&self) -> FrameBuffer;
    fn state(&self) -> CaptureState;
}

/// Observer for surface events. All methods are optional.
pub trait SignatureDelegate {
    /// The first point of a capture session was recorded.
    fn signature_view_did_start_drawing(&self, _surface: &dyn SignatureCapture) {}
}

pub struct SignatureSurface<R: Renderer = SoftwareRenderer> {
    renderer: R,
    model: InkModel,
    strokes: Vec<Stroke>,
    drawing: bool,
    delegate: Option<Weak<dyn SignatureDelegate>>,
}

impl SignatureSurface<SoftwareRenderer> {
    /// A surface with the built-in software renderer, sized and colored per `config`.
    pub fn new(config: &SurfaceConfig) -> Self {
        let renderer = SoftwareRenderer::new(
            config.width,
            config.height,
            config.ink_color,
            config.background_color,
        );
        Self::with_renderer(renderer, InkParams::from(config))
    }
}

impl<R: Renderer> SignatureSurface<R> {
    pub fn with_renderer(mut renderer: R, params: InkParams) -> Self {
        renderer.clear();
        let (width, height) = renderer.size();
        let mut model = InkModel::new(params);
        model.set_bounds(width, height);
        Self {
            renderer,
            model,
            strokes: Vec::new(),
            drawing: false,
            delegate: None,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Register the observer. Only a weak reference is kept.
    pub fn set_delegate<D: SignatureDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        let weak: Weak<dyn SignatureDelegate> = weak;
        self.delegate = Some(weak);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    pub fn has_signature(&self) -> bool {
        !self.strokes.is_empty()
    }

    pub fn state(&self) -> CaptureState {
        if self.strokes.is_empty() {
            CaptureState::Empty
        } else if self.drawing {
            CaptureState::Drawing
        } else {
            CaptureState::HasContent
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Owned snapshot of the bitmap. After `erase` (or before any input) this
    /// is the blank background.
    pub fn signature_image(&self) -> FrameBuffer {
        self.renderer.snapshot()
    }

    /// Drop every stroke and blank the bitmap. Safe to call at any time.
    pub fn erase(&mut self) {
        if !self.strokes.is_empty() {
            info!(strokes = self.strokes.len(), "signature erased");
        }
        self.strokes.clear();
        self.drawing = false;
        self.model.reset();
        self.renderer.clear();
    }

    /// The host surface changed size: reallocate and replay all strokes.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.renderer.size() == (width, height) {
            return;
        }
        info!(width, height, "surface resized");
        self.renderer.resize(width, height);
        self.model.set_bounds(width, height);
        self.redraw();
    }

    /// Clear the bitmap and rasterize every stroke again.
    pub fn redraw(&mut self) {
        self.renderer.clear();
        for stroke in &self.strokes {
            draw_stroke(&mut self.renderer, stroke);
        }
    }

    pub fn pointer_down(&mut self, pos: Point) {
        self.handle_event(PointerEvent::down(pos, Instant::now()));
    }

    pub fn pointer_move(&mut self, pos: Point) {
        self.handle_event(PointerEvent::moved(pos, Instant::now()));
    }

    pub fn pointer_up(&mut self, pos: Point) {
        self.handle_event(PointerEvent::up(pos, Instant::now()));
    }

    /// Gesture aborted by the host: ends the open stroke where it last was.
    pub fn pointer_cancel(&mut self) {
        if let Some(last) = self.last_sample() {
            self.handle_event(PointerEvent::cancel(last, Instant::now()));
        }
    }

    pub fn handle_event(&mut self, event: PointerEvent) {
        match event.phase {
            PointerPhase::Down => self.begin_stroke(event.pos, event.time),
            PointerPhase::Move => self.extend_stroke(event.pos, event.time),
            PointerPhase::Up => self.end_stroke(event.pos, event.time),
            PointerPhase::Cancel => {
                if let Some(last) = self.last_sample() {
                    self.end_stroke(last, event.time);
                }
            }
        }
    }

    fn last_sample(&self) -> Option<Point> {
        if !self.drawing {
            return None;
        }
        self.strokes.last().and_then(|s| s.samples.last().copied())
    }

    fn begin_stroke(&mut self, pos: Point, time: Instant) {
        if !pos.is_finite() {
            warn!(?pos, "dropping non-finite pointer-down");
            return;
        }
        if let Some(last) = self.last_sample() {
            // The previous stroke never saw its pointer-up.
            debug!("pointer-down while drawing, closing the open stroke");
            self.end_stroke(last, time);
        }

        let session_start = self.strokes.is_empty();
        let ink = self.model.begin(pos, time);
        self.renderer.draw_line_segment(ink, ink);
        self.strokes.push(Stroke {
            samples: vec![pos],
            ink: vec![ink],
        });
        self.drawing = true;
        debug!(x = pos.x, y = pos.y, stroke = self.strokes.len(), "stroke started");

        if session_start {
            self.notify_started();
        }
    }

    fn extend_stroke(&mut self, pos: Point, time: Instant) {
        if !self.drawing {
            return;
        }
        if !pos.is_finite() {
            warn!(?pos, "dropping non-finite pointer-move");
            return;
        }
        let Some(stroke) = self.strokes.last_mut() else {
            return;
        };
        stroke.samples.push(pos);

        let start = stroke.ink.len();
        self.model.extend(pos, time, &mut stroke.ink);
        for i in start..stroke.ink.len() {
            self.renderer
                .draw_line_segment(stroke.ink[i - 1], stroke.ink[i]);
        }
    }

    fn end_stroke(&mut self, pos: Point, time: Instant) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        let Some(stroke) = self.strokes.last_mut() else {
            return;
        };
        let pos = if pos.is_finite() {
            pos
        } else {
            warn!(?pos, "non-finite pointer-up, ending at the last sample");
            match stroke.samples.last() {
                Some(&last) => last,
                None => return,
            }
        };
        stroke.samples.push(pos);

        let ink = self.model.finish(pos, time);
        if let Some(&prev) = stroke.ink.last() {
            self.renderer.draw_line_segment(prev, ink);
        }
        stroke.ink.push(ink);
        debug!(samples = stroke.samples.len(), ink = stroke.ink.len(), "stroke finished");
    }

    fn notify_started(&self) {
        let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        delegate.signature_view_did_start_drawing(self);
    }
}

impl<R: Renderer> SignatureCapture for SignatureSurface<R> {
    fn has_signature(&self) -> bool {
        SignatureSurface::has_signature(self)
    }

    fn signature_image(&self) -> FrameBuffer {
        SignatureSurface::signature_image(self)
    }

    fn state(&self) -> CaptureState {
        SignatureSurface::state(self)
    }
}

impl<R: Renderer> InputSink for SignatureSurface<R> {
    fn handle_event(&mut self, event: PointerEvent) {
        SignatureSurface::handle_event(self, event);
    }
}

fn draw_stroke<R: Renderer>(renderer: &mut R, stroke: &Stroke) {
    if let Some(&first) = stroke.ink.first() {
        renderer.draw_line_segment(first, first);
    }
    for pair in stroke.ink.windows(2) {
        renderer.draw_line_segment(pair[0], pair[1]);
    }
}
