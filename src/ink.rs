// Ink model: turns raw pointer samples into a smooth, width-annotated path.
// Visual: fast pen motion draws a thicker line, slow motion a thinner one, and
// corners between samples are rounded off with quadratic curves.

use crate::config::SurfaceConfig;
use crate::types::{InkPoint, Point};
use std::time::Instant;

/// How far (pixels) outside the surface a sample may still land before it is clamped.
pub const SAMPLE_MARGIN: f32 = 64.0;

/// Constants for the model, taken from the surface config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkParams {
    pub width_min: f32,
    pub width_max: f32,
    pub width_smoothing: f32,
    pub velocity_min: f32,
    pub velocity_max: f32,
    pub quadratic_tolerance: f32,
    pub segment_spacing: f32,
    pub min_distance: f32,
}

impl From<&SurfaceConfig> for InkParams {
    fn from(c: &SurfaceConfig) -> Self {
        Self {
            width_min: c.width_min,
            width_max: c.width_max,
            width_smoothing: c.width_smoothing,
            velocity_min: c.velocity_min,
            velocity_max: c.velocity_max,
            quadratic_tolerance: c.quadratic_tolerance,
            segment_spacing: c.segment_spacing,
            min_distance: c.min_distance,
        }
    }
}

/// Point on the quadratic Bézier `start -> end` with `control`, at `t` in [0,1].
pub fn quadratic_point(start: Point, end: Point, control: Point, t: f32) -> Point {
    let a = (1.0 - t) * (1.0 - t);
    let b = 2.0 * t * (1.0 - t);
    let c = t * t;
    Point::new(
        a * start.x + b * control.x + c * end.x,
        a * start.y + b * control.y + c * end.y,
    )
}

/// Per-stroke modeling state. One model is reused for every stroke of a surface;
/// the pen width carries over between strokes so consecutive strokes blend.
#[derive(Debug, Clone)]
pub struct InkModel {
    params: InkParams,
    width: f32,      // current (smoothed) pen width
    prev_width: f32, // width at the last emitted ink point
    prev: Point,     // last raw sample
    prev_mid: Point, // midpoint between the last two raw samples
    prev_time: Option<Instant>,
    velocity: f32,                // last measured speed in px/s
    bounds: Option<(f32, f32)>,   // surface size; samples are clamped to it plus SAMPLE_MARGIN
}

impl InkModel {
    pub fn new(params: InkParams) -> Self {
        Self {
            params,
            width: params.width_min,
            prev_width: params.width_min,
            prev: Point::default(),
            prev_mid: Point::default(),
            prev_time: None,
            velocity: 0.0,
            bounds: None,
        }
    }

    /// Tell the model how big the surface is. Samples further than
    /// `SAMPLE_MARGIN` outside it are pulled back to that margin.
    pub fn set_bounds(&mut self, width: usize, height: usize) {
        self.bounds = Some((width as f32, height as f32));
    }

    fn clamp_to_bounds(&self, pos: Point) -> Point {
        match self.bounds {
            Some((w, h)) => Point::new(
                pos.x.clamp(-SAMPLE_MARGIN, w + SAMPLE_MARGIN),
                pos.y.clamp(-SAMPLE_MARGIN, h + SAMPLE_MARGIN),
            ),
            None => pos,
        }
    }

    pub fn params(&self) -> &InkParams {
        &self.params
    }

    /// Current smoothed pen width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Forget all carried state (used when the surface is erased).
    pub fn reset(&mut self) {
        let bounds = self.bounds;
        *self = Self::new(self.params);
        self.bounds = bounds;
    }

    /// Clamp + normalize the speed, then low-pass the pen width towards its target.
    fn update_width(&mut self, velocity: f32) {
        let p = &self.params;
        let clamped = velocity.clamp(p.velocity_min, p.velocity_max);
        let normalized = (clamped - p.velocity_min) / (p.velocity_max - p.velocity_min);
        let target = (p.width_max - p.width_min) * normalized + p.width_min;
        let alpha = p.width_smoothing;
        self.width = (self.width * alpha + target * (1.0 - alpha)).clamp(p.width_min, p.width_max);
    }

    /// Pen went down: a stroke starts with exactly one ink point.
    pub fn begin(&mut self, pos: Point, time: Instant) -> InkPoint {
        let pos = self.clamp_to_bounds(pos);
        self.velocity = 0.0;
        self.update_width(0.0);
        self.prev = pos;
        self.prev_mid = pos;
        self.prev_time = Some(time);
        self.prev_width = self.width;
        InkPoint::new(pos, self.width)
    }

    /// Pen moved: push zero or more ink points into `out`.
    pub fn extend(&mut self, pos: Point, time: Instant, out: &mut Vec<InkPoint>) {
        let pos = self.clamp_to_bounds(pos);
        let distance = self.prev.distance(pos);

        // A repeated timestamp keeps the last known speed instead of dividing by zero.
        if let Some(prev_time) = self.prev_time {
            let dt = time.saturating_duration_since(prev_time).as_secs_f32();
            if dt > 0.0 {
                self.velocity = distance / dt;
            }
        }
        self.update_width(self.velocity);

        let mid = self.prev.midpoint(pos);
        let p = self.params;

        if distance > p.quadratic_tolerance {
            let segments = ((distance / p.segment_spacing) as usize).max(1);
            let start_width = self.prev_width;
            let end_width = self.width;
            for i in 0..segments {
                let t = i as f32 / segments as f32;
                let width = start_width + (end_width - start_width) * t;
                let quad = quadratic_point(self.prev_mid, mid, self.prev, t);
                out.push(InkPoint::new(quad, width));
            }
            self.prev_width = end_width;
        } else if distance > p.min_distance {
            out.push(InkPoint::new(pos, self.width));
            self.prev_width = self.width;
        }

        self.prev = pos;
        self.prev_mid = mid;
        self.prev_time = Some(time);
    }

    /// Pen lifted: the stroke ends exactly where the pointer was released.
    pub fn finish(&mut self, pos: Point, time: Instant) -> InkPoint {
        let pos = self.clamp_to_bounds(pos);
        self.prev = pos;
        self.prev_time = Some(time);
        self.prev_width = self.width;
        InkPoint::new(pos, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn model() -> InkModel {
        InkModel::new(InkParams::from(&SurfaceConfig::default()))
    }

    #[test]
    fn quadratic_endpoints_and_middle() {
        let s = Point::new(0.0, 0.0);
        let e = Point::new(10.0, 0.0);
        let c = Point::new(5.0, 10.0);
        assert_eq!(quadratic_point(s, e, c, 0.0), s);
        assert_eq!(quadratic_point(s, e, c, 1.0), e);
        let m = quadratic_point(s, e, c, 0.5);
        assert_relative_eq!(m.x, 5.0);
        assert_relative_eq!(m.y, 5.0);
    }

    #[test]
    fn jitter_below_min_distance_is_dropped() {
        let mut m = model();
        let t0 = Instant::now();
        m.begin(Point::new(10.0, 10.0), t0);
        let mut out = Vec::new();
        m.extend(Point::new(10.5, 10.0), t0 + Duration::from_millis(16), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn short_move_emits_the_sample() {
        let mut m = model();
        let t0 = Instant::now();
        m.begin(Point::new(10.0, 10.0), t0);
        let mut out = Vec::new();
        m.extend(Point::new(12.0, 10.0), t0 + Duration::from_millis(16), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].pos, Point::new(12.0, 10.0));
    }

    #[test]
    fn long_move_is_interpolated() {
        let mut m = model();
        let t0 = Instant::now();
        m.begin(Point::new(0.0, 0.0), t0);
        let mut out = Vec::new();
        // 30px move -> floor(30 / 1.5) = 20 interpolated points
        m.extend(Point::new(30.0, 0.0), t0 + Duration::from_millis(10), &mut out);
        assert_eq!(out.len(), 20);
        // The first move curves from the start point towards the midpoint.
        assert_eq!(out[0].pos, Point::new(0.0, 0.0));
        assert!(out.iter().all(|p| p.pos.x >= 0.0 && p.pos.x < 15.0));
    }

    #[test]
    fn widths_stay_in_range_and_grow_with_speed() {
        let mut m = model();
        let params = *m.params();
        let t0 = Instant::now();
        let first = m.begin(Point::new(0.0, 0.0), t0);
        assert!(first.width >= params.width_min && first.width <= params.width_max);

        let mut out = Vec::new();
        let mut x = 0.0;
        for i in 1..=20 {
            // 100px every 10ms = 10_000 px/s, above velocity_max
            x += 100.0;
            m.extend(Point::new(x, 0.0), t0 + Duration::from_millis(10 * i), &mut out);
        }
        assert!(out
            .iter()
            .all(|p| p.width >= params.width_min && p.width <= params.width_max));
        assert_relative_eq!(m.width(), params.width_max, epsilon = 0.01);
    }

    #[test]
    fn same_timestamp_does_not_blow_up() {
        let mut m = model();
        let t0 = Instant::now();
        m.begin(Point::new(0.0, 0.0), t0);
        let mut out = Vec::new();
        m.extend(Point::new(50.0, 50.0), t0, &mut out);
        assert!(out.iter().all(|p| p.width.is_finite() && p.pos.is_finite()));
    }

    #[test]
    fn far_samples_are_clamped_to_the_margin() {
        let mut m = model();
        m.set_bounds(64, 48);
        let t0 = Instant::now();
        m.begin(Point::new(10.0, 10.0), t0);
        let mut out = Vec::new();
        m.extend(Point::new(1e13, 10.0), t0 + Duration::from_millis(16), &mut out);
        // At most the clamped distance / spacing points, whatever the input.
        let limit = ((64.0 + SAMPLE_MARGIN - 10.0) / m.params().segment_spacing).ceil() as usize;
        assert!(out.len() <= limit, "{} ink points", out.len());
        assert!(out.iter().all(|p| p.pos.x <= 64.0 + SAMPLE_MARGIN));

        let end = m.finish(Point::new(-1e13, -1e13), t0 + Duration::from_millis(32));
        assert_eq!(end.pos, Point::new(-SAMPLE_MARGIN, -SAMPLE_MARGIN));
    }

    #[test]
    fn reset_keeps_bounds() {
        let mut m = model();
        m.set_bounds(10, 10);
        m.reset();
        let p = m.begin(Point::new(500.0, 5.0), Instant::now());
        assert_eq!(p.pos, Point::new(10.0 + SAMPLE_MARGIN, 5.0));
    }

    #[test]
    fn reset_restores_min_width() {
        let mut m = model();
        let t0 = Instant::now();
        m.begin(Point::new(0.0, 0.0), t0);
        let mut out = Vec::new();
        m.extend(Point::new(400.0, 0.0), t0 + Duration::from_millis(5), &mut out);
        assert!(m.width() > m.params().width_min);
        m.reset();
        assert_eq!(m.width(), m.params().width_min);
    }
}
