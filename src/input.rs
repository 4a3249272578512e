// Pointer input: the events an input source delivers to a surface, plus a
// tracker that derives those events from a polled device (mouse state sampled
// once per frame).

use crate::types::Point;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer pressed: a stroke begins.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released: the stroke ends.
    Up,
    /// The host aborted the gesture. Finishes the stroke at the last position.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pos: Point,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, pos: Point, time: Instant) -> Self {
        Self { phase, pos, time }
    }

    pub fn down(pos: Point, time: Instant) -> Self {
        Self::new(PointerPhase::Down, pos, time)
    }

    pub fn moved(pos: Point, time: Instant) -> Self {
        Self::new(PointerPhase::Move, pos, time)
    }

    pub fn up(pos: Point, time: Instant) -> Self {
        Self::new(PointerPhase::Up, pos, time)
    }

    pub fn cancel(pos: Point, time: Instant) -> Self {
        Self::new(PointerPhase::Cancel, pos, time)
    }
}

/// Anything an input source can push pointer events into.
pub trait InputSink {
    fn handle_event(&mut self, event: PointerEvent);
}

/// Turns level-triggered samples (`button held?`, `where?`) into pointer edges.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pressed: bool,
    last: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one sample; returns the edge it produced, if any.
    ///
    /// * released -> held with a position: `Down`
    /// * held, position changed: `Move`
    /// * held -> released: `Up` at the last known position
    /// * held, position lost (pointer left the device): `Cancel`
    pub fn sample(&mut self, button_down: bool, pos: Option<Point>, time: Instant) -> Option<PointerEvent> {
        match (self.pressed, button_down, pos) {
            (false, true, Some(p)) => {
                self.pressed = true;
                self.last = Some(p);
                Some(PointerEvent::down(p, time))
            }
            (false, _, p) => {
                self.last = p;
                None
            }
            (true, true, Some(p)) => {
                if self.last == Some(p) {
                    return None;
                }
                self.last = Some(p);
                Some(PointerEvent::moved(p, time))
            }
            (true, true, None) => {
                self.pressed = false;
                self.last.take().map(|last| PointerEvent::cancel(last, time))
            }
            (true, false, p) => {
                self.pressed = false;
                let at = p.or(self.last);
                self.last = p;
                at.map(|at| PointerEvent::up(at, time))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_drag_release() {
        let t = Instant::now();
        let mut tr = PointerTracker::new();
        assert_eq!(tr.sample(false, Some(Point::new(1.0, 1.0)), t), None);

        let e = tr.sample(true, Some(Point::new(2.0, 2.0)), t).unwrap();
        assert_eq!(e.phase, PointerPhase::Down);
        assert!(tr.is_pressed());

        // Unchanged position while held is not a move.
        assert_eq!(tr.sample(true, Some(Point::new(2.0, 2.0)), t), None);

        let e = tr.sample(true, Some(Point::new(3.0, 2.0)), t).unwrap();
        assert_eq!(e.phase, PointerPhase::Move);
        assert_eq!(e.pos, Point::new(3.0, 2.0));

        let e = tr.sample(false, Some(Point::new(3.0, 2.0)), t).unwrap();
        assert_eq!(e.phase, PointerPhase::Up);
        assert!(!tr.is_pressed());
    }

    #[test]
    fn press_without_position_waits() {
        let t = Instant::now();
        let mut tr = PointerTracker::new();
        assert_eq!(tr.sample(true, None, t), None);
        assert!(!tr.is_pressed());
    }

    #[test]
    fn losing_position_while_held_cancels() {
        let t = Instant::now();
        let mut tr = PointerTracker::new();
        tr.sample(true, Some(Point::new(5.0, 5.0)), t);
        let e = tr.sample(true, None, t).unwrap();
        assert_eq!(e.phase, PointerPhase::Cancel);
        assert_eq!(e.pos, Point::new(5.0, 5.0));
        assert!(!tr.is_pressed());
    }

    #[test]
    fn release_without_position_uses_last() {
        let t = Instant::now();
        let mut tr = PointerTracker::new();
        tr.sample(true, Some(Point::new(5.0, 5.0)), t);
        let e = tr.sample(false, None, t).unwrap();
        assert_eq!(e.phase, PointerPhase::Up);
        assert_eq!(e.pos, Point::new(5.0, 5.0));
    }
}
