//! Multi-touch gesture engine for a single postcard.
//!
//! One contact drags, two contacts pinch and rotate, a third contact is tracked
//! but has no effect. Every phase keeps an anchor snapshot taken when the
//! contact count last changed so deltas never accumulate drift.

use crate::model::Transform;

pub type ContactId = i32;

/// Tunables for tap detection and pinch scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Displacement (px) past which a press stops counting as a tap.
    pub tap_slop: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop: 5.0,
            min_scale: 0.5,
            max_scale: 2.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Direction from `other` to `self`, in degrees.
    pub fn angle_to(self, other: Point) -> f64 {
        (self.y - other.y).atan2(self.x - other.x).to_degrees()
    }
}

/// Active contacts in arrival order.
#[derive(Clone, Debug, Default)]
pub struct ContactSet {
    contacts: Vec<(ContactId, Point)>,
}

impl ContactSet {
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Returns false when `id` was already tracked (its position is refreshed instead).
    fn insert(&mut self, id: ContactId, point: Point) -> bool {
        if self.update(id, point) {
            return false;
        }
        self.contacts.push((id, point));
        true
    }

    fn update(&mut self, id: ContactId, point: Point) -> bool {
        match self.contacts.iter_mut().find(|(cid, _)| *cid == id) {
            Some((_, p)) => {
                *p = point;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: ContactId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|(cid, _)| *cid != id);
        self.contacts.len() != before
    }

    fn first(&self) -> Option<Point> {
        self.contacts.first().map(|(_, p)| *p)
    }

    fn pair(&self) -> Option<(Point, Point)> {
        match self.contacts.as_slice() {
            [(_, a), (_, b), ..] => Some((*a, *b)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Transforming,
    /// Three or more contacts; tracked without effect.
    Saturated,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragAnchor {
    anchor: Point,
    element_x: f64,
    element_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PinchAnchor {
    distance: f64,
    angle: f64,
    transform: Transform,
    // atan2 wraps at ±180; whole turns are counted so rotation stays continuous.
    last_angle: f64,
    turns: i32,
}

impl PinchAnchor {
    fn new(a: Point, b: Point, transform: Transform) -> Self {
        let angle = a.angle_to(b);
        Self {
            distance: a.distance_to(b),
            angle,
            transform,
            last_angle: angle,
            turns: 0,
        }
    }

    fn unwrapped_delta(&mut self, angle: f64) -> f64 {
        let step = angle - self.last_angle;
        if step > 180.0 {
            self.turns -= 1;
        } else if step < -180.0 {
            self.turns += 1;
        }
        self.last_angle = angle;
        angle - self.angle + 360.0 * f64::from(self.turns)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Dragging(DragAnchor),
    Transforming(PinchAnchor),
    Saturated,
}

/// Receives the engine's side effects. Implemented by the rendering layer.
pub trait GestureHost {
    /// Called on every contact start; returns the new stacking index.
    fn bring_to_front(&mut self) -> i32;
    fn transform_changed(&mut self, transform: &Transform);
    /// A press released without crossing the tap slop.
    fn select(&mut self);
    /// The last contact of a session went away.
    fn settled(&mut self, _transform: &Transform) {}
}

#[derive(Clone, Debug)]
pub struct GestureEngine {
    config: GestureConfig,
    transform: Transform,
    contacts: ContactSet,
    phase: Phase,
    moved: bool,
    selected: bool,
}

impl GestureEngine {
    pub fn new(transform: Transform) -> Self {
        Self::with_config(transform, GestureConfig::default())
    }

    pub fn with_config(transform: Transform, config: GestureConfig) -> Self {
        Self {
            config,
            transform,
            contacts: ContactSet::default(),
            phase: Phase::Idle,
            moved: false,
            selected: false,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn contacts(&self) -> &ContactSet {
        &self.contacts
    }

    pub fn phase(&self) -> GesturePhase {
        match self.phase {
            Phase::Idle => GesturePhase::Idle,
            Phase::Dragging(_) => GesturePhase::Dragging,
            Phase::Transforming(_) => GesturePhase::Transforming,
            Phase::Saturated => GesturePhase::Saturated,
        }
    }

    /// External overwrite of position and rotation (shuffle). Scale and z are kept.
    pub fn reposition(&mut self, x: f64, y: f64, rotation: f64) {
        self.transform.x = x;
        self.transform.y = y;
        self.transform.rotation = rotation;
        self.reanchor();
    }

    pub fn on_contact_start(&mut self, id: ContactId, x: f64, y: f64, host: &mut impl GestureHost) {
        if self.contacts.is_empty() {
            self.moved = false;
            self.selected = false;
        }
        self.transform.z = host.bring_to_front();
        if self.contacts.insert(id, Point::new(x, y)) {
            self.reanchor();
        }
        host.transform_changed(&self.transform);
    }

    pub fn on_contact_move(&mut self, id: ContactId, x: f64, y: f64, host: &mut impl GestureHost) {
        let point = Point::new(x, y);
        if !self.contacts.update(id, point) {
            return;
        }
        if !self.moved {
            self.moved = match self.phase {
                Phase::Dragging(drag) => drag.anchor.distance_to(point) > self.config.tap_slop,
                Phase::Idle => false,
                Phase::Transforming(_) | Phase::Saturated => true,
            };
        }

        match self.phase {
            Phase::Dragging(drag) => {
                self.transform.x = drag.element_x + (point.x - drag.anchor.x);
                self.transform.y = drag.element_y + (point.y - drag.anchor.y);
                host.transform_changed(&self.transform);
            }
            Phase::Transforming(mut pinch) => {
                let Some((a, b)) = self.contacts.pair() else {
                    return;
                };
                let distance = a.distance_to(b);
                if pinch.distance <= f64::EPSILON {
                    // No usable reference yet: scale ratio stays 1 until the contacts separate.
                    if distance > f64::EPSILON {
                        self.phase = Phase::Transforming(PinchAnchor::new(a, b, self.transform));
                    }
                    return;
                }
                let ratio = distance / pinch.distance;
                let delta = pinch.unwrapped_delta(a.angle_to(b));
                self.transform.scale = (pinch.transform.scale * ratio)
                    .clamp(self.config.min_scale, self.config.max_scale);
                self.transform.rotation = pinch.transform.rotation + delta;
                self.phase = Phase::Transforming(pinch);
                host.transform_changed(&self.transform);
            }
            Phase::Idle | Phase::Saturated => {}
        }
    }

    pub fn on_contact_end(&mut self, id: ContactId, host: &mut impl GestureHost) {
        self.release(id, true, host);
    }

    /// Platform revoked the pointer; same as an end but never a tap.
    pub fn on_contact_cancel(&mut self, id: ContactId, host: &mut impl GestureHost) {
        self.release(id, false, host);
    }

    fn release(&mut self, id: ContactId, may_select: bool, host: &mut impl GestureHost) {
        if !self.contacts.remove(id) {
            return;
        }
        if may_select && !self.moved && !self.selected {
            self.selected = true;
            host.select();
        }
        self.reanchor();
        if self.contacts.is_empty() {
            host.settled(&self.transform);
        }
    }

    fn reanchor(&mut self) {
        self.phase = match self.contacts.len() {
            0 => Phase::Idle,
            1 => match self.contacts.first() {
                Some(anchor) => Phase::Dragging(DragAnchor {
                    anchor,
                    element_x: self.transform.x,
                    element_y: self.transform.y,
                }),
                None => Phase::Idle,
            },
            2 => match self.contacts.pair() {
                Some((a, b)) => Phase::Transforming(PinchAnchor::new(a, b, self.transform)),
                None => Phase::Idle,
            },
            _ => Phase::Saturated,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        next_z: i32,
        changes: Vec<Transform>,
        selects: usize,
        settled: Vec<Transform>,
    }

    impl GestureHost for RecordingHost {
        fn bring_to_front(&mut self) -> i32 {
            self.next_z += 1;
            self.next_z
        }

        fn transform_changed(&mut self, transform: &Transform) {
            self.changes.push(*transform);
        }

        fn select(&mut self) {
            self.selects += 1;
        }

        fn settled(&mut self, transform: &Transform) {
            self.settled.push(*transform);
        }
    }

    fn at(x: f64, y: f64) -> Transform {
        Transform {
            x,
            y,
            rotation: 0.0,
            scale: 1.0,
            z: 0,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn contact_count_tracks_starts_and_ends() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 0.0, 0.0, &mut host);
        engine.on_contact_start(2, 10.0, 0.0, &mut host);
        engine.on_contact_start(2, 12.0, 0.0, &mut host);
        assert_eq!(engine.contacts().len(), 2);
        engine.on_contact_end(1, &mut host);
        engine.on_contact_cancel(2, &mut host);
        engine.on_contact_end(2, &mut host);
        engine.on_contact_end(7, &mut host);
        assert!(engine.contacts().is_empty());
        assert_eq!(engine.phase(), GesturePhase::Idle);
    }

    #[test]
    fn single_contact_drag_is_pure_translation() {
        let mut engine = GestureEngine::new(Transform {
            rotation: 12.0,
            scale: 1.3,
            ..at(50.0, 50.0)
        });
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 10.0, 10.0, &mut host);
        engine.on_contact_move(1, 15.0, 13.0, &mut host);
        let t = engine.transform();
        assert_eq!((t.x, t.y), (55.0, 53.0));
        assert_eq!(t.rotation, 12.0);
        assert_eq!(t.scale, 1.3);
        assert_eq!(engine.phase(), GesturePhase::Dragging);
    }

    #[test]
    fn start_raises_and_reports_stacking_index() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost {
            next_z: 41,
            ..Default::default()
        };
        engine.on_contact_start(1, 0.0, 0.0, &mut host);
        assert_eq!(engine.transform().z, 42);
        assert_eq!(host.changes.last().map(|t| t.z), Some(42));
    }

    #[test]
    fn move_of_unknown_contact_is_ignored() {
        let mut engine = GestureEngine::new(at(5.0, 5.0));
        let mut host = RecordingHost::default();
        engine.on_contact_move(9, 100.0, 100.0, &mut host);
        assert!(host.changes.is_empty());
        assert_eq!(engine.transform(), at(5.0, 5.0));
    }

    #[test]
    fn pinch_scales_relative_to_anchor_and_clamps() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 100.0, 0.0, &mut host);
        engine.on_contact_start(2, 0.0, 0.0, &mut host);
        assert_eq!(engine.phase(), GesturePhase::Transforming);

        engine.on_contact_move(1, 150.0, 0.0, &mut host);
        assert!(close(engine.transform().scale, 1.5));
        assert!(close(engine.transform().rotation, 0.0));

        engine.on_contact_move(1, 10.0, 0.0, &mut host);
        assert_eq!(engine.transform().scale, 0.5);

        engine.on_contact_move(1, 1000.0, 0.0, &mut host);
        assert_eq!(engine.transform().scale, 2.5);

        let t = engine.transform();
        assert_eq!((t.x, t.y), (0.0, 0.0));
    }

    #[test]
    fn rotation_adds_angle_delta_regardless_of_scale() {
        let mut engine = GestureEngine::new(Transform {
            rotation: 10.0,
            ..at(0.0, 0.0)
        });
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 100.0, 0.0, &mut host);
        engine.on_contact_start(2, 0.0, 0.0, &mut host);
        let rad = 30f64.to_radians();
        engine.on_contact_move(1, 200.0 * rad.cos(), 200.0 * rad.sin(), &mut host);
        let t = engine.transform();
        assert!(close(t.rotation, 40.0));
        assert!(close(t.scale, 2.0));
    }

    #[test]
    fn rotation_stays_continuous_across_atan2_wrap() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        // First contact left of the second: initial angle is 180 degrees.
        engine.on_contact_start(1, -100.0, 0.0, &mut host);
        engine.on_contact_start(2, 0.0, 0.0, &mut host);
        let rad = 170f64.to_radians();
        engine.on_contact_move(1, 100.0 * rad.cos(), 100.0 * rad.sin(), &mut host);
        assert!(close(engine.transform().rotation, -10.0));
        let rad = (-170f64).to_radians();
        engine.on_contact_move(1, 100.0 * rad.cos(), 100.0 * rad.sin(), &mut host);
        assert!(close(engine.transform().rotation, 10.0));
    }

    #[test]
    fn second_pinch_session_anchors_on_current_transform() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 100.0, 0.0, &mut host);
        engine.on_contact_start(2, 0.0, 0.0, &mut host);
        engine.on_contact_move(1, 200.0, 0.0, &mut host);
        engine.on_contact_end(1, &mut host);
        engine.on_contact_end(2, &mut host);
        assert!(close(engine.transform().scale, 2.0));

        engine.on_contact_start(3, 0.0, 0.0, &mut host);
        engine.on_contact_start(4, 0.0, 100.0, &mut host);
        engine.on_contact_move(4, 0.0, 110.0, &mut host);
        assert!(close(engine.transform().scale, 2.2));
    }

    #[test]
    fn tap_selects_exactly_once() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 10.0, 10.0, &mut host);
        engine.on_contact_move(1, 13.0, 12.0, &mut host);
        engine.on_contact_end(1, &mut host);
        assert_eq!(host.selects, 1);
        assert_eq!(host.settled.len(), 1);
    }

    #[test]
    fn drag_past_slop_never_selects() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 10.0, 10.0, &mut host);
        engine.on_contact_move(1, 16.0, 10.0, &mut host);
        engine.on_contact_move(1, 10.0, 10.0, &mut host);
        engine.on_contact_end(1, &mut host);
        assert!(engine.moved);
        assert_eq!(host.selects, 0);
    }

    #[test]
    fn two_finger_tap_selects_once_per_session() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 0.0, 0.0, &mut host);
        engine.on_contact_start(2, 40.0, 0.0, &mut host);
        engine.on_contact_end(1, &mut host);
        engine.on_contact_end(2, &mut host);
        assert_eq!(host.selects, 1);

        engine.on_contact_start(3, 0.0, 0.0, &mut host);
        engine.on_contact_end(3, &mut host);
        assert_eq!(host.selects, 2);
    }

    #[test]
    fn cancel_never_selects() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 10.0, 10.0, &mut host);
        engine.on_contact_cancel(1, &mut host);
        assert_eq!(host.selects, 0);
        assert!(engine.contacts().is_empty());
        assert_eq!(host.settled.len(), 1);
    }

    #[test]
    fn pinch_to_drag_handoff_does_not_jump() {
        let mut engine = GestureEngine::new(at(50.0, 50.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 10.0, 10.0, &mut host);
        engine.on_contact_move(1, 30.0, 10.0, &mut host);
        engine.on_contact_start(2, 130.0, 10.0, &mut host);
        engine.on_contact_move(2, 150.0, 10.0, &mut host);
        let before = engine.transform();
        assert_eq!((before.x, before.y), (70.0, 50.0));

        engine.on_contact_end(2, &mut host);
        assert_eq!(engine.phase(), GesturePhase::Dragging);
        engine.on_contact_move(1, 30.0, 10.0, &mut host);
        let after = engine.transform();
        assert_eq!((after.x, after.y), (before.x, before.y));

        engine.on_contact_move(1, 35.0, 20.0, &mut host);
        let t = engine.transform();
        assert_eq!((t.x, t.y), (75.0, 60.0));
    }

    #[test]
    fn cancelled_pinch_contact_hands_off_to_drag() {
        let mut engine = GestureEngine::new(at(50.0, 50.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 10.0, 10.0, &mut host);
        engine.on_contact_start(2, 110.0, 10.0, &mut host);
        engine.on_contact_move(2, 160.0, 10.0, &mut host);
        assert!(close(engine.transform().scale, 1.5));
        let before = engine.transform();

        engine.on_contact_cancel(2, &mut host);
        assert_eq!(engine.phase(), GesturePhase::Dragging);
        engine.on_contact_move(1, 10.0, 10.0, &mut host);
        let after = engine.transform();
        assert_eq!((after.x, after.y), (before.x, before.y));

        engine.on_contact_move(1, 15.0, 13.0, &mut host);
        let t = engine.transform();
        assert_eq!((t.x, t.y), (55.0, 53.0));
        assert!(close(t.scale, 1.5));

        engine.on_contact_end(1, &mut host);
        assert_eq!(host.selects, 0);
    }

    #[test]
    fn extra_finger_tap_after_drag_does_not_select() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 10.0, 10.0, &mut host);
        engine.on_contact_move(1, 30.0, 10.0, &mut host);
        // Second finger lands and lifts without moving; the session already moved.
        engine.on_contact_start(2, 80.0, 80.0, &mut host);
        engine.on_contact_end(2, &mut host);
        assert_eq!(host.selects, 0);
        engine.on_contact_end(1, &mut host);
        assert_eq!(host.selects, 0);

        // A fresh session starts with a clean slate.
        engine.on_contact_start(3, 0.0, 0.0, &mut host);
        engine.on_contact_end(3, &mut host);
        assert_eq!(host.selects, 1);
    }

    #[test]
    fn zero_distance_pinch_never_produces_nan() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 20.0, 20.0, &mut host);
        engine.on_contact_start(2, 20.0, 20.0, &mut host);
        engine.on_contact_move(1, 20.0, 20.0, &mut host);
        assert_eq!(engine.transform().scale, 1.0);

        engine.on_contact_move(1, 70.0, 20.0, &mut host);
        assert_eq!(engine.transform().scale, 1.0);
        engine.on_contact_move(1, 120.0, 20.0, &mut host);
        let t = engine.transform();
        assert!(t.scale.is_finite() && t.rotation.is_finite());
        assert!(close(t.scale, 2.0));
        assert!(close(t.rotation, 0.0));
    }

    #[test]
    fn third_contact_is_tracked_without_effect() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 100.0, 0.0, &mut host);
        engine.on_contact_start(2, 0.0, 0.0, &mut host);
        engine.on_contact_move(1, 200.0, 0.0, &mut host);
        engine.on_contact_start(3, 50.0, 50.0, &mut host);
        assert_eq!(engine.phase(), GesturePhase::Saturated);
        let frozen = engine.transform();
        engine.on_contact_move(1, 400.0, 0.0, &mut host);
        engine.on_contact_move(3, 90.0, 90.0, &mut host);
        assert_eq!(engine.transform(), frozen);
    }

    #[test]
    fn leaving_saturation_anchors_on_remaining_pair() {
        let mut engine = GestureEngine::new(at(0.0, 0.0));
        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 100.0, 0.0, &mut host);
        engine.on_contact_start(2, 0.0, 0.0, &mut host);
        engine.on_contact_start(3, 0.0, 50.0, &mut host);
        engine.on_contact_end(1, &mut host);
        assert_eq!(engine.phase(), GesturePhase::Transforming);

        // Remaining pair is (2, 3), 50 px apart.
        engine.on_contact_move(3, 0.0, 100.0, &mut host);
        assert!(close(engine.transform().scale, 2.0));
        assert!(close(engine.transform().rotation, 0.0));
    }

    #[test]
    fn reposition_keeps_scale_and_stacking() {
        let mut engine = GestureEngine::new(Transform {
            scale: 1.7,
            z: 9,
            ..at(0.0, 0.0)
        });
        engine.reposition(300.0, 120.0, -15.0);
        let t = engine.transform();
        assert_eq!((t.x, t.y, t.rotation), (300.0, 120.0, -15.0));
        assert_eq!((t.scale, t.z), (1.7, 9));

        let mut host = RecordingHost::default();
        engine.on_contact_start(1, 0.0, 0.0, &mut host);
        engine.on_contact_move(1, 10.0, 0.0, &mut host);
        assert_eq!(engine.transform().x, 310.0);
    }
}
