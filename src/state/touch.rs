// Touch/pinch gesture state machine, fed with the contacts of each touch event.
use crate::model::Contact;

/// Below this many pixels a finger distance is unusable for a zoom ratio.
const MIN_PINCH_DISTANCE: f32 = 1e-3;

/// Contacts of one event, sorted by how many fingers are down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactSet {
    Empty,
    Single(Contact),
    Pair(Contact, Contact),
    Many(usize),
}

pub fn classify(contacts: &[Contact]) -> ContactSet {
    match contacts {
        [] => ContactSet::Empty,
        [only] => ContactSet::Single(*only),
        [a, b] => ContactSet::Pair(*a, *b),
        more => ContactSet::Many(more.len()),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    SingleTouchTracking {
        last: Contact,
    },
    PinchTracking {
        baseline: f32,
    },
}

/// Transform change produced by one touch-move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureUpdate {
    Drag { dx: f32, dy: f32 },
    Zoom { factor: f32 },
}

#[derive(Default, Debug, Clone)]
pub struct TouchTracker {
    state: GestureState,
}

impl TouchTracker {
    #[cfg(test)]
    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn touch_start(&mut self, contacts: &[Contact]) {
        self.state = match classify(contacts) {
            ContactSet::Single(contact) => GestureState::SingleTouchTracking { last: contact },
            ContactSet::Pair(a, b) => GestureState::PinchTracking {
                baseline: a.distance_to(&b),
            },
            ContactSet::Empty | ContactSet::Many(_) => GestureState::Idle,
        };
    }

    /// Advances the state and returns the delta to apply, if this move continues a gesture.
    pub fn touch_move(&mut self, contacts: &[Contact]) -> Option<GestureUpdate> {
        match classify(contacts) {
            ContactSet::Single(current) => {
                let update = match self.state {
                    // a different finger means a fresh drag, not a jump
                    GestureState::SingleTouchTracking { last }
                        if last.pointer_id == current.pointer_id =>
                    {
                        Some(GestureUpdate::Drag {
                            dx: current.x - last.x,
                            dy: current.y - last.y,
                        })
                    }
                    _ => None,
                };
                self.state = GestureState::SingleTouchTracking { last: current };
                update
            }
            ContactSet::Pair(a, b) => {
                let distance = a.distance_to(&b);
                if distance <= MIN_PINCH_DISTANCE {
                    // fingers on top of each other: keep the last usable baseline
                    if !matches!(self.state, GestureState::PinchTracking { .. }) {
                        self.state = GestureState::PinchTracking { baseline: distance };
                    }
                    return None;
                }
                let update = match self.state {
                    GestureState::PinchTracking { baseline } if baseline > MIN_PINCH_DISTANCE => {
                        Some(GestureUpdate::Zoom {
                            factor: distance / baseline,
                        })
                    }
                    _ => None,
                };
                self.state = GestureState::PinchTracking { baseline: distance };
                update
            }
            ContactSet::Empty | ContactSet::Many(_) => {
                self.reset();
                None
            }
        }
    }

    pub fn touch_end(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn one(x: f32, y: f32) -> Vec<Contact> {
        vec![Contact::new(7, x, y)]
    }

    fn two(distance: f32) -> Vec<Contact> {
        vec![Contact::new(1, 0.0, 0.0), Contact::new(2, distance, 0.0)]
    }

    #[test]
    fn classify_by_cardinality() {
        assert_eq!(classify(&[]), ContactSet::Empty);
        assert!(matches!(classify(&one(1.0, 2.0)), ContactSet::Single(_)));
        assert!(matches!(classify(&two(5.0)), ContactSet::Pair(_, _)));
        let three = [Contact::new(1, 0.0, 0.0); 3];
        assert_eq!(classify(&three), ContactSet::Many(3));
    }

    #[test]
    fn single_drag_reports_delta_from_last_point() {
        let mut tracker = TouchTracker::default();
        tracker.touch_start(&one(100.0, 100.0));
        assert_eq!(
            tracker.touch_move(&one(110.0, 105.0)),
            Some(GestureUpdate::Drag { dx: 10.0, dy: 5.0 })
        );
        assert_eq!(
            tracker.touch_move(&one(110.0, 125.0)),
            Some(GestureUpdate::Drag { dx: 0.0, dy: 20.0 })
        );
    }

    #[test]
    fn first_move_after_end_has_no_stale_delta() {
        let mut tracker = TouchTracker::default();
        tracker.touch_start(&one(0.0, 0.0));
        tracker.touch_move(&one(10.0, 0.0));
        tracker.touch_end();
        assert_eq!(tracker.state(), GestureState::Idle);
        assert_eq!(tracker.touch_move(&one(300.0, 300.0)), None);
        assert!(matches!(
            tracker.state(),
            GestureState::SingleTouchTracking { .. }
        ));
    }

    #[test]
    fn pinch_rebases_every_frame() {
        let mut tracker = TouchTracker::default();
        tracker.touch_start(&two(100.0));
        match tracker.touch_move(&two(150.0)) {
            Some(GestureUpdate::Zoom { factor }) => assert_relative_eq!(factor, 1.5),
            other => panic!("expected zoom, got {other:?}"),
        }
        match tracker.touch_move(&two(180.0)) {
            Some(GestureUpdate::Zoom { factor }) => assert_relative_eq!(factor, 1.2),
            other => panic!("expected zoom, got {other:?}"),
        }
    }

    #[test]
    fn second_finger_switches_to_pinch_without_zoom() {
        let mut tracker = TouchTracker::default();
        tracker.touch_start(&one(0.0, 0.0));
        assert_eq!(tracker.touch_move(&two(80.0)), None);
        assert_eq!(
            tracker.state(),
            GestureState::PinchTracking { baseline: 80.0 }
        );
    }

    #[test]
    fn zero_baseline_rebases_instead_of_dividing() {
        let mut tracker = TouchTracker::default();
        tracker.touch_start(&two(0.0));
        assert_eq!(tracker.touch_move(&two(50.0)), None);
        assert!(tracker.touch_move(&two(100.0)).is_some());
    }

    #[test]
    fn collapsed_pinch_keeps_previous_baseline() {
        let mut tracker = TouchTracker::default();
        tracker.touch_start(&two(100.0));
        assert_eq!(tracker.touch_move(&two(0.0)), None);
        assert_eq!(
            tracker.state(),
            GestureState::PinchTracking { baseline: 100.0 }
        );
        match tracker.touch_move(&two(50.0)) {
            Some(GestureUpdate::Zoom { factor }) => assert_relative_eq!(factor, 0.5),
            other => panic!("expected zoom, got {other:?}"),
        }
    }

    #[test]
    fn three_contacts_or_none_go_idle() {
        let mut tracker = TouchTracker::default();
        tracker.touch_start(&two(100.0));
        let three = [Contact::new(1, 0.0, 0.0); 3];
        assert_eq!(tracker.touch_move(&three), None);
        assert_eq!(tracker.state(), GestureState::Idle);
        tracker.touch_start(&one(0.0, 0.0));
        assert_eq!(tracker.touch_move(&[]), None);
        assert_eq!(tracker.state(), GestureState::Idle);
    }

    #[test]
    fn finger_swap_does_not_jump() {
        let mut tracker = TouchTracker::default();
        tracker.touch_start(&[Contact::new(1, 0.0, 0.0)]);
        assert_eq!(tracker.touch_move(&[Contact::new(2, 200.0, 0.0)]), None);
    }
}
