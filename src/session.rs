//! Immersive session lifecycle and per-frame hit-testing.

use glam::{Vec2, Vec3};

use crate::model::{HitResult, Pose};
use crate::state::PreviewCamera;

/// Half-width of the square floor patch the preview session can hit.
const FLOOR_EXTENT: f32 = 5.0;

pub trait SessionService {
    fn start(&mut self);
    fn end(&mut self);
    fn is_active(&self) -> bool;
    /// Hit results for this frame, or `None` while no hit-test source is ready.
    fn hit_test(&mut self, timestamp: f64) -> Option<Vec<HitResult>>;
    /// Drops the hit-test source so the next session requests a new one.
    fn reset_hit_test(&mut self);
}

/// Hit-test source lifecycle: requested on the first frame, usable from the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HitTestSource {
    #[default]
    Unrequested,
    Requested,
    Ready,
}

/// Browser session without a headset: the viewer ray runs through the aim point
/// and hits the floor plane `y = 0`.
#[derive(Debug, Clone)]
pub struct PreviewSession {
    active: bool,
    source: HitTestSource,
    camera: PreviewCamera,
    /// Viewer ray target in NDC; the canvas centre until the pointer moves.
    aim: Vec2,
    viewport: Vec2,
}

impl PreviewSession {
    pub fn new(camera: PreviewCamera) -> Self {
        Self {
            active: false,
            source: HitTestSource::Unrequested,
            camera,
            aim: Vec2::ZERO,
            viewport: Vec2::ONE,
        }
    }

    pub fn camera(&self) -> &PreviewCamera {
        &self.camera
    }

    #[cfg(test)]
    pub fn source(&self) -> HitTestSource {
        self.source
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self.camera.set_viewport(width, height);
    }

    /// Aim at a canvas pixel.
    pub fn set_aim(&mut self, x: f32, y: f32) {
        self.aim = Vec2::new(
            x / self.viewport.x * 2.0 - 1.0,
            1.0 - y / self.viewport.y * 2.0,
        );
    }

    /// Back to the canvas centre once the pointer leaves the canvas.
    pub fn recenter_aim(&mut self) {
        self.aim = Vec2::ZERO;
    }

    fn floor_hit(&self) -> Option<HitResult> {
        let (origin, dir) = self.camera.ray(self.aim);
        if dir.y.abs() < 1e-6 {
            return None;
        }
        let t = -origin.y / dir.y;
        if t <= 0.0 {
            return None;
        }
        let point = origin + dir * t;
        if point.x.abs() > FLOOR_EXTENT || point.z.abs() > FLOOR_EXTENT {
            return None;
        }
        Some(HitResult {
            pose: Pose::from_translation(Vec3::new(point.x, 0.0, point.z)),
        })
    }
}

impl SessionService for PreviewSession {
    fn start(&mut self) {
        if !self.active {
            log::info!("preview session started");
        }
        self.active = true;
    }

    fn end(&mut self) {
        if self.active {
            log::info!("preview session ended");
        }
        self.active = false;
        self.reset_hit_test();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn hit_test(&mut self, _timestamp: f64) -> Option<Vec<HitResult>> {
        if !self.active {
            return None;
        }
        match self.source {
            HitTestSource::Unrequested => {
                self.source = HitTestSource::Requested;
                None
            }
            HitTestSource::Requested => {
                self.source = HitTestSource::Ready;
                Some(self.floor_hit().into_iter().collect())
            }
            HitTestSource::Ready => Some(self.floor_hit().into_iter().collect()),
        }
    }

    fn reset_hit_test(&mut self) {
        self.source = HitTestSource::Unrequested;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn started() -> PreviewSession {
        let mut session = PreviewSession::new(PreviewCamera::default());
        session.set_viewport(800.0, 600.0);
        session.start();
        session
    }

    #[test]
    fn inactive_session_yields_nothing() {
        let mut session = PreviewSession::new(PreviewCamera::default());
        assert_eq!(session.hit_test(0.0), None);
        assert_eq!(session.source(), HitTestSource::Unrequested);
    }

    #[test]
    fn source_is_requested_on_first_frame() {
        let mut session = started();
        assert_eq!(session.hit_test(16.0), None);
        assert_eq!(session.source(), HitTestSource::Requested);
        let hits = session.hit_test(32.0).unwrap();
        assert_eq!(session.source(), HitTestSource::Ready);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].pose.position().x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(hits[0].pose.position().z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn aiming_above_the_horizon_misses() {
        let mut session = started();
        session.hit_test(0.0);
        session.set_aim(400.0, 0.0);
        assert_eq!(session.hit_test(16.0), Some(Vec::new()));
    }

    #[test]
    fn recentred_aim_hits_the_floor_again() {
        let mut session = started();
        session.hit_test(0.0);
        session.set_aim(400.0, 0.0);
        assert_eq!(session.hit_test(16.0), Some(Vec::new()));
        session.recenter_aim();
        let hits = session.hit_test(32.0).unwrap();
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].pose.position().x, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn ending_resets_the_source() {
        let mut session = started();
        session.hit_test(0.0);
        session.hit_test(16.0);
        session.end();
        assert!(!session.is_active());
        assert_eq!(session.source(), HitTestSource::Unrequested);
        session.start();
        assert_eq!(session.hit_test(32.0), None);
    }
}
