// Preview camera used when no headset drives the view
use glam::{Mat4, Vec2, Vec3};

#[derive(Debug, Clone)]
pub struct PreviewCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PreviewCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 5.0),
            target: Vec3::ZERO,
            fov_y_deg: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PreviewCamera {
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        let proj =
            Mat4::perspective_rh_gl(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }

    /// World-space ray through a point in normalized device coordinates.
    pub fn ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(ndc.extend(-1.0));
        let far = inv.project_point3(ndc.extend(1.0));
        (near, (far - near).normalize())
    }

    /// Screen position in pixels, or `None` behind the camera.
    pub fn project(&self, world: Vec3, width: f64, height: f64) -> Option<(f64, f64)> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 1e-4 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x as f64 * 0.5 + 0.5) * width;
        let y = (1.0 - (ndc.y as f64 * 0.5 + 0.5)) * height;
        Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn centre_ray_points_at_target() {
        let cam = PreviewCamera::default();
        let (origin, dir) = cam.ray(Vec2::ZERO);
        let expected = (cam.target - cam.eye).normalize();
        assert_relative_eq!(dir.dot(expected), 1.0, epsilon = 1e-4);
        assert!(origin.distance(cam.eye) < 0.2);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let mut cam = PreviewCamera::default();
        cam.set_viewport(800.0, 600.0);
        let (x, y) = cam.project(cam.target, 800.0, 600.0).unwrap();
        assert_relative_eq!(x, 400.0, epsilon = 1e-2);
        assert_relative_eq!(y, 300.0, epsilon = 1e-2);
    }

    #[test]
    fn points_behind_the_eye_do_not_project() {
        let cam = PreviewCamera::default();
        assert!(cam.project(Vec3::new(0.0, 2.0, 10.0), 800.0, 600.0).is_none());
    }
}
