//! Core data types for the AR placement demo.
//! Poses and transforms use `glam`; everything the UI persists is serde-friendly.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an asset in the manifest and the name of its placed instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// glTF scene cloned as a 3D object.
    Model,
    /// Texture shown on a unit plane.
    Image,
}

impl AssetKind {
    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Model => "Model",
            AssetKind::Image => "Image",
        }
    }
}

/// Rigid pose reported by a hit-test, kept as the raw column-major matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose(pub Mat4);

impl Pose {
    pub const IDENTITY: Pose = Pose(Mat4::IDENTITY);

    pub fn from_translation(position: Vec3) -> Self {
        Self(Mat4::from_translation(position))
    }

    /// Translation column of the pose matrix.
    pub fn position(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    pub fn matrix(&self) -> Mat4 {
        self.0
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Position, Euler rotation (radians, XYZ order) and uniform scale of a placed object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

/// Handle into the scene's object registry. Holding one does not keep the object alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitResult {
    pub pose: Pose,
}

/// One touch contact in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub pointer_id: i32,
    pub x: f32,
    pub y: f32,
}

impl Contact {
    pub fn new(pointer_id: i32, x: f32, y: f32) -> Self {
        Self { pointer_id, x, y }
    }

    pub fn distance_to(&self, other: &Contact) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pose_position_reads_translation_column() {
        let mut m = Mat4::IDENTITY.to_cols_array();
        m[12] = 1.5;
        m[13] = -0.25;
        m[14] = 3.0;
        let pose = Pose(Mat4::from_cols_array(&m));
        assert_eq!(pose.position(), Vec3::new(1.5, -0.25, 3.0));
    }

    #[test]
    fn transform_matrix_applies_uniform_scale_then_translation() {
        let t = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Vec3::ZERO,
            scale: 0.5,
        };
        let p = t.matrix().transform_point3(Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 1.0);
        assert_relative_eq!(p.z, 1.0);
    }

    #[test]
    fn contact_distance_is_euclidean() {
        let a = Contact::new(0, 0.0, 0.0);
        let b = Contact::new(1, 60.0, 80.0);
        assert_relative_eq!(a.distance_to(&b), 100.0);
    }
}
