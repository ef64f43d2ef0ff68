//! Wireframe preview of the scene on a 2D canvas.

use glam::{Mat4, Vec3};
use web_sys::CanvasRenderingContext2d;

use crate::model::{AssetKind, ObjectHandle};
use crate::scene::{SceneGraph, SceneService};
use crate::state::PreviewCamera;

const RETICLE_INNER: f32 = 0.15;
const RETICLE_OUTER: f32 = 0.2;
const RETICLE_SEGMENTS: usize = 32;

const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

#[rustfmt::skip]
const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

pub fn draw(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    camera: &PreviewCamera,
    scene: &SceneGraph,
    active: Option<ObjectHandle>,
) {
    ctx.set_fill_style_str("#0d1117");
    ctx.fill_rect(0.0, 0.0, width, height);

    let line = |a: Vec3, b: Vec3| {
        if let (Some(p), Some(q)) = (
            camera.project(a, width, height),
            camera.project(b, width, height),
        ) {
            ctx.move_to(p.0, p.1);
            ctx.line_to(q.0, q.1);
        }
    };

    // floor grid
    ctx.set_stroke_style_str("#21262d");
    ctx.set_line_width(1.0);
    ctx.begin_path();
    for i in -5..=5 {
        let f = i as f32;
        line(Vec3::new(f, 0.0, -5.0), Vec3::new(f, 0.0, 5.0));
        line(Vec3::new(-5.0, 0.0, f), Vec3::new(5.0, 0.0, f));
    }
    ctx.stroke();

    let reticle = scene.reticle();
    if reticle.visible {
        ctx.set_stroke_style_str("#e6edf3");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let m = reticle.pose.matrix();
        for radius in [RETICLE_INNER, RETICLE_OUTER] {
            for (a, b) in ring(radius) {
                line(m.transform_point3(a), m.transform_point3(b));
            }
        }
        ctx.stroke();
    }

    for (handle, node) in scene.nodes() {
        let color = if Some(handle) == active {
            "#58a6ff"
        } else {
            "#8b949e"
        };
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let m = node.transform.matrix();
        match node.kind {
            AssetKind::Model => {
                for (a, b) in CUBE_EDGES {
                    line(
                        m.transform_point3(CUBE_CORNERS[a]),
                        m.transform_point3(CUBE_CORNERS[b]),
                    );
                }
            }
            AssetKind::Image => {
                let quad = plane_corners(node.aspect, m);
                for i in 0..4 {
                    line(quad[i], quad[(i + 1) % 4]);
                }
            }
        }
        ctx.stroke();
    }
}

/// Ring segments lying flat on the pose's XZ plane.
fn ring(radius: f32) -> impl Iterator<Item = (Vec3, Vec3)> {
    let point = move |i: usize| {
        let a = i as f32 / RETICLE_SEGMENTS as f32 * std::f32::consts::TAU;
        Vec3::new(a.cos() * radius, 0.0, a.sin() * radius)
    };
    (0..RETICLE_SEGMENTS).map(move |i| (point(i), point(i + 1)))
}

/// Unit-height plane in the XY plane, widened by the image aspect.
fn plane_corners(aspect: f32, m: Mat4) -> [Vec3; 4] {
    let hw = 0.5 * aspect;
    [
        Vec3::new(-hw, -0.5, 0.0),
        Vec3::new(hw, -0.5, 0.0),
        Vec3::new(hw, 0.5, 0.0),
        Vec3::new(-hw, 0.5, 0.0),
    ]
    .map(|p| m.transform_point3(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ring_closes_on_itself() {
        let segments: Vec<_> = ring(0.2).collect();
        assert_eq!(segments.len(), RETICLE_SEGMENTS);
        let (first, _) = segments[0];
        let (_, last) = segments[RETICLE_SEGMENTS - 1];
        assert_relative_eq!(first.distance(last), 0.0, epsilon = 1e-5);
        assert!(segments.iter().all(|(a, _)| a.y == 0.0));
    }

    #[test]
    fn plane_width_follows_aspect() {
        let quad = plane_corners(2.0, Mat4::IDENTITY);
        assert_relative_eq!(quad[1].x - quad[0].x, 2.0);
        assert_relative_eq!(quad[2].y - quad[1].y, 1.0);
    }
}
