//! Per-frame uniform assembly.
//!
//! Reads camera and black-hole state once per frame and packs it into a
//! single std140-friendly uniform block consumed by both the lensing
//! fragment pass and the particle vertex pass.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::black_hole::BlackHole;
use crate::camera::Camera;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

/// GPU-side frame parameters. Vec3 fields carry a fourth padding float
/// to satisfy uniform buffer alignment.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub black_hole_position: [f32; 4],
    /// [mass, event_horizon_radius, disk_inner_radius, disk_outer_radius]
    pub black_hole_params: [f32; 4],
    /// [elapsed_seconds, 0, 0, 0]
    pub time: [f32; 4],
}

impl FrameUniforms {
    /// Snapshot of the simulation state for one frame. The projection is
    /// derived here from the camera's field of view and the viewport
    /// aspect ratio.
    pub fn build(camera: &Camera, body: &BlackHole, aspect_ratio: f32, elapsed: f32) -> Self {
        let projection = Mat4::perspective_rh(
            camera.zoom().to_radians(),
            aspect_ratio,
            NEAR_PLANE,
            FAR_PLANE,
        );
        let camera_position = camera.position();
        let body_position = body.position();

        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            camera_position: [camera_position.x, camera_position.y, camera_position.z, 0.0],
            black_hole_position: [body_position.x, body_position.y, body_position.z, 0.0],
            black_hole_params: [
                body.mass(),
                body.event_horizon_radius(),
                body.disk_inner_radius(),
                body.disk_outer_radius(),
            ],
            time: [elapsed, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_uniforms_reflect_body_geometry() {
        let camera = Camera::new();
        let body = BlackHole::new(Vec3::new(1.0, 0.0, -2.0), 4.0);
        let uniforms = FrameUniforms::build(&camera, &body, 16.0 / 9.0, 3.5);

        assert_eq!(uniforms.black_hole_position, [1.0, 0.0, -2.0, 0.0]);
        assert_eq!(uniforms.black_hole_params[0], 4.0);
        assert_eq!(uniforms.black_hole_params[1], body.event_horizon_radius());
        assert_eq!(uniforms.black_hole_params[2], body.disk_inner_radius());
        assert_eq!(uniforms.black_hole_params[3], body.disk_outer_radius());
        assert_eq!(uniforms.time[0], 3.5);
    }

    #[test]
    fn test_uniform_block_is_finite() {
        let camera = Camera::new();
        let body = BlackHole::new(Vec3::ZERO, 4.0);
        let uniforms = FrameUniforms::build(&camera, &body, 4.0 / 3.0, 0.0);

        for row in &uniforms.view {
            assert!(row.iter().all(|v| v.is_finite()));
        }
        for row in &uniforms.projection {
            assert!(row.iter().all(|v| v.is_finite()));
        }
    }
}
