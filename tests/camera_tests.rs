use approx::assert_relative_eq;
use blackhole_renderer::camera::{Camera, Movement};

#[test]
fn test_pitch_clamps_at_89_degrees() {
    let mut camera = Camera::new();

    // Sensitivity is 0.1, so this is a +2000 degree request.
    camera.process_look(0.0, 20000.0);
    assert_eq!(camera.pitch(), 89.0);

    camera.process_look(0.0, 500.0);
    assert_eq!(camera.pitch(), 89.0);

    camera.process_look(0.0, -50000.0);
    assert_eq!(camera.pitch(), -89.0);
}

#[test]
fn test_zoom_clamps_at_both_ends() {
    let mut camera = Camera::new();
    assert_eq!(camera.zoom(), 45.0);

    camera.process_scroll(10.0);
    assert_eq!(camera.zoom(), 35.0);

    // Large zoom-in clamps at the minimum, never goes negative.
    camera.process_scroll(100.0);
    assert_eq!(camera.zoom(), 1.0);

    // Zooming back out stops at the default maximum.
    camera.process_scroll(-100.0);
    assert_eq!(camera.zoom(), 45.0);
}

#[test]
fn test_horizontal_movement_keeps_altitude_when_pitched() {
    let mut camera = Camera::new();
    camera.process_look(0.0, -400.0); // Pitch steeply downward
    assert!(camera.pitch() < -30.0);

    let altitude = camera.position().y;
    camera.process_movement(Movement::Forward, 1.0);
    camera.process_movement(Movement::Left, 0.5);
    camera.process_movement(Movement::Backward, 0.25);

    assert_eq!(camera.position().y, altitude);
}

#[test]
fn test_vertical_movement_uses_world_axis() {
    let mut camera = Camera::new();
    let start = camera.position();

    camera.process_movement(Movement::Up, 1.0);
    let after_up = camera.position();
    assert!(after_up.y > start.y);
    assert_eq!(after_up.x, start.x);
    assert_eq!(after_up.z, start.z);

    camera.process_movement(Movement::Down, 1.0);
    assert_relative_eq!(camera.position().y, start.y, epsilon = 1e-5);
}

#[test]
fn test_basis_stays_orthonormal_after_look() {
    let mut camera = Camera::new();
    camera.process_look(1234.0, -567.0);

    assert_relative_eq!(camera.front().length(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(camera.right().length(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(camera.up().length(), 1.0, epsilon = 1e-5);

    assert_relative_eq!(camera.front().dot(camera.right()), 0.0, epsilon = 1e-5);
    assert_relative_eq!(camera.front().dot(camera.up()), 0.0, epsilon = 1e-5);
    assert_relative_eq!(camera.right().dot(camera.up()), 0.0, epsilon = 1e-5);

    // Right-handed: right x up should point opposite front.
    let cross = camera.right().cross(camera.up());
    assert_relative_eq!(cross.dot(camera.front()), -1.0, epsilon = 1e-4);
}

#[test]
fn test_reset_uses_fixed_pose_and_keeps_zoom() {
    let mut camera = Camera::new();
    camera.process_movement(Movement::Forward, 3.0);
    camera.process_look(300.0, 100.0);
    camera.process_scroll(20.0);
    let zoom_before_reset = camera.zoom();

    camera.reset();

    // Reset pose differs from the construction pose on purpose.
    assert_eq!(camera.position(), glam::Vec3::new(0.0, 0.0, 8.0));
    assert_eq!(camera.yaw(), -90.0);
    assert_eq!(camera.pitch(), 0.0);
    assert_eq!(camera.zoom(), zoom_before_reset);

    let fresh = Camera::new();
    assert_ne!(camera.position(), fresh.position());
    assert_ne!(camera.pitch(), fresh.pitch());
}

#[test]
fn test_view_matrix_is_finite_and_not_identity() {
    let mut camera = Camera::new();
    camera.process_look(90.0, 45.0);
    let matrix = camera.view_matrix().to_cols_array_2d();

    let identity = glam::Mat4::IDENTITY.to_cols_array_2d();
    assert_ne!(matrix, identity);

    for row in &matrix {
        for &val in row {
            assert!(val.is_finite(), "View matrix contains non-finite values");
        }
    }
}
