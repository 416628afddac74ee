use approx::assert_relative_eq;
use blackhole_renderer::black_hole::BlackHole;
use glam::Vec3;

#[test]
fn test_derived_radii_for_positive_masses() {
    for mass in [0.5, 1.0, 4.0, 100.0] {
        let body = BlackHole::new(Vec3::ZERO, mass);
        assert!(body.event_horizon_radius() > 0.0);
        assert_relative_eq!(body.disk_inner_radius(), 3.0 * body.event_horizon_radius());
        assert_relative_eq!(
            body.disk_outer_radius(),
            body.disk_inner_radius() * 8.0 / 3.0,
            max_relative = 1e-6
        );
        assert!(body.disk_inner_radius() < body.disk_outer_radius());
    }
}

#[test]
fn test_zero_mass_yields_degenerate_geometry() {
    let body = BlackHole::new(Vec3::ZERO, 0.0);
    assert_eq!(body.event_horizon_radius(), 0.0);
    assert_eq!(body.disk_inner_radius(), 0.0);
    assert_eq!(body.disk_outer_radius(), 0.0);
}

#[test]
fn test_gravity_is_monotonically_decreasing() {
    let body = BlackHole::new(Vec3::ZERO, 4.0);
    let mut previous = f32::MAX;
    for step in 1..50 {
        let distance = step as f32 * 0.5;
        let magnitude = body.gravity_magnitude(Vec3::new(distance, 0.0, 0.0));
        assert!(magnitude < previous, "gravity must fall with distance");
        previous = magnitude;
    }
}

#[test]
fn test_gravity_direction_points_at_body() {
    let body = BlackHole::new(Vec3::new(0.0, 0.0, 0.0), 4.0);
    let direction = body.gravity_direction(Vec3::new(3.0, 0.0, 0.0));
    assert_relative_eq!(direction.x, -1.0, epsilon = 1e-6);
    assert_relative_eq!(direction.length(), 1.0, epsilon = 1e-6);
}

#[test]
fn test_disk_temperature_is_linear() {
    let body = BlackHole::new(Vec3::ZERO, 4.0);
    let inner = body.disk_inner_radius();
    let outer = body.disk_outer_radius();

    assert_relative_eq!(body.disk_temperature(inner), 10000.0);
    assert_relative_eq!(body.disk_temperature(outer), 3000.0);

    let quarter = inner + 0.25 * (outer - inner);
    assert_relative_eq!(body.disk_temperature(quarter), 8250.0, max_relative = 1e-4);

    // Extrapolates without clamping beyond the disk bounds.
    assert!(body.disk_temperature(outer * 2.0) < 3000.0);
    assert!(body.disk_temperature(inner * 0.5) > 10000.0);
}

#[test]
fn test_accretion_disk_membership() {
    let body = BlackHole::new(Vec3::ZERO, 4.0);
    let inner = body.disk_inner_radius();
    let outer = body.disk_outer_radius();
    let mid = (inner + outer) / 2.0;

    assert!(body.is_inside_accretion_disk(Vec3::new(mid, 0.0, 0.0)));
    assert!(body.is_inside_accretion_disk(Vec3::new(0.0, 0.05 * inner, mid)));
    assert!(!body.is_inside_accretion_disk(Vec3::new(inner * 0.5, 0.0, 0.0)));
    assert!(!body.is_inside_accretion_disk(Vec3::new(outer * 1.5, 0.0, 0.0)));
    assert!(!body.is_inside_accretion_disk(Vec3::new(mid, 0.2 * inner, 0.0)));
}

#[test]
fn test_redshift_far_from_body_approaches_unity() {
    let body = BlackHole::new(Vec3::ZERO, 4.0);
    let factor = body.redshift_factor(
        Vec3::new(500.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 600.0),
    );
    assert!(factor.is_finite());
    assert_relative_eq!(factor, 1.0, epsilon = 1e-2);
}

#[test]
fn test_redshift_source_near_horizon_exceeds_unity() {
    let body = BlackHole::new(Vec3::ZERO, 4.0);
    let rs = body.event_horizon_radius();
    let factor = body.redshift_factor(
        Vec3::new(100.0 * rs, 0.0, 0.0),
        Vec3::new(1.1 * rs, 0.0, 0.0),
    );
    assert!(factor.is_finite());
    assert!(factor > 1.0);
}

#[test]
fn test_redshift_inside_horizon_is_non_finite() {
    // The model does not guard this edge; callers check before display.
    let body = BlackHole::new(Vec3::ZERO, 4.0);
    let rs = body.event_horizon_radius();
    let factor = body.redshift_factor(
        Vec3::new(10.0 * rs, 0.0, 0.0),
        Vec3::new(0.5 * rs, 0.0, 0.0),
    );
    assert!(!factor.is_finite());
}

#[test]
fn test_set_mass_round_trip() {
    let mut body = BlackHole::new(Vec3::ZERO, 2.0);
    body.set_mass(9.0);
    let fresh = BlackHole::new(Vec3::ZERO, 9.0);

    assert_eq!(body.event_horizon_radius(), fresh.event_horizon_radius());
    assert_eq!(body.disk_inner_radius(), fresh.disk_inner_radius());
    assert_eq!(body.disk_outer_radius(), fresh.disk_outer_radius());
}
