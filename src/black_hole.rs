//! Gravitational body model.
//!
//! Schwarzschild-radius-derived geometry (event horizon, accretion disk
//! bounds) plus Newtonian gravity and a simplified redshift ratio. The
//! formulas are illustrative, not relativistically accurate.

use glam::Vec3;

/// Gravitational constant in simulation units, chosen so a mass of a few
/// units yields an event horizon of visible scale (`R_s = 0.3 * mass`).
pub const GRAVITATIONAL_CONSTANT: f32 = 0.15;
pub const SPEED_OF_LIGHT: f32 = 1.0;

const DISK_INNER_FACTOR: f32 = 3.0;
const DISK_OUTER_FACTOR: f32 = 8.0;
const GRAVITY_DISTANCE_EPSILON: f32 = 0.001;

/// Black hole with derived event-horizon and disk geometry.
///
/// The derived radii are recomputed synchronously whenever the mass
/// changes, so readers never observe stale geometry.
pub struct BlackHole {
    position: Vec3,
    mass: f32,
    event_horizon_radius: f32,
    disk_inner_radius: f32,
    disk_outer_radius: f32,
}

impl BlackHole {
    pub fn new(position: Vec3, mass: f32) -> Self {
        let mut body = Self {
            position,
            mass,
            event_horizon_radius: 0.0,
            disk_inner_radius: 0.0,
            disk_outer_radius: 0.0,
        };
        body.update_derived_properties();
        body
    }

    fn update_derived_properties(&mut self) {
        self.event_horizon_radius = schwarzschild_radius(self.mass);
        self.disk_inner_radius = self.event_horizon_radius * DISK_INNER_FACTOR;
        self.disk_outer_radius = self.event_horizon_radius * DISK_OUTER_FACTOR;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        self.update_derived_properties();
    }

    pub fn event_horizon_radius(&self) -> f32 {
        self.event_horizon_radius
    }

    pub fn disk_inner_radius(&self) -> f32 {
        self.disk_inner_radius
    }

    pub fn disk_outer_radius(&self) -> f32 {
        self.disk_outer_radius
    }

    /// Newtonian gravity magnitude `GM/r²` at `point`.
    ///
    /// Saturates to `f32::MAX` inside a small epsilon of the singularity
    /// instead of dividing by near-zero.
    pub fn gravity_magnitude(&self, point: Vec3) -> f32 {
        let distance = (self.position - point).length();
        if distance < GRAVITY_DISTANCE_EPSILON {
            return f32::MAX;
        }
        GRAVITATIONAL_CONSTANT * self.mass / (distance * distance)
    }

    /// Unit vector from `point` toward the body. Zero when `point`
    /// coincides with the body position.
    pub fn gravity_direction(&self, point: Vec3) -> Vec3 {
        (self.position - point).normalize_or_zero()
    }

    pub fn is_inside_event_horizon(&self, point: Vec3) -> bool {
        (self.position - point).length() < self.event_horizon_radius
    }

    /// Whether `point` sits within the disk annulus, with the vertical
    /// offset bounded by a tenth of the inner radius.
    pub fn is_inside_accretion_disk(&self, point: Vec3) -> bool {
        let relative = point - self.position;
        let radial = (relative.x * relative.x + relative.z * relative.z).sqrt();
        let height = relative.y.abs();
        let disk_half_height = 0.1 * self.disk_inner_radius;

        radial >= self.disk_inner_radius
            && radial <= self.disk_outer_radius
            && height <= disk_half_height
    }

    /// Disk temperature at a planar radius: linear from 10000K at the
    /// inner edge down to 3000K at the outer edge. Extrapolates outside
    /// the disk bounds; callers clamp if they need physical values.
    pub fn disk_temperature(&self, radial_distance: f32) -> f32 {
        let normalized = (radial_distance - self.disk_inner_radius)
            / (self.disk_outer_radius - self.disk_inner_radius);
        10000.0 - normalized * 7000.0
    }

    /// Simplified gravitational redshift ratio between an observer and a
    /// source. Non-finite when either radius is at or inside the event
    /// horizon; callers guard before display.
    pub fn redshift_factor(&self, observer_pos: Vec3, source_pos: Vec3) -> f32 {
        let r_observer = (observer_pos - self.position).length();
        let r_source = (source_pos - self.position).length();
        let rs = self.event_horizon_radius;

        ((1.0 - rs / r_observer) / (1.0 - rs / r_source)).sqrt()
    }

    pub fn status(&self) -> String {
        format!(
            "Black Hole - Mass: {:.2}, Event Horizon: {:.2}, Disk: [{:.2} - {:.2}]",
            self.mass, self.event_horizon_radius, self.disk_inner_radius, self.disk_outer_radius
        )
    }
}

/// `R_s = 2GM/c²`
fn schwarzschild_radius(mass: f32) -> f32 {
    (2.0 * GRAVITATIONAL_CONSTANT * mass) / (SPEED_OF_LIGHT * SPEED_OF_LIGHT)
}
