//! Free-look camera.
//!
//! Yaw/pitch orientation with a derived orthonormal basis, WASD-style
//! planar movement, scroll-driven field-of-view zoom. Angles are stored
//! in degrees and converted at the trigonometry boundary.

use glam::{Mat4, Vec3};

const WORLD_UP: Vec3 = Vec3::Y;
const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 2.0, 12.0);
const DEFAULT_YAW: f32 = -90.0; // Looking along -Z
const DEFAULT_PITCH: f32 = -15.0;
const DEFAULT_MOVEMENT_SPEED: f32 = 8.0;
const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.1;
const DEFAULT_ZOOM: f32 = 45.0;
const PITCH_LIMIT: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 45.0;

// Reset deliberately uses a different pose than construction: level view
// from closer in, so `R` frames the scene head-on.
const RESET_POSITION: Vec3 = Vec3::new(0.0, 0.0, 8.0);
const RESET_PITCH: f32 = 0.0;

/// Discrete movement directions delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-flying observer camera.
pub struct Camera {
    position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,
}

impl Camera {
    pub fn new() -> Self {
        let mut camera = Self {
            position: DEFAULT_POSITION,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: WORLD_UP,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_basis();
        camera
    }

    /// Moves along the chosen direction for one tick. Horizontal
    /// directions have their vertical component zeroed before
    /// normalizing, so pitched flight never changes altitude.
    pub fn process_movement(&mut self, direction: Movement, delta_time: f32) {
        let mut move_dir = match direction {
            Movement::Forward => self.front,
            Movement::Backward => -self.front,
            Movement::Left => -self.right,
            Movement::Right => self.right,
            Movement::Up => WORLD_UP,
            Movement::Down => -WORLD_UP,
        };

        if !matches!(direction, Movement::Up | Movement::Down) {
            move_dir.y = 0.0;
        }
        move_dir = move_dir.normalize_or_zero();

        self.position += move_dir * self.movement_speed * delta_time;
    }

    /// Applies a mouse delta to yaw/pitch. Pitch clamps to ±89° to avoid
    /// gimbal lock; yaw wraps implicitly through trig periodicity.
    pub fn process_look(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch =
            (self.pitch + y_offset * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    /// Scroll up narrows the field of view (zooms in).
    pub fn process_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Restores the fixed reset pose. Zoom is untouched.
    pub fn reset(&mut self) {
        self.position = RESET_POSITION;
        self.yaw = DEFAULT_YAW;
        self.pitch = RESET_PITCH;
        self.update_basis();
    }

    fn update_basis(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();

        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view in degrees; the projection is built from this and
    /// the viewport aspect ratio.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
