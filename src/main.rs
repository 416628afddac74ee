//! Main entry point for the black-hole visualizer.
//!
//! Owns the window, the event loop, and per-frame sequencing: polled
//! movement keys and mouse deltas feed the camera, the disk advances by
//! the frame's delta time, and the resulting state is packed into the
//! frame uniforms before the renderer draws.
//!
//! # Controls
//! - W/A/S/D: horizontal movement, Space/Shift: up/down
//! - Left mouse drag: look around
//! - Mouse wheel: zoom (narrows field of view)
//! - R: reset camera pose and reseed the disk
//! - Q/Escape: exit

use anyhow::Result;
use blackhole_renderer::{
    black_hole::BlackHole,
    camera::{Camera, Movement},
    disk::AccretionDisk,
    gpu::GpuContext,
    uniforms::FrameUniforms,
    Renderer,
};
use clap::Parser;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

const DEFAULT_WINDOW_WIDTH: u32 = 1200;
const DEFAULT_WINDOW_HEIGHT: u32 = 800;
const STAR_COUNT: usize = 500;
const STAR_FIELD_EXTENT: f32 = 50.0;
const STATUS_LOG_INTERVAL: u32 = 120;

#[derive(Parser, Debug)]
#[command(name = "blackhole")]
#[command(about = "Interactive black hole visualization with an accretion disk")]
struct Args {
    /// Black hole mass in simulation units
    #[arg(long, default_value = "4.0")]
    mass: f32,

    /// Number of accretion disk particles
    #[arg(long, default_value = "500")]
    particles: usize,

    /// RNG seed for reproducible disk evolution
    #[arg(long)]
    seed: Option<u64>,
}

/// Movement key states, polled once per frame.
#[derive(Default)]
struct MovementKeys {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

struct ApplicationState {
    body: BlackHole,
    disk: AccretionDisk,
    camera: Camera,
    keys: MovementKeys,
    mouse_pressed: bool,
    last_mouse_pos: Option<PhysicalPosition<f64>>,
    start_time: Instant,
    last_update: Instant,
    frame_count: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let body = BlackHole::new(Vec3::ZERO, args.mass);
    let disk = match args.seed {
        Some(seed) => AccretionDisk::with_seed(&body, args.particles, seed),
        None => AccretionDisk::new(&body, args.particles),
    };
    log::info!("{}", body.status());
    log::info!("{}", disk.status());

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Black Hole - Gravitational Lensing")
        .with_inner_size(winit::dpi::PhysicalSize::new(
            DEFAULT_WINDOW_WIDTH,
            DEFAULT_WINDOW_HEIGHT,
        ))
        .build(&event_loop)?;

    let gpu = pollster::block_on(GpuContext::new())?;
    let mut renderer = Renderer::new(&window, &gpu)?;
    renderer.upload_stars(&gpu, &generate_starfield(args.seed));

    let now = Instant::now();
    let mut state = ApplicationState {
        body,
        disk,
        camera: Camera::new(),
        keys: MovementKeys::default(),
        mouse_pressed: false,
        last_mouse_pos: None,
        start_time: now,
        last_update: now,
        frame_count: 0,
    };

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::AboutToWait => {
                advance_frame(&mut state, &mut renderer, &gpu);
                window.request_redraw();
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(&gpu, physical_size);
                }
                WindowEvent::MouseInput { state: element_state, button, .. } => {
                    if button == MouseButton::Left {
                        state.mouse_pressed = element_state == ElementState::Pressed;
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    handle_cursor_moved(&mut state, position);
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let scroll_amount = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                    };
                    state.camera.process_scroll(scroll_amount);
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(code),
                            state: key_state,
                            ..
                        },
                    ..
                } => {
                    handle_key(&mut state, code, key_state, elwt);
                }
                WindowEvent::RedrawRequested => match renderer.render(&gpu) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(&gpu, window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(e) => log::error!("Render error: {:?}", e),
                },
                _ => {}
            },
            _ => {}
        }
    })?;

    Ok(())
}

/// Uniform-random background stars in a cube around the scene.
fn generate_starfield(seed: Option<u64>) -> Vec<Vec3> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..STAR_COUNT)
        .map(|_| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * STAR_FIELD_EXTENT,
                (rng.gen::<f32>() - 0.5) * STAR_FIELD_EXTENT,
                (rng.gen::<f32>() - 0.5) * STAR_FIELD_EXTENT,
            )
        })
        .collect()
}

/// One simulation tick: camera movement from the polled key set, disk
/// evolution, uniform and vertex upload.
fn advance_frame(state: &mut ApplicationState, renderer: &mut Renderer, gpu: &GpuContext) {
    let now = Instant::now();
    let delta_time = now.duration_since(state.last_update).as_secs_f32();
    state.last_update = now;

    apply_movement(state, delta_time);
    state.disk.update(&state.body, delta_time);

    let elapsed = state.start_time.elapsed().as_secs_f32();
    let uniforms = FrameUniforms::build(
        &state.camera,
        &state.body,
        renderer.aspect_ratio(),
        elapsed,
    );
    renderer.update_uniforms(gpu, &uniforms);
    renderer.update_particles(gpu, state.disk.particles(), &state.disk.particle_render_colors());

    state.frame_count += 1;
    if state.frame_count % STATUS_LOG_INTERVAL == 0 {
        let position = state.camera.position();
        log::debug!(
            "FPS: {:.1}, Camera: ({:.1}, {:.1}, {:.1})",
            1.0 / delta_time.max(1e-6),
            position.x,
            position.y,
            position.z
        );
        log::debug!("{}", state.disk.status());
    }
}

fn apply_movement(state: &mut ApplicationState, delta_time: f32) {
    let keys = &state.keys;
    let camera = &mut state.camera;
    if keys.forward {
        camera.process_movement(Movement::Forward, delta_time);
    }
    if keys.backward {
        camera.process_movement(Movement::Backward, delta_time);
    }
    if keys.left {
        camera.process_movement(Movement::Left, delta_time);
    }
    if keys.right {
        camera.process_movement(Movement::Right, delta_time);
    }
    if keys.up {
        camera.process_movement(Movement::Up, delta_time);
    }
    if keys.down {
        camera.process_movement(Movement::Down, delta_time);
    }
}

fn handle_cursor_moved(state: &mut ApplicationState, position: PhysicalPosition<f64>) {
    if let Some(last) = state.last_mouse_pos {
        if state.mouse_pressed {
            let x_offset = (position.x - last.x) as f32;
            // Inverted so dragging up looks up.
            let y_offset = (last.y - position.y) as f32;
            state.camera.process_look(x_offset, y_offset);
        }
    }
    state.last_mouse_pos = Some(position);
}

fn handle_key(
    state: &mut ApplicationState,
    code: KeyCode,
    key_state: ElementState,
    elwt: &winit::event_loop::EventLoopWindowTarget<()>,
) {
    let pressed = key_state == ElementState::Pressed;
    match code {
        KeyCode::KeyW => state.keys.forward = pressed,
        KeyCode::KeyS => state.keys.backward = pressed,
        KeyCode::KeyA => state.keys.left = pressed,
        KeyCode::KeyD => state.keys.right = pressed,
        KeyCode::Space => state.keys.up = pressed,
        KeyCode::ShiftLeft => state.keys.down = pressed,
        KeyCode::KeyR if pressed => {
            state.camera.reset();
            state.disk.reset(&state.body);
            log::info!("Simulation reset: {}", state.disk.status());
        }
        KeyCode::KeyQ | KeyCode::Escape if pressed => elwt.exit(),
        _ => {}
    }
}
