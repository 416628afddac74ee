pub mod black_hole;
pub mod camera;
pub mod disk;
pub mod gpu;
pub mod uniforms;

use anyhow::Result;
use glam::Vec3;

use disk::Particle;
use gpu::GpuContext;
use uniforms::FrameUniforms;

pub const MAX_PARTICLE_COUNT: usize = 20_000;
const FLOATS_PER_VERTEX: usize = 6; // 3 position + 3 color
const PARTICLE_BUFFER_SIZE: u64 = (FLOATS_PER_VERTEX * 4 * MAX_PARTICLE_COUNT) as u64;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Scene renderer: a fullscreen lensing pass for the black hole and a
/// point pass for the starfield and disk particles, all driven by one
/// per-frame uniform block.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    lensing_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,

    particle_vertex_buffer: wgpu::Buffer,
    particle_vertex_count: u32,
    star_vertex_buffer: wgpu::Buffer,
    star_vertex_count: u32,

    frame_uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(window: &winit::window::Window, gpu: &GpuContext) -> Result<Self> {
        let surface = unsafe {
            let surface = gpu
                .instance
                .create_surface_unsafe(wgpu::SurfaceTargetUnsafe::from_window(window)?)?;
            std::mem::transmute::<wgpu::Surface<'_>, wgpu::Surface<'static>>(surface)
        };

        let surface_caps = surface.get_capabilities(&gpu.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &config);

        let frame_uniform_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let particle_vertex_buffer = Self::create_vertex_buffer(gpu, "Particle Vertex Buffer");
        let star_vertex_buffer = Self::create_vertex_buffer(gpu, "Star Vertex Buffer");

        let bind_group_layout = Self::create_bind_group_layout(gpu);
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniform_buffer.as_entire_binding(),
            }],
        });

        let lensing_shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Lensing Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lensing.wgsl").into()),
        });
        let point_shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/points.wgsl").into()),
        });

        let lensing_pipeline =
            Self::create_lensing_pipeline(gpu, &lensing_shader, &bind_group_layout, config.format);
        let point_pipeline =
            Self::create_point_pipeline(gpu, &point_shader, &bind_group_layout, config.format);

        Ok(Self {
            surface,
            config,
            lensing_pipeline,
            point_pipeline,
            particle_vertex_buffer,
            particle_vertex_count: 0,
            star_vertex_buffer,
            star_vertex_count: 0,
            frame_uniform_buffer,
            bind_group,
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Uploads the static starfield once.
    pub fn upload_stars(&mut self, gpu: &GpuContext, stars: &[Vec3]) {
        let mut vertices = Vec::with_capacity(stars.len() * FLOATS_PER_VERTEX);
        for star in stars {
            vertices.extend_from_slice(&[star.x, star.y, star.z, 1.0, 1.0, 1.0]);
        }
        self.star_vertex_count = stars.len() as u32;
        if !vertices.is_empty() {
            gpu.queue
                .write_buffer(&self.star_vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
    }

    /// Re-uploads the disk particle positions and colors for this frame.
    /// Particles beyond [`MAX_PARTICLE_COUNT`] are dropped.
    pub fn update_particles(&mut self, gpu: &GpuContext, particles: &[Particle], colors: &[Vec3]) {
        let count = particles.len().min(colors.len()).min(MAX_PARTICLE_COUNT);
        let mut vertices = Vec::with_capacity(count * FLOATS_PER_VERTEX);
        for (particle, color) in particles.iter().zip(colors.iter()).take(count) {
            vertices.extend_from_slice(&[
                particle.position.x,
                particle.position.y,
                particle.position.z,
                color.x,
                color.y,
                color.z,
            ]);
        }
        self.particle_vertex_count = count as u32;
        if !vertices.is_empty() {
            gpu.queue.write_buffer(
                &self.particle_vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices),
            );
        }
    }

    pub fn update_uniforms(&self, gpu: &GpuContext, uniforms: &FrameUniforms) {
        gpu.queue.write_buffer(
            &self.frame_uniform_buffer,
            0,
            bytemuck::cast_slice(&[*uniforms]),
        );
    }

    pub fn render(&self, gpu: &GpuContext) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.bind_group, &[]);

            // Background lensing pass, then points on top.
            render_pass.set_pipeline(&self.lensing_pipeline);
            render_pass.draw(0..3, 0..1);

            render_pass.set_pipeline(&self.point_pipeline);
            if self.star_vertex_count > 0 {
                render_pass.set_vertex_buffer(0, self.star_vertex_buffer.slice(..));
                render_pass.draw(0..self.star_vertex_count, 0..1);
            }
            if self.particle_vertex_count > 0 {
                render_pass.set_vertex_buffer(0, self.particle_vertex_buffer.slice(..));
                render_pass.draw(0..self.particle_vertex_count, 0..1);
            }
        }

        gpu.queue.submit(Some(encoder.finish()));
        output.present();

        Ok(())
    }

    pub fn resize(&mut self, gpu: &GpuContext, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&gpu.device, &self.config);
        }
    }

    fn create_vertex_buffer(gpu: &GpuContext, label: &str) -> wgpu::Buffer {
        gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: PARTICLE_BUFFER_SIZE,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group_layout(gpu: &GpuContext) -> wgpu::BindGroupLayout {
        gpu.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            })
    }

    fn create_lensing_pipeline(
        gpu: &GpuContext,
        shader: &wgpu::ShaderModule,
        bind_group_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Lensing Pipeline Layout"),
                bind_group_layouts: &[bind_group_layout],
                push_constant_ranges: &[],
            });

        gpu.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Lensing Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: "vs_main",
                    buffers: &[],
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
    }

    fn create_point_pipeline(
        gpu: &GpuContext,
        shader: &wgpu::ShaderModule,
        bind_group_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Point Pipeline Layout"),
                bind_group_layouts: &[bind_group_layout],
                push_constant_ranges: &[],
            });

        gpu.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Point Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: "vs_main",
                    buffers: &[Self::vertex_buffer_layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::PointList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
    }

    fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: (FLOATS_PER_VERTEX * 4) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 3 * 4,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
