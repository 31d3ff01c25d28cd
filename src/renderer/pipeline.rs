//! WebGPU render pipeline setup

use glam::Vec2;

use super::surface::CIRCLE_SEGMENTS;
use super::vertex::{Vertex, colors};
use crate::sim::Bounds;

/// Filled body plus a three-line arrow (six vertices per line)
pub const MAX_VERTICES_PER_PARTICLE: usize = CIRCLE_SEGMENTS as usize * 3 + 18;

/// Room for the default particle count before the first grow
///
/// Each particle tessellates to at most [`MAX_VERTICES_PER_PARTICLE`].
const INITIAL_VERTEX_CAPACITY: usize = 1 << 17;

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    /// Vertices the current buffer can hold
    pub vertex_capacity: usize,
    pub vertex_count: u32,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Simulation rectangle mapped onto the viewport
    pub bounds: Bounds,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        bounds: Bounds,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("gravity-particles-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particle_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_capacity = INITIAL_VERTEX_CAPACITY;
        let vertex_buffer = create_vertex_buffer(&device, vertex_capacity);

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity,
            vertex_count: 0,
            size: (width, height),
            bounds,
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload vertices (in bounds space) and render
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| Vertex::at(bounds_to_ndc(&self.bounds, v.point()), v.color))
            .collect();

        if ndc_vertices.len() > self.vertex_capacity {
            // Grow to the next power of two
            let capacity = ndc_vertices.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.device, capacity);
            self.vertex_capacity = capacity;
            log::debug!("Vertex buffer grown to {} vertices", capacity);
        }
        if !ndc_vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&ndc_vertices));
        }
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vertex_buffer"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Map a point in bounds space (y down) to normalized device coordinates (y up)
pub fn bounds_to_ndc(bounds: &Bounds, point: Vec2) -> Vec2 {
    let origin = Vec2::new(bounds.x[0], bounds.y[0]);
    let unit = (point - origin) / Vec2::new(bounds.width(), bounds.height());
    Vec2::new(unit.x * 2.0 - 1.0, 1.0 - unit.y * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_capacity_fits_default_run() {
        use crate::consts::DEFAULT_PARTICLE_COUNT;
        use crate::renderer::MeshSurface;
        use crate::sim::{Simulation, SimulationOptions};

        let needed = (DEFAULT_PARTICLE_COUNT + 1) * MAX_VERTICES_PER_PARTICLE;
        assert!(needed <= INITIAL_VERTEX_CAPACITY);

        let mut sim = Simulation::factory(&SimulationOptions::default().with_seed(1));
        sim.update(crate::consts::FRAME_DT);
        let mut mesh = MeshSurface::new();
        sim.render(&mut mesh, crate::consts::FRAME_DT);
        assert!(mesh.vertices().len() <= INITIAL_VERTEX_CAPACITY);
    }

    #[test]
    fn test_bounds_to_ndc_corners() {
        let bounds = Bounds::from_size(800.0, 600.0);
        assert_eq!(bounds_to_ndc(&bounds, Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(bounds_to_ndc(&bounds, Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(bounds_to_ndc(&bounds, Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn test_bounds_to_ndc_offset_origin() {
        let bounds = Bounds::new([100.0, 300.0], [-50.0, 50.0]);
        assert_eq!(bounds_to_ndc(&bounds, Vec2::new(200.0, 0.0)), Vec2::ZERO);
        assert_eq!(bounds_to_ndc(&bounds, Vec2::new(100.0, 50.0)), Vec2::new(-1.0, -1.0));
    }
}
