//! WebGPU render pipeline setup
//!
//! Two pipelines: solid-color triangles (fallback shapes, HUD backdrop) and
//! textured quads (sprites, glyph atlas text). Vertices are produced in
//! window pixel coordinates (origin top-left, y down) and mapped to NDC on
//! the CPU before upload; batches are drawn back-to-front in list order.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use super::texture::GpuTexture;
use super::vertex::{TexVertex, Vertex};

/// One draw batch; batches render in the order they are submitted
pub enum DrawBatch<'a> {
    Solid(Vec<Vertex>),
    Textured {
        texture: &'a GpuTexture,
        vertices: Vec<TexVertex>,
    },
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    solid_pipeline: wgpu::RenderPipeline,
    sprite_pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// Viewport size in physical pixels
    pub size: (u32, u32),
    /// Logical playfield size for coordinate mapping
    logical_size: (f32, f32),
}

impl RenderState {
    pub async fn new(window: Arc<Window>, logical_size: (f32, f32)) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("dodgefall-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let physical = window.inner_size();
        let (width, height) = (physical.width.max(1), physical.height.max(1));

        let surface_caps = surface.get_capabilities(&adapter);
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

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let solid_pipeline = Self::build_pipeline(
            &device,
            config.format,
            include_str!("shader.wgsl"),
            "solid_pipeline",
            Vertex::desc(),
            &[],
        );
        let sprite_pipeline = Self::build_pipeline(
            &device,
            config.format,
            include_str!("sprite.wgsl"),
            "sprite_pipeline",
            TexVertex::desc(),
            &[&texture_layout],
        );

        Self {
            surface,
            device,
            queue,
            config,
            solid_pipeline,
            sprite_pipeline,
            texture_layout,
            sampler,
            size: (width, height),
            logical_size,
        }
    }

    fn build_pipeline(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        shader_source: &str,
        label: &str,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts,
            immediate_size: 0,
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
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
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload a decoded image for use with the sprite pipeline
    pub fn create_texture(&self, image: &image::RgbaImage, label: &str) -> GpuTexture {
        GpuTexture::from_rgba(
            &self.device,
            &self.queue,
            &self.texture_layout,
            &self.sampler,
            image,
            label,
        )
    }

    /// Convert window pixel coordinates (top-left origin, y down) to NDC
    pub fn px_to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        let (w, h) = self.logical_size;
        (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
    }

    /// Upload batches and render them in order
    pub fn render(&mut self, batches: &[DrawBatch<'_>]) -> Result<(), wgpu::SurfaceError> {
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
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.118,
                            g: 0.118,
                            b: 0.157,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for batch in batches {
                match batch {
                    DrawBatch::Solid(vertices) => {
                        if vertices.is_empty() {
                            continue;
                        }
                        let ndc: Vec<Vertex> = vertices
                            .iter()
                            .map(|v| {
                                let (x, y) = self.px_to_ndc(v.position[0], v.position[1]);
                                Vertex::new(x, y, v.color)
                            })
                            .collect();
                        let buffer =
                            self.device
                                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                                    label: Some("solid_vertex_buffer"),
                                    contents: bytemuck::cast_slice(&ndc),
                                    usage: wgpu::BufferUsages::VERTEX,
                                });
                        render_pass.set_pipeline(&self.solid_pipeline);
                        render_pass.set_vertex_buffer(0, buffer.slice(..));
                        render_pass.draw(0..ndc.len() as u32, 0..1);
                    }
                    DrawBatch::Textured { texture, vertices } => {
                        if vertices.is_empty() {
                            continue;
                        }
                        let ndc: Vec<TexVertex> = vertices
                            .iter()
                            .map(|v| {
                                let (x, y) = self.px_to_ndc(v.position[0], v.position[1]);
                                TexVertex::new(x, y, v.uv[0], v.uv[1], v.color)
                            })
                            .collect();
                        let buffer =
                            self.device
                                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                                    label: Some("sprite_vertex_buffer"),
                                    contents: bytemuck::cast_slice(&ndc),
                                    usage: wgpu::BufferUsages::VERTEX,
                                });
                        render_pass.set_pipeline(&self.sprite_pipeline);
                        render_pass.set_bind_group(0, &texture.bind_group, &[]);
                        render_pass.set_vertex_buffer(0, buffer.slice(..));
                        render_pass.draw(0..ndc.len() as u32, 0..1);
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
