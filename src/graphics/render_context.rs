use std::sync::Arc;

use pollster::FutureExt;
use wgpu::{Buffer, Device, Queue};
use winit::window::Window;

use crate::{
    error::Error,
    math::{Rect, Vec2i},
    Result,
};

use super::{
    render_2d::{self, DrawCommand, Vertex2d},
    Canvas, Surface, Texture,
};

/// A wgpu device presenting to one window.
///
/// Draw commands are queued by [Canvas::copy] and only hit the GPU on [Canvas::present].
#[derive(Debug)]
pub struct RenderContext {
    surface: wgpu::Surface<'static>,
    device: Device,
    queue: Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    commands: Vec<DrawCommand<Texture>>,
    clear_colour: wgpu::Color,
}

fn context_err(err: impl ToString) -> Error {
    Error::ContextCreation(err.to_string())
}

impl RenderContext {
    /// Create a rendering context for `window`, preferring a hardware adapter
    pub fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let dims = window.inner_size();
        let surface = instance.create_surface(window).map_err(context_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .block_on()
            .ok_or_else(|| context_err("no graphics adapter can present to this window"))?;
        log::debug!("Using adapter {:?}", adapter.get_info());
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("tileview render device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .block_on()
            .map_err(context_err)?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| context_err("window surface supports no texture formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: dims.width.max(1),
            height: dims.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("2D Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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

        let shader = device.create_shader_module(wgpu::include_wgsl!("shader_2d.wgsl"));
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("2D Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("2D Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex2d::descriptor()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("2D Vertex Buffer"),
            size: 1024,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("2D Index Buffer"),
            size: 1024,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!(
            "Rendering context ready ({}x{}, {:?}, {:?})",
            config.width,
            config.height,
            config.format,
            config.present_mode
        );
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            vertex_buffer,
            index_buffer,
            commands: Vec::new(),
            clear_colour: wgpu::Color::BLACK,
        })
    }

    /// Size of the surface being presented to, in pixels
    pub fn output_size(&self) -> Vec2i {
        Vec2i::from_dims(self.config.width, self.config.height)
    }
}

fn upload_buffer(device: &Device, queue: &Queue, buffer: &mut Buffer, data: &[u8]) {
    if data.len() as u64 > buffer.size() {
        let usage = buffer.usage();
        buffer.destroy();
        *buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("2D Buffer"),
            size: data.len().next_power_of_two().max(1024) as u64,
            usage,
            mapped_at_creation: false,
        });
    }
    queue.write_buffer(buffer, 0, data)
}

/// Reject sizes wgpu would refuse to create a 2D texture for
fn check_texture_dims(width: u32, height: u32, max: u32) -> Result<(), String> {
    if width == 0 || height == 0 {
        return Err(format!("surface has no pixels ({width}x{height})"));
    }
    if width > max || height > max {
        return Err(format!(
            "{width}x{height} exceeds the maximum texture size of {max}x{max}"
        ));
    }
    Ok(())
}

impl Canvas for RenderContext {
    type Texture = Texture;

    fn create_texture_from_surface(&mut self, surface: &Surface) -> Result<Texture, String> {
        let (width, height) = (surface.width(), surface.height());
        check_texture_dims(width, height, self.device.limits().max_texture_dimension_2d)?;
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let texture =
            Texture::new_from_surface(&self.device, &self.queue, &self.bind_group_layout, surface);
        let validation = self.device.pop_error_scope().block_on();
        let out_of_memory = self.device.pop_error_scope().block_on();
        match validation.or(out_of_memory) {
            Some(err) => Err(err.to_string()),
            None => {
                log::debug!("Uploaded {width}x{height} texture");
                Ok(texture)
            }
        }
    }

    fn query(&self, texture: &Texture) -> Vec2i {
        texture.size()
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn copy(&mut self, texture: &Texture, dst: Rect) {
        self.commands.push(DrawCommand {
            texture: texture.clone(),
            dst,
        });
    }

    fn present(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(err) => {
                log::warn!("Dropping frame, couldn't get the next surface texture: {err}");
                self.commands.clear();
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let list = render_2d::build(&self.commands, self.output_size());
        if !list.indices.is_empty() {
            upload_buffer(
                &self.device,
                &self.queue,
                &mut self.vertex_buffer,
                bytemuck::cast_slice(&list.vertices),
            );
            upload_buffer(
                &self.device,
                &self.queue,
                &mut self.index_buffer,
                bytemuck::cast_slice(&list.indices),
            );
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present command encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("2D Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            if !list.calls.is_empty() {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                for call in &list.calls {
                    render_pass.set_bind_group(0, &call.texture.0.bind_group, &[]);
                    render_pass.draw_indexed(call.indices.clone(), 0, 0..1);
                }
            }
        }
        self.queue.submit([encoder.finish()]);
        output.present();
        log::debug!(
            "Presented {} quads in {} draw calls",
            self.commands.len(),
            list.calls.len()
        );
        self.commands.clear();
    }
}
