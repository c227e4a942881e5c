use wgpu::{BindGroup, BindGroupLayout, Device, RenderPipeline, Sampler, Surface, SurfaceConfiguration, Texture};

use super::gpu_context::GpuContext;
use crate::display::GrayFrame;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Uploaded frame texture and the bind group sampling it
struct FrameTexture {
    texture: Texture,
    bind_group: BindGroup,
    rows: u32,
    cols: u32,
}

/// Presents 8-bit grayscale frames on a window surface
///
/// Frames are uploaded as an `R8Unorm` texture and stretched over the whole
/// surface with nearest filtering, so each cell stays a crisp block.
pub struct GraySurface {
    gpu: GpuContext,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    render_pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
    sampler: Sampler,
    frame: Option<FrameTexture>,
}

impl GraySurface {
    /// Configure `surface` for presentation at `width` x `height` pixels
    pub fn new(surface: Surface<'static>, gpu: GpuContext, width: u32, height: u32) -> Result<Self> {
        let surface_caps = surface.get_capabilities(gpu.adapter());

        // Linear format so a byte value shows as that gray level
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or("Surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &surface_config);

        let bind_group_layout = Self::create_bind_group_layout(gpu.device());
        let render_pipeline =
            Self::create_render_pipeline(gpu.device(), &bind_group_layout, surface_format);
        let sampler = gpu.device().create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Height Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            gpu,
            surface,
            surface_config,
            render_pipeline,
            bind_group_layout,
            sampler,
            frame: None,
        })
    }

    /// Upload a frame, recreating the texture when its size changes
    pub fn upload(&mut self, frame: &GrayFrame<'_>) -> Result<()> {
        if frame.is_empty() {
            log::debug!("skipping upload of empty frame");
            return Ok(());
        }

        let rows = u32::try_from(frame.rows)?;
        let cols = u32::try_from(frame.cols)?;
        let max_dim = self.gpu.device().limits().max_texture_dimension_2d;
        if rows > max_dim || cols > max_dim {
            return Err(format!(
                "Frame {}x{} exceeds texture limit {}",
                cols, rows, max_dim
            )
            .into());
        }

        let reuse = matches!(&self.frame, Some(t) if t.rows == rows && t.cols == cols);
        if !reuse {
            self.frame = Some(self.create_frame_texture(rows, cols));
        }
        let Some(target) = &self.frame else {
            return Ok(());
        };

        self.gpu.queue().write_texture(
            target.texture.as_image_copy(),
            frame.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(cols),
                rows_per_image: Some(rows),
            },
            wgpu::Extent3d {
                width: cols,
                height: rows,
                depth_or_array_layers: 1,
            },
        );

        Ok(())
    }

    /// Draw the last uploaded frame and present it
    pub fn present(&self) -> Result<()> {
        let Some(frame) = &self.frame else {
            return Ok(());
        };

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(self.gpu.device(), &self.surface_config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Height Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Height Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &frame.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        surface_texture.present();

        Ok(())
    }

    /// Reconfigure the surface after the window changed size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    fn create_frame_texture(&self, rows: u32, cols: u32) -> FrameTexture {
        let texture = self.gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("Height Frame Texture"),
            size: wgpu::Extent3d {
                width: cols,
                height: rows,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = self.gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Height Frame Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        FrameTexture {
            texture,
            bind_group,
            rows,
            cols,
        }
    }

    fn create_bind_group_layout(device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Height Frame Bind Group Layout"),
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
        })
    }

    fn create_render_pipeline(
        device: &Device,
        bind_group_layout: &BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Height Frame Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../display.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Height Frame Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Height Frame Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}
