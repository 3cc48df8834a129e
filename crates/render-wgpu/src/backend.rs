use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use voxsprite_mesh::{
    AttributeLayout, CENTER_ATTRIBUTE, CORNER_ATTRIBUTE, IndexBuffer, QUAD_CORNERS,
    TEXCOORD_ATTRIBUTE,
};
use voxsprite_render::{
    DrawCall, Drawable, FrameUniforms, GeometryHandle, Primitive, RasterBackend, TextureHandle,
    TextureSource,
};

use crate::WgpuError;
use crate::shaders;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    camera_position: [f32; 4],
    focus: [f32; 4],
    params: [f32; 4],
}

impl Uniforms {
    fn new(frame: &FrameUniforms, width: u32, height: u32) -> Self {
        Self {
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
            camera_position: frame.camera_position.extend(1.0).to_array(),
            focus: frame.focus.extend(1.0).to_array(),
            params: [frame.particle_size, frame.point_scale, width as f32, height as f32],
        }
    }
}

/// Two triangles over the unit square, non-indexed, for instanced points.
fn point_corners() -> [[f32; 2]; 6] {
    let [a, b, c, d] = QUAD_CORNERS;
    [a, b, c, a, c, d]
}

fn vertex_format(layout: &AttributeLayout) -> wgpu::VertexFormat {
    match layout.components {
        1 => wgpu::VertexFormat::Float32,
        2 => wgpu::VertexFormat::Float32x2,
        3 => wgpu::VertexFormat::Float32x3,
        _ => wgpu::VertexFormat::Float32x4,
    }
}

fn vertex_attribute(layout: &AttributeLayout) -> [wgpu::VertexAttribute; 1] {
    [wgpu::VertexAttribute {
        format: vertex_format(layout),
        offset: layout.offset,
        shader_location: layout.location,
    }]
}

enum GpuGeometry {
    Quads {
        streams: Vec<wgpu::Buffer>,
        index_buffer: wgpu::Buffer,
        index_format: wgpu::IndexFormat,
        index_count: u32,
    },
    Points {
        corners: wgpu::Buffer,
        centers: wgpu::Buffer,
        count: u32,
    },
    Fullscreen,
    /// Nothing to rasterize; the frame is only cleared.
    Empty,
}

struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// [`RasterBackend`] on a wgpu surface.
///
/// `clear` and `write_uniforms` stage state; `draw` acquires the surface
/// texture, records one render pass and presents it.
pub struct WgpuBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    adapter_info: wgpu::AdapterInfo,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    sprite_layout: wgpu::BindGroupLayout,
    field_layout: wgpu::BindGroupLayout,
    sprite_sampler: wgpu::Sampler,
    quad_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    field_pipeline: wgpu::RenderPipeline,
    depth_texture: wgpu::TextureView,
    geometries: Vec<GpuGeometry>,
    textures: Vec<GpuTexture>,
    clear_color: wgpu::Color,
}

impl WgpuBackend {
    /// Pick an adapter for `surface`, open a device and build all pipelines.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, WgpuError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(WgpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("voxsprite_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .ok_or(WgpuError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform_buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sprite_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_bind_group_layout"),
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

        let field_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("field_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }],
        });

        let sprite_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // collect shader and pipeline validation errors
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let sprite_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &sprite_layout],
            push_constant_ranges: &[],
        });
        let field_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("field_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &field_layout],
            push_constant_ranges: &[],
        });

        let blend_target = [Some(wgpu::ColorTargetState {
            format: surface_format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        })];
        let sprite_depth = wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        };

        // Quad pipeline: one buffer per attribute stream
        let quad_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quad_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::QUAD_SHADER.into()),
        });
        let quad_streams = [CORNER_ATTRIBUTE, TEXCOORD_ATTRIBUTE, CENTER_ATTRIBUTE];
        let quad_attributes = quad_streams.map(|layout| vertex_attribute(&layout));
        let quad_buffers: Vec<wgpu::VertexBufferLayout> = quad_streams
            .iter()
            .zip(quad_attributes.iter())
            .map(|(layout, attributes)| wgpu::VertexBufferLayout {
                array_stride: layout.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes,
            })
            .collect();

        let quad_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quad_pipeline"),
            layout: Some(&sprite_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &quad_shader,
                entry_point: Some("vs_quad"),
                compilation_options: Default::default(),
                buffers: &quad_buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &quad_shader,
                entry_point: Some("fs_sprite"),
                compilation_options: Default::default(),
                targets: &blend_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(sprite_depth.clone()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Point pipeline: shared corners per vertex, centers per instance
        let point_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("point_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::POINT_SHADER.into()),
        });
        let corner_attributes = vertex_attribute(&CORNER_ATTRIBUTE);
        let center_attributes = vertex_attribute(&CENTER_ATTRIBUTE);

        let point_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("point_pipeline"),
            layout: Some(&sprite_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &point_shader,
                entry_point: Some("vs_point"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: CORNER_ATTRIBUTE.stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &corner_attributes,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: CENTER_ATTRIBUTE.stride,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &center_attributes,
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &point_shader,
                entry_point: Some("fs_sprite"),
                compilation_options: Default::default(),
                targets: &blend_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(sprite_depth),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Field pipeline: no vertex buffers
        let field_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("field_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::FIELD_SHADER.into()),
        });

        let field_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("field_pipeline"),
            layout: Some(&field_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &field_shader,
                entry_point: Some("vs_fullscreen"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &field_shader,
                entry_point: Some("fs_field"),
                compilation_options: Default::default(),
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        if let Some(error) = device.pop_error_scope().await {
            return Err(WgpuError::Shader(error.to_string()));
        }

        let depth_texture = create_depth_texture(&device, config.width, config.height);
        let adapter_info = adapter.get_info();
        tracing::info!(
            backend = adapter_info.backend.to_str(),
            adapter = %adapter_info.name,
            format = ?surface_format,
            "wgpu backend initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            adapter_info,
            uniform_buffer,
            uniform_bind_group,
            sprite_layout,
            field_layout,
            sprite_sampler,
            quad_pipeline,
            point_pipeline,
            field_pipeline,
            depth_texture,
            geometries: Vec::new(),
            textures: Vec::new(),
            clear_color: wgpu::Color::BLACK,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = create_depth_texture(&self.device, self.config.width, self.config.height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    fn buffer(&self, label: &str, contents: &[u8], usage: wgpu::BufferUsages) -> wgpu::Buffer {
        self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        })
    }

    fn texture(&self, handle: TextureHandle) -> Result<&GpuTexture, WgpuError> {
        self.textures
            .get(handle.0 as usize)
            .ok_or(WgpuError::UnknownTexture(handle.0))
    }
}

impl RasterBackend for WgpuBackend {
    type Error = WgpuError;

    fn create_geometry(&mut self, drawable: &Drawable) -> Result<GeometryHandle, WgpuError> {
        let geometry = match drawable {
            Drawable::IndexedMesh(mesh) if mesh.quad_count() > 0 => {
                let streams = mesh
                    .attribute_streams()
                    .iter()
                    .map(|(layout, bytes)| self.buffer(layout.name, bytes, wgpu::BufferUsages::VERTEX))
                    .collect();
                let index_format = match mesh.indices() {
                    IndexBuffer::U16(_) => wgpu::IndexFormat::Uint16,
                    IndexBuffer::U32(_) => wgpu::IndexFormat::Uint32,
                };
                GpuGeometry::Quads {
                    streams,
                    index_buffer: self.buffer(
                        "index_buffer",
                        mesh.indices().as_bytes(),
                        wgpu::BufferUsages::INDEX,
                    ),
                    index_format,
                    index_count: mesh.indices().len() as u32,
                }
            }
            Drawable::PointList(points) if !points.is_empty() => {
                let (layout, bytes) = points.attribute_stream();
                GpuGeometry::Points {
                    corners: self.buffer(
                        "point_corners",
                        bytemuck::cast_slice(&point_corners()),
                        wgpu::BufferUsages::VERTEX,
                    ),
                    centers: self.buffer(layout.name, bytes, wgpu::BufferUsages::VERTEX),
                    count: points.len() as u32,
                }
            }
            Drawable::FullscreenField(_) => GpuGeometry::Fullscreen,
            _ => GpuGeometry::Empty,
        };
        let handle = GeometryHandle(self.geometries.len() as u32);
        self.geometries.push(geometry);
        tracing::debug!(?handle, kind = ?drawable.kind(), "geometry uploaded");
        Ok(handle)
    }

    fn create_texture(&mut self, source: TextureSource<'_>) -> Result<TextureHandle, WgpuError> {
        let (width, height) = source.size();
        let (format, bytes, texel_size): (_, &[u8], u32) = match source {
            TextureSource::Rgba8 { pixels, .. } => (wgpu::TextureFormat::Rgba8UnormSrgb, pixels, 4),
            TextureSource::Float32 { values, .. } => {
                (wgpu::TextureFormat::R32Float, bytemuck::cast_slice(values), 4)
            }
        };
        if width == 0 || height == 0 || bytes.len() != (width * height * texel_size) as usize {
            return Err(WgpuError::InvalidTexture {
                width,
                height,
                len: bytes.len(),
            });
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("source_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * texel_size),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = match source {
            TextureSource::Rgba8 { .. } => self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("sprite_bind_group"),
                layout: &self.sprite_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sprite_sampler),
                    },
                ],
            }),
            TextureSource::Float32 { .. } => self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("field_bind_group"),
                layout: &self.field_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                }],
            }),
        };

        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(GpuTexture {
            _texture: texture,
            bind_group,
        });
        tracing::debug!(?handle, width, height, ?format, "texture uploaded");
        Ok(handle)
    }

    fn clear(&mut self, color: [f64; 4]) -> Result<(), WgpuError> {
        let [r, g, b, a] = color;
        self.clear_color = wgpu::Color { r, g, b, a };
        Ok(())
    }

    fn write_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<(), WgpuError> {
        let uniforms = Uniforms::new(uniforms, self.config.width, self.config.height);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        Ok(())
    }

    fn draw(&mut self, call: &DrawCall) -> Result<(), WgpuError> {
        let geometry = self
            .geometries
            .get(call.geometry.0 as usize)
            .ok_or(WgpuError::UnknownGeometry(call.geometry.0))?;
        let texture = match call.primitive {
            Primitive::Fullscreen => {
                let field = call.field.ok_or(WgpuError::MissingFieldTexture)?;
                self.texture(field)?
            }
            _ => self.texture(call.sprite)?,
        };

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e) if needs_reconfigure(&e) => {
                tracing::debug!("surface {e}; reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                return Err(WgpuError::SurfaceReconfigured);
            }
            Err(e) => return Err(WgpuError::Surface(e)),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            match geometry {
                GpuGeometry::Quads {
                    streams,
                    index_buffer,
                    index_format,
                    index_count,
                } => {
                    pass.set_pipeline(&self.quad_pipeline);
                    pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                    pass.set_bind_group(1, &texture.bind_group, &[]);
                    for (slot, stream) in streams.iter().enumerate() {
                        pass.set_vertex_buffer(slot as u32, stream.slice(..));
                    }
                    pass.set_index_buffer(index_buffer.slice(..), *index_format);
                    pass.draw_indexed(0..*index_count, 0, 0..1);
                }
                GpuGeometry::Points {
                    corners,
                    centers,
                    count,
                } => {
                    pass.set_pipeline(&self.point_pipeline);
                    pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                    pass.set_bind_group(1, &texture.bind_group, &[]);
                    pass.set_vertex_buffer(0, corners.slice(..));
                    pass.set_vertex_buffer(1, centers.slice(..));
                    pass.draw(0..6, 0..*count);
                }
                GpuGeometry::Fullscreen => {
                    pass.set_pipeline(&self.field_pipeline);
                    pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                    pass.set_bind_group(1, &texture.bind_group, &[]);
                    pass.draw(0..3, 0..1);
                }
                GpuGeometry::Empty => {}
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

/// Lost and outdated surfaces recover by reconfiguring; the frame is dropped.
fn needs_reconfigure(error: &wgpu::SurfaceError) -> bool {
    matches!(
        error,
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated
    )
}
