//! Fill pipeline shared by every draw call of a target.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{Mat3, Viewport};

// ── blend ─────────────────────────────────────────────────────────────────

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

/// Local-space vertex position.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct MeshVertex {
    pub pos: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Per-draw transform and color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct FillInstance {
    row0: [f32; 4],
    row1: [f32; 4],
    color: [f32; 4],
}

impl FillInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x4, // row0
        2 => Float32x4, // row1
        3 => Float32x4  // color
    ];

    pub(super) fn new(transform: &Mat3, color: [f32; 4]) -> Self {
        let [r0, r1] = transform.affine_rows();
        Self {
            row0: [r0[0], r0[1], r0[2], 0.0],
            row1: [r1[0], r1[1], r1[2], 0.0],
            color,
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FillInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit square `(0,0)-(1,1)`; rectangles and lines are transformed copies.
pub(super) const QUAD_VERTICES: [MeshVertex; 4] = [
    MeshVertex { pos: [0.0, 0.0] },
    MeshVertex { pos: [1.0, 0.0] },
    MeshVertex { pos: [1.0, 1.0] },
    MeshVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Indexed triangle list living on one device.
#[derive(Debug, Clone)]
pub(super) struct Mesh {
    pub vertices: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    pub index_count: u32,
}

impl Mesh {
    pub(super) fn upload(
        device: &wgpu::Device,
        label: &str,
        vertices: &[MeshVertex],
        indices: &[u32],
    ) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices: index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// One recorded draw: a mesh and the instance that places it.
#[derive(Debug, Clone)]
pub(super) struct FillDraw {
    pub mesh: Mesh,
    pub instance: FillInstance,
}

// ── pipeline ──────────────────────────────────────────────────────────────

pub(super) struct FillPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    instance_vbo: wgpu::Buffer,
    instance_capacity: usize,
}

const MIN_INSTANCE_CAPACITY: usize = 64;

fn create_instance_vbo(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("kestrel fill instance vbo"),
        size: (capacity * std::mem::size_of::<FillInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl FillPipeline {
    pub(super) fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kestrel fill shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/fill.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kestrel fill bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ViewportUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kestrel fill pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kestrel fill pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout(), FillInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Transforms may mirror; tessellated winding is not guaranteed.
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

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kestrel fill viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kestrel fill bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            bind_group,
            viewport_ubo,
            instance_vbo: create_instance_vbo(device, MIN_INSTANCE_CAPACITY),
            instance_capacity: MIN_INSTANCE_CAPACITY,
        }
    }

    /// Encodes a clear followed by every draw, in order.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn encode(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        viewport: Viewport,
        clear: wgpu::Color,
        draws: &[FillDraw],
    ) {
        let size = if viewport.is_valid() {
            [viewport.width, viewport.height]
        } else {
            [1.0, 1.0]
        };
        let u = ViewportUniform {
            size,
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.viewport_ubo, 0, bytemuck::bytes_of(&u));

        let instances: Vec<FillInstance> = draws.iter().map(|d| d.instance).collect();
        if !instances.is_empty() {
            self.ensure_instance_capacity(device, instances.len());
            queue.write_buffer(&self.instance_vbo, 0, bytemuck::cast_slice(&instances));
        }

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("kestrel fill pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if draws.is_empty() {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(1, self.instance_vbo.slice(..));

        for (i, draw) in draws.iter().enumerate() {
            let i = i as u32;
            rpass.set_vertex_buffer(0, draw.mesh.vertices.slice(..));
            rpass.set_index_buffer(draw.mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..draw.mesh.index_count, 0, i..i + 1);
        }
    }

    fn ensure_instance_capacity(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.instance_capacity {
            return;
        }
        let new_cap = required.next_power_of_two().max(MIN_INSTANCE_CAPACITY);
        self.instance_vbo = create_instance_vbo(device, new_cap);
        self.instance_capacity = new_cap;
    }
}
