//! Draw recording and replay.
//!
//! Scene code renders in an immediate-mode style: set uniforms, draw, set more
//! uniforms, draw again. [`Frame`] records that sequence, snapshotting the
//! whole uniform block and the selected texture slot at every draw.
//! [`SceneRenderer`] then packs all snapshots into one uniform buffer and
//! replays the draws in order, selecting each snapshot with a dynamic offset.
//!
//! # Key types
//!
//! - [`Frame`] implements [`ShaderManager`] and [`DrawShape`]
//! - [`DrawCommand`] is one recorded draw
//! - [`SceneRenderer`] owns the pipeline and the per-frame uniform buffer

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use crate::{
    data_structures::{
        mesh::{DrawShape, Mesh, ShapeKind, ShapeMeshes},
        texture::{Texture, texture_bind_group},
    },
    pipelines::{
        scene::{ScenePipeline, mk_scene_pipeline},
        uniforms::{ShaderManager, ShaderUniforms, UniformState},
    },
};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub shape: ShapeKind,
    /// Texture slot to bind, `None` when the draw is untextured.
    pub texture_slot: Option<usize>,
    pub uniforms: ShaderUniforms,
}

/// Uniform state plus the draws recorded since the last [`begin`](Frame::begin).
#[derive(Debug, Default)]
pub struct Frame {
    uniforms: UniformState,
    draws: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the recorded draws. Uniform values carry over, as they would
    /// in a GL program.
    pub fn begin(&mut self) {
        self.draws.clear();
    }

    pub fn draws(&self) -> &[DrawCommand] {
        &self.draws
    }

    pub fn uniforms(&self) -> &UniformState {
        &self.uniforms
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

impl ShaderManager for Frame {
    fn set_int_value(&mut self, name: &str, value: i32) {
        self.uniforms.set_int_value(name, value);
    }

    fn set_float_value(&mut self, name: &str, value: f32) {
        self.uniforms.set_float_value(name, value);
    }

    fn set_vec2_value(&mut self, name: &str, value: Vector2<f32>) {
        self.uniforms.set_vec2_value(name, value);
    }

    fn set_vec3_value(&mut self, name: &str, value: Vector3<f32>) {
        self.uniforms.set_vec3_value(name, value);
    }

    fn set_vec4_value(&mut self, name: &str, value: Vector4<f32>) {
        self.uniforms.set_vec4_value(name, value);
    }

    fn set_mat4_value(&mut self, name: &str, value: Matrix4<f32>) {
        self.uniforms.set_mat4_value(name, value);
    }

    fn set_sampler2d_value(&mut self, name: &str, slot: i32) {
        self.uniforms.set_sampler2d_value(name, slot);
    }
}

impl DrawShape for Frame {
    fn draw_shape(&mut self, shape: ShapeKind) {
        let uniforms = self.uniforms.raw;
        let texture_slot = if uniforms.uses_texture() {
            self.uniforms.texture_slot
        } else {
            None
        };
        self.draws.push(DrawCommand {
            shape,
            texture_slot,
            uniforms,
        });
    }
}

pub trait DrawMesh {
    fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        uniforms: &wgpu::BindGroup,
        uniform_offset: u32,
        texture: &wgpu::BindGroup,
    );
}

impl DrawMesh for wgpu::RenderPass<'_> {
    fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        uniforms: &wgpu::BindGroup,
        uniform_offset: u32,
        texture: &wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, uniforms, &[uniform_offset]);
        self.set_bind_group(1, texture, &[]);
        self.draw_indexed(0..mesh.num_elements, 0, 0..1);
    }
}

/// Colour and depth views a frame is rendered into.
pub struct RenderTarget<'a> {
    pub color: &'a wgpu::TextureView,
    pub depth: &'a wgpu::TextureView,
}

/// Round `value` up to the next multiple of `alignment` (a power of two).
pub fn align_up(value: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    value.div_ceil(alignment) * alignment
}

pub struct SceneRenderer {
    pipeline: ScenePipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_stride: u64,
    capacity: usize,
    placeholder: wgpu::BindGroup,
    staging: Vec<u8>,
}

impl SceneRenderer {
    const INITIAL_CAPACITY: usize = 32;

    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let pipeline = mk_scene_pipeline(device, color_format);
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = align_up(ShaderUniforms::SIZE, alignment);

        let (uniform_buffer, uniform_bind_group) =
            Self::mk_uniform_buffer(device, &pipeline, uniform_stride, Self::INITIAL_CAPACITY);

        let white = Texture::create_solid(device, queue, [255, 255, 255, 255], "white placeholder");
        let sampler = crate::data_structures::texture::create_default_sampler(device);
        let placeholder = texture_bind_group(
            device,
            &pipeline.texture_bind_group_layout,
            &white,
            &sampler,
            "placeholder texture bind group",
        );

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniform_stride,
            capacity: Self::INITIAL_CAPACITY,
            placeholder,
            staging: Vec::new(),
        }
    }

    fn mk_uniform_buffer(
        device: &wgpu::Device,
        pipeline: &ScenePipeline,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform Buffer"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_uniform_bind_group"),
            layout: &pipeline.uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(ShaderUniforms::SIZE),
                }),
            }],
        });
        (buffer, bind_group)
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, draws: usize) {
        if draws <= self.capacity {
            return;
        }
        let capacity = draws.next_power_of_two();
        log::debug!("growing scene uniform buffer to {capacity} draws");
        let (buffer, bind_group) =
            Self::mk_uniform_buffer(device, &self.pipeline, self.uniform_stride, capacity);
        self.uniform_buffer = buffer;
        self.uniform_bind_group = bind_group;
        self.capacity = capacity;
    }

    pub fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.pipeline.texture_bind_group_layout
    }

    pub fn uniform_stride(&self) -> u64 {
        self.uniform_stride
    }

    /// Encode one pass that clears `target` and replays `frame`.
    ///
    /// `textures` holds one bind group per texture slot. Draws whose slot has
    /// no bind group, and untextured draws, sample a white texel.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: RenderTarget<'_>,
        clear_colour: wgpu::Color,
        frame: &Frame,
        meshes: &ShapeMeshes,
        textures: &[wgpu::BindGroup],
    ) {
        let draws = frame.draws();
        self.ensure_capacity(device, draws.len());

        if !draws.is_empty() {
            let stride = self.uniform_stride as usize;
            self.staging.clear();
            self.staging.resize(stride * draws.len(), 0);
            for (i, draw) in draws.iter().enumerate() {
                let bytes = bytemuck::bytes_of(&draw.uniforms);
                self.staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
            }
            queue.write_buffer(&self.uniform_buffer, 0, &self.staging);
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        render_pass.set_pipeline(&self.pipeline.render_pipeline);
        for (i, draw) in draws.iter().enumerate() {
            let Some(mesh) = meshes.mesh(draw.shape) else {
                log::debug!("{} mesh has no GPU buffers, skipping draw", draw.shape.name());
                continue;
            };
            let texture = draw
                .texture_slot
                .and_then(|slot| textures.get(slot))
                .unwrap_or(&self.placeholder);
            let offset = (i as u64 * self.uniform_stride) as u32;
            render_pass.draw_mesh(mesh, &self.uniform_bind_group, offset, texture);
        }
    }
}
