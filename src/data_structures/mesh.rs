//! The primitive mesh library.
//!
//! [`ShapeMeshes`] keeps the CPU geometry of every primitive the scene asked
//! for and, once [`upload`](ShapeMeshes::upload)ed, one GPU [`Mesh`] per
//! shape. Drawing goes through the [`DrawShape`] seam so that a scene can be
//! recorded without a device.

use std::collections::BTreeMap;

use wgpu::util::DeviceExt;

pub use crate::data_structures::geometry::ShapeKind;
use crate::data_structures::geometry::Geometry;

/// Anything that accepts a draw call for a primitive with the current
/// uniform state.
pub trait DrawShape {
    fn draw_shape(&mut self, shape: ShapeKind);
}

/// Vertex and index buffers of one primitive on the GPU.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Mesh {
    pub fn from_geometry(device: &wgpu::Device, name: &str, geometry: &Geometry) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Vertex Buffer")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Index Buffer")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: geometry.indices.len() as u32,
        }
    }
}

#[derive(Debug, Default)]
pub struct ShapeMeshes {
    geometry: BTreeMap<ShapeKind, Geometry>,
    meshes: BTreeMap<ShapeKind, Mesh>,
}

impl ShapeMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the geometry for `shape`. Loading a shape twice is a no-op.
    pub fn load(&mut self, shape: ShapeKind) {
        self.geometry.entry(shape).or_insert_with(|| {
            log::debug!("generating {} mesh", shape.name());
            shape.geometry()
        });
    }

    pub fn load_plane_mesh(&mut self) {
        self.load(ShapeKind::Plane);
    }

    pub fn load_box_mesh(&mut self) {
        self.load(ShapeKind::Box);
    }

    pub fn load_cylinder_mesh(&mut self) {
        self.load(ShapeKind::Cylinder);
    }

    pub fn load_cone_mesh(&mut self) {
        self.load(ShapeKind::Cone);
    }

    pub fn load_sphere_mesh(&mut self) {
        self.load(ShapeKind::Sphere);
    }

    pub fn load_torus_mesh(&mut self) {
        self.load(ShapeKind::Torus);
    }

    pub fn is_loaded(&self, shape: ShapeKind) -> bool {
        self.geometry.contains_key(&shape)
    }

    pub fn geometry(&self, shape: ShapeKind) -> Option<&Geometry> {
        self.geometry.get(&shape)
    }

    /// Shapes that have geometry, in [`ShapeKind`] order.
    pub fn loaded(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.geometry.keys().copied()
    }

    /// Create GPU buffers for every loaded shape that has none yet.
    pub fn upload(&mut self, device: &wgpu::Device) {
        for (shape, geometry) in &self.geometry {
            if !self.meshes.contains_key(shape) {
                let mesh = Mesh::from_geometry(device, shape.name(), geometry);
                self.meshes.insert(*shape, mesh);
            }
        }
    }

    pub fn mesh(&self, shape: ShapeKind) -> Option<&Mesh> {
        self.meshes.get(&shape)
    }

    /// Issue a draw for `shape` if it was loaded.
    pub fn draw<D: DrawShape + ?Sized>(&self, shape: ShapeKind, target: &mut D) {
        if self.is_loaded(shape) {
            target.draw_shape(shape);
        } else {
            log::warn!("{} mesh drawn before it was loaded", shape.name());
        }
    }

    pub fn draw_plane_mesh<D: DrawShape + ?Sized>(&self, target: &mut D) {
        self.draw(ShapeKind::Plane, target);
    }

    pub fn draw_box_mesh<D: DrawShape + ?Sized>(&self, target: &mut D) {
        self.draw(ShapeKind::Box, target);
    }

    pub fn draw_cylinder_mesh<D: DrawShape + ?Sized>(&self, target: &mut D) {
        self.draw(ShapeKind::Cylinder, target);
    }

    pub fn draw_cone_mesh<D: DrawShape + ?Sized>(&self, target: &mut D) {
        self.draw(ShapeKind::Cone, target);
    }

    pub fn draw_sphere_mesh<D: DrawShape + ?Sized>(&self, target: &mut D) {
        self.draw(ShapeKind::Sphere, target);
    }

    pub fn draw_torus_mesh<D: DrawShape + ?Sized>(&self, target: &mut D) {
        self.draw(ShapeKind::Torus, target);
    }
}
