//! CPU-side vertex data and the primitive shape generators.
//!
//! All primitives are unit sized so that a scene positions them with a plain
//! scale/rotate/translate model matrix:
//!
//! - plane: square in the XZ plane spanning `[-1, 1]`, facing `+Y`
//! - box: cube spanning `[-0.5, 0.5]` on every axis
//! - cylinder: radius 1, from `y = 0` to `y = 1`, both ends capped
//! - cone: base of radius 1 at `y = 0`, apex at `y = 1`, base capped
//! - sphere: radius 1 around the origin
//! - torus: lying in the XY plane around the Z axis, main radius 1
//!
//! Texture coordinates follow the GL convention (`v = 0` is the bottom of the
//! image) and triangles wind counter-clockwise when seen from outside.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3};

pub const CIRCLE_SEGMENTS: u32 = 36;
pub const SPHERE_STACKS: u32 = 18;
pub const TORUS_TUBE_RADIUS: f32 = 0.3;
pub const TORUS_TUBE_SEGMENTS: u32 = 16;

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl ModelVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
    ];

    fn new(position: Vector3<f32>, normal: Vector3<f32>, tex_coords: [f32; 2]) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
            tex_coords,
        }
    }
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// The primitives the mesh library knows how to build.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Plane,
    Box,
    Cylinder,
    Cone,
    Sphere,
    Torus,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Plane,
        ShapeKind::Box,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Sphere,
        ShapeKind::Torus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Plane => "plane",
            ShapeKind::Box => "box",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Torus => "torus",
        }
    }

    /// Build the unit geometry for this shape with the default tessellation.
    pub fn geometry(self) -> Geometry {
        match self {
            ShapeKind::Plane => Geometry::plane(),
            ShapeKind::Box => Geometry::cuboid(),
            ShapeKind::Cylinder => Geometry::cylinder(CIRCLE_SEGMENTS),
            ShapeKind::Cone => Geometry::cone(CIRCLE_SEGMENTS),
            ShapeKind::Sphere => Geometry::sphere(CIRCLE_SEGMENTS, SPHERE_STACKS),
            ShapeKind::Torus => {
                Geometry::torus(TORUS_TUBE_RADIUS, CIRCLE_SEGMENTS, TORUS_TUBE_SEGMENTS)
            }
        }
    }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, vertex: ModelVertex) -> u32 {
        self.vertices.push(vertex);
        self.vertices.len() as u32 - 1
    }

    /// Append a quad centred at `center` spanning `u` and `v` (half extents).
    /// The face points along `u × v`.
    fn push_quad(&mut self, center: Vector3<f32>, u: Vector3<f32>, v: Vector3<f32>) {
        let normal = u.cross(v).normalize();
        let a = self.push(ModelVertex::new(center - u - v, normal, [0.0, 0.0]));
        let b = self.push(ModelVertex::new(center + u - v, normal, [1.0, 0.0]));
        let c = self.push(ModelVertex::new(center + u + v, normal, [1.0, 1.0]));
        let d = self.push(ModelVertex::new(center - u + v, normal, [0.0, 1.0]));
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    /// Fan of triangles closing a ring at height `y`. `up` selects the facing.
    fn push_cap(&mut self, y: f32, segments: u32, up: bool) {
        let normal = if up {
            Vector3::unit_y()
        } else {
            -Vector3::unit_y()
        };
        let center = self.push(ModelVertex::new(Vector3::new(0.0, y, 0.0), normal, [0.5, 0.5]));
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * 2.0 * PI;
            let (sin, cos) = theta.sin_cos();
            self.push(ModelVertex::new(
                Vector3::new(sin, y, cos),
                normal,
                [0.5 + 0.5 * sin, 0.5 + 0.5 * cos],
            ));
        }
        for i in 0..segments {
            let ring = center + 1 + i;
            if up {
                self.indices.extend_from_slice(&[center, ring, ring + 1]);
            } else {
                self.indices.extend_from_slice(&[center, ring + 1, ring]);
            }
        }
    }

    pub fn plane() -> Self {
        let mut geometry = Self::default();
        geometry.push_quad(Vector3::new(0.0, 0.0, 0.0), Vector3::unit_x(), -Vector3::unit_z());
        geometry
    }

    pub fn cuboid() -> Self {
        let mut geometry = Self::default();
        let (x, y, z) = (
            Vector3::unit_x() * 0.5,
            Vector3::unit_y() * 0.5,
            Vector3::unit_z() * 0.5,
        );
        // near, far, right, left, top, bottom
        geometry.push_quad(z, x, y);
        geometry.push_quad(-z, -x, y);
        geometry.push_quad(x, -z, y);
        geometry.push_quad(-x, z, y);
        geometry.push_quad(y, x, -z);
        geometry.push_quad(-y, x, z);
        geometry
    }

    pub fn cylinder(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut geometry = Self::default();

        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            let (sin, cos) = (u * 2.0 * PI).sin_cos();
            let normal = Vector3::new(sin, 0.0, cos);
            geometry.push(ModelVertex::new(Vector3::new(sin, 0.0, cos), normal, [u, 0.0]));
            geometry.push(ModelVertex::new(Vector3::new(sin, 1.0, cos), normal, [u, 1.0]));
        }
        for i in 0..segments {
            let bottom = 2 * i;
            let top = bottom + 1;
            let next_bottom = bottom + 2;
            let next_top = bottom + 3;
            geometry
                .indices
                .extend_from_slice(&[bottom, next_bottom, next_top, bottom, next_top, top]);
        }

        geometry.push_cap(1.0, segments, true);
        geometry.push_cap(0.0, segments, false);
        geometry
    }

    pub fn cone(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut geometry = Self::default();
        let apex = Vector3::new(0.0, 1.0, 0.0);

        for i in 0..segments {
            let u0 = i as f32 / segments as f32;
            let u1 = (i + 1) as f32 / segments as f32;
            let um = (u0 + u1) * 0.5;
            let (sin0, cos0) = (u0 * 2.0 * PI).sin_cos();
            let (sin1, cos1) = (u1 * 2.0 * PI).sin_cos();
            let (sinm, cosm) = (um * 2.0 * PI).sin_cos();

            // slope of a unit-radius, unit-height cone
            let n0 = Vector3::new(sin0, 1.0, cos0).normalize();
            let n1 = Vector3::new(sin1, 1.0, cos1).normalize();
            let nm = Vector3::new(sinm, 1.0, cosm).normalize();

            let a = geometry.push(ModelVertex::new(Vector3::new(sin0, 0.0, cos0), n0, [u0, 0.0]));
            let b = geometry.push(ModelVertex::new(Vector3::new(sin1, 0.0, cos1), n1, [u1, 0.0]));
            let c = geometry.push(ModelVertex::new(apex, nm, [um, 1.0]));
            geometry.indices.extend_from_slice(&[a, b, c]);
        }

        geometry.push_cap(0.0, segments, false);
        geometry
    }

    pub fn sphere(slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);
        let mut geometry = Self::default();

        for iy in 0..=stacks {
            let v = iy as f32 / stacks as f32;
            let phi = v * PI;
            for ix in 0..=slices {
                let u = ix as f32 / slices as f32;
                let theta = u * 2.0 * PI;
                let position = Vector3::new(
                    -phi.sin() * theta.cos(),
                    phi.cos(),
                    phi.sin() * theta.sin(),
                );
                geometry.push(ModelVertex::new(position, position, [u, 1.0 - v]));
            }
        }

        let row = slices + 1;
        for iy in 0..stacks {
            for ix in 0..slices {
                let a = iy * row + ix;
                let b = a + row;
                let c = b + 1;
                let d = a + 1;
                // the pole rows collapse to single triangles
                if iy != 0 {
                    geometry.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != stacks - 1 {
                    geometry.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        geometry
    }

    pub fn torus(tube_radius: f32, ring_segments: u32, tube_segments: u32) -> Self {
        let ring_segments = ring_segments.max(3);
        let tube_segments = tube_segments.max(3);
        let mut geometry = Self::default();

        for j in 0..=tube_segments {
            let v = j as f32 / tube_segments as f32;
            let (sin_v, cos_v) = (v * 2.0 * PI).sin_cos();
            for i in 0..=ring_segments {
                let u = i as f32 / ring_segments as f32;
                let (sin_u, cos_u) = (u * 2.0 * PI).sin_cos();
                let radial = Vector3::new(cos_u, sin_u, 0.0);
                let normal = radial * cos_v + Vector3::unit_z() * sin_v;
                let position = radial + normal * tube_radius;
                geometry.push(ModelVertex::new(position, normal, [u, v]));
            }
        }

        let row = ring_segments + 1;
        for j in 0..tube_segments {
            for i in 0..ring_segments {
                let a = j * row + i;
                let b = a + 1;
                let c = b + row;
                let d = a + row;
                geometry.indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
        geometry
    }
}
