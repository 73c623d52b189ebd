use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::api::types::PartId;
use crate::components::mesh::MeshComponent;

/// Per-mesh render data read by the page renderer.
/// 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct MeshInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// Box width/height/depth, or sphere radius and segment counts.
    pub dims: [f32; 3],
    /// 0 = box, 1 = sphere.
    pub shape: f32,
    pub color: [f32; 3],
    pub shininess: f32,
    /// 1.0 when the mesh casts shadows.
    pub casts_shadow: f32,
    pub part_id: f32,
    pub _pad: [f32; 2],
}

impl MeshInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(id: PartId, world: Mat4, mesh: &MeshComponent) -> Self {
        Self {
            model: world.to_cols_array_2d(),
            dims: mesh.shape.dims(),
            shape: mesh.shape.code(),
            color: mesh.material.color.to_array(),
            shininess: mesh.material.shininess,
            casts_shadow: if mesh.casts_shadow { 1.0 } else { 0.0 },
            part_id: id.0 as f32,
            _pad: [0.0; 2],
        }
    }

    pub fn world(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// Mesh instances for one frame, in scene order.
pub struct MeshBuffer {
    pub instances: Vec<MeshInstance>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(32),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Find the instance drawn for a part.
    pub fn get(&self, id: PartId) -> Option<&MeshInstance> {
        let key = id.0 as f32;
        self.instances.iter().find(|i| i.part_id == key)
    }

    /// Raw pointer to instance data for shared-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for MeshBuffer {
    fn default() -> Self {
        Self::new()
    }
}
