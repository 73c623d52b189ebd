//! Mouth model construction: gums, teeth, cavity, tongue, palate, lips.
//!
//! Every part is a primitive placed by a fixed offset under the root group;
//! the tongue meshes sit under their own group so the articulation engine can
//! move them as one. Construction is deterministic and cannot fail.

use glam::Vec3;

use crate::api::types::PartId;
use crate::components::mesh::{Color, Material, MeshComponent, Shape};
use crate::components::part::{Part, PartKind};
use crate::components::pose::ArticulatedPose;
use crate::core::scene::Scene;
use crate::extensions::transform::{LocalTransform, TransformGraph};

// ── Teeth ────────────────────────────────────────────────────────────

pub const TEETH_PER_ARCH: u8 = 8;
pub const TOOTH_SPACING: f32 = 0.15;
const TOOTH_ROW_Y: f32 = 0.5;
const TOOTH_Z: f32 = 0.15;

// ── Materials ────────────────────────────────────────────────────────

const GUMS_COLOR: u32 = 0xd97777;
const TOOTH_COLOR: u32 = 0xfff8f0;
const CAVITY_COLOR: u32 = 0x6b3a3a;
const TONGUE_COLOR: u32 = 0xd64f5c;
const RIDGE_COLOR: u32 = 0xc64555;
const PALATE_COLOR: u32 = 0xc95c5c;
const LIP_COLOR: u32 = 0xeb6b7a;

const RIDGE_OFFSETS: [f32; 3] = [-0.2, 0.0, 0.2];

/// Handles to the nodes that change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimatedParts {
    pub root: PartId,
    pub tongue_group: PartId,
    pub upper_lip: PartId,
    pub lower_lip: PartId,
    pub cavity: PartId,
}

/// The static mouth model: what each part looks like and where it rests.
///
/// Rest transforms live inside the private graph and are never written after
/// `build_mouth` returns.
pub struct MouthModel {
    scene: Scene,
    graph: TransformGraph,
    handles: AnimatedParts,
}

impl MouthModel {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn graph(&self) -> &TransformGraph {
        &self.graph
    }

    pub fn handles(&self) -> AnimatedParts {
        self.handles
    }

    /// Rest transforms of the animated subset.
    pub fn rest_pose(&self) -> ArticulatedPose {
        let rest = |id| self.graph.rest(id).copied().unwrap_or_default();
        ArticulatedPose {
            upper_lip: rest(self.handles.upper_lip),
            lower_lip: rest(self.handles.lower_lip),
            cavity: rest(self.handles.cavity),
            tongue: rest(self.handles.tongue_group),
        }
    }
}

/// Incremental builder: allocates ids and keeps scene and graph in step.
struct ModelBuilder {
    scene: Scene,
    graph: TransformGraph,
    next_id: u32,
}

impl ModelBuilder {
    fn new() -> Self {
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            next_id: 1,
        }
    }

    fn add(
        &mut self,
        kind: PartKind,
        mesh: Option<MeshComponent>,
        rest: LocalTransform,
        parent: Option<PartId>,
    ) -> PartId {
        let id = PartId(self.next_id);
        self.next_id += 1;

        let part = Part::new(id, kind);
        self.scene.spawn(match mesh {
            Some(m) => part.with_mesh(m),
            None => part,
        });
        self.graph.register_with(id, rest);
        if parent.is_some() {
            self.graph.set_parent(id, parent);
        }
        id
    }

    fn teeth(&mut self, root: PartId, upper: bool, mesh: MeshComponent) {
        let y = if upper { TOOTH_ROW_Y } else { -TOOTH_ROW_Y };
        for i in 0..TEETH_PER_ARCH {
            let x = (i as f32 - 3.5) * TOOTH_SPACING;
            self.add(
                PartKind::Tooth { upper, index: i },
                Some(mesh),
                LocalTransform::at(x, y, TOOTH_Z),
                Some(root),
            );
        }
    }
}

/// Build the mouth model under a single root group.
pub fn build_mouth() -> MouthModel {
    let mut b = ModelBuilder::new();

    let gums = Material::new(Color::from_hex(GUMS_COLOR)).with_shininess(40.0);
    let tooth = Material::new(Color::from_hex(TOOTH_COLOR)).with_shininess(100.0);
    let cavity = Material::new(Color::from_hex(CAVITY_COLOR)).with_shininess(20.0);
    let tongue = Material::new(Color::from_hex(TONGUE_COLOR)).with_shininess(60.0);
    let ridge = Material::new(Color::from_hex(RIDGE_COLOR));
    let palate = Material::new(Color::from_hex(PALATE_COLOR)).with_shininess(30.0);
    let lip = Material::new(Color::from_hex(LIP_COLOR)).with_shininess(80.0);

    let root = b.add(PartKind::Root, None, LocalTransform::new(), None);

    // Gums share one shape
    let gum_mesh = MeshComponent::new(Shape::cuboid(1.2, 0.25, 0.3), gums);
    b.add(PartKind::UpperGums, Some(gum_mesh), LocalTransform::at(0.0, 0.4, 0.0), Some(root));
    b.add(PartKind::LowerGums, Some(gum_mesh), LocalTransform::at(0.0, -0.4, 0.0), Some(root));

    // All 16 teeth share one shape; each keeps its own offset
    let tooth_mesh = MeshComponent::new(Shape::cuboid(0.12, 0.35, 0.25), tooth).with_shadow();
    b.teeth(root, true, tooth_mesh);
    b.teeth(root, false, tooth_mesh);

    let cavity_id = b.add(
        PartKind::MouthCavity,
        Some(MeshComponent::new(Shape::cuboid(0.8, 0.6, 0.4), cavity)),
        LocalTransform::at(0.0, 0.0, 0.05),
        Some(root),
    );

    let tongue_group = b.add(
        PartKind::TongueGroup,
        None,
        LocalTransform::at(0.0, -0.15, 0.2),
        Some(root),
    );
    b.add(
        PartKind::TongueBody,
        Some(MeshComponent::new(Shape::cuboid(0.55, 0.25, 0.35), tongue)),
        LocalTransform::at(0.0, 0.0, 0.1),
        Some(tongue_group),
    );
    b.add(
        PartKind::TongueTip,
        Some(MeshComponent::new(Shape::sphere(0.15, 16), tongue)),
        LocalTransform::at(0.0, -0.15, 0.35).with_scale(Vec3::new(1.0, 0.6, 1.0)),
        Some(tongue_group),
    );
    let ridge_mesh = MeshComponent::new(Shape::cuboid(0.05, 0.15, 0.3), ridge);
    for (i, x) in RIDGE_OFFSETS.into_iter().enumerate() {
        b.add(
            PartKind::TongueRidge(i as u8),
            Some(ridge_mesh),
            LocalTransform::at(x, 0.0, 0.05),
            Some(tongue_group),
        );
    }

    b.add(
        PartKind::Palate,
        Some(MeshComponent::new(Shape::cuboid(0.9, 0.15, 0.3), palate)),
        LocalTransform::at(0.0, 0.45, 0.1),
        Some(root),
    );

    let lip_mesh = MeshComponent::new(Shape::cuboid(1.0, 0.12, 0.15), lip);
    let upper_lip = b.add(PartKind::UpperLip, Some(lip_mesh), LocalTransform::at(0.0, 0.6, 0.1), Some(root));
    let lower_lip = b.add(PartKind::LowerLip, Some(lip_mesh), LocalTransform::at(0.0, -0.6, 0.1), Some(root));

    log::debug!(
        "mouth model built: {} parts, {} meshes",
        b.scene.len(),
        b.scene.mesh_count()
    );

    MouthModel {
        scene: b.scene,
        graph: b.graph,
        handles: AnimatedParts {
            root,
            tongue_group,
            upper_lip,
            lower_lip,
            cavity: cavity_id,
        },
    }
}
