use crate::api::types::PartId;
use crate::components::mesh::MeshComponent;

/// Which anatomical part a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// The single group holding every other part; carries the user rotation.
    Root,
    UpperGums,
    LowerGums,
    /// `index` runs 0..8 from left to right within its arch.
    Tooth { upper: bool, index: u8 },
    MouthCavity,
    /// Group for the tongue meshes; animated as a whole.
    TongueGroup,
    TongueBody,
    TongueTip,
    TongueRidge(u8),
    Palate,
    UpperLip,
    LowerLip,
}

impl PartKind {
    /// Group nodes only transform their children.
    pub fn is_group(self) -> bool {
        matches!(self, PartKind::Root | PartKind::TongueGroup)
    }
}

/// A node of the mouth model with an optional mesh.
#[derive(Debug, Clone)]
pub struct Part {
    pub id: PartId,
    pub kind: PartKind,
    /// None for group nodes.
    pub mesh: Option<MeshComponent>,
}

impl Part {
    pub fn new(id: PartId, kind: PartKind) -> Self {
        Self { id, kind, mesh: None }
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }
}
