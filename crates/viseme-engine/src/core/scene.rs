use crate::api::types::PartId;
use crate::components::part::{Part, PartKind};

/// Flat storage for the parts of the mouth model.
/// The model is small (tens of parts) and fixed after construction.
pub struct Scene {
    parts: Vec<Part>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            parts: Vec::with_capacity(32),
        }
    }

    /// Add a part to the scene.
    pub fn spawn(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Find the first part of the given kind.
    pub fn find(&self, kind: PartKind) -> Option<&Part> {
        self.parts.iter().find(|p| p.kind == kind)
    }

    /// Find all parts matching a predicate on their kind.
    pub fn find_all(&self, pred: impl Fn(PartKind) -> bool) -> Vec<&Part> {
        self.parts.iter().filter(|p| pred(p.kind)).collect()
    }

    /// Number of parts that carry a mesh.
    pub fn mesh_count(&self) -> usize {
        self.parts.iter().filter(|p| p.mesh.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Color, Material, MeshComponent, Shape};

    fn lip(id: u32, kind: PartKind) -> Part {
        Part::new(PartId(id), kind).with_mesh(MeshComponent::new(
            Shape::cuboid(1.0, 0.12, 0.15),
            Material::new(Color::WHITE),
        ))
    }

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        scene.spawn(lip(1, PartKind::UpperLip));
        assert_eq!(scene.get(PartId(1)).unwrap().kind, PartKind::UpperLip);
        assert!(scene.get(PartId(2)).is_none());
    }

    #[test]
    fn find_by_kind() {
        let mut scene = Scene::new();
        scene.spawn(Part::new(PartId(1), PartKind::Root));
        scene.spawn(lip(2, PartKind::UpperLip));
        scene.spawn(lip(3, PartKind::LowerLip));
        assert_eq!(scene.find(PartKind::LowerLip).unwrap().id, PartId(3));
        assert_eq!(scene.find_all(|k| matches!(k, PartKind::UpperLip | PartKind::LowerLip)).len(), 2);
    }

    #[test]
    fn groups_are_not_counted_as_meshes() {
        let mut scene = Scene::new();
        scene.spawn(Part::new(PartId(1), PartKind::Root));
        scene.spawn(lip(2, PartKind::UpperLip));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.mesh_count(), 1);
    }
}
