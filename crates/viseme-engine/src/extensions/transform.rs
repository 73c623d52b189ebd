// extensions/transform.rs
//
// Transform hierarchy: parent-child relationships by PartId, each node with
// an immutable rest transform. Nothing is cached: `propagate` recomputes world
// matrices from whatever local transforms the caller supplies this frame.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(child_id, LocalTransform::at(0.0, 0.6, 0.1));
//   graph.set_parent(child_id, Some(parent_id));
//   graph.propagate(|id, rest| *rest, &mut world);

use std::collections::HashMap;
use glam::{Mat4, Quat, Vec3};
use crate::api::types::PartId;

/// Local transform of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent.
    pub offset: Vec3,
    /// Rotation relative to parent.
    pub rotation: Quat,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity rotation and scale at the given offset.
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self::default().with_offset(Vec3::new(x, y, z))
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Scale, then rotate, then translate.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.offset)
    }
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<PartId>,
    children: Vec<PartId>,
    rest: LocalTransform,
}

/// Transform hierarchy graph. Manages parent-child relationships and rest poses.
///
/// Exists separately from Scene: the scene says what a part looks like,
/// the graph says where it sits.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<PartId, TransformNode>,
    /// Nodes with no parent, in registration order.
    roots: Vec<PartId>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with an identity rest transform.
    pub fn register(&mut self, id: PartId) {
        self.register_with(id, LocalTransform::default());
    }

    /// Register a node with a specific rest transform.
    pub fn register_with(&mut self, id: PartId, rest: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.rest = rest;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// Set the parent of a node. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: PartId, parent: Option<PartId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
        }

        // Detach from the old parent
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
                if !self.roots.contains(&p) && self.nodes.get(&p).is_some_and(|n| n.parent.is_none()) {
                    self.roots.push(p);
                }
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }
    }

    /// The rest transform of a node.
    pub fn rest(&self, id: PartId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.rest)
    }

    pub fn parent(&self, id: PartId) -> Option<PartId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: PartId) -> Option<&[PartId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Compute world matrices parent-first.
    ///
    /// `local` is asked for every node's local transform this frame and receives
    /// the node's rest transform; returning it unchanged renders the rest pose.
    /// `out` is cleared and filled with `(id, world)` in depth-first order.
    pub fn propagate<F>(&self, mut local: F, out: &mut Vec<(PartId, Mat4)>)
    where
        F: FnMut(PartId, &LocalTransform) -> LocalTransform,
    {
        out.clear();
        for &root in &self.roots {
            self.propagate_recursive(root, Mat4::IDENTITY, &mut local, out);
        }
    }

    fn propagate_recursive<F>(
        &self,
        id: PartId,
        parent_world: Mat4,
        local: &mut F,
        out: &mut Vec<(PartId, Mat4)>,
    ) where
        F: FnMut(PartId, &LocalTransform) -> LocalTransform,
    {
        let Some(node) = self.nodes.get(&id) else { return };
        let world = parent_world * local(id, &node.rest).to_matrix();
        out.push((id, world));
        for &child in &node.children {
            self.propagate_recursive(child, world, local, out);
        }
    }

    /// Number of nodes in the hierarchy.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = PartId(1);
        let child = PartId(2);

        graph.register(parent);
        graph.register(child);
        graph.set_parent(child, Some(parent));

        assert_eq!(graph.parent(child), Some(parent));
        assert_eq!(graph.children(parent), Some([child].as_slice()));
        assert_eq!(graph.roots, vec![parent]);
    }

    #[test]
    fn propagate_composes_offsets() {
        let mut graph = TransformGraph::new();
        let parent = PartId(1);
        let child = PartId(2);

        graph.register_with(parent, LocalTransform::at(0.0, -0.15, 0.2));
        graph.register_with(child, LocalTransform::at(0.0, 0.0, 0.1));
        graph.set_parent(child, Some(parent));

        let mut world = Vec::new();
        graph.propagate(|_, rest| *rest, &mut world);

        assert_eq!(world.len(), 2);
        assert_eq!(world[0].0, parent);
        let (_, child_world) = world[1];
        assert!(approx(child_world.transform_point3(Vec3::ZERO), Vec3::new(0.0, -0.15, 0.3)));
    }

    #[test]
    fn parent_rotation_moves_children() {
        let mut graph = TransformGraph::new();
        let root = PartId(1);
        let child = PartId(2);

        graph.register(root);
        graph.register_with(child, LocalTransform::at(1.0, 0.0, 0.0));
        graph.set_parent(child, Some(root));

        let mut world = Vec::new();
        graph.propagate(
            |id, rest| {
                if id == root {
                    rest.with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2))
                } else {
                    *rest
                }
            },
            &mut world,
        );

        let child_pos = world[1].1.transform_point3(Vec3::ZERO);
        assert!(approx(child_pos, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn overrides_do_not_touch_rest() {
        let mut graph = TransformGraph::new();
        let id = PartId(7);
        graph.register_with(id, LocalTransform::at(0.0, 0.6, 0.1));

        let mut world = Vec::new();
        graph.propagate(|_, rest| rest.with_offset(Vec3::new(0.0, 1.0, 0.0)), &mut world);

        assert!(approx(world[0].1.transform_point3(Vec3::ZERO), Vec3::Y));
        assert_eq!(graph.rest(id).unwrap().offset, Vec3::new(0.0, 0.6, 0.1));
    }

    #[test]
    fn reparenting_detaches_from_old_parent() {
        let mut graph = TransformGraph::new();
        let (a, b, c) = (PartId(1), PartId(2), PartId(3));
        graph.register(a);
        graph.register(b);
        graph.register(c);
        graph.set_parent(c, Some(a));
        graph.set_parent(c, Some(b));

        assert!(graph.children(a).unwrap().is_empty());
        assert_eq!(graph.children(b), Some([c].as_slice()));
    }
}
