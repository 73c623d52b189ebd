use glam::Mat4;

use crate::api::types::PartId;
use crate::components::pose::{ArticulatedPose, RootOrientation};
use crate::extensions::transform::LocalTransform;
use crate::input::interaction::InteractionState;
use crate::renderer::instance::{MeshBuffer, MeshInstance};
use crate::systems::geometry::{AnimatedParts, MouthModel};

/// Build the mesh buffer from the live transform state.
///
/// World matrices are recomputed from scratch every call: the root takes its
/// rotation from `orientation`, the animated subset takes its local transform
/// from `pose`, every other node uses its rest transform.
pub fn build_mesh_buffer(
    model: &MouthModel,
    orientation: RootOrientation,
    pose: &ArticulatedPose,
    buffer: &mut MeshBuffer,
) {
    buffer.clear();

    let handles = model.handles();
    let mut worlds: Vec<(PartId, Mat4)> = Vec::with_capacity(model.graph().len());
    model.graph().propagate(
        |id, rest| live_local(id, rest, &handles, orientation, pose),
        &mut worlds,
    );

    for (id, world) in worlds {
        let Some(part) = model.scene().get(id) else {
            continue;
        };
        if let Some(mesh) = &part.mesh {
            buffer.push(MeshInstance::new(id, world, mesh));
        }
    }
}

fn live_local(
    id: PartId,
    rest: &LocalTransform,
    handles: &AnimatedParts,
    orientation: RootOrientation,
    pose: &ArticulatedPose,
) -> LocalTransform {
    if id == handles.root {
        rest.with_rotation(orientation.to_quat())
    } else if id == handles.upper_lip {
        pose.upper_lip
    } else if id == handles.lower_lip {
        pose.lower_lip
    } else if id == handles.cavity {
        pose.cavity
    } else if id == handles.tongue_group {
        pose.tongue
    } else {
        *rest
    }
}

/// One frame of auto-rotation. Returns true if the root turned.
pub fn auto_rotate(
    orientation: &mut RootOrientation,
    interaction: &InteractionState,
    speed: f32,
) -> bool {
    if !interaction.should_auto_rotate() {
        return false;
    }
    orientation.rotate(speed, 0.0);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::geometry::build_mouth;
    use glam::{Vec2, Vec3};

    fn translation(inst: &MeshInstance) -> Vec3 {
        inst.world().w_axis.truncate()
    }

    #[test]
    fn one_instance_per_mesh_part() {
        let model = build_mouth();
        let mut buf = MeshBuffer::new();
        build_mesh_buffer(&model, RootOrientation::default(), &model.rest_pose(), &mut buf);
        assert_eq!(buf.instances.len(), model.scene().mesh_count());
    }

    #[test]
    fn rest_pose_places_lips_at_rest() {
        let model = build_mouth();
        let h = model.handles();
        let mut buf = MeshBuffer::new();
        build_mesh_buffer(&model, RootOrientation::default(), &model.rest_pose(), &mut buf);

        let upper = translation(buf.get(h.upper_lip).unwrap());
        assert!((upper - Vec3::new(0.0, 0.6, 0.1)).length() < 1e-6);
    }

    #[test]
    fn pose_changes_show_up_next_build() {
        let model = build_mouth();
        let h = model.handles();
        let mut pose = model.rest_pose();
        let mut buf = MeshBuffer::new();

        build_mesh_buffer(&model, RootOrientation::default(), &pose, &mut buf);
        pose.lower_lip.offset.y -= 0.1;
        build_mesh_buffer(&model, RootOrientation::default(), &pose, &mut buf);

        let lower = translation(buf.get(h.lower_lip).unwrap());
        assert!((lower.y - (-0.7)).abs() < 1e-6);
    }

    #[test]
    fn tongue_meshes_follow_group() {
        let model = build_mouth();
        let mut pose = model.rest_pose();
        let mut buf = MeshBuffer::new();
        build_mesh_buffer(&model, RootOrientation::default(), &pose, &mut buf);
        let before: Vec<f32> = buf.instances.iter().map(|i| translation(i).z).collect();

        pose.tongue.offset.z += 0.3;
        build_mesh_buffer(&model, RootOrientation::default(), &pose, &mut buf);
        let after: Vec<f32> = buf.instances.iter().map(|i| translation(i).z).collect();

        // Body, tip and three ridges move; nothing else does.
        let moved = before
            .iter()
            .zip(&after)
            .filter(|(b, a)| (*a - *b - 0.3).abs() < 1e-5)
            .count();
        let unchanged = before.iter().zip(&after).filter(|(b, a)| (*a - *b).abs() < 1e-6).count();
        assert_eq!(moved, 5);
        assert_eq!(unchanged, after.len() - 5);
    }

    #[test]
    fn root_yaw_rotates_every_part() {
        let model = build_mouth();
        let h = model.handles();
        let mut buf = MeshBuffer::new();
        let orientation = RootOrientation { pitch: 0.0, yaw: std::f32::consts::PI };
        build_mesh_buffer(&model, orientation, &model.rest_pose(), &mut buf);

        // Half a turn about Y flips Z; Y is untouched.
        let upper = translation(buf.get(h.upper_lip).unwrap());
        assert!((upper - Vec3::new(0.0, 0.6, -0.1)).length() < 1e-5);
    }

    #[test]
    fn auto_rotate_until_first_drag() {
        let mut orientation = RootOrientation::default();
        let mut interaction = InteractionState::new();

        assert!(auto_rotate(&mut orientation, &interaction, 0.002));
        assert!((orientation.yaw - 0.002).abs() < 1e-7);

        interaction = interaction.on_pointer_down(Vec2::ZERO);
        assert!(!auto_rotate(&mut orientation, &interaction, 0.002));

        interaction = interaction.on_pointer_up();
        assert!(!auto_rotate(&mut orientation, &interaction, 0.002));
        assert!((orientation.yaw - 0.002).abs() < 1e-7);
        assert_eq!(orientation.pitch, 0.0);
    }
}
