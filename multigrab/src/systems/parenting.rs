use hecs::World;
use log::warn;

use crate::{
    components::{Grabbed, LocalTransform, Parent},
    contexts::PhysicsContext,
};

/// Update parented held objects system
/// Carries every held object that has been parented to its grabber along with the gripper's next pose.
/// Only grabbers with `parent_held_objects` set parent what they hold: run this after `grabbing_system`.
pub fn update_parented_held_objects_system(world: &World, physics_context: &mut PhysicsContext) {
    // Objects parented to something other than the grabber holding them are somebody else's business.
    let children = world
        .query::<(&Parent, &LocalTransform, &Grabbed)>()
        .iter()
        .filter(|(_, (parent, _, grabbed))| parent.0 == grabbed.grabber)
        .map(|(entity, (parent, local_transform, _))| (entity, parent.0, local_transform.pose()))
        .collect::<Vec<_>>();

    for (entity, grabber, offset) in children {
        let gripper = match physics_context.rigid_body_target(world, grabber) {
            Ok(gripper) => gripper,
            Err(e) => {
                warn!("Unable to find the gripper holding {entity:?}: {e}");
                continue;
            }
        };
        if let Err(e) = physics_context.move_rigid_body(world, entity, &(gripper * offset)) {
            warn!("Unable to move held object {entity:?}: {e}");
        }
    }
}
