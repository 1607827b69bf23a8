use glam::Vec3;
use hecs::{Entity, World};
use rapier3d::prelude::RigidBodyType;

use crate::{
    components::{Grabbable, Grabbed, Released},
    contexts::PhysicsContext,
    util::na_vector_from_glam,
    MultigrabResult,
};

/// Tell a grabbable it has been picked up by `grabber`, using its `grab_point_index`th grab point.
///
/// The object's rigid body becomes kinematic so the grabber has sole control over where it goes. Whatever
/// body type it had before is remembered and restored by [`end_grab`].
pub fn begin_grab(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    entity: Entity,
    grabber: Entity,
    grab_point_index: usize,
) -> MultigrabResult<()> {
    let grab_point = {
        let mut grabbable = world.get::<&mut Grabbable>(entity)?;
        let rigid_body = physics_context.get_rigid_body_mut(world, entity)?;

        // Already held by another grabber: it's kinematic now, and that isn't the type to go back to.
        if grabbable.body_type_before_grab.is_none() {
            grabbable.body_type_before_grab = Some(rigid_body.body_type());
        }
        rigid_body.set_body_type(RigidBodyType::KinematicPositionBased, true);

        let grab_point = grabbable.grab_points.get(grab_point_index).copied();
        grabbable.grabbed_by = Some(grabber);
        grabbable.grab_point = grab_point;
        grab_point
    };

    let _ = world.remove_one::<Released>(entity);
    world.insert_one(
        entity,
        Grabbed {
            grabber,
            grab_point,
        },
    )?;

    Ok(())
}

/// Tell a grabbable it has been let go, throwing it with the given velocities.
pub fn end_grab(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    entity: Entity,
    linear_velocity: Vec3,
    angular_velocity: Vec3,
) -> MultigrabResult<()> {
    {
        let mut grabbable = world.get::<&mut Grabbable>(entity)?;
        let rigid_body = physics_context.get_rigid_body_mut(world, entity)?;

        if let Some(body_type) = grabbable.body_type_before_grab.take() {
            rigid_body.set_body_type(body_type, true);
        }
        rigid_body.set_linvel(na_vector_from_glam(linear_velocity), true);
        rigid_body.set_angvel(na_vector_from_glam(angular_velocity), true);

        grabbable.grabbed_by = None;
        grabbable.grab_point = None;
    }

    let _ = world.remove_one::<Grabbed>(entity);
    world.insert_one(
        entity,
        Released {
            linear_velocity,
            angular_velocity,
        },
    )?;

    Ok(())
}
