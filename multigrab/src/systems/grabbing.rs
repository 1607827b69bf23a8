use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, error, warn};

use super::{
    grab_detection::seed_candidates_from_volumes,
    grabbable::{begin_grab, end_grab},
};
use crate::{
    components::{
        AnchorUpdates, GrabState, Grabber, GripTransition, LocalTransform, Parent,
        ReferenceFrame, RigidBody,
    },
    contexts::{ControllerInput, InputContext, PhysicsContext},
    util::Pose,
    MultigrabResult,
};

/// Grabbables are always picked up by their first grab point.
const PRIMARY_GRAB_POINT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Let the physics simulation carry the body there
    Continuous,
    /// Put the body there immediately
    Teleport,
}

/// Grabbing system
/// Moves every polled grabber to its controller, carries along whatever it is holding, and grabs or releases
/// depending on how the grip has changed since the last tick.
///
/// Grabbers configured with [`AnchorUpdates::External`] are skipped: call [`on_updated_anchors`] for those.
pub fn grabbing_system(
    world: &mut World,
    input_context: &InputContext,
    physics_context: &mut PhysicsContext,
) {
    let polled = world
        .query::<&Grabber>()
        .iter()
        .filter(|(_, grabber)| grabber.config.anchor_updates == AnchorUpdates::Poll)
        .map(|(entity, _)| entity)
        .collect::<Vec<_>>();

    for entity in polled {
        if let Err(e) = on_updated_anchors(world, input_context, physics_context, entity) {
            error!("Unable to update grabber {entity:?}: {e}");
        }
    }
}

/// Bring a single grabber up to date with its controller.
///
/// This is what [`grabbing_system`] does for each polled grabber. Hosts with a tracking rig that publishes
/// anchor updates call it directly for grabbers set to [`AnchorUpdates::External`].
pub fn on_updated_anchors(
    world: &mut World,
    input_context: &InputContext,
    physics_context: &mut PhysicsContext,
    entity: Entity,
) -> MultigrabResult<()> {
    with_grabber(world, entity, |grabber, world| {
        let controller = input_context.controller(grabber.config.handedness);
        let global_from_stage =
            reference_frame_pose(world, physics_context, &grabber.reference_frame)?;
        let destination = follow_pose(
            &global_from_stage,
            &controller.stage_from_grip(),
            &grabber.anchor_offset(),
        );

        let gripper = physics_context.rigid_body_pose(world, entity)?;
        physics_context.move_rigid_body(world, entity, &destination)?;

        // Parented objects are carried by `update_parented_held_objects_system` instead.
        if !grabber.config.parent_held_objects {
            move_held_objects(
                world,
                physics_context,
                &grabber.held,
                &gripper,
                &destination,
                Placement::Continuous,
            );
        }

        let previous = grabber.last_grip;
        grabber.last_grip = controller.grip_analog();

        match grabber.config.thresholds.transition(previous, grabber.last_grip) {
            Some(GripTransition::Begin) => grab_begin(entity, grabber, world, physics_context),
            Some(GripTransition::End) => {
                grab_end(entity, grabber, world, input_context, physics_context);
                Ok(())
            }
            None => Ok(()),
        }
    })
}

/// Let go of everything the grabber is holding, whatever the grip is doing.
///
/// Does nothing if the grabber isn't grabbing. Only fails if `entity` isn't a grabber.
pub fn force_release(
    world: &mut World,
    input_context: &InputContext,
    physics_context: &mut PhysicsContext,
    entity: Entity,
) -> MultigrabResult<()> {
    with_grabber(world, entity, |grabber, world| {
        grab_end(entity, grabber, world, input_context, physics_context);
        Ok(())
    })
}

/// Release anything the grabber holds, then despawn it.
pub fn grabber_teardown(
    world: &mut World,
    input_context: &InputContext,
    physics_context: &mut PhysicsContext,
    entity: Entity,
) -> MultigrabResult<()> {
    if let Err(e) = force_release(world, input_context, physics_context, entity) {
        warn!("Unable to release {entity:?} before despawning it: {e}");
    }
    world.despawn(entity)?;
    Ok(())
}

/// Where the gripper should be, given the reference frame, the controller's tracked pose and the anchor offset.
///
/// Note that the anchor's position is added to the controller's position *before* rotation, while its
/// rotation is applied after the controller's.
pub fn follow_pose(global_from_stage: &Pose, stage_from_grip: &Pose, anchor_offset: &Pose) -> Pose {
    Pose {
        position: global_from_stage
            .transform_point(anchor_offset.position + stage_from_grip.position),
        rotation: global_from_stage.rotation * stage_from_grip.rotation * anchor_offset.rotation,
    }
}

/// The linear and angular velocity to throw released objects with.
///
/// The controller reports its velocities in tracking space. They're rotated by however far the gripper
/// currently lags behind the anchored controller pose, so an object leaves the hand along the path the
/// gripper is actually taking.
pub fn release_velocities(
    global_from_stage: &Pose,
    gripper: &Pose,
    controller: &ControllerInput,
    anchor_offset: &Pose,
) -> (Vec3, Vec3) {
    let stage_from_gripper = gripper.relative_to(global_from_stage);
    let stage_from_anchor = controller.stage_from_grip() * *anchor_offset;
    let tracking = stage_from_gripper * stage_from_anchor.inverse();

    (
        tracking.rotation * controller.linear_velocity(),
        tracking.rotation * controller.angular_velocity(),
    )
}

/// Take the grabber out of the world while it's being worked on, so the rest of the world stays mutable.
fn with_grabber<T>(
    world: &mut World,
    entity: Entity,
    f: impl FnOnce(&mut Grabber, &mut World) -> MultigrabResult<T>,
) -> MultigrabResult<T> {
    let mut grabber = world.remove_one::<Grabber>(entity)?;
    let result = f(&mut grabber, world);
    world.insert_one(entity, grabber)?;
    result
}

fn reference_frame_pose(
    world: &World,
    physics_context: &PhysicsContext,
    reference_frame: &ReferenceFrame,
) -> MultigrabResult<Pose> {
    match *reference_frame {
        ReferenceFrame::Fixed(pose) => Ok(pose),
        ReferenceFrame::Entity(entity) => {
            if world.get::<&RigidBody>(entity).is_ok() {
                physics_context.rigid_body_pose(world, entity)
            } else {
                Ok(world.get::<&LocalTransform>(entity)?.pose())
            }
        }
    }
}

fn grab_begin(
    entity: Entity,
    grabber: &mut Grabber,
    world: &mut World,
    physics_context: &mut PhysicsContext,
) -> MultigrabResult<()> {
    if grabber.is_grabbing() {
        return Ok(());
    }

    let mut held = Vec::with_capacity(grabber.candidates.len());
    for candidate in grabber.candidates.snapshot() {
        match begin_grab(world, physics_context, candidate, entity, PRIMARY_GRAB_POINT) {
            Ok(()) => held.push(candidate),
            Err(e) => warn!("Unable to grab {candidate:?}, leaving it behind: {e}"),
        }
    }
    grabber.held = held;
    grabber.state = GrabState::Grabbing;
    set_grab_volumes_enabled(grabber, false, world, physics_context);
    debug!("{entity:?} grabbed {:?}", grabber.held);

    if grabber.held.is_empty() {
        return Ok(());
    }

    // Snap everything into place now, otherwise the first continuous move would drag it there over a tick.
    let gripper = physics_context.rigid_body_pose(world, entity)?;
    move_held_objects(
        world,
        physics_context,
        &grabber.held,
        &gripper,
        &gripper,
        Placement::Teleport,
    );

    if grabber.config.parent_held_objects {
        for &object in &grabber.held {
            let offset = physics_context
                .rigid_body_pose(world, object)?
                .relative_to(&gripper);
            world.insert(object, (Parent(entity), LocalTransform::from(offset)))?;
        }
    }

    Ok(())
}

fn grab_end(
    entity: Entity,
    grabber: &mut Grabber,
    world: &mut World,
    input_context: &InputContext,
    physics_context: &mut PhysicsContext,
) {
    if !grabber.is_grabbing() {
        return;
    }

    let controller = input_context.controller(grabber.config.handedness);
    let poses = reference_frame_pose(world, physics_context, &grabber.reference_frame)
        .and_then(|frame| Ok((frame, physics_context.rigid_body_pose(world, entity)?)));
    // Letting go must always work, even if there's nothing left to work out a throw from.
    let (linear_velocity, angular_velocity) = match poses {
        Ok((global_from_stage, gripper)) => release_velocities(
            &global_from_stage,
            &gripper,
            controller,
            &grabber.anchor_offset(),
        ),
        Err(e) => {
            warn!("Unable to find where {entity:?} is, dropping what it holds instead: {e}");
            (Vec3::ZERO, Vec3::ZERO)
        }
    };

    let held = std::mem::take(&mut grabber.held);
    debug!("{entity:?} released {held:?}");
    for object in held {
        if grabber.config.parent_held_objects {
            let _ = world.remove::<(Parent, LocalTransform)>(object);
        }
        if let Err(e) = end_grab(
            world,
            physics_context,
            object,
            linear_velocity,
            angular_velocity,
        ) {
            warn!("Unable to release {object:?}, it has probably been despawned: {e}");
        }
    }

    grabber.state = GrabState::Released;
    set_grab_volumes_enabled(grabber, true, world, physics_context);
}

fn set_grab_volumes_enabled(
    grabber: &mut Grabber,
    enabled: bool,
    world: &World,
    physics_context: &PhysicsContext,
) {
    if grabber.grab_volumes_enabled == enabled {
        return;
    }

    grabber.grab_volumes_enabled = enabled;
    if enabled {
        seed_candidates_from_volumes(world, physics_context, grabber);
    } else {
        grabber.candidates.clear();
    }
}

/// Carry held objects from where the gripper is to `destination`, keeping each one's offset from the gripper.
///
/// If one of the objects has disappeared, the ones after it are left where they are until the next tick.
fn move_held_objects(
    world: &World,
    physics_context: &mut PhysicsContext,
    held: &[Entity],
    gripper: &Pose,
    destination: &Pose,
    placement: Placement,
) {
    for &object in held {
        let Ok(current) = physics_context.rigid_body_pose(world, object) else {
            warn!("Held object {object:?} has gone away, not moving the rest of the held objects");
            return;
        };
        let target = *destination * current.relative_to(gripper);

        let moved = match placement {
            Placement::Continuous => physics_context.move_rigid_body(world, object, &target),
            Placement::Teleport => physics_context.teleport_rigid_body(world, object, &target),
        };
        if let Err(e) = moved {
            warn!("Unable to move held object {object:?}: {e}");
            return;
        }
    }
}
