use std::f32::consts::TAU;

use anyhow::Result;
use glam::{Quat, Vec3};
use log::info;
use multigrab::{
    components::{
        GrabState, GrabVolume, Grabbable, Grabber, GrabberConfig, LocalTransform, ReferenceFrame,
    },
    contexts::{ControllerSample, InputContext, PhysicsContext},
    hecs::{Entity, World},
    rapier3d::prelude::{ColliderBuilder, RigidBodyBuilder},
    systems::{
        grab_detection_system, grabber_teardown, grabbing_system,
        update_parented_held_objects_system,
    },
    util::{na_vector_from_glam, Pose},
};

const TICKS: u32 = 360;
const SQUEEZE_PERIOD: u32 = 120;
const REST_POSITION: Vec3 = Vec3::new(0.2, 1.4, -0.5);

pub fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading grabber config from {path}");
            GrabberConfig::from_path(path)?
        }
        None => GrabberConfig::default(),
    };
    let handedness = config.handedness;

    let mut world = World::new();
    let mut physics_context = PhysicsContext::default();
    let mut input_context = InputContext::testing();

    // The player is standing half a metre back from the origin, turned slightly.
    let stage = world.spawn((LocalTransform {
        translation: Vec3::new(0.0, 0.0, 0.5),
        rotation: Quat::from_rotation_y(0.1),
    },));
    let grabber = add_grabber(&mut world, &mut physics_context, config, stage)?;

    let stage_pose = Pose::new(Vec3::new(0.0, 0.0, 0.5), Quat::from_rotation_y(0.1));
    let hand = stage_pose.transform_point(REST_POSITION);
    let cubes = [
        add_cube(&mut world, &mut physics_context, hand + Vec3::new(0.03, 0.0, 0.0))?,
        add_cube(&mut world, &mut physics_context, hand + Vec3::new(-0.03, 0.05, 0.0))?,
    ];

    let mut last_state = GrabState::Released;
    for tick in 0..TICKS {
        input_context.update(handedness, controller_sample(tick));

        physics_context.update();
        grab_detection_system(&world, &mut physics_context);
        grabbing_system(&mut world, &input_context, &mut physics_context);
        update_parented_held_objects_system(&world, &mut physics_context);

        let current = world.get::<&Grabber>(grabber)?;
        if current.state() != last_state {
            last_state = current.state();
            info!(
                "[{tick}] grip {:.2}: {last_state:?}, holding {:?}",
                current.last_grip(),
                current.held_objects()
            );
        }
    }

    for cube in cubes {
        let pose = physics_context.rigid_body_pose(&world, cube)?;
        info!("{cube:?} ended up at {:?}", pose.position);
    }

    grabber_teardown(&mut world, &input_context, &mut physics_context, grabber)?;
    info!("Done");

    Ok(())
}

fn add_grabber(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    config: GrabberConfig,
    stage: Entity,
) -> Result<Entity> {
    let grabber = world.spawn(());
    let rigid_body = physics_context
        .create_rigid_body(grabber, RigidBodyBuilder::kinematic_position_based().build());

    let volume = world.spawn((GrabVolume { grabber },));
    let collider = physics_context.create_grab_volume(
        volume,
        ColliderBuilder::ball(0.1).build(),
        rigid_body.handle,
    );
    world.insert_one(volume, collider)?;

    let component = Grabber::new(config, vec![volume])?
        .with_reference_frame(ReferenceFrame::Entity(stage));
    world.insert(grabber, (component, rigid_body))?;

    Ok(grabber)
}

fn add_cube(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    position: Vec3,
) -> Result<Entity> {
    let cube = world.spawn((Grabbable::default(),));
    let components = physics_context.create_rigid_body_and_collider(
        cube,
        RigidBodyBuilder::dynamic()
            .translation(na_vector_from_glam(position))
            .build(),
        ColliderBuilder::cuboid(0.02, 0.02, 0.02).build(),
    );
    world.insert(cube, components)?;
    Ok(cube)
}

/// Squeeze and release the grip twice, lifting the hand while it's closed.
fn controller_sample(tick: u32) -> ControllerSample {
    let phase = (tick % SQUEEZE_PERIOD) as f32 / SQUEEZE_PERIOD as f32;
    let grip_analog = 1.0 - (phase * TAU).cos().abs();
    let lift = 0.2 * (tick as f32 / TICKS as f32 * TAU).sin().max(0.0);

    ControllerSample {
        grip_analog,
        stage_from_grip: Pose::from_position(REST_POSITION + Vec3::Y * lift),
        linear_velocity: Vec3::ZERO,
        angular_velocity: Vec3::ZERO,
    }
}
