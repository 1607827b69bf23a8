use std::collections::HashMap;

use crossbeam::channel::Receiver;
use hecs::{Entity, World};
use rapier3d::prelude::{
    ActiveCollisionTypes, ActiveEvents, BroadPhase, CCDSolver, ChannelEventCollector,
    Collider, ColliderHandle, ColliderSet, CollisionEvent, ContactForceEvent, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline, Real,
    RigidBody, RigidBodyHandle, RigidBodySet, Vector,
};

use crate::{
    components::{Collider as ColliderComponent, RigidBody as RigidBodyComponent},
    util::Pose,
    MultigrabError, MultigrabResult,
};

/// Did two colliders start or stop touching?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    /// They started intersecting
    Began,
    /// They stopped intersecting
    Ended,
}

/// An intersection event between the entities two colliders belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEvent {
    pub a: Entity,
    pub b: Entity,
    pub kind: OverlapKind,
}

pub struct PhysicsContext {
    pub physics_pipeline: PhysicsPipeline,
    pub gravity: Vector<Real>,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhase,
    pub narrow_phase: NarrowPhase,
    pub rigid_bodies: RigidBodySet,
    pub island_manager: IslandManager,
    pub collision_recv: Receiver<CollisionEvent>,
    pub contact_force_recv: Receiver<ContactForceEvent>,
    pub event_handler: ChannelEventCollector,
    pub integration_parameters: IntegrationParameters,
    pub impulse_joints: ImpulseJointSet,
    pub multibody_joints: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    /// Kept apart from the collider set so events about removed colliders can still be resolved
    collider_entities: HashMap<ColliderHandle, Entity>,
}

impl Default for PhysicsContext {
    fn default() -> Self {
        let (collision_send, collision_recv) = crossbeam::channel::unbounded();
        let (contact_force_send, contact_force_recv) = crossbeam::channel::unbounded();
        let event_handler = ChannelEventCollector::new(collision_send, contact_force_send);
        let gravity = Vector::zeros();
        let mut integration_parameters = IntegrationParameters::default();

        // TODO: This is *usually* 72fps on the Quest 2, take the rate from the host once it tells us.
        integration_parameters.dt = 1. / 72.;

        PhysicsContext {
            physics_pipeline: PhysicsPipeline::new(),
            gravity,
            colliders: ColliderSet::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_bodies: RigidBodySet::new(),
            island_manager: IslandManager::new(),
            collision_recv,
            contact_force_recv,
            event_handler,
            integration_parameters,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            collider_entities: HashMap::new(),
        }
    }
}

impl PhysicsContext {
    /// Step the physics simulation.
    pub fn update(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &self.event_handler,
        );
    }

    pub fn create_rigid_body(&mut self, entity: Entity, mut rigid_body: RigidBody) -> RigidBodyComponent {
        rigid_body.user_data = entity.to_bits().get() as _;
        RigidBodyComponent::new(self.rigid_bodies.insert(rigid_body))
    }

    pub fn create_rigid_body_and_collider(
        &mut self,
        entity: Entity,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyComponent, ColliderComponent) {
        let rigid_body_component = self.create_rigid_body(entity, rigid_body);
        let collider_component = self.attach_collider(entity, collider, rigid_body_component.handle);

        (rigid_body_component, collider_component)
    }

    /// Attach a collider belonging to `entity` to an existing rigid body, which may belong to another entity.
    pub fn attach_collider(
        &mut self,
        entity: Entity,
        mut collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderComponent {
        collider.user_data = entity.to_bits().get() as _;
        let handle = self
            .colliders
            .insert_with_parent(collider, parent, &mut self.rigid_bodies);
        self.collider_entities.insert(handle, entity);
        ColliderComponent::new(handle)
    }

    /// Attach a sensor that reports intersections with everything it touches. Used for grab volumes.
    pub fn create_grab_volume(
        &mut self,
        entity: Entity,
        mut collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderComponent {
        collider.set_sensor(true);
        collider.set_active_events(ActiveEvents::COLLISION_EVENTS);
        collider.set_active_collision_types(ActiveCollisionTypes::all());
        self.attach_collider(entity, collider, parent)
    }

    pub fn get_rigid_body<'a>(
        &'a self,
        world: &World,
        entity: Entity,
    ) -> MultigrabResult<&'a RigidBody> {
        let rigid_body_handle = world.get::<&RigidBodyComponent>(entity)?.handle;
        self.rigid_bodies
            .get(rigid_body_handle)
            .ok_or(MultigrabError::MissingRigidBody(entity))
    }

    pub fn get_rigid_body_mut<'a>(
        &'a mut self,
        world: &World,
        entity: Entity,
    ) -> MultigrabResult<&'a mut RigidBody> {
        let rigid_body_handle = world.get::<&RigidBodyComponent>(entity)?.handle;
        self.rigid_bodies
            .get_mut(rigid_body_handle)
            .ok_or(MultigrabError::MissingRigidBody(entity))
    }

    /// Where the entity's rigid body currently is.
    pub fn rigid_body_pose(&self, world: &World, entity: Entity) -> MultigrabResult<Pose> {
        Ok(Pose::from_isometry(
            self.get_rigid_body(world, entity)?.position(),
        ))
    }

    /// Where the entity's rigid body will be after the next step, if it is kinematic.
    pub fn rigid_body_target(&self, world: &World, entity: Entity) -> MultigrabResult<Pose> {
        Ok(Pose::from_isometry(
            self.get_rigid_body(world, entity)?.next_position(),
        ))
    }

    /// Ask the physics simulation to carry a kinematic body to `pose` over the next step.
    pub fn move_rigid_body(
        &mut self,
        world: &World,
        entity: Entity,
        pose: &Pose,
    ) -> MultigrabResult<()> {
        self.get_rigid_body_mut(world, entity)?
            .set_next_kinematic_position(pose.to_isometry());
        Ok(())
    }

    /// Put the body at `pose` right now, without travelling there.
    pub fn teleport_rigid_body(
        &mut self,
        world: &World,
        entity: Entity,
        pose: &Pose,
    ) -> MultigrabResult<()> {
        self.get_rigid_body_mut(world, entity)?
            .set_position(pose.to_isometry(), true);
        Ok(())
    }

    /// Look up the entity a collider was created for.
    ///
    /// This still works for a removed collider until the intersection events reporting its removal have been drained.
    pub fn collider_entity(&self, handle: ColliderHandle) -> Option<Entity> {
        self.collider_entities.get(&handle).copied()
    }

    /// Entities whose colliders are intersecting the given collider right now.
    pub fn intersecting_entities(&self, handle: ColliderHandle) -> Vec<Entity> {
        self.narrow_phase
            .intersections_with(handle)
            .filter(|(_, _, intersecting)| *intersecting)
            .filter_map(|(a, b, _)| {
                let other = if a == handle { b } else { a };
                self.collider_entity(other)
            })
            .collect()
    }

    /// Drain the intersection events produced by the last steps.
    ///
    /// Removing a collider ends its intersections, and those events are reported like any other. Once they
    /// have been drained the removed collider is forgotten.
    pub fn drain_intersection_events(&mut self) -> Vec<IntersectionEvent> {
        let mut events = Vec::new();

        for event in self.collision_recv.try_iter() {
            let (collider1, collider2) = (event.collider1(), event.collider2());
            let kind = if event.started() {
                OverlapKind::Began
            } else {
                OverlapKind::Ended
            };

            if let (Some(a), Some(b)) = (
                self.collider_entities.get(&collider1).copied(),
                self.collider_entities.get(&collider2).copied(),
            ) {
                events.push(IntersectionEvent { a, b, kind });
            }

            if event.removed() {
                for handle in [collider1, collider2] {
                    if !self.colliders.contains(handle) {
                        self.collider_entities.remove(&handle);
                    }
                }
            }
        }

        events
    }
}
