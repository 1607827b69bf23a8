use hecs::{Entity, World};
use log::{trace, warn};

use crate::{
    components::{Collider, GrabVolume, Grabbable, GrabbableLookup, Grabber, Parent},
    contexts::{OverlapKind, PhysicsContext},
};

/// Something started or stopped touching one of a grabber's grab volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEvent {
    /// The entity carrying the [`GrabVolume`]
    pub volume: Entity,
    /// The entity whose collider touched it
    pub other: Entity,
    /// Did the overlap begin or end?
    pub kind: OverlapKind,
}

/// Grab detection system
/// Turns intersections reported by the physics simulation into grab candidates.
/// Run this after stepping physics and before `grabbing_system`, so a grab sees every overlap from the same tick.
pub fn grab_detection_system(world: &World, physics_context: &mut PhysicsContext) {
    for event in physics_context.drain_intersection_events() {
        // Either side of the pair could be a grab volume. Two hands touching each other means both are.
        for (volume, other) in [(event.a, event.b), (event.b, event.a)] {
            if world.get::<&GrabVolume>(volume).is_err() {
                continue;
            }
            apply_overlap_event(
                world,
                OverlapEvent {
                    volume,
                    other,
                    kind: event.kind,
                },
            );
        }
    }
}

/// Apply a single overlap notification to the grabber that owns the volume.
///
/// Returns `true` if a grabber's candidates changed. Entities that don't resolve to a [`Grabbable`] are
/// ignored, as are overlaps reported while the grabber's volumes are switched off.
pub fn apply_overlap_event(world: &World, event: OverlapEvent) -> bool {
    let Ok(grabber_entity) = world.get::<&GrabVolume>(event.volume).map(|v| v.grabber) else {
        return false;
    };
    let Ok(mut grabber) = world.get::<&mut Grabber>(grabber_entity) else {
        warn!(
            "Grab volume {:?} belongs to {:?}, which isn't a grabber",
            event.volume, grabber_entity
        );
        return false;
    };
    if !grabber.grab_volumes_enabled {
        return false;
    }
    let Some(grabbable) = resolve_grabbable(world, event.other, grabber.config.lookup) else {
        return false;
    };

    match event.kind {
        OverlapKind::Began => {
            let count = grabber.candidates.overlap_began(grabbable);
            trace!("{grabbable:?} entered {grabber_entity:?}'s reach ({count} overlaps)");
            true
        }
        OverlapKind::Ended => match grabber.candidates.overlap_ended(grabbable) {
            Some(count) => {
                trace!("{grabbable:?} left {grabber_entity:?}'s reach ({count} overlaps left)");
                true
            }
            None => false,
        },
    }
}

/// Find the grabbable an entity belongs to, according to `lookup`.
///
/// With [`GrabbableLookup::SelfThenAncestors`] the entity's [`Parent`] chain is walked until something
/// [`Grabbable`] turns up.
pub fn resolve_grabbable(world: &World, entity: Entity, lookup: GrabbableLookup) -> Option<Entity> {
    let mut current = entity;

    // A chain can't be longer than the number of entities, unless somebody has made a cycle.
    for _ in 0..=world.len() {
        if world.get::<&Grabbable>(current).is_ok() {
            return Some(current);
        }
        if lookup == GrabbableLookup::SelfOnly {
            return None;
        }
        current = world.get::<&Parent>(current).ok()?.0;
    }

    warn!("{entity:?} has a cycle in its parents");
    None
}

/// Rebuild a grabber's candidates from whatever its volumes are touching right now.
/// Used when the volumes are switched back on after a grab.
pub(crate) fn seed_candidates_from_volumes(
    world: &World,
    physics_context: &PhysicsContext,
    grabber: &mut Grabber,
) {
    for &volume in &grabber.grab_volumes {
        let Ok(handle) = world.get::<&Collider>(volume).map(|c| c.handle) else {
            warn!("Grab volume {volume:?} has no collider");
            continue;
        };
        for other in physics_context.intersecting_entities(handle) {
            if let Some(grabbable) = resolve_grabbable(world, other, grabber.config.lookup) {
                grabber.candidates.overlap_began(grabbable);
            }
        }
    }
}
