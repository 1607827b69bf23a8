use std::num::NonZeroU32;

use hecs::Entity;

/// The grabbable objects currently overlapping a grabber's grab volumes.
///
/// A single object can be touching several volumes, or have several colliders touching the same volume,
/// so each candidate carries the number of overlaps that are still open. The object stops being a
/// candidate once the last of them ends.
///
/// Candidates are kept in the order they first started overlapping; nothing relies on that order
/// beyond it making snapshots deterministic.
#[derive(Debug, Clone, Default)]
pub struct GrabCandidates {
    entries: Vec<(Entity, NonZeroU32)>,
}

impl GrabCandidates {
    /// Record a new overlap with `grabbable`, returning how many overlaps it now has.
    pub fn overlap_began(&mut self, grabbable: Entity) -> u32 {
        match self.entries.iter_mut().find(|(e, _)| *e == grabbable) {
            Some((_, count)) => {
                *count = count.saturating_add(1);
                count.get()
            }
            None => {
                self.entries.push((grabbable, NonZeroU32::MIN));
                1
            }
        }
    }

    /// Record that an overlap with `grabbable` has ended.
    ///
    /// Returns the overlaps still open, or `None` if `grabbable` was never a candidate.
    pub fn overlap_ended(&mut self, grabbable: Entity) -> Option<u32> {
        let index = self.entries.iter().position(|(e, _)| *e == grabbable)?;
        let (_, count) = self.entries[index];
        match NonZeroU32::new(count.get() - 1) {
            Some(remaining) => {
                self.entries[index].1 = remaining;
                Some(remaining.get())
            }
            None => {
                self.entries.remove(index);
                Some(0)
            }
        }
    }

    /// How many overlaps are open with `grabbable`. Zero if it isn't a candidate.
    pub fn count(&self, grabbable: Entity) -> u32 {
        self.entries
            .iter()
            .find(|(e, _)| *e == grabbable)
            .map_or(0, |(_, count)| count.get())
    }

    /// Is `grabbable` currently a candidate?
    pub fn contains(&self, grabbable: Entity) -> bool {
        self.count(grabbable) > 0
    }

    /// Number of distinct candidates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Are there no candidates?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every candidate
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The candidates, in the order they first started overlapping
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entries.iter().map(|(e, _)| *e)
    }

    /// Copy out the current candidates
    pub fn snapshot(&self) -> Vec<Entity> {
        self.iter().collect()
    }
}
