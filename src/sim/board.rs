//! Board manager: the live marker set
//!
//! Markers are scattered at random positions so that their square hit
//! bounds never overlap: centers differ by more than the marker size along
//! at least one axis. That also keeps every center pair at least `D_min`
//! apart, and the marker under the pointer is always unique.

use glam::Vec2;
use rand::Rng;

use super::state::{GemKind, Marker, MarkerId};
use crate::square_contains;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Board {
    /// Live markers (sorted by id for deterministic iteration)
    markers: Vec<Marker>,
    min: Vec2,
    max: Vec2,
    marker_size: f32,
    next_id: u32,
}

impl Board {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            markers: Vec::new(),
            min: tuning.board_min,
            max: tuning.board_max,
            marker_size: tuning.marker_size,
            next_id: 1,
        }
    }

    /// Minimum center distance between two live markers
    pub fn min_separation(&self) -> f32 {
        self.marker_size
    }

    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// No live markers left: the round-clear signal
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn is_alive(&self, id: MarkerId) -> bool {
        self.get(id).is_some()
    }

    /// Check whether `pos` lies within the bounds of live marker `id`
    pub fn bounds_contain(&self, id: MarkerId, pos: Vec2) -> bool {
        self.get(id)
            .is_some_and(|m| square_contains(m.pos, self.marker_size, pos))
    }

    /// The live marker whose bounds contain `pos`
    pub fn marker_at(&self, pos: Vec2) -> Option<&Marker> {
        self.markers
            .iter()
            .find(|m| square_contains(m.pos, self.marker_size, pos))
    }

    /// True if a marker centered at `pos` would have bounds disjoint from
    /// every live marker's (so also at least `D_min` from each center)
    pub fn is_clear(&self, pos: Vec2) -> bool {
        self.markers
            .iter()
            .all(|m| (m.pos - pos).abs().max_element() > self.marker_size)
    }

    /// Place a marker at an exact position; `None` if it would crowd a neighbor
    pub fn place(&mut self, kind: GemKind, pos: Vec2) -> Option<Marker> {
        if !self.is_clear(pos) {
            return None;
        }
        let marker = Marker {
            id: MarkerId(self.next_id),
            pos,
            kind,
        };
        self.next_id += 1;
        self.markers.push(marker);
        Some(marker)
    }

    /// Scatter up to `min(count, max_markers)` markers. Kinds follow the
    /// difficulty curve for `count`. A marker that cannot find room within
    /// the attempt budget is skipped. Returns the markers actually placed.
    pub fn spawn<R: Rng + ?Sized>(&mut self, count: u32, tuning: &Tuning, rng: &mut R) -> Vec<Marker> {
        let target = count.min(tuning.max_markers);
        let kinds = tuning.active_kinds(count);
        let mut placed = Vec::with_capacity(target as usize);
        let mut skipped = 0u32;

        for _ in 0..target {
            let kind = kinds[rng.random_range(0..kinds.len())];
            let mut marker = None;
            for _ in 0..tuning.max_placement_attempts {
                let pos = Vec2::new(
                    rng.random_range(self.min.x..=self.max.x),
                    rng.random_range(self.min.y..=self.max.y),
                );
                marker = self.place(kind, pos);
                if marker.is_some() {
                    break;
                }
            }
            match marker {
                Some(marker) => placed.push(marker),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!(
                "Board too dense: skipped {} of {} markers after {} attempts each",
                skipped,
                target,
                tuning.max_placement_attempts
            );
        }
        log::info!(
            "Spawned {} markers ({} kinds) for spawn count {}",
            placed.len(),
            kinds.len(),
            count
        );
        placed
    }

    /// Delete a marker; `None` if it was already gone
    pub fn remove(&mut self, id: MarkerId) -> Option<Marker> {
        let idx = self.markers.iter().position(|m| m.id == id)?;
        Some(self.markers.remove(idx))
    }

    /// Delete every marker, returning them
    pub fn clear(&mut self) -> Vec<Marker> {
        std::mem::take(&mut self.markers)
    }
}
