//! Chunk Slot Pool - fixed number of reusable chunk slots
//!
//! - Capacity is fixed at construction; slots are never added or removed
//! - Lookup by chunk coordinates reuses an active slot before claiming a free one
//! - Deactivating a slot keeps its display lists so the next chunk can refill them

use crate::render::geometry::DisplayList;

/// Index of a slot inside its pool
pub type SlotIndex = usize;

/// Cached geometry of one chunk, one display list per pass
#[derive(Debug)]
pub struct ChunkGeometry {
    pub opaque: DisplayList,
    pub blended: DisplayList,
}

impl ChunkGeometry {
    fn new(capacity_hint: usize) -> Self {
        Self {
            opaque: DisplayList::with_capacity(capacity_hint),
            blended: DisplayList::with_capacity(capacity_hint),
        }
    }
}

/// A slot in the chunk pool
#[derive(Debug, Default)]
pub struct ChunkSlot {
    /// Bound to a chunk and drawable
    active: bool,
    /// Cached geometry is stale
    needs_rebuild: bool,
    /// Chunk-grid coordinates (meaningful while active)
    chunk_x: u32,
    chunk_z: u32,
    /// Allocated on first build, kept for the slot's lifetime
    geometry: Option<ChunkGeometry>,
}

impl ChunkSlot {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    /// Chunk-grid coordinates (x, z)
    pub fn coords(&self) -> (u32, u32) {
        (self.chunk_x, self.chunk_z)
    }

    pub fn geometry(&self) -> Option<&ChunkGeometry> {
        self.geometry.as_ref()
    }

    fn holds(&self, chunk_x: u32, chunk_z: u32) -> bool {
        self.active && self.chunk_x == chunk_x && self.chunk_z == chunk_z
    }

    /// Bind the slot and clear its dirty flag before a rebuild
    pub(crate) fn activate(&mut self) {
        self.active = true;
        self.needs_rebuild = false;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
        self.needs_rebuild = false;
    }

    /// Display lists for writing, allocated on first use
    pub(crate) fn geometry_mut(&mut self, capacity_hint: usize) -> &mut ChunkGeometry {
        self.geometry.get_or_insert_with(|| ChunkGeometry::new(capacity_hint))
    }
}

/// Fixed-capacity pool of chunk slots.
///
/// Scans run in slot-index order and the first match wins, so slot choice is
/// deterministic. At most one active slot holds a given chunk.
#[derive(Debug)]
pub struct ChunkSlotPool {
    slots: Vec<ChunkSlot>,
}

impl ChunkSlotPool {
    /// Create a pool with `capacity` inactive slots
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| ChunkSlot::default()).collect();
        log::info!("Created chunk slot pool: {} slots", capacity);
        Self { slots }
    }

    /// Find the active slot for a chunk, or claim a free one.
    ///
    /// A claimed slot gets the requested coordinates but stays inactive until
    /// it is built. Returns `None` when every slot is active with other
    /// coordinates.
    pub fn find_or_allocate(&mut self, chunk_x: u32, chunk_z: u32) -> Option<SlotIndex> {
        if let Some(idx) = self.find_active(chunk_x, chunk_z) {
            log::trace!("Chunk ({}, {}) already bound to slot {}", chunk_x, chunk_z, idx);
            return Some(idx);
        }

        let idx = self.slots.iter().position(|slot| !slot.active)?;
        let slot = &mut self.slots[idx];
        slot.chunk_x = chunk_x;
        slot.chunk_z = chunk_z;
        log::trace!("Claimed free slot {} for chunk ({}, {})", idx, chunk_x, chunk_z);
        Some(idx)
    }

    /// Index of the active slot holding a chunk
    pub fn find_active(&self, chunk_x: u32, chunk_z: u32) -> Option<SlotIndex> {
        self.slots.iter().position(|slot| slot.holds(chunk_x, chunk_z))
    }

    /// Flag an active chunk's geometry as stale.
    ///
    /// Returns false when no active slot holds the chunk, which is normal for
    /// chunks outside the render distance.
    pub fn mark_dirty(&mut self, chunk_x: u32, chunk_z: u32) -> bool {
        match self.slots.iter_mut().find(|slot| slot.holds(chunk_x, chunk_z)) {
            Some(slot) => {
                slot.needs_rebuild = true;
                true
            }
            None => {
                log::debug!("No active chunk ({}, {}) to mark for update", chunk_x, chunk_z);
                false
            }
        }
    }

    /// Deactivate every slot, keeping display lists (world reload)
    pub fn deactivate_all(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    /// Deactivate active slots whose coordinates fail `keep`.
    /// Returns the number of slots evicted.
    pub fn retain_active(&mut self, mut keep: impl FnMut(u32, u32) -> bool) -> usize {
        let mut evicted = 0;
        for slot in self.slots.iter_mut().filter(|slot| slot.active) {
            if !keep(slot.chunk_x, slot.chunk_z) {
                slot.deactivate();
                evicted += 1;
            }
        }
        evicted
    }

    /// Indices of active slots with stale geometry
    pub fn dirty_slots(&self) -> Vec<SlotIndex> {
        self.active_slots()
            .filter(|(_, slot)| slot.needs_rebuild)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Active slots in index order
    pub fn active_slots(&self) -> impl Iterator<Item = (SlotIndex, &ChunkSlot)> {
        self.slots.iter().enumerate().filter(|(_, slot)| slot.active)
    }

    pub fn slot(&self, idx: SlotIndex) -> Option<&ChunkSlot> {
        self.slots.get(idx)
    }

    pub(crate) fn slot_mut(&mut self, idx: SlotIndex) -> Option<&mut ChunkSlot> {
        self.slots.get_mut(idx)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }
}
