//! Unbounded pool with a bounded free cache.

use ludus_core::{ItemAllocator, Pool, PoolError, SlotRef};

/// A pool with no maximum size.
///
/// Appropriate when true capacity is unknowable in advance: allocation
/// never fails and [`Pool::is_full`] is constantly false. Freed slots are
/// recycled through a cache capped at `max_cached_free`; a free beyond
/// the cap drops the item instead (its slot becomes a permanent
/// tombstone), bounding how much recyclable state the pool retains.
///
/// Because this strategy does not promise an enumerable live set,
/// [`Pool::clear`] is unsupported and panics: a caller that needs bulk
/// eviction is using the wrong strategy for its retention needs.
pub struct UncappedPool<T> {
    /// Slab of slots; `None` marks a tombstoned (dropped) slot.
    slots: Vec<Option<T>>,
    /// Per-slot liveness, parallel to `slots`.
    live: Vec<bool>,
    /// Freed slots available for re-use, LIFO, at most `max_cached_free`.
    free_slots: Vec<u32>,
    /// Cap on the free cache.
    max_cached_free: usize,
    /// Number of items currently allocated.
    in_use: usize,
}

impl<T> UncappedPool<T> {
    /// Create a new pool recycling at most `max_cached_free` freed items.
    pub fn new(max_cached_free: usize) -> Self {
        Self {
            slots: Vec::new(),
            live: Vec::new(),
            free_slots: Vec::new(),
            max_cached_free,
            in_use: 0,
        }
    }

    /// Number of freed items currently cached for re-use.
    pub fn cached_free(&self) -> usize {
        self.free_slots.len()
    }
}

impl<T> Pool<T> for UncappedPool<T> {
    fn allocate(&mut self, allocator: &mut dyn ItemAllocator<T>) -> Result<SlotRef, PoolError> {
        if let Some(slot) = self.free_slots.pop() {
            let item = self.slots[slot as usize]
                .as_mut()
                .expect("cached free slot always holds an item");
            allocator.reset_item(item, false);
            self.live[slot as usize] = true;
            self.in_use += 1;
            return Ok(SlotRef(slot));
        }

        let slot = SlotRef(self.slots.len() as u32);
        let item = allocator.new_item(slot)?;
        self.slots.push(Some(item));
        self.live.push(true);
        self.in_use += 1;
        Ok(slot)
    }

    fn free(&mut self, slot: SlotRef) {
        assert!(
            self.live.get(slot.index()).copied() == Some(true),
            "free of a slot that is not allocated: {slot}"
        );
        self.live[slot.index()] = false;
        if self.free_slots.len() < self.max_cached_free {
            self.free_slots.push(slot.0);
        } else {
            // Cache full: drop the item. The slot is never reused.
            self.slots[slot.index()] = None;
        }
        self.in_use -= 1;
    }

    fn get(&self, slot: SlotRef) -> &T {
        assert!(
            self.live.get(slot.index()).copied() == Some(true),
            "get of a slot that is not allocated: {slot}"
        );
        self.slots[slot.index()]
            .as_ref()
            .expect("live slot always holds an item")
    }

    fn get_mut(&mut self, slot: SlotRef) -> &mut T {
        assert!(
            self.live.get(slot.index()).copied() == Some(true),
            "get_mut of a slot that is not allocated: {slot}"
        );
        self.slots[slot.index()]
            .as_mut()
            .expect("live slot always holds an item")
    }

    fn clear(&mut self, _allocator: &mut dyn ItemAllocator<T>, _filtered: bool) {
        panic!("clear() is not supported on UncappedPool: it does not retain an enumerable live set");
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    fn in_use(&self) -> usize {
        self.in_use
    }

    fn is_full(&self) -> bool {
        false
    }

    fn raise_free_threshold(&mut self, _threshold: usize) {
        // No capacity, no backpressure signal to tune.
    }
}
