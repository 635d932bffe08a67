//! Contiguous-store arena pool with index-addressed slots.

use ludus_core::{ItemAllocator, Pool, PoolError, SlotRef};

/// A fixed-size pool backed by one contiguous store of typed slots.
///
/// Where [`CappedPool`](crate::CappedPool) materializes items one at a
/// time, this strategy allocates its entire backing store in a single
/// step: on the first `allocate`, a prototype item is built through the
/// allocator and cloned into every slot. After that, no item is ever
/// constructed or dropped until the pool itself is discarded — allocation
/// is just handing out the next index from the free-slot array.
///
/// This is the systems-language rendition of an off-heap store: slot
/// indices stand in for addresses, [`Pool::get`] is the typed view at an
/// index, and exclusive access is enforced by the borrow checker plus the
/// free-list discipline (a slot has at most one live handle out at a
/// time).
pub struct SlotPool<T: Clone> {
    /// Number of slots in the backing store.
    capacity: usize,
    /// Free slots required for `is_full` to report false.
    free_threshold: usize,
    /// The backing store, materialized on first allocate.
    store: Option<Vec<T>>,
    /// Slot indices; entries at positions `in_use..` are free.
    free_slots: Vec<u32>,
    /// Per-slot liveness, parallel to the store.
    live: Vec<bool>,
    /// Number of items currently allocated.
    in_use: usize,
}

impl<T: Clone> SlotPool<T> {
    /// Create a new pool of the given size.
    ///
    /// The backing store is not materialized until the first `allocate`,
    /// so constructing a large pool that ends up unused costs nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            // Default to 1% free headroom.
            free_threshold: capacity / 100,
            store: None,
            free_slots: (0..capacity as u32).collect(),
            live: vec![false; capacity],
            in_use: 0,
        }
    }

    /// Whether the backing store has been materialized yet.
    pub fn is_materialized(&self) -> bool {
        self.store.is_some()
    }
}

impl<T: Clone> Pool<T> for SlotPool<T> {
    fn allocate(&mut self, allocator: &mut dyn ItemAllocator<T>) -> Result<SlotRef, PoolError> {
        assert!(
            self.in_use < self.capacity,
            "slot pool unexpectedly full: callers must check is_full() and free items first"
        );

        let store = match &mut self.store {
            Some(store) => store,
            None => {
                // First allocation: build the whole store by cloning a
                // prototype into every slot. A prototype failure leaves
                // the pool unmaterialized and otherwise untouched.
                let prototype = allocator.new_item(SlotRef(0))?;
                self.store.insert(vec![prototype; self.capacity])
            }
        };

        let slot = self.free_slots[self.in_use];
        self.in_use += 1;
        self.live[slot as usize] = true;
        allocator.reset_item(&mut store[slot as usize], false);
        Ok(SlotRef(slot))
    }

    fn free(&mut self, slot: SlotRef) {
        assert!(
            self.live.get(slot.index()).copied() == Some(true),
            "free of a slot that is not allocated: {slot}"
        );
        self.live[slot.index()] = false;
        self.in_use -= 1;
        self.free_slots[self.in_use] = slot.0;
    }

    fn get(&self, slot: SlotRef) -> &T {
        assert!(
            self.live.get(slot.index()).copied() == Some(true),
            "get of a slot that is not allocated: {slot}"
        );
        let store = self
            .store
            .as_ref()
            .expect("a live slot implies a materialized store");
        &store[slot.index()]
    }

    fn get_mut(&mut self, slot: SlotRef) -> &mut T {
        assert!(
            self.live.get(slot.index()).copied() == Some(true),
            "get_mut of a slot that is not allocated: {slot}"
        );
        let store = self
            .store
            .as_mut()
            .expect("a live slot implies a materialized store");
        &mut store[slot.index()]
    }

    fn clear(&mut self, allocator: &mut dyn ItemAllocator<T>, filtered: bool) {
        let Some(store) = self.store.as_mut() else {
            return;
        };

        if !filtered {
            for (index, item) in store.iter_mut().enumerate() {
                allocator.reset_item(item, true);
                self.live[index] = false;
                self.free_slots[index] = index as u32;
            }
            self.in_use = 0;
        } else {
            for index in 0..self.capacity {
                if self.live[index] && allocator.should_reset(&store[index]) {
                    allocator.reset_item(&mut store[index], true);
                    self.live[index] = false;
                    self.in_use -= 1;
                    self.free_slots[self.in_use] = index as u32;
                }
            }
        }
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }

    fn in_use(&self) -> usize {
        self.in_use
    }

    fn is_full(&self) -> bool {
        self.in_use > self.capacity.saturating_sub(self.free_threshold)
    }

    fn raise_free_threshold(&mut self, threshold: usize) {
        if threshold > self.free_threshold {
            self.free_threshold = threshold;
        }
    }
}
