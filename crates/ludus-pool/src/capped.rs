//! Fixed-capacity pool with lazy growth and LIFO recycling.

use ludus_core::{ItemAllocator, Pool, PoolError, SlotRef};

/// A pool with a fixed maximum size.
///
/// Items are constructed lazily: the backing vector grows one item at a
/// time until it reaches capacity (its length is the high-water mark that
/// distinguishes "grow" from "recycle"), after which every allocation is
/// served from the free list. Freed slots are recycled LIFO, which keeps
/// recently-touched items hot in cache.
///
/// Per-slot liveness is tracked so that a double free or a `get` on a
/// freed slot is caught immediately rather than corrupting the free list,
/// and so that a filtered [`clear`](Pool::clear) only consults the
/// eviction predicate on items that are actually allocated.
pub struct CappedPool<T> {
    /// Maximum number of items this pool will ever materialize.
    capacity: usize,
    /// Free slots required for `is_full` to report false.
    free_threshold: usize,
    /// The backing store. `items.len()` is the high-water mark.
    items: Vec<T>,
    /// Per-slot liveness, parallel to `items`.
    live: Vec<bool>,
    /// Slots available for re-use, LIFO.
    free_slots: Vec<u32>,
    /// Number of items currently allocated.
    in_use: usize,
}

impl<T> CappedPool<T> {
    /// Default free-slot headroom for [`Pool::is_full`].
    ///
    /// An absolute count rather than a fraction: the search loop frees in
    /// small batches, so a fixed number of slots of slack is enough for
    /// allocations already in flight regardless of pool size.
    pub const DEFAULT_FREE_THRESHOLD: usize = 200;

    /// Create a new pool of the given maximum size.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            free_threshold: Self::DEFAULT_FREE_THRESHOLD,
            items: Vec::new(),
            live: Vec::new(),
            free_slots: Vec::new(),
            in_use: 0,
        }
    }

    /// The high-water mark: number of items ever materialized.
    pub fn high_water_mark(&self) -> usize {
        self.items.len()
    }
}

impl<T> Pool<T> for CappedPool<T> {
    fn allocate(&mut self, allocator: &mut dyn ItemAllocator<T>) -> Result<SlotRef, PoolError> {
        // Prefer recycling: it avoids construction cost and keeps the
        // materialized set at its high-water mark.
        if let Some(slot) = self.free_slots.pop() {
            let item = &mut self.items[slot as usize];
            allocator.reset_item(item, false);
            self.live[slot as usize] = true;
            self.in_use += 1;
            return Ok(SlotRef(slot));
        }

        assert!(
            self.items.len() < self.capacity,
            "capped pool unexpectedly full: callers must check is_full() and free items first"
        );
        let slot = SlotRef(self.items.len() as u32);
        // Construct before any state change so a failure leaves the pool
        // exactly as it was.
        let item = allocator.new_item(slot)?;
        self.items.push(item);
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
        self.free_slots.push(slot.0);
        self.in_use -= 1;
    }

    fn get(&self, slot: SlotRef) -> &T {
        assert!(
            self.live.get(slot.index()).copied() == Some(true),
            "get of a slot that is not allocated: {slot}"
        );
        &self.items[slot.index()]
    }

    fn get_mut(&mut self, slot: SlotRef) -> &mut T {
        assert!(
            self.live.get(slot.index()).copied() == Some(true),
            "get_mut of a slot that is not allocated: {slot}"
        );
        &mut self.items[slot.index()]
    }

    fn clear(&mut self, allocator: &mut dyn ItemAllocator<T>, filtered: bool) {
        if !filtered {
            // Phase boundary: every materialized item goes back on the
            // free list, reset with internals released.
            self.free_slots.clear();
            for (index, item) in self.items.iter_mut().enumerate() {
                allocator.reset_item(item, true);
                self.live[index] = false;
            }
            self.free_slots.extend(0..self.items.len() as u32);
            self.in_use = 0;
        } else {
            // Partial eviction: the caller's predicate decides, and only
            // live items are consulted.
            for index in 0..self.items.len() {
                if self.live[index] && allocator.should_reset(&self.items[index]) {
                    allocator.reset_item(&mut self.items[index], true);
                    self.live[index] = false;
                    self.free_slots.push(index as u32);
                    self.in_use -= 1;
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

#[cfg(test)]
mod tests {
    use super::*;

    /// Test item carrying enough state to observe resets and identity.
    #[derive(Debug, PartialEq)]
    struct Widget {
        slot: u32,
        payload: i32,
        resets: u32,
    }

    /// Allocator that counts constructions/resets and evicts widgets with
    /// a negative payload when filtering.
    #[derive(Default)]
    struct WidgetAllocator {
        built: usize,
        fail_next: bool,
    }

    impl ItemAllocator<Widget> for WidgetAllocator {
        fn new_item(&mut self, slot: SlotRef) -> Result<Widget, PoolError> {
            if self.fail_next {
                return Err(PoolError::ItemConstruction {
                    reason: "forced failure".into(),
                });
            }
            self.built += 1;
            Ok(Widget {
                slot: slot.0,
                payload: 0,
                resets: 0,
            })
        }

        fn reset_item(&mut self, item: &mut Widget, _free: bool) {
            item.payload = 0;
            item.resets += 1;
        }

        fn should_reset(&self, item: &Widget) -> bool {
            item.payload < 0
        }
    }

    #[test]
    fn grows_lazily_then_recycles() {
        let mut pool = CappedPool::new(2);
        let mut alloc = WidgetAllocator::default();

        let a = pool.allocate(&mut alloc).unwrap();
        let b = pool.allocate(&mut alloc).unwrap();
        assert_eq!((a, b), (SlotRef(0), SlotRef(1)));
        assert_eq!(alloc.built, 2);
        assert_eq!(pool.high_water_mark(), 2);

        pool.free(a);
        let c = pool.allocate(&mut alloc).unwrap();
        // Same identity, recycled rather than rebuilt.
        assert_eq!(c, a);
        assert_eq!(alloc.built, 2);
    }

    #[test]
    fn recycled_item_reset_exactly_once() {
        let mut pool = CappedPool::new(2);
        let mut alloc = WidgetAllocator::default();

        let a = pool.allocate(&mut alloc).unwrap();
        pool.get_mut(a).payload = 42;
        pool.free(a);

        let b = pool.allocate(&mut alloc).unwrap();
        assert_eq!(b, a);
        let item = pool.get(b);
        assert_eq!(item.payload, 0, "reset left it indistinguishable from fresh");
        assert_eq!(item.resets, 1, "exactly one reset between free and re-allocate");
    }

    #[test]
    #[should_panic(expected = "unexpectedly full")]
    fn allocate_past_capacity_panics() {
        let mut pool = CappedPool::new(3);
        let mut alloc = WidgetAllocator::default();
        for _ in 0..3 {
            pool.allocate(&mut alloc).unwrap();
        }
        let _ = pool.allocate(&mut alloc);
    }

    #[test]
    #[should_panic(expected = "not allocated")]
    fn double_free_panics() {
        let mut pool = CappedPool::new(2);
        let mut alloc = WidgetAllocator::default();
        let a = pool.allocate(&mut alloc).unwrap();
        pool.free(a);
        pool.free(a);
    }

    #[test]
    fn construction_failure_leaves_pool_unchanged() {
        let mut pool = CappedPool::new(4);
        let mut alloc = WidgetAllocator::default();
        pool.allocate(&mut alloc).unwrap();

        alloc.fail_next = true;
        let err = pool.allocate(&mut alloc).unwrap_err();
        assert!(matches!(err, PoolError::ItemConstruction { .. }));

        assert_eq!(pool.in_use(), 1);
        assert_eq!(pool.high_water_mark(), 1);

        // The pool still works afterwards.
        alloc.fail_next = false;
        pool.allocate(&mut alloc).unwrap();
        assert_eq!(pool.in_use(), 2);
    }

    #[test]
    fn usage_percent_reports_in_use_fraction() {
        let mut pool = CappedPool::new(10);
        let mut alloc = WidgetAllocator::default();
        for _ in 0..4 {
            pool.allocate(&mut alloc).unwrap();
        }
        assert_eq!(pool.usage_percent(), 40);
    }

    #[test]
    fn is_full_uses_absolute_headroom() {
        let mut pool = CappedPool::new(300);
        let mut alloc = WidgetAllocator::default();

        for _ in 0..100 {
            pool.allocate(&mut alloc).unwrap();
        }
        assert!(!pool.is_full());

        // 101 in use leaves only 199 free slots: under the default
        // 200-slot headroom.
        pool.allocate(&mut alloc).unwrap();
        assert!(pool.is_full());
    }

    #[test]
    fn small_pool_is_always_nearly_full() {
        // Headroom exceeding capacity means the backpressure signal is
        // permanently on; allocation still works up to the hard limit.
        let mut pool = CappedPool::new(3);
        let mut alloc = WidgetAllocator::default();
        assert!(!pool.is_full());
        pool.allocate(&mut alloc).unwrap();
        assert!(pool.is_full());
    }

    #[test]
    fn free_threshold_only_raises() {
        let mut pool = CappedPool::<Widget>::new(1000);
        pool.raise_free_threshold(100); // below default, ignored
        pool.raise_free_threshold(500);

        let mut alloc = WidgetAllocator::default();
        for _ in 0..501 {
            pool.allocate(&mut alloc).unwrap();
        }
        assert!(pool.is_full());
    }

    #[test]
    fn unconditional_clear_frees_everything_and_is_idempotent() {
        let mut pool = CappedPool::new(4);
        let mut alloc = WidgetAllocator::default();
        let slots: Vec<_> = (0..3).map(|_| pool.allocate(&mut alloc).unwrap()).collect();
        pool.free(slots[1]);

        pool.clear(&mut alloc, false);
        assert_eq!(pool.in_use(), 0);

        pool.clear(&mut alloc, false);
        assert_eq!(pool.in_use(), 0);

        // All three materialized slots are reusable without construction.
        let built_before = alloc.built;
        for _ in 0..3 {
            pool.allocate(&mut alloc).unwrap();
        }
        assert_eq!(alloc.built, built_before);
        assert_eq!(pool.in_use(), 3);
    }

    #[test]
    fn filtered_clear_evicts_only_matching_items() {
        let mut pool = CappedPool::new(4);
        let mut alloc = WidgetAllocator::default();
        let a = pool.allocate(&mut alloc).unwrap();
        let b = pool.allocate(&mut alloc).unwrap();
        let c = pool.allocate(&mut alloc).unwrap();

        pool.get_mut(a).payload = -1; // matches predicate
        pool.get_mut(b).payload = 7; // survives
        pool.get_mut(c).payload = -5; // matches predicate

        pool.clear(&mut alloc, true);
        assert_eq!(pool.in_use(), 1);
        assert_eq!(pool.get(b).payload, 7, "survivor untouched");

        // Evicted slots are recycled before any new construction.
        let built_before = alloc.built;
        let d = pool.allocate(&mut alloc).unwrap();
        let e = pool.allocate(&mut alloc).unwrap();
        assert_eq!(alloc.built, built_before);
        let mut recycled = vec![d, e];
        recycled.sort();
        assert_eq!(recycled, vec![a, c]);
    }

    #[test]
    fn capacity_and_in_use_accessors() {
        let mut pool = CappedPool::new(8);
        let mut alloc = WidgetAllocator::default();
        assert_eq!(pool.capacity(), Some(8));
        let a = pool.allocate(&mut alloc).unwrap();
        assert_eq!(pool.in_use(), 1);
        pool.free(a);
        assert_eq!(pool.in_use(), 0);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// For any in-capacity allocate/free interleaving,
            /// `in_use == allocated − freed` and stays within bounds.
            #[test]
            fn in_use_tracks_allocs_minus_frees(
                ops in proptest::collection::vec(any::<bool>(), 1..200),
            ) {
                let capacity = 16usize;
                let mut pool = CappedPool::new(capacity);
                let mut alloc = WidgetAllocator::default();
                let mut held: Vec<SlotRef> = Vec::new();
                let mut allocated = 0usize;
                let mut freed = 0usize;

                for do_alloc in ops {
                    if do_alloc && held.len() < capacity {
                        held.push(pool.allocate(&mut alloc).unwrap());
                        allocated += 1;
                    } else if let Some(slot) = held.pop() {
                        pool.free(slot);
                        freed += 1;
                    }
                    prop_assert_eq!(pool.in_use(), allocated - freed);
                    prop_assert!(pool.in_use() <= capacity);
                }
            }

            /// Recycling never constructs: once at the high-water mark,
            /// the construction count stays put.
            #[test]
            fn construction_count_bounded_by_high_water(
                churn in 1usize..50,
            ) {
                let mut pool = CappedPool::new(4);
                let mut alloc = WidgetAllocator::default();
                let mut held: Vec<SlotRef> = Vec::new();
                for _ in 0..4 {
                    held.push(pool.allocate(&mut alloc).unwrap());
                }
                for _ in 0..churn {
                    let slot = held.pop().unwrap();
                    pool.free(slot);
                    held.push(pool.allocate(&mut alloc).unwrap());
                }
                prop_assert_eq!(alloc.built, 4);
                prop_assert_eq!(pool.high_water_mark(), 4);
            }
        }
    }
}
