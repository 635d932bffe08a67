//! The pool contract shared by every allocator strategy.
//!
//! A [`Pool`] hands out reusable items addressed by [`SlotRef`] handles,
//! constructing and recycling them through a caller-supplied
//! [`ItemAllocator`]. The contract is deliberately synchronous and
//! single-owner: one pool instance belongs to exactly one worker at a
//! time, and the implementations perform no internal locking. A search
//! engine that fans out across threads compiles one circuit and creates
//! one pool per worker rather than sharing an instance.

use crate::error::PoolError;
use crate::id::SlotRef;

/// Constructs, resets, and classifies the items held in a pool.
///
/// The pool owns *when* items are built and recycled; the allocator owns
/// *how*. Passing the allocator explicitly at each call site (rather than
/// storing it in the pool) keeps construction policy out of pool state and
/// lets one pool serve phases with different reset predicates.
pub trait ItemAllocator<T> {
    /// Build a brand-new item for the given slot.
    ///
    /// A failure here is propagated by the pool without any state change:
    /// in-use and free counts are exactly as they were before the
    /// `allocate` call.
    fn new_item(&mut self, slot: SlotRef) -> Result<T, PoolError>;

    /// Reset an item for re-use.
    ///
    /// With `free == false` the item is being handed out again and must
    /// afterwards be indistinguishable from a freshly constructed one.
    /// With `free == true` the item is being bulk-evicted and should also
    /// release any internal allocations it holds.
    fn reset_item(&mut self, item: &mut T, free: bool);

    /// Whether a live item should be evicted by a filtered
    /// [`Pool::clear`].
    ///
    /// This is the caller's eviction policy; the pool never decides on
    /// its own which items to evict.
    fn should_reset(&self, item: &T) -> bool;
}

/// A pool of reusable items.
///
/// Three strategies implement this contract in `ludus-pool`, trading off
/// differently:
///
/// - `CappedPool` grows lazily to a fixed capacity, then recycles.
/// - `UncappedPool` recycles through a bounded free cache and otherwise
///   allocates fresh, with no capacity limit.
/// - `SlotPool` materializes one contiguous backing store up front and
///   hands out index-addressed views into it.
pub trait Pool<T> {
    /// Allocate an item, recycling a freed slot when one is available.
    ///
    /// A recycled item is passed through
    /// [`ItemAllocator::reset_item`]`(item, false)` before being handed
    /// out. Construction failures from the allocator are propagated with
    /// no pool mutation.
    ///
    /// # Panics
    ///
    /// Bounded strategies panic when the pool is exhausted (no free slot
    /// and no room to grow). That is a caller contract violation, not a
    /// runtime error: callers are required to consult [`Pool::is_full`]
    /// and free items before allocating into a nearly-full pool.
    fn allocate(&mut self, allocator: &mut dyn ItemAllocator<T>) -> Result<SlotRef, PoolError>;

    /// Return a slot to the pool.
    ///
    /// The item is *not* reset eagerly; reset is deferred to the next
    /// `allocate` or `clear` that touches the slot, so anything the item
    /// still holds remains inspectable until then.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not currently allocated (double free or a
    /// handle that was never handed out).
    fn free(&mut self, slot: SlotRef);

    /// Access the item in a live slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not currently allocated.
    fn get(&self, slot: SlotRef) -> &T;

    /// Mutably access the item in a live slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not currently allocated.
    fn get_mut(&mut self, slot: SlotRef) -> &mut T;

    /// Bulk-evict items, resetting them and returning them to the free
    /// list.
    ///
    /// With `filtered == false` every currently-materialized item is
    /// reset (with `free == true`) and freed; calling it twice in a row
    /// leaves the pool in the same state as calling it once. With
    /// `filtered == true` only live items for which
    /// [`ItemAllocator::should_reset`] holds are evicted; the rest stay
    /// allocated and untouched.
    ///
    /// # Panics
    ///
    /// Panics on strategies that do not retain an enumerable live set
    /// (`UncappedPool`).
    fn clear(&mut self, allocator: &mut dyn ItemAllocator<T>, filtered: bool);

    /// The pool's capacity, or `None` for unbounded strategies.
    fn capacity(&self) -> Option<usize>;

    /// Number of items currently allocated.
    fn in_use(&self) -> usize;

    /// Whether the pool is nearly full.
    ///
    /// This is a proactive backpressure signal, not the true exhaustion
    /// point: it trips while a configurable headroom of slots is still
    /// free, so allocations already in flight can complete. When it
    /// returns true the caller should free items before its next
    /// `allocate`.
    fn is_full(&self) -> bool;

    /// Raise the free-slot headroom used by [`Pool::is_full`].
    ///
    /// The threshold only ever increases; a value below the current one
    /// is ignored. No-op on unbounded strategies.
    fn raise_free_threshold(&mut self, threshold: usize);

    /// Percentage of the pool in use, for instrumentation.
    ///
    /// Unbounded strategies report 0.
    fn usage_percent(&self) -> u8 {
        match self.capacity() {
            Some(capacity) if capacity > 0 => ((self.in_use() * 100) / capacity) as u8,
            _ => 0,
        }
    }
}
