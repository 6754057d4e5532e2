//! Generic reuse pool with generational handles.
//!
//! A `Pool<T>` owns every instance it ever created. Instances cycle between two
//! owner states:
//!
//! ```text
//!            acquire()                      release()
//!   Free  ─────────────────▶  InUse  ─────────────────▶  Free
//!     ▲                                                   │
//!     └──────────── (idle count > soft capacity) ─────────┘──▶ disposed (slot vacant)
//! ```
//!
//! The pool never touches the world itself. Everything engine-specific
//! (spawning, showing, hiding, despawning) lives behind [`PoolHooks`], which is
//! implemented by an archetype descriptor per entity kind.
//!
//! # Invariants
//! - `live_count() == free_count() + in_use_count() <= hard_capacity`.
//! - `acquire()` never returns a handle that is currently `InUse`.
//! - `created_total()` never decreases.
//! - A handle is only valid for the acquire that produced it: the slot
//!   generation is bumped on every acquire, so late users get `StaleHandle`.

use bevy::prelude::*;
use thiserror::Error;

/// Identifies one acquire of one pooled instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    index: u32,
    generation: u32,
}

/// Back-reference from a pooled entity to the acquire that activated it.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pooled(pub PoolHandle);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Capacity decision: the caller should skip the operation this tick.
    #[error("pool exhausted: all {capacity} instances are in use")]
    Exhausted { capacity: usize },
    #[error("handle {0:?} was already released")]
    DoubleRelease(PoolHandle),
    #[error("handle {0:?} refers to a recycled instance")]
    StaleHandle(PoolHandle),
    #[error("handle {0:?} does not belong to this pool")]
    UnknownHandle(PoolHandle),
}

/// Sizing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Instances created up front by `prewarm`.
    pub prewarm: usize,
    /// Maximum number of idle instances kept around after release.
    pub soft_capacity: usize,
    /// Maximum number of live instances (free + in use).
    pub hard_capacity: usize,
}

impl PoolConfig {
    /// Soft capacity defaults to twice the prewarm count, clamped to the hard capacity.
    pub fn new(prewarm: usize, hard_capacity: usize) -> Self {
        let hard_capacity = hard_capacity.max(1);
        let prewarm = prewarm.min(hard_capacity);
        Self {
            prewarm,
            soft_capacity: (prewarm * 2).clamp(1, hard_capacity),
            hard_capacity,
        }
    }
}

/// Engine-side callbacks for one kind of pooled instance.
pub trait PoolHooks<T> {
    /// Build a new inactive instance.
    fn create(&mut self) -> T;

    /// The instance is about to be handed out under `handle`.
    fn on_acquire(&mut self, _handle: PoolHandle, _item: &T) {}

    /// The instance went back to the free list.
    fn on_release(&mut self, _item: &T) {}

    /// The instance is being destroyed for good.
    fn on_dispose(&mut self, _item: T) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Free,
    InUse,
    Vacant,
}

#[derive(Debug)]
struct Slot<T> {
    item: Option<T>,
    generation: u32,
    state: SlotState,
}

#[derive(Debug)]
pub struct Pool<T> {
    config: PoolConfig,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    vacant: Vec<u32>,
    in_use: usize,
    created_total: u64,
}

impl<T> Pool<T> {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            slots: Vec::with_capacity(config.hard_capacity),
            free: Vec::with_capacity(config.soft_capacity),
            vacant: Vec::new(),
            in_use: 0,
            created_total: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn in_use_count(&self) -> usize {
        self.in_use
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.free.len() + self.in_use
    }

    /// Total instances ever created (monotonic).
    #[inline]
    pub fn created_total(&self) -> u64 {
        self.created_total
    }

    /// Create up to `n` instances in the free state. Returns how many were created.
    pub fn prewarm(&mut self, n: usize, hooks: &mut impl PoolHooks<T>) -> usize {
        let room = self.config.hard_capacity - self.live_count();
        let n = n.min(room);
        for _ in 0..n {
            let index = self.create_slot(hooks);
            self.free.push(index);
        }
        n
    }

    /// Hand out a free instance, growing on demand up to the hard capacity.
    pub fn acquire(&mut self, hooks: &mut impl PoolHooks<T>) -> Result<PoolHandle, PoolError> {
        let index = match self.free.pop() {
            Some(index) => index,
            None if self.live_count() < self.config.hard_capacity => self.create_slot(hooks),
            None => {
                return Err(PoolError::Exhausted {
                    capacity: self.config.hard_capacity,
                });
            }
        };

        let slot = &mut self.slots[index as usize];
        debug_assert_eq!(slot.state, SlotState::Free, "free list held a non-free slot");
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = SlotState::InUse;
        self.in_use += 1;

        let handle = PoolHandle {
            index,
            generation: slot.generation,
        };
        if let Some(item) = slot.item.as_ref() {
            hooks.on_acquire(handle, item);
        }
        Ok(handle)
    }

    /// Return an instance. Releasing twice is reported and leaves the pool untouched.
    pub fn release(&mut self, handle: PoolHandle, hooks: &mut impl PoolHooks<T>) -> Result<(), PoolError> {
        let slot = self.checked_slot(handle)?;
        if slot.state != SlotState::InUse {
            return Err(PoolError::DoubleRelease(handle));
        }

        let index = handle.index as usize;
        self.in_use -= 1;

        if self.free.len() >= self.config.soft_capacity {
            let slot = &mut self.slots[index];
            slot.state = SlotState::Vacant;
            if let Some(item) = slot.item.take() {
                hooks.on_dispose(item);
            }
            self.vacant.push(handle.index);
            return Ok(());
        }

        let slot = &mut self.slots[index];
        slot.state = SlotState::Free;
        if let Some(item) = slot.item.as_ref() {
            hooks.on_release(item);
        }
        self.free.push(handle.index);
        Ok(())
    }

    /// The instance behind `handle`, if that acquire is still live.
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        match self.checked_slot(handle) {
            Ok(slot) if slot.state == SlotState::InUse => slot.item.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_in_use(&self, handle: PoolHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Destroy every instance, free or in use. Outstanding handles become stale.
    pub fn dispose(&mut self, hooks: &mut impl PoolHooks<T>) {
        for slot in &mut self.slots {
            if let Some(item) = slot.item.take() {
                hooks.on_dispose(item);
            }
        }
        // Generations keep counting up across a dispose so old handles stay stale.
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.state = SlotState::Vacant;
            slot.generation = slot.generation.wrapping_add(1);
            self.vacant.push(index as u32);
        }
        self.vacant.sort_unstable_by(|a, b| b.cmp(a));
        self.vacant.dedup();
        self.free.clear();
        self.in_use = 0;
    }

    fn checked_slot(&self, handle: PoolHandle) -> Result<&Slot<T>, PoolError> {
        let slot = self
            .slots
            .get(handle.index as usize)
            .ok_or(PoolError::UnknownHandle(handle))?;
        if slot.generation != handle.generation {
            return Err(PoolError::StaleHandle(handle));
        }
        Ok(slot)
    }

    fn create_slot(&mut self, hooks: &mut impl PoolHooks<T>) -> u32 {
        let item = hooks.create();
        self.created_total += 1;

        if let Some(index) = self.vacant.pop() {
            let slot = &mut self.slots[index as usize];
            slot.item = Some(item);
            slot.state = SlotState::Free;
            return index;
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            item: Some(item),
            generation: 0,
            state: SlotState::Free,
        });
        index
    }
}
