use alloc::collections::VecDeque;
use alloc::vec::Vec;

#[cfg(target_pointer_width = "64")]
pub type HalfSize = u32;
#[cfg(target_pointer_width = "32")]
pub type HalfSize = u16;
#[cfg(target_pointer_width = "16")]
pub type HalfSize = u8;

pub trait IndexType: Copy + PartialEq + Default {
    fn max_value() -> usize;
    fn from_usize(v: usize) -> Self;
    fn as_usize(&self) -> usize;
}

macro_rules! index_type {
    ($($t:ty),*) => {
        $(
            impl IndexType for $t {
                fn max_value() -> usize {
                    <$t>::MAX as usize
                }
                fn from_usize(v: usize) -> Self {
                    v as Self
                }
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

index_type!(u8, u16, u32, usize);

/// Reference to a slot in a [`GenArena`]. A handle stays valid until the item
/// it was issued for is removed; after that the slot's generation moves on and
/// the handle is rejected even if the slot gets reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    pub index: HalfSize,
    pub generation: HalfSize,
}

impl Handle {
    pub fn new(index: HalfSize, generation: HalfSize) -> Self {
        Self { index, generation }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("no live item for handle")]
    NotFound,
    #[error("arena index space exhausted")]
    OutOfMemory,
}

struct Slot<T> {
    generation: HalfSize,
    item: Option<T>,
}

pub struct GenArena<T, I: IndexType> {
    slots: Vec<Slot<T>>,
    free_slots: VecDeque<I>,
    live: usize,
}

impl<T, I: IndexType> GenArena<T, I> {
    pub fn new(initial_capacity: usize) -> Self {
        assert!(
            initial_capacity <= I::max_value(),
            "Initial capacity cannot exceed the max value of the index type"
        );
        assert!(initial_capacity > 0, "Initial capacity cannot be zero");

        let mut arena = Self {
            slots: Vec::with_capacity(initial_capacity),
            free_slots: VecDeque::with_capacity(initial_capacity),
            live: 0,
        };
        arena.extend_to(initial_capacity);
        arena
    }

    fn extend_to(&mut self, new_size: usize) {
        for index in self.slots.len()..new_size {
            self.slots.push(Slot {
                generation: 0,
                item: None,
            });
            self.free_slots.push_back(I::from_usize(index));
        }
    }

    fn grow(&mut self) -> Result<(), Error> {
        let current = self.slots.len().max(1);
        if current >= I::max_value() {
            return Err(Error::OutOfMemory);
        }
        let new_size = (current + current).min(I::max_value());
        log::debug!("arena: growing from {} to {} slots", current, new_size);
        self.extend_to(new_size);
        Ok(())
    }

    pub fn add(&mut self, item: T) -> Result<Handle, Error> {
        if self.free_slots.is_empty() {
            self.grow()?;
        }

        let index = self.free_slots.pop_front().ok_or(Error::OutOfMemory)?;
        let slot = &mut self.slots[index.as_usize()];
        slot.item = Some(item);
        let generation = slot.generation;
        self.live += 1;

        Ok(Handle::new(index.as_usize() as HalfSize, generation))
    }

    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    fn slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    pub fn get(&self, handle: Handle) -> Result<&T, Error> {
        self.slot(handle)
            .and_then(|slot| slot.item.as_ref())
            .ok_or(Error::NotFound)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut T, Error> {
        self.slot_mut(handle)
            .and_then(|slot| slot.item.as_mut())
            .ok_or(Error::NotFound)
    }

    pub fn remove(&mut self, handle: Handle) -> Result<T, Error> {
        let slot = self.slot_mut(handle).ok_or(Error::NotFound)?;
        let item = slot.item.take().ok_or(Error::NotFound)?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_slots.push_back(I::from_usize(handle.index as usize));
        self.live -= 1;
        Ok(item)
    }

    /// Drops every item and invalidates every outstanding handle. Slots are
    /// kept, so the arena does not shrink.
    pub fn clear(&mut self) {
        self.free_slots.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.item.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_slots.push_back(I::from_usize(index));
        }
        self.live = 0;
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
