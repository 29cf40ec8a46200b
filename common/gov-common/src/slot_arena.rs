use multiversx_sc::{
    api::StorageMapperApi,
    codec::{NestedDecode, NestedEncode},
    storage::mappers::VecMapper,
};

/// Dense-with-holes slot storage.
///
/// Every slot is either `Some` (fully populated) or `None` (vacant). Vacated
/// slot indexes go on a LIFO stack and are handed out again before the slot
/// vector grows. Indexes exposed by this type are 0-based; the underlying
/// `VecMapper`s are 1-based.
pub struct SlotArena<SA, T>
where
    SA: StorageMapperApi,
    T: NestedEncode + NestedDecode + 'static,
{
    slots: VecMapper<SA, Option<T>>,
    free_slots: VecMapper<SA, usize>,
}

impl<SA, T> SlotArena<SA, T>
where
    SA: StorageMapperApi,
    T: NestedEncode + NestedDecode + 'static,
{
    pub fn new(slots: VecMapper<SA, Option<T>>, free_slots: VecMapper<SA, usize>) -> Self {
        SlotArena { slots, free_slots }
    }

    /// Stores `item` in the most recently vacated slot, or appends a new one.
    pub fn occupy(&mut self, item: T) -> usize {
        let free_count = self.free_slots.len();
        if free_count == 0 {
            return self.slots.push(&Some(item)) - 1;
        }

        let index = self.free_slots.get(free_count);
        self.free_slots.swap_remove(free_count);
        self.slots.set(index + 1, &Some(item));
        index
    }

    /// Zeroes the slot and makes it the next one to be reused.
    pub fn vacate(&mut self, index: usize) {
        self.slots.set(index + 1, &None);
        self.free_slots.push(&index);
    }

    pub fn replace(&mut self, index: usize, item: T) {
        self.slots.set(index + 1, &Some(item));
    }

    /// `None` both for vacant slots and for indexes past the end.
    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.slots.len() {
            return None;
        }
        self.slots.get(index + 1)
    }

    /// Number of slots, vacant ones included.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
