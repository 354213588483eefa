use crate::list::NodeRef;

/// A link to a neighbor node, as an arena index. `None` means the list end.
pub(crate) type Link = Option<usize>;

pub(crate) struct Node<T> {
    pub(crate) prev: Link,
    pub(crate) next: Link,
    pub(crate) element: T,
}

enum Entry<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

#[cold]
#[inline(never)]
fn corrupt_slot(index: usize) -> ! {
    panic!("arena slot {} is not in the expected state", index);
}

/// The `u32` form of a slot index, as stored in a [`NodeRef`].
fn handle_index(index: usize) -> u32 {
    match u32::try_from(index) {
        Ok(index) => index,
        Err(_) => panic!("arena cannot address more than {} nodes", u32::MAX),
    }
}

/// Storage for the nodes of one list.
///
/// Slots are reused through a free list. Freeing a slot bumps its
/// generation, so a [`NodeRef`] issued before the slot was freed no longer
/// resolves. A slot whose generation is exhausted is retired instead of
/// reused.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Reserves room for `additional` more nodes, counting free slots.
    pub(crate) fn reserve(&mut self, additional: usize, len: usize) {
        let free = self.slots.len() - len;
        self.slots.reserve(additional.saturating_sub(free));
    }

    /// Stores `node` in a free slot, or a new one, and returns its index.
    pub(crate) fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index];
                self.free_head = match slot.entry {
                    Entry::Vacant { next_free } => next_free,
                    Entry::Occupied(_) => corrupt_slot(index),
                };
                slot.entry = Entry::Occupied(node);
                index
            }
            None => {
                handle_index(self.slots.len());
                self.slots.push(Slot {
                    generation: 0,
                    entry: Entry::Occupied(node),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Vacates the slot at `index` and returns the node it held.
    pub(crate) fn free(&mut self, index: usize) -> Node<T> {
        let slot = &mut self.slots[index];
        let next_generation = slot.generation.checked_add(1);
        let vacant = Entry::Vacant {
            next_free: next_generation.and(self.free_head),
        };
        let node = match std::mem::replace(&mut slot.entry, vacant) {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => corrupt_slot(index),
        };
        // a retired slot stays vacant and off the free list for good
        if let Some(generation) = next_generation {
            slot.generation = generation;
            self.free_head = Some(index);
        }
        node
    }

    pub(crate) fn node(&self, index: usize) -> &Node<T> {
        match &self.slots[index].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => corrupt_slot(index),
        }
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => corrupt_slot(index),
        }
    }

    /// The handle of the occupied slot at `index`.
    pub(crate) fn handle(&self, index: usize) -> NodeRef {
        NodeRef {
            index: handle_index(index),
            generation: self.slots[index].generation,
        }
    }

    /// Resolves a handle to the index of a live node.
    pub(crate) fn resolve(&self, node: NodeRef) -> Option<usize> {
        let index = node.index as usize;
        match self.slots.get(index) {
            Some(Slot {
                generation,
                entry: Entry::Occupied(_),
            }) if *generation == node.generation => Some(index),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn occupied(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.entry, Entry::Occupied(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{handle_index, Arena, Node};

    fn node(element: i32) -> Node<i32> {
        Node {
            prev: None,
            next: None,
            element,
        }
    }

    #[test]
    fn arena_reuses_slots_and_bumps_generation() {
        let mut arena = Arena::new();
        let a = arena.alloc(node(1));
        let b = arena.alloc(node(2));
        let stale = arena.handle(a);
        assert_eq!(arena.resolve(stale), Some(a));

        assert_eq!(arena.free(a).element, 1);
        assert_eq!(arena.resolve(stale), None);
        assert_eq!(arena.occupied(), 1);

        let c = arena.alloc(node(3));
        assert_eq!(c, a);
        assert_eq!(arena.resolve(stale), None);
        assert_eq!(arena.resolve(arena.handle(c)), Some(c));
        assert_eq!(arena.node(b).element, 2);
        assert_eq!(arena.node(c).element, 3);
    }

    #[test]
    fn arena_free_list_is_lifo() {
        let mut arena = Arena::with_capacity(4);
        let indices: Vec<usize> = (0..4).map(|i| arena.alloc(node(i))).collect();
        arena.free(indices[1]);
        arena.free(indices[3]);
        assert_eq!(arena.alloc(node(5)), indices[3]);
        assert_eq!(arena.alloc(node(6)), indices[1]);
        assert_eq!(arena.alloc(node(7)), 4);
        assert_eq!(arena.occupied(), 5);
    }

    #[test]
    fn arena_retires_slot_with_exhausted_generation() {
        let mut arena = Arena::new();
        let a = arena.alloc(node(1));
        arena.slots[a].generation = u32::MAX;
        let last = arena.handle(a);

        assert_eq!(arena.free(a).element, 1);
        assert_eq!(arena.resolve(last), None);
        assert_eq!(arena.free_head, None);

        let b = arena.alloc(node(2));
        assert_ne!(b, a);
        assert_eq!(arena.resolve(last), None);
        assert_eq!(arena.occupied(), 1);

        arena.free(b);
        assert_eq!(arena.alloc(node(3)), b);
    }

    #[test]
    fn handle_index_fits_u32() {
        assert_eq!(handle_index(0), 0);
        assert_eq!(handle_index(u32::MAX as usize), u32::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "arena cannot address more than")]
    fn handle_index_overflow_panics() {
        handle_index(u32::MAX as usize + 1);
    }

    #[test]
    #[should_panic]
    fn arena_vacant_access_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(node(1));
        arena.free(a);
        let _ = arena.node(a);
    }
}
