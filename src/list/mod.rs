use std::fmt::{self, Debug, Formatter};
use std::mem;

use crate::error::Result;
use crate::list::arena::{Arena, Link, Node};
use crate::registry::{Functions, Registry};
use crate::{IntoIter, Iter};

mod algorithms;
mod arena;
pub mod iterator;

/// The `List` is a doubly-linked list whose nodes live in an arena owned by
/// the list.
///
/// Inserting or removing at either end, or at a node whose [`NodeRef`] is
/// already known, takes constant time. Reaching a node by position or by
/// value takes *O*(*n*) time.
///
/// Links between nodes are arena indices rather than pointers, so the list
/// owns every node it links and a removed node can never be reached again
/// through a stale handle.
///
/// The `List` contains:
/// - the arena of nodes, with a free list of vacated slots;
/// - `head` and `tail` links (both `None` in an empty list, equal in a list
///   of one element);
/// - the length of the list;
/// - the functions attached by [`List::with_functions`]. `A` and `R` are
///   their argument and return types, both `()` by default.
pub struct List<T, A = (), R = ()> {
    arena: Arena<T>,
    head: Link,
    tail: Link,
    len: usize,
    functions: Registry<List<T, A, R>, A, R>,
}

/// A handle to a node of a [`List`].
///
/// Handles stay valid while their node is in the list, including across
/// [`List::displace`] and [`List::displace_to`]. Once the node is removed the
/// handle is stale: every operation treats it as an absent node, even if the
/// slot has been reused.
///
/// A handle is only meaningful for the list that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Debug for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({}v{})", self.index, self.generation)
    }
}

// private methods
impl<T, A, R> List<T, A, R> {
    fn with_registry(arena: Arena<T>, functions: Registry<Self, A, R>) -> Self {
        Self {
            arena,
            head: None,
            tail: None,
            len: 0,
            functions,
        }
    }

    pub(crate) fn resolve(&self, node: NodeRef) -> Option<usize> {
        self.arena.resolve(node)
    }

    pub(crate) fn node(&self, index: usize) -> &Node<T> {
        self.arena.node(index)
    }

    pub(crate) fn head(&self) -> Link {
        self.head
    }

    pub(crate) fn tail(&self) -> Link {
        self.tail
    }

    /// Make `next` follow `prev`. A missing `prev` makes `next` the head, a
    /// missing `next` makes `prev` the tail.
    pub(crate) fn connect(&mut self, prev: Link, next: Link) {
        match prev {
            Some(prev) => self.arena.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.arena.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Link the unlinked node `index` between the adjacent `prev` and `next`.
    pub(crate) fn link(&mut self, prev: Link, next: Link, index: usize) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, Some(index));
        self.connect(Some(index), next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, Some(index));
            self.assert_adjacent(Some(index), next);
        }
    }

    /// Unlink node `index` by connecting its neighbors, and clear its own
    /// links. The node stays in the arena.
    pub(crate) fn unlink(&mut self, index: usize) {
        let node = self.arena.node_mut(index);
        let prev = node.prev.take();
        let next = node.next.take();
        self.connect(prev, next);
        self.len -= 1;
    }

    /// Allocate a node for `element` and link it between `prev` and `next`.
    fn attach(&mut self, prev: Link, next: Link, element: T) -> NodeRef {
        let index = self.arena.alloc(Node {
            prev: None,
            next: None,
            element,
        });
        self.link(prev, next, index);
        self.arena.handle(index)
    }

    /// Unlink node `index` and free its slot, returning its element.
    fn detach(&mut self, index: usize) -> T {
        self.unlink(index);
        self.arena.free(index).element
    }

    /// Index of the node at `position`, walking from the nearer end.
    pub(crate) fn index_at(&self, position: usize) -> Option<usize> {
        if position >= self.len {
            return None;
        }
        if position < self.len / 2 {
            let mut current = self.head;
            for _ in 0..position {
                current = current.and_then(|index| self.node(index).next);
            }
            current
        } else {
            let mut current = self.tail;
            for _ in 0..(self.len - 1 - position) {
                current = current.and_then(|index| self.node(index).prev);
            }
            current
        }
    }

    #[cfg(debug_assertions)]
    pub(crate) fn assert_adjacent(&self, prev: Link, next: Link) {
        match prev {
            Some(prev) => assert_eq!(self.node(prev).next, next),
            None => assert_eq!(self.head, next),
        }
        match next {
            Some(next) => assert_eq!(self.node(next).prev, prev),
            None => assert_eq!(self.tail, prev),
        }
    }
}

impl<T> List<T> {
    /// Create an empty `List` without attached functions.
    ///
    /// # Examples
    /// ```
    /// use twin_seq::List;
    /// let list: List<u32> = List::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(Arena::new(), Registry::empty())
    }

    /// Create an empty `List` with room for `capacity` nodes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_registry(Arena::with_capacity(capacity), Registry::empty())
    }
}

impl<T, A, R> List<T, A, R> {
    /// Create an empty `List` with the given named functions attached.
    ///
    /// Fails, producing no list, if a name is empty or used twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::{Functions, List, RegistryError};
    ///
    /// let functions = Functions::new()
    ///     .with("head", |list: &mut List<u8, (), Option<u8>>, ()| list.first().copied())
    ///     .with("", |_: &mut List<u8, (), Option<u8>>, ()| None);
    ///
    /// assert_eq!(List::with_functions(functions).err(), Some(RegistryError::EmptyName));
    /// ```
    ///
    /// A function whose first parameter is not this list does not compile:
    ///
    /// ```compile_fail
    /// use twin_seq::{Array, Functions, List};
    ///
    /// let functions = Functions::new().with("len", |array: &mut Array<u8>, ()| array.len());
    /// let list = List::<u8, (), usize>::with_functions(functions);
    /// ```
    pub fn with_functions(functions: Functions<Self, A, R>) -> Result<Self> {
        Ok(Self::with_registry(
            Arena::new(),
            Registry::from_functions(functions)?,
        ))
    }

    /// Runs the function registered under `name`, passing the list itself as
    /// the first argument and `args` as the second.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::{Functions, List, RegistryError};
    ///
    /// let functions = Functions::new().with("rotate", |list: &mut List<char, usize>, times: usize| {
    ///     for _ in 0..times {
    ///         if let Some(front) = list.remove_first() {
    ///             list.add_last(front);
    ///         }
    ///     }
    /// });
    /// let mut list = List::with_functions(functions)?;
    /// list.extend(['a', 'b', 'c']);
    ///
    /// list.run("rotate", 2)?;
    /// assert_eq!(list.to_vec(), vec!['c', 'a', 'b']);
    /// assert_eq!(list.run("reverse", 0), Err(RegistryError::NotFound("reverse".into())));
    /// # Ok::<(), RegistryError>(())
    /// ```
    pub fn run(&mut self, name: &str, args: A) -> Result<R> {
        let function = self.functions.lookup(name)?;
        Ok((*function)(self, args))
    }

    /// The functions attached to this list.
    pub fn functions(&self) -> &Registry<Self, A, R> {
        &self.functions
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of nodes the list can hold without reallocating its arena.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Reserves room for at least `additional` more nodes, counting vacant
    /// slots that will be reused.
    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional, self.len);
    }

    /// Removes all elements, front to back.
    ///
    /// Every node is unlinked and its slot vacated one by one, so handles
    /// issued before the call never resolve to nodes added after it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let first = list.first_node().unwrap();
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.first(), None);
    ///
    /// list.add_last(3);
    /// assert_eq!(list.get(first), None);
    /// ```
    pub fn clear(&mut self) {
        while self.remove_first().is_some() {}
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.head.map(|index| &self.node(index).element)
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.tail.map(|index| &self.node(index).element)
    }

    /// Handle of the head node, or `None` if the list is empty.
    pub fn first_node(&self) -> Option<NodeRef> {
        self.head.map(|index| self.arena.handle(index))
    }

    /// Handle of the tail node, or `None` if the list is empty.
    pub fn last_node(&self) -> Option<NodeRef> {
        self.tail.map(|index| self.arena.handle(index))
    }

    /// Handle of the node following `node`, or `None` if `node` is the tail
    /// or stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::List;
    ///
    /// let list = List::from(['a', 'b']);
    /// let a = list.first_node().unwrap();
    /// let b = list.next_node(a).unwrap();
    /// assert_eq!(list.get(b), Some(&'b'));
    /// assert_eq!(list.prev_node(b), Some(a));
    /// assert_eq!(list.next_node(b), None);
    /// ```
    pub fn next_node(&self, node: NodeRef) -> Option<NodeRef> {
        let index = self.resolve(node)?;
        self.node(index).next.map(|next| self.arena.handle(next))
    }

    /// Handle of the node preceding `node`, or `None` if `node` is the head
    /// or stale.
    pub fn prev_node(&self, node: NodeRef) -> Option<NodeRef> {
        let index = self.resolve(node)?;
        self.node(index).prev.map(|prev| self.arena.handle(prev))
    }

    /// Returns `true` if `node` is a live node of this list.
    pub fn is_live(&self, node: NodeRef) -> bool {
        self.resolve(node).is_some()
    }

    /// The element held by `node`, or `None` if the handle is stale.
    pub fn get(&self, node: NodeRef) -> Option<&T> {
        let index = self.resolve(node)?;
        Some(&self.node(index).element)
    }

    /// Mutable access to the element held by `node`, or `None` if the handle
    /// is stale.
    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut T> {
        let index = self.resolve(node)?;
        Some(&mut self.arena.node_mut(index).element)
    }

    /// Overwrites the element held by `node` and returns the previous one, or
    /// returns `value` back if the handle is stale.
    pub fn set(&mut self, node: NodeRef, value: T) -> std::result::Result<T, T> {
        match self.get_mut(node) {
            Some(element) => Ok(mem::replace(element, value)),
            None => Err(value),
        }
    }

    /// Adds an element first in the list and returns the new node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.add_first(2);
    /// let one = list.add_first(1);
    /// assert_eq!(list.first(), Some(&1));
    /// assert_eq!(list.first_node(), Some(one));
    /// ```
    pub fn add_first(&mut self, value: T) -> NodeRef {
        self.attach(None, self.head, value)
    }

    /// Appends an element to the back of the list and returns the new node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn add_last(&mut self, value: T) -> NodeRef {
        self.attach(self.tail, None, value)
    }

    /// Inserts `value` so that it ends up at `index`, before the node that is
    /// there now. `index == len` appends.
    ///
    /// Returns the value back if `index > len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time at either end, and in
    /// *O*(*n*) time elsewhere.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    ///
    /// assert!(list.add(2, 4).is_ok());
    /// assert!(list.add(4, 5).is_ok());
    /// assert_eq!(list.add(9, 6), Err(6));
    ///
    /// assert_eq!(list.into_vec(), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn add(&mut self, index: usize, value: T) -> std::result::Result<NodeRef, T> {
        if index > self.len {
            return Err(value);
        }
        if index == 0 {
            return Ok(self.add_first(value));
        }
        if index == self.len {
            return Ok(self.add_last(value));
        }
        match self.index_at(index) {
            Some(at) => {
                let prev = self.node(at).prev;
                Ok(self.attach(prev, Some(at), value))
            }
            None => Err(value),
        }
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn remove_first(&mut self) -> Option<T> {
        let head = self.head?;
        Some(self.detach(head))
    }

    /// Removes the last element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        Some(self.detach(tail))
    }

    /// Removes `node` and returns its element, or `None` if the handle is
    /// stale.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// let two = list.add(1, 2).unwrap();
    ///
    /// assert_eq!(list.remove_node(two), Some(2));
    /// assert_eq!(list.remove_node(two), None);
    /// assert_eq!(list.into_vec(), vec![1, 3]);
    /// ```
    pub fn remove_node(&mut self, node: NodeRef) -> Option<T> {
        let index = self.resolve(node)?;
        Some(self.detach(index))
    }

    /// Removes the element at `index` and returns it, or `None` if
    /// `index >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let at = self.index_at(index)?;
        Some(self.detach(at))
    }

    /// Handle of the node at `index`, or `None` if `index >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn node_at(&self, index: usize) -> Option<NodeRef> {
        self.index_at(index).map(|at| self.arena.handle(at))
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::List;
    ///
    /// let list = List::from([0, 1, 2]);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next_back(), Some(&2));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Copies the elements, in list order, into a new `Vec`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Moves the elements, in list order, into a new `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

impl<T: Debug, A, R> Debug for List<T, A, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A, R> Default for List<T, A, R> {
    fn default() -> Self {
        Self::with_registry(Arena::new(), Registry::empty())
    }
}

impl<T, A, R> Drop for List<T, A, R> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, A, R> IntoIterator for List<T, A, R> {
    type Item = T;
    type IntoIter = IntoIter<T, A, R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, A, R> IntoIterator for &'a List<T, A, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<T, A, R> List<T, A, R> {
    /// Walk the list both ways and check every link invariant.
    pub(crate) fn check_links(&self) {
        assert_eq!(self.len == 0, self.head.is_none());
        assert_eq!(self.len == 0, self.tail.is_none());
        if self.len == 1 {
            assert_eq!(self.head, self.tail);
        }
        if let Some(head) = self.head {
            assert_eq!(self.node(head).prev, None);
        }
        if let Some(tail) = self.tail {
            assert_eq!(self.node(tail).next, None);
        }

        let mut count = 0;
        let mut prev = None;
        let mut current = self.head;
        while let Some(index) = current {
            assert!(count < self.len, "cycle or length mismatch");
            let node = self.node(index);
            assert_eq!(node.prev, prev);
            if let Some(next) = node.next {
                assert_eq!(self.node(next).prev, Some(index));
            }
            prev = current;
            current = node.next;
            count += 1;
        }
        assert_eq!(count, self.len);
        assert_eq!(prev, self.tail);
        assert_eq!(self.arena.occupied(), self.len);
    }
}
