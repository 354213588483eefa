//! The contract shared by [`Array`](crate::Array) and [`List`](crate::List).

/// An ordered, index-addressable sequence of owned elements.
///
/// Out-of-range input is never an error: element-returning methods give
/// `None`, [`swap`](Sequence::swap) gives `false`, and methods taking a value
/// hand it back in `Err` so it is not lost.
///
/// # Examples
///
/// ```
/// use twin_seq::{Array, List, Sequence};
///
/// fn rotate_left<S: Sequence<char>>(seq: &mut S) {
///     if let Some(front) = seq.pop_front() {
///         seq.push_back(front);
///     }
/// }
///
/// let mut array = Array::from(['a', 'b', 'c']);
/// let mut list = List::from(['a', 'b', 'c']);
/// rotate_left(&mut array);
/// rotate_left(&mut list);
/// assert_eq!(array.to_vec(), list.to_vec());
/// assert_eq!(list.to_vec(), vec!['b', 'c', 'a']);
/// ```
pub trait Sequence<T> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or `None` if `index >= len`.
    fn get(&self, index: usize) -> Option<&T>;

    fn get_mut(&mut self, index: usize) -> Option<&mut T>;

    fn first(&self) -> Option<&T> {
        self.get(0)
    }

    fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    fn push_front(&mut self, value: T);

    fn push_back(&mut self, value: T);

    /// Inserts `value` so that it ends up at `index`, shifting everything at
    /// and after `index` one position back. Returns the value if
    /// `index > len`.
    fn insert(&mut self, index: usize, value: T) -> Result<(), T>;

    fn pop_front(&mut self) -> Option<T>;

    fn pop_back(&mut self) -> Option<T>;

    fn remove(&mut self, index: usize) -> Option<T>;

    /// Swaps the elements at `i` and `j`. Returns `false` without touching
    /// the sequence if either index is out of range.
    fn swap(&mut self, i: usize, j: usize) -> bool;

    /// Overwrites the element at `index`, returning the previous one, or
    /// returns `value` back if `index >= len`.
    fn replace(&mut self, index: usize, value: T) -> Result<T, T>;

    fn clear(&mut self);
}
