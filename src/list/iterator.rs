use crate::list::arena::Link;
use crate::list::List;
use std::fmt;
use std::iter::FusedIterator;

/// An iterator over the elements of a `List`.
///
/// It keeps the links of the next element from each end, and the number of
/// elements left between them.
///
/// # Examples
///
/// ```compile_fail
/// use twin_seq::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.add_last(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    front: Link,
    back: Link,
    len: usize,
    nodes: &'a crate::list::arena::Arena<T>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new<A, R>(list: &'a List<T, A, R>) -> Self {
        Self {
            front: list.head(),
            back: list.tail(),
            len: list.len(),
            nodes: &list.arena,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            len: self.len,
            nodes: self.nodes,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return the front element and step `front` to its successor, or return
    /// `None` once every element has been yielded from either end.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let current = self.nodes.node(self.front?);
        self.front = current.next;
        self.len -= 1;
        Some(&current.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let current = self.nodes.node(self.back?);
        self.back = current.prev;
        self.len -= 1;
        Some(&current.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the elements of a `List`.
///
/// Each element is removed from the list as it is yielded.
pub struct IntoIter<T, A = (), R = ()> {
    list: List<T, A, R>,
}

impl<T, A, R> IntoIter<T, A, R> {
    pub(crate) fn new(list: List<T, A, R>) -> Self {
        Self { list }
    }
}

impl<T: fmt::Debug, A, R> fmt::Debug for IntoIter<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T, A, R> Iterator for IntoIter<T, A, R> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A, R> DoubleEndedIterator for IntoIter<T, A, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.remove_last()
    }
}

impl<T, A, R> ExactSizeIterator for IntoIter<T, A, R> {}

impl<T, A, R> FusedIterator for IntoIter<T, A, R> {}
