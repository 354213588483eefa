use crate::list::arena::Link;
use crate::list::{List, NodeRef};
use crate::sequence::Sequence;
use std::hash::{Hash, Hasher};

impl<T: PartialEq, A, R> PartialEq for List<T, A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq, A, R> Eq for List<T, A, R> {}

impl<T: Hash, A, R> Hash for List<T, A, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

/// Cloning copies the elements into a fresh arena and shares the attached
/// functions. Handles issued by `self` are not valid for the clone.
impl<T: Clone, A, R> Clone for List<T, A, R> {
    fn clone(&self) -> Self {
        let mut list = Self::with_registry(
            crate::list::arena::Arena::with_capacity(self.len()),
            self.functions.clone(),
        );
        list.extend(self.iter().cloned());
        list
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T, A, R> Extend<T> for List<T, A, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        iter.for_each(|elt| {
            self.add_last(elt);
        });
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_iter(values)
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_iter(values)
    }
}

impl<T, A, R> List<T, A, R> {
    /// Position of the first element equal to `value`, or `None`.
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
    /// let list = List::from([4, 5, 4]);
    /// assert_eq!(list.index_of(&4), Some(0));
    /// assert_eq!(list.index_of(&5), Some(1));
    /// assert_eq!(list.index_of(&6), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|elt| elt == value)
    }

    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::List;
    ///
    /// let list = List::from([0, 1, 2]);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|elt| elt == value)
    }

    /// Handle of the first node holding an element equal to `value`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn find_node(&self, value: &T) -> Option<NodeRef>
    where
        T: PartialEq,
    {
        self.find_index(value).map(|index| self.arena.handle(index))
    }

    /// Removes the first element equal to `value` and returns it.
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
    /// let mut list = List::from(["a", "b", "a"]);
    /// assert_eq!(list.remove_data(&"a"), Some("a"));
    /// assert_eq!(list.remove_data(&"c"), None);
    /// assert_eq!(list.into_vec(), vec!["b", "a"]);
    /// ```
    pub fn remove_data(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.find_index(value)?;
        Some(self.detach(index))
    }

    fn find_index(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let mut current = self.head();
        while let Some(index) = current {
            let node = self.node(index);
            if node.element == *value {
                return Some(index);
            }
            current = node.next;
        }
        None
    }

    /// Swaps the positions of `node1` and `node2` in the list.
    ///
    /// Only links change: both elements stay in their nodes, and both handles
    /// stay valid, now at each other's former position. The head and tail
    /// follow whichever node lands at the list ends.
    ///
    /// Swapping a node with itself is a no-op returning `true`. If either
    /// handle is stale, returns `false` and the list is unchanged.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Current Implementation
    ///
    /// All four neighbor links are read before any write. Each node then takes
    /// the other's former neighbors, where a neighbor that is one of the two
    /// nodes is replaced by the other one. Adjacent nodes need no special
    /// case: `a <-> b` becomes `b <-> a` through that substitution, and the
    /// outer neighbors of the pair are rewired like any others.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::List;
    ///
    /// let mut list = List::from(['a', 'b', 'c', 'd']);
    /// let a = list.first_node().unwrap();
    /// let d = list.last_node().unwrap();
    ///
    /// assert!(list.displace(a, d));
    /// assert_eq!(list.to_vec(), vec!['d', 'b', 'c', 'a']);
    /// assert_eq!(list.first(), Some(&'d'));
    /// assert_eq!(list.last_node(), Some(a));
    /// ```
    pub fn displace(&mut self, node1: NodeRef, node2: NodeRef) -> bool {
        if node1 == node2 {
            return true;
        }
        let (a, b) = match (self.resolve(node1), self.resolve(node2)) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };

        let (a_prev, a_next) = (self.node(a).prev, self.node(a).next);
        let (b_prev, b_next) = (self.node(b).prev, self.node(b).next);
        let substitute = |link: Link| match link {
            Some(x) if x == a => Some(b),
            Some(x) if x == b => Some(a),
            _ => link,
        };
        let (a_prev, a_next, b_prev, b_next) = (
            substitute(b_prev),
            substitute(b_next),
            substitute(a_prev),
            substitute(a_next),
        );

        self.connect(a_prev, Some(a));
        self.connect(Some(a), a_next);
        self.connect(b_prev, Some(b));
        self.connect(Some(b), b_next);

        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(a_prev, Some(a));
            self.assert_adjacent(Some(a), a_next);
            self.assert_adjacent(b_prev, Some(b));
            self.assert_adjacent(Some(b), b_next);
        }
        true
    }

    /// Swaps the nodes at positions `index1` and `index2`. Returns `false` if
    /// either position is out of range.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time to find the nodes; the
    /// swap itself is *O*(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// assert!(list.displace_index(1, 2));
    /// assert!(!list.displace_index(0, 3));
    /// assert_eq!(list.into_vec(), vec![1, 3, 2]);
    /// ```
    pub fn displace_index(&mut self, index1: usize, index2: usize) -> bool {
        match (self.node_at(index1), self.node_at(index2)) {
            (Some(node1), Some(node2)) => self.displace(node1, node2),
            _ => false,
        }
    }

    /// Moves `node` so that it ends up at position `index`, shifting the
    /// nodes in between by one. The handle stays valid.
    ///
    /// Returns `false` if the handle is stale or `index >= len`.
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
    /// let mut list = List::from(['a', 'b', 'c', 'd']);
    /// let a = list.first_node().unwrap();
    ///
    /// assert!(list.displace_to(a, 2));
    /// assert_eq!(list.to_vec(), vec!['b', 'c', 'a', 'd']);
    /// assert_eq!(list.index_of(&'a'), Some(2));
    /// assert_eq!(list.node_at(2), Some(a));
    /// ```
    pub fn displace_to(&mut self, node: NodeRef, index: usize) -> bool {
        let from = match self.resolve(node) {
            Some(from) if index < self.len() => from,
            _ => return false,
        };
        self.unlink(from);
        let (prev, next) = match self.index_at(index) {
            Some(at) => (self.node(at).prev, Some(at)),
            None => (self.tail(), None),
        };
        self.link(prev, next, from);
        true
    }
}

impl<T, A, R> Sequence<T> for List<T, A, R> {
    fn len(&self) -> usize {
        List::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        let at = self.index_at(index)?;
        Some(&self.node(at).element)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let node = self.node_at(index)?;
        List::get_mut(self, node)
    }

    fn first(&self) -> Option<&T> {
        List::first(self)
    }

    fn last(&self) -> Option<&T> {
        List::last(self)
    }

    fn push_front(&mut self, value: T) {
        self.add_first(value);
    }

    fn push_back(&mut self, value: T) {
        self.add_last(value);
    }

    fn insert(&mut self, index: usize, value: T) -> Result<(), T> {
        self.add(index, value).map(|_| ())
    }

    fn pop_front(&mut self) -> Option<T> {
        self.remove_first()
    }

    fn pop_back(&mut self) -> Option<T> {
        self.remove_last()
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        List::remove(self, index)
    }

    fn swap(&mut self, i: usize, j: usize) -> bool {
        self.displace_index(i, j)
    }

    fn replace(&mut self, index: usize, value: T) -> Result<T, T> {
        match self.node_at(index) {
            Some(node) => self.set(node, value),
            None => Err(value),
        }
    }

    fn clear(&mut self) {
        List::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use crate::sequence::Sequence;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn abc(len: usize) -> List<char> {
        List::from_iter(('A'..='Z').take(len))
    }

    fn contents(list: &List<char>) -> String {
        list.check_links();
        list.iter().collect()
    }

    #[test]
    fn displace_adjacent_at_tail() {
        let mut list = abc(3);
        let b = list.node_at(1).unwrap();
        let c = list.node_at(2).unwrap();
        assert!(list.displace(b, c));
        assert_eq!(contents(&list), "ACB");
        assert_eq!(list.last_node(), Some(b));
        assert_eq!(list.last(), Some(&'B'));
    }

    #[test]
    fn displace_head_and_tail() {
        let mut list = abc(4);
        let a = list.first_node().unwrap();
        let d = list.last_node().unwrap();
        assert!(list.displace(a, d));
        assert_eq!(contents(&list), "DBCA");
        assert_eq!(list.first_node(), Some(d));
        assert_eq!(list.last_node(), Some(a));
        assert_eq!(list.get(a), Some(&'A'));
    }

    #[test]
    fn displace_adjacent_in_either_order() {
        for (i, j, expected) in [
            (0, 1, "BACDE"),
            (1, 0, "BACDE"),
            (1, 2, "ACBDE"),
            (2, 1, "ACBDE"),
            (3, 4, "ABCED"),
            (4, 3, "ABCED"),
        ] {
            let mut list = abc(5);
            let node1 = list.node_at(i).unwrap();
            let node2 = list.node_at(j).unwrap();
            assert!(list.displace(node1, node2));
            assert_eq!(contents(&list), expected, "displace({}, {})", i, j);
        }
    }

    #[test]
    fn displace_pair_list() {
        let mut list = abc(2);
        let a = list.first_node().unwrap();
        let b = list.last_node().unwrap();
        assert!(list.displace(b, a));
        assert_eq!(contents(&list), "BA");
        assert_eq!(list.first_node(), Some(b));
        assert_eq!(list.last_node(), Some(a));
        assert!(list.displace(a, b));
        assert_eq!(contents(&list), "AB");
    }

    #[test]
    fn displace_non_adjacent() {
        for (i, j, expected) in [
            (0, 2, "CBADE"),
            (1, 3, "ADCBE"),
            (0, 4, "EBCDA"),
            (4, 1, "AECDB"),
            (2, 4, "ABEDC"),
        ] {
            let mut list = abc(5);
            let node1 = list.node_at(i).unwrap();
            let node2 = list.node_at(j).unwrap();
            assert!(list.displace(node1, node2));
            assert_eq!(contents(&list), expected, "displace({}, {})", i, j);
        }
    }

    #[test]
    fn displace_self_is_noop() {
        let mut list = abc(3);
        let b = list.node_at(1).unwrap();
        assert!(list.displace(b, b));
        assert!(list.displace_index(2, 2));
        assert_eq!(contents(&list), "ABC");

        let mut single = abc(1);
        let a = single.first_node().unwrap();
        assert!(single.displace(a, a));
        assert_eq!(contents(&single), "A");
    }

    #[test]
    fn displace_stale_handle() {
        let mut list = abc(3);
        let a = list.first_node().unwrap();
        let c = list.last_node().unwrap();
        assert_eq!(list.remove_node(c), Some('C'));
        assert!(!list.displace(a, c));
        assert!(!list.displace(c, a));
        assert!(!list.displace_index(0, 2));
        assert_eq!(contents(&list), "AB");
    }

    #[test]
    fn displace_index_matches_array_swaps() {
        let mut list = List::new();
        list.extend([2, 2, 3, 3, 3]);
        assert!(list.displace_index(0, 2));
        assert_eq!(list.to_vec(), vec![3, 2, 2, 3, 3]);
        for _ in 0..3 {
            assert!(list.displace_index(1, 3));
        }
        assert_eq!(list.to_vec(), vec![3, 3, 2, 2, 3]);
        list.add_last(1);
        for _ in 0..3 {
            assert!(list.displace_index(1, 5));
        }
        assert_eq!(list.to_vec(), vec![3, 1, 2, 2, 3, 3]);
        list.check_links();
    }

    #[test]
    fn displace_to_every_position() {
        for from in 0..4 {
            for to in 0..4 {
                let mut list = abc(4);
                let node = list.node_at(from).unwrap();
                let element = *list.get(node).unwrap();
                assert!(list.displace_to(node, to));
                list.check_links();
                assert_eq!(list.node_at(to), Some(node));
                assert_eq!(list.index_of(&element), Some(to));
                assert_eq!(list.len(), 4);
            }
        }
    }

    #[test]
    fn displace_to_out_of_range() {
        let mut list = abc(3);
        let a = list.first_node().unwrap();
        assert!(!list.displace_to(a, 3));
        list.remove_first();
        assert!(!list.displace_to(a, 0));
        assert_eq!(contents(&list), "BC");
    }

    #[test]
    fn search_by_value() {
        let mut list = List::from([1, 2, 3, 2]);
        assert!(list.contains(&3));
        assert!(!list.contains(&4));
        assert_eq!(list.index_of(&2), Some(1));
        let node = list.find_node(&2).unwrap();
        assert_eq!(list.node_at(1), Some(node));
        assert_eq!(list.find_node(&5), None);
        assert_eq!(list.remove_data(&2), Some(2));
        assert_eq!(list.to_vec(), vec![1, 3, 2]);
        assert!(!list.is_live(node));
        assert_eq!(list.remove_data(&7), None);
        list.check_links();
    }

    #[test]
    fn list_as_sequence() {
        fn exercise<S: Sequence<i32>>(seq: &mut S) {
            seq.push_back(2);
            seq.push_front(1);
            assert!(seq.insert(2, 3).is_ok());
            assert_eq!(seq.insert(9, 9), Err(9));
            assert!(seq.swap(0, 2));
            assert_eq!(seq.first(), Some(&3));
            assert_eq!(seq.last(), Some(&1));
            assert_eq!(seq.get(1), Some(&2));
            if let Some(x) = seq.get_mut(1) {
                *x = 4;
            }
            assert_eq!(seq.replace(1, 5), Ok(4));
            assert_eq!(seq.replace(3, 6), Err(6));
            assert_eq!(seq.remove(1), Some(5));
            assert_eq!(seq.remove(2), None);
            assert_eq!(seq.pop_front(), Some(3));
            assert_eq!(seq.pop_back(), Some(1));
            assert!(seq.is_empty());
            seq.push_back(1);
            seq.clear();
            assert_eq!(seq.len(), 0);
        }
        let mut list = List::new();
        exercise(&mut list);
        list.check_links();
    }

    #[test]
    fn list_traits() {
        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let list = List::from(vec![1, 2, 3]);
        let cloned = list.clone();
        assert_eq!(list, cloned);
        assert_eq!(hash_of(&list), hash_of(&cloned));
        assert_ne!(list, List::from([1, 2]));
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
        cloned.check_links();
    }
}
