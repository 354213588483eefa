use std::fmt::{Debug, Formatter};
use std::mem;

use crate::error::Result;
use crate::registry::{Functions, Registry};
use crate::sequence::Sequence;

/// An index-addressable dynamic array.
///
/// Elements live contiguously in positions `0..len`. Pushing or popping at the
/// back is amortized *O*(1); every other position shifts the elements after
/// it, so it takes *O*(*n*) time.
///
/// Out-of-range positions are expected input: they give `None`, `false`, or
/// the rejected value back in `Err`, and leave the array untouched.
///
/// `A` and `R` are the argument and return types of the functions attached
/// with [`Array::with_functions`]; both default to `()`.
pub struct Array<T, A = (), R = ()> {
    values: Vec<T>,
    functions: Registry<Array<T, A, R>, A, R>,
}

impl<T> Array<T> {
    /// Create an empty `Array` without attached functions.
    ///
    /// # Examples
    /// ```
    /// use twin_seq::Array;
    /// let array: Array<u32> = Array::new();
    /// assert!(array.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(Vec::new(), Registry::empty())
    }

    /// Create an empty `Array` able to hold `capacity` elements without
    /// reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_registry(Vec::with_capacity(capacity), Registry::empty())
    }
}

impl<T, A, R> Array<T, A, R> {
    fn with_registry(values: Vec<T>, functions: Registry<Self, A, R>) -> Self {
        Self { values, functions }
    }

    /// Create an empty `Array` with the given named functions attached.
    ///
    /// Fails, producing no array, if a name is empty or used twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::{Array, Functions, RegistryError};
    ///
    /// let functions = Functions::new().with("", |_: &mut Array<u8>, ()| ());
    /// assert_eq!(Array::with_functions(functions).err(), Some(RegistryError::EmptyName));
    /// ```
    ///
    /// Every function takes the array itself as its first argument, so one
    /// written for another container is rejected at compile time:
    ///
    /// ```compile_fail
    /// use twin_seq::{Array, Functions};
    ///
    /// let functions = Functions::new().with("len", |_: &mut Vec<u8>, ()| ());
    /// let array = Array::<u8>::with_functions(functions);
    /// ```
    pub fn with_functions(functions: Functions<Self, A, R>) -> Result<Self> {
        Ok(Self::with_registry(
            Vec::new(),
            Registry::from_functions(functions)?,
        ))
    }

    /// Runs the function registered under `name`, passing the array itself as
    /// the first argument and `args` as the second.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::{Array, Functions, RegistryError};
    ///
    /// let functions = Functions::new().with("fill", |array: &mut Array<u8, u8>, value| {
    ///     array.push_last(value);
    /// });
    /// let mut array = Array::with_functions(functions)?;
    /// array.run("fill", 3)?;
    /// assert_eq!(array.as_slice(), &[3]);
    /// assert!(array.run("drain", 0).is_err());
    /// # Ok::<(), RegistryError>(())
    /// ```
    pub fn run(&mut self, name: &str, args: A) -> Result<R> {
        let function = self.functions.lookup(name)?;
        Ok((*function)(self, args))
    }

    /// The functions attached to this array.
    pub fn functions(&self) -> &Registry<Self, A, R> {
        &self.functions
    }

    /// Returns the number of elements in the `Array`.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the `Array` holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of elements the array can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Reserves room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
    }

    /// Provides a reference to the first element, or `None` if the array is
    /// empty.
    pub fn peek_first(&self) -> Option<&T> {
        self.values.first()
    }

    /// Provides a reference to the last element, or `None` if the array is
    /// empty.
    pub fn peek_last(&self) -> Option<&T> {
        self.values.last()
    }

    /// Provides a reference to the element at `index`, or `None` if
    /// `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::Array;
    ///
    /// let array = Array::from([1, 2, 3]);
    /// assert_eq!(array.peek(2), Some(&3));
    /// assert_eq!(array.peek(3), None);
    /// ```
    pub fn peek(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Provides a mutable reference to the element at `index`, or `None` if
    /// `index >= len`.
    pub fn peek_mut(&mut self, index: usize) -> Option<&mut T> {
        self.values.get_mut(index)
    }

    /// Inserts an element at the front, shifting every other element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn push_first(&mut self, value: T) -> &mut T {
        self.values.insert(0, value);
        &mut self.values[0]
    }

    /// Appends an element to the back.
    ///
    /// # Complexity
    ///
    /// This operation should compute in amortized *O*(1) time.
    pub fn push_last(&mut self, value: T) -> &mut T {
        self.values.push(value);
        let last = self.values.len() - 1;
        &mut self.values[last]
    }

    /// Inserts `value` at `index`, shifting the elements at and after it.
    ///
    /// `index == len` appends. Returns the value back if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::Array;
    ///
    /// let mut array = Array::from([1, 3]);
    /// assert_eq!(array.push(2, 1).map(|x| *x), Ok(2));
    /// assert_eq!(array.push(4, 3).map(|x| *x), Ok(4));
    /// assert_eq!(array.push(9, 9).map(|x| *x), Err(9));
    /// assert_eq!(array.as_slice(), &[1, 2, 3, 4]);
    /// ```
    pub fn push(&mut self, value: T, index: usize) -> std::result::Result<&mut T, T> {
        if index > self.len() {
            return Err(value);
        }
        if index == 0 {
            return Ok(self.push_first(value));
        }
        if index == self.len() {
            return Ok(self.push_last(value));
        }
        self.values.insert(index, value);
        Ok(&mut self.values[index])
    }

    /// Removes the first element and returns it, or `None` if the array is
    /// empty.
    pub fn pop_first(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        Some(self.values.remove(0))
    }

    /// Removes the last element and returns it, or `None` if the array is
    /// empty.
    pub fn pop_last(&mut self) -> Option<T> {
        self.values.pop()
    }

    /// Removes the element at `index` and returns it, or `None` if
    /// `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::Array;
    ///
    /// let mut array = Array::from([1, 2, 3]);
    /// assert_eq!(array.pop(3), None);
    /// assert_eq!(array.pop(1), Some(2));
    /// assert_eq!(array.as_slice(), &[1, 3]);
    /// ```
    pub fn pop(&mut self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        if index == 0 {
            return self.pop_first();
        }
        if index == self.len() - 1 {
            return self.pop_last();
        }
        Some(self.values.remove(index))
    }

    /// Swaps the elements at `index1` and `index2`.
    ///
    /// Returns `false` and leaves the array untouched if either index is out
    /// of range. Swapping a position with itself changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::Array;
    ///
    /// let mut array = Array::from(['a', 'b', 'c']);
    /// assert!(array.displace(0, 2));
    /// assert!(!array.displace(0, 3));
    /// assert_eq!(array.as_slice(), &['c', 'b', 'a']);
    /// ```
    pub fn displace(&mut self, index1: usize, index2: usize) -> bool {
        if index1 >= self.len() || index2 >= self.len() {
            return false;
        }
        self.values.swap(index1, index2);
        true
    }

    /// Overwrites the element at `index` and returns the previous one, or
    /// returns `value` back if `index >= len`.
    pub fn replace_value(&mut self, index: usize, value: T) -> std::result::Result<T, T> {
        match self.values.get_mut(index) {
            Some(slot) => Ok(mem::replace(slot, value)),
            None => Err(value),
        }
    }

    /// Removes all elements. Attached functions are kept.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Borrows the elements, in order, as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Provides a front-to-back iterator.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Provides a front-to-back iterator yielding mutable references.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.values.iter_mut()
    }

    /// Copies the elements, in order, into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values.clone()
    }

    /// Converts the array into a `Vec` without copying. Attached functions
    /// are dropped.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T, A, R> Sequence<T> for Array<T, A, R> {
    fn len(&self) -> usize {
        Array::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.peek(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.peek_mut(index)
    }

    fn push_front(&mut self, value: T) {
        self.push_first(value);
    }

    fn push_back(&mut self, value: T) {
        self.push_last(value);
    }

    fn insert(&mut self, index: usize, value: T) -> std::result::Result<(), T> {
        self.push(value, index).map(|_| ())
    }

    fn pop_front(&mut self) -> Option<T> {
        self.pop_first()
    }

    fn pop_back(&mut self) -> Option<T> {
        self.pop_last()
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        self.pop(index)
    }

    fn swap(&mut self, i: usize, j: usize) -> bool {
        self.displace(i, j)
    }

    fn replace(&mut self, index: usize, value: T) -> std::result::Result<T, T> {
        self.replace_value(index, value)
    }

    fn clear(&mut self) {
        Array::clear(self)
    }
}

impl<T: Debug, A, R> Debug for Array<T, A, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A, R> Default for Array<T, A, R> {
    fn default() -> Self {
        Self::with_registry(Vec::new(), Registry::empty())
    }
}

impl<T: Clone, A, R> Clone for Array<T, A, R> {
    fn clone(&self) -> Self {
        Self::with_registry(self.values.clone(), self.functions.clone())
    }
}

impl<T: PartialEq, A, R> PartialEq for Array<T, A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<T: Eq, A, R> Eq for Array<T, A, R> {}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

impl<T, A, R> Extend<T> for Array<T, A, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(values: Vec<T>) -> Self {
        Self::with_registry(values, Registry::empty())
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}

impl<T, A, R> IntoIterator for Array<T, A, R> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T, A, R> IntoIterator for &'a Array<T, A, R> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::array::Array;
    use crate::error::RegistryError;
    use crate::registry::Functions;
    use crate::sequence::Sequence;
    use std::cell::RefCell;

    #[test]
    fn array_create() {
        let mut array = Array::<i32>::new();
        assert!(array.is_empty());
        array.push_last(1);
        assert!(!array.is_empty());
        assert_eq!(array.pop_last(), Some(1));
        assert!(array.is_empty());
    }

    #[test]
    fn array_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut array = Array::new();
        array.push_last(DropChecker::new(1, &dropped));
        array.push_last(DropChecker::new(2, &dropped));
        array.push_last(DropChecker::new(3, &dropped));
        drop(array.pop(1));
        assert_eq!(dropped.borrow().as_slice(), &[2]);
        drop(array);
        assert_eq!(dropped.borrow().as_slice(), &[2, 1, 3]);
    }

    /// Replays a table of operations, checking the contents after each step.
    #[test]
    fn array_operation_table() {
        enum Op {
            Push(usize),
            PushFirst,
            PushLast,
            Pop(usize),
            PopFirst,
            PopLast,
            Displace(usize, usize),
        }
        let cases: [(Op, i32, usize, &[i32]); 11] = [
            (Op::Push(0), 1, 3, &[1, 1, 1]),
            (Op::Pop(0), 0, 2, &[1]),
            (Op::PushFirst, 2, 3, &[2, 2, 2, 1]),
            (Op::PopFirst, 0, 1, &[2, 2, 1]),
            (Op::PushLast, 3, 5, &[2, 2, 1, 3, 3, 3, 3, 3]),
            (Op::PopLast, 0, 1, &[2, 2, 1, 3, 3, 3, 3]),
            (Op::Pop(2), 0, 2, &[2, 2, 3, 3, 3]),
            (Op::Displace(0, 2), 0, 1, &[3, 2, 2, 3, 3]),
            (Op::Displace(1, 3), 0, 3, &[3, 3, 2, 2, 3]),
            (Op::PushLast, 1, 1, &[3, 3, 2, 2, 3, 1]),
            (Op::Displace(1, 5), 0, 3, &[3, 1, 2, 2, 3, 3]),
        ];

        let mut array = Array::new();
        for (step, (op, input, iter, want)) in cases.iter().enumerate() {
            for _ in 0..*iter {
                match *op {
                    Op::Push(at) => {
                        assert!(array.push(*input, at).is_ok());
                    }
                    Op::PushFirst => {
                        array.push_first(*input);
                    }
                    Op::PushLast => {
                        array.push_last(*input);
                    }
                    Op::Pop(at) => {
                        assert!(array.pop(at).is_some());
                    }
                    Op::PopFirst => {
                        assert!(array.pop_first().is_some());
                    }
                    Op::PopLast => {
                        assert!(array.pop_last().is_some());
                    }
                    Op::Displace(i, j) => {
                        assert!(array.displace(i, j));
                    }
                }
            }
            assert_eq!(array.as_slice(), *want, "step {}", step);
        }
    }

    #[test]
    fn array_out_of_range() {
        let mut empty = Array::<i32>::new();
        assert_eq!(empty.peek_first(), None);
        assert_eq!(empty.peek_last(), None);
        assert_eq!(empty.pop_first(), None);
        assert_eq!(empty.pop_last(), None);
        assert_eq!(empty.pop(0), None);
        assert!(!empty.displace(0, 0));

        let mut array = Array::from([1, 2, 3]);
        assert_eq!(array.peek(3), None);
        assert_eq!(array.pop(3), None);
        assert!(array.push(4, 4).is_err());
        assert_eq!(array.replace_value(3, 4), Err(4));
        assert!(!array.displace(1, 3));
        assert!(!array.displace(3, 1));
        assert_eq!(array.len(), 3);
        assert_eq!(array.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn array_displace_self_and_replace() {
        let mut array = Array::from([1, 2, 3]);
        assert!(array.displace(1, 1));
        assert_eq!(array.as_slice(), &[1, 2, 3]);
        assert_eq!(array.replace_value(1, 5), Ok(2));
        assert_eq!(array.peek(1), Some(&5));
        if let Some(x) = array.peek_mut(0) {
            *x = 7;
        }
        assert_eq!(array.peek_first(), Some(&7));
        assert_eq!(array.peek_last(), Some(&3));
    }

    #[test]
    fn array_push_returns_inserted() {
        let mut array = Array::new();
        *array.push_last(1) += 10;
        *array.push_first(2) += 20;
        if let Ok(x) = array.push(3, 1) {
            *x += 30;
        }
        assert_eq!(array.as_slice(), &[22, 33, 11]);
    }

    #[test]
    fn array_clear_keeps_functions() {
        let functions = Functions::new().with("len", |array: &mut Array<i32, (), usize>, ()| {
            array.len()
        });
        let mut array = Array::with_functions(functions).unwrap();
        array.extend(0..4);
        assert_eq!(array.run("len", ()), Ok(4));
        array.clear();
        assert!(array.is_empty());
        assert_eq!(array.run("len", ()), Ok(0));
        assert!(array.functions().contains("len"));
    }

    #[test]
    fn array_duplicate_function_name() {
        let functions = Functions::new()
            .with("a", |_: &mut Array<i32>, ()| ())
            .with("a", |_: &mut Array<i32>, ()| ());
        assert_eq!(
            Array::with_functions(functions).err(),
            Some(RegistryError::DuplicateName("a".into()))
        );
    }

    #[test]
    fn array_as_sequence() {
        fn exercise<S: Sequence<i32>>(seq: &mut S) {
            seq.push_back(2);
            seq.push_front(1);
            assert!(seq.insert(2, 3).is_ok());
            assert_eq!(seq.insert(9, 9), Err(9));
            assert!(seq.swap(0, 2));
            assert_eq!(seq.first(), Some(&3));
            assert_eq!(seq.last(), Some(&1));
            assert_eq!(seq.replace(1, 5), Ok(2));
            assert_eq!(seq.remove(1), Some(5));
            assert_eq!(seq.pop_front(), Some(3));
            assert_eq!(seq.pop_back(), Some(1));
            assert!(seq.is_empty());
        }
        exercise(&mut Array::new());
    }

    #[test]
    fn array_traits() {
        let array: Array<i32> = (0..3).collect();
        let cloned = array.clone();
        assert_eq!(array, cloned);
        assert_eq!(format!("{:?}", array), "[0, 1, 2]");
        assert_eq!((&array).into_iter().sum::<i32>(), 3);
        assert_eq!(array.into_vec(), vec![0, 1, 2]);
        assert_eq!(cloned.into_iter().rev().collect::<Vec<_>>(), vec![2, 1, 0]);
    }
}
