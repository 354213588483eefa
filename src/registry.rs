//! Named functions attached to a container instance.
//!
//! A [`Registry`] maps names to callables taking the owning container as
//! their first argument. It is filled once, from a [`Functions`] collection,
//! when the container is built, and it is immutable afterwards.
//!
//! # Examples
//!
//! ```
//! use twin_seq::{Array, Functions, RegistryError};
//!
//! let functions = Functions::new()
//!     .with("sum", |array: &mut Array<i32, i32, i32>, offset: i32| {
//!         array.iter().sum::<i32>() + offset
//!     })
//!     .with("double", |array: &mut Array<i32, i32, i32>, _| {
//!         array.iter_mut().for_each(|x| *x *= 2);
//!         array.len() as i32
//!     });
//!
//! let mut array = Array::with_functions(functions)?;
//! array.extend([1, 2, 3]);
//!
//! assert_eq!(array.run("sum", 10), Ok(16));
//! assert_eq!(array.run("double", 0), Ok(3));
//! assert_eq!(array.as_slice(), &[2, 4, 6]);
//! assert_eq!(
//!     array.run("missing", 0),
//!     Err(RegistryError::NotFound("missing".to_string()))
//! );
//! # Ok::<(), RegistryError>(())
//! ```

use std::collections::hash_map::{Entry, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::{RegistryError, Result};

/// A registered callable. It receives the container and the extra arguments.
pub type Function<C, A, R> = Arc<dyn Fn(&mut C, A) -> R + Send + Sync>;

/// An unvalidated collection of named functions, consumed by
/// `with_functions` on [`Array`](crate::Array) and [`List`](crate::List).
pub struct Functions<C, A = (), R = ()> {
    entries: Vec<(String, Function<C, A, R>)>,
}

impl<C, A, R> Functions<C, A, R> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a function under `name`, builder style.
    pub fn with<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&mut C, A) -> R + Send + Sync + 'static,
    {
        self.insert(name, function);
        self
    }

    /// Adds a function under `name`.
    ///
    /// Names are not checked here; an empty or repeated name is reported
    /// when the collection is turned into a [`Registry`].
    pub fn insert<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&mut C, A) -> R + Send + Sync + 'static,
    {
        self.entries.push((name.into(), Arc::new(function)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C, A, R> Default for Functions<C, A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, A, R> fmt::Debug for Functions<C, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}

/// A validated, immutable name-to-function map owned by one container.
pub struct Registry<C, A = (), R = ()> {
    functions: HashMap<String, Function<C, A, R>>,
}

impl<C, A, R> Registry<C, A, R> {
    pub(crate) fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Validates `functions` and builds the registry.
    ///
    /// Fails on the first empty name or the first name registered twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::{Functions, Registry, RegistryError};
    ///
    /// let functions = Functions::new()
    ///     .with("len", |v: &mut Vec<u8>, ()| v.len())
    ///     .with("len", |v: &mut Vec<u8>, ()| v.len() + 1);
    ///
    /// assert_eq!(
    ///     Registry::from_functions(functions).err(),
    ///     Some(RegistryError::DuplicateName("len".to_string()))
    /// );
    /// ```
    pub fn from_functions(functions: Functions<C, A, R>) -> Result<Self> {
        let mut map = HashMap::with_capacity(functions.entries.len());
        for (name, function) in functions.entries {
            if name.is_empty() {
                return Err(RegistryError::EmptyName);
            }
            match map.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(RegistryError::DuplicateName(entry.key().clone()))
                }
                Entry::Vacant(entry) => {
                    entry.insert(function);
                }
            }
        }
        Ok(Self { functions: map })
    }

    /// Invokes the function registered under `name` on `container`.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_seq::{Functions, Registry};
    ///
    /// let registry = Registry::from_functions(
    ///     Functions::new().with("push", |v: &mut Vec<u8>, x| v.push(x)),
    /// )?;
    /// let mut v = Vec::new();
    /// registry.call("push", &mut v, 7)?;
    /// assert_eq!(v, [7]);
    /// # Ok::<(), twin_seq::RegistryError>(())
    /// ```
    pub fn call(&self, name: &str, container: &mut C, args: A) -> Result<R> {
        let function = self.lookup(name)?;
        Ok((*function)(container, args))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Clones the function out, so the caller can hand the container itself
    /// to it mutably.
    pub(crate) fn lookup(&self, name: &str) -> Result<Function<C, A, R>> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }
}

impl<C, A, R> Clone for Registry<C, A, R> {
    fn clone(&self) -> Self {
        Self {
            functions: self.functions.clone(),
        }
    }
}

impl<C, A, R> fmt::Debug for Registry<C, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_set().entries(names).finish()
    }
}
