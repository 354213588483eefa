//! This crate provides two interchangeable sequence containers: an
//! index-addressable [`Array`] and a doubly-linked [`List`] whose nodes live
//! in an arena.
//!
//! Both support pushing and popping at either end, inserting and removing at
//! any position, and swapping ("displacing") two positions, and both implement
//! the [`Sequence`] trait, so callers can pick array-like random access or
//! list-like *O*(1) splicing without changing call sites.
//!
//! Here is a quick example showing how the containers work.
//!
//! ```
//! use twin_seq::{Array, List};
//!
//! let mut array = Array::from([1, 2, 3, 4]);
//! array.push_first(0);
//! assert_eq!(array.pop(3), Some(3));
//! assert!(array.displace(0, 3));
//! assert_eq!(array.as_slice(), &[4, 1, 2, 0]);
//!
//! let mut list = List::from([1, 2, 3, 4]);
//! let zero = list.add_first(0);
//! assert_eq!(list.remove(3), Some(3));
//! let four = list.last_node().unwrap();
//! assert!(list.displace(zero, four));
//! assert_eq!(list.to_vec(), vec![4, 1, 2, 0]);
//! ```
//!
//! # Memory Layout
//!
//! The layout of a list is like the following graph:
//! ```text
//!   head ─────┐                                           ┌───── tail
//!             ↓                                           ↓
//!       ╔═══════════╗           ╔═══════════╗       ╔═══════════╗
//!  None ║   prev    ║ ←──────── ║   prev    ║ ←──── ║   prev    ║
//!       ╟───────────╢           ╟───────────╢       ╟───────────╢
//!       ║   next    ║ ────────→ ║   next    ║ ────→ ║   next    ║ None
//!       ╟───────────╢           ╟───────────╢       ╟───────────╢
//!       ║ element T ║           ║ element T ║       ║ element T ║
//!       ╚═══════════╝           ╚═══════════╝       ╚═══════════╝
//!        arena slot 2            arena slot 0        arena slot 1
//! ```
//! The `List` contains:
//! - an arena of slots, each either holding a node or vacant and chained into
//!   a free list;
//! - `head` and `tail` links, both `None` when the list is empty;
//! - the length of the list.
//!
//! Links are slot indices. Every slot carries a generation that is bumped when
//! the slot is vacated, and a [`NodeRef`] handle pairs a slot index with the
//! generation it was issued under. A handle to a removed node therefore never
//! resolves, even after its slot is reused.
//!
//! # Displacing Nodes
//!
//! [`List::displace`] swaps two nodes in *O*(1) by relinking them; elements
//! never move between nodes, so handles follow their elements.
//!
//! ```
//! use twin_seq::List;
//!
//! let mut list = List::from(['a', 'b', 'c']);
//! let b = list.node_at(1).unwrap();
//! let c = list.node_at(2).unwrap();
//!
//! assert!(list.displace(b, c));
//! assert_eq!(list.to_vec(), vec!['a', 'c', 'b']);
//! assert_eq!(list.last_node(), Some(b));
//! ```
//!
//! # Attached Functions
//!
//! A container can be built with named functions attached (see
//! [`Functions`]). They receive the container itself as their first argument
//! and are invoked by name with `run`.
//!
//! ```
//! use twin_seq::{Functions, List, RegistryError};
//!
//! let functions = Functions::new().with("sum", |list: &mut List<i32, (), i32>, ()| {
//!     list.iter().sum()
//! });
//! let mut list = List::with_functions(functions)?;
//! list.extend([1, 2, 3]);
//! assert_eq!(list.run("sum", ()), Ok(6));
//! # Ok::<(), RegistryError>(())
//! ```
//!
//! # Out-of-range Input
//!
//! Positions past the end and stale handles are ordinary input. Operations
//! return `None`, `false`, or hand the rejected value back in `Err`, and leave
//! the container untouched. Only building a container with invalid function
//! names, and running an unknown function, produce a [`RegistryError`].
//!
//! [`Array`]: crate::Array
//! [`List`]: crate::List
//! [`Sequence`]: crate::Sequence
//! [`NodeRef`]: crate::NodeRef
//! [`Functions`]: crate::Functions
//! [`RegistryError`]: crate::RegistryError

#[doc(inline)]
pub use array::Array;
#[doc(inline)]
pub use error::RegistryError;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use list::{List, NodeRef};
#[doc(inline)]
pub use registry::{Functions, Registry};
#[doc(inline)]
pub use sequence::Sequence;

pub mod array;
pub mod error;
pub mod list;
pub mod registry;
pub mod sequence;
