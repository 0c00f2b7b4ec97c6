#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Heterogeneous tuples with type-erased, index-addressable visitor dispatch.
//!
//! ## Overview
//!
//! A [`VisitableTuple`] is built from any number of elements of unrelated
//! types. It keeps two views of the same elements:
//!
//! - The **structured value**, a plain tuple such as `(i32, String)`, with
//!   every element at its original position and with its original type. Code
//!   that knows the types reads it through [`VisitableTuple::value`].
//! - One **handle** per element, all of the same type, in the same order.
//!   Through these, code that only holds an index can still apply a
//!   [`Visitor`] to the element at that index, and the visitor receives the
//!   element with its original static type.
//!
//! The aggregate is immutable. Elements cannot be added, removed or
//! reordered after construction.
//!
//! ## Quick Example
//!
//! ```
//! use visitable::prelude::*;
//!
//! #[derive(Default)]
//! struct Render(Vec<String>);
//!
//! impl Visitor<i32> for Render {
//!     fn visit(&mut self, element: &i32) {
//!         self.0.push(format!("<int>{element}</int>"));
//!     }
//! }
//!
//! impl Visitor<String> for Render {
//!     fn visit(&mut self, element: &String) {
//!         self.0.push(format!("<text>{element}</text>"));
//!     }
//! }
//!
//! let tuple: VisitableTuple<(i32, String), Render> = visitable_tuple![42, "x".to_string()];
//!
//! let mut render = Render::default();
//! for index in 0..tuple.values_count() {
//!     tuple.accept(&mut render, index);
//! }
//! assert_eq!(render.0, ["<int>42</int>", "<text>x</text>"]);
//! ```
//!
//! ## Visitors
//!
//! A visitor implements [`Visitor<E>`] for each element type it accepts,
//! either one implementation per type or a blanket implementation over a
//! bound such as `E: Debug`. The visitor type is the second type parameter of
//! [`VisitableTuple`], because the handle for each element is generated when
//! the element type is still known, for that element type and that visitor
//! type together.
//!
//! To share one aggregate between several visitor types, use a trait object
//! as the visitor type:
//!
//! ```
//! use std::fmt::Debug;
//!
//! use visitable::prelude::*;
//!
//! trait Inspect {
//!     fn inspect(&mut self, element: &dyn Debug);
//! }
//!
//! impl<E: Debug> Visitor<E> for dyn Inspect {
//!     fn visit(&mut self, element: &E) {
//!         self.inspect(element);
//!     }
//! }
//!
//! struct Lines(Vec<String>);
//!
//! impl Inspect for Lines {
//!     fn inspect(&mut self, element: &dyn Debug) {
//!         self.0.push(format!("{element:?}"));
//!     }
//! }
//!
//! let tuple: VisitableTuple<_, dyn Inspect> = visitable_tuple![1_u8, 'c'];
//! let mut lines = Lines(Vec::new());
//! tuple.accept_all(&mut lines);
//! assert_eq!(lines.0, ["1", "'c'"]);
//! ```
//!
//! ## Borrowed Elements
//!
//! Elements may borrow data, so a tuple can be built from `owned.as_str()`
//! and lives as long as the borrow. Visiting never needs more than that.
//!
//! The typed inspection methods ([`VisitableTuple::element_type_id`],
//! [`VisitableTuple::downcast_ref`], [`VisitableTuple::positions_of`]) work
//! with [`TypeId`](core::any::TypeId), so they are only available when every
//! element type is `'static`.
//!
//! ## Index Contract
//!
//! [`VisitableTuple::accept`] panics when the index is not smaller than
//! [`VisitableTuple::values_count`]. Such an index is a bug in the caller,
//! not a runtime condition. [`VisitableTuple::try_accept`] returns an
//! [`IndexOutOfBounds`] error instead, for indices that come from outside the
//! program.
//!
//! ## Arity
//!
//! Tuples implement [`Visitable`] for up to 16 elements. The
//! [`VisitableTupleBuilder`] and the [`visitable_list!`] macro have no limit;
//! they store the elements in a [`Snoc`](list::Snoc) list.
//!
//! ## Features
//!
//! - `std`: use `std::sync::OnceLock` for the lazily built type index instead
//!   of a spin-based cell. Off by default; the crate is `no_std` and only
//!   needs `alloc`.
//!
//! For implementation details, see the [`visitable-internals`] crate.
//!
//! [`visitable-internals`]: visitable_internals

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

mod builder;
pub mod error;
pub mod list;
pub mod prelude;
mod visitable_tuple;

pub use visitable_internals::Visitor;

pub use self::{
    builder::Visitable,
    error::IndexOutOfBounds,
    list::VisitableTupleBuilder,
    visitable_tuple::{VisitableTuple, element::ElementRef, iter::Iter},
};
