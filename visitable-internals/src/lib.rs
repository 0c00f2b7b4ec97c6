#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`visitable`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased handle and the unsafe
//! operations that power the [`visitable`] heterogeneous tuple library. A
//! handle points at one element of a tuple and remembers, through a vtable
//! generated when the element type was still known, how to hand that element
//! to a visitor with its original static type.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`visitable`] crate,
//! not this one.
//!
//! # Architecture
//!
//! - **[`handle`]**: Type-erased element handles
//!   - [`RawHandle`]: Non-owning pointer to an element plus its vtable
//!   - [`HandleVtable`]: Function pointers for type-erased dispatch
//!
//! - **[`visitor`]**: The capability external code implements
//!   - [`Visitor`]: One generic operation over a statically typed element
//!
//! # Safety Strategy
//!
//! When we erase `&E` to a pointer to [`Erased`], the vtable stored next to
//! it must still describe `E`, and the visitor type the vtable was generated
//! for must be the one that is later passed to [`RawHandle::accept`].
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: the pointer and vtable fields of
//!   [`RawHandle`] are private to a single module and are only ever set
//!   together, in [`RawHandle::new`]
//! - **Type-level visitor tracking**: [`RawHandle`] carries the visitor type
//!   as a phantom parameter, so a handle generated for one visitor type cannot
//!   be called with another
//! - **Documented vtable contracts**: each vtable method specifies exactly
//!   when it can be safely called
//!
//! What this crate cannot check is that the element is still alive when the
//! handle is used. That is the responsibility of the owner of the elements,
//! which in [`visitable`] is the `VisitableTuple` aggregate.
//!
//! [`visitable`]: https://docs.rs/visitable/latest/visitable/
//! [`HandleVtable`]: handle::vtable::HandleVtable
//! [`Erased`]: util::Erased

#[cfg(test)]
extern crate alloc;

mod handle;
mod util;
pub mod visitor;

pub use handle::RawHandle;
pub use visitor::Visitor;
