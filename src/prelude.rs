//! Commonly used items for convenient importing.
//!
//! The prelude re-exports the aggregate, its builder, the visitor trait and
//! the construction macros, so that a single `use visitable::prelude::*;`
//! covers the usual cases.
//!
//! ```rust
//! use visitable::prelude::*;
//!
//! struct Ignore;
//!
//! impl<E> Visitor<E> for Ignore {
//!     fn visit(&mut self, _element: &E) {}
//! }
//!
//! let tuple: VisitableTuple<_, Ignore> = visitable_tuple![1, "two"];
//! tuple.accept(&mut Ignore, 1);
//! ```

pub use crate::{VisitableTuple, VisitableTupleBuilder, Visitor, visitable_list, visitable_tuple};
