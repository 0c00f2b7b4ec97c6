//! The visitor capability that external code implements to operate on
//! elements of a heterogeneous tuple.
//!
//! A visitor is the one interface consumers of a tuple have to provide. It
//! carries a single operation, [`Visitor::visit`], which receives an element
//! with its original static type.

/// A generic operation over a value of statically known type `E`.
///
/// The element type is a trait parameter rather than a method parameter. This
/// lets a single visitor type either handle every element uniformly through a
/// blanket implementation, or specialize on exact element types through
/// separate implementations. Both forms receive the element as `&E`, never as
/// an erased supertype.
///
/// The trait has no return value. A visitor that needs to produce something
/// records it in its own state. Panics raised inside [`visit`] are not caught
/// anywhere in this crate and propagate to whoever dispatched the visitor.
///
/// # Examples
///
/// A visitor that handles every [`Debug`] element the same way:
///
/// ```
/// use std::fmt::Debug;
///
/// use visitable_internals::Visitor;
///
/// struct DebugLines(Vec<String>);
///
/// impl<E: Debug> Visitor<E> for DebugLines {
///     fn visit(&mut self, element: &E) {
///         self.0.push(format!("{element:?}"));
///     }
/// }
/// ```
///
/// A visitor that specializes on the exact element type:
///
/// ```
/// use visitable_internals::Visitor;
///
/// #[derive(Default)]
/// struct Totals {
///     ints: i64,
///     chars: usize,
/// }
///
/// impl Visitor<i32> for Totals {
///     fn visit(&mut self, element: &i32) {
///         self.ints += i64::from(*element);
///     }
/// }
///
/// impl Visitor<String> for Totals {
///     fn visit(&mut self, element: &String) {
///         self.chars += element.chars().count();
///     }
/// }
/// ```
///
/// [`Debug`]: core::fmt::Debug
/// [`visit`]: Visitor::visit
pub trait Visitor<E: ?Sized> {
    /// Performs the operation on `element`.
    fn visit(&mut self, element: &E);
}
