//! Element lists of unbounded length, and the incremental builder that
//! produces them.
//!
//! Tuples only implement [`Visitable`] up to 16 elements. When more elements
//! are needed, they are collected into a left-nested list instead:
//! `Snoc<Snoc<Snoc<Nil, A>, B>, C>` holds `A`, `B` and `C` in that order. The
//! nesting grows one level per element, so there is no upper bound on the
//! arity.
//!
//! Lists are rarely written by hand. [`VisitableTupleBuilder`] and the
//! [`visitable_list!`] macro build them one element at a time.
//!
//! [`visitable_list!`]: crate::visitable_list

use alloc::vec::Vec;
use core::any::TypeId;

use visitable_internals::Visitor;

use crate::{
    VisitableTuple,
    builder::{HandleSink, Visitable, sealed},
};

/// The empty element list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nil;

/// An element list made of the list `Init` followed by one more element of
/// type `Last`.
///
/// # Examples
///
/// ```
/// use visitable::list::{Nil, Snoc};
///
/// let list = Nil.push(1_u8).push("two");
/// let Snoc(Snoc(Nil, first), second) = list;
/// assert_eq!((first, second), (1, "two"));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snoc<Init, Last>(pub Init, pub Last);

impl Nil {
    /// Returns the list holding only `element`.
    pub fn push<E>(self, element: E) -> Snoc<Self, E> {
        Snoc(self, element)
    }
}

impl<Init, Last> Snoc<Init, Last> {
    /// Returns this list followed by `element`.
    pub fn push<E>(self, element: E) -> Snoc<Self, E> {
        Snoc(self, element)
    }

    /// Returns every element but the last.
    pub fn init(&self) -> &Init {
        &self.0
    }

    /// Returns the last element.
    pub fn last(&self) -> &Last {
        &self.1
    }
}

impl sealed::Sealed for Nil {}
impl<Init, Last> sealed::Sealed for Snoc<Init, Last> {}

impl<V: ?Sized> Visitable<V> for Nil {
    const COUNT: usize = 0;

    #[inline]
    fn wrap_elements(&self, _sink: &mut HandleSink<V>) {}

    #[inline]
    fn element_type_ids(_type_ids: &mut Vec<TypeId>) {}
}

impl<V, Init, Last> Visitable<V> for Snoc<Init, Last>
where
    V: ?Sized + Visitor<Last>,
    Init: Visitable<V>,
{
    const COUNT: usize = Init::COUNT + 1;

    #[inline]
    fn wrap_elements(&self, sink: &mut HandleSink<V>) {
        self.0.wrap_elements(sink);
        sink.push(&self.1);
    }

    #[inline]
    fn element_type_ids(type_ids: &mut Vec<TypeId>)
    where
        Self: 'static,
    {
        Init::element_type_ids(type_ids);
        type_ids.push(TypeId::of::<Last>());
    }
}

/// Builds a [`VisitableTuple`] one element at a time.
///
/// Every call to [`push`] appends an element, keeping its static type, and
/// counts it. [`build`] wraps every element into a type-erased handle and
/// returns the finished aggregate. The structured value of the result is a
/// [`Snoc`] list, so any number of elements can be pushed.
///
/// # Examples
///
/// ```
/// use visitable::{Visitor, VisitableTuple, VisitableTupleBuilder, list::{Nil, Snoc}};
///
/// #[derive(Default)]
/// struct Names(Vec<&'static str>);
///
/// impl<E> Visitor<E> for Names {
///     fn visit(&mut self, _element: &E) {
///         self.0.push(core::any::type_name::<E>());
///     }
/// }
///
/// let tuple: VisitableTuple<Snoc<Snoc<Nil, i32>, bool>, Names> =
///     VisitableTupleBuilder::new().push(42).push(true).build();
///
/// let mut names = Names::default();
/// tuple.accept(&mut names, 1);
/// assert_eq!(names.0, ["bool"]);
/// ```
///
/// [`push`]: VisitableTupleBuilder::push
/// [`build`]: VisitableTupleBuilder::build
#[must_use]
#[derive(Debug, Clone)]
pub struct VisitableTupleBuilder<L = Nil> {
    elements: L,
    count: usize,
}

impl VisitableTupleBuilder {
    /// Creates a builder with no elements.
    pub const fn new() -> Self {
        Self {
            elements: Nil,
            count: 0,
        }
    }
}

impl Default for VisitableTupleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> VisitableTupleBuilder<L> {
    /// Appends `element` after all previously pushed elements.
    pub fn push<E>(self, element: E) -> VisitableTupleBuilder<Snoc<L, E>> {
        VisitableTupleBuilder {
            elements: Snoc(self.elements, element),
            count: self.count + 1,
        }
    }

    /// The number of elements pushed so far.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no element has been pushed.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the pushed elements without building an aggregate.
    pub fn into_elements(self) -> L {
        self.elements
    }

    /// Wraps every pushed element into a handle and returns the aggregate.
    pub fn build<V>(self) -> VisitableTuple<L, V>
    where
        V: ?Sized,
        L: Visitable<V>,
    {
        let count = self.count;
        let tuple = VisitableTuple::new(self.elements);
        debug_assert_eq!(tuple.values_count(), count);
        tuple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ignore;

    impl<E> Visitor<E> for Ignore {
        fn visit(&mut self, _element: &E) {}
    }

    #[test]
    fn test_list_counts() {
        assert_eq!(<Nil as Visitable<Ignore>>::COUNT, 0);
        assert_eq!(<Snoc<Nil, u8> as Visitable<Ignore>>::COUNT, 1);
        assert_eq!(
            <Snoc<Snoc<Snoc<Nil, u8>, i32>, char> as Visitable<Ignore>>::COUNT,
            3
        );
    }

    #[test]
    fn test_list_push_order() {
        let list = Nil.push(1_u8).push(2_i32).push('c');
        assert_eq!(*list.last(), 'c');
        assert_eq!(*list.init().last(), 2);
        assert_eq!(*list.init().init().last(), 1);
        assert_eq!(list, Snoc(Snoc(Snoc(Nil, 1), 2), 'c'));
    }

    #[test]
    fn test_builder_counts() {
        let builder = VisitableTupleBuilder::new();
        assert!(builder.is_empty());

        let builder = builder.push("a").push(2_u64);
        assert_eq!(builder.len(), 2);
        assert!(!builder.is_empty());
        assert_eq!(builder.into_elements(), Snoc(Snoc(Nil, "a"), 2));
    }

    #[test]
    fn test_list_element_type_ids() {
        let mut type_ids = Vec::new();
        <Snoc<Snoc<Nil, u8>, &'static str> as Visitable<Ignore>>::element_type_ids(&mut type_ids);
        assert_eq!(type_ids, [TypeId::of::<u8>(), TypeId::of::<&'static str>()]);
    }

    #[test]
    fn test_builder_borrowed_elements() {
        let owned = alloc::string::String::from("runtime");
        let tuple: VisitableTuple<_, Ignore> = VisitableTupleBuilder::new()
            .push(owned.as_str())
            .push(&owned[..3])
            .build();
        assert_eq!(tuple.values_count(), 2);
        assert_eq!(*tuple.value().init().last(), "runtime");
        assert_eq!(*tuple.value().last(), "run");
    }

    #[test]
    fn test_builder_build_count() {
        let tuple: VisitableTuple<_, Ignore> = VisitableTupleBuilder::new()
            .push(1_u8)
            .push(())
            .push([0_u16; 4])
            .build();
        assert_eq!(tuple.values_count(), 3);
    }
}
