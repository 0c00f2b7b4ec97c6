//! Variadic aggregation of heterogeneous elements.
//!
//! The [`Visitable`] trait is what turns a structured value (a tuple, or a
//! [`Snoc`] list) into the parallel list of type-erased handles stored by a
//! [`VisitableTuple`]. It walks the elements left to right and feeds each one
//! into a [`HandleSink`], which wraps it, appends the handle and counts it.
//!
//! The trait is sealed. Handles point into the structured value, so only
//! implementations that push references to their own fields can be allowed.
//!
//! [`Snoc`]: crate::list::Snoc
//! [`VisitableTuple`]: crate::VisitableTuple

use alloc::vec::Vec;
use core::any::TypeId;

use visitable_internals::{RawHandle, Visitor};

pub(crate) mod sealed {
    /// Restricts [`Visitable`](super::Visitable) to the implementations in
    /// this crate.
    pub trait Sealed {}
}

/// A structured value whose elements can all be handed to a visitor of type
/// `V`.
///
/// Implemented for `()`, for tuples of up to 16 elements, and for the
/// unbounded [`Nil`]/[`Snoc`] lists built by [`VisitableTupleBuilder`]. The
/// element types may all differ, and may borrow data. The only requirement is
/// that `V` implements [`Visitor<E>`] for every element type `E`.
///
/// # Examples
///
/// ```
/// use visitable::{Visitable, Visitor};
///
/// struct Count(usize);
///
/// impl<E> Visitor<E> for Count {
///     fn visit(&mut self, _element: &E) {
///         self.0 += 1;
///     }
/// }
///
/// fn arity<T: Visitable<Count>>(_value: &T) -> usize {
///     T::COUNT
/// }
///
/// assert_eq!(arity(&(1_u8, "two", 3.0_f64)), 3);
/// assert_eq!(arity(&()), 0);
/// ```
///
/// [`Nil`]: crate::list::Nil
/// [`Snoc`]: crate::list::Snoc
/// [`VisitableTupleBuilder`]: crate::VisitableTupleBuilder
pub trait Visitable<V: ?Sized>: sealed::Sealed {
    /// The number of elements in the structured value.
    const COUNT: usize;

    /// Feeds every element, left to right, into `sink`.
    #[doc(hidden)]
    fn wrap_elements(&self, sink: &mut HandleSink<V>);

    /// Appends the [`TypeId`] of every element type, left to right.
    #[doc(hidden)]
    fn element_type_ids(type_ids: &mut Vec<TypeId>)
    where
        Self: 'static;
}

/// Collects the handles of a structured value in element order.
pub struct HandleSink<V: ?Sized> {
    handles: Vec<RawHandle<V>>,
    count: usize,
}

impl<V: ?Sized> HandleSink<V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: Vec::with_capacity(capacity),
            count: 0,
        }
    }

    /// Wraps `element` into a handle, appends it and counts it.
    #[inline]
    pub fn push<E>(&mut self, element: &E)
    where
        V: Visitor<E>,
    {
        self.handles.push(RawHandle::new(element));
        self.count += 1;
    }

    /// Returns the running count together with the collected handles.
    pub(crate) fn finish(self) -> (usize, Vec<RawHandle<V>>) {
        debug_assert_eq!(self.count, self.handles.len());
        (self.count, self.handles)
    }
}

macro_rules! impl_visitable_for_tuple {
    ($count:literal; $($index:tt: $element:ident),*) => {
        impl<$($element,)*> sealed::Sealed for ($($element,)*) {}

        impl<V, $($element,)*> Visitable<V> for ($($element,)*)
        where
            V: ?Sized $(+ Visitor<$element>)*,
        {
            const COUNT: usize = $count;

            #[inline]
            #[allow(unused_variables)]
            fn wrap_elements(&self, sink: &mut HandleSink<V>) {
                $(sink.push(&self.$index);)*
            }

            #[inline]
            #[allow(unused_variables)]
            fn element_type_ids(type_ids: &mut Vec<TypeId>)
            where
                Self: 'static,
            {
                $(type_ids.push(TypeId::of::<$element>());)*
            }
        }
    };
}

impl_visitable_for_tuple!(0;);
impl_visitable_for_tuple!(1; 0: E0);
impl_visitable_for_tuple!(2; 0: E0, 1: E1);
impl_visitable_for_tuple!(3; 0: E0, 1: E1, 2: E2);
impl_visitable_for_tuple!(4; 0: E0, 1: E1, 2: E2, 3: E3);
impl_visitable_for_tuple!(5; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4);
impl_visitable_for_tuple!(6; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5);
impl_visitable_for_tuple!(7; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6);
impl_visitable_for_tuple!(8; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6, 7: E7);
impl_visitable_for_tuple!(9; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6, 7: E7, 8: E8);
impl_visitable_for_tuple!(10; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6, 7: E7, 8: E8, 9: E9);
impl_visitable_for_tuple!(
    11; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6, 7: E7, 8: E8, 9: E9, 10: E10
);
impl_visitable_for_tuple!(
    12; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6, 7: E7, 8: E8, 9: E9, 10: E10, 11: E11
);
impl_visitable_for_tuple!(
    13; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6, 7: E7, 8: E8, 9: E9, 10: E10, 11: E11,
    12: E12
);
impl_visitable_for_tuple!(
    14; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6, 7: E7, 8: E8, 9: E9, 10: E10, 11: E11,
    12: E12, 13: E13
);
impl_visitable_for_tuple!(
    15; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6, 7: E7, 8: E8, 9: E9, 10: E10, 11: E11,
    12: E12, 13: E13, 14: E14
);
impl_visitable_for_tuple!(
    16; 0: E0, 1: E1, 2: E2, 3: E3, 4: E4, 5: E5, 6: E6, 7: E7, 8: E8, 9: E9, 10: E10, 11: E11,
    12: E12, 13: E13, 14: E14, 15: E15
);

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec};

    use super::*;

    struct Ignore;

    impl<E> Visitor<E> for Ignore {
        fn visit(&mut self, _element: &E) {}
    }

    fn collect<T: Visitable<Ignore>>(value: &T) -> (usize, Vec<RawHandle<Ignore>>) {
        let mut sink = HandleSink::with_capacity(T::COUNT);
        value.wrap_elements(&mut sink);
        sink.finish()
    }

    #[test]
    fn test_tuple_counts() {
        assert_eq!(<() as Visitable<Ignore>>::COUNT, 0);
        assert_eq!(<(u8,) as Visitable<Ignore>>::COUNT, 1);
        assert_eq!(<(u8, i16, u32) as Visitable<Ignore>>::COUNT, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as Visitable<Ignore>>::COUNT,
            16
        );
    }

    #[test]
    fn test_sink_preserves_order_and_addresses() {
        let value = (1_u8, 2_i64, 'c');
        let (count, handles) = collect(&value);

        assert_eq!(count, 3);
        assert_eq!(handles.len(), 3);
        assert_eq!(handles[0].element_type_name(), "u8");
        assert_eq!(handles[1].element_type_name(), "i64");
        assert_eq!(handles[2].element_type_name(), "char");
        assert_eq!(handles[0].as_ptr(), (&raw const value.0).cast::<()>());
        assert_eq!(handles[1].as_ptr(), (&raw const value.1).cast::<()>());
        assert_eq!(handles[2].as_ptr(), (&raw const value.2).cast::<()>());
    }

    #[test]
    fn test_sink_borrowed_elements() {
        let owned = String::from("borrowed");
        let value = (owned.as_str(), &owned[..3], 5_u8);
        let (count, handles) = collect(&value);

        assert_eq!(count, 3);
        assert_eq!(handles[0].element_type_name(), "&str");
        assert_eq!(handles[1].as_ptr(), (&raw const value.1).cast::<()>());
    }

    #[test]
    fn test_tuple_element_type_ids() {
        let mut type_ids = Vec::new();
        <(u8, String, u8) as Visitable<Ignore>>::element_type_ids(&mut type_ids);
        assert_eq!(
            type_ids,
            vec![TypeId::of::<u8>(), TypeId::of::<String>(), TypeId::of::<u8>()]
        );

        let mut type_ids = Vec::new();
        <() as Visitable<Ignore>>::element_type_ids(&mut type_ids);
        assert!(type_ids.is_empty());
    }

    #[test]
    fn test_sink_empty_tuple() {
        let (count, handles) = collect(&());
        assert_eq!(count, 0);
        assert!(handles.is_empty());
    }
}
